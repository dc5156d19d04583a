//! Domain types shared by the ad-platform client, the database layer
//! and the sync pipeline.

pub mod campaign;
pub mod error;
pub mod types;
