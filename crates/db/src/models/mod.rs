//! Database row structs.

pub mod campaign;
