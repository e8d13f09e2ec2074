//! Domain logic for the Bauportal backend.
//!
//! This crate is pure computation with zero I/O so it can be used by the
//! API/repository layer and any future CLI or worker tooling alike:
//! progress aggregation, eigenleistung history bounding, CSV export,
//! document path/search helpers, and the default phase catalog.

pub mod documents;
pub mod eigenleistung;
pub mod error;
pub mod export;
pub mod gewerk_status;
pub mod progress;
pub mod seed;
pub mod types;
