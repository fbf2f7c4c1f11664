//! `courtsync-recon` — Cross-source stat reconciliation engine.
//!
//! Pure engine crate: receives pre-extracted records from two page sources,
//! matches them by canonical identity, compares numeric attributes under
//! tolerance, and returns a structured report. No CLI or filesystem
//! dependencies; CSV exports are handed in as strings.

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod summary;

pub use config::{ReconConfig, ToleranceConfig};
pub use engine::run;
pub use error::ReconError;
pub use loader::{load_csv_records, LoadedRecords};
pub use matcher::reconcile;
pub use model::{ReconInput, ReconResult, StatRecord};
