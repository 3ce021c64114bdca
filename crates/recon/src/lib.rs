//! `crossdoc-recon` — document reconciliation engine.
//!
//! Pure engine crate: receives extracted product lines, returns match /
//! mismatch classifications, confirmed invoice–order pairs, and shipment
//! calendar events. No CLI, persistence, or rendering dependencies.

pub mod brand;
pub mod compare;
pub mod config;
pub mod dates;
pub mod engine;
pub mod error;
pub mod events;
pub mod fields;
pub mod index;
pub mod model;
pub mod normalize;
pub mod sweep;

pub use config::SweepConfig;
pub use engine::reconcile;
pub use error::ReconError;
pub use model::{Document, ProductLine, ReconOptions, ReconResult, SweepOutcome};
pub use sweep::sweep;
