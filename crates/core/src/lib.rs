//! Shared records, roster loading and configuration for the council
//! voting monitor.

pub mod config;
pub mod error;
pub mod model;
pub mod roster;

pub use config::{AnalysisConfig, DeliveryMode, MessageConfig, MonitorConfig, SnapshotLinks, Tone};
pub use error::*;
pub use model::*;
pub use roster::CouncilRoster;
