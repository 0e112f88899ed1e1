//! HTML report of the council's voting status.
//!
//! Renders an [`AlertBatch`](grump_core::AlertBatch) into a single
//! self-contained HTML document. Delivery (writing the file) is left to
//! the caller.

pub mod render;
mod template;

pub use render::{displayed, ReportConfig, ReportError, ReportRenderer};
