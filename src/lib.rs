//! LogReports - log report plugins for the server platform.
//!
//! Each report receives a JSON request (time range, optional group),
//! asks the host for log records, aggregates them into chart and table
//! data and answers with a UI tree wrapped in a modal:
//!
//! ```json
//! {"ui": {"modal": {"size": "xxxl", "headerContent": [], "footerContent": [], "content": []}}}
//! ```
//!
//! The host is abstracted behind [`host::ServerInterface`]; the bundled
//! binary supplies a file-backed implementation.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod report;
pub mod ui;

pub use error::{HostError, ReportError, Result};
pub use host::{FileLogSource, LogQuery, MemoryLogSource, ServerInterface};
pub use report::{about_report, create_report, ReportKind, ReportSettings};
