//! Interactive two-pane browser for diagnostic findings: severity buckets
//! on the first screen, individual findings and their remediation detail on
//! the second. Findings are supplied by the caller; the only side effect
//! besides terminal output is an optional clipboard write through injected
//! hooks.

pub mod detail;
pub mod highlight;
pub mod session;
pub mod state;
pub mod text;
pub mod theme;
pub mod ui;

pub use dockaudit_core::{group_by_severity, Category, Finding, Fix, FixKind, Severity};
pub use session::{run, BrowseOptions, CopyHooks};
