//! # codeclimate_tslint_schema
//!
//! Wire types for the Code Climate engine specification as used by
//! codeclimate-tslint.
//!
//! This crate defines:
//! - The `Issue` record the engine emits for every problem it reports
//! - The `EngineConfig` document the platform mounts into the container
//!
//! Both sides are plain data with serde derives; all I/O lives in
//! `codeclimate_tslint_core`.

mod config;
mod issue;

pub use config::EngineConfig;
pub use issue::{
    Category, Contents, Issue, IssueType, LineRange, Location, Position, PositionRange, Severity,
    Trace,
};
