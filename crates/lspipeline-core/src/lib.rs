//! `lspipeline` Core Library
//!
//! Shared functionality for the pipeline dashboard:
//! - Pipeline state model and execution statuses
//! - Status → color palette
//! - Relative/absolute time formatting
//! - The pipeline collaborator trait
//! - Configuration resolution and common error types

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod status;
pub mod time_fmt;
pub mod tracing_init;

pub use api::PipelineApi;
pub use config::Config;
pub use error::{Error, RemoteError, RenderError, Result};
pub use model::{ExecutionStatus, PipelineState, StageState};
pub use status::{StatusColor, StatusPalette};
pub use time_fmt::DisplayZone;
