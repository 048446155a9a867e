//! lspipeline CLI Library
//!
//! Lists CodePipeline pipelines, or watches one as a live terminal
//! dashboard (ratatui) or prints it once as a table.

pub mod aws;
pub mod list_cmd;
pub mod tui;
pub mod ui;
