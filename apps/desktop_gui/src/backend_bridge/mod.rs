//! Bridge between the UI thread and the tokio-backed HTTP worker.

pub mod commands;
pub mod runtime;
