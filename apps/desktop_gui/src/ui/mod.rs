//! UI layer: app shell and screen rendering.

pub mod app;

pub use app::ZipcastApp;
