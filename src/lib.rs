pub mod app;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod format;
pub mod latency;
pub mod model;
pub mod session;
pub mod ui;
