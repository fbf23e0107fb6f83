// Library exports for sandtail
// This allows the test suite to import modules

pub mod api;
pub mod cli;
pub mod config;
pub mod event_handler;
pub mod export;
pub mod stream;
pub mod ui;
