//! Terminal front end: stdin commands in, rendered view model out.
mod app;
mod effects;
mod input;
mod logging;
mod ui;

pub use app::run_app;
