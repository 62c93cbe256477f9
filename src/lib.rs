//! copter-tracker library crate.
//!
//! Camera capture, HSV colour tracking and the terminal view, exposed for
//! the binary and for integration tests.

pub mod ascii;
pub mod camera;
pub mod cli;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod session;
pub mod terminal;
pub mod vision;

pub use error::AppError;
