//! Core application module
//!
//! This module contains:
//! - Application state and the actions wired to capture, export and the library
//! - Toast notifications

pub mod app;
pub mod toast;

pub use app::App;
pub use toast::{Toast, ToastKind};
pub use crate::error::{Error, ErrorKind};
