//! Pure domain types with minimal dependencies
//!
//! This module contains the core editor types. Types here carry no
//! rendering or platform dependencies so every other module can use them.

pub mod annotation;
pub mod geometry;
pub mod tool;

pub use annotation::*;
pub use geometry::*;
pub use tool::*;
