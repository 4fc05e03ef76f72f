//! Annotation rendering module
//!
//! This module contains:
//! - Geometry constants shared by committed rendering and previews
//! - Drawing primitives using tiny-skia
//! - Bitmap text for step marker labels
//! - Committed scene and preview composition

pub mod geometry;
pub mod image;
pub mod scene;
pub mod text;
