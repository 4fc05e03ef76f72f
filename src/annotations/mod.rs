//! Annotation storage
//!
//! This module provides the ordered annotation store together with the
//! step-marker numbering counter and the crop re-clipping transform.

pub mod store;

pub use store::AnnotationStore;
