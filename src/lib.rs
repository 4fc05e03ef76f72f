//! Screenshot annotation editor
//!
//! Captured images are opened in an [`session::EditorSession`] where boxes,
//! arrows and numbered step markers are drawn with pointer drags, the image
//! can be cropped, and the result exported as PNG or kept in a local
//! [`library::Library`].

pub mod annotations;
pub mod capture;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod export;
pub mod library;
pub mod render;
pub mod session;
