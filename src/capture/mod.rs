//! Image capture and recording collaborators
//!
//! This module consolidates:
//! - The editor's base image type (image.rs)
//! - Screen capture sources (source.rs)
//! - Screen recording handoff and the elapsed-time display (recording.rs)

pub mod image;
pub mod recording;
pub mod source;

pub use self::image::BaseImage;
pub use recording::{FileRecorder, Recorder, Recording, RecordingClock};
pub use source::{ImageFileSource, ScreenSource};
