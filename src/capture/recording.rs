//! Screen recording handoff
//!
//! Encoding happens inside the platform recorder. The editor core only sees
//! the finished blob and keeps a wall-clock start time for the timer display.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::CaptureError;

/// A finished recording blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    pub bytes: Vec<u8>,
    /// Container MIME type, e.g. `video/webm`
    pub mime: String,
}

impl Recording {
    pub fn webm(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime: "video/webm".to_string(),
        }
    }
}

/// A platform capability that records the screen
pub trait Recorder {
    /// Begin recording; a declined prompt is [`CaptureError::PermissionDenied`]
    fn start(&mut self) -> Result<(), CaptureError>;
    /// Stop and hand back the encoded recording
    fn stop(&mut self) -> Result<Recording, CaptureError>;
}

/// Recorder that hands back an already encoded file on stop
#[derive(Debug, Clone)]
pub struct FileRecorder {
    path: PathBuf,
    started: bool,
}

impl FileRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            started: false,
        }
    }
}

impl Recorder for FileRecorder {
    fn start(&mut self) -> Result<(), CaptureError> {
        if !self.path.is_file() {
            return Err(CaptureError::Failed(format!(
                "{} is not a file",
                self.path.display()
            )));
        }
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<Recording, CaptureError> {
        if !std::mem::take(&mut self.started) {
            return Err(CaptureError::Failed("recording was not started".into()));
        }
        let bytes = fs::read(&self.path)?;
        Ok(Recording::webm(bytes))
    }
}

/// Wall-clock start of an active recording
#[derive(Debug, Clone, Copy)]
pub struct RecordingClock {
    started_at: Instant,
}

impl RecordingClock {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Current timer text, `MM:SS`
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed())
    }
}

/// Format a duration as zero-padded `MM:SS`, minutes are not wrapped
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::from_millis(999)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "01:01");
        assert_eq!(format_elapsed(Duration::from_secs(3600 + 5)), "60:05");
    }

    #[test]
    fn file_recorder_returns_file_contents() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("clip.webm");
        fs::write(&path, b"webm-bytes").expect("write should succeed");

        let mut recorder = FileRecorder::new(&path);
        assert!(recorder.stop().is_err());
        recorder.start().unwrap();
        let recording = recorder.stop().unwrap();
        assert_eq!(recording.bytes, b"webm-bytes");
        assert_eq!(recording.mime, "video/webm");
    }

    #[test]
    fn file_recorder_rejects_missing_file() {
        let mut recorder = FileRecorder::new("/nonexistent/clip.webm");
        assert!(matches!(recorder.start(), Err(CaptureError::Failed(_))));
    }

    #[test]
    fn fresh_clock_reads_zero() {
        assert_eq!(RecordingClock::start().display(), "00:00");
    }
}
