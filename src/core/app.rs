//! Application state and top-level actions
//!
//! `App` ties the editor session to capture, recording, export and the
//! library. Platform capabilities are passed in per call so the same actions
//! run against real devices or test doubles.

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbaImage;

use super::toast::Toast;
use crate::capture::{Recorder, RecordingClock, ScreenSource};
use crate::config::ShareyConfig;
use crate::error::Error;
use crate::export::{self, ClipboardSink};
use crate::library::{ItemKind, Library, LibraryError};
use crate::session::{EditorEvent, EditorMsg, EditorSession};

pub struct App {
    config: ShareyConfig,
    library: Library,
    /// Open editor, if any
    editor: Option<EditorSession>,
    /// Running recording, if any
    recording: Option<RecordingClock>,
    toast: Option<Toast>,
}

impl App {
    /// Create the app with the library location from `config`
    pub fn new(config: ShareyConfig) -> Self {
        let path = config.library_file().unwrap_or_else(|| {
            log::warn!("No data directory available, keeping the library in the working directory");
            PathBuf::from("sharey-library.json")
        });
        let library = Library::open(path, config.library_quota_bytes as u64);
        Self::with_library(config, library)
    }

    pub fn with_library(config: ShareyConfig, library: Library) -> Self {
        Self {
            config,
            library,
            editor: None,
            recording: None,
            toast: None,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &ShareyConfig {
        &self.config
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorSession> {
        self.editor.as_mut()
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// Timer text for the running recording
    pub fn recording_elapsed(&self) -> Option<String> {
        self.recording.as_ref().map(RecordingClock::display)
    }

    /// The current toast, unless it has already expired
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref().filter(|toast| !toast.is_expired())
    }

    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }

    // ------------------------------------------------------------------------
    // Capture
    // ------------------------------------------------------------------------

    /// Capture one frame and open it in a fresh editor
    pub fn capture_screenshot(&mut self, source: &mut dyn ScreenSource) -> Result<(), Error> {
        let frame = source
            .capture_frame()
            .map_err(|err| self.fail("Failed to capture screenshot", err.into()))?;
        self.open_editor(frame)
            .map_err(|err| self.fail("Failed to capture screenshot", err))?;
        self.notify("Screenshot captured successfully!");
        Ok(())
    }

    /// Start recording, or stop and save the running recording
    pub fn toggle_recording(&mut self, recorder: &mut dyn Recorder) -> Result<(), Error> {
        if self.recording.take().is_some() {
            let recording = recorder
                .stop()
                .map_err(|err| self.fail("Failed to save recording", err.into()))?;
            self.library
                .add_recording(&recording)
                .map(|_| ())
                .map_err(|err| self.fail("Failed to save recording", err.into()))?;
            self.notify("Recording saved successfully!");
        } else {
            recorder
                .start()
                .map_err(|err| self.fail("Failed to start recording", err.into()))?;
            self.recording = Some(RecordingClock::start());
            log::info!("Recording started");
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Editor
    // ------------------------------------------------------------------------

    /// Forward a message to the open editor
    pub fn handle_editor_msg(&mut self, msg: EditorMsg) -> Option<EditorEvent> {
        let event = self.editor.as_mut()?.handle(msg);
        if let Some(EditorEvent::CropApplied { .. }) = event {
            self.notify("Image cropped successfully!");
        }
        event
    }

    /// Discard the editor with its annotations
    pub fn close_editor(&mut self) {
        if let Some(session) = self.editor.take() {
            session.close();
        }
    }

    fn open_editor(&mut self, rgba: RgbaImage) -> Result<(), Error> {
        let session = EditorSession::load(rgba, &self.config)?;
        self.close_editor();
        self.editor = Some(session);
        Ok(())
    }

    fn final_png(&self) -> Result<Vec<u8>, Error> {
        let session = self
            .editor
            .as_ref()
            .ok_or(Error::InvalidOperation("no image in the editor"))?;
        let image = export::render_final_image(session)
            .ok_or(Error::InvalidOperation("editor canvas is empty"))?;
        Ok(export::encode_png(&image)?)
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    /// Write the final image into `dir` as `screenshot-<millis>.png`
    pub fn download(&mut self, dir: &Path) -> Result<PathBuf, Error> {
        let path = dir.join(export::screenshot_file_name_now());
        let result = self
            .final_png()
            .and_then(|png| std::fs::write(&path, png).map_err(|err| Error::Export(err.into())));
        result.map_err(|err| self.fail("Failed to download", err))?;
        self.notify("Downloaded successfully!");
        Ok(path)
    }

    pub fn copy_to_clipboard(&mut self, sink: &mut dyn ClipboardSink) -> Result<(), Error> {
        let result = self
            .final_png()
            .and_then(|png| sink.set_png(&png).map_err(Error::from));
        result.map_err(|err| self.fail("Failed to copy to clipboard", err))?;
        self.notify("Copied to clipboard!");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Library
    // ------------------------------------------------------------------------

    /// Save the final image as a library screenshot, returns its id
    pub fn save_to_library(&mut self) -> Result<i64, Error> {
        let result = self.final_png().and_then(|png| {
            self.library
                .add_screenshot(&png)
                .map(|item| item.id)
                .map_err(Error::from)
        });
        let id = result.map_err(|err| self.fail("Failed to save", err))?;
        self.notify("Saved to library!");
        Ok(id)
    }

    /// Load a saved screenshot into a fresh editor
    pub fn open_library_item(&mut self, id: i64) -> Result<(), Error> {
        let item = self
            .library
            .get(id)
            .ok_or(Error::Library(LibraryError::NotFound(id)))?;
        if item.kind != ItemKind::Screenshot {
            return Err(Error::InvalidOperation("only screenshots can be edited"));
        }
        let result = Library::decode_payload(item)
            .map_err(Error::from)
            .and_then(|(_, bytes)| {
                image::load_from_memory(&bytes).map_err(|err| Error::Capture(err.into()))
            });
        let frame = result.map_err(|err| self.fail("Failed to open item", err))?;
        self.open_editor(frame.to_rgba8())
            .map_err(|err| self.fail("Failed to open item", err))
    }

    pub fn delete_library_item(&mut self, id: i64) -> Result<(), Error> {
        self.library
            .delete(id)
            .map_err(|err| self.fail("Failed to delete item", err.into()))?;
        self.notify("Item deleted");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.config.toast_duration_ms)
    }

    fn notify(&mut self, message: &str) {
        self.toast = Some(Toast::success(message, self.toast_duration()));
    }

    /// Surface a failure according to its kind and hand it back
    fn fail(&mut self, context: &str, err: Error) -> Error {
        if !err.kind().is_user_visible() {
            log::debug!("{context}: {err}");
            return err;
        }
        let message = match &err {
            Error::Library(LibraryError::QuotaExceeded { .. }) => err.to_string(),
            _ => format!("{context}: {err}"),
        };
        self.toast = Some(Toast::error(message, self.toast_duration()));
        err
    }
}
