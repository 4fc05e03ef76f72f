//! Crop workflow
//!
//! A crop drag ends in `PendingCrop`. Confirming replaces the base image
//! with the selected pixels and re-clips the annotations into the new
//! coordinate space; cancelling just drops the selection.

use super::messages::EditorEvent;
use super::state::{DragState, EditorSession};
use crate::domain::{Point, Rect};

impl EditorSession {
    /// Turn a released crop drag into a pending selection
    ///
    /// The selection is normalized, snapped to whole pixels and clamped to
    /// the canvas. A selection with no area is discarded.
    pub(super) fn finish_crop_selection(
        &mut self,
        origin: Point,
        at: Point,
    ) -> Option<EditorEvent> {
        let (width, height) = self.canvas_size();
        match Rect::from_drag(origin, at).snap_to_canvas(width, height) {
            Some(region) => {
                log::debug!("Crop selection pending: {region:?}");
                self.drag = DragState::PendingCrop(region);
                Some(EditorEvent::CropPending(region))
            }
            None => {
                log::debug!("Empty crop selection discarded");
                self.drag = DragState::Idle;
                Some(EditorEvent::Redraw)
            }
        }
    }

    /// Apply the pending crop
    ///
    /// No-op without a pending selection. On success the tool is cleared and
    /// the session returns to idle.
    pub fn confirm_crop(&mut self) -> Option<EditorEvent> {
        let DragState::PendingCrop(region) = self.drag else {
            return None;
        };

        let cropped = match self.base.crop(region) {
            Ok(cropped) => cropped,
            Err(err) => {
                log::error!("Crop to {region:?} failed: {err}");
                return None;
            }
        };

        let survivors = self.store.crop_transform(&region.to_rect());
        let dropped = self.store.len() - survivors.len();
        self.store.replace(survivors);
        self.base = cropped;
        self.drag = DragState::Idle;
        self.active_tool = None;

        log::info!(
            "Cropped to {}x{}, dropped {} annotation(s)",
            region.width,
            region.height,
            dropped
        );
        Some(EditorEvent::CropApplied {
            width: region.width,
            height: region.height,
            dropped,
        })
    }

    /// Discard the pending crop and clear the tool
    pub fn cancel_crop(&mut self) -> Option<EditorEvent> {
        let DragState::PendingCrop(_) = self.drag else {
            return None;
        };
        self.drag = DragState::Idle;
        self.active_tool = None;
        Some(EditorEvent::CropCancelled)
    }
}
