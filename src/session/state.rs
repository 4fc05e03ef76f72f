//! Editor session state and the pointer-drag state machine

use image::RgbaImage;
use tiny_skia::Pixmap;

use super::messages::EditorEvent;
use crate::annotations::AnnotationStore;
use crate::capture::BaseImage;
use crate::config::{ShapeColor, ShareyConfig};
use crate::domain::{
    Annotation, ArrowAnnotation, BoxAnnotation, PixelRect, Point, Rect, StepMarkerAnnotation, Tool,
};
use crate::error::CaptureError;
use crate::render::scene;

/// Drag sub-machine: `Idle -> Dragging -> Idle`, crop detours through `PendingCrop`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// The tool is frozen at drag start
    Dragging {
        tool: Tool,
        origin: Point,
        current: Point,
    },
    /// Crop selection released, waiting for confirm or cancel
    PendingCrop(PixelRect),
}

/// One editing session over one base image
///
/// A new session is created for every loaded image. Closing it drops the
/// image, the annotations and the step counter; nothing is persisted.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub(super) base: BaseImage,
    pub(super) store: AnnotationStore,
    pub(super) active_tool: Option<Tool>,
    pub(super) color: ShapeColor,
    pub(super) stroke_width: f32,
    pub(super) drag: DragState,
    pub(super) crop_highlight: ShapeColor,
}

impl EditorSession {
    /// Start a session on an already prepared base image
    pub fn new(base: BaseImage, config: &ShareyConfig) -> Self {
        log::debug!(
            "Editor session started on {}x{} image",
            base.width(),
            base.height()
        );
        Self {
            base,
            store: AnnotationStore::new(),
            active_tool: None,
            color: config.shape_color,
            stroke_width: config.stroke_width,
            drag: DragState::Idle,
            crop_highlight: config.crop_highlight,
        }
    }

    /// Start a session on a decoded image, scaled down to the configured canvas box
    pub fn load(rgba: RgbaImage, config: &ShareyConfig) -> Result<Self, CaptureError> {
        let base = BaseImage::load(rgba, config.max_canvas_width, config.max_canvas_height)?;
        Ok(Self::new(base, config))
    }

    /// End the session
    pub fn close(self) {
        log::debug!(
            "Editor session closed with {} annotation(s)",
            self.store.len()
        );
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn base(&self) -> &BaseImage {
        &self.base
    }

    /// Canvas dimensions, always those of the current base image
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.base.width(), self.base.height())
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.store.annotations()
    }

    pub fn next_step_number(&self) -> u32 {
        self.store.next_step_number()
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.active_tool
    }

    pub fn color(&self) -> ShapeColor {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn pending_crop(&self) -> Option<PixelRect> {
        match self.drag {
            DragState::PendingCrop(region) => Some(region),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Palette
    // ------------------------------------------------------------------------

    /// Change the active tool
    ///
    /// Ignored while a drag is in progress or a crop awaits confirmation, so
    /// a drag always finishes with the tool it started with.
    pub fn select_tool(&mut self, tool: Option<Tool>) -> Option<EditorEvent> {
        match self.drag {
            DragState::Dragging { .. } | DragState::PendingCrop(_) => {
                log::debug!("Ignoring tool switch to {:?} during {:?}", tool, self.drag);
                None
            }
            DragState::Idle => {
                self.active_tool = tool;
                Some(EditorEvent::ToolChanged(tool))
            }
        }
    }

    pub fn set_color(&mut self, color: ShapeColor) -> Option<EditorEvent> {
        self.color = color;
        None
    }

    /// Set the stroke width, non-positive or non-finite widths are ignored
    pub fn set_stroke_width(&mut self, width: f32) -> Option<EditorEvent> {
        if !width.is_finite() || width <= 0.0 {
            log::debug!("Ignoring stroke width {width}");
            return None;
        }
        self.stroke_width = width;
        None
    }

    // ------------------------------------------------------------------------
    // Pointer drag
    // ------------------------------------------------------------------------

    /// Pointer pressed: start a drag with the active tool
    ///
    /// Returns `Redraw` only when a pending crop selection is discarded.
    pub fn begin_drag(&mut self, at: Point) -> Option<EditorEvent> {
        let tool = self.active_tool?;
        if self.is_dragging() {
            return None;
        }
        let replaced = match self.drag {
            DragState::PendingCrop(previous) => {
                log::debug!("Replacing pending crop {previous:?} with a new selection");
                true
            }
            _ => false,
        };
        self.drag = DragState::Dragging {
            tool,
            origin: at,
            current: at,
        };
        // The pending veil disappears with the old selection
        replaced.then_some(EditorEvent::Redraw)
    }

    /// Pointer moved: update the live preview, the store is untouched
    pub fn update_drag(&mut self, at: Point) -> Option<EditorEvent> {
        let DragState::Dragging { current, .. } = &mut self.drag else {
            return None;
        };
        *current = at;
        Some(EditorEvent::Redraw)
    }

    /// Pointer released or left the canvas: commit the drag
    pub fn end_drag(&mut self, at: Point) -> Option<EditorEvent> {
        let DragState::Dragging { tool, origin, .. } = self.drag else {
            return None;
        };

        let w = at.x - origin.x;
        let h = at.y - origin.y;
        let annotation = match tool {
            Tool::Crop => return self.finish_crop_selection(origin, at),
            Tool::Box => Annotation::Box(BoxAnnotation {
                x: origin.x,
                y: origin.y,
                w,
                h,
                color: self.color,
                stroke_width: self.stroke_width,
            }),
            Tool::Arrow => Annotation::Arrow(ArrowAnnotation {
                x: origin.x,
                y: origin.y,
                w,
                h,
                color: self.color,
                stroke_width: self.stroke_width,
            }),
            Tool::Step => Annotation::StepMarker(StepMarkerAnnotation {
                x: origin.x,
                y: origin.y,
                color: self.color,
                stroke_width: self.stroke_width,
                // Stamped by the store on commit
                number: 0,
            }),
        };

        self.drag = DragState::Idle;
        let committed = self.store.commit(annotation).clone();
        log::debug!("Committed {} annotation", tool.name());
        Some(EditorEvent::AnnotationCommitted(committed))
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    /// Remove the most recent annotation
    pub fn undo(&mut self) -> Option<EditorEvent> {
        self.store.pop_last().map(|_| EditorEvent::Redraw)
    }

    /// Remove all annotations and restart step numbering
    pub fn clear(&mut self) -> Option<EditorEvent> {
        self.store.clear();
        Some(EditorEvent::Redraw)
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Committed scene: base image plus every stored annotation
    pub fn render_scene(&self) -> Option<Pixmap> {
        let (width, height) = self.canvas_size();
        scene::render_committed(&self.base, self.store.annotations(), width, height)
    }

    /// Committed scene with the preview for the current drag state on top
    pub fn render_frame(&self) -> Option<Pixmap> {
        let mut pixmap = self.render_scene()?;
        match self.drag {
            DragState::Idle => {}
            DragState::Dragging {
                tool: Tool::Crop,
                origin,
                current,
            } => scene::draw_crop_preview(
                &mut pixmap,
                &self.base,
                Rect::from_drag(origin, current),
                self.crop_highlight,
            ),
            DragState::Dragging {
                tool,
                origin,
                current,
            } => scene::draw_shape_preview(
                &mut pixmap,
                tool,
                origin,
                current,
                self.color,
                self.stroke_width,
                self.store.next_step_number(),
            ),
            DragState::PendingCrop(region) => scene::draw_crop_preview(
                &mut pixmap,
                &self.base,
                region.to_rect(),
                self.crop_highlight,
            ),
        }
        Some(pixmap)
    }
}
