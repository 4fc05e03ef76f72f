//! Message types for the editor session
//!
//! This module contains:
//! - EditorMsg, every input the editor reacts to
//! - EditorEvent, what changed as a result, for the presentation layer

use serde::{Deserialize, Serialize};

use crate::config::ShapeColor;
use crate::domain::{Annotation, PixelRect, Tool};

// ============================================================================
// Inputs
// ============================================================================

/// All editor inputs
///
/// Pointer positions are relative to the canvas origin. Messages are
/// serializable so a whole editing session can be replayed from a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditorMsg {
    /// Pointer pressed on the canvas
    PointerDown { x: f32, y: f32 },
    /// Pointer moved over the canvas
    PointerMove { x: f32, y: f32 },
    /// Pointer released
    PointerUp { x: f32, y: f32 },
    /// Pointer left the canvas, ends a drag like a release
    PointerLeave { x: f32, y: f32 },
    /// Pick a palette tool, `None` deselects
    SelectTool { tool: Option<Tool> },
    /// Set the stroke color for new annotations
    SetColor { color: ShapeColor },
    /// Set the stroke width for new annotations
    SetStrokeWidth { width: f32 },
    /// Remove the last annotation
    Undo,
    /// Remove all annotations
    Clear,
    /// Apply the pending crop selection
    ConfirmCrop,
    /// Discard the pending crop selection
    CancelCrop,
}

// ============================================================================
// Outputs
// ============================================================================

/// State change reported after handling a message
///
/// Every event implies the canvas must be redrawn. Handlers return `None`
/// when the canvas is unaffected, including ignored messages.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Scene or preview changed
    Redraw,
    /// Active tool changed
    ToolChanged(Option<Tool>),
    /// A drag was committed as a new annotation
    AnnotationCommitted(Annotation),
    /// A crop selection awaits confirm or cancel
    CropPending(PixelRect),
    /// Crop applied, canvas is now `width`×`height`
    CropApplied {
        width: u32,
        height: u32,
        /// Annotations that fell outside the selection
        dropped: usize,
    },
    /// Pending crop discarded
    CropCancelled,
}
