//! Editor session module
//!
//! This module contains:
//! - Session state and the pointer-drag state machine
//! - Message types for editor interactions
//! - Message handlers
//! - The crop workflow

pub mod crop;
pub mod handlers;
pub mod messages;
pub mod state;

pub use handlers::handle_editor_msg;
pub use messages::{EditorEvent, EditorMsg};
pub use state::{DragState, EditorSession};
