//! Editor message dispatch
//!
//! Handles EditorMsg by routing to the session operations.

use super::messages::{EditorEvent, EditorMsg};
use super::state::EditorSession;
use crate::domain::Point;

/// Handle an EditorMsg, modifying session state
///
/// Returns the resulting event, or `None` when nothing visible changed.
pub fn handle_editor_msg(session: &mut EditorSession, msg: EditorMsg) -> Option<EditorEvent> {
    match msg {
        EditorMsg::PointerDown { x, y } => session.begin_drag(Point::new(x, y)),
        EditorMsg::PointerMove { x, y } => session.update_drag(Point::new(x, y)),
        EditorMsg::PointerUp { x, y } | EditorMsg::PointerLeave { x, y } => {
            session.end_drag(Point::new(x, y))
        }
        EditorMsg::SelectTool { tool } => session.select_tool(tool),
        EditorMsg::SetColor { color } => session.set_color(color),
        EditorMsg::SetStrokeWidth { width } => session.set_stroke_width(width),
        EditorMsg::Undo => session.undo(),
        EditorMsg::Clear => session.clear(),
        EditorMsg::ConfirmCrop => session.confirm_crop(),
        EditorMsg::CancelCrop => session.cancel_crop(),
    }
}

impl EditorSession {
    /// See [`handle_editor_msg`]
    pub fn handle(&mut self, msg: EditorMsg) -> Option<EditorEvent> {
        handle_editor_msg(self, msg)
    }

    /// Handle a sequence of messages, collecting the events they produced
    pub fn replay<I>(&mut self, msgs: I) -> Vec<EditorEvent>
    where
        I: IntoIterator<Item = EditorMsg>,
    {
        msgs.into_iter().filter_map(|msg| self.handle(msg)).collect()
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::config::{ShapeColor, ShareyConfig};
    use crate::domain::{Annotation, Tool};
    use crate::session::DragState;

    fn session() -> EditorSession {
        let rgba = RgbaImage::from_pixel(300, 200, Rgba([240, 240, 240, 255]));
        EditorSession::load(rgba, &ShareyConfig::default()).unwrap()
    }

    fn down(x: f32, y: f32) -> EditorMsg {
        EditorMsg::PointerDown { x, y }
    }

    fn moved(x: f32, y: f32) -> EditorMsg {
        EditorMsg::PointerMove { x, y }
    }

    fn up(x: f32, y: f32) -> EditorMsg {
        EditorMsg::PointerUp { x, y }
    }

    fn tool(tool: Tool) -> EditorMsg {
        EditorMsg::SelectTool { tool: Some(tool) }
    }

    #[test]
    fn click_with_step_tool_places_marker_one() {
        let mut session = session();
        session.handle(tool(Tool::Step));
        session.handle(down(50.0, 50.0));
        let event = session.handle(up(50.0, 50.0));

        let Some(EditorEvent::AnnotationCommitted(Annotation::StepMarker(marker))) = event else {
            panic!("unexpected {event:?}");
        };
        assert_eq!((marker.x, marker.y, marker.number), (50.0, 50.0, 1));
        assert_eq!(session.next_step_number(), 2);
        assert_eq!(session.annotations().len(), 1);
    }

    #[test]
    fn drag_without_tool_changes_nothing() {
        let mut session = session();
        let events = session.replay([down(10.0, 10.0), moved(40.0, 40.0), up(80.0, 80.0)]);
        assert!(events.is_empty());
        assert!(session.annotations().is_empty());
        assert_eq!(session.drag_state(), DragState::Idle);
    }

    #[test]
    fn box_drag_commits_signed_extent() {
        let mut session = session();
        session.handle(EditorMsg::SetColor {
            color: ShapeColor::from_rgb_u8(0, 0, 255),
        });
        session.handle(EditorMsg::SetStrokeWidth { width: 6.0 });
        session.replay([tool(Tool::Box), down(100.0, 80.0), up(40.0, 20.0)]);

        let Annotation::Box(boxed) = &session.annotations()[0] else {
            panic!("expected a box");
        };
        assert_eq!((boxed.x, boxed.y, boxed.w, boxed.h), (100.0, 80.0, -60.0, -60.0));
        assert_eq!(boxed.color, ShapeColor::from_rgb_u8(0, 0, 255));
        assert_eq!(boxed.stroke_width, 6.0);
    }

    #[test]
    fn tool_is_frozen_during_drag() {
        let mut session = session();
        session.replay([tool(Tool::Arrow), down(10.0, 10.0)]);
        assert_eq!(session.handle(tool(Tool::Box)), None);
        session.handle(up(60.0, 10.0));

        assert!(matches!(session.annotations()[0], Annotation::Arrow(_)));
        assert_eq!(session.active_tool(), Some(Tool::Arrow));
    }

    #[test]
    fn pointer_leave_ends_drag() {
        let mut session = session();
        session.replay([tool(Tool::Box), down(10.0, 10.0)]);
        let event = session.handle(EditorMsg::PointerLeave { x: 30.0, y: 30.0 });
        assert!(matches!(event, Some(EditorEvent::AnnotationCommitted(_))));
        assert!(!session.is_dragging());
    }

    #[test]
    fn preview_does_not_touch_store() {
        let mut session = session();
        session.replay([tool(Tool::Box), down(10.0, 10.0)]);
        assert_eq!(session.handle(moved(90.0, 90.0)), Some(EditorEvent::Redraw));
        assert!(session.annotations().is_empty());

        let frame = session.render_frame().unwrap();
        let scene = session.render_scene().unwrap();
        assert_ne!(frame.data(), scene.data());
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn undo_returns_step_number() {
        let mut session = session();
        session.replay([
            tool(Tool::Step),
            down(20.0, 20.0),
            up(20.0, 20.0),
            down(80.0, 20.0),
            up(80.0, 20.0),
        ]);
        assert_eq!(session.next_step_number(), 3);

        assert_eq!(session.handle(EditorMsg::Undo), Some(EditorEvent::Redraw));
        assert_eq!(session.next_step_number(), 2);

        session.replay([down(140.0, 20.0), up(140.0, 20.0)]);
        let Annotation::StepMarker(marker) = &session.annotations()[1] else {
            panic!("expected a step marker");
        };
        assert_eq!(marker.number, 2);
    }

    #[test]
    fn undo_on_empty_is_noop() {
        let mut session = session();
        assert_eq!(session.handle(EditorMsg::Undo), None);
        assert_eq!(session.next_step_number(), 1);
    }

    #[test]
    fn clear_resets_numbering() {
        let mut session = session();
        session.replay([tool(Tool::Step), down(20.0, 20.0), up(20.0, 20.0)]);
        session.handle(EditorMsg::Clear);
        assert!(session.annotations().is_empty());
        assert_eq!(session.next_step_number(), 1);
    }

    #[test]
    fn invalid_stroke_width_is_ignored() {
        let mut session = session();
        let before = session.stroke_width();
        session.handle(EditorMsg::SetStrokeWidth { width: 0.0 });
        session.handle(EditorMsg::SetStrokeWidth { width: f32::NAN });
        assert_eq!(session.stroke_width(), before);
    }

    #[test]
    fn crop_round_trip_through_messages() {
        let mut session = session();
        let events = session.replay([
            tool(Tool::Box),
            down(120.0, 120.0),
            up(160.0, 160.0),
            tool(Tool::Crop),
            down(100.0, 100.0),
            moved(200.0, 180.0),
            up(200.0, 180.0),
            EditorMsg::ConfirmCrop,
        ]);
        assert_eq!(
            events.last(),
            Some(&EditorEvent::CropApplied {
                width: 100,
                height: 80,
                dropped: 0
            })
        );
        assert_eq!(session.canvas_size(), (100, 80));
        assert_eq!(session.annotations()[0].bounds().x, 20.0);
        assert_eq!(session.active_tool(), None);
    }
}
