//! Drag and resize gestures.

use crate::geometry::Frame;
use crate::page::{FloatId, Page};
use kurbo::{Point, Vec2};

/// The element a gesture acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureTarget {
    /// The page container.
    Container,
    /// A floating box.
    Floating(FloatId),
}

impl GestureTarget {
    fn frame(self, page: &Page) -> Option<Frame> {
        match self {
            Self::Container => page.container,
            Self::Floating(id) => page.floating_box(id).map(|f| f.frame),
        }
    }

    fn frame_mut(self, page: &mut Page) -> Option<&mut Frame> {
        match self {
            Self::Container => page.container.as_mut(),
            Self::Floating(id) => page.floating_box_mut(id).map(|f| &mut f.frame),
        }
    }
}

/// The currently active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Session {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving a target; `offset` is pointer minus top-left at gesture start.
    Dragging { target: GestureTarget, offset: Vec2 },
    /// Resizing a target; `anchor` is its top-left at gesture start.
    Resizing { target: GestureTarget, anchor: Point },
}

impl Session {
    /// The target of the active gesture, if any.
    pub fn target(&self) -> Option<GestureTarget> {
        match self {
            Self::Idle => None,
            Self::Dragging { target, .. } | Self::Resizing { target, .. } => Some(*target),
        }
    }
}

/// Which part of a frame a pointer move changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Only the top-left corner moved.
    Moved,
    /// Only the width and height changed.
    Resized,
}

/// A geometry change produced by a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureUpdate {
    pub target: GestureTarget,
    pub kind: GestureKind,
    pub frame: Frame,
}

/// Owner of the single active pointer gesture.
///
/// Every drag or resize, whatever its target, goes through one session, so
/// starting a gesture always supersedes the previous one and a pointer-up
/// always ends whichever gesture is active.
#[derive(Debug, Clone, Default)]
pub struct InteractionSession {
    session: Session,
}

impl InteractionSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the active gesture.
    pub fn session(&self) -> Session {
        self.session
    }

    /// Check if any gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.session != Session::Idle
    }

    /// Start dragging `target` with the pointer at `pointer`.
    ///
    /// Returns false and leaves the session unchanged if the target does not
    /// exist on the page.
    pub fn begin_drag(&mut self, page: &Page, target: GestureTarget, pointer: Point) -> bool {
        let Some(frame) = target.frame(page) else {
            log::debug!("Drag target {:?} not found", target);
            return false;
        };
        self.replace(Session::Dragging {
            target,
            offset: pointer - frame.position,
        });
        true
    }

    /// Start resizing `target`, anchored at its current top-left corner.
    pub fn begin_resize(&mut self, page: &Page, target: GestureTarget) -> bool {
        let Some(frame) = target.frame(page) else {
            log::debug!("Resize target {:?} not found", target);
            return false;
        };
        self.replace(Session::Resizing {
            target,
            anchor: frame.position,
        });
        true
    }

    /// Apply a pointer move to the active gesture's target.
    pub fn pointer_move(&mut self, page: &mut Page, pointer: Point) -> Option<GestureUpdate> {
        let target = self.session.target()?;
        let Some(frame) = target.frame_mut(page) else {
            log::debug!("Gesture target {:?} vanished, ending gesture", target);
            self.session = Session::Idle;
            return None;
        };
        let kind = match self.session {
            Session::Dragging { offset, .. } => {
                frame.move_to(pointer - offset);
                GestureKind::Moved
            }
            Session::Resizing { anchor, .. } => {
                frame.resize_from(anchor, pointer);
                GestureKind::Resized
            }
            Session::Idle => return None,
        };
        Some(GestureUpdate {
            target,
            kind,
            frame: *frame,
        })
    }

    /// End the active gesture, whichever it is.
    pub fn pointer_up(&mut self) -> Option<GestureTarget> {
        let ended = self.session.target();
        if let Some(target) = ended {
            log::debug!("Gesture on {:?} ended", target);
        }
        self.session = Session::Idle;
        ended
    }

    /// Forget a gesture whose target was removed from the page.
    pub fn forget(&mut self, target: GestureTarget) {
        if self.session.target() == Some(target) {
            self.session = Session::Idle;
        }
    }

    fn replace(&mut self, next: Session) {
        if let Some(previous) = self.session.target() {
            log::debug!("Gesture on {:?} superseded", previous);
        }
        log::debug!("Gesture started: {:?}", next);
        self.session = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuilderConfig;

    fn page() -> Page {
        Page::with_container(Frame::new(Point::new(50.0, 60.0), 400.0, 300.0))
    }

    #[test]
    fn test_drag_moves_by_pointer_delta() {
        let mut page = page();
        let mut session = InteractionSession::new();

        assert!(session.begin_drag(&page, GestureTarget::Container, Point::new(70.0, 75.0)));
        session.pointer_move(&mut page, Point::new(90.0, 60.0));
        let update = session
            .pointer_move(&mut page, Point::new(100.0, 105.0))
            .unwrap();

        assert_eq!(update.target, GestureTarget::Container);
        assert_eq!(update.kind, GestureKind::Moved);
        assert_eq!(update.frame.position, Point::new(80.0, 90.0));
        assert_eq!((update.frame.width, update.frame.height), (400.0, 300.0));
    }

    #[test]
    fn test_redrag_does_not_drift() {
        let mut page = page();
        let mut session = InteractionSession::new();

        session.begin_drag(&page, GestureTarget::Container, Point::new(60.0, 70.0));
        session.pointer_move(&mut page, Point::new(70.0, 80.0));
        session.pointer_up();

        // Grab at a different spot inside the header.
        session.begin_drag(&page, GestureTarget::Container, Point::new(200.0, 75.0));
        session.pointer_move(&mut page, Point::new(195.0, 95.0));
        session.pointer_up();

        assert_eq!(page.container.unwrap().position, Point::new(55.0, 90.0));
    }

    #[test]
    fn test_resize_anchors_at_start_position() {
        let mut page = page();
        let mut session = InteractionSession::new();

        assert!(session.begin_resize(&page, GestureTarget::Container));
        session.pointer_move(&mut page, Point::new(300.0, 200.0));
        let update = session
            .pointer_move(&mut page, Point::new(500.0, 460.0))
            .unwrap();

        assert_eq!(update.kind, GestureKind::Resized);
        assert_eq!(update.frame.position, Point::new(50.0, 60.0));
        assert_eq!(update.frame.width, 450.0);
        assert_eq!(update.frame.height, 400.0);
    }

    #[test]
    fn test_resize_does_not_clamp() {
        let mut page = page();
        let mut session = InteractionSession::new();

        session.begin_resize(&page, GestureTarget::Container);
        let update = session
            .pointer_move(&mut page, Point::new(20.0, 60.0))
            .unwrap();
        assert_eq!(update.frame.width, -30.0);
        assert_eq!(update.frame.height, 0.0);
    }

    #[test]
    fn test_pointer_up_ends_any_gesture() {
        let mut page = page();
        let mut session = InteractionSession::new();

        session.begin_resize(&page, GestureTarget::Container);
        assert_eq!(session.pointer_up(), Some(GestureTarget::Container));
        assert!(!session.is_active());
        assert!(session.pointer_move(&mut page, Point::new(1.0, 1.0)).is_none());
        assert_eq!(session.pointer_up(), None);
    }

    #[test]
    fn test_new_gesture_supersedes_active_one() {
        let config = BuilderConfig::default();
        let mut page = page();
        let float = page.add_floating_box(&config);
        let mut session = InteractionSession::new();

        session.begin_drag(&page, GestureTarget::Container, Point::new(60.0, 70.0));
        session.begin_resize(&page, GestureTarget::Floating(float));
        session.pointer_move(&mut page, Point::new(400.0, 300.0));

        assert_eq!(page.container.unwrap().position, Point::new(50.0, 60.0));
        let frame = page.floating_box(float).unwrap().frame;
        assert_eq!(frame.width, 280.0);
        assert_eq!(frame.height, 180.0);
    }

    #[test]
    fn test_missing_target_is_rejected() {
        let page = Page::new();
        let mut session = InteractionSession::new();

        assert!(!session.begin_drag(&page, GestureTarget::Container, Point::ZERO));
        assert!(!session.begin_resize(&page, GestureTarget::Floating(uuid::Uuid::new_v4())));
        assert!(!session.is_active());
    }

    #[test]
    fn test_deleted_target_ends_gesture() {
        let config = BuilderConfig::default();
        let mut page = Page::new();
        let float = page.add_floating_box(&config);
        let mut session = InteractionSession::new();

        session.begin_drag(&page, GestureTarget::Floating(float), Point::new(130.0, 130.0));
        page.delete_floating_box(float);
        assert!(session.pointer_move(&mut page, Point::new(10.0, 10.0)).is_none());
        assert!(!session.is_active());
    }

    #[test]
    fn test_floating_box_drag() {
        let config = BuilderConfig::default();
        let mut page = Page::new();
        let float = page.add_floating_box(&config);
        let mut session = InteractionSession::new();

        session.begin_drag(&page, GestureTarget::Floating(float), Point::new(130.0, 125.0));
        session.pointer_move(&mut page, Point::new(330.0, 25.0));
        session.pointer_up();

        assert_eq!(
            page.floating_box(float).unwrap().frame.position,
            Point::new(320.0, 20.0)
        );
    }
}
