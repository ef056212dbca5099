//! Element ids and class names the shell relies on, and the inline styles
//! it writes.

use pagebox_core::{Frame, GestureKind, GestureUpdate};

/// Ids of the static page elements.
pub mod ids {
    pub const CONTAINER: &str = "moveBox";
    pub const DRAG_HEADER: &str = "dragHeader";
    pub const RESIZE_HANDLE: &str = "resizeHandle";
    pub const CARD_GRID: &str = "innerGrid";
    pub const FLOATING_AREA: &str = "floatingArea";
}

/// Class names of generated fragments.
pub mod classes {
    pub const CARD: &str = "inner-box";
    pub const CARD_HEADER: &str = "inner-header";
    pub const CARD_ICON: &str = "inner-icon";
    pub const CARD_TITLE: &str = "inner-title";
    pub const CARD_CONTROLS: &str = "color-picker";
    pub const CARD_ICON_INPUT: &str = "icon-input";
    pub const CARD_DELETE: &str = "delete-btn";
    pub const CARD_BODY: &str = "inner-text";
    /// Marks the card being dragged.
    pub const DRAGGING: &str = "dragging";

    pub const FLOAT: &str = "float-box";
    pub const FLOAT_CONTROLS: &str = "float-controls";
    pub const FLOAT_ICON_INPUT: &str = "float-icon-input";
    pub const FLOAT_DELETE: &str = "float-delete";
    pub const FLOAT_ICON: &str = "float-icon";
    pub const FLOAT_TEXT: &str = "float-text";
    pub const FLOAT_RESIZE: &str = "float-resize";
}

/// Attribute carrying a unit's id on its root element.
pub const UNIT_ID_ATTR: &str = "data-id";

/// Attribute carrying a floating box's creation tag.
pub const FLOAT_TAG_ATTR: &str = "data-tag";

/// Label shown on delete buttons.
pub const DELETE_LABEL: &str = "Poista";

/// Acknowledgement shown after a successful save.
pub const SAVED_MESSAGE: &str = "Tallennettu!";

/// Format a length as a CSS pixel value.
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Parse a computed CSS pixel length such as `"640px"`.
pub fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

/// Style properties placing an element at `frame`.
pub fn frame_styles(frame: &Frame) -> Vec<(&'static str, String)> {
    vec![
        ("left", px(frame.position.x)),
        ("top", px(frame.position.y)),
        ("width", px(frame.width)),
        ("height", px(frame.height)),
    ]
}

/// Style properties a gesture update touches. A drag never writes the size
/// and a resize never writes the position.
pub fn gesture_styles(update: &GestureUpdate) -> Vec<(&'static str, String)> {
    let frame = &update.frame;
    match update.kind {
        GestureKind::Moved => vec![("left", px(frame.position.x)), ("top", px(frame.position.y))],
        GestureKind::Resized => vec![("width", px(frame.width)), ("height", px(frame.height))],
    }
}
