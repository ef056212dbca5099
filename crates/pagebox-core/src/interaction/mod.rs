//! Pointer interaction engine.
//!
//! Turns pointer gestures into page mutations:
//! - Free-form drag and resize of the container and floating boxes, through
//!   a single [`InteractionSession`]
//! - Drag-and-drop reordering of grid cards, through [`CardReorder`]
//!
//! The engine works purely on page coordinates. Translating DOM events into
//! these calls is left to the shell.

mod reorder;
mod session;

pub use reorder::{CardReorder, CardSlot, ReorderMove};
pub use session::{GestureKind, GestureTarget, GestureUpdate, InteractionSession, Session};
