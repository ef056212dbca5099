//! PageBox Core Library
//!
//! Platform-agnostic page model, gesture handling and persistence for the
//! PageBox page builder.

pub mod color;
pub mod config;
pub mod geometry;
pub mod interaction;
pub mod label;
pub mod page;
pub mod snapshot;
pub mod storage;

pub use color::{ColorError, SerializableColor};
pub use config::BuilderConfig;
pub use geometry::Frame;
pub use interaction::{
    CardReorder, CardSlot, GestureKind, GestureTarget, GestureUpdate, InteractionSession,
    ReorderMove, Session,
};
pub use label::Label;
pub use page::{Card, CardId, FloatId, FloatingBox, Page};
pub use snapshot::{PageSnapshot, UnitKind, UnitRecord};
pub use storage::{PageStore, Storage, StorageError, StorageResult};
