//! Builder controller: routes user actions and pointer input to the model.

use kurbo::Point;
use pagebox_core::{
    BuilderConfig, CardId, CardReorder, CardSlot, FloatId, GestureTarget, GestureUpdate,
    InteractionSession, Page, PageStore, ReorderMove, Storage,
};

/// Actions triggered from the builder's controls.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Append a new card to the grid.
    AddCard,
    /// Add a new floating box.
    AddFloatingBox,
    /// Save the page to local storage.
    SaveAll,
    /// Discard the saved page and reload.
    ResetAll,
    /// Rebuild the page from the saved snapshot.
    RestoreAll,
    DeleteCard(CardId),
    CardColor(CardId, String),
    CardIcon(CardId, String),
    CardTitle(CardId, String),
    CardBody(CardId, String),
    DeleteFloat(FloatId),
    FloatColor(FloatId, String),
    FloatIcon(FloatId, String),
    FloatText(FloatId, String),
}

/// What the view has to do after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing visible changed.
    Unchanged,
    CardAdded(CardId),
    CardChanged(CardId),
    CardRemoved(CardId),
    FloatAdded(FloatId),
    FloatChanged(FloatId),
    FloatRemoved(FloatId),
    /// The page was saved; acknowledge it.
    Saved,
    /// The saved page was discarded; reload to the static page.
    Reload,
    /// The whole page was replaced; rebuild every unit.
    Rebuild,
    /// The action failed; the message is for the log.
    Failed(String),
}

/// Where a pointer-down landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    ContainerHeader,
    ContainerHandle,
    Float { id: FloatId, on_handle: bool },
}

/// Page model plus the interaction state driving it.
pub struct Builder<S: Storage> {
    config: BuilderConfig,
    page: Page,
    session: InteractionSession,
    reorder: CardReorder,
    store: PageStore<S>,
}

impl<S: Storage> Builder<S> {
    /// Create a builder over `page`.
    pub fn new(config: BuilderConfig, page: Page, store: PageStore<S>) -> Self {
        Self {
            config,
            page,
            session: InteractionSession::new(),
            reorder: CardReorder::new(),
            store,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    /// Replace the page with the saved snapshot if the config asks for it.
    pub fn restore_on_load(&mut self) -> Outcome {
        if self.config.restore_on_load {
            self.dispatch(UiAction::RestoreAll)
        } else {
            Outcome::Unchanged
        }
    }

    /// Apply a user action.
    pub fn dispatch(&mut self, action: UiAction) -> Outcome {
        let config = &self.config;
        let page = &mut self.page;
        let changed_card = |id, changed: bool| {
            if changed { Outcome::CardChanged(id) } else { Outcome::Unchanged }
        };
        let changed_float = |id, changed: bool| {
            if changed { Outcome::FloatChanged(id) } else { Outcome::Unchanged }
        };

        match action {
            UiAction::AddCard => Outcome::CardAdded(page.add_card(config)),
            UiAction::AddFloatingBox => Outcome::FloatAdded(page.add_floating_box(config)),
            UiAction::SaveAll => match self.store.save_all(page) {
                Ok(()) => Outcome::Saved,
                Err(e) => Outcome::Failed(format!("Save failed: {}", e)),
            },
            UiAction::ResetAll => match self.store.reset_all() {
                Ok(()) => Outcome::Reload,
                Err(e) => Outcome::Failed(format!("Reset failed: {}", e)),
            },
            UiAction::RestoreAll => match self.store.restore() {
                Ok(Some(restored)) => {
                    *page = restored;
                    self.session = InteractionSession::new();
                    self.reorder = CardReorder::new();
                    Outcome::Rebuild
                }
                Ok(None) => {
                    log::info!("No saved page to restore");
                    Outcome::Unchanged
                }
                Err(e) => Outcome::Failed(format!("Restore failed: {}", e)),
            },
            UiAction::DeleteCard(id) => match page.delete_card(id) {
                Some(_) => {
                    if self.reorder.dragging() == Some(id) {
                        self.reorder.drag_end();
                    }
                    Outcome::CardRemoved(id)
                }
                None => Outcome::Unchanged,
            },
            UiAction::CardColor(id, value) => {
                changed_card(id, page.set_card_background(id, &value))
            }
            UiAction::CardIcon(id, value) => {
                changed_card(id, page.set_card_icon(id, &value, config))
            }
            // Text edits are already on screen.
            UiAction::CardTitle(id, text) => {
                page.set_card_title(id, &text);
                Outcome::Unchanged
            }
            UiAction::CardBody(id, text) => {
                page.set_card_body(id, &text);
                Outcome::Unchanged
            }
            UiAction::DeleteFloat(id) => match page.delete_floating_box(id) {
                Some(_) => {
                    self.session.forget(GestureTarget::Floating(id));
                    Outcome::FloatRemoved(id)
                }
                None => Outcome::Unchanged,
            },
            UiAction::FloatColor(id, value) => {
                changed_float(id, page.set_float_background(id, &value))
            }
            UiAction::FloatIcon(id, value) => {
                changed_float(id, page.set_float_icon(id, &value, config))
            }
            UiAction::FloatText(id, text) => {
                page.set_float_text(id, &text);
                Outcome::Unchanged
            }
        }
    }

    // --- Pointer gestures ---

    /// Handle a pointer-down. A press on a resize handle always resizes.
    pub fn pointer_down(&mut self, target: PointerTarget, pointer: Point) -> bool {
        match target {
            PointerTarget::ContainerHeader => {
                self.session
                    .begin_drag(&self.page, GestureTarget::Container, pointer)
            }
            PointerTarget::ContainerHandle => {
                self.session.begin_resize(&self.page, GestureTarget::Container)
            }
            PointerTarget::Float { id, on_handle: true } => {
                self.session
                    .begin_resize(&self.page, GestureTarget::Floating(id))
            }
            PointerTarget::Float { id, on_handle: false } => {
                self.session
                    .begin_drag(&self.page, GestureTarget::Floating(id), pointer)
            }
        }
    }

    /// Handle a document-wide pointer move.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<GestureUpdate> {
        self.session.pointer_move(&mut self.page, pointer)
    }

    /// Handle a document-wide pointer release.
    pub fn pointer_up(&mut self) -> Option<GestureTarget> {
        self.session.pointer_up()
    }

    // --- Card drag-and-drop ---

    pub fn card_drag_start(&mut self, id: CardId) {
        self.reorder.drag_start(id);
    }

    pub fn card_drag_end(&mut self) -> Option<CardId> {
        self.reorder.drag_end()
    }

    pub fn dragging_card(&self) -> Option<CardId> {
        self.reorder.dragging()
    }

    /// Handle a drag-over on the grid.
    pub fn card_drag_over(&mut self, pointer_y: f64, slots: &[CardSlot]) -> Option<ReorderMove> {
        self.reorder.drag_over(&mut self.page, pointer_y, slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::gesture_styles;
    use pagebox_core::Frame;
    use pagebox_core::storage::MemoryStorage;
    use std::sync::Arc;

    fn builder() -> Builder<MemoryStorage> {
        let config = BuilderConfig::default();
        let store = PageStore::new(Arc::new(MemoryStorage::new()), config.storage_key.clone());
        let page = Page::with_container(Frame::new(Point::new(0.0, 0.0), 500.0, 400.0));
        Builder::new(config, page, store)
    }

    fn added_card(outcome: Outcome) -> CardId {
        match outcome {
            Outcome::CardAdded(id) => id,
            other => panic!("expected CardAdded, got {:?}", other),
        }
    }

    fn added_float(outcome: Outcome) -> FloatId {
        match outcome {
            Outcome::FloatAdded(id) => id,
            other => panic!("expected FloatAdded, got {:?}", other),
        }
    }

    #[test]
    fn test_save_then_reset_clears_storage() {
        let mut builder = builder();
        builder.dispatch(UiAction::AddCard);

        assert_eq!(builder.dispatch(UiAction::SaveAll), Outcome::Saved);
        assert!(builder.store.has_saved().unwrap());

        assert_eq!(builder.dispatch(UiAction::ResetAll), Outcome::Reload);
        assert!(!builder.store.has_saved().unwrap());
        assert_eq!(builder.dispatch(UiAction::RestoreAll), Outcome::Unchanged);
    }

    #[test]
    fn test_restore_replaces_page() {
        let mut builder = builder();
        let card = added_card(builder.dispatch(UiAction::AddCard));
        builder.dispatch(UiAction::CardBody(card, "talteen".to_string()));
        builder.dispatch(UiAction::SaveAll);

        builder.dispatch(UiAction::DeleteCard(card));
        assert!(builder.page().cards.is_empty());

        assert_eq!(builder.dispatch(UiAction::RestoreAll), Outcome::Rebuild);
        assert_eq!(builder.page().cards[0].body, "talteen");
    }

    #[test]
    fn test_restore_on_load_respects_config() {
        let mut builder = builder();
        builder.dispatch(UiAction::AddCard);
        builder.dispatch(UiAction::SaveAll);
        builder.page_mut().cards.clear();

        assert_eq!(builder.restore_on_load(), Outcome::Unchanged);
        assert!(builder.page().cards.is_empty());

        builder.config.restore_on_load = true;
        assert_eq!(builder.restore_on_load(), Outcome::Rebuild);
        assert_eq!(builder.page().cards.len(), 1);
    }

    #[test]
    fn test_card_controls() {
        let mut builder = builder();
        let card = added_card(builder.dispatch(UiAction::AddCard));

        assert_eq!(
            builder.dispatch(UiAction::CardIcon(card, "🌿".to_string())),
            Outcome::CardChanged(card)
        );
        assert_eq!(
            builder.dispatch(UiAction::CardIcon(card, " ".to_string())),
            Outcome::Unchanged
        );
        assert_eq!(
            builder.dispatch(UiAction::CardColor(card, "#000000".to_string())),
            Outcome::CardChanged(card)
        );
        assert_eq!(
            builder.page().card(card).unwrap().title.display(),
            "🌿 Uusi otsikko"
        );
        assert_eq!(builder.dispatch(UiAction::DeleteCard(card)), Outcome::CardRemoved(card));
        assert_eq!(builder.dispatch(UiAction::DeleteCard(card)), Outcome::Unchanged);
    }

    #[test]
    fn test_resize_handle_never_drags() {
        let mut builder = builder();
        let id = added_float(builder.dispatch(UiAction::AddFloatingBox));

        let handle = PointerTarget::Float { id, on_handle: true };
        assert!(builder.pointer_down(handle, Point::new(340.0, 260.0)));
        let update = builder.pointer_move(Point::new(420.0, 320.0)).unwrap();

        assert_eq!(update.frame.position, Point::new(120.0, 120.0));
        assert_eq!(update.frame.width, 300.0);
        assert_eq!(update.frame.height, 200.0);
    }

    #[test]
    fn test_container_gestures() {
        let mut builder = builder();

        builder.pointer_down(PointerTarget::ContainerHeader, Point::new(10.0, 10.0));
        builder.pointer_move(Point::new(110.0, 60.0));
        assert_eq!(builder.pointer_up(), Some(GestureTarget::Container));

        builder.pointer_down(PointerTarget::ContainerHandle, Point::new(600.0, 450.0));
        builder.pointer_move(Point::new(400.0, 350.0));
        builder.pointer_up();

        let frame = builder.page().container.unwrap();
        assert_eq!(frame.position, Point::new(100.0, 50.0));
        assert_eq!(frame.width, 300.0);
        assert_eq!(frame.height, 300.0);
    }

    #[test]
    fn test_container_drag_writes_position_only() {
        let config = BuilderConfig::default();
        let store = PageStore::new(Arc::new(MemoryStorage::new()), config.storage_key.clone());
        let page = Page::with_container(Frame::new(Point::new(40.0, 80.0), 640.0, 480.0));
        let mut builder = Builder::new(config, page, store);

        builder.pointer_down(PointerTarget::ContainerHeader, Point::new(60.0, 90.0));
        let update = builder.pointer_move(Point::new(70.0, 100.0)).unwrap();

        assert_eq!(
            gesture_styles(&update),
            vec![("left", "50px".to_string()), ("top", "90px".to_string())]
        );
        let frame = builder.page().container.unwrap();
        assert_eq!((frame.width, frame.height), (640.0, 480.0));
    }

    #[test]
    fn test_container_resize_writes_size_only() {
        let mut builder = builder();

        builder.pointer_down(PointerTarget::ContainerHandle, Point::new(500.0, 400.0));
        let update = builder.pointer_move(Point::new(320.0, 250.0)).unwrap();

        assert_eq!(
            gesture_styles(&update),
            vec![("width", "320px".to_string()), ("height", "250px".to_string())]
        );
    }

    #[test]
    fn test_deleting_dragged_float_ends_gesture() {
        let mut builder = builder();
        let id = added_float(builder.dispatch(UiAction::AddFloatingBox));

        let body = PointerTarget::Float { id, on_handle: false };
        builder.pointer_down(body, Point::new(130.0, 130.0));
        builder.dispatch(UiAction::DeleteFloat(id));
        assert!(!builder.session().is_active());
        assert!(builder.pointer_move(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_card_drag_and_drop() {
        let mut builder = builder();
        let a = added_card(builder.dispatch(UiAction::AddCard));
        let b = added_card(builder.dispatch(UiAction::AddCard));
        let slots = [CardSlot::new(a, 0.0, 100.0), CardSlot::new(b, 100.0, 100.0)];

        builder.card_drag_start(b);
        assert_eq!(builder.card_drag_over(20.0, &slots), Some(ReorderMove::Before(a)));
        assert_eq!(builder.card_drag_end(), Some(b));
        assert_eq!(builder.page().card_order(), vec![b, a]);
    }
}
