//! Drag-and-drop reordering of grid cards.

use crate::page::{CardId, Page};

/// Rendered vertical extent of a card in the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSlot {
    pub id: CardId,
    pub top: f64,
    pub height: f64,
}

impl CardSlot {
    pub fn new(id: CardId, top: f64, height: f64) -> Self {
        Self { id, top, height }
    }

    /// Vertical midpoint of the slot.
    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Where the dragged card was moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderMove {
    /// Immediately before another card.
    Before(CardId),
    /// After every other card.
    ToEnd,
}

impl ReorderMove {
    /// The card the dragged one now precedes, if any.
    pub fn before(&self) -> Option<CardId> {
        match self {
            Self::Before(id) => Some(*id),
            Self::ToEnd => None,
        }
    }
}

/// Tracks the card currently being dragged within the grid.
#[derive(Debug, Clone, Default)]
pub struct CardReorder {
    dragging: Option<CardId>,
}

impl CardReorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The card being dragged, if any.
    pub fn dragging(&self) -> Option<CardId> {
        self.dragging
    }

    /// Mark `id` as the card being dragged.
    pub fn drag_start(&mut self, id: CardId) {
        log::debug!("Card drag started: {}", id);
        self.dragging = Some(id);
    }

    /// Clear the dragged card. Returns the card that was being dragged.
    pub fn drag_end(&mut self) -> Option<CardId> {
        self.dragging.take()
    }

    /// Handle a drag-over signal at `pointer_y`.
    ///
    /// `slots` are the grid's rendered cards in document order. The dragged
    /// card is moved before the first other card whose midpoint lies below
    /// the pointer, or to the end if there is none. Horizontal position is
    /// ignored.
    pub fn drag_over(
        &self,
        page: &mut Page,
        pointer_y: f64,
        slots: &[CardSlot],
    ) -> Option<ReorderMove> {
        let dragging = self.dragging?;
        let target = insertion_point(dragging, pointer_y, slots);
        if !page.move_card(dragging, target.before()) {
            log::debug!("Dragged card {} is no longer on the page", dragging);
            return None;
        }
        Some(target)
    }
}

/// Pick where a dragged card goes for a pointer at `pointer_y`.
pub fn insertion_point(dragging: CardId, pointer_y: f64, slots: &[CardSlot]) -> ReorderMove {
    slots
        .iter()
        .filter(|slot| slot.id != dragging)
        .find(|slot| pointer_y < slot.midpoint())
        .map_or(ReorderMove::ToEnd, |slot| ReorderMove::Before(slot.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuilderConfig;

    /// Three stacked 100px cards A, B, C with a 10px gap.
    fn setup() -> (Page, [CardId; 3]) {
        let config = BuilderConfig::default();
        let mut page = Page::new();
        let a = page.add_card(&config);
        let b = page.add_card(&config);
        let c = page.add_card(&config);
        (page, [a, b, c])
    }

    fn slots(page: &Page) -> Vec<CardSlot> {
        page.card_order()
            .into_iter()
            .enumerate()
            .map(|(i, id)| CardSlot::new(id, i as f64 * 110.0, 100.0))
            .collect()
    }

    #[test]
    fn test_drag_last_above_middle_midpoint() {
        let (mut page, [a, b, c]) = setup();
        let mut reorder = CardReorder::new();

        reorder.drag_start(c);
        let slots = slots(&page);
        // B spans 110..210, midpoint 160.
        let moved = reorder.drag_over(&mut page, 150.0, &slots);

        assert_eq!(moved, Some(ReorderMove::Before(b)));
        assert_eq!(page.card_order(), vec![a, c, b]);
    }

    #[test]
    fn test_drag_first_below_last_midpoint() {
        let (mut page, [a, b, c]) = setup();
        let mut reorder = CardReorder::new();

        reorder.drag_start(a);
        let slots = slots(&page);
        // C spans 220..320, midpoint 270.
        let moved = reorder.drag_over(&mut page, 280.0, &slots);

        assert_eq!(moved, Some(ReorderMove::ToEnd));
        assert_eq!(page.card_order(), vec![b, c, a]);
    }

    #[test]
    fn test_card_follows_pointer_continuously() {
        let (mut page, [a, b, c]) = setup();
        let mut reorder = CardReorder::new();

        reorder.drag_start(a);
        for y in [170.0, 230.0, 300.0] {
            let slots = slots(&page);
            reorder.drag_over(&mut page, y, &slots);
        }
        assert_eq!(page.card_order(), vec![b, c, a]);

        let slots = slots(&page);
        reorder.drag_over(&mut page, 10.0, &slots);
        assert_eq!(page.card_order(), vec![a, b, c]);
    }

    #[test]
    fn test_no_drag_no_move() {
        let (mut page, [a, b, c]) = setup();
        let mut reorder = CardReorder::new();
        let slots = slots(&page);

        assert_eq!(reorder.drag_over(&mut page, 0.0, &slots), None);
        reorder.drag_start(b);
        assert_eq!(reorder.drag_end(), Some(b));
        assert_eq!(reorder.drag_over(&mut page, 0.0, &slots), None);
        assert_eq!(page.card_order(), vec![a, b, c]);
    }

    #[test]
    fn test_new_cards_participate() {
        let config = BuilderConfig::default();
        let (mut page, [a, b, c]) = setup();
        let d = page.add_card(&config);
        let mut reorder = CardReorder::new();

        reorder.drag_start(d);
        let slots = slots(&page);
        reorder.drag_over(&mut page, 5.0, &slots);
        assert_eq!(page.card_order(), vec![d, a, b, c]);
    }

    #[test]
    fn test_deleted_dragged_card() {
        let (mut page, [a, _, _]) = setup();
        let mut reorder = CardReorder::new();

        reorder.drag_start(a);
        let slots = slots(&page);
        page.delete_card(a);
        assert_eq!(reorder.drag_over(&mut page, 0.0, &slots), None);
        assert_eq!(page.cards.len(), 2);
    }
}
