//! Page document and the factory operations that build it.

use crate::color::SerializableColor;
use crate::config::BuilderConfig;
use crate::geometry::Frame;
use crate::label::Label;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a card.
pub type CardId = Uuid;

/// Unique identifier for a floating box.
pub type FloatId = Uuid;

/// A reorderable, editable card in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub(crate) id: CardId,
    pub title: Label,
    pub body: String,
    pub background: SerializableColor,
}

impl Card {
    /// Create a new card.
    pub fn new(title: Label, body: impl Into<String>, background: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            body: body.into(),
            background,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }
}

/// An independently positioned, resizable box layered over the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingBox {
    pub(crate) id: FloatId,
    /// Creation counter value. Informational only, never used for lookup.
    pub tag: u32,
    pub frame: Frame,
    pub label: Label,
    pub background: SerializableColor,
}

impl FloatingBox {
    /// Create a new floating box.
    pub fn new(tag: u32, frame: Frame, label: Label, background: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            tag,
            frame,
            label,
            background,
        }
    }

    pub fn id(&self) -> FloatId {
        self.id
    }
}

/// The whole builder page: container, card grid and floating layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Geometry of the container, if the page has one.
    pub container: Option<Frame>,
    /// Cards in grid order.
    pub cards: Vec<Card>,
    /// Floating boxes in creation order.
    pub floats: Vec<FloatingBox>,
    /// Last floating box tag handed out.
    pub(crate) float_counter: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Create an empty page without a container.
    pub fn new() -> Self {
        Self {
            container: None,
            cards: Vec::new(),
            floats: Vec::new(),
            float_counter: 0,
        }
    }

    /// Create an empty page with a container frame.
    pub fn with_container(frame: Frame) -> Self {
        Self {
            container: Some(frame),
            ..Self::new()
        }
    }

    /// Last floating box tag handed out (0 before the first box).
    pub fn float_counter(&self) -> u32 {
        self.float_counter
    }

    // --- Cards ---

    /// Append a card built from the configured defaults.
    pub fn add_card(&mut self, config: &BuilderConfig) -> CardId {
        let card = Card::new(
            Label::new(&config.card_glyph, &config.card_title),
            &config.card_body,
            config.background,
        );
        self.push_card(card)
    }

    /// Append an existing card.
    pub fn push_card(&mut self, card: Card) -> CardId {
        let id = card.id;
        self.cards.push(card);
        id
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    /// Index of a card in grid order.
    pub fn card_index(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Card ids in grid order.
    pub fn card_order(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    /// Remove a card. Other cards keep their order.
    pub fn delete_card(&mut self, id: CardId) -> Option<Card> {
        let index = self.card_index(id)?;
        Some(self.cards.remove(index))
    }

    /// Move a card immediately before `before`, or to the end when `before`
    /// is `None`. Returns false if either card is unknown.
    pub fn move_card(&mut self, id: CardId, before: Option<CardId>) -> bool {
        if before == Some(id) {
            return self.card_index(id).is_some();
        }
        if let Some(before) = before {
            if self.card_index(before).is_none() {
                return false;
            }
        }
        let Some(card) = self.delete_card(id) else {
            return false;
        };
        let index = before
            .and_then(|b| self.card_index(b))
            .unwrap_or(self.cards.len());
        self.cards.insert(index, card);
        true
    }

    /// Set a card's background from a color input value.
    pub fn set_card_background(&mut self, id: CardId, value: &str) -> bool {
        let Some(card) = self.card_mut(id) else {
            return false;
        };
        match SerializableColor::parse_hex(value) {
            Ok(color) => {
                card.background = color;
                true
            }
            Err(e) => {
                log::warn!("Ignoring card color: {}", e);
                false
            }
        }
    }

    /// Replace a card's title glyph from an icon input value.
    pub fn set_card_icon(&mut self, id: CardId, input: &str, config: &BuilderConfig) -> bool {
        self.card_mut(id)
            .is_some_and(|card| card.title.set_glyph(input, config.max_icon_chars))
    }

    /// Record an edit of a card's title text.
    pub fn set_card_title(&mut self, id: CardId, text: &str) -> bool {
        self.card_mut(id)
            .map(|card| card.title.text = text.to_string())
            .is_some()
    }

    /// Record an edit of a card's body text.
    pub fn set_card_body(&mut self, id: CardId, text: &str) -> bool {
        self.card_mut(id)
            .map(|card| card.body = text.to_string())
            .is_some()
    }

    // --- Floating boxes ---

    /// Add a floating box, cascading diagonally from the previous one.
    ///
    /// The counter only grows, so deleting boxes never frees a position.
    pub fn add_floating_box(&mut self, config: &BuilderConfig) -> FloatId {
        self.float_counter += 1;
        let offset = config.float_origin + f64::from(self.float_counter) * config.float_step;
        let frame = Frame::from_origin_size(Point::new(offset, offset), config.float_size);
        let float = FloatingBox::new(
            self.float_counter,
            frame,
            Label::new(&config.float_glyph, &config.float_text),
            config.background,
        );
        let id = float.id;
        self.floats.push(float);
        id
    }

    pub fn floating_box(&self, id: FloatId) -> Option<&FloatingBox> {
        self.floats.iter().find(|f| f.id == id)
    }

    pub fn floating_box_mut(&mut self, id: FloatId) -> Option<&mut FloatingBox> {
        self.floats.iter_mut().find(|f| f.id == id)
    }

    /// Remove a floating box.
    pub fn delete_floating_box(&mut self, id: FloatId) -> Option<FloatingBox> {
        let index = self.floats.iter().position(|f| f.id == id)?;
        Some(self.floats.remove(index))
    }

    /// Set a floating box's background from a color input value.
    pub fn set_float_background(&mut self, id: FloatId, value: &str) -> bool {
        let Some(float) = self.floating_box_mut(id) else {
            return false;
        };
        match SerializableColor::parse_hex(value) {
            Ok(color) => {
                float.background = color;
                true
            }
            Err(e) => {
                log::warn!("Ignoring floating box color: {}", e);
                false
            }
        }
    }

    /// Replace a floating box's glyph from an icon input value.
    pub fn set_float_icon(&mut self, id: FloatId, input: &str, config: &BuilderConfig) -> bool {
        self.floating_box_mut(id)
            .is_some_and(|float| float.label.set_glyph(input, config.max_icon_chars))
    }

    /// Record an edit of a floating box's text.
    pub fn set_float_text(&mut self, id: FloatId, text: &str) -> bool {
        self.floating_box_mut(id)
            .map(|float| float.label.text = text.to_string())
            .is_some()
    }
}
