//! DOM construction for cards and floating boxes.

use crate::markup::{DELETE_LABEL, FLOAT_TAG_ATTR, UNIT_ID_ATTR, classes, frame_styles};
use pagebox_core::{Card, FloatingBox, Frame, SerializableColor};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

/// Max length attribute of icon inputs.
const ICON_INPUT_MAX_LENGTH: i32 = 2;

const CARD_ICON_PLACEHOLDER: &str = "🌿";
const FLOAT_ICON_PLACEHOLDER: &str = "✨";

fn div(document: &Document, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    el.set_class_name(class);
    Ok(el)
}

fn span(document: &Document, class: &str, text: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element("span")?.dyn_into::<HtmlElement>()?;
    el.set_class_name(class);
    el.set_text_content(Some(text));
    Ok(el)
}

fn editable(document: &Document, class: &str, text: &str) -> Result<HtmlElement, JsValue> {
    let el = div(document, class)?;
    el.set_content_editable("true");
    el.set_text_content(Some(text));
    Ok(el)
}

fn color_input(
    document: &Document,
    color: SerializableColor,
) -> Result<HtmlInputElement, JsValue> {
    let input = document.create_element("input")?.dyn_into::<HtmlInputElement>()?;
    input.set_type("color");
    input.set_value(&color.to_hex());
    Ok(input)
}

fn icon_input(
    document: &Document,
    class: &str,
    placeholder: &str,
) -> Result<HtmlInputElement, JsValue> {
    let input = document.create_element("input")?.dyn_into::<HtmlInputElement>()?;
    input.set_class_name(class);
    input.set_max_length(ICON_INPUT_MAX_LENGTH);
    input.set_placeholder(placeholder);
    Ok(input)
}

fn delete_button(document: &Document, class: &str) -> Result<HtmlElement, JsValue> {
    let button = document.create_element("button")?.dyn_into::<HtmlElement>()?;
    button.set_class_name(class);
    button.set_text_content(Some(DELETE_LABEL));
    Ok(button)
}

/// Build the element for a card.
pub fn build_card(document: &Document, card: &Card) -> Result<HtmlElement, JsValue> {
    let root = div(document, classes::CARD)?;
    root.set_draggable(true);
    root.set_attribute(UNIT_ID_ATTR, &card.id().to_string())?;
    set_background(&root, card.background)?;

    let header = div(document, classes::CARD_HEADER)?;
    let glyph = card.title.glyph.as_deref().unwrap_or_default();
    header.append_child(&span(document, classes::CARD_ICON, glyph)?)?;
    header.append_child(&editable(document, classes::CARD_TITLE, &card.title.text)?)?;

    let controls = div(document, classes::CARD_CONTROLS)?;
    controls.append_child(&color_input(document, card.background)?)?;
    let icon = icon_input(document, classes::CARD_ICON_INPUT, CARD_ICON_PLACEHOLDER)?;
    controls.append_child(&icon)?;
    controls.append_child(&delete_button(document, classes::CARD_DELETE)?)?;
    header.append_child(&controls)?;

    root.append_child(&header)?;
    root.append_child(&editable(document, classes::CARD_BODY, &card.body)?)?;
    Ok(root)
}

/// Build the element for a floating box.
pub fn build_float(document: &Document, float: &FloatingBox) -> Result<HtmlElement, JsValue> {
    let root = div(document, classes::FLOAT)?;
    root.set_attribute(UNIT_ID_ATTR, &float.id().to_string())?;
    root.set_attribute(FLOAT_TAG_ATTR, &float.tag.to_string())?;
    apply_frame(&root, &float.frame)?;
    set_background(&root, float.background)?;

    let controls = div(document, classes::FLOAT_CONTROLS)?;
    controls.append_child(&color_input(document, float.background)?)?;
    let icon = icon_input(document, classes::FLOAT_ICON_INPUT, FLOAT_ICON_PLACEHOLDER)?;
    controls.append_child(&icon)?;
    controls.append_child(&delete_button(document, classes::FLOAT_DELETE)?)?;
    root.append_child(&controls)?;

    let glyph = float.label.glyph.as_deref().unwrap_or_default();
    root.append_child(&span(document, classes::FLOAT_ICON, glyph)?)?;
    root.append_child(&editable(document, classes::FLOAT_TEXT, &float.label.text)?)?;
    root.append_child(&div(document, classes::FLOAT_RESIZE)?)?;
    Ok(root)
}

/// Write style properties into an element's inline style.
pub fn apply_styles(el: &HtmlElement, styles: &[(&str, String)]) -> Result<(), JsValue> {
    let style = el.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

/// Write a whole frame into an element's inline style.
pub fn apply_frame(el: &HtmlElement, frame: &Frame) -> Result<(), JsValue> {
    apply_styles(el, &frame_styles(frame))
}

pub fn set_background(el: &HtmlElement, color: SerializableColor) -> Result<(), JsValue> {
    el.style().set_property("background", &color.to_hex())
}

/// Replace the text of the first descendant matching `class`.
pub fn set_child_text(root: &Element, class: &str, text: &str) -> Result<(), JsValue> {
    if let Some(child) = root.query_selector(&format!(".{}", class))? {
        child.set_text_content(Some(text));
    }
    Ok(())
}
