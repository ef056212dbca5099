//! WebAssembly entry point and DOM event wiring.

use crate::builder::{Builder, Outcome, PointerTarget, UiAction};
use crate::elements::{
    apply_frame, apply_styles, build_card, build_float, set_background, set_child_text,
};
use crate::markup::{SAVED_MESSAGE, UNIT_ID_ATTR, classes, gesture_styles, ids, parse_px};
use kurbo::Point;
use pagebox_core::storage::LocalStorage;
use pagebox_core::{
    BuilderConfig, Card, CardId, CardSlot, FloatId, Frame, GestureTarget, Label, Page, PageStore,
};
use std::cell::RefCell;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, DragEvent, Element, Event, HtmlElement, HtmlInputElement, MouseEvent, Window,
};

/// Card and floating box ids share one type.
type UnitId = CardId;

/// Browser-side state: the builder plus the elements it renders into.
struct Shell {
    builder: Builder<LocalStorage>,
    document: Document,
    container: Option<HtmlElement>,
    grid: Option<HtmlElement>,
    floating_area: Option<HtmlElement>,
}

thread_local! {
    static SHELL: RefCell<Option<Shell>> = const { RefCell::new(None) };
}

/// Run `f` against the shell, if it has been started.
fn with_shell<R>(f: impl FnOnce(&mut Shell) -> R) -> Option<R> {
    SHELL.with(|slot| slot.borrow_mut().as_mut().map(f))
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn page_point(e: &MouseEvent) -> Point {
    Point::new(f64::from(e.page_x()), f64::from(e.page_y()))
}

fn event_element(e: &Event) -> Option<Element> {
    e.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Id of the closest unit of `class` around `el`.
fn unit_id(el: &Element, class: &str) -> Option<(Element, UnitId)> {
    let unit = el.closest(&format!(".{}", class)).ok()??;
    let id = UnitId::parse_str(&unit.get_attribute(UNIT_ID_ATTR)?).ok()?;
    Some((unit, id))
}

fn log_err(context: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("{}: {:?}", context, e);
    }
}

impl Shell {
    fn unit_element(
        &self,
        parent: &Option<HtmlElement>,
        class: &str,
        id: UnitId,
    ) -> Option<HtmlElement> {
        let selector = format!(".{}[{}=\"{}\"]", class, UNIT_ID_ATTR, id);
        parent
            .as_ref()?
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn card_element(&self, id: CardId) -> Option<HtmlElement> {
        self.unit_element(&self.grid, classes::CARD, id)
    }

    fn float_element(&self, id: FloatId) -> Option<HtmlElement> {
        self.unit_element(&self.floating_area, classes::FLOAT, id)
    }

    fn target_element(&self, target: GestureTarget) -> Option<HtmlElement> {
        match target {
            GestureTarget::Container => self.container.clone(),
            GestureTarget::Floating(id) => self.float_element(id),
        }
    }

    /// Reflect an action's outcome in the DOM.
    fn apply(&self, outcome: Outcome) -> Result<(), JsValue> {
        let page = self.builder.page();
        match outcome {
            Outcome::Unchanged => {}
            Outcome::CardAdded(id) => {
                if let (Some(grid), Some(card)) = (&self.grid, page.card(id)) {
                    grid.append_child(&build_card(&self.document, card)?)?;
                }
            }
            Outcome::CardChanged(id) => {
                if let (Some(el), Some(card)) = (self.card_element(id), page.card(id)) {
                    set_background(&el, card.background)?;
                    let glyph = card.title.glyph.as_deref().unwrap_or_default();
                    set_child_text(&el, classes::CARD_ICON, glyph)?;
                }
            }
            Outcome::CardRemoved(id) => {
                if let Some(el) = self.card_element(id) {
                    el.remove();
                }
            }
            Outcome::FloatAdded(id) => {
                if let (Some(area), Some(float)) = (&self.floating_area, page.floating_box(id)) {
                    area.append_child(&build_float(&self.document, float)?)?;
                }
            }
            Outcome::FloatChanged(id) => {
                if let (Some(el), Some(float)) = (self.float_element(id), page.floating_box(id)) {
                    set_background(&el, float.background)?;
                    let glyph = float.label.glyph.as_deref().unwrap_or_default();
                    set_child_text(&el, classes::FLOAT_ICON, glyph)?;
                }
            }
            Outcome::FloatRemoved(id) => {
                if let Some(el) = self.float_element(id) {
                    el.remove();
                }
            }
            Outcome::Saved => {
                if let Some(window) = web_sys::window() {
                    window.alert_with_message(SAVED_MESSAGE)?;
                }
            }
            Outcome::Reload => {
                if let Some(window) = web_sys::window() {
                    window.location().reload()?;
                }
            }
            Outcome::Rebuild => self.render_all()?,
            Outcome::Failed(message) => log::error!("{}", message),
        }
        Ok(())
    }

    /// Re-create every unit from the model.
    fn render_all(&self) -> Result<(), JsValue> {
        let page = self.builder.page();
        if let (Some(container), Some(frame)) = (&self.container, page.container) {
            apply_frame(container, &frame)?;
        }
        if let Some(grid) = &self.grid {
            clear_units(grid, classes::CARD)?;
            for card in &page.cards {
                grid.append_child(&build_card(&self.document, card)?)?;
            }
        }
        if let Some(area) = &self.floating_area {
            clear_units(area, classes::FLOAT)?;
            for float in &page.floats {
                area.append_child(&build_float(&self.document, float)?)?;
            }
        }
        Ok(())
    }

    /// Live vertical extents of the grid's cards, in document order.
    fn card_slots(&self) -> Vec<CardSlot> {
        let Some(grid) = &self.grid else {
            return Vec::new();
        };
        let children = grid.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .filter(|el| has_class(el, classes::CARD))
            .filter_map(|el| {
                let id = CardId::parse_str(&el.get_attribute(UNIT_ID_ATTR)?).ok()?;
                let rect = el.get_bounding_client_rect();
                Some(CardSlot::new(id, rect.top(), rect.height()))
            })
            .collect()
    }
}

fn clear_units(parent: &HtmlElement, class: &str) -> Result<(), JsValue> {
    let units = parent.query_selector_all(&format!(".{}", class))?;
    for i in 0..units.length() {
        if let Some(node) = units.item(i) {
            if let Some(el) = node.dyn_ref::<Element>() {
                el.remove();
            }
        }
    }
    Ok(())
}

/// Read the container's position and its CSS width and height.
///
/// The size comes from the computed style, not `offset_*`, so writing it
/// back as inline `width`/`height` leaves the rendered box unchanged.
fn container_frame(window: &Window, container: &HtmlElement) -> Result<Frame, JsValue> {
    let computed = window.get_computed_style(container)?;
    let css_length = |property: &str, fallback: i32| -> Result<f64, JsValue> {
        let value = match &computed {
            Some(style) => style.get_property_value(property)?,
            None => String::new(),
        };
        Ok(parse_px(&value).unwrap_or_else(|| f64::from(fallback)))
    };
    Ok(Frame::new(
        Point::new(
            f64::from(container.offset_left()),
            f64::from(container.offset_top()),
        ),
        css_length("width", container.client_width())?,
        css_length("height", container.client_height())?,
    ))
}

/// Take over cards present in the static markup.
///
/// Their title's leading token becomes the glyph; each is rebuilt so it
/// carries an id and the generated control layout.
fn adopt_static_cards(shell: &mut Shell) -> Result<(), JsValue> {
    let Some(grid) = shell.grid.clone() else {
        return Ok(());
    };
    let background = shell.builder.config().background;
    let existing = grid.query_selector_all(&format!(".{}", classes::CARD))?;
    for i in 0..existing.length() {
        let Some(el) = existing.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let text_of = |class: &str| -> Result<String, JsValue> {
            Ok(el
                .query_selector(&format!(".{}", class))?
                .and_then(|c| c.text_content())
                .unwrap_or_default())
        };
        let title = Label::from_display(text_of(classes::CARD_TITLE)?.trim());
        let card = Card::new(title, text_of(classes::CARD_BODY)?.trim(), background);
        let replacement = build_card(&shell.document, &card)?;
        el.replace_with_with_node_1(&replacement)?;
        shell.builder.page_mut().push_card(card);
    }
    Ok(())
}

fn add_listener<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(E)>::wrap(Box::new(handler));
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Container drag on the header, resize on the corner handle.
fn wire_container(header: &HtmlElement, handle: &HtmlElement) -> Result<(), JsValue> {
    add_listener(header, "mousedown", |e: MouseEvent| {
        let handle_selector = format!("#{}", ids::RESIZE_HANDLE);
        let on_handle = event_element(&e)
            .is_some_and(|el| el.closest(&handle_selector).ok().flatten().is_some());
        if !on_handle {
            with_shell(|shell| {
                shell
                    .builder
                    .pointer_down(PointerTarget::ContainerHeader, page_point(&e))
            });
        }
    })?;
    add_listener(handle, "mousedown", |e: MouseEvent| {
        e.stop_propagation();
        with_shell(|shell| {
            shell
                .builder
                .pointer_down(PointerTarget::ContainerHandle, page_point(&e))
        });
    })
}

/// Document-wide move and release feed the single gesture session.
fn wire_document(document: &Document) -> Result<(), JsValue> {
    add_listener(document, "mousemove", |e: MouseEvent| {
        with_shell(|shell| {
            if let Some(update) = shell.builder.pointer_move(page_point(&e)) {
                if let Some(el) = shell.target_element(update.target) {
                    log_err("Applying gesture", apply_styles(&el, &gesture_styles(&update)));
                }
            }
        });
    })?;
    add_listener(document, "mouseup", |_e: MouseEvent| {
        with_shell(|shell| shell.builder.pointer_up());
    })
}

/// Card controls, edits and drag-and-drop, delegated on the grid so cards
/// added later take part without extra wiring.
fn wire_grid(grid: &HtmlElement) -> Result<(), JsValue> {
    add_listener(grid, "click", |e: MouseEvent| {
        let Some(el) = event_element(&e) else { return };
        if !has_class(&el, classes::CARD_DELETE) {
            return;
        }
        if let Some((_, id)) = unit_id(&el, classes::CARD) {
            dispatch(UiAction::DeleteCard(id));
        }
    })?;
    add_listener(grid, "input", |e: Event| {
        let Some(el) = event_element(&e) else { return };
        let Some((_, id)) = unit_id(&el, classes::CARD) else { return };
        let text = el.text_content().unwrap_or_default();
        let action = if has_class(&el, classes::CARD_ICON_INPUT) {
            let Some(input) = el.dyn_ref::<HtmlInputElement>() else { return };
            UiAction::CardIcon(id, input.value())
        } else if has_class(&el, classes::CARD_TITLE) {
            UiAction::CardTitle(id, text)
        } else if has_class(&el, classes::CARD_BODY) {
            UiAction::CardBody(id, text)
        } else {
            return;
        };
        dispatch(action);
    })?;
    add_listener(grid, "change", |e: Event| {
        let Some(el) = event_element(&e) else { return };
        let Some(input) = el.dyn_ref::<HtmlInputElement>() else { return };
        if input.type_() != "color" {
            return;
        }
        if let Some((_, id)) = unit_id(&el, classes::CARD) {
            dispatch(UiAction::CardColor(id, input.value()));
        }
    })?;
    add_listener(grid, "dragstart", |e: DragEvent| {
        let Some(el) = event_element(&e) else { return };
        if let Some((unit, id)) = unit_id(&el, classes::CARD) {
            log_err("Marking card", unit.class_list().add_1(classes::DRAGGING));
            with_shell(|shell| shell.builder.card_drag_start(id));
        }
    })?;
    add_listener(grid, "dragend", |e: DragEvent| {
        let Some(el) = event_element(&e) else { return };
        if let Some((unit, _)) = unit_id(&el, classes::CARD) {
            log_err("Unmarking card", unit.class_list().remove_1(classes::DRAGGING));
        }
        with_shell(|shell| shell.builder.card_drag_end());
    })?;
    add_listener(grid, "dragover", |e: DragEvent| {
        e.prevent_default();
        with_shell(|shell| {
            let Some(dragging) = shell.builder.dragging_card() else { return };
            let slots = shell.card_slots();
            let Some(moved) = shell
                .builder
                .card_drag_over(f64::from(e.client_y()), &slots)
            else {
                return;
            };
            let (Some(grid), Some(el)) = (&shell.grid, shell.card_element(dragging)) else {
                return;
            };
            let before = moved.before().and_then(|id| shell.card_element(id));
            let before = before.as_ref().map(|b| b.unchecked_ref::<web_sys::Node>());
            if let Err(e) = grid.insert_before(&el, before) {
                log::error!("Moving card: {:?}", e);
            }
        });
    })
}

/// Floating box gestures, controls and edits, delegated on the layer.
fn wire_floating_area(area: &HtmlElement) -> Result<(), JsValue> {
    add_listener(area, "mousedown", |e: MouseEvent| {
        let Some(el) = event_element(&e) else { return };
        let Some((_, id)) = unit_id(&el, classes::FLOAT) else { return };
        let on_handle = has_class(&el, classes::FLOAT_RESIZE);
        with_shell(|shell| {
            shell
                .builder
                .pointer_down(PointerTarget::Float { id, on_handle }, page_point(&e))
        });
    })?;
    add_listener(area, "click", |e: MouseEvent| {
        let Some(el) = event_element(&e) else { return };
        if !has_class(&el, classes::FLOAT_DELETE) {
            return;
        }
        if let Some((_, id)) = unit_id(&el, classes::FLOAT) {
            dispatch(UiAction::DeleteFloat(id));
        }
    })?;
    add_listener(area, "input", |e: Event| {
        let Some(el) = event_element(&e) else { return };
        let Some((_, id)) = unit_id(&el, classes::FLOAT) else { return };
        let action = if has_class(&el, classes::FLOAT_ICON_INPUT) {
            let Some(input) = el.dyn_ref::<HtmlInputElement>() else { return };
            UiAction::FloatIcon(id, input.value())
        } else if has_class(&el, classes::FLOAT_TEXT) {
            UiAction::FloatText(id, el.text_content().unwrap_or_default())
        } else {
            return;
        };
        dispatch(action);
    })?;
    add_listener(area, "change", |e: Event| {
        let Some(el) = event_element(&e) else { return };
        let Some(input) = el.dyn_ref::<HtmlInputElement>() else { return };
        if input.type_() != "color" {
            return;
        }
        if let Some((_, id)) = unit_id(&el, classes::FLOAT) {
            dispatch(UiAction::FloatColor(id, input.value()));
        }
    })
}

/// Apply an action and render its outcome.
fn dispatch(action: UiAction) {
    let handled = with_shell(|shell| {
        let outcome = shell.builder.dispatch(action);
        log_err("Rendering", shell.apply(outcome));
    });
    if handled.is_none() {
        log::warn!("Builder not started");
    }
}

fn start(config: BuilderConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    let container = html_by_id(&document, ids::CONTAINER);
    let header = html_by_id(&document, ids::DRAG_HEADER);
    let handle = html_by_id(&document, ids::RESIZE_HANDLE);
    let grid = html_by_id(&document, ids::CARD_GRID);
    let floating_area = html_by_id(&document, ids::FLOATING_AREA);

    let (container, page) = match (container, &header, &handle) {
        (Some(container), Some(header), Some(handle)) => {
            wire_container(header, handle)?;
            let page = Page::with_container(container_frame(&window, &container)?);
            (Some(container), page)
        }
        _ => {
            log::warn!("Container elements missing, container drag/resize disabled");
            (None, Page::new())
        }
    };

    let store = PageStore::new(Arc::new(LocalStorage::new()), config.storage_key.clone());
    let mut shell = Shell {
        builder: Builder::new(config, page, store),
        document: document.clone(),
        container,
        grid,
        floating_area,
    };
    adopt_static_cards(&mut shell)?;
    let outcome = shell.builder.restore_on_load();
    shell.apply(outcome)?;

    wire_document(&document)?;
    if let Some(grid) = &shell.grid {
        wire_grid(grid)?;
    } else {
        log::warn!("Card grid #{} missing", ids::CARD_GRID);
    }
    if let Some(area) = &shell.floating_area {
        wire_floating_area(area)?;
    } else {
        log::warn!("Floating area #{} missing", ids::FLOATING_AREA);
    }

    SHELL.with(|slot| *slot.borrow_mut() = Some(shell));
    log::info!("PageBox ready");
    Ok(())
}

/// Initialize and run the builder.
#[wasm_bindgen(start)]
pub fn run_wasm() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&format!("Failed to initialize logger: {}", e)))?;

    log::info!("Starting PageBox (WASM)");
    start(BuilderConfig::default())
}

/// Append a new card to the grid.
#[wasm_bindgen(js_name = addInnerBox)]
pub fn add_inner_box() {
    let ready = with_shell(|shell| shell.grid.is_some()).unwrap_or(false);
    if ready {
        dispatch(UiAction::AddCard);
    } else {
        log::warn!("No card grid to add a card to");
    }
}

/// Add a new floating box.
#[wasm_bindgen(js_name = addFloatingBox)]
pub fn add_floating_box() {
    let ready = with_shell(|shell| shell.floating_area.is_some()).unwrap_or(false);
    if ready {
        dispatch(UiAction::AddFloatingBox);
    } else {
        log::warn!("No floating area to add a box to");
    }
}

/// Save the page to local storage.
#[wasm_bindgen(js_name = saveAll)]
pub fn save_all() {
    dispatch(UiAction::SaveAll);
}

/// Discard the saved page and reload.
#[wasm_bindgen(js_name = resetAll)]
pub fn reset_all() {
    dispatch(UiAction::ResetAll);
}

/// Rebuild the page from the saved snapshot.
#[wasm_bindgen(js_name = restoreAll)]
pub fn restore_all() {
    dispatch(UiAction::RestoreAll);
}
