use bingo_core::{GestureEffect, TileId};
use gloo::console::warn;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DataTransfer, Element, HtmlElement};

pub(crate) const PAYLOAD_FORMAT: &str = "id";
const DRAGGING_CLASS: &str = "dragging";
const FLOATING_CLASS: &str = "bingo-piece-floating";
const HIGHLIGHT_OPACITY: &str = "0.5";
const HIGHLIGHT_BACKGROUND: &str = "hsla(250, 80%, 90%, 0.8)";

/// Browser objects that only the triggering event can provide.
#[derive(Default)]
pub(crate) struct EffectContext {
    pub(crate) data_transfer: Option<DataTransfer>,
    pub(crate) pointer_element: Option<Element>,
}

impl EffectContext {
    pub(crate) fn drag(data_transfer: Option<DataTransfer>) -> Self {
        Self {
            data_transfer,
            pointer_element: None,
        }
    }

    pub(crate) fn pointer(element: Element) -> Self {
        Self {
            data_transfer: None,
            pointer_element: Some(element),
        }
    }
}

/// DOM state that outlives a single event: the element holding pointer
/// capture, the floating clone, and the listeners tracking the pointer.
#[derive(Default)]
pub(crate) struct DomSession {
    captured: Option<Element>,
    clone: Option<HtmlElement>,
    listeners: Vec<EventListener>,
}

impl DomSession {
    pub(crate) fn track(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub(crate) fn apply(&mut self, root: &Element, effects: &[GestureEffect], context: &EffectContext) {
        for effect in effects {
            self.apply_one(root, effect, context);
        }
    }

    fn apply_one(&mut self, root: &Element, effect: &GestureEffect, context: &EffectContext) {
        match effect {
            GestureEffect::SetPayload { value } => {
                let Some(data_transfer) = context.data_transfer.as_ref() else {
                    warn!("drag start without a data transfer");
                    return;
                };
                if data_transfer.set_data(PAYLOAD_FORMAT, value).is_err() {
                    warn!("failed to set drag payload");
                }
                data_transfer.set_effect_allowed("copyMove");
                data_transfer.set_drop_effect("move");
            }
            GestureEffect::MarkDragging { tile } => {
                if let Some(cell) = cell_for_tile(root, tile) {
                    let _ = cell.class_list().add_1(DRAGGING_CLASS);
                }
            }
            GestureEffect::ClearDragging { tile } => {
                if let Some(cell) = cell_for_tile(root, tile) {
                    let _ = cell.class_list().remove_1(DRAGGING_CLASS);
                }
            }
            GestureEffect::Highlight { tile } => {
                if let Some(cell) = html_cell_for_tile(root, tile) {
                    let style = cell.style();
                    let _ = style.set_property("opacity", HIGHLIGHT_OPACITY);
                    let _ = style.set_property("background-color", HIGHLIGHT_BACKGROUND);
                }
            }
            GestureEffect::ClearHighlight { tile } => {
                if let Some(cell) = html_cell_for_tile(root, tile) {
                    let style = cell.style();
                    let _ = style.remove_property("opacity");
                    let _ = style.remove_property("background-color");
                }
            }
            GestureEffect::CapturePointer { pointer_id } => {
                let Some(element) = context.pointer_element.as_ref() else {
                    return;
                };
                if element.set_pointer_capture(*pointer_id).is_err() {
                    warn!(format!("pointer capture refused for {pointer_id}"));
                }
                self.captured = Some(element.clone());
            }
            GestureEffect::ReleasePointer { pointer_id } => {
                if let Some(element) = self.captured.take() {
                    let _ = element.release_pointer_capture(*pointer_id);
                }
                self.detach_listeners();
            }
            // touch-action is rendered on the cell; the browser reads it
            // before pointerdown fires.
            GestureEffect::SuppressInteraction { tile } => {
                if let Some(cell) = html_cell_for_tile(root, tile) {
                    let _ = cell.style().set_property("user-select", "none");
                }
            }
            GestureEffect::RestoreInteraction { tile } => {
                if let Some(cell) = html_cell_for_tile(root, tile) {
                    let _ = cell.style().remove_property("user-select");
                }
            }
            GestureEffect::SpawnClone {
                tile,
                width,
                height,
                x,
                y,
            } => {
                self.remove_clone();
                let Some(cell) = cell_for_tile(root, tile) else {
                    return;
                };
                match spawn_clone(&cell, *width, *height, *x, *y) {
                    Some(clone) => self.clone = Some(clone),
                    None => warn!("failed to spawn the floating cell"),
                }
            }
            GestureEffect::MoveClone { x, y } => {
                if let Some(clone) = self.clone.as_ref() {
                    let _ = clone.style().set_property("transform", &translate(*x, *y));
                }
            }
            GestureEffect::RemoveClone => self.remove_clone(),
            // Board changes are applied by the surface and re-rendered.
            GestureEffect::Swap { .. } => {}
        }
    }

    /// Drops everything a half-finished pointer drag left behind.
    pub(crate) fn shutdown(&mut self) {
        self.captured = None;
        self.remove_clone();
        self.detach_listeners();
    }

    fn remove_clone(&mut self) {
        if let Some(clone) = self.clone.take() {
            clone.remove();
        }
    }

    /// A listener may be the one currently running, so the drop is deferred
    /// until the event has finished dispatching.
    fn detach_listeners(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let listeners = std::mem::take(&mut self.listeners);
        spawn_local(async move {
            drop(listeners);
        });
    }
}

fn cell_for_tile(root: &Element, tile: &TileId) -> Option<Element> {
    let selector = format!("[data-tile=\"{}\"]", tile.as_str());
    root.query_selector(&selector).ok().flatten()
}

fn html_cell_for_tile(root: &Element, tile: &TileId) -> Option<HtmlElement> {
    cell_for_tile(root, tile)?.dyn_into::<HtmlElement>().ok()
}

fn translate(x: f32, y: f32) -> String {
    format!("translate({x}px, {y}px)")
}

fn spawn_clone(cell: &Element, width: f32, height: f32, x: f32, y: f32) -> Option<HtmlElement> {
    let node = cell.clone_node_with_deep(true).ok()?;
    let clone = node.dyn_into::<HtmlElement>().ok()?;
    // The copy must never resolve as a cell of its own.
    let _ = clone.remove_attribute("data-coord");
    let _ = clone.remove_attribute("data-tile");
    let _ = clone.remove_attribute("draggable");
    let _ = clone.class_list().add_1(FLOATING_CLASS);
    let style = clone.style();
    for (name, value) in [
        ("position", "fixed".to_string()),
        ("left", "0px".to_string()),
        ("top", "0px".to_string()),
        ("margin", "0px".to_string()),
        ("width", format!("{width}px")),
        ("height", format!("{height}px")),
        ("transform", translate(x, y)),
        ("pointer-events", "none".to_string()),
        ("z-index", "1000".to_string()),
        ("opacity", "0.9".to_string()),
    ] {
        let _ = style.set_property(name, &value);
    }
    let body = web_sys::window()?.document()?.body()?;
    body.append_child(&clone).ok()?;
    Some(clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn board_with_cell(tile: &str) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("section").unwrap();
        let cell = document.create_element("div").unwrap();
        cell.set_attribute("data-coord", "0,0").unwrap();
        cell.set_attribute("data-tile", tile).unwrap();
        root.append_child(&cell).unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn style_of(root: &Element, tile: &TileId, name: &str) -> String {
        html_cell_for_tile(root, tile)
            .unwrap()
            .style()
            .get_property_value(name)
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn highlight_and_dragging_marks_come_and_go() {
        let tile = TileId::new("tile_a");
        let root = board_with_cell(tile.as_str());
        let mut session = DomSession::default();
        let context = EffectContext::default();

        session.apply(
            &root,
            &[
                GestureEffect::MarkDragging { tile: tile.clone() },
                GestureEffect::Highlight { tile: tile.clone() },
            ],
            &context,
        );
        let cell = cell_for_tile(&root, &tile).unwrap();
        assert!(cell.class_list().contains(DRAGGING_CLASS));
        assert_eq!(style_of(&root, &tile, "opacity"), HIGHLIGHT_OPACITY);

        session.apply(
            &root,
            &[
                GestureEffect::ClearDragging { tile: tile.clone() },
                GestureEffect::ClearHighlight { tile: tile.clone() },
            ],
            &context,
        );
        assert!(!cell.class_list().contains(DRAGGING_CLASS));
        assert_eq!(style_of(&root, &tile, "opacity"), "");
        root.remove();
    }

    #[wasm_bindgen_test]
    fn restoring_interaction_keeps_rendered_touch_action() {
        let tile = TileId::new("tile_c");
        let root = board_with_cell(tile.as_str());
        let cell = html_cell_for_tile(&root, &tile).unwrap();
        cell.style().set_property("touch-action", "none").unwrap();
        let mut session = DomSession::default();
        let context = EffectContext::default();

        session.apply(
            &root,
            &[GestureEffect::SuppressInteraction { tile: tile.clone() }],
            &context,
        );
        assert_eq!(style_of(&root, &tile, "user-select"), "none");

        session.apply(
            &root,
            &[GestureEffect::RestoreInteraction { tile: tile.clone() }],
            &context,
        );
        assert_eq!(style_of(&root, &tile, "user-select"), "");
        assert_eq!(style_of(&root, &tile, "touch-action"), "none");
        root.remove();
    }

    #[wasm_bindgen_test]
    fn floating_clone_follows_and_disappears() {
        let tile = TileId::new("tile_b");
        let root = board_with_cell(tile.as_str());
        let mut session = DomSession::default();
        let context = EffectContext::default();
        let document = web_sys::window().unwrap().document().unwrap();

        session.apply(
            &root,
            &[GestureEffect::SpawnClone {
                tile: tile.clone(),
                width: 80.0,
                height: 60.0,
                x: 10.0,
                y: 20.0,
            }],
            &context,
        );
        let floating = document
            .query_selector(&format!(".{FLOATING_CLASS}"))
            .unwrap()
            .unwrap();
        assert!(!floating.has_attribute("data-coord"));

        session.apply(&root, &[GestureEffect::MoveClone { x: 30.0, y: 40.0 }], &context);
        let transform = floating
            .dyn_ref::<HtmlElement>()
            .unwrap()
            .style()
            .get_property_value("transform")
            .unwrap();
        assert_eq!(transform, "translate(30px, 40px)");

        session.apply(&root, &[GestureEffect::RemoveClone], &context);
        assert!(document
            .query_selector(&format!(".{FLOATING_CLASS}"))
            .unwrap()
            .is_none());
        root.remove();
    }
}
