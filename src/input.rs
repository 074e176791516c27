use bingo_core::{CellRect, PointerPress};
use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, EventTarget, HtmlInputElement, Node, PointerEvent};

/// Attribute carrying the `"row,col"` reference of a cell element.
pub(crate) const CELL_ATTR: &str = "data-coord";
pub(crate) const CELL_SELECTOR: &str = "[data-coord]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
    Pen,
    Unknown,
}

impl PointerKind {
    pub(crate) fn from_pointer_type(value: &str) -> Self {
        match value {
            "mouse" => PointerKind::Mouse,
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Unknown,
        }
    }
}

/// Mouse presses only start a drag with the main button; touch and pen
/// contacts always do.
pub(crate) fn is_primary_press(event: &PointerEvent) -> bool {
    if !event.is_primary() {
        return false;
    }
    match PointerKind::from_pointer_type(&event.pointer_type()) {
        PointerKind::Mouse => event.button() == 0,
        _ => true,
    }
}

pub(crate) fn prefers_coarse_pointer() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(match_media) = Reflect::get(&window, &"matchMedia".into()) else {
        return false;
    };
    let Ok(match_media) = match_media.dyn_into::<Function>() else {
        return false;
    };
    let Ok(query) = match_media.call1(&window, &"(pointer: coarse)".into()) else {
        return false;
    };
    Reflect::get(&query, &"matches".into())
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

/// Walks up from an event target to the nearest enclosing cell element.
pub(crate) fn enclosing_cell(target: Option<EventTarget>) -> Option<Element> {
    let element = target?.dyn_into::<Element>().ok()?;
    element.closest(CELL_SELECTOR).ok().flatten()
}

pub(crate) fn cell_ref(element: &Element) -> Option<String> {
    element.get_attribute(CELL_ATTR)
}

pub(crate) fn event_cell_ref(event: &Event) -> Option<String> {
    enclosing_cell(event.target()).and_then(|cell| cell_ref(&cell))
}

/// The cell a `dragleave` actually leaves. Moving between children of the
/// same cell fires leave events too; those report no cell.
pub(crate) fn left_cell_ref(event: &DragEvent) -> Option<String> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    let cell_ref = cell_ref(&element)?;
    let related = event
        .related_target()
        .and_then(|target| target.dyn_into::<Node>().ok());
    if let Some(related) = related {
        if element.contains(Some(&related)) {
            return None;
        }
    }
    Some(cell_ref)
}

/// Hit-tests the viewport point for a cell. The floating clone never shows
/// up here because it does not take pointer events.
pub(crate) fn cell_ref_at(x: f32, y: f32) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.element_from_point(x, y)?;
    let cell = element.closest(CELL_SELECTOR).ok().flatten()?;
    cell_ref(&cell)
}

pub(crate) fn is_text_field(target: Option<EventTarget>) -> bool {
    target
        .map(|target| target.has_type::<HtmlInputElement>())
        .unwrap_or(false)
}

pub(crate) fn pointer_position(event: &PointerEvent) -> (f32, f32) {
    (event.client_x() as f32, event.client_y() as f32)
}

pub(crate) fn pointer_press(event: &PointerEvent, cell: &Element) -> PointerPress {
    let rect = cell.get_bounding_client_rect();
    let (x, y) = pointer_position(event);
    PointerPress {
        pointer_id: event.pointer_id(),
        x,
        y,
        rect: CellRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn pointer_types_map_to_kinds() {
        assert_eq!(PointerKind::from_pointer_type("mouse"), PointerKind::Mouse);
        assert_eq!(PointerKind::from_pointer_type("touch"), PointerKind::Touch);
        assert_eq!(PointerKind::from_pointer_type("pen"), PointerKind::Pen);
        assert_eq!(PointerKind::from_pointer_type(""), PointerKind::Unknown);
    }

    #[wasm_bindgen_test]
    fn nested_targets_resolve_to_their_cell() {
        let document = web_sys::window().unwrap().document().unwrap();
        let cell = document.create_element("div").unwrap();
        cell.set_attribute(CELL_ATTR, "3,4").unwrap();
        let label = document.create_element("p").unwrap();
        let sub = document.create_element("sub").unwrap();
        label.append_child(&sub).unwrap();
        cell.append_child(&label).unwrap();

        let target: EventTarget = sub.into();
        let resolved = enclosing_cell(Some(target)).unwrap();
        assert_eq!(cell_ref(&resolved).as_deref(), Some("3,4"));

        let stray: EventTarget = document.create_element("span").unwrap().into();
        assert!(enclosing_cell(Some(stray)).is_none());
    }
}
