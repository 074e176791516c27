use std::cell::RefCell;
use std::rc::Rc;

use bingo_core::{
    Board, BoardSurface, ClickOutcome, Coordinate, GestureEffect, GestureEvent, InteractionMode,
    SeededContent, SurfaceConfig, Tile, WinChange,
};
use gloo::console::{log, warn};
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement};
use yew::prelude::*;

use crate::app_router::InitConfig;
use crate::dom::{DomSession, EffectContext, PAYLOAD_FORMAT};
use crate::input::{
    cell_ref, cell_ref_at, enclosing_cell, event_cell_ref, is_primary_press, is_text_field,
    left_cell_ref, pointer_position, pointer_press,
};

#[derive(Properties, PartialEq)]
pub(crate) struct AppProps {
    pub(crate) config: InitConfig,
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let config = &props.config;
    let surface_config = SurfaceConfig {
        edit_mode: config.edit_mode,
        interaction: config.interaction,
    };
    let boards = (0..config.boards).map(|index| {
        html! {
            <BingoBoard
                key={index}
                seed={config.board_seed(index)}
                surface_config={surface_config}
            />
        }
    });
    html! {
        <div class="App">
            <section class="boards-container">
                { for boards }
            </section>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct BingoBoardProps {
    seed: u64,
    surface_config: SurfaceConfig,
}

/// Everything an event handler needs to drive one board.
#[derive(Clone)]
struct BoardHandle {
    surface: Rc<RefCell<BoardSurface>>,
    session: Rc<RefCell<DomSession>>,
    root: NodeRef,
    bump_ui_revision: Rc<dyn Fn()>,
}

impl BoardHandle {
    /// Returns whether the event did anything at all.
    fn run_gesture(&self, event: GestureEvent, context: EffectContext) -> bool {
        let dispatch = self.surface.borrow_mut().dispatch(&event);
        self.apply_effects(&dispatch.effects, &context);
        if let Some(change) = dispatch.win {
            log_win(change);
        }
        if dispatch.board_changed {
            (self.bump_ui_revision)();
        }
        dispatch.board_changed || !dispatch.effects.is_empty()
    }

    fn apply_effects(&self, effects: &[GestureEffect], context: &EffectContext) {
        if effects.is_empty() {
            return;
        }
        let Some(root) = self.root.cast::<Element>() else {
            return;
        };
        self.session.borrow_mut().apply(&root, effects, context);
    }
}

fn log_win(change: WinChange) {
    match change {
        WinChange::Won => log!("bingo: line complete"),
        WinChange::Cleared => log!("bingo: line broken"),
    }
}

/// Follows a captured pointer until it is released. The listeners live in
/// the DOM session, which detaches them on release.
fn track_pointer(handle: &BoardHandle, cell: &Element) {
    let options = EventListenerOptions::enable_prevent_default();
    let move_handle = handle.clone();
    let on_move = EventListener::new_with_options(cell, "pointermove", options, move |event: &Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        event.prevent_default();
        let (x, y) = pointer_position(event);
        move_handle.run_gesture(
            GestureEvent::PointerMove {
                pointer_id: event.pointer_id(),
                x,
                y,
                target: cell_ref_at(x, y),
            },
            EffectContext::default(),
        );
    });
    let up_handle = handle.clone();
    let on_up = EventListener::new_with_options(cell, "pointerup", options, move |event: &Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let (x, y) = pointer_position(event);
        log!("pointer up");
        up_handle.run_gesture(
            GestureEvent::PointerUp {
                pointer_id: event.pointer_id(),
                target: cell_ref_at(x, y),
            },
            EffectContext::default(),
        );
    });
    let cancel_handle = handle.clone();
    let on_cancel = EventListener::new(cell, "pointercancel", move |event: &Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        log!("pointer drag cancelled");
        cancel_handle.run_gesture(
            GestureEvent::PointerCancel {
                pointer_id: event.pointer_id(),
            },
            EffectContext::default(),
        );
    });
    let mut session = handle.session.borrow_mut();
    session.track(on_move);
    session.track(on_up);
    session.track(on_cancel);
}

#[function_component(BingoBoard)]
fn bingo_board(props: &BingoBoardProps) -> Html {
    let seed = props.seed;
    let surface_config = props.surface_config;
    let surface = use_mut_ref(move || {
        let board = Board::create(&mut SeededContent::new(seed));
        BoardSurface::new(board, surface_config)
    });
    let session = use_mut_ref(DomSession::default);
    let root = use_node_ref();
    let ui_revision = use_state(|| 0u32);
    let bump_ui_revision: Rc<dyn Fn()> = {
        let ui_revision = ui_revision.clone();
        Rc::new(move || {
            ui_revision.set(ui_revision.wrapping_add(1));
        })
    };
    let handle = BoardHandle {
        surface: surface.clone(),
        session: session.clone(),
        root: root.clone(),
        bump_ui_revision,
    };

    {
        let session = session.clone();
        use_effect_with((), move |_| move || session.borrow_mut().shutdown());
    }

    let ondragstart = {
        let handle = handle.clone();
        Callback::from(move |event: DragEvent| {
            let Some(source) = event_cell_ref(&event) else {
                return;
            };
            log!(format!("drag start {source}"));
            handle.run_gesture(
                GestureEvent::DragStart { source },
                EffectContext::drag(event.data_transfer()),
            );
        })
    };
    let ondragenter = {
        let handle = handle.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            handle.run_gesture(
                GestureEvent::DragEnter {
                    target: event_cell_ref(&event),
                },
                EffectContext::default(),
            );
        })
    };
    let ondragleave = {
        let handle = handle.clone();
        Callback::from(move |event: DragEvent| {
            handle.run_gesture(
                GestureEvent::DragLeave {
                    target: left_cell_ref(&event),
                },
                EffectContext::default(),
            );
        })
    };
    let ondragover = Callback::from(|event: DragEvent| {
        event.prevent_default();
        if let Some(data_transfer) = event.data_transfer() {
            data_transfer.set_drop_effect("move");
        }
    });
    let ondrop = {
        let handle = handle.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            let payload = event
                .data_transfer()
                .and_then(|data_transfer| data_transfer.get_data(PAYLOAD_FORMAT).ok())
                .filter(|value| !value.is_empty());
            let target = event_cell_ref(&event);
            log!(format!("drop {payload:?} on {target:?}"));
            let handled = handle.run_gesture(
                GestureEvent::Drop { payload, target },
                EffectContext::default(),
            );
            if !handled {
                warn!("drop ignored");
            }
        })
    };
    let ondragend = {
        let handle = handle.clone();
        Callback::from(move |_: DragEvent| {
            log!("drag end");
            handle.run_gesture(GestureEvent::DragEnd, EffectContext::default());
        })
    };
    let onpointerdown = {
        let handle = handle.clone();
        Callback::from(move |event: PointerEvent| {
            if handle.surface.borrow().interaction() != InteractionMode::Pointer {
                return;
            }
            if !is_primary_press(&event) || is_text_field(event.target()) {
                return;
            }
            let Some(cell) = enclosing_cell(event.target()) else {
                return;
            };
            let Some(source) = cell_ref(&cell) else {
                return;
            };
            let press = pointer_press(&event, &cell);
            log!(format!("pointer down {source}"));
            let began = handle.run_gesture(
                GestureEvent::PointerDown { source, press },
                EffectContext::pointer(cell.clone()),
            );
            if began {
                track_pointer(&handle, &cell);
            }
        })
    };
    let onclick = {
        let handle = handle.clone();
        Callback::from(move |event: MouseEvent| {
            if is_text_field(event.target()) {
                return;
            }
            let Some(coord) = event_cell_ref(&event).and_then(|raw| Coordinate::decode(&raw).ok())
            else {
                return;
            };
            let outcome = handle.surface.borrow_mut().click(coord);
            match outcome {
                ClickOutcome::Swallowed => log!("click after drag ignored"),
                ClickOutcome::Toggled { win, .. } => {
                    if let Some(change) = win {
                        log_win(change);
                    }
                    (handle.bump_ui_revision)();
                }
            }
        })
    };
    let oninput = {
        let handle = handle.clone();
        Callback::from(move |event: InputEvent| {
            let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(coord) = event_cell_ref(&event).and_then(|raw| Coordinate::decode(&raw).ok())
            else {
                return;
            };
            if handle.surface.borrow_mut().set_text(coord, &input.value()) {
                (handle.bump_ui_revision)();
            }
        })
    };
    let on_toggle_edit = {
        let handle = handle.clone();
        Callback::from(move |_: MouseEvent| {
            let effects = handle.surface.borrow_mut().toggle_edit_mode();
            handle.apply_effects(&effects, &EffectContext::default());
            let label = handle.surface.borrow().edit_mode_label();
            log!(format!("edit mode {label}"));
            (handle.bump_ui_revision)();
        })
    };

    let surface_ref = surface.borrow();
    let editing = surface_ref.edit_mode();
    let touch_locked = editing && surface_ref.interaction() == InteractionMode::Pointer;
    let cells = surface_ref.cells().map(|cell| {
        html! {
            <BingoCell
                key={cell.tile.id.to_string()}
                coord={cell.coord}
                tile={cell.tile.clone()}
                is_free={cell.is_free}
                draggable={cell.draggable}
                editing={editing}
                touch_locked={touch_locked}
            />
        }
    });
    let banner = if surface_ref.won() {
        html! { <h2>{ "BINGO!!!!" }</h2> }
    } else {
        html! {}
    };

    html! {
        <div class="bingo-board-frame" data-input={surface_ref.interaction().label()}>
            <div class="bingo-toolbar">
                <button class="edit-toggle" onclick={on_toggle_edit}>
                    { format!("Edit mode: {}", surface_ref.edit_mode_label()) }
                </button>
            </div>
            <section
                class="bingo-board"
                ref={root}
                {ondragstart}
                {ondragenter}
                {ondragleave}
                {ondragover}
                {ondrop}
                {ondragend}
                {onpointerdown}
                {onclick}
                {oninput}
            >
                { for cells }
                { banner }
            </section>
        </div>
    }
}

#[derive(Properties)]
struct BingoCellProps {
    coord: Coordinate,
    tile: Rc<Tile>,
    is_free: bool,
    draggable: bool,
    editing: bool,
    /// Pointer drags need panning off before the first touch lands.
    touch_locked: bool,
}

impl PartialEq for BingoCellProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tile, &other.tile)
            && self.coord == other.coord
            && self.is_free == other.is_free
            && self.draggable == other.draggable
            && self.editing == other.editing
            && self.touch_locked == other.touch_locked
    }
}

#[function_component(BingoCell)]
fn bingo_cell(props: &BingoCellProps) -> Html {
    let tile = &props.tile;
    let text = if props.editing {
        html! { <input class="board-text-input" value={tile.text.clone()} /> }
    } else {
        html! { <>{ tile.text.clone() }</> }
    };
    let label = if props.is_free {
        html! { <p class="board-text">{ "free bingo piece " }<sub>{ text }</sub></p> }
    } else if props.editing {
        html! { <p class="board-text">{ text }</p> }
    } else {
        text
    };
    let image = if tile.image_ref.is_empty() {
        html! {}
    } else {
        html! {
            <img class="bingo-piece-image" src={tile.image_ref.clone()} alt="" draggable="false" />
        }
    };
    html! {
        <div
            class={classes!("bingo-piece", tile.is_checked.then_some("checked"))}
            data-coord={props.coord.encode()}
            data-tile={tile.id.to_string()}
            draggable={if props.draggable { "true" } else { "false" }}
            style={props.touch_locked.then_some("touch-action: none")}
        >
            { image }
            { label }
        </div>
    }
}

pub(crate) fn run(config: InitConfig) {
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(config: InitConfig) -> Element {
        set_panic_hook();
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        yew::Renderer::<App>::with_root_and_props(root.clone(), AppProps { config }).render();
        root
    }

    fn test_config(interaction: InteractionMode) -> InitConfig {
        InitConfig {
            boards: 2,
            interaction,
            edit_mode: true,
            seed: 7,
        }
    }

    async fn settle() {
        TimeoutFuture::new(20).await;
    }

    fn first_board(root: &Element) -> Element {
        root.query_selector(".bingo-board")
            .expect("query board")
            .expect("board rendered")
    }

    fn cell_at(board: &Element, coord: &str) -> HtmlElement {
        board
            .query_selector(&format!("[data-coord=\"{coord}\"]"))
            .expect("query cell")
            .expect("cell rendered")
            .dyn_into::<HtmlElement>()
            .expect("cell is an html element")
    }

    #[wasm_bindgen_test(async)]
    async fn renders_every_board_with_twenty_five_cells() {
        let root = mount(test_config(InteractionMode::Native));
        settle().await;
        let boards = root.query_selector_all(".bingo-board").expect("query boards");
        assert_eq!(boards.length(), 2);
        let cells = root.query_selector_all(".bingo-piece").expect("query cells");
        assert_eq!(cells.length(), 50);

        let board = first_board(&root);
        let free = cell_at(&board, "2,2");
        assert!(free.class_list().contains("checked"));
        assert!(free.text_content().unwrap_or_default().contains("free bingo piece"));
        assert_eq!(free.get_attribute("draggable").as_deref(), Some("true"));
        root.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn clicking_cells_completes_a_row() {
        let root = mount(test_config(InteractionMode::Native));
        settle().await;
        let board = first_board(&root);
        assert!(board.query_selector("h2").expect("query banner").is_none());

        for col in 0..5 {
            cell_at(&board, &format!("0,{col}")).click();
            settle().await;
        }
        assert!(cell_at(&board, "0,0").class_list().contains("checked"));
        let banner = board
            .query_selector("h2")
            .expect("query banner")
            .expect("banner shown");
        assert_eq!(banner.text_content().as_deref(), Some("BINGO!!!!"));

        cell_at(&board, "0,3").click();
        settle().await;
        assert!(board.query_selector("h2").expect("query banner").is_none());
        root.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn edit_toggle_locks_cells() {
        let root = mount(test_config(InteractionMode::Native));
        settle().await;
        let toggle = root
            .query_selector(".edit-toggle")
            .expect("query toggle")
            .expect("toggle rendered")
            .dyn_into::<HtmlElement>()
            .expect("toggle is an html element");
        assert_eq!(toggle.text_content().as_deref(), Some("Edit mode: On"));
        let board = first_board(&root);
        assert!(board.query_selector("input").expect("query inputs").is_some());

        toggle.click();
        settle().await;
        assert_eq!(toggle.text_content().as_deref(), Some("Edit mode: Off"));
        assert_eq!(
            cell_at(&board, "1,1").get_attribute("draggable").as_deref(),
            Some("false")
        );
        assert!(board.query_selector("input").expect("query inputs").is_none());
        root.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn pointer_boards_do_not_use_native_drag() {
        let root = mount(test_config(InteractionMode::Pointer));
        settle().await;
        let board = first_board(&root);
        assert_eq!(
            cell_at(&board, "0,0").get_attribute("draggable").as_deref(),
            Some("false")
        );
        assert_eq!(
            cell_at(&board, "0,0")
                .style()
                .get_property_value("touch-action")
                .unwrap(),
            "none"
        );
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn native_boards_leave_touch_action_alone() {
        let root = mount(test_config(InteractionMode::Native));
        settle().await;
        let board = first_board(&root);
        assert_eq!(
            cell_at(&board, "0,0")
                .style()
                .get_property_value("touch-action")
                .unwrap(),
            ""
        );
        root.remove();
    }
}
