use crate::board::Board;
use crate::coord::Coordinate;
use crate::gesture::{
    resolve_cell, GestureController, GestureEffect, GestureEvent, InteractionMode, PointerPress,
};
use crate::tile::TileId;

/// Pointer travel, in CSS pixels, after which a press counts as a drag and
/// the trailing click is swallowed.
pub const DRAG_SLOP_PX: f32 = 4.0;

#[derive(Clone, Debug, PartialEq)]
struct Tracking {
    pointer_id: i32,
    source_tile: TileId,
    start: (f32, f32),
    grab_offset: (f32, f32),
    moved: bool,
    hover: Option<(Coordinate, TileId)>,
}

impl Tracking {
    fn note_motion(&mut self, x: f32, y: f32) {
        if self.moved {
            return;
        }
        let dx = x - self.start.0;
        let dy = y - self.start.1;
        if dx * dx + dy * dy > DRAG_SLOP_PX * DRAG_SLOP_PX {
            self.moved = true;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
enum PointerState {
    #[default]
    Idle,
    Tracking(Tracking),
}

/// Relocates tiles by capturing the pointer and dragging a floating clone of
/// the pressed cell. Works with touch input, where native drag events do not.
#[derive(Clone, Debug, Default)]
pub struct PointerDragController {
    state: PointerState,
    suppress_click: bool,
}

impl PointerDragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracked_pointer(&self) -> Option<i32> {
        match &self.state {
            PointerState::Tracking(tracking) => Some(tracking.pointer_id),
            PointerState::Idle => None,
        }
    }

    pub fn hover(&self) -> Option<Coordinate> {
        match &self.state {
            PointerState::Tracking(tracking) => tracking.hover.as_ref().map(|(coord, _)| *coord),
            PointerState::Idle => None,
        }
    }

    pub fn pointer_down(
        &mut self,
        board: &Board,
        source: &str,
        press: PointerPress,
    ) -> Vec<GestureEffect> {
        if self.is_active() {
            return Vec::new();
        }
        let Ok(source) = Coordinate::decode(source) else {
            return Vec::new();
        };
        self.suppress_click = false;
        let source_tile = board.tile(source).id.clone();
        let effects = vec![
            GestureEffect::CapturePointer {
                pointer_id: press.pointer_id,
            },
            GestureEffect::SuppressInteraction {
                tile: source_tile.clone(),
            },
            GestureEffect::SpawnClone {
                tile: source_tile.clone(),
                width: press.rect.width,
                height: press.rect.height,
                x: press.rect.left,
                y: press.rect.top,
            },
            GestureEffect::Highlight {
                tile: source_tile.clone(),
            },
        ];
        self.state = PointerState::Tracking(Tracking {
            pointer_id: press.pointer_id,
            source_tile,
            start: (press.x, press.y),
            grab_offset: (press.x - press.rect.left, press.y - press.rect.top),
            moved: false,
            hover: None,
        });
        effects
    }

    pub fn pointer_move(
        &mut self,
        board: &Board,
        pointer_id: i32,
        x: f32,
        y: f32,
        target: Option<&str>,
    ) -> Vec<GestureEffect> {
        let PointerState::Tracking(tracking) = &mut self.state else {
            return Vec::new();
        };
        if tracking.pointer_id != pointer_id {
            return Vec::new();
        }
        tracking.note_motion(x, y);
        let mut effects = vec![GestureEffect::MoveClone {
            x: x - tracking.grab_offset.0,
            y: y - tracking.grab_offset.1,
        }];
        let source = board.coordinate_of(&tracking.source_tile);
        let hovered = resolve_cell(target).filter(|coord| Some(*coord) != source);
        let current = tracking.hover.as_ref().map(|(coord, _)| *coord);
        if hovered != current {
            if let Some((_, previous)) = tracking.hover.take() {
                effects.push(GestureEffect::ClearHighlight { tile: previous });
            }
            if let Some(coord) = hovered {
                let tile = board.tile(coord).id.clone();
                effects.push(GestureEffect::Highlight { tile: tile.clone() });
                tracking.hover = Some((coord, tile));
            }
        }
        effects
    }

    /// Ends the gesture and swaps the source with the cell under the pointer,
    /// if there is one and it is not the source itself.
    pub fn pointer_up(
        &mut self,
        board: &Board,
        pointer_id: i32,
        target: Option<&str>,
    ) -> Vec<GestureEffect> {
        if self.tracked_pointer() != Some(pointer_id) {
            return Vec::new();
        }
        let source = match &self.state {
            PointerState::Tracking(tracking) => board.coordinate_of(&tracking.source_tile),
            PointerState::Idle => None,
        };
        let moved = matches!(&self.state, PointerState::Tracking(tracking) if tracking.moved);
        let mut effects = self.teardown();
        let mut swapped = false;
        if let (Some(from), Some(to)) = (source, resolve_cell(target)) {
            if from != to {
                effects.push(GestureEffect::Swap { from, to });
                swapped = true;
            }
        }
        // A committed swap owns the trailing click even inside the slop.
        self.suppress_click = moved || swapped;
        effects
    }

    pub fn pointer_cancel(&mut self, pointer_id: i32) -> Vec<GestureEffect> {
        if self.tracked_pointer() != Some(pointer_id) {
            return Vec::new();
        }
        self.teardown()
    }

    fn teardown(&mut self) -> Vec<GestureEffect> {
        let PointerState::Tracking(tracking) = std::mem::take(&mut self.state) else {
            return Vec::new();
        };
        let mut effects = vec![
            GestureEffect::ReleasePointer {
                pointer_id: tracking.pointer_id,
            },
            GestureEffect::RestoreInteraction {
                tile: tracking.source_tile.clone(),
            },
            GestureEffect::ClearHighlight {
                tile: tracking.source_tile,
            },
        ];
        if let Some((_, tile)) = tracking.hover {
            effects.push(GestureEffect::ClearHighlight { tile });
        }
        effects.push(GestureEffect::RemoveClone);
        effects
    }
}

impl GestureController for PointerDragController {
    fn mode(&self) -> InteractionMode {
        InteractionMode::Pointer
    }

    fn is_active(&self) -> bool {
        matches!(self.state, PointerState::Tracking(_))
    }

    fn begin(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        match event {
            GestureEvent::PointerDown { source, press } => self.pointer_down(board, source, *press),
            _ => Vec::new(),
        }
    }

    fn update(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        match event {
            GestureEvent::PointerMove {
                pointer_id,
                x,
                y,
                target,
            } => self.pointer_move(board, *pointer_id, *x, *y, target.as_deref()),
            _ => Vec::new(),
        }
    }

    fn end(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        match event {
            GestureEvent::PointerUp { pointer_id, target } => {
                self.pointer_up(board, *pointer_id, target.as_deref())
            }
            _ => Vec::new(),
        }
    }

    fn cancel(&mut self, event: &GestureEvent) -> Vec<GestureEffect> {
        match event {
            GestureEvent::PointerCancel { pointer_id } => self.pointer_cancel(*pointer_id),
            _ => Vec::new(),
        }
    }

    fn reset(&mut self) -> Vec<GestureEffect> {
        self.suppress_click = false;
        self.teardown()
    }

    fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }
}
