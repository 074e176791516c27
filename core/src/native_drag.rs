use crate::board::Board;
use crate::coord::Coordinate;
use crate::gesture::{resolve_cell, GestureController, GestureEffect, GestureEvent, InteractionMode};
use crate::tile::TileId;

#[derive(Clone, Debug, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        source: Coordinate,
        source_tile: TileId,
        drop_target: Option<(Coordinate, TileId)>,
    },
}

/// Relocates tiles through the browser's native drag and drop events.
#[derive(Clone, Debug, Default)]
pub struct DragSwapController {
    state: DragState,
}

impl DragSwapController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<Coordinate> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(*source),
            DragState::Idle => None,
        }
    }

    pub fn drop_target(&self) -> Option<Coordinate> {
        match &self.state {
            DragState::Dragging { drop_target, .. } => drop_target.as_ref().map(|(coord, _)| *coord),
            DragState::Idle => None,
        }
    }

    pub fn drag_start(&mut self, board: &Board, source: &str) -> Vec<GestureEffect> {
        let Ok(source) = Coordinate::decode(source) else {
            return Vec::new();
        };
        // A new gesture overwrites whatever the previous one left behind.
        let mut effects = self.drag_end();
        let source_tile = board.tile(source).id.clone();
        effects.push(GestureEffect::MarkDragging {
            tile: source_tile.clone(),
        });
        effects.push(GestureEffect::SetPayload {
            value: source.encode(),
        });
        self.state = DragState::Dragging {
            source,
            source_tile,
            drop_target: None,
        };
        effects
    }

    pub fn drag_enter(&mut self, board: &Board, target: Option<&str>) -> Vec<GestureEffect> {
        let DragState::Dragging {
            source,
            drop_target,
            ..
        } = &mut self.state
        else {
            return Vec::new();
        };
        let Some(target) = resolve_cell(target) else {
            return Vec::new();
        };
        if target == *source {
            return Vec::new();
        }
        if drop_target.as_ref().map(|(coord, _)| *coord) == Some(target) {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if let Some((_, previous)) = drop_target.take() {
            effects.push(GestureEffect::ClearHighlight { tile: previous });
        }
        let tile = board.tile(target).id.clone();
        effects.push(GestureEffect::Highlight { tile: tile.clone() });
        *drop_target = Some((target, tile));
        effects
    }

    pub fn drag_leave(&mut self, board: &Board, target: Option<&str>) -> Vec<GestureEffect> {
        let DragState::Dragging { drop_target, .. } = &mut self.state else {
            return Vec::new();
        };
        let Some(left) = resolve_cell(target) else {
            return Vec::new();
        };
        if drop_target.as_ref().map(|(coord, _)| *coord) == Some(left) {
            if let Some((_, tile)) = drop_target.take() {
                return vec![GestureEffect::ClearHighlight { tile }];
            }
        }
        vec![GestureEffect::ClearHighlight {
            tile: board.tile(left).id.clone(),
        }]
    }

    /// Commits the swap carried by the drop. Teardown is left to
    /// [`Self::drag_end`], which the browser fires after every drop.
    pub fn drop_on(&mut self, payload: Option<&str>, target: Option<&str>) -> Vec<GestureEffect> {
        if !self.is_active() {
            return Vec::new();
        }
        let Some(from) = resolve_cell(payload) else {
            return Vec::new();
        };
        let Some(to) = resolve_cell(target) else {
            return Vec::new();
        };
        if from == to {
            return Vec::new();
        }
        vec![GestureEffect::Swap { from, to }]
    }

    pub fn drag_end(&mut self) -> Vec<GestureEffect> {
        let DragState::Dragging {
            source_tile,
            drop_target,
            ..
        } = std::mem::take(&mut self.state)
        else {
            return Vec::new();
        };
        let mut effects = vec![GestureEffect::ClearDragging { tile: source_tile }];
        if let Some((_, tile)) = drop_target {
            effects.push(GestureEffect::ClearHighlight { tile });
        }
        effects
    }
}

impl GestureController for DragSwapController {
    fn mode(&self) -> InteractionMode {
        InteractionMode::Native
    }

    fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    fn begin(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        match event {
            GestureEvent::DragStart { source } => self.drag_start(board, source),
            _ => Vec::new(),
        }
    }

    fn update(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        match event {
            GestureEvent::DragEnter { target } => self.drag_enter(board, target.as_deref()),
            GestureEvent::DragLeave { target } => self.drag_leave(board, target.as_deref()),
            _ => Vec::new(),
        }
    }

    fn end(&mut self, _board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        match event {
            GestureEvent::Drop { payload, target } => {
                self.drop_on(payload.as_deref(), target.as_deref())
            }
            _ => Vec::new(),
        }
    }

    fn cancel(&mut self, event: &GestureEvent) -> Vec<GestureEffect> {
        match event {
            GestureEvent::DragEnd => self.drag_end(),
            _ => Vec::new(),
        }
    }

    fn reset(&mut self) -> Vec<GestureEffect> {
        self.drag_end()
    }
}
