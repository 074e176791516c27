use std::rc::Rc;

use crate::board::Board;
use crate::coord::Coordinate;
use crate::gesture::{
    GestureController, GestureEffect, GestureEvent, GesturePhase, GestureStrategy, InteractionMode,
};
use crate::tile::Tile;
use crate::win::check_win;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub edit_mode: bool,
    pub interaction: InteractionMode,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            edit_mode: true,
            interaction: InteractionMode::Native,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinChange {
    Won,
    Cleared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Swallowed,
    Toggled {
        checked: bool,
        win: Option<WinChange>,
    },
}

/// Result of feeding one gesture event to the surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dispatch {
    /// Visual effects for the view layer, in order. Swaps are already applied.
    pub effects: Vec<GestureEffect>,
    pub board_changed: bool,
    pub win: Option<WinChange>,
}

/// What the view needs to render one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellView {
    pub coord: Coordinate,
    pub tile: Rc<Tile>,
    pub is_free: bool,
    pub draggable: bool,
}

impl CellView {
    pub fn is_checked(&self) -> bool {
        self.tile.is_checked
    }

    pub fn text(&self) -> &str {
        &self.tile.text
    }

    pub fn image_ref(&self) -> &str {
        &self.tile.image_ref
    }
}

/// Owns one board, the edit-mode flag, the win flag and the gesture strategy.
#[derive(Clone, Debug)]
pub struct BoardSurface {
    board: Board,
    edit_mode: bool,
    won: bool,
    strategy: GestureStrategy,
}

impl BoardSurface {
    pub fn new(board: Board, config: SurfaceConfig) -> Self {
        let won = check_win(&board);
        Self {
            board,
            edit_mode: config.edit_mode,
            won,
            strategy: GestureStrategy::new(config.interaction),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn edit_mode_label(&self) -> &'static str {
        if self.edit_mode {
            "On"
        } else {
            "Off"
        }
    }

    pub fn interaction(&self) -> InteractionMode {
        self.strategy.mode()
    }

    pub fn gesture_active(&self) -> bool {
        self.strategy.is_active()
    }

    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        let draggable = self.edit_mode && self.interaction() == InteractionMode::Native;
        self.board.iter().map(move |(coord, tile)| CellView {
            coord,
            tile: Rc::clone(tile),
            is_free: coord.is_free_cell(),
            draggable,
        })
    }

    /// Flips edit mode. Leaving edit mode tears down any gesture in flight.
    pub fn toggle_edit_mode(&mut self) -> Vec<GestureEffect> {
        self.edit_mode = !self.edit_mode;
        if self.edit_mode {
            Vec::new()
        } else {
            self.strategy.reset()
        }
    }

    /// Switches the drag strategy, tearing down the previous one first.
    pub fn set_interaction(&mut self, mode: InteractionMode) -> Vec<GestureEffect> {
        if mode == self.interaction() {
            return Vec::new();
        }
        let effects = self.strategy.reset();
        self.strategy = GestureStrategy::new(mode);
        effects
    }

    /// Toggles the checked flag of a clicked cell, unless the click is the
    /// tail of a pointer drag.
    pub fn click(&mut self, coord: Coordinate) -> ClickOutcome {
        if self.strategy.take_click_suppression() {
            return ClickOutcome::Swallowed;
        }
        let value = !self.board.tile(coord).is_checked;
        let next = self.board.toggle(coord, value);
        ClickOutcome::Toggled {
            checked: value,
            win: self.commit(next),
        }
    }

    /// Text does not take part in the win condition, so no re-evaluation.
    /// Tiles are only renamed while edit mode is on.
    pub fn set_text(&mut self, coord: Coordinate, text: &str) -> bool {
        if !self.edit_mode || self.board.tile(coord).text == text {
            return false;
        }
        self.board = self.board.set_text(coord, text);
        true
    }

    pub fn dispatch(&mut self, event: &GestureEvent) -> Dispatch {
        if !self.edit_mode && event.phase() == GesturePhase::Begin {
            return Dispatch::default();
        }
        let mut dispatch = Dispatch::default();
        for effect in self.strategy.handle(&self.board, event) {
            match effect {
                GestureEffect::Swap { from, to } => {
                    if from == to {
                        continue;
                    }
                    let next = self.board.swap(from, to);
                    if let Some(change) = self.commit(next) {
                        dispatch.win = Some(change);
                    }
                    dispatch.board_changed = true;
                }
                effect => dispatch.effects.push(effect),
            }
        }
        dispatch
    }

    fn commit(&mut self, next: Board) -> Option<WinChange> {
        self.board = next;
        self.reevaluate_win()
    }

    fn reevaluate_win(&mut self) -> Option<WinChange> {
        let win = check_win(&self.board);
        if win && !self.won {
            self.won = true;
            return Some(WinChange::Won);
        }
        if !win && self.won {
            self.won = false;
            return Some(WinChange::Cleared);
        }
        None
    }
}
