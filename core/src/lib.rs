pub mod board;
pub mod content;
pub mod coord;
pub mod gesture;
pub mod native_drag;
pub mod pointer_drag;
pub mod surface;
pub mod tile;
pub mod win;

pub use board::Board;
pub use content::{SeededContent, TileContentProvider};
pub use coord::{CoordError, Coordinate, BOARD_SIZE, CELL_COUNT, FREE_CELL};
pub use gesture::{
    CellRect, GestureController, GestureEffect, GestureEvent, GesturePhase, GestureStrategy,
    InteractionMode, PointerPress,
};
pub use native_drag::DragSwapController;
pub use pointer_drag::PointerDragController;
pub use surface::{BoardSurface, CellView, ClickOutcome, Dispatch, SurfaceConfig, WinChange};
pub use tile::{Tile, TileId};
pub use win::check_win;
