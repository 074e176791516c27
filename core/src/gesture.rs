use crate::board::Board;
use crate::coord::Coordinate;
use crate::native_drag::DragSwapController;
use crate::pointer_drag::PointerDragController;
use crate::tile::TileId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    #[default]
    Native,
    Pointer,
}

impl InteractionMode {
    pub fn label(&self) -> &'static str {
        match self {
            InteractionMode::Native => "native",
            InteractionMode::Pointer => "pointer",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPress {
    pub pointer_id: i32,
    pub x: f32,
    pub y: f32,
    pub rect: CellRect,
}

/// Input from the view layer. Cell references are the raw `"row,col"`
/// identifiers read off the DOM; `None` means no enclosing cell was found.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    DragStart {
        source: String,
    },
    DragEnter {
        target: Option<String>,
    },
    DragLeave {
        target: Option<String>,
    },
    Drop {
        payload: Option<String>,
        target: Option<String>,
    },
    DragEnd,
    PointerDown {
        source: String,
        press: PointerPress,
    },
    PointerMove {
        pointer_id: i32,
        x: f32,
        y: f32,
        target: Option<String>,
    },
    PointerUp {
        pointer_id: i32,
        target: Option<String>,
    },
    PointerCancel {
        pointer_id: i32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Begin,
    Update,
    End,
    Cancel,
}

impl GestureEvent {
    pub fn phase(&self) -> GesturePhase {
        match self {
            GestureEvent::DragStart { .. } | GestureEvent::PointerDown { .. } => GesturePhase::Begin,
            GestureEvent::DragEnter { .. }
            | GestureEvent::DragLeave { .. }
            | GestureEvent::PointerMove { .. } => GesturePhase::Update,
            GestureEvent::Drop { .. } | GestureEvent::PointerUp { .. } => GesturePhase::End,
            GestureEvent::DragEnd | GestureEvent::PointerCancel { .. } => GesturePhase::Cancel,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        match self {
            GestureEvent::DragStart { .. }
            | GestureEvent::DragEnter { .. }
            | GestureEvent::DragLeave { .. }
            | GestureEvent::Drop { .. }
            | GestureEvent::DragEnd => InteractionMode::Native,
            GestureEvent::PointerDown { .. }
            | GestureEvent::PointerMove { .. }
            | GestureEvent::PointerUp { .. }
            | GestureEvent::PointerCancel { .. } => InteractionMode::Pointer,
        }
    }
}

/// Side effects a controller asks for. Visual effects address elements by
/// tile id, which stays attached to the element when tiles change places.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEffect {
    SetPayload { value: String },
    MarkDragging { tile: TileId },
    ClearDragging { tile: TileId },
    Highlight { tile: TileId },
    ClearHighlight { tile: TileId },
    CapturePointer { pointer_id: i32 },
    ReleasePointer { pointer_id: i32 },
    SuppressInteraction { tile: TileId },
    RestoreInteraction { tile: TileId },
    SpawnClone {
        tile: TileId,
        width: f32,
        height: f32,
        x: f32,
        y: f32,
    },
    MoveClone { x: f32, y: f32 },
    RemoveClone,
    Swap { from: Coordinate, to: Coordinate },
}

pub trait GestureController {
    fn mode(&self) -> InteractionMode;
    fn is_active(&self) -> bool;
    fn begin(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect>;
    fn update(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect>;
    fn end(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect>;
    fn cancel(&mut self, event: &GestureEvent) -> Vec<GestureEffect>;
    /// Tears down whatever gesture is in flight without committing.
    fn reset(&mut self) -> Vec<GestureEffect>;

    /// Whether the click that follows the last finished gesture belongs to
    /// that gesture and must not toggle a cell. Reading it clears it.
    fn take_click_suppression(&mut self) -> bool {
        false
    }

    fn handle(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        if event.mode() != self.mode() {
            return Vec::new();
        }
        match event.phase() {
            GesturePhase::Begin => self.begin(board, event),
            GesturePhase::Update => self.update(board, event),
            GesturePhase::End => self.end(board, event),
            GesturePhase::Cancel => self.cancel(event),
        }
    }
}

#[derive(Clone, Debug)]
pub enum GestureStrategy {
    Native(DragSwapController),
    Pointer(PointerDragController),
}

impl GestureStrategy {
    pub fn new(mode: InteractionMode) -> Self {
        match mode {
            InteractionMode::Native => GestureStrategy::Native(DragSwapController::new()),
            InteractionMode::Pointer => GestureStrategy::Pointer(PointerDragController::new()),
        }
    }

    fn controller(&self) -> &dyn GestureController {
        match self {
            GestureStrategy::Native(controller) => controller,
            GestureStrategy::Pointer(controller) => controller,
        }
    }

    fn controller_mut(&mut self) -> &mut dyn GestureController {
        match self {
            GestureStrategy::Native(controller) => controller,
            GestureStrategy::Pointer(controller) => controller,
        }
    }
}

impl Default for GestureStrategy {
    fn default() -> Self {
        Self::new(InteractionMode::default())
    }
}

impl GestureController for GestureStrategy {
    fn mode(&self) -> InteractionMode {
        self.controller().mode()
    }

    fn is_active(&self) -> bool {
        self.controller().is_active()
    }

    fn begin(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        self.controller_mut().begin(board, event)
    }

    fn update(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        self.controller_mut().update(board, event)
    }

    fn end(&mut self, board: &Board, event: &GestureEvent) -> Vec<GestureEffect> {
        self.controller_mut().end(board, event)
    }

    fn cancel(&mut self, event: &GestureEvent) -> Vec<GestureEffect> {
        self.controller_mut().cancel(event)
    }

    fn reset(&mut self) -> Vec<GestureEffect> {
        self.controller_mut().reset()
    }

    fn take_click_suppression(&mut self) -> bool {
        self.controller_mut().take_click_suppression()
    }
}

/// Decodes a raw cell reference, treating anything unreadable as absent.
pub(crate) fn resolve_cell(raw: Option<&str>) -> Option<Coordinate> {
    raw.and_then(|value| Coordinate::decode(value).ok())
}
