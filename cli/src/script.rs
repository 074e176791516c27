use std::fmt;

use bingo_core::{
    Board, BoardSurface, CellRect, ClickOutcome, CoordError, Coordinate, GestureEvent,
    InteractionMode, PointerPress, WinChange, BOARD_SIZE,
};

/// Side of one cell on the virtual screen pointer replays run against.
const CELL_PX: f32 = 100.0;
const REPLAY_POINTER_ID: i32 = 1;
const TEXT_PREVIEW_CHARS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Toggle(Coordinate),
    Swap { from: Coordinate, to: Coordinate },
    Text { coord: Coordinate, text: String },
    Edit,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Toggle(coord) => write!(f, "toggle {coord}"),
            Step::Swap { from, to } => write!(f, "swap {from} {to}"),
            Step::Text { coord, text } => write!(f, "text {coord} {text}"),
            Step::Edit => f.write_str("edit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptErrorKind {
    UnknownCommand(String),
    MissingArgument { command: &'static str },
    UnexpectedArgument { command: &'static str, value: String },
    BadCoordinate(CoordError),
}

impl fmt::Display for ScriptErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptErrorKind::UnknownCommand(command) => write!(f, "unknown command '{command}'"),
            ScriptErrorKind::MissingArgument { command } => {
                write!(f, "'{command}' is missing an argument")
            }
            ScriptErrorKind::UnexpectedArgument { command, value } => {
                write!(f, "'{command}' does not take '{value}'")
            }
            ScriptErrorKind::BadCoordinate(err) => err.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub kind: ScriptErrorKind,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ScriptErrorKind::BadCoordinate(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoordError> for ScriptErrorKind {
    fn from(err: CoordError) -> Self {
        ScriptErrorKind::BadCoordinate(err)
    }
}

/// Parses one step. Blank lines and `#` comments yield `None`.
pub fn parse_step(line: &str) -> Result<Option<Step>, ScriptErrorKind> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();
    let step = match command.to_ascii_lowercase().as_str() {
        "toggle" | "click" => {
            let coord = required(&mut args, "toggle")?.parse::<Coordinate>()?;
            no_more(&mut args, "toggle")?;
            Step::Toggle(coord)
        }
        "swap" | "drag" => {
            let from = required(&mut args, "swap")?.parse::<Coordinate>()?;
            let to = required(&mut args, "swap")?.parse::<Coordinate>()?;
            no_more(&mut args, "swap")?;
            Step::Swap { from, to }
        }
        "text" => {
            let raw = required(&mut args, "text")?;
            let coord = raw.parse::<Coordinate>()?;
            // Everything after the coordinate is the text, inner spaces included.
            let text = rest[raw.len()..].trim().to_string();
            Step::Text { coord, text }
        }
        "edit" => {
            no_more(&mut args, "edit")?;
            Step::Edit
        }
        other => return Err(ScriptErrorKind::UnknownCommand(other.to_string())),
    };
    Ok(Some(step))
}

fn required<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<&'a str, ScriptErrorKind> {
    args.next()
        .ok_or(ScriptErrorKind::MissingArgument { command })
}

fn no_more<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<(), ScriptErrorKind> {
    match args.next() {
        Some(value) => Err(ScriptErrorKind::UnexpectedArgument {
            command,
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

/// Parses a whole script, one step per line. Line numbers start at 1.
pub fn parse_script<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        match parse_step(line) {
            Ok(Some(step)) => steps.push(step),
            Ok(None) => {}
            Err(kind) => {
                return Err(ScriptError {
                    line: index + 1,
                    kind,
                })
            }
        }
    }
    Ok(steps)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub changed: bool,
    pub win: Option<WinChange>,
}

/// Drives a board surface the way a browser would, one step at a time.
pub fn apply_step(surface: &mut BoardSurface, step: &Step) -> StepReport {
    match step {
        Step::Toggle(coord) => match surface.click(*coord) {
            ClickOutcome::Swallowed => StepReport::default(),
            ClickOutcome::Toggled { win, .. } => StepReport { changed: true, win },
        },
        Step::Swap { from, to } => match surface.interaction() {
            InteractionMode::Native => replay_native_drag(surface, *from, *to),
            InteractionMode::Pointer => replay_pointer_drag(surface, *from, *to),
        },
        Step::Text { coord, text } => StepReport {
            changed: surface.set_text(*coord, text),
            win: None,
        },
        Step::Edit => {
            surface.toggle_edit_mode();
            StepReport {
                changed: false,
                win: None,
            }
        }
    }
}

fn replay_native_drag(surface: &mut BoardSurface, from: Coordinate, to: Coordinate) -> StepReport {
    let source = from.encode();
    let target = to.encode();
    let events = [
        GestureEvent::DragStart {
            source: source.clone(),
        },
        GestureEvent::DragEnter {
            target: Some(target.clone()),
        },
        GestureEvent::Drop {
            payload: Some(source),
            target: Some(target),
        },
        GestureEvent::DragEnd,
    ];
    run_events(surface, &events)
}

fn replay_pointer_drag(surface: &mut BoardSurface, from: Coordinate, to: Coordinate) -> StepReport {
    let (start_x, start_y) = cell_center(from);
    let (end_x, end_y) = cell_center(to);
    let press = GestureEvent::PointerDown {
        source: from.encode(),
        press: PointerPress {
            pointer_id: REPLAY_POINTER_ID,
            x: start_x,
            y: start_y,
            rect: cell_rect(from),
        },
    };
    let began = !surface.dispatch(&press).effects.is_empty();
    let events = [
        GestureEvent::PointerMove {
            pointer_id: REPLAY_POINTER_ID,
            x: end_x,
            y: end_y,
            target: Some(to.encode()),
        },
        GestureEvent::PointerUp {
            pointer_id: REPLAY_POINTER_ID,
            target: Some(to.encode()),
        },
    ];
    let report = run_events(surface, &events);
    // The browser follows a captured release with a click on the dragged
    // cell, which now sits at `to`.
    if began && from != to {
        surface.click(to);
    }
    report
}

fn run_events(surface: &mut BoardSurface, events: &[GestureEvent]) -> StepReport {
    let mut report = StepReport::default();
    for event in events {
        let dispatch = surface.dispatch(event);
        report.changed |= dispatch.board_changed;
        if dispatch.win.is_some() {
            report.win = dispatch.win;
        }
    }
    report
}

fn cell_rect(coord: Coordinate) -> CellRect {
    CellRect {
        left: coord.col() as f32 * CELL_PX,
        top: coord.row() as f32 * CELL_PX,
        width: CELL_PX,
        height: CELL_PX,
    }
}

fn cell_center(coord: Coordinate) -> (f32, f32) {
    let rect = cell_rect(coord);
    (rect.left + rect.width * 0.5, rect.top + rect.height * 0.5)
}

/// Renders the board as a text grid; `x` marks checked cells.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for (row_index, row) in board.rows().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|tile| {
                let mark = if tile.is_checked { 'x' } else { ' ' };
                let preview: String = tile.text.chars().take(TEXT_PREVIEW_CHARS).collect();
                format!("[{mark}] {preview:<width$}", width = TEXT_PREVIEW_CHARS)
            })
            .collect();
        out.push_str(cells.join(" ").trim_end());
        if row_index + 1 < BOARD_SIZE {
            out.push('\n');
        }
    }
    out
}
