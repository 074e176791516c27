use std::fmt;

pub const BOARD_SIZE: usize = 5;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
pub const COORD_DELIMITER: char = ',';

/// Position of a cell on the board. Construction goes through [`Coordinate::new`]
/// or [`Coordinate::decode`], so a value in hand is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

pub const FREE_CELL: Coordinate = Coordinate { row: 2, col: 2 };

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Result<Self, CoordError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(CoordError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < CELL_COUNT);
        Self {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub(crate) fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    pub fn is_free_cell(&self) -> bool {
        *self == FREE_CELL
    }

    /// Every coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..CELL_COUNT).map(Self::from_index)
    }

    pub fn encode(&self) -> String {
        format!("{}{}{}", self.row, COORD_DELIMITER, self.col)
    }

    pub fn decode(value: &str) -> Result<Self, CoordError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CoordError::Empty);
        }
        let mut parts = value.split(COORD_DELIMITER);
        let row = parts.next().unwrap_or("");
        let Some(col) = parts.next() else {
            return Err(CoordError::MissingDelimiter {
                value: value.to_string(),
            });
        };
        if parts.next().is_some() {
            return Err(CoordError::TooManyParts {
                value: value.to_string(),
            });
        }
        let row = parse_part(row)?;
        let col = parse_part(col)?;
        Self::new(row, col)
    }
}

fn parse_part(part: &str) -> Result<usize, CoordError> {
    let part = part.trim();
    part.parse::<usize>().map_err(|_| CoordError::InvalidNumber {
        part: part.to_string(),
    })
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.row, COORD_DELIMITER, self.col)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = CoordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::decode(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    Empty,
    MissingDelimiter { value: String },
    TooManyParts { value: String },
    InvalidNumber { part: String },
    OutOfRange { row: usize, col: usize },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::Empty => write!(f, "coordinate is empty"),
            CoordError::MissingDelimiter { value } => {
                write!(f, "coordinate '{value}' has no '{COORD_DELIMITER}'")
            }
            CoordError::TooManyParts { value } => {
                write!(f, "coordinate '{value}' has more than two parts")
            }
            CoordError::InvalidNumber { part } => {
                write!(f, "'{part}' is not a cell index")
            }
            CoordError::OutOfRange { row, col } => {
                write!(
                    f,
                    "cell ({row}, {col}) is outside the {BOARD_SIZE}x{BOARD_SIZE} board"
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
