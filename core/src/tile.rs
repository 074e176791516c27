use std::fmt;

/// Stable identity of a tile. It travels with the tile when cells are swapped,
/// so views key on it and effects address elements by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(String);

impl TileId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub text: String,
    pub is_checked: bool,
    pub image_ref: String,
}

impl Tile {
    pub fn new(id: TileId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_checked: false,
            image_ref: String::new(),
        }
    }

    pub fn with_checked(mut self, is_checked: bool) -> Self {
        self.is_checked = is_checked;
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }
}
