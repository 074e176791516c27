use std::collections::HashSet;
use std::rc::Rc;

use crate::content::TileContentProvider;
use crate::coord::{Coordinate, BOARD_SIZE, CELL_COUNT};
use crate::tile::{Tile, TileId};

/// A 5x5 row-major grid of tiles.
///
/// Mutations never touch `self`; they return a new board that shares the `Rc`
/// of every cell they did not modify. `Rc::ptr_eq` on a cell therefore tells a
/// view whether that cell changed between two snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: Vec<Rc<Tile>>,
}

impl Board {
    pub fn create(provider: &mut impl TileContentProvider) -> Self {
        let cells = Coordinate::all()
            .map(|coord| {
                let id = provider.next_id();
                let text = provider.text_for(coord);
                let image_ref = provider.image_ref_for(coord);
                Rc::new(
                    Tile::new(id, text)
                        .with_checked(coord.is_free_cell())
                        .with_image_ref(image_ref),
                )
            })
            .collect();
        Self { cells }
    }

    /// Builds a board from exactly [`CELL_COUNT`] tiles in row-major order.
    /// Tile ids must be distinct.
    pub fn from_tiles(tiles: Vec<Tile>) -> Option<Self> {
        if tiles.len() != CELL_COUNT {
            return None;
        }
        let ids: HashSet<&TileId> = tiles.iter().map(|tile| &tile.id).collect();
        if ids.len() != tiles.len() {
            return None;
        }
        Some(Self {
            cells: tiles.into_iter().map(Rc::new).collect(),
        })
    }

    pub fn tile(&self, coord: Coordinate) -> &Tile {
        &self.cells[coord.index()]
    }

    pub fn cell(&self, coord: Coordinate) -> &Rc<Tile> {
        &self.cells[coord.index()]
    }

    pub fn coordinate_of(&self, id: &TileId) -> Option<Coordinate> {
        self.cells
            .iter()
            .position(|tile| &tile.id == id)
            .map(Coordinate::from_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &Rc<Tile>)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, tile)| (Coordinate::from_index(index), tile))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rc<Tile>]> {
        self.cells.chunks(BOARD_SIZE)
    }

    pub fn checked_count(&self) -> usize {
        self.cells.iter().filter(|tile| tile.is_checked).count()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Exchanges the whole tile records at `a` and `b`. Identity moves with the
    /// tile. Swapping a cell with itself yields an equal board; gesture code
    /// rejects that case before calling in.
    pub fn swap(&self, a: Coordinate, b: Coordinate) -> Board {
        let mut cells = self.cells.clone();
        cells.swap(a.index(), b.index());
        Board { cells }
    }

    pub fn toggle(&self, coord: Coordinate, value: bool) -> Board {
        self.replace_with(coord, |tile| tile.is_checked = value)
    }

    pub fn set_text(&self, coord: Coordinate, text: impl Into<String>) -> Board {
        let text = text.into();
        self.replace_with(coord, move |tile| tile.text = text)
    }

    fn replace_with<F>(&self, coord: Coordinate, edit: F) -> Board
    where
        F: FnOnce(&mut Tile),
    {
        let mut cells = self.cells.clone();
        let mut tile = Tile::clone(&cells[coord.index()]);
        edit(&mut tile);
        cells[coord.index()] = Rc::new(tile);
        Board { cells }
    }
}
