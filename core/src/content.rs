use std::collections::HashSet;

use crate::coord::Coordinate;
use crate::tile::TileId;

pub const TILE_ID_LEN: usize = 21;
pub const TILE_ID_ALPHABET: &str =
    "useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Supplies the initial content of a board. The board only relies on ids being
/// unique; text and image refs are displayed as given.
pub trait TileContentProvider {
    fn next_id(&mut self) -> TileId;
    fn text_for(&mut self, coord: Coordinate) -> String;
    fn image_ref_for(&mut self, _coord: Coordinate) -> String {
        String::new()
    }
}

pub fn splitmix64(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9e3779b97f4a7c15);
    let mut z = value;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Deterministic provider: the same seed yields the same board.
#[derive(Debug, Clone)]
pub struct SeededContent {
    state: u64,
    issued: HashSet<TileId>,
}

impl SeededContent {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed,
            issued: HashSet::new(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        splitmix64(self.state)
    }

    fn random_id(&mut self) -> TileId {
        let alphabet = TILE_ID_ALPHABET.as_bytes();
        let mut id = String::with_capacity(TILE_ID_LEN);
        let mut bits = self.next_u64();
        let mut remaining = 10;
        for _ in 0..TILE_ID_LEN {
            if remaining == 0 {
                bits = self.next_u64();
                remaining = 10;
            }
            id.push(alphabet[(bits & 63) as usize] as char);
            bits >>= 6;
            remaining -= 1;
        }
        TileId::new(id)
    }
}

impl TileContentProvider for SeededContent {
    fn next_id(&mut self) -> TileId {
        loop {
            let id = self.random_id();
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    fn text_for(&mut self, _coord: Coordinate) -> String {
        ((self.next_u64() >> 56) as u8).to_string()
    }
}
