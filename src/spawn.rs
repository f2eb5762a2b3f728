// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Random placement of the four tiles.

use crate::{Board, BoardValue, InvalidMoveError, Position, TileId};
use core::error::Error;
use core::fmt::{Display, Formatter};
use log::debug;
use rand::{Rng, RngCore};

/// A source of random indices. Any [`RngCore`] is one; tests may substitute a scripted sequence.
pub trait IndexSource {
    /// An index within `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R> IndexSource for R
where
    R: RngCore,
{
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// An error raised while placing the tiles.
#[derive(Debug)]
pub enum SpawnError<V> {
    /// Fewer than four cells are free of obstacles and tiles.
    InsufficientCells {
        /// The number of free cells.
        available: usize,
    },
    /// The board already holds the provided number of tiles.
    AlreadyPopulated(usize),
    /// A tile could not be placed.
    Placement(InvalidMoveError<V>),
}

impl<V> Display for SpawnError<V>
where
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SpawnError::InsufficientCells { available } => f.write_fmt(format_args!(
                "cannot place {} tiles with only {available} free cells",
                TileId::ALL.len()
            )),
            SpawnError::AlreadyPopulated(count) => f.write_fmt(format_args!(
                "cannot place tiles on a board which already holds {count}"
            )),
            SpawnError::Placement(e) => f.write_fmt(format_args!("could not place tile: {e}")),
        }
    }
}

impl<V> Error for SpawnError<V> where V: BoardValue {}

impl<V> From<InvalidMoveError<V>> for SpawnError<V> {
    fn from(e: InvalidMoveError<V>) -> Self {
        SpawnError::Placement(e)
    }
}

/// Place tiles 1 to 4 onto distinct cells picked uniformly at random among those free of
/// obstacles and tiles. On success, returns the position of each tile in identity order. On
/// failure, the board is left as it was.
pub fn spawn_tiles<V, S>(
    board: &mut Board<V>,
    source: &mut S,
) -> Result<[Position<V>; 4], SpawnError<V>>
where
    V: BoardValue,
    S: IndexSource + ?Sized,
{
    let existing = board.tile_count();
    if existing > 0 {
        return Err(SpawnError::AlreadyPopulated(existing));
    }
    let mut candidates = board.empty_cells();
    if candidates.len() < TileId::ALL.len() {
        return Err(SpawnError::InsufficientCells {
            available: candidates.len(),
        });
    }

    let mut next = board.clone();
    let mut placed = [candidates[0]; 4];
    for (slot, tile) in placed.iter_mut().zip(TileId::ALL) {
        let pick = source.next_index(candidates.len()) % candidates.len();
        let at = candidates.remove(pick);
        next.place_tile(at, tile)?;
        *slot = at;
    }
    *board = next;

    debug!("spawned tiles at {placed:?}");
    Ok(placed)
}
