// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! The board: obstacle layout and tile occupancy.

use crate::{BoardValue, Dimension, DimensionError, LevelDescriptor, Position, TileId, position};
use alloc::vec;
use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Display, Formatter};
use log::warn;
use serde::Serialize;

/// The type of invalid mutation that was observed in an [`InvalidMoveError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InvalidMoveType {
    /// There is no tile at the position to move or remove.
    NoTile,
    /// The position is outside of the board.
    OutOfBounds,
    /// The position is an obstacle.
    Obstacle,
    /// The position is already occupied by the provided tile.
    Occupied(TileId),
    /// The provided tile is already somewhere else on the board.
    Duplicate(TileId),
}

/// An error which describes an attempted invalid mutation of a [`Board`].
#[derive(Copy, Clone, Debug)]
pub struct InvalidMoveError<V> {
    position: Position<V>,
    variant: InvalidMoveType,
}

impl<V> InvalidMoveError<V> {
    /// The position at which the mutation was rejected.
    pub fn position(&self) -> &Position<V> {
        &self.position
    }

    /// Why the mutation was rejected.
    pub fn variant(&self) -> InvalidMoveType {
        self.variant
    }
}

impl<V> Display for InvalidMoveError<V>
where
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let at = &self.position;
        match self.variant {
            InvalidMoveType::NoTile => f.write_fmt(format_args!("there is no tile at {at}")),
            InvalidMoveType::OutOfBounds => {
                f.write_fmt(format_args!("{at} lies outside of the board"))
            }
            InvalidMoveType::Obstacle => f.write_fmt(format_args!("{at} is an obstacle")),
            InvalidMoveType::Occupied(tile) => {
                f.write_fmt(format_args!("{at} is already occupied by tile {tile}"))
            }
            InvalidMoveType::Duplicate(tile) => f.write_fmt(format_args!(
                "cannot place tile {tile} at {at} because it is already on the board"
            )),
        }
    }
}

impl<V> Error for InvalidMoveError<V> where V: BoardValue {}

/// An obstacle coordinate from a level which does not lie within the board. These are skipped
/// while building the board and never surfaced to callers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InvalidLevelPosition {
    x: i64,
    y: i64,
    side: usize,
}

impl Display for InvalidLevelPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!(
            "obstacle at ({}, {}) does not fit a {}x{} board",
            self.x, self.y, self.side, self.side
        ))
    }
}

impl Error for InvalidLevelPosition {}

/// A square grid holding fixed obstacles and up to four uniquely numbered tiles. Cells are
/// stored row by row, starting from `y = 0`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Board<V> {
    dim: Dimension<V>,
    obstacles: Vec<bool>,
    tiles: Vec<Option<TileId>>,
}

impl<V> Board<V>
where
    V: BoardValue,
{
    /// Produce an empty board (i.e., one with no obstacles or tiles) with the provided dimension.
    pub fn empty(dim: Dimension<V>) -> Self {
        let area = dim.area();
        Self {
            dim,
            obstacles: vec![false; area],
            tiles: vec![None; area],
        }
    }

    /// Produce a board with the obstacles of `level` and no tiles. Obstacle positions outside
    /// of the board are skipped.
    pub fn from_level(level: &LevelDescriptor) -> Result<Self, DimensionError> {
        let side = V::try_from(level.dimension())
            .map_err(|_| DimensionError::new(level.dimension()))?;
        let mut board = Self::empty(Dimension::new(side)?);
        for &(x, y) in level.obstacles() {
            if let Err(e) = board.add_obstacle(x, y) {
                warn!("skipping obstacle: {e}");
            }
        }
        Ok(board)
    }

    fn add_obstacle(&mut self, x: i64, y: i64) -> Result<(), InvalidLevelPosition> {
        let idx = usize::try_from(x)
            .ok()
            .zip(usize::try_from(y).ok())
            .and_then(|(x, y)| position::<V>(x, y))
            .and_then(|p| p.as_index(&self.dim))
            .ok_or(InvalidLevelPosition {
                x,
                y,
                side: self.dim.side_len(),
            })?;
        self.obstacles[idx] = true;
        Ok(())
    }

    /// The dimension of this board.
    pub fn dimension(&self) -> &Dimension<V> {
        &self.dim
    }

    /// Whether the position lies within the board.
    pub fn contains<P: Into<Position<V>>>(&self, position: P) -> bool {
        position.into().as_index(&self.dim).is_some()
    }

    /// Whether the position holds an obstacle. Positions outside of the board are not obstacles.
    pub fn is_obstacle<P: Into<Position<V>>>(&self, position: P) -> bool {
        position
            .into()
            .as_index(&self.dim)
            .is_some_and(|idx| self.obstacles[idx])
    }

    /// The tile at the position, if any.
    pub fn tile_at<P: Into<Position<V>>>(&self, position: P) -> Option<TileId> {
        position
            .into()
            .as_index(&self.dim)
            .and_then(|idx| self.tiles[idx])
    }

    /// Where the provided tile currently sits, if it is on the board.
    pub fn find(&self, tile: TileId) -> Option<Position<V>> {
        self.tiles().find_map(|(p, t)| (t == tile).then_some(p))
    }

    /// Every tile on the board with its position, row by row from `y = 0`.
    pub fn tiles(&self) -> impl Iterator<Item = (Position<V>, TileId)> + '_ {
        let n = self.dim.side_len();
        self.tiles.iter().enumerate().filter_map(move |(idx, tile)| {
            let tile = (*tile)?;
            Some((position(idx % n, idx / n)?, tile))
        })
    }

    /// The number of tiles on the board.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().flatten().count()
    }

    /// Cells which hold neither an obstacle nor a tile, columns first (see
    /// [`Dimension::cells`]).
    pub fn empty_cells(&self) -> Vec<Position<V>> {
        self.dim
            .cells()
            .filter(|&p| !self.is_obstacle(p) && self.tile_at(p).is_none())
            .collect()
    }

    /// Remove every tile, keeping the obstacles.
    pub fn clear_tiles(&mut self) {
        self.tiles.fill(None);
    }

    fn index_of(&self, position: Position<V>) -> Result<usize, InvalidMoveError<V>> {
        position.as_index(&self.dim).ok_or(InvalidMoveError {
            position,
            variant: InvalidMoveType::OutOfBounds,
        })
    }

    fn vacant_index(&self, position: Position<V>) -> Result<usize, InvalidMoveError<V>> {
        let idx = self.index_of(position)?;
        let variant = if self.obstacles[idx] {
            InvalidMoveType::Obstacle
        } else if let Some(tile) = self.tiles[idx] {
            InvalidMoveType::Occupied(tile)
        } else {
            return Ok(idx);
        };
        Err(InvalidMoveError { position, variant })
    }

    /// Place a tile onto a free cell.
    pub fn place_tile<P: Into<Position<V>>>(
        &mut self,
        position: P,
        tile: TileId,
    ) -> Result<(), InvalidMoveError<V>> {
        let position = position.into();
        let idx = self.vacant_index(position)?;
        if self.tiles.contains(&Some(tile)) {
            return Err(InvalidMoveError {
                position,
                variant: InvalidMoveType::Duplicate(tile),
            });
        }
        self.tiles[idx] = Some(tile);
        Ok(())
    }

    /// Remove and return the tile at the position.
    pub fn remove_tile<P: Into<Position<V>>>(
        &mut self,
        position: P,
    ) -> Result<TileId, InvalidMoveError<V>> {
        let position = position.into();
        let idx = self.index_of(position)?;
        self.tiles[idx].take().ok_or(InvalidMoveError {
            position,
            variant: InvalidMoveType::NoTile,
        })
    }

    /// Move the tile at `from` onto the free cell `to`, returning the moved tile. The cells need
    /// not be adjacent.
    pub fn move_tile<P: Into<Position<V>>, Q: Into<Position<V>>>(
        &mut self,
        from: P,
        to: Q,
    ) -> Result<TileId, InvalidMoveError<V>> {
        let from = from.into();
        let src = self.index_of(from)?;
        let tile = self.tiles[src].ok_or(InvalidMoveError {
            position: from,
            variant: InvalidMoveType::NoTile,
        })?;
        let dst = self.vacant_index(to.into())?;
        self.tiles[src] = None;
        self.tiles[dst] = Some(tile);
        Ok(tile)
    }
}

impl<V> Display for Board<V>
where
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let n = self.dim.side_len();
        for y in (0..n).rev() {
            for x in 0..n {
                let idx = y * n + x;
                if self.obstacles[idx] {
                    write!(f, "#")?;
                } else if let Some(tile) = self.tiles[idx] {
                    write!(f, "{tile}")?;
                } else {
                    write!(f, ".")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
