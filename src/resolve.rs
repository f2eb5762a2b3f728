// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Move resolution. A swipe shifts every tile by at most one cell; tiles nearer the edge being
//! swiped towards move first, so the tiles behind them may follow into the cells they vacate.

use crate::{Board, BoardValue, Dimension, Direction, Position, TileId, position};
use alloc::vec::Vec;
use log::debug;
use serde::Serialize;

/// A tile which changed cell during a resolution.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Displacement<V> {
    tile: TileId,
    from: Position<V>,
    to: Position<V>,
}

impl<V> Displacement<V> {
    /// The tile that moved.
    pub fn tile(&self) -> TileId {
        self.tile
    }

    /// Where the tile was before the swipe.
    pub fn from(&self) -> &Position<V> {
        &self.from
    }

    /// Where the tile is after the swipe.
    pub fn to(&self) -> &Position<V> {
        &self.to
    }
}

/// The result of resolving a swipe: the new board and the tiles that moved to produce it.
#[derive(Clone, Debug)]
pub struct Resolution<V> {
    board: Board<V>,
    displacements: Vec<Displacement<V>>,
}

impl<V> Resolution<V> {
    /// Whether any tile changed cell.
    pub fn moved(&self) -> bool {
        !self.displacements.is_empty()
    }

    /// The board after the swipe.
    pub fn board(&self) -> &Board<V> {
        &self.board
    }

    /// The moved tiles, in the order they were resolved.
    pub fn displacements(&self) -> &[Displacement<V>] {
        &self.displacements
    }

    /// Split into the new board and the displacements.
    pub fn into_parts(self) -> (Board<V>, Vec<Displacement<V>>) {
        (self.board, self.displacements)
    }
}

fn flip(i: usize, n: usize, reverse: bool) -> usize {
    if reverse { n - 1 - i } else { i }
}

/// Visit order for a swipe: `x` in the outer loop, `y` in the inner one, each running from the
/// edge the tiles travel towards.
fn sweep<V: BoardValue>(
    dim: &Dimension<V>,
    dir: Direction,
) -> impl Iterator<Item = Position<V>> + use<V> {
    let n = dim.side_len();
    let rev_x = dir == Direction::Right;
    let rev_y = dir == Direction::Up;
    (0..n)
        .flat_map(move |i| (0..n).map(move |j| (flip(i, n, rev_x), flip(j, n, rev_y))))
        .filter_map(|(x, y)| position(x, y))
}

/// Resolve a swipe in `dir` against `board`, returning the resulting board. Every tile
/// advances one cell if that cell is inside the board, is not an obstacle, and is free after
/// the tiles ahead of it have moved; otherwise it stays. `board` itself is left untouched.
pub fn resolve<V: BoardValue>(board: &Board<V>, dir: Direction) -> Resolution<V> {
    let mut next = board.clone();
    let mut displacements = Vec::new();
    for from in sweep(board.dimension(), dir) {
        if next.tile_at(from).is_none() {
            continue;
        }
        let Some(to) = from.shift(dir, V::one()) else {
            continue;
        };
        if let Ok(tile) = next.move_tile(from, to) {
            displacements.push(Displacement { tile, from, to });
        }
    }
    debug!("resolved {dir}: {} tile(s) moved", displacements.len());
    Resolution {
        board: next,
        displacements,
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use crate::{
        Board, Dimension, Direction, LevelDescriptor, Position, TileId, resolve, spawn_tiles,
    };
    use alloc::boxed::Box;
    use alloc::vec::Vec;
    use core::error::Error;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::println;

    fn corners() -> Result<Board<u8>, Box<dyn Error>> {
        let mut board = Board::empty(Dimension::new(4u8)?);
        board.place_tile((0, 0), TileId::ONE)?;
        board.place_tile((3, 0), TileId::TWO)?;
        board.place_tile((0, 3), TileId::THREE)?;
        board.place_tile((3, 3), TileId::FOUR)?;
        Ok(board)
    }

    #[test]
    fn single_step_right() -> Result<(), Box<dyn Error>> {
        let board = corners()?;
        println!("{board}");
        let resolution = resolve(&board, Direction::Right);
        println!("{}", resolution.board());

        assert!(resolution.moved());
        let next = resolution.board();
        assert_eq!(Some(TileId::ONE), next.tile_at((1, 0)));
        assert_eq!(Some(TileId::TWO), next.tile_at((3, 0)));
        assert_eq!(Some(TileId::THREE), next.tile_at((1, 3)));
        assert_eq!(Some(TileId::FOUR), next.tile_at((3, 3)));

        let moved: Vec<_> = resolution
            .displacements()
            .iter()
            .map(|d| (d.tile(), *d.from(), *d.to()))
            .collect();
        assert_eq!(
            &[
                (TileId::ONE, Position::from((0, 0)), Position::from((1, 0))),
                (TileId::THREE, Position::from((0, 3)), Position::from((1, 3))),
            ],
            moved.as_slice()
        );

        // the input board is not touched
        assert_eq!(corners()?, board);
        Ok(())
    }

    #[test]
    fn trailing_tiles_follow() -> Result<(), Box<dyn Error>> {
        let mut board = Board::empty(Dimension::new(4u8)?);
        board.place_tile((0, 0), TileId::ONE)?;
        board.place_tile((0, 1), TileId::TWO)?;
        board.place_tile((0, 2), TileId::THREE)?;

        let (next, displacements) = resolve(&board, Direction::Up).into_parts();
        let order: Vec<_> = displacements.iter().map(|d| d.tile()).collect();
        assert_eq!(&[TileId::THREE, TileId::TWO, TileId::ONE], order.as_slice());
        assert_eq!(None, next.tile_at((0, 0)));
        assert_eq!(Some(TileId::ONE), next.tile_at((0, 1)));
        assert_eq!(Some(TileId::TWO), next.tile_at((0, 2)));
        assert_eq!(Some(TileId::THREE), next.tile_at((0, 3)));

        // the column is packed against the wall now
        let again = resolve(&next, Direction::Up);
        assert!(!again.moved());
        assert_eq!(&next, again.board());
        Ok(())
    }

    #[test]
    fn trailing_tiles_follow_every_direction() -> Result<(), Box<dyn Error>> {
        let cases: [(Direction, [(u8, u8); 3]); 4] = [
            (Direction::Right, [(0, 1), (1, 1), (2, 1)]),
            (Direction::Left, [(3, 1), (2, 1), (1, 1)]),
            (Direction::Down, [(1, 3), (1, 2), (1, 1)]),
            (Direction::Up, [(1, 0), (1, 1), (1, 2)]),
        ];
        for (direction, cells) in cases {
            let mut board = Board::empty(Dimension::new(4u8)?);
            for (cell, tile) in cells.into_iter().zip(TileId::ALL) {
                board.place_tile(cell, tile)?;
            }
            println!("before {direction}:\n{board}");

            let (dx, dy) = direction.delta();
            let next = resolve(&board, direction).into_parts().0;
            println!("after {direction}:\n{next}");
            for ((x, y), tile) in cells.into_iter().zip(TileId::ALL) {
                let to = (x.wrapping_add_signed(dx), y.wrapping_add_signed(dy));
                assert_eq!(Some(tile), next.tile_at(to), "{tile} after {direction}");
            }
            assert_eq!(None, next.tile_at(cells[0]));
            assert_eq!(3, next.tile_count());
        }
        Ok(())
    }

    #[test]
    fn obstacles_block() -> Result<(), Box<dyn Error>> {
        let mut board = Board::<u8>::from_level(&LevelDescriptor::new(3, [(1, 1)]))?;
        board.place_tile((0, 1), TileId::ONE)?;
        board.place_tile((2, 1), TileId::TWO)?;
        board.place_tile((1, 0), TileId::THREE)?;

        let right = resolve(&board, Direction::Right);
        assert_eq!(Some(TileId::ONE), right.board().tile_at((0, 1)));
        assert_eq!(Some(TileId::TWO), right.board().tile_at((2, 1)));
        assert_eq!(Some(TileId::THREE), right.board().tile_at((2, 0)));
        assert_eq!(1, right.displacements().len());

        let left = resolve(&board, Direction::Left);
        assert_eq!(Some(TileId::ONE), left.board().tile_at((0, 1)));
        assert_eq!(Some(TileId::TWO), left.board().tile_at((2, 1)));
        assert_eq!(Some(TileId::THREE), left.board().tile_at((0, 0)));

        let up = resolve(&board, Direction::Up);
        assert_eq!(Some(TileId::THREE), up.board().tile_at((1, 0)));
        assert_eq!(2, up.displacements().len());
        Ok(())
    }

    #[test]
    fn no_op_is_idempotent() -> Result<(), Box<dyn Error>> {
        let mut board = Board::empty(Dimension::new(3u8)?);
        board.place_tile((0, 0), TileId::ONE)?;
        board.place_tile((0, 1), TileId::TWO)?;
        board.place_tile((0, 2), TileId::THREE)?;
        board.place_tile((1, 0), TileId::FOUR)?;

        let first = resolve(&board, Direction::Left);
        assert!(!first.moved());
        assert_eq!(&board, first.board());
        let second = resolve(first.board(), Direction::Left);
        assert!(!second.moved());
        assert_eq!(&board, second.board());
        Ok(())
    }

    #[test]
    fn random_boards_keep_invariants() -> Result<(), Box<dyn Error>> {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let side = rng.random_range(2..=8usize);
            let obstacles: Vec<(i64, i64)> = (0..rng.random_range(0..=side * side - 4))
                .map(|_| {
                    (
                        rng.random_range(0..side as i64),
                        rng.random_range(0..side as i64),
                    )
                })
                .collect();
            let mut board = Board::<u8>::from_level(&LevelDescriptor::new(side, obstacles))?;
            if spawn_tiles(&mut board, &mut rng).is_err() {
                continue;
            }

            for _ in 0..20 {
                let dir = Direction::ALL[rng.random_range(0..4)];
                let resolution = resolve(&board, dir);
                let next = resolution.board();

                assert_eq!(4, next.tile_count());
                for tile in TileId::ALL {
                    let at = next.find(tile).ok_or("tile lost")?;
                    assert!(!next.is_obstacle(at));
                }
                for d in resolution.displacements() {
                    assert_eq!(Some(*d.to()), d.from().shift(dir, 1));
                    assert_eq!(Some(d.tile()), next.tile_at(*d.to()));
                }
                for (at, tile) in board.tiles() {
                    if !resolution.displacements().iter().any(|d| d.tile() == tile) {
                        assert_eq!(Some(tile), next.tile_at(at));
                    }
                }
                if !resolution.moved() {
                    assert_eq!(&board, next);
                }
                board = resolution.into_parts().0;
            }
        }
        Ok(())
    }
}
