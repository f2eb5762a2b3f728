// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! quad-slide: the grid engine behind a four-tile sliding block puzzle.
//!
//! Four tiles, numbered 1 to 4, sit on a square grid dotted with fixed obstacles. Every swipe
//! shifts each tile _one_ cell in the swiped direction, provided the cell ahead is inside the
//! board, is not an obstacle, and is free once the tiles ahead of it have moved. The puzzle is
//! solved when the tiles form the block
//!
//! ```text
//! 3 4
//! 1 2
//! ```
//!
//! with `y` growing upwards. This library implements the board, move resolution, win detection,
//! random tile placement, and a timed session wrapping them; rendering, animation and input
//! capture are left to the user.
//!
//! ```
//! use quad_slide::{Direction, LevelDescriptor, Session, SessionConfig, Status};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let level = LevelDescriptor::new(4, [(1, 1), (2, 2)]);
//! let mut session =
//!     Session::<u8, _>::new(level, SessionConfig::default(), SmallRng::seed_from_u64(7)).unwrap();
//! let outcome = session.resolve(Direction::Left);
//! for displacement in outcome.displacements() {
//!     // animate displacement.from() -> displacement.to()
//!     let _ = displacement;
//! }
//! assert!(matches!(outcome.status(), Status::Playing | Status::Won(_)));
//! ```

#![no_std]

use core::error::Error;
use core::fmt::{Debug, Display, Formatter};
use core::num::NonZeroU8;
use core::ops::{Add, Neg, Sub};
use num_traits::{CheckedAdd, CheckedSub, One, Unsigned, Zero};
use serde::{Deserialize, Serialize};

extern crate alloc;

mod board;
mod campaign;
mod level;
mod resolve;
mod session;
mod spawn;
mod win;

pub use board::{Board, InvalidLevelPosition, InvalidMoveError, InvalidMoveType};
pub use campaign::Campaign;
pub use level::LevelDescriptor;
pub use resolve::{Displacement, Resolution, resolve};
pub use session::{DEFAULT_TIME_BUDGET, Outcome, Session, SessionConfig, SessionError, Status};
pub use spawn::{IndexSource, SpawnError, spawn_tiles};
pub use win::find_win;

/// The smallest supported board side.
pub const MIN_DIMENSION: usize = 2;
/// The largest supported board side.
pub const MAX_DIMENSION: usize = 8;
/// The usual minimum swipe length to pass to [`Direction::from_swipe`].
pub const MIN_SWIPE_DISTANCE: f32 = 50.0;

/// A direction for a swipe. A direction may be flipped with [`Neg`] (i.e. `-`).
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Direction {
    /// Towards larger `y`.
    Up,
    /// Towards smaller `y`.
    Down,
    /// Towards smaller `x`.
    Left,
    /// Towards larger `x`.
    Right,
}

impl Direction {
    /// Every direction, in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The unit vector `(dx, dy)` of this direction.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Classify a raw swipe vector by its dominant axis. Swipes shorter than `min_distance`
    /// yield [`None`]; ties between the axes resolve vertically.
    pub fn from_swipe(dx: f32, dy: f32, min_distance: f32) -> Option<Self> {
        let magnitude = |v: f32| if v < 0.0 { -v } else { v };
        let (ax, ay) = (magnitude(dx), magnitude(dy));
        if ax.max(ay) < min_distance {
            // both components are below the threshold, so the scaled squares stay finite
            let (rx, ry) = (ax / min_distance, ay / min_distance);
            if rx * rx + ry * ry < 1.0 {
                return None;
            }
        }
        Some(if ax > ay {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

impl Neg for Direction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Marker trait: specifies that a value may be used for board coordinates.
pub trait BoardValue:
    One
    + Ord
    + Add<Output = Self>
    + CheckedAdd
    + Sub<Output = Self>
    + CheckedSub
    + Copy
    + Into<usize>
    + TryFrom<usize>
    + Zero
    + Debug
    + Display
    + Unsigned
    + Serialize
    + 'static
{
}

impl<V> BoardValue for V where
    V: One
        + Ord
        + Add<Output = Self>
        + CheckedAdd
        + Sub<Output = Self>
        + CheckedSub
        + Copy
        + Into<usize>
        + TryFrom<usize>
        + Zero
        + Debug
        + Display
        + Unsigned
        + Serialize
        + 'static
{
}

/// The identity of one of the four tiles.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize)]
pub struct TileId(NonZeroU8);

impl TileId {
    /// Tile 1, bottom left of the solved block.
    pub const ONE: TileId = TileId::of(1);
    /// Tile 2, bottom right of the solved block.
    pub const TWO: TileId = TileId::of(2);
    /// Tile 3, top left of the solved block.
    pub const THREE: TileId = TileId::of(3);
    /// Tile 4, top right of the solved block.
    pub const FOUR: TileId = TileId::of(4);

    /// All four identities in spawn order.
    pub const ALL: [TileId; 4] = [TileId::ONE, TileId::TWO, TileId::THREE, TileId::FOUR];

    const fn of(n: u8) -> Self {
        match NonZeroU8::new(n) {
            Some(n) => TileId(n),
            None => panic!("tile identities start at one"),
        }
    }

    /// The tile numbered `n`, or [`None`] if `n` is not within `1..=4`.
    pub fn new(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// The number printed on this tile.
    pub fn get(self) -> u8 {
        self.0.get()
    }
}

impl Display for TileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A position in the board (eff., a coordinate pair). `x` grows to the right, `y` grows upwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Position<V> {
    x: V,
    y: V,
}

impl<V> Position<V> {
    /// The column of the position.
    pub fn x(&self) -> &V {
        &self.x
    }

    /// The row of the position.
    pub fn y(&self) -> &V {
        &self.y
    }
}

impl<V> Add for Position<V>
where
    V: BoardValue,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<V> CheckedAdd for Position<V>
where
    V: BoardValue,
{
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(&rhs.x)?,
            y: self.y.checked_add(&rhs.y)?,
        })
    }
}

impl<V> Sub for Position<V>
where
    V: BoardValue,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<V> CheckedSub for Position<V>
where
    V: BoardValue,
{
    fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        Some(Self {
            x: self.x.checked_sub(&rhs.x)?,
            y: self.y.checked_sub(&rhs.y)?,
        })
    }
}

impl<V> Position<V>
where
    V: BoardValue,
{
    /// The position encoded as an index into a board with the provided dimension.
    pub fn as_index(&self, dim: &Dimension<V>) -> Option<usize> {
        if self.x >= dim.side || self.y >= dim.side {
            return None;
        }
        let x: usize = self.x.into();
        let y: usize = self.y.into();
        Some(y * dim.side_len() + x)
    }

    /// Get the position `by` units away from this position in the provided direction `dir`, or
    /// `None` if the coordinate would underflow or overflow. The result may still lie outside
    /// of a given board; check it with [`Position::as_index`].
    pub fn shift(&self, dir: Direction, by: V) -> Option<Self> {
        match dir {
            Direction::Up => self.checked_add(&Self::from((V::zero(), by))),
            Direction::Down => self.checked_sub(&Self::from((V::zero(), by))),
            Direction::Left => self.checked_sub(&Self::from((by, V::zero()))),
            Direction::Right => self.checked_add(&Self::from((by, V::zero()))),
        }
    }
}

impl<V> From<(V, V)> for Position<V> {
    fn from((x, y): (V, V)) -> Self {
        Self { x, y }
    }
}

impl<V> Display for Position<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("({}, {})", self.x, self.y))
    }
}

/// Build a position from raw indices, or [`None`] if they do not fit into `V`.
pub(crate) fn position<V: BoardValue>(x: usize, y: usize) -> Option<Position<V>> {
    Some(Position {
        x: V::try_from(x).ok()?,
        y: V::try_from(y).ok()?,
    })
}

/// The side length of a square board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Dimension<V> {
    side: V,
}

impl<V> Dimension<V> {
    /// The number of cells along each side.
    pub fn side(&self) -> &V {
        &self.side
    }
}

impl<V> Dimension<V>
where
    V: BoardValue,
{
    /// A square dimension with the provided side, which must lie within
    /// [`MIN_DIMENSION`]`..=`[`MAX_DIMENSION`].
    pub fn new(side: V) -> Result<Self, DimensionError> {
        let len: usize = side.into();
        if (MIN_DIMENSION..=MAX_DIMENSION).contains(&len) {
            Ok(Self { side })
        } else {
            Err(DimensionError::new(len))
        }
    }

    /// The side as a [`usize`].
    pub fn side_len(&self) -> usize {
        self.side.into()
    }

    /// The number of cells in the board.
    pub fn area(&self) -> usize {
        self.side_len() * self.side_len()
    }

    /// Every position of the board, columns first: `x` ascending in the outer loop, `y`
    /// ascending in the inner one.
    pub fn cells(&self) -> impl Iterator<Item = Position<V>> + use<V> {
        let n = self.side_len();
        (0..n)
            .flat_map(move |x| (0..n).map(move |y| (x, y)))
            .filter_map(|(x, y)| position(x, y))
    }
}

/// An error associated with the creation of a [`Dimension`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DimensionError {
    side: usize,
}

impl DimensionError {
    pub(crate) fn new(side: usize) -> Self {
        Self { side }
    }

    /// The side length that was rejected.
    pub fn side(&self) -> usize {
        self.side
    }
}

impl Display for DimensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!(
            "a board side of {} could not be used: sides must be within {MIN_DIMENSION}..={MAX_DIMENSION}",
            self.side
        ))
    }
}

impl Error for DimensionError {}
