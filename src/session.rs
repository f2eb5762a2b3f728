// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! A timed play-through of a single level.
//!
//! A [`Session`] is set up from a [`LevelDescriptor`] (obstacles placed, tiles spawned) and then
//! driven by its host: [`Session::resolve`] for every swipe, [`Session::tick`] for every frame,
//! or [`Session::step`] for both at once. Once the puzzle is solved or the time runs out the
//! session is over and ignores further input until [`Session::reset`].

use crate::{
    Board, BoardValue, DimensionError, Direction, Displacement, IndexSource, LevelDescriptor,
    Position, SpawnError, find_win, resolve, spawn_tiles,
};
use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Display, Formatter};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// The time, in host time units, a session grants by default.
pub const DEFAULT_TIME_BUDGET: f32 = 45.0;

/// Tunables for a session.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// The time available to solve the puzzle.
    pub time_budget: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }
}

/// Where a session stands. [`Status::Won`] and [`Status::Lost`] are final.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Status<V> {
    /// Moves and ticks are accepted.
    Playing,
    /// The puzzle was solved, with the solved block anchored at the provided position.
    Won(Position<V>),
    /// The time ran out.
    Lost,
}

impl<V> Status<V> {
    /// Whether the session is over.
    pub fn is_over(&self) -> bool {
        !matches!(self, Status::Playing)
    }
}

/// What a swipe or step did to a session.
#[derive(Clone, Debug, Serialize)]
pub struct Outcome<V> {
    displacements: Vec<Displacement<V>>,
    status: Status<V>,
}

impl<V> Outcome<V> {
    fn idle(status: Status<V>) -> Self {
        Self {
            displacements: Vec::new(),
            status,
        }
    }

    /// Whether any tile moved.
    pub fn moved(&self) -> bool {
        !self.displacements.is_empty()
    }

    /// The tiles that moved, for the host to animate.
    pub fn displacements(&self) -> &[Displacement<V>] {
        &self.displacements
    }

    /// The status of the session afterwards.
    pub fn status(&self) -> &Status<V> {
        &self.status
    }
}

/// An error which prevented a session from being set up.
#[derive(Debug)]
pub enum SessionError<V> {
    /// The level's board side is unsupported.
    Dimension(DimensionError),
    /// The tiles could not be placed.
    Spawn(SpawnError<V>),
}

impl<V> Display for SessionError<V>
where
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::Dimension(e) => f.write_fmt(format_args!("invalid level: {e}")),
            SessionError::Spawn(e) => f.write_fmt(format_args!("invalid level: {e}")),
        }
    }
}

impl<V> Error for SessionError<V>
where
    V: BoardValue,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SessionError::Dimension(e) => Some(e),
            SessionError::Spawn(e) => Some(e),
        }
    }
}

impl<V> From<DimensionError> for SessionError<V> {
    fn from(e: DimensionError) -> Self {
        SessionError::Dimension(e)
    }
}

impl<V> From<SpawnError<V>> for SessionError<V> {
    fn from(e: SpawnError<V>) -> Self {
        SessionError::Spawn(e)
    }
}

/// A play-through of one level, generic over the coordinate type `V` and the randomness `S`
/// used to place the tiles.
#[derive(Clone, Debug)]
pub struct Session<V, S> {
    level: LevelDescriptor,
    config: SessionConfig,
    source: S,
    board: Board<V>,
    status: Status<V>,
    remaining: f32,
}

impl<V, S> Session<V, S>
where
    V: BoardValue,
    S: IndexSource,
{
    /// Set up a session: build the board for `level` and place the tiles.
    pub fn new(
        level: LevelDescriptor,
        config: SessionConfig,
        mut source: S,
    ) -> Result<Self, SessionError<V>> {
        let board = Self::setup(&level, &mut source)?;
        info!(
            "session started on a {0}x{0} board with {1}s to go",
            level.dimension(),
            config.time_budget
        );
        Ok(Self {
            level,
            config,
            source,
            board,
            status: Status::Playing,
            remaining: config.time_budget,
        })
    }

    fn setup(level: &LevelDescriptor, source: &mut S) -> Result<Board<V>, SessionError<V>> {
        let mut board = Board::from_level(level)?;
        spawn_tiles(&mut board, source)?;
        Ok(board)
    }

    /// Start over on a fresh board for the same level, with a full time budget. If the new board
    /// cannot be set up, the session is left as it was.
    pub fn reset(&mut self) -> Result<(), SessionError<V>> {
        self.board = Self::setup(&self.level, &mut self.source)?;
        self.status = Status::Playing;
        self.remaining = self.config.time_budget;
        info!("session reset");
        Ok(())
    }

    /// Apply a swipe. While playing, every tile shifts by at most one cell and the board is
    /// checked for a solved block if anything moved. Once the session is over this does nothing.
    pub fn resolve(&mut self, dir: Direction) -> Outcome<V> {
        if self.status.is_over() {
            debug!("ignoring {dir}: session is over");
            return Outcome::idle(self.status);
        }
        let (board, displacements) = resolve(&self.board, dir).into_parts();
        if !displacements.is_empty() {
            self.board = board;
            if let Some(anchor) = find_win(&self.board) {
                info!("puzzle solved at {anchor} with {}s left", self.remaining);
                self.status = Status::Won(anchor);
            }
        }
        Outcome {
            displacements,
            status: self.status,
        }
    }

    /// Let `delta` time pass, returning the remaining time. The session is lost once the
    /// remaining time drops below zero. Once the session is over this does nothing.
    pub fn tick(&mut self, delta: f32) -> f32 {
        if self.status.is_over() {
            return self.remaining;
        }
        self.remaining -= delta;
        if self.remaining < 0.0 {
            info!("time is up");
            self.status = Status::Lost;
        }
        self.remaining
    }

    /// One host frame: the swipe (if any) is applied first, then the time. A swipe that solves
    /// the puzzle therefore wins even if the time runs out in the same frame.
    pub fn step(&mut self, delta: f32, swipe: Option<Direction>) -> Outcome<V> {
        let outcome = match swipe {
            Some(dir) => self.resolve(dir),
            None => Outcome::idle(self.status),
        };
        self.tick(delta);
        Outcome {
            status: self.status,
            ..outcome
        }
    }

    /// The current board.
    pub fn board(&self) -> &Board<V> {
        &self.board
    }

    /// The current status.
    pub fn status(&self) -> &Status<V> {
        &self.status
    }

    /// The time left.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// The level being played.
    pub fn level(&self) -> &LevelDescriptor {
        &self.level
    }

    /// The configuration of this session.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
