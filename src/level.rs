// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// The description of a level: a board side and where its obstacles go. Coordinates are taken as
/// given; ones that do not fit the board are skipped when the board is built.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct LevelDescriptor {
    dimension: usize,
    #[serde(default, alias = "positions")]
    obstacles: Vec<(i64, i64)>,
}

impl LevelDescriptor {
    /// Describe a level with the provided side and obstacle coordinates.
    pub fn new<I: IntoIterator<Item = (i64, i64)>>(dimension: usize, obstacles: I) -> Self {
        Self {
            dimension,
            obstacles: obstacles.into_iter().collect(),
        }
    }

    /// The side of the board.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The obstacle coordinates, as given.
    pub fn obstacles(&self) -> &[(i64, i64)] {
        &self.obstacles
    }
}

#[cfg(test)]
mod test {
    use crate::LevelDescriptor;

    #[test]
    fn parse() -> Result<(), serde_json::Error> {
        let level: LevelDescriptor =
            serde_json::from_str(r#"{"dimension": 5, "positions": [[0, 0], [-2, 3]]}"#)?;
        assert_eq!(5, level.dimension());
        assert_eq!(&[(0, 0), (-2, 3)], level.obstacles());

        let bare: LevelDescriptor = serde_json::from_str(r#"{"dimension": 3}"#)?;
        assert_eq!(LevelDescriptor::new(3, []), bare);
        Ok(())
    }
}
