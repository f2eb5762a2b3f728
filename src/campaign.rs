// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

use crate::{BoardValue, IndexSource, LevelDescriptor, Session, SessionConfig, SessionError};
use alloc::vec::Vec;

/// An ordered, non-empty list of levels with a cursor on the one being played.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    levels: Vec<LevelDescriptor>,
    current: usize,
}

impl Campaign {
    /// A campaign starting at the first of `levels`, or [`None`] if there are no levels.
    pub fn new<I: IntoIterator<Item = LevelDescriptor>>(levels: I) -> Option<Self> {
        let levels: Vec<_> = levels.into_iter().collect();
        if levels.is_empty() {
            None
        } else {
            Some(Self { levels, current: 0 })
        }
    }

    /// Every level, in order.
    pub fn levels(&self) -> &[LevelDescriptor] {
        &self.levels
    }

    /// The index of the current level.
    pub fn index(&self) -> usize {
        self.current
    }

    /// The current level.
    pub fn current(&self) -> &LevelDescriptor {
        &self.levels[self.current]
    }

    /// Jump to the level at `index`, or [`None`] (leaving the cursor alone) if there is none.
    pub fn select(&mut self, index: usize) -> Option<&LevelDescriptor> {
        if index < self.levels.len() {
            self.current = index;
            Some(self.current())
        } else {
            None
        }
    }

    /// Move on to the next level, wrapping around to the first after the last.
    pub fn advance(&mut self) -> &LevelDescriptor {
        self.current = (self.current + 1) % self.levels.len();
        self.current()
    }

    /// Go back to the first level.
    pub fn home(&mut self) -> &LevelDescriptor {
        self.current = 0;
        self.current()
    }

    /// Set up a session on the current level.
    pub fn start<V, S>(
        &self,
        config: SessionConfig,
        source: S,
    ) -> Result<Session<V, S>, SessionError<V>>
    where
        V: BoardValue,
        S: IndexSource,
    {
        Session::new(self.current().clone(), config, source)
    }
}

#[cfg(test)]
mod test {
    use crate::testing::Scripted;
    use crate::{Campaign, LevelDescriptor, SessionConfig, Status};
    use alloc::boxed::Box;
    use alloc::vec::Vec;
    use core::error::Error;

    fn levels() -> Result<Vec<LevelDescriptor>, serde_json::Error> {
        serde_json::from_str(
            r#"[
                {"dimension": 3},
                {"dimension": 4, "obstacles": [[1, 1], [2, 2]]},
                {"dimension": 5, "positions": [[0, 4], [4, 0], [9, 9]]}
            ]"#,
        )
    }

    #[test]
    fn cursor() -> Result<(), Box<dyn Error>> {
        assert!(Campaign::new([]).is_none());

        let mut campaign = Campaign::new(levels()?).ok_or("no levels")?;
        assert_eq!(0, campaign.index());
        assert_eq!(3, campaign.current().dimension());

        assert_eq!(4, campaign.advance().dimension());
        assert_eq!(5, campaign.advance().dimension());
        assert_eq!(3, campaign.advance().dimension());
        assert_eq!(0, campaign.index());

        assert_eq!(Some(5), campaign.select(2).map(|l| l.dimension()));
        assert_eq!(None, campaign.select(3));
        assert_eq!(2, campaign.index());

        assert_eq!(3, campaign.home().dimension());
        assert_eq!(0, campaign.index());
        Ok(())
    }

    #[test]
    fn start() -> Result<(), Box<dyn Error>> {
        let mut campaign = Campaign::new(levels()?).ok_or("no levels")?;
        campaign.select(2);
        let session = campaign.start::<u8, _>(SessionConfig::default(), Scripted::new([7, 1]))?;
        assert_eq!(&Status::Playing, session.status());
        assert!(session.board().is_obstacle((0, 4)));
        assert!(session.board().is_obstacle((4, 0)));
        assert_eq!(19, session.board().empty_cells().len());
        Ok(())
    }
}
