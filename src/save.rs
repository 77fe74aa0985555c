//! In-memory level snapshots (memento)
//!
//! A snapshot owns a private deep copy of a level. Restoring hands out a
//! fresh copy every time, so play after a restore never alters the snapshot.

use crate::sim::{Level, ScoreObserver};

#[derive(Debug, Clone)]
pub struct LevelSnapshot {
    level: Level,
}

impl LevelSnapshot {
    pub(crate) fn capture(level: &Level) -> Self {
        Self {
            level: level.clone(),
        }
    }

    pub fn restore(&self) -> Level {
        self.level.clone()
    }

    /// Running total recorded at capture time
    pub fn total(&self) -> ScoreObserver {
        *self.level.total()
    }
}
