//! Session controller: the level sequence, level transitions and checkpoints

use thiserror::Error;

use crate::config::{ConfigError, LevelDescriptor};
use crate::save::LevelSnapshot;
use crate::sim::{Level, LevelFactory, Observer, ScoreObserver};
use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a session needs at least one level")]
    EmptySession,
    #[error("level {index} is invalid: {source}")]
    Level {
        index: usize,
        #[source]
        source: ConfigError,
    },
}

/// Outcome of one driver tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// The current level advanced by one frame
    Running,
    /// The previous level was finished; play moved on to `index`
    LevelAdvanced { index: usize },
    /// Every level is finished; nothing was updated
    SessionFinished,
}

#[derive(Debug, Clone)]
struct Checkpoint {
    snapshot: LevelSnapshot,
    level_index: usize,
}

#[derive(Debug)]
pub struct GameSession {
    levels: Vec<Level>,
    /// Untouched copies taken when the session started
    pristine: Vec<Level>,
    current: usize,
    finished: bool,
    checkpoint: Option<Checkpoint>,
}

impl GameSession {
    pub fn new(levels: Vec<Level>) -> Result<Self, SessionError> {
        if levels.is_empty() {
            return Err(SessionError::EmptySession);
        }
        let pristine = levels.clone();
        let mut session = Self {
            levels,
            pristine,
            current: 0,
            finished: false,
            checkpoint: None,
        };
        session.levels[0].adopt_total(ScoreObserver::new());
        Ok(session)
    }

    pub fn from_descriptors(descriptors: &[LevelDescriptor], tuning: &Tuning) -> Result<Self, SessionError> {
        let factory = LevelFactory::new(tuning);
        let levels = descriptors
            .iter()
            .enumerate()
            .map(|(index, desc)| {
                factory
                    .build(desc)
                    .map_err(|source| SessionError::Level { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(levels)
    }

    // === Queries ===

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current]
    }

    fn current_level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Running total across all levels played so far
    pub fn total(&self) -> ScoreObserver {
        *self.current_level().total()
    }

    pub fn total_score(&self) -> u32 {
        self.total().value()
    }

    pub fn has_checkpoint(&self) -> bool {
        self.checkpoint.is_some()
    }

    // === Commands ===

    pub fn move_left(&mut self) -> bool {
        self.current_level_mut().move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.current_level_mut().move_right()
    }

    pub fn boost_height(&mut self) -> bool {
        self.current_level_mut().boost_height()
    }

    pub fn drop_height(&mut self) -> bool {
        self.current_level_mut().drop_height()
    }

    pub fn request_hero_reset(&mut self) {
        self.current_level_mut().reset_hero();
    }

    /// Advance one frame, moving to the next level when the current one is done
    pub fn tick(&mut self) -> TickStatus {
        if self.finished {
            return TickStatus::SessionFinished;
        }

        let mut status = TickStatus::Running;
        if self.current_level().is_finished() {
            let next = self.current + 1;
            if next >= self.levels.len() {
                log::info!("all {} levels finished, total score {}", self.levels.len(), self.total_score());
                self.finished = true;
                return TickStatus::SessionFinished;
            }
            let total = self.total();
            self.current = next;
            self.current_level_mut().adopt_total(total);
            log::info!("starting level {} (total score {})", next + 1, total.value());
            status = TickStatus::LevelAdvanced { index: next };
        }

        self.current_level_mut().update();
        status
    }

    /// Remember the current level and the running total
    pub fn save_checkpoint(&mut self) {
        let level = self.current_level();
        self.checkpoint = Some(Checkpoint {
            snapshot: level.snapshot(),
            level_index: self.current,
        });
        log::info!("checkpoint saved at level {}", self.current + 1);
    }

    /// Roll back to the last checkpoint; false if none was saved
    ///
    /// Levels before the checkpoint keep their current progress: a completed
    /// level is never replayed, so it has nothing to roll back. The
    /// checkpointed level comes from its snapshot and every later level
    /// starts over from its pristine copy.
    pub fn restore_checkpoint(&mut self) -> bool {
        let Some(checkpoint) = &self.checkpoint else {
            log::warn!("no checkpoint to restore");
            return false;
        };
        let k = checkpoint.level_index;
        let mut restored = checkpoint.snapshot.restore();
        let total = checkpoint.snapshot.total();
        restored.adopt_total(total);

        let levels: Vec<Level> = self
            .levels
            .drain(..k)
            .chain(std::iter::once(restored))
            .chain(self.pristine[k + 1..].iter().cloned())
            .collect();
        self.levels = levels;
        self.current = k;
        self.finished = false;
        log::info!("checkpoint restored at level {} (total score {})", k + 1, total.value());
        true
    }
}
