//! Score counters fed by entity observer lists
//!
//! Entities subscribe to named channels rather than holding the counters
//! themselves, so a level copy never shares a counter with its source.

use serde::{Deserialize, Serialize};

/// A counter that is bumped when its publisher fires
pub trait Observer {
    fn update(&mut self);
    fn value(&self) -> u32;
}

/// Plain incrementing score counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreObserver {
    score: u32,
}

impl ScoreObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for ScoreObserver {
    fn update(&mut self) {
        self.score += 1;
    }

    fn value(&self) -> u32 {
        self.score
    }
}

/// Which counter on a level's scoreboard an entity reports to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreChannel {
    Red,
    Green,
    Blue,
    Total,
}

/// The four counters owned by a level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub red: ScoreObserver,
    pub green: ScoreObserver,
    pub blue: ScoreObserver,
    pub total: ScoreObserver,
}

impl Scoreboard {
    pub fn channel(&self, channel: ScoreChannel) -> &ScoreObserver {
        match channel {
            ScoreChannel::Red => &self.red,
            ScoreChannel::Green => &self.green,
            ScoreChannel::Blue => &self.blue,
            ScoreChannel::Total => &self.total,
        }
    }

    pub fn channel_mut(&mut self, channel: ScoreChannel) -> &mut ScoreObserver {
        match channel {
            ScoreChannel::Red => &mut self.red,
            ScoreChannel::Green => &mut self.green,
            ScoreChannel::Blue => &mut self.blue,
            ScoreChannel::Total => &mut self.total,
        }
    }

    pub fn notify(&mut self, channel: ScoreChannel) {
        self.channel_mut(channel).update();
    }
}
