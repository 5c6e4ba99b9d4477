//! Player progression: credits, experience, levels, ranks.

use serde::{Deserialize, Serialize};

use skyward_core::constants::{LEVEL_RANKS, LEVEL_THRESHOLDS};

/// Engine-owned progression state, carried across respawns and saves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub credits: u32,
    pub experience: u32,
    pub level: u32,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            credits: 1000,
            experience: 0,
            level: 1,
        }
    }
}

impl PlayerProgress {
    /// Add experience and return the new level if one or more
    /// thresholds were crossed.
    pub fn add_experience(&mut self, amount: u32) -> Option<u32> {
        self.experience = self.experience.saturating_add(amount);
        let new_level = level_for_experience(self.experience);
        if new_level > self.level {
            self.level = new_level;
            Some(new_level)
        } else {
            None
        }
    }

    pub fn add_credits(&mut self, amount: u32) {
        self.credits = self.credits.saturating_add(amount);
    }

    /// Deduct the destruction penalty and return the amount taken.
    /// Only applies above the penalty floor.
    pub fn apply_death_penalty(&mut self) -> u32 {
        use skyward_core::constants::{
            DEATH_PENALTY_CAP, DEATH_PENALTY_FLOOR, DEATH_PENALTY_FRACTION,
        };
        if self.credits <= DEATH_PENALTY_FLOOR {
            return 0;
        }
        let penalty =
            ((self.credits as f64 * DEATH_PENALTY_FRACTION).floor() as u32).min(DEATH_PENALTY_CAP);
        self.credits -= penalty;
        penalty
    }

    pub fn rank(&self) -> &'static str {
        let index = (self.level as usize)
            .saturating_sub(1)
            .min(LEVEL_RANKS.len() - 1);
        LEVEL_RANKS[index]
    }
}

/// Highest level whose threshold the experience total meets.
fn level_for_experience(experience: u32) -> u32 {
    let mut level = 1;
    for (i, threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        if experience >= *threshold {
            level = i as u32 + 1;
        }
    }
    level
}
