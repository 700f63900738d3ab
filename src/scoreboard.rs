//! Round wins per player for the current match

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Scoreboard {
    /// Player id -> rounds won
    pub wins: BTreeMap<u32, u32>,
    pub rounds_played: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished round. `None` is a round nobody survived.
    /// Returns the winner's new total.
    pub fn record_round(&mut self, winner: Option<u32>) -> Option<u32> {
        self.rounds_played += 1;
        let id = winner?;
        let total = self.wins.entry(id).or_insert(0);
        *total += 1;
        Some(*total)
    }

    pub fn record_win(&mut self, player: u32) -> u32 {
        self.record_round(Some(player)).unwrap_or_default()
    }

    pub fn wins(&self, player: u32) -> u32 {
        self.wins.get(&player).copied().unwrap_or(0)
    }

    /// Player with the most wins; ties go to the lower id
    pub fn leader(&self) -> Option<u32> {
        self.wins
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(id, _)| *id)
    }

    /// First player to reach `rounds_to_win`
    pub fn champion(&self, rounds_to_win: u32) -> Option<u32> {
        self.wins
            .iter()
            .find(|(_, wins)| **wins >= rounds_to_win)
            .map(|(id, _)| *id)
    }

    pub fn is_empty(&self) -> bool {
        self.wins.is_empty()
    }
}
