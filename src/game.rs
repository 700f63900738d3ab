//! Match runner
//!
//! Plays rounds on one world until a player has won enough of them:
//! `Playing` -> `RoundOver` (3 s, crown on the survivor) -> next round or `Finished`.

use std::time::Duration;

use crate::error::{SimError, SimResult};
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::sim::{ControllerPolicy, GameEvent, PlayerInput, World, WorldParts};

/// Time between a round ending and the next one starting
pub const ROUND_PAUSE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Playing,
    /// `winner` is `None` when the last players fell together
    RoundOver { winner: Option<u32>, since: Duration },
    Finished { champion: u32 },
}

pub struct Match {
    world: World,
    settings: Settings,
    scoreboard: Scoreboard,
    phase: MatchPhase,
    round: u32,
    history: Vec<GameEvent>,
}

impl Match {
    /// Build the world and start the first round
    pub fn new(parts: WorldParts, settings: Settings) -> SimResult<Self> {
        if settings.player_count == 0 {
            return Err(SimError::InvalidArgument(
                "a match needs at least one player".to_string(),
            ));
        }
        if settings.rounds_to_win == 0 {
            return Err(SimError::InvalidArgument(
                "rounds_to_win must be at least 1".to_string(),
            ));
        }
        settings.tuning.validate()?;

        let policy = ControllerPolicy {
            human_player: settings.human_player,
        };
        let world = World::new(parts, settings.tuning.clone(), policy);
        let mut game = Self {
            world,
            settings,
            scoreboard: Scoreboard::new(),
            phase: MatchPhase::Playing,
            round: 0,
            history: Vec::new(),
        };
        game.start_round()?;
        Ok(game)
    }

    fn start_round(&mut self) -> SimResult<()> {
        self.collect_events();
        self.world.reset();

        let models = &self.settings.models;
        self.world.load_surface(&models.surface)?;
        self.world.load_pillars(&models.pillar)?;
        for id in 1..=self.settings.player_count {
            self.world.load_player(&models.player, id)?;
        }
        self.world.load_crown(&models.crown)?;
        self.world
            .place_players_on_ring(self.settings.tuning.surface_radius / 2.0);

        self.round += 1;
        self.phase = MatchPhase::Playing;
        log::info!("Round {} started", self.round);
        self.world.announce(GameEvent::RoundStarted { round: self.round });
        Ok(())
    }

    /// One frame
    pub fn update(&mut self) -> SimResult<()> {
        match self.phase {
            MatchPhase::Playing => {
                self.world.update();
                self.collect_events();
                if let Some(winner) = self.round_result() {
                    self.finish_round(winner);
                }
            }
            MatchPhase::RoundOver { since, .. } => {
                self.world.update();
                self.collect_events();
                if self.world.now().saturating_sub(since) >= ROUND_PAUSE {
                    match self.scoreboard.champion(self.settings.rounds_to_win) {
                        Some(champion) => self.finish_match(champion),
                        None => self.start_round()?,
                    }
                }
            }
            MatchPhase::Finished { .. } => self.world.show_final_winner(),
        }
        Ok(())
    }

    /// `Some(winner)` once the round is decided
    fn round_result(&self) -> Option<Option<u32>> {
        let total = self.world.players().len();
        let mut standing = self.world.standing_players();
        let first = standing.next().map(|p| p.id());
        let more = standing.next().is_some();

        match (first, more) {
            (_, true) => None,
            (Some(id), false) if total >= 2 => Some(Some(id)),
            (Some(_), false) => None,
            (None, _) => Some(None),
        }
    }

    fn finish_round(&mut self, winner: Option<u32>) {
        self.scoreboard.record_round(winner);
        self.world.set_winner(winner);
        match winner {
            Some(id) => {
                log::info!(
                    "Player {} wins round {} ({} total)",
                    id,
                    self.round,
                    self.scoreboard.wins(id)
                );
                self.world.announce(GameEvent::RoundWon { player: id });
            }
            None => log::info!("Round {} ends without a survivor", self.round),
        }
        self.collect_events();
        self.phase = MatchPhase::RoundOver {
            winner,
            since: self.world.now(),
        };
    }

    fn finish_match(&mut self, champion: u32) {
        log::info!(
            "Player {} wins the match after {} rounds",
            champion,
            self.scoreboard.rounds_played
        );
        self.world.set_winner(Some(champion));
        self.world.announce(GameEvent::FinalWinner { player: champion });
        self.collect_events();
        self.phase = MatchPhase::Finished { champion };
    }

    fn collect_events(&mut self) {
        self.history.extend(self.world.take_events());
    }

    pub fn set_input(&mut self, input: PlayerInput) {
        self.world.set_input(input);
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, MatchPhase::Finished { .. })
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Every event of the match so far, oldest first
    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }
}
