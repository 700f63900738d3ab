//! Integration tests for a whole match.
//!
//! These drive `Match` through the public API only, on a manual clock, with
//! recording renderer and sound doubles.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use tilt_arena::audio::{AudioManager, SoundEffect, SoundEngine, Volume};
use tilt_arena::render::{HeadlessRenderer, RenderStats};
use tilt_arena::sim::{GameEvent, ManualClock, PlayerInput, SimContext, Vector3, WorldParts};
use tilt_arena::{Match, MatchPhase, Settings};

#[derive(Default, Clone)]
struct Jukebox(Rc<RefCell<Vec<SoundEffect>>>);

impl SoundEngine for Jukebox {
    fn play(&mut self, effect: SoundEffect, _gain: f32) {
        self.0.borrow_mut().push(effect);
    }

    fn stop(&mut self, _effect: SoundEffect) {}
}

struct Table {
    game: Match,
    clock: ManualClock,
    jukebox: Jukebox,
    stats: RenderStats,
}

impl Table {
    fn new(settings: Settings) -> Self {
        let clock = ManualClock::new();
        let jukebox = Jukebox::default();
        let renderer = HeadlessRenderer::new();
        let stats = renderer.stats();
        let parts = WorldParts {
            ctx: SimContext::seeded(2024).with_volume(Volume::High),
            renderer: Box::new(renderer),
            audio: AudioManager::new(Box::new(jukebox.clone())),
            clock: Box::new(clock.clone()),
        };
        let game = Match::new(parts, settings).expect("match should start");
        Self {
            game,
            clock,
            jukebox,
            stats,
        }
    }

    fn frame(&mut self) {
        self.clock.advance_millis(16);
        self.game.update().expect("frame should run");
    }

    /// Run frames until `done` holds, up to `limit` frames
    fn run_until(&mut self, limit: usize, done: impl Fn(&Match) -> bool) -> bool {
        for _ in 0..limit {
            self.frame();
            if done(&self.game) {
                return true;
            }
        }
        false
    }

    fn knock_off(&mut self, id: u32) {
        if let Some(player) = self.game.world_mut().player_mut(id) {
            player.body.position = Vector3::new(0.0, 0.0, 40.0);
        }
    }

    fn sounds(&self) -> Vec<SoundEffect> {
        self.jukebox.0.borrow().clone()
    }
}

fn calm_settings(players: u32, rounds_to_win: u32) -> Settings {
    let mut settings = Settings {
        player_count: players,
        rounds_to_win,
        human_player: true,
        ..Settings::default()
    };
    settings.tuning.change_factor = 0.0;
    settings.tuning.opponent_push_force = 0.0;
    settings
}

fn round_over(game: &Match) -> bool {
    matches!(game.phase(), MatchPhase::RoundOver { .. })
}

#[test]
fn test_full_match_to_champion() {
    let mut table = Table::new(calm_settings(3, 2));

    for round in 1..=2 {
        table.frame();
        assert_eq!(table.game.round(), round);
        table.knock_off(2);
        table.knock_off(3);
        assert!(table.run_until(5, round_over));
        assert_eq!(table.game.scoreboard().wins(1), round);
        assert!(table.run_until(400, |g| !round_over(g)));
    }

    assert_eq!(table.game.phase(), MatchPhase::Finished { champion: 1 });
    assert_eq!(table.game.scoreboard().rounds_played, 2);

    use SoundEffect::*;
    assert_eq!(
        table.sounds(),
        vec![
            StartRound, Lose, Lose, WinRound, StartRound, Lose, Lose, WinRound, FinalWinner
        ]
    );

    let history = table.game.history();
    assert_eq!(history.first(), Some(&GameEvent::RoundStarted { round: 1 }));
    assert_eq!(history.last(), Some(&GameEvent::FinalWinner { player: 1 }));

    // Only the champion and the crown are drawn from now on
    let before = table.stats.objects();
    table.frame();
    assert_eq!(table.stats.objects() - before, 2);
}

#[test]
fn test_keyboard_player_drives_off_the_edge() {
    let mut table = Table::new(calm_settings(2, 3));
    let start = table.game.world().player(1).map(|p| p.body.position);
    assert_eq!(start, Some(Vector3::new(3.3, 0.0, 0.0)));

    table.game.set_input(PlayerInput {
        push: DVec2::new(1.0, 0.0),
    });
    assert!(table.run_until(2000, round_over));

    assert!(matches!(
        table.game.phase(),
        MatchPhase::RoundOver {
            winner: Some(2),
            ..
        }
    ));
    let history = table.game.history();
    assert!(history.contains(&GameEvent::PillarHit {
        pillar: 0,
        player: 1
    }));
    assert!(history.contains(&GameEvent::PlayerFell { player: 1 }));
    assert!(table.sounds().contains(&SoundEffect::Pillar));

    let world = table.game.world();
    assert!(!world.pillars()[0].on_surface);
    assert_eq!(world.pillars().iter().filter(|p| !p.on_surface).count(), 1);
}

#[test]
fn test_snapshot_serializes_world() {
    let mut table = Table::new(calm_settings(4, 3));
    table.frame();
    let snapshot = table.game.world().snapshot();
    assert_eq!(snapshot.players.len(), 4);
    assert_eq!(snapshot.pillars.len(), 24);
    assert_eq!(snapshot.tick, 1);

    let json = serde_json::to_value(&snapshot).expect("snapshot serializes");
    assert_eq!(json["players"][0]["id"], 1);
    assert_eq!(json["winner"], serde_json::Value::Null);
}
