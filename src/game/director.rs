// Match director - owns the entities and runs one match tick by tick
//
// A tick is:
// 1. sample the keys
// 2. let every entity act (player first, it was added first)
// 3. push living enemies apart
// 4. count down unlocks and spawn enemies once the intro is over
// 5. extend the ground whenever the view reaches a world edge

use std::sync::Arc;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::audio::AudioSink;
use crate::engine::entity::{EntityId, EntityManager};
use crate::engine::input::KeySource;
use crate::engine::renderer::{Camera, RenderSurface};
use crate::engine::skeleton::{SkeletonError, SkeletonLibrary};
use crate::game::actor::Actor;
use crate::game::characters::{enforce_spacing, Enemy, EnemyKind, KeySnapshot, Player, Rigs};
use crate::game::context::MatchContext;
use crate::game::effects::{tile_width, BackgroundTile};
use crate::game::scoreboard::{self, ScoreDisplay};

/// Tunables of a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Seconds before the first spawn once spawning is enabled
    pub initial_spawn_delay: f32,
    /// Seconds taken off the spawn delay after every spawn
    pub spawn_delay_decay: f32,
    /// Shortest spawn delay
    pub min_spawn_delay: f32,
    /// Seconds until hats start spawning
    pub hat_unlock: f32,
    /// Seconds until spike balls start spawning
    pub spike_unlock: f32,
    pub view_width: f32,
    pub view_height: f32,
    /// Height the characters stand at
    pub ground_y: f32,
    pub tile_height: f32,
    /// Ground tiles are a whole number of these wide
    pub tile_unit: f32,
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            initial_spawn_delay: 2.0,
            spawn_delay_decay: 0.01,
            min_spawn_delay: 0.5,
            hat_unlock: 15.0,
            spike_unlock: 30.0,
            view_width: 1280.0,
            view_height: 720.0,
            ground_y: 250.0,
            tile_height: 329.0,
            tile_unit: 76.0,
            seed: 0x5eed,
        }
    }
}

/// Enemy spawn timer with a delay that shrinks on every spawn
#[derive(Debug, Clone)]
pub struct SpawnSchedule {
    delay: f32,
    decay: f32,
    floor: f32,
    timer: f32,
    spawned: u32,
}

impl SpawnSchedule {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            delay: config.initial_spawn_delay,
            decay: config.spawn_delay_decay,
            floor: config.min_spawn_delay,
            timer: config.initial_spawn_delay,
            spawned: 0,
        }
    }

    /// Count down; returns true when an enemy is due
    pub fn tick(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        self.timer <= 0.0
    }

    /// Record a spawn: shorten the delay and restart the timer
    pub fn on_spawn(&mut self) {
        self.spawned += 1;
        self.delay = (self.delay - self.decay).max(self.floor);
        self.timer = self.delay;
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }
}

/// One match, from the player's intro to game over
pub struct MatchDirector {
    config: MatchConfig,
    rigs: Rigs,
    entities: EntityManager<Actor>,
    context: MatchContext,
    schedule: SpawnSchedule,
    hat_unlock: f32,
    spike_unlock: f32,
    tile_width: f32,
    left_edge: f32,
    right_edge: f32,
    player_id: EntityId,
}

impl MatchDirector {
    /// Set up a match; fails if any character data is missing
    pub fn new(
        config: MatchConfig,
        library: &SkeletonLibrary,
        audio: Box<dyn AudioSink>,
        display: Box<dyn ScoreDisplay>,
    ) -> Result<Self, SkeletonError> {
        let rigs = Rigs::load(library)?;
        let camera = Camera::centered(config.view_width, config.view_height);
        let context = MatchContext::new(camera, config.seed, audio, display);

        let mut entities = EntityManager::new();
        let player = Player::new(
            Arc::clone(&rigs.player),
            config.view_width / 2.0,
            config.ground_y,
        );
        let player_id = entities.add(Actor::Player(Box::new(player)));

        let tile_width = tile_width(config.view_width, config.tile_unit);
        entities.add(Actor::Background(BackgroundTile::new(
            0.0,
            0.0,
            tile_width,
            config.tile_height,
        )));

        info!(
            "Match started: view {}x{}, seed {:#x}",
            config.view_width, config.view_height, config.seed
        );

        Ok(Self {
            schedule: SpawnSchedule::new(&config),
            hat_unlock: config.hat_unlock,
            spike_unlock: config.spike_unlock,
            tile_width,
            left_edge: 0.0,
            right_edge: tile_width,
            player_id,
            config,
            rigs,
            entities,
            context,
        })
    }

    /// Advance the match by `dt` seconds
    pub fn tick(&mut self, keys: &dyn KeySource, dt: f32) {
        if self.context.game_over {
            return;
        }

        self.context.keys = KeySnapshot::capture(keys);
        self.entities.act(&mut self.context, dt);

        let mut enemies: Vec<&mut Enemy> = self
            .entities
            .iter_mut()
            .filter_map(|(_, actor)| actor.as_enemy_mut())
            .collect();
        enforce_spacing(&mut enemies, self.context.player_x);

        self.update_unlocks(dt);
        if self.context.spawning_enabled && self.schedule.tick(dt) {
            self.spawn_random_enemy();
        }
        self.extend_ground();
    }

    fn update_unlocks(&mut self, dt: f32) {
        if self.hat_unlock > 0.0 {
            self.hat_unlock = (self.hat_unlock - dt).max(0.0);
            if self.hat_unlock == 0.0 {
                info!("Hats unlocked");
            }
        }
        if self.spike_unlock > 0.0 {
            self.spike_unlock = (self.spike_unlock - dt).max(0.0);
            if self.spike_unlock == 0.0 {
                info!("Spike balls unlocked");
            }
        }
    }

    /// Seconds until `kind` may spawn; zero once unlocked
    pub fn unlock_remaining(&self, kind: EnemyKind) -> f32 {
        match kind {
            EnemyKind::Donkey => 0.0,
            EnemyKind::Hat => self.hat_unlock,
            EnemyKind::SpikeBall => self.spike_unlock,
        }
    }

    fn is_unlocked(&self, kind: EnemyKind) -> bool {
        self.unlock_remaining(kind) <= 0.0
    }

    fn spawn_random_enemy(&mut self) {
        let unlocked: Vec<EnemyKind> = EnemyKind::ALL
            .iter()
            .copied()
            .filter(|&kind| self.is_unlocked(kind))
            .collect();
        let rng = &mut self.context.rng;
        let kind = unlocked.choose(rng).copied().unwrap_or(EnemyKind::Donkey);
        let half_view = self.context.camera.viewport_width() / 2.0;
        let x = if rng.gen_bool(0.5) {
            self.context.camera.position.x - half_view
        } else {
            self.context.camera.position.x + half_view
        };

        self.spawn_enemy(kind, x);
        self.schedule.on_spawn();
        debug!(
            "Spawned {kind:?} at x={x:.0}, next in {:.2}s",
            self.schedule.delay()
        );
    }

    /// Add an enemy on the ground at `x`; it starts acting next tick
    pub fn spawn_enemy(&mut self, kind: EnemyKind, x: f32) -> EntityId {
        let rig = Arc::clone(self.rigs.enemy(kind));
        let enemy = Enemy::new(kind, rig, x, self.config.ground_y);
        self.entities.add(Actor::Enemy(Box::new(enemy)))
    }

    fn extend_ground(&mut self) {
        let view = self.context.camera.viewport_bounds();
        while view.left() < self.left_edge {
            self.left_edge -= self.tile_width;
            self.add_tile(self.left_edge);
        }
        while view.right() > self.right_edge {
            self.add_tile(self.right_edge);
            self.right_edge += self.tile_width;
        }
    }

    fn add_tile(&mut self, x: f32) {
        debug!("Ground tile added at x={x:.0}");
        self.entities.add(Actor::Background(BackgroundTile::new(
            x,
            0.0,
            self.tile_width,
            self.config.tile_height,
        )));
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface, dt: f32) {
        self.entities.draw(surface, dt);
    }

    /// Follow a window resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.context.camera.resize(width, height);
    }

    pub fn score(&self) -> u32 {
        self.context.scoreboard.score()
    }

    pub fn high_score(&self) -> u32 {
        scoreboard::high_score()
    }

    pub fn is_over(&self) -> bool {
        self.context.game_over
    }

    pub fn spawning_enabled(&self) -> bool {
        self.context.spawning_enabled
    }

    pub fn spawn_delay(&self) -> f32 {
        self.schedule.delay()
    }

    pub fn schedule(&self) -> &SpawnSchedule {
        &self.schedule
    }

    pub fn camera(&self) -> &Camera {
        &self.context.camera
    }

    /// Left and right x of the ground laid so far
    pub fn world_edges(&self) -> (f32, f32) {
        (self.left_edge, self.right_edge)
    }

    pub fn player(&self) -> Option<&Player> {
        self.entities.get(self.player_id).and_then(Actor::as_player)
    }

    /// Living enemies admitted to the match
    pub fn enemies(&self) -> impl Iterator<Item = (EntityId, &Enemy)> + '_ {
        self.entities
            .iter()
            .filter_map(|(id, actor)| actor.as_enemy().map(|enemy| (id, enemy)))
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.entities.get(id).and_then(Actor::as_enemy)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.entities.get_mut(id).and_then(Actor::as_enemy_mut)
    }

    pub fn candy_count(&self) -> usize {
        self.count(|actor| matches!(actor, Actor::Candy(_)))
    }

    pub fn confetti_count(&self) -> usize {
        self.count(|actor| matches!(actor, Actor::Confetti(_)))
    }

    pub fn background_count(&self) -> usize {
        self.count(|actor| matches!(actor, Actor::Background(_)))
    }

    fn count(&self, predicate: impl Fn(&Actor) -> bool) -> usize {
        self.entities
            .iter()
            .filter(|&(_, actor)| predicate(actor))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::LogAudio;
    use crate::engine::input::{Action, KeyState};
    use crate::game::characters::rigs::standard_library;
    use crate::game::characters::stats::{ATTACK_DISTANCE, MIN_SPACING};
    use crate::game::characters::{EnemyState, HitOutcome};
    use crate::game::scoreboard::LogDisplay;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    const DT: f32 = 0.125;

    fn director_with(config: MatchConfig) -> MatchDirector {
        MatchDirector::new(
            config,
            &standard_library(),
            Box::new(LogAudio),
            Box::new(LogDisplay),
        )
        .unwrap()
    }

    fn director() -> MatchDirector {
        director_with(MatchConfig::default())
    }

    /// Assert no two living enemies are closer than the minimum spacing;
    /// returns how many were checked
    fn assert_spaced(director: &MatchDirector) -> usize {
        let living: Vec<f32> = director
            .enemies()
            .filter(|(_, enemy)| enemy.state().is_spaced())
            .map(|(_, enemy)| enemy.x())
            .collect();
        for (i, a) in living.iter().enumerate() {
            for b in &living[i + 1..] {
                assert!((a - b).abs() >= MIN_SPACING - 1e-3, "{a} and {b} overlap");
            }
        }
        living.len()
    }

    /// Keys a player would press: a fresh key-down toward the nearest enemy
    /// that can be struck, nothing otherwise
    fn strike_nearest(director: &MatchDirector, pressed_last_tick: bool) -> KeyState {
        let mut keys = KeyState::new();
        let Some(player) = director.player() else {
            return keys;
        };
        if pressed_last_tick || !player.is_ready() {
            return keys;
        }
        let x = player.x();
        let nearest = director
            .enemies()
            .filter(|(_, enemy)| enemy.state().is_targetable())
            .map(|(_, enemy)| enemy.x() - x)
            .filter(|offset| offset.abs() < ATTACK_DISTANCE)
            .min_by(|a, b| a.abs().total_cmp(&b.abs()));
        match nearest {
            Some(offset) if offset < 0.0 => keys.press(Action::MoveLeft),
            Some(_) => keys.press(Action::MoveRight),
            None => {}
        }
        keys
    }

    fn run(director: &mut MatchDirector, keys: &KeyState, ticks: usize) {
        for _ in 0..ticks {
            director.tick(keys, DT);
        }
    }

    #[test]
    fn test_new_match_layout() {
        let mut director = director();
        assert_eq!(director.score(), 0);
        assert!(!director.spawning_enabled());
        assert_eq!(director.world_edges(), (0.0, 1292.0));

        run(&mut director, &KeyState::new(), 1);
        let player = director.player().unwrap();
        assert_relative_eq!(player.x(), 640.0);
        assert_relative_eq!(player.position().y, 250.0);
        assert_eq!(director.background_count(), 1);
        assert_eq!(director.enemies().count(), 0);
    }

    #[test]
    fn test_first_spawn_after_intro() {
        let mut director = director();
        let keys = KeyState::new();

        run(&mut director, &keys, 7);
        assert!(!director.spawning_enabled());
        run(&mut director, &keys, 1);
        assert!(director.spawning_enabled());

        // Spawn timer of 2.0s runs out on tick 23, the enemy acts from tick 24
        run(&mut director, &keys, 14);
        assert_eq!(director.schedule().spawned(), 0);
        run(&mut director, &keys, 1);
        assert_eq!(director.schedule().spawned(), 1);
        assert_eq!(director.enemies().count(), 0);

        run(&mut director, &keys, 1);
        let (_, enemy) = director.enemies().next().unwrap();
        assert_eq!(enemy.kind(), EnemyKind::Donkey);
        assert_eq!(enemy.state(), EnemyState::Walking);
        // Off-screen at 0 or 1280, one step closer to the player
        let distance = (enemy.x() - 640.0).abs();
        assert_relative_eq!(distance, 615.0, epsilon = 1e-3);
    }

    #[test]
    fn test_spawn_delay_decays_to_floor() {
        let config = MatchConfig::default();
        let mut schedule = SpawnSchedule::new(&config);
        for spawns in 0..200 {
            let expected = (2.0 - 0.01 * spawns as f32).max(0.5);
            assert_relative_eq!(schedule.delay(), expected, epsilon = 1e-3);
            schedule.on_spawn();
        }
        assert_relative_eq!(schedule.delay(), 0.5);
        assert_eq!(schedule.spawned(), 200);
    }

    #[test]
    fn test_spawn_schedule_timer() {
        let mut schedule = SpawnSchedule::new(&MatchConfig::default());
        assert!(!schedule.tick(1.0));
        assert!(schedule.tick(1.0));
        schedule.on_spawn();
        assert!(!schedule.tick(1.0));
        assert!(schedule.tick(0.99));
    }

    #[test]
    fn test_kill_scores_and_bursts() {
        let mut director = director();
        let mut keys = KeyState::new();
        run(&mut director, &keys, 8);
        assert!(director.player().unwrap().is_ready());

        let id = director.spawn_enemy(EnemyKind::Donkey, 520.0);
        run(&mut director, &keys, 1);
        assert_eq!(director.enemy(id).unwrap().state(), EnemyState::Engaging);

        keys.press(Action::MoveLeft);
        run(&mut director, &keys, 1);
        keys.release(Action::MoveLeft);
        assert!(!director.enemy(id).unwrap().is_attacking());

        let mut most_candy = 0;
        let mut saw_confetti = false;
        for _ in 0..30 {
            run(&mut director, &keys, 1);
            most_candy = most_candy.max(director.candy_count());
            saw_confetti |= director.confetti_count() > 0;
        }

        assert_eq!(director.score(), 10);
        assert_eq!(most_candy, 5);
        assert!(saw_confetti);
        assert!(director.enemy(id).is_none());
        assert!(director.high_score() >= 10);
    }

    #[test]
    fn test_crowd_keeps_its_distance() {
        let mut director = director();
        let mut keys = KeyState::new();
        run(&mut director, &keys, 8);

        // Piled up on both sides, with a spike ball about to be knocked
        // through the player into the right-hand crowd
        for x in [300.0, 330.0, 360.0] {
            director.spawn_enemy(EnemyKind::Donkey, x);
        }
        for x in [950.0, 980.0, 1010.0] {
            director.spawn_enemy(EnemyKind::Hat, x);
        }
        let spike = director.spawn_enemy(EnemyKind::SpikeBall, 560.0);

        run(&mut director, &keys, 1);
        assert_eq!(assert_spaced(&director), 7);
        assert_eq!(director.enemy(spike).unwrap().state(), EnemyState::Engaging);

        keys.press(Action::MoveLeft);
        run(&mut director, &keys, 1);
        keys.release(Action::MoveLeft);
        assert_eq!(assert_spaced(&director), 7);

        let mut crossed = false;
        for _ in 0..8 {
            run(&mut director, &keys, 1);
            assert!(!director.is_over());
            assert_eq!(assert_spaced(&director), 7);
            let player_x = director.player().unwrap().x();
            crossed |= director.enemy(spike).unwrap().x() > player_x;
        }
        assert!(crossed, "spike ball never passed the player");
        assert_eq!(director.enemy(spike).unwrap().hits_remaining(), 2);

        // Let the crowd close in and finish the match
        for _ in 0..100 {
            run(&mut director, &keys, 1);
            assert_spaced(&director);
        }
    }

    #[test]
    fn test_enemies_keep_their_distance_under_play() {
        for seed in 0..6 {
            let mut director = director_with(MatchConfig {
                seed,
                ..MatchConfig::default()
            });
            let mut pressed = false;
            for _ in 0..600 {
                let keys = strike_nearest(&director, pressed);
                pressed = keys.is_pressed(Action::MoveLeft) || keys.is_pressed(Action::MoveRight);
                director.tick(&keys, DT);
                assert_spaced(&director);
            }
            assert!(director.schedule().spawned() >= 3);
        }
    }

    #[test]
    fn test_unlocks_gate_enemy_kinds() {
        let config = MatchConfig {
            initial_spawn_delay: 0.25,
            min_spawn_delay: 0.25,
            spawn_delay_decay: 0.0,
            hat_unlock: 2.05,
            spike_unlock: 4.05,
            ..MatchConfig::default()
        };

        let mut seen_kinds = HashSet::new();
        for seed in 0..8 {
            let mut director = director_with(MatchConfig {
                seed,
                ..config.clone()
            });
            let keys = KeyState::new();
            let mut known = HashSet::new();
            for tick in 1..=80u32 {
                director.tick(&keys, DT);
                for (id, enemy) in director.enemies() {
                    if known.insert(id) {
                        // Admitted one tick after the spawn
                        let spawned_at = (tick - 1) as f32 * DT;
                        match enemy.kind() {
                            EnemyKind::Donkey => {}
                            EnemyKind::Hat => assert!(spawned_at >= 2.05, "hat at {spawned_at}"),
                            EnemyKind::SpikeBall => {
                                assert!(spawned_at >= 4.05, "spike ball at {spawned_at}")
                            }
                        }
                        seen_kinds.insert(enemy.kind());
                    }
                }
            }
            // Timers stop at zero rather than running negative
            assert_eq!(director.unlock_remaining(EnemyKind::Hat), 0.0);
            assert_eq!(director.unlock_remaining(EnemyKind::SpikeBall), 0.0);
        }
        assert_eq!(seen_kinds.len(), 3);
    }

    #[test]
    fn test_unlock_timers_count_down() {
        let mut director = director();
        assert_relative_eq!(director.unlock_remaining(EnemyKind::Hat), 15.0);
        assert_relative_eq!(director.unlock_remaining(EnemyKind::SpikeBall), 30.0);
        assert_eq!(director.unlock_remaining(EnemyKind::Donkey), 0.0);

        run(&mut director, &KeyState::new(), 8);
        assert_relative_eq!(director.unlock_remaining(EnemyKind::Hat), 14.0);
        assert_relative_eq!(director.unlock_remaining(EnemyKind::SpikeBall), 29.0);
    }

    #[test]
    fn test_mixed_kills_sum_their_points() {
        let mut director = director();
        let keys = KeyState::new();
        let ids = [
            director.spawn_enemy(EnemyKind::Donkey, 100.0),
            director.spawn_enemy(EnemyKind::Hat, 220.0),
            director.spawn_enemy(EnemyKind::SpikeBall, 1180.0),
        ];
        run(&mut director, &keys, 1);

        for (id, hits) in ids.iter().zip([1, 2, 3]) {
            let enemy = director.enemy_mut(*id).unwrap();
            for _ in 1..hits {
                assert_eq!(enemy.hit(640.0), HitOutcome::Recovering);
            }
            assert_eq!(enemy.hit(640.0), HitOutcome::Killed);
        }

        run(&mut director, &keys, 12);
        assert_eq!(director.score(), 10 + 30 + 60);
        assert!(director.high_score() >= 100);
        assert!(ids.iter().all(|id| director.enemy(*id).is_none()));
    }

    #[test]
    fn test_missing_character_data_fails() {
        let mut library = standard_library();
        library.remove("hat");
        let result = MatchDirector::new(
            MatchConfig::default(),
            &library,
            Box::new(LogAudio),
            Box::new(LogDisplay),
        );
        assert!(matches!(result, Err(SkeletonError::MissingSkeleton(_))));
    }

    #[test]
    fn test_quit_ends_match() {
        let mut director = director();
        let mut keys = KeyState::new();
        keys.press(Action::Quit);
        run(&mut director, &keys, 4);
        assert!(!director.is_over());
        run(&mut director, &keys, 1);
        assert!(director.is_over());

        // A finished match no longer moves
        let edges = director.world_edges();
        run(&mut director, &keys, 10);
        assert_eq!(director.world_edges(), edges);
        assert_eq!(director.score(), 0);
    }

    #[test]
    fn test_ground_follows_camera() {
        let mut director = director();
        run(&mut director, &KeyState::new(), 1);
        // The view spans 0..1280, inside the first tile
        assert_eq!(director.world_edges(), (0.0, 1292.0));

        director.context.camera.follow_x(2000.0);
        director.extend_ground();
        assert_eq!(director.world_edges(), (0.0, 3876.0));

        director.context.camera.follow_x(-100.0);
        director.extend_ground();
        assert_eq!(director.world_edges(), (-1292.0, 3876.0));

        run(&mut director, &KeyState::new(), 1);
        assert_eq!(director.background_count(), 4);
    }
}
