// Player agent
//
// Left/right key-downs queue move intents. While idling in the stand loop the
// head intent is matched against the enemies on that side: the nearest one in
// range becomes the target of a random attack, otherwise the player whiffs.
// Damage is applied by the attack animation's "attack" event, not by the
// decision, so the blow lands when the animation says it does.

use std::sync::Arc;

use glam::Vec2;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::math::move_towards;
use crate::engine::audio::Sound;
use crate::engine::entity::EntityId;
use crate::engine::input::{Action, InputBuffer, KeySource};
use crate::engine::kinematics::Kinematics;
use crate::engine::renderer::RenderSurface;
use crate::engine::skeleton::{AnimationEvent, AnimationState, Skeleton};

use super::enemy::{Enemy, HitOutcome};
use super::rigs::{PlayerRig, ATTACK_EVENT, BASE_TRACK, SOUND_EVENT};
use super::state::{EnemyState, Mode, PlayerState};
use super::stats::{PlayerStats, ATTACK_DISTANCE, HURT_DISTANCE};

/// Seconds between getting hurt and the end of the match
pub const HURT_GAME_OVER_DELAY: f32 = 5.0;
/// Seconds between pressing quit and the end of the match
pub const QUIT_GAME_OVER_DELAY: f32 = 0.5;

/// Direction of a queued attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveIntent {
    Left,
    Right,
}

impl MoveIntent {
    /// Enemy side this intent strikes at
    pub fn side(&self) -> Mode {
        match self {
            Self::Left => Mode::Left,
            Self::Right => Mode::Right,
        }
    }
}

/// The keys the player cares about, sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySnapshot {
    pub left: bool,
    pub right: bool,
    pub quit: bool,
}

impl KeySnapshot {
    pub fn capture(keys: &dyn KeySource) -> Self {
        Self {
            left: keys.is_pressed(Action::MoveLeft),
            right: keys.is_pressed(Action::MoveRight),
            quit: keys.is_pressed(Action::Quit),
        }
    }
}

/// Side effect requested by the player during its update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEffect {
    Sound(Sound),
    /// The intro finished; enemies may start spawning
    EnableSpawning,
    /// End the match after `delay` seconds
    GameOver { delay: f32 },
}

/// The player-controlled brawler
#[derive(Debug)]
pub struct Player {
    rig: Arc<PlayerRig>,
    stats: PlayerStats,
    skeleton: Skeleton,
    animation: AnimationState,
    body: Kinematics,
    intents: InputBuffer<MoveIntent>,
    /// A direction key is still held since the last queued intent
    key_down: bool,
    quit_requested: bool,
    /// Idle in the stand loop and free to start an attack
    ready: bool,
    /// Enemy the current attack will land on
    target: Option<EntityId>,
}

impl Player {
    pub fn new(rig: Arc<PlayerRig>, x: f32, y: f32) -> Self {
        let mut skeleton = Skeleton::new(Arc::clone(&rig.data));
        skeleton.set_position(Vec2::new(x, y));

        let mut animation = AnimationState::new();
        animation.set_animation(BASE_TRACK, &rig.stance, false);
        animation.add_animation(BASE_TRACK, &rig.stand, true, 0.0);

        Self {
            rig,
            stats: PlayerStats::default(),
            skeleton,
            animation,
            body: Kinematics::at(x, y),
            intents: InputBuffer::new(),
            key_down: false,
            quit_requested: false,
            ready: false,
            target: None,
        }
    }

    pub fn x(&self) -> f32 {
        self.body.x()
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn pending_intents(&self) -> usize {
        self.intents.len()
    }

    pub fn state(&self) -> PlayerState {
        PlayerState::from_animation(self.animation.current_animation_name(BASE_TRACK))
    }

    /// Facing left
    pub fn flip_x(&self) -> bool {
        self.skeleton.flip_x()
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    fn is_hurt(&self) -> bool {
        self.animation.is_playing(BASE_TRACK, &self.rig.hit.name)
    }

    /// Advance one tick against the current set of enemies
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        keys: KeySnapshot,
        enemies: &mut [(EntityId, &mut Enemy)],
        rng: &mut R,
    ) -> Vec<PlayerEffect> {
        let mut effects = Vec::new();

        self.skeleton.set_position(self.body.position);
        for event in self.animation.update(dt) {
            self.handle_animation_event(event, enemies, &mut effects);
        }
        self.animation.apply(&mut self.skeleton);

        if keys.quit && !self.quit_requested {
            self.quit_requested = true;
            effects.push(PlayerEffect::GameOver {
                delay: QUIT_GAME_OVER_DELAY,
            });
        }

        self.queue_intent(keys);

        if !self.is_hurt() {
            let attacker = enemies
                .iter()
                .find(|(_, enemy)| self.can_hurt_me(enemy))
                .map(|(_, enemy)| (enemy.x(), enemy.state_time()));
            if let Some((attacker_x, engaged_for)) = attacker {
                debug!("player hurt by enemy at x={attacker_x:.1}, engaged for {engaged_for:.2}s");
                self.hurt(attacker_x, enemies, &mut effects);
                self.skeleton.set_position(self.body.position);
                return effects;
            }
        }

        let x = self.x();
        for (_, enemy) in enemies.iter_mut() {
            if !enemy.is_dying()
                && enemy.mode() == Mode::Neutral
                && (enemy.x() - x).abs() < ATTACK_DISTANCE
            {
                enemy.set_mode(Mode::from_side(enemy.x(), x));
            }
        }

        if self.ready {
            if let Some(intent) = self.intents.front() {
                match self.find_target(intent, enemies) {
                    Some(index) => {
                        let (id, enemy) = &mut enemies[index];
                        self.attack(*id, enemy, rng);
                    }
                    None => self.miss(intent, &mut effects),
                }
            }
        }

        if !self.ready {
            self.chase(dt, enemies);
        }

        self.skeleton.set_position(self.body.position);
        effects
    }

    fn handle_animation_event(
        &mut self,
        event: AnimationEvent,
        enemies: &mut [(EntityId, &mut Enemy)],
        effects: &mut Vec<PlayerEffect>,
    ) {
        match event {
            AnimationEvent::Start { track, animation }
                if track == BASE_TRACK && animation == self.rig.stand.name =>
            {
                self.ready = true;
            }
            AnimationEvent::Event { name, .. } if name == ATTACK_EVENT => {
                effects.push(PlayerEffect::Sound(Sound::Punch));
                if let Some(target) = self.target.take() {
                    let player_x = self.x();
                    let outcome = enemies
                        .iter_mut()
                        .find(|(id, _)| *id == target)
                        .map(|(_, enemy)| enemy.hit(player_x))
                        .unwrap_or(HitOutcome::Ignored);
                    debug!("attack on enemy {target}: {outcome:?}");
                }
            }
            AnimationEvent::Event { name, payload, .. } if name == SOUND_EVENT => {
                if let Some(sound) = payload.as_deref().and_then(Sound::from_event_payload) {
                    effects.push(PlayerEffect::Sound(sound));
                }
            }
            AnimationEvent::Complete { track, animation }
                if track == BASE_TRACK && animation == self.rig.stance.name =>
            {
                effects.push(PlayerEffect::EnableSpawning);
            }
            _ => {}
        }
    }

    /// Queue one intent per key-down; holding a key does not repeat it
    fn queue_intent(&mut self, keys: KeySnapshot) {
        if !self.key_down && !self.is_hurt() {
            let intent = if keys.left {
                Some(MoveIntent::Left)
            } else if keys.right {
                Some(MoveIntent::Right)
            } else {
                None
            };
            if let Some(intent) = intent {
                if !self.intents.push(intent) {
                    debug!("intent queue full, dropped {intent:?}");
                }
                self.key_down = true;
            }
        } else if !keys.left && !keys.right {
            self.key_down = false;
        }
    }

    /// An enemy the player is already lining up a blow on cannot land one
    fn can_hurt_me(&self, enemy: &Enemy) -> bool {
        enemy.state() == EnemyState::Engaging
            && enemy.is_attacking()
            && !enemy.is_recovering()
            && (enemy.x() - self.x()).abs() < HURT_DISTANCE
    }

    fn hurt(
        &mut self,
        attacker_x: f32,
        enemies: &mut [(EntityId, &mut Enemy)],
        effects: &mut Vec<PlayerEffect>,
    ) {
        self.intents.clear();
        self.ready = false;
        if let Some(target) = self.target.take() {
            if let Some((_, enemy)) = enemies.iter_mut().find(|(id, _)| *id == target) {
                enemy.set_attacking(true);
            }
        }

        self.skeleton.set_flip_x(attacker_x < self.x());
        self.animation.set_animation(BASE_TRACK, &self.rig.hit, false);
        effects.push(PlayerEffect::Sound(Sound::Hit));
        effects.push(PlayerEffect::GameOver {
            delay: HURT_GAME_OVER_DELAY,
        });
    }

    /// Index of the nearest enemy the intent can strike; ties keep the first
    fn find_target(&self, intent: MoveIntent, enemies: &[(EntityId, &mut Enemy)]) -> Option<usize> {
        let x = self.x();
        let mut best: Option<(usize, f32)> = None;
        for (index, (_, enemy)) in enemies.iter().enumerate() {
            if enemy.is_dying() || !enemy.state().is_targetable() {
                continue;
            }
            if enemy.side(x) != intent.side() {
                continue;
            }
            let distance = (enemy.x() - x).abs();
            if distance >= ATTACK_DISTANCE {
                continue;
            }
            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    fn attack<R: Rng + ?Sized>(&mut self, id: EntityId, enemy: &mut Enemy, rng: &mut R) {
        self.intents.pop();
        self.skeleton.set_flip_x(enemy.x() < self.x());

        if let Some(clip) = self.rig.attacks.choose(rng) {
            debug!("player attacks enemy {id} with {}", clip.name);
            self.animation.set_animation(BASE_TRACK, clip, false);
            self.animation
                .add_animation(BASE_TRACK, &self.rig.stand, true, 0.0);
        }

        enemy.set_attacking(false);
        enemy.halt();
        self.target = Some(id);
        self.ready = false;
    }

    fn miss(&mut self, intent: MoveIntent, effects: &mut Vec<PlayerEffect>) {
        debug!("player swings {intent:?} at nothing");
        effects.push(PlayerEffect::Sound(Sound::Swoosh));

        let facing_left = intent == MoveIntent::Left;
        self.skeleton.set_flip_x(facing_left);
        if let Some(sign) = self.skeleton.bone_mut(self.rig.sign_miss) {
            sign.scale_x = if facing_left { -1.0 } else { 1.0 };
        }

        self.intents.clear();
        self.animation.set_animation(BASE_TRACK, &self.rig.miss, false);
        self.animation
            .add_animation(BASE_TRACK, &self.rig.stand, true, 0.0);
        self.ready = false;
    }

    /// Close in on the target until standing next to it
    fn chase(&mut self, dt: f32, enemies: &[(EntityId, &mut Enemy)]) {
        let Some(target) = self.target else {
            return;
        };
        let Some((_, enemy)) = enemies.iter().find(|(id, _)| *id == target) else {
            return;
        };

        let offset = if enemy.x() < self.x() {
            self.stats.strike_offset
        } else {
            -self.stats.strike_offset
        };
        let x = move_towards(
            self.x(),
            enemy.x() + offset,
            self.stats.chase_speed * dt,
        );
        self.body.set_x(x);
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_skeleton(&self.skeleton);
    }
}
