// Enemy agent
//
// A pinata walks toward the player, switches to a combat skin in striking
// range, gets knocked back when hit and bursts into candy once its hits run
// out. Side effects (confetti, candy, score, disposal) are returned from
// `update` for the owning entity to carry out.

use std::sync::Arc;

use glam::Vec2;
use log::debug;

use crate::core::math::move_towards;
use crate::engine::kinematics::Kinematics;
use crate::engine::renderer::RenderSurface;
use crate::engine::skeleton::{AnimationEvent, AnimationState, Skeleton};

use super::rigs::{EnemyRig, BASE_TRACK, DEATH_EVENT, OVERLAY_TRACK};
use super::state::{EnemyState, EnemyStateMachine, Mode};
use super::stats::{
    EnemyKind, EnemyStats, ATTACK_DISTANCE, CANDY_PER_KILL, MIN_SPACING, RECOVERY_MARGIN,
    RECOVERY_TIME,
};

/// Side effect requested by an enemy during its update
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyEffect {
    /// Burst of confetti at a world position
    Confetti { position: Vec2 },
    /// Candy pieces thrown out from a world position
    CandyBurst { position: Vec2, count: usize },
    /// Points for the kill
    AwardPoints(u32),
    /// The enemy is finished and should leave the match
    Dispose,
}

/// Result of landing a hit on an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already dying or gone; nothing changed
    Ignored,
    /// Survived and is knocked back
    Recovering,
    /// Last hit point gone; the die animation started
    Killed,
}

/// A single pinata
#[derive(Debug)]
pub struct Enemy {
    kind: EnemyKind,
    stats: EnemyStats,
    rig: Arc<EnemyRig>,
    skeleton: Skeleton,
    animation: AnimationState,
    body: Kinematics,
    mode: Mode,
    state_machine: EnemyStateMachine,
    hits: u32,
    /// Walking in to strike; cleared while the player is lining up a blow
    attacking: bool,
    /// Side of the player the knockback heads to: -1 left, +1 right
    recovery_side: f32,
    recovery_target_x: f32,
}

impl Enemy {
    /// Create an enemy standing at the given position
    pub fn new(kind: EnemyKind, rig: Arc<EnemyRig>, x: f32, y: f32) -> Self {
        let stats = kind.stats();
        let mut skeleton = Skeleton::new(Arc::clone(&rig.data));
        skeleton.set_position(Vec2::new(x, y));
        skeleton.set_skin(Some(rig.skin(Mode::Neutral)));

        let mut animation = AnimationState::new();
        animation.set_animation(BASE_TRACK, &rig.walk, true);

        Self {
            kind,
            stats,
            rig,
            skeleton,
            animation,
            body: Kinematics::at(x, y),
            mode: Mode::Neutral,
            state_machine: EnemyStateMachine::new(),
            hits: stats.max_hits,
            attacking: true,
            recovery_side: 0.0,
            recovery_target_x: x,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn stats(&self) -> &EnemyStats {
        &self.stats
    }

    pub fn x(&self) -> f32 {
        self.body.x()
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn set_x(&mut self, x: f32) {
        self.body.set_x(x);
        self.skeleton.set_position(self.body.position);
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn state(&self) -> EnemyState {
        self.state_machine.state()
    }

    /// Seconds spent in the current state
    pub fn state_time(&self) -> f32 {
        self.state_machine.state_time()
    }

    pub fn hits_remaining(&self) -> u32 {
        self.hits
    }

    /// Remaining rest time, `None` when not recovering
    pub fn recovery_remaining(&self) -> Option<f32> {
        self.state_machine.recovery_remaining()
    }

    pub fn recovery_target_x(&self) -> f32 {
        self.recovery_target_x
    }

    pub fn is_recovering(&self) -> bool {
        self.state_machine.is_recovering()
    }

    /// Dying or already finished
    pub fn is_dying(&self) -> bool {
        !self.state_machine.state().is_alive()
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn set_attacking(&mut self, attacking: bool) {
        self.attacking = attacking;
    }

    /// Stop moving
    pub fn halt(&mut self) {
        self.body.halt();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Commit to a striking side
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.refresh_skin();
    }

    /// Side of the player this enemy fights from
    pub fn side(&self, player_x: f32) -> Mode {
        match self.mode {
            Mode::Neutral => Mode::from_side(self.x(), player_x),
            committed => committed,
        }
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Land one hit
    pub fn hit(&mut self, player_x: f32) -> HitOutcome {
        if !self.state_machine.state().can_be_hit() || self.hits == 0 {
            debug!("{:?} ignored a hit while {:?}", self.kind, self.state());
            return HitOutcome::Ignored;
        }

        self.hits -= 1;
        self.body.halt();

        if self.hits == 0 {
            self.animation
                .set_animation(OVERLAY_TRACK, &self.rig.die, false);
            self.attacking = false;
            self.state_machine.die();
            debug!("{:?} at x={:.1} killed", self.kind, self.x());
            return HitOutcome::Killed;
        }

        let mut side = self.side(player_x);
        if self.kind.knocked_through() {
            side = side.opposite();
            self.mode = side;
        }
        self.recovery_side = if side == Mode::Left { -1.0 } else { 1.0 };
        self.recovery_target_x = self.knockback_target(player_x);
        self.state_machine.start_recovery(RECOVERY_TIME);
        self.refresh_skin();
        debug!(
            "{:?} hit, {} left, recovering to x={:.1}",
            self.kind, self.hits, self.recovery_target_x
        );
        HitOutcome::Recovering
    }

    fn knockback_target(&self, player_x: f32) -> f32 {
        player_x + self.recovery_side * (ATTACK_DISTANCE - RECOVERY_MARGIN)
    }

    fn refresh_skin(&mut self) {
        let mode = if self.state_machine.state() == EnemyState::Engaging {
            self.mode
        } else {
            Mode::Neutral
        };
        self.skeleton.set_skin(Some(self.rig.skin(mode)));
    }

    /// Advance one tick
    ///
    /// `cull_below` is the height under which the enemy has left the world.
    pub fn update(&mut self, dt: f32, player_x: f32, cull_below: f32) -> Vec<EnemyEffect> {
        let mut effects = Vec::new();

        self.skeleton.set_position(self.body.position);
        for event in self.animation.update(dt) {
            match event {
                AnimationEvent::Event { name, .. } if name == DEATH_EVENT => {
                    let position = self.skeleton.point_world_position(self.rig.confetti);
                    effects.push(EnemyEffect::Confetti { position });
                    effects.push(EnemyEffect::CandyBurst {
                        position,
                        count: CANDY_PER_KILL,
                    });
                    effects.push(EnemyEffect::AwardPoints(self.stats.points));
                }
                AnimationEvent::Complete { track, animation }
                    if track == OVERLAY_TRACK && animation == self.rig.die.name =>
                {
                    self.state_machine.finish();
                    effects.push(EnemyEffect::Dispose);
                }
                _ => {}
            }
        }
        self.animation.apply(&mut self.skeleton);

        if self.is_dying() {
            return effects;
        }

        if self.state_machine.is_recovering() {
            self.recovery_target_x = self.knockback_target(player_x);
            let x = move_towards(
                self.x(),
                self.recovery_target_x,
                self.stats.recovery_speed * dt,
            );
            self.body.set_x(x);
            if self.state_machine.update(dt) {
                self.attacking = true;
            }
        } else {
            self.state_machine.update(dt);
            if self.attacking {
                let direction = (player_x - self.x()).signum();
                self.body.velocity.x = direction * self.stats.approach_speed;
            }
            self.body.integrate(dt);
            let in_range = (self.x() - player_x).abs() < ATTACK_DISTANCE;
            self.state_machine.set_in_range(in_range);
        }

        self.skeleton.set_flip_x(self.x() < player_x);
        self.refresh_skin();
        self.skeleton.set_position(self.body.position);

        if self.body.y() < cull_below {
            debug!("{:?} left the world at y={:.1}", self.kind, self.body.y());
            self.state_machine.finish();
            effects.push(EnemyEffect::Dispose);
        }

        effects
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_skeleton(&self.skeleton);
    }
}

/// Push living enemies apart until no two are closer than `MIN_SPACING`
///
/// Enemies left of the player are pushed further left and those on the
/// right further right, so nobody is shoved into the player. The pair
/// straddling the player is separated around its midpoint first.
pub fn enforce_spacing(enemies: &mut [&mut Enemy], player_x: f32) {
    let mut order: Vec<usize> = (0..enemies.len())
        .filter(|&index| enemies[index].state().is_spaced())
        .collect();
    if order.len() < 2 {
        return;
    }
    order.sort_by(|&a, &b| enemies[a].x().total_cmp(&enemies[b].x()));

    let split = order.partition_point(|&index| enemies[index].x() < player_x);

    if split > 0 && split < order.len() {
        let (left, right) = (order[split - 1], order[split]);
        let gap = enemies[right].x() - enemies[left].x();
        if gap < MIN_SPACING {
            let middle = (enemies[left].x() + enemies[right].x()) / 2.0;
            enemies[left].set_x(middle - MIN_SPACING / 2.0);
            enemies[right].set_x(middle + MIN_SPACING / 2.0);
        }
    }

    for pair in (0..split).rev().collect::<Vec<_>>().windows(2) {
        let (near, far) = (order[pair[0]], order[pair[1]]);
        let limit = enemies[near].x() - MIN_SPACING;
        if enemies[far].x() > limit {
            enemies[far].set_x(limit);
        }
    }

    for pair in order[split..].windows(2) {
        let (near, far) = (pair[0], pair[1]);
        let limit = enemies[near].x() + MIN_SPACING;
        if enemies[far].x() < limit {
            enemies[far].set_x(limit);
        }
    }
}
