// Everything that lives in a match, as one entity type
//
// Agents report what they want done (sounds, spawns, score, disposal) and
// this layer carries it out against the `MatchContext` and the manager.

use log::{debug, info};

use crate::engine::entity::{ActContext, Entity, EntityId};
use crate::engine::renderer::RenderSurface;
use crate::game::characters::{Enemy, EnemyEffect, Player, PlayerEffect};
use crate::game::context::MatchContext;
use crate::game::effects::{
    BackgroundTile, Candy, Confetti, GameOverTimer, BACKGROUND_DEPTH,
};

/// A live object of the match
#[derive(Debug)]
pub enum Actor {
    Player(Box<Player>),
    Enemy(Box<Enemy>),
    Candy(Candy),
    Confetti(Confetti),
    Background(BackgroundTile),
    GameOverTimer(GameOverTimer),
}

impl Actor {
    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Self::Player(player) => Some(&**player),
            _ => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match self {
            Self::Enemy(enemy) => Some(&**enemy),
            _ => None,
        }
    }

    pub fn as_enemy_mut(&mut self) -> Option<&mut Enemy> {
        match self {
            Self::Enemy(enemy) => Some(&mut **enemy),
            _ => None,
        }
    }
}

fn act_player(player: &mut Player, cx: &mut ActContext<'_, Actor>, dt: f32) {
    let keys = cx.shared.keys;
    let effects = {
        let mut enemies: Vec<(EntityId, &mut Enemy)> = cx
            .others
            .iter_mut()
            .filter_map(|(id, actor)| actor.as_enemy_mut().map(|enemy| (id, enemy)))
            .collect();
        player.update(dt, keys, &mut enemies, &mut cx.shared.rng)
    };

    cx.shared.player_x = player.x();
    cx.shared.camera.follow_x(player.x());

    for effect in effects {
        match effect {
            PlayerEffect::Sound(sound) => cx.shared.play_sound(sound),
            PlayerEffect::EnableSpawning => {
                if !cx.shared.spawning_enabled {
                    info!("Intro finished, enemies incoming");
                    cx.shared.spawning_enabled = true;
                }
            }
            PlayerEffect::GameOver { delay } => {
                info!("Game over in {delay:.1}s");
                cx.spawn(Actor::GameOverTimer(GameOverTimer::new(delay)));
            }
        }
    }
}

fn act_enemy(enemy: &mut Enemy, cx: &mut ActContext<'_, Actor>, dt: f32) {
    let cull_below = cx.shared.cull_height();
    for effect in enemy.update(dt, cx.shared.player_x, cull_below) {
        match effect {
            EnemyEffect::Confetti { position } => {
                cx.spawn(Actor::Confetti(Confetti::new(position)));
            }
            EnemyEffect::CandyBurst { position, count } => {
                for _ in 0..count {
                    let candy = Candy::burst(position, &mut cx.shared.rng);
                    cx.spawn(Actor::Candy(candy));
                }
            }
            EnemyEffect::AwardPoints(points) => {
                cx.shared.scoreboard.add(points);
                debug!(
                    "{:?} burst for {points}, score {}",
                    enemy.kind(),
                    cx.shared.scoreboard.score()
                );
            }
            EnemyEffect::Dispose => cx.dispose(),
        }
    }
}

impl Entity for Actor {
    type Context = MatchContext;

    fn act(&mut self, cx: &mut ActContext<'_, Self>, dt: f32) {
        match self {
            Self::Player(player) => act_player(player, cx, dt),
            Self::Enemy(enemy) => act_enemy(enemy, cx, dt),
            Self::Candy(candy) => {
                if candy.update(dt) {
                    cx.dispose();
                }
            }
            Self::Confetti(confetti) => {
                if confetti.update(dt) {
                    cx.dispose();
                }
            }
            Self::Background(tile) => {
                let view = cx.shared.camera.viewport_bounds();
                if tile.update(&view) {
                    cx.dispose();
                }
            }
            Self::GameOverTimer(timer) => {
                if timer.update(dt) {
                    info!("Match over, final score {}", cx.shared.scoreboard.score());
                    cx.shared.game_over = true;
                    cx.dispose();
                }
            }
        }
    }

    fn draw(&self, surface: &mut dyn RenderSurface, _dt: f32) {
        match self {
            Self::Player(player) => player.draw(surface),
            Self::Enemy(enemy) => enemy.draw(surface),
            Self::Candy(candy) => candy.draw(surface),
            Self::Confetti(confetti) => confetti.draw(surface),
            Self::Background(tile) => tile.draw(surface),
            Self::GameOverTimer(_) => {}
        }
    }

    fn depth(&self) -> i32 {
        match self {
            Self::Background(_) => BACKGROUND_DEPTH,
            _ => 0,
        }
    }

    fn destroy(&mut self, _context: &mut MatchContext) {
        if let Self::Enemy(enemy) = self {
            debug!("{:?} removed at x={:.1}", enemy.kind(), enemy.x());
        }
    }
}
