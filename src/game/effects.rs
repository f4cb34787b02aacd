// Short-lived scenery: candy, confetti, ground tiles and the game-over timer

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::kinematics::Kinematics;
use crate::engine::renderer::{RenderSurface, Viewport};

/// Downward pull on candy (units/second²)
pub const CANDY_GRAVITY: f32 = 700.0;
/// Fastest a candy piece leaves the burst (units/second)
pub const CANDY_MAX_SPEED: f32 = 700.0;
/// Fastest a candy piece spins (degrees/second)
pub const CANDY_MAX_SPIN: f32 = 300.0;
/// Height below which candy is gone
pub const CANDY_FLOOR: f32 = -200.0;
/// Sprite regions of the candy set
pub const CANDY_REGIONS: [&str; 4] = ["candy-cane", "candy-corn", "lollipop", "wrapped"];

/// Seconds a confetti burst plays
pub const CONFETTI_LIFETIME: f32 = 1.5;

/// Draw depth of ground tiles (behind everything else)
pub const BACKGROUND_DEPTH: i32 = 100;
/// Atlas region repeated over a ground tile
pub const PLATFORM_REGION: &str = "platform";

/// A piece of candy thrown out of a bursting pinata
#[derive(Debug, Clone)]
pub struct Candy {
    body: Kinematics,
    rotation: f32,
    spin: f32,
    region: &'static str,
}

impl Candy {
    /// Throw a candy piece upward and outward from `position`
    pub fn burst<R: Rng + ?Sized>(position: Vec2, rng: &mut R) -> Self {
        let mut body = Kinematics::at(position.x, position.y);
        body.set_motion(
            rng.gen_range(0.0..=CANDY_MAX_SPEED),
            rng.gen_range(45.0..=135.0),
        );
        body.set_gravity(CANDY_GRAVITY, 270.0);

        Self {
            body,
            rotation: 0.0,
            spin: rng.gen_range(-CANDY_MAX_SPIN..=CANDY_MAX_SPIN),
            region: CANDY_REGIONS.choose(rng).copied().unwrap_or(CANDY_REGIONS[0]),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Advance; returns true once the candy has fallen out of the world
    pub fn update(&mut self, dt: f32) -> bool {
        self.rotation += self.spin * dt;
        self.body.integrate(dt);
        self.body.y() < CANDY_FLOOR
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_sprite(self.region, self.body.position, self.rotation);
    }
}

/// Confetti burst marking a kill
#[derive(Debug, Clone)]
pub struct Confetti {
    position: Vec2,
    elapsed: f32,
}

impl Confetti {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            elapsed: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Advance; returns true once the effect has finished
    pub fn update(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= CONFETTI_LIFETIME
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_effect("confetti", self.position, self.elapsed);
    }
}

/// One stretch of tiled ground
#[derive(Debug, Clone)]
pub struct BackgroundTile {
    position: Vec2,
    size: Vec2,
}

impl BackgroundTile {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Returns true once the tile is entirely below the view
    pub fn update(&mut self, view: &Viewport) -> bool {
        self.position.y + self.size.y < view.bottom()
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_tiled(PLATFORM_REGION, self.position, self.size);
    }
}

/// Counts down to the end of the match
#[derive(Debug, Clone)]
pub struct GameOverTimer {
    remaining: f32,
}

impl GameOverTimer {
    pub fn new(delay: f32) -> Self {
        Self { remaining: delay }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advance; returns true when the time is up
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

/// Width of a ground tile covering `view_width`, in whole tile units
pub fn tile_width(view_width: f32, tile_unit: f32) -> f32 {
    (view_width / tile_unit).ceil() * tile_unit
}
