// Render sink
//
// Drawing itself belongs to the host engine. The simulation only describes
// what to draw through `RenderSurface`; `TraceSurface` logs those calls and
// `RecordingSurface` keeps them for inspection.

mod camera;

pub use camera::{Camera, Viewport};

use glam::Vec2;
use log::trace;

use crate::engine::skeleton::Skeleton;

/// Something the simulation can draw onto
pub trait RenderSurface {
    /// Draw a posed skeleton
    fn draw_skeleton(&mut self, skeleton: &Skeleton);

    /// Draw a single atlas region centred at `position`
    fn draw_sprite(&mut self, region: &str, position: Vec2, rotation: f32);

    /// Fill a rectangle by repeating an atlas region
    fn draw_tiled(&mut self, region: &str, position: Vec2, size: Vec2);

    /// Draw a particle effect `elapsed` seconds into its playback
    fn draw_effect(&mut self, effect: &str, position: Vec2, elapsed: f32);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Skeleton { rig: String, position: Vec2 },
    Sprite { region: String, position: Vec2 },
    Tiled { region: String, position: Vec2, size: Vec2 },
    Effect { effect: String, position: Vec2 },
}

/// Surface that keeps every draw call of the last frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn draw_skeleton(&mut self, skeleton: &Skeleton) {
        self.calls.push(DrawCall::Skeleton {
            rig: skeleton.data().name().to_string(),
            position: skeleton.position(),
        });
    }

    fn draw_sprite(&mut self, region: &str, position: Vec2, _rotation: f32) {
        self.calls.push(DrawCall::Sprite {
            region: region.to_string(),
            position,
        });
    }

    fn draw_tiled(&mut self, region: &str, position: Vec2, size: Vec2) {
        self.calls.push(DrawCall::Tiled {
            region: region.to_string(),
            position,
            size,
        });
    }

    fn draw_effect(&mut self, effect: &str, position: Vec2, _elapsed: f32) {
        self.calls.push(DrawCall::Effect {
            effect: effect.to_string(),
            position,
        });
    }
}

/// Surface that only logs draw calls at trace level
#[derive(Debug, Default)]
pub struct TraceSurface {
    draw_count: u64,
}

impl TraceSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total draw calls received
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }
}

impl RenderSurface for TraceSurface {
    fn draw_skeleton(&mut self, skeleton: &Skeleton) {
        self.draw_count += 1;
        let animations: Vec<&str> = skeleton
            .pose()
            .iter()
            .map(|layer| layer.clip.name.as_str())
            .collect();
        trace!(
            "skeleton {} at {:?} flip={} skin={:?} pose={:?}",
            skeleton.data().name(),
            skeleton.position(),
            skeleton.flip_x(),
            skeleton.skin_name(),
            animations
        );
    }

    fn draw_sprite(&mut self, region: &str, position: Vec2, rotation: f32) {
        self.draw_count += 1;
        trace!("sprite {region} at {position:?} rot={rotation:.1}");
    }

    fn draw_tiled(&mut self, region: &str, position: Vec2, size: Vec2) {
        self.draw_count += 1;
        trace!("tiled {region} at {position:?} size={size:?}");
    }

    fn draw_effect(&mut self, effect: &str, position: Vec2, elapsed: f32) {
        self.draw_count += 1;
        trace!("effect {effect} at {position:?} t={elapsed:.2}");
    }
}
