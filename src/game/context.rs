// State shared by every actor during a tick

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::audio::{AudioSink, Sound, SFX_VOLUME};
use crate::engine::renderer::Camera;
use crate::game::characters::KeySnapshot;
use crate::game::scoreboard::{ScoreDisplay, Scoreboard};

/// The "world" handed to each actor's `act`
pub struct MatchContext {
    pub scoreboard: Scoreboard,
    pub audio: Box<dyn AudioSink>,
    pub camera: Camera,
    pub rng: StdRng,
    /// Keys sampled at the start of the tick
    pub keys: KeySnapshot,
    /// Player position as of its last update
    pub player_x: f32,
    /// Set once the player's intro has finished
    pub spawning_enabled: bool,
    /// Set when the game-over timer runs out
    pub game_over: bool,
}

impl MatchContext {
    pub fn new(
        camera: Camera,
        seed: u64,
        audio: Box<dyn AudioSink>,
        display: Box<dyn ScoreDisplay>,
    ) -> Self {
        Self {
            scoreboard: Scoreboard::new(display),
            audio,
            player_x: camera.position.x,
            camera,
            rng: StdRng::seed_from_u64(seed),
            keys: KeySnapshot::default(),
            spawning_enabled: false,
            game_over: false,
        }
    }

    pub fn play_sound(&mut self, sound: Sound) {
        self.audio.play_sound(sound, SFX_VOLUME);
    }

    /// Height under which enemies have left the world: one full view below
    /// the bottom edge of the camera
    pub fn cull_height(&self) -> f32 {
        self.camera.viewport_bounds().bottom() - self.camera.viewport_height()
    }
}
