// Character rigs
//
// The built-in character data and the handles resolved from it. Every name
// the gameplay code needs is looked up once in `Rigs::load`, so missing data
// fails the match construction instead of a tick.

use std::sync::Arc;

use crate::engine::skeleton::{
    AnimationClip, BoneId, PointAttachment, SkeletonData, SkeletonError, SkeletonLibrary, SkinId,
};

use super::state::Mode;
use super::stats::EnemyKind;

/// Attack animations the player picks from at random
pub const ATTACK_ANIMATIONS: [&str; 12] = [
    "back-flip-kick",
    "cartwheel",
    "flip-kick",
    "kick-left",
    "kick-right",
    "punch-left",
    "punch-right",
    "slide-kick",
    "split-punch",
    "tackle",
    "uppercut",
    "windmill",
];

/// Primary track: locomotion and combat
pub const BASE_TRACK: usize = 0;
/// Overlay track carrying the die animation
pub const OVERLAY_TRACK: usize = 1;

/// Event that applies the player's damage mid-attack
pub const ATTACK_EVENT: &str = "attack";
/// Event carrying a sound name as payload
pub const SOUND_EVENT: &str = "sound";
/// Event fired mid-death when an enemy bursts
pub const DEATH_EVENT: &str = "death";

/// Build the player rig: intro, idle, miss, hurt and the attack set
fn player_data() -> SkeletonData {
    let mut data = SkeletonData::new("player")
        .with_animation(AnimationClip::new("stance", 1.0))
        .with_animation(AnimationClip::new("stand", 1.0))
        .with_animation(AnimationClip::new("miss", 0.5))
        .with_animation(AnimationClip::new("hit", 1.0))
        .with_bone("body", 0.0, 120.0)
        .with_bone("sign-miss", 0.0, 260.0);

    for name in ATTACK_ANIMATIONS {
        data = data.with_animation(
            AnimationClip::new(name, 0.5)
                .with_event_payload(0.0625, SOUND_EVENT, "swoosh")
                .with_event(0.25, ATTACK_EVENT),
        );
    }
    data
}

/// Build an enemy rig: walk loop, die overlay, facing skins and confetti point
fn enemy_data(name: &str, body_height: f32) -> SkeletonData {
    SkeletonData::new(name)
        .with_animation(AnimationClip::new("walk", 0.75))
        .with_animation(AnimationClip::new("die", 1.0).with_event(0.5, DEATH_EVENT))
        .with_skin("none")
        .with_skin("left")
        .with_skin("right")
        .with_bone("body", 0.0, body_height)
        .with_point("confetti", "confetti", "body", 0.0, body_height / 2.0)
}

/// The character data shipped with the game
pub fn standard_library() -> SkeletonLibrary {
    let mut library = SkeletonLibrary::new();
    library.insert(player_data());
    library.insert(enemy_data(EnemyKind::Donkey.rig_name(), 110.0));
    library.insert(enemy_data(EnemyKind::Hat.rig_name(), 130.0));
    library.insert(enemy_data(EnemyKind::SpikeBall.rig_name(), 90.0));
    library
}

fn require_event(
    data: &SkeletonData,
    clip: &Arc<AnimationClip>,
    event: &str,
) -> Result<(), SkeletonError> {
    if clip.has_event(event) {
        Ok(())
    } else {
        Err(SkeletonError::MissingEvent {
            skeleton: data.name().to_string(),
            animation: clip.name.clone(),
            event: event.to_string(),
        })
    }
}

/// Resolved handles for the player
#[derive(Debug)]
pub struct PlayerRig {
    pub data: Arc<SkeletonData>,
    pub stance: Arc<AnimationClip>,
    pub stand: Arc<AnimationClip>,
    pub miss: Arc<AnimationClip>,
    pub hit: Arc<AnimationClip>,
    pub attacks: Vec<Arc<AnimationClip>>,
    /// Bone holding the "miss" sign, mirrored with the player's facing
    pub sign_miss: BoneId,
}

impl PlayerRig {
    pub fn load(library: &SkeletonLibrary) -> Result<Self, SkeletonError> {
        let data = library.get("player")?;
        let attacks = ATTACK_ANIMATIONS
            .iter()
            .map(|name| {
                let clip = data.find_animation(name)?;
                require_event(&data, &clip, ATTACK_EVENT)?;
                Ok(clip)
            })
            .collect::<Result<Vec<_>, SkeletonError>>()?;

        Ok(Self {
            stance: data.find_animation("stance")?,
            stand: data.find_animation("stand")?,
            miss: data.find_animation("miss")?,
            hit: data.find_animation("hit")?,
            attacks,
            sign_miss: data.find_bone("sign-miss")?,
            data,
        })
    }
}

/// Resolved handles for one enemy kind
#[derive(Debug)]
pub struct EnemyRig {
    pub data: Arc<SkeletonData>,
    pub walk: Arc<AnimationClip>,
    pub die: Arc<AnimationClip>,
    skin_none: SkinId,
    skin_left: SkinId,
    skin_right: SkinId,
    /// Where the confetti burst appears
    pub confetti: PointAttachment,
}

impl EnemyRig {
    pub fn load(library: &SkeletonLibrary, kind: EnemyKind) -> Result<Self, SkeletonError> {
        let data = library.get(kind.rig_name())?;
        let die = data.find_animation("die")?;
        require_event(&data, &die, DEATH_EVENT)?;

        Ok(Self {
            walk: data.find_animation("walk")?,
            die,
            skin_none: data.find_skin(Mode::Neutral.skin_name())?,
            skin_left: data.find_skin(Mode::Left.skin_name())?,
            skin_right: data.find_skin(Mode::Right.skin_name())?,
            confetti: data.find_point("confetti", "confetti")?,
            data,
        })
    }

    /// Skin shown for a combat mode
    pub fn skin(&self, mode: Mode) -> SkinId {
        match mode {
            Mode::Left => self.skin_left,
            Mode::Right => self.skin_right,
            Mode::Neutral => self.skin_none,
        }
    }
}

/// Every rig a match needs
#[derive(Debug, Clone)]
pub struct Rigs {
    pub player: Arc<PlayerRig>,
    donkey: Arc<EnemyRig>,
    hat: Arc<EnemyRig>,
    spike_ball: Arc<EnemyRig>,
}

impl Rigs {
    /// Resolve all character data, failing on the first missing piece
    pub fn load(library: &SkeletonLibrary) -> Result<Self, SkeletonError> {
        Ok(Self {
            player: Arc::new(PlayerRig::load(library)?),
            donkey: Arc::new(EnemyRig::load(library, EnemyKind::Donkey)?),
            hat: Arc::new(EnemyRig::load(library, EnemyKind::Hat)?),
            spike_ball: Arc::new(EnemyRig::load(library, EnemyKind::SpikeBall)?),
        })
    }

    pub fn enemy(&self, kind: EnemyKind) -> &Arc<EnemyRig> {
        match kind {
            EnemyKind::Donkey => &self.donkey,
            EnemyKind::Hat => &self.hat,
            EnemyKind::SpikeBall => &self.spike_ball,
        }
    }
}
