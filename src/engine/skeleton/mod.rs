// Skeletal animation capability
//
// A minimal stand-in for a skeletal animation runtime: rigs are described by
// `SkeletonData`, posed through a `Skeleton` instance and driven by an
// `AnimationState` whose `update` reports start/event/complete occurrences.

mod data;
mod pose;
mod state;

pub use data::{
    AnimationClip, BoneData, BoneId, EventKey, PointAttachment, SkeletonData, SkeletonLibrary,
    SkinId,
};
pub use pose::{Bone, PoseLayer, Skeleton};
pub use state::{AnimationEvent, AnimationState, TrackEntry};

/// Character data lookup errors
#[derive(Debug, thiserror::Error)]
pub enum SkeletonError {
    #[error("Skeleton not found: {0}")]
    MissingSkeleton(String),

    #[error("Skeleton '{skeleton}' has no animation '{name}'")]
    MissingAnimation { skeleton: String, name: String },

    #[error("Skeleton '{skeleton}' has no skin '{name}'")]
    MissingSkin { skeleton: String, name: String },

    #[error("Skeleton '{skeleton}' has no bone '{name}'")]
    MissingBone { skeleton: String, name: String },

    #[error("Skeleton '{skeleton}' has no attachment '{name}' in slot '{slot}'")]
    MissingAttachment {
        skeleton: String,
        slot: String,
        name: String,
    },

    #[error("Animation '{animation}' of skeleton '{skeleton}' never fires event '{event}'")]
    MissingEvent {
        skeleton: String,
        animation: String,
        event: String,
    },
}
