// Skeleton data: named animations, skins, bones and point attachments

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;

use super::SkeletonError;

/// An event keyed at a fixed time inside an animation
#[derive(Debug, Clone, PartialEq)]
pub struct EventKey {
    /// Time from the start of the animation, in seconds
    pub time: f32,
    /// Event name (e.g. "attack", "death", "sound")
    pub name: String,
    /// Optional string payload (e.g. the sound to play)
    pub payload: Option<String>,
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g. "walk", "die", "uppercut")
    pub name: String,
    /// Length of one playthrough in seconds
    pub duration: f32,
    /// Keyed events, sorted by time
    events: Vec<EventKey>,
}

impl AnimationClip {
    /// Create a new animation clip with no events
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration: duration.max(0.0),
            events: Vec::new(),
        }
    }

    /// Key an event at `time`
    pub fn with_event(self, time: f32, name: &str) -> Self {
        self.with_key(EventKey {
            time,
            name: name.to_string(),
            payload: None,
        })
    }

    /// Key an event carrying a string payload at `time`
    pub fn with_event_payload(self, time: f32, name: &str, payload: &str) -> Self {
        self.with_key(EventKey {
            time,
            name: name.to_string(),
            payload: Some(payload.to_string()),
        })
    }

    fn with_key(mut self, key: EventKey) -> Self {
        let key = EventKey {
            time: key.time.clamp(0.0, self.duration),
            ..key
        };
        let index = self.events.partition_point(|existing| existing.time <= key.time);
        self.events.insert(index, key);
        self
    }

    /// All keyed events in time order
    pub fn events(&self) -> &[EventKey] {
        &self.events
    }

    /// Check whether an event with this name is keyed anywhere in the clip
    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|key| key.name == name)
    }
}

/// Index of a skin inside its skeleton data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkinId(pub(crate) usize);

/// Index of a bone inside its skeleton data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneId(pub(crate) usize);

/// Setup-pose bone
#[derive(Debug, Clone)]
pub struct BoneData {
    pub name: String,
    /// Offset from the skeleton origin
    pub offset: Vec2,
}

/// A named point attached to a bone, resolved once at load time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAttachment {
    pub bone: BoneId,
    /// Offset from the bone
    pub offset: Vec2,
}

#[derive(Debug, Clone)]
struct PointData {
    slot: String,
    name: String,
    bone: BoneId,
    offset: Vec2,
}

/// Immutable, shareable description of a character rig
#[derive(Debug, Clone)]
pub struct SkeletonData {
    name: String,
    animations: HashMap<String, Arc<AnimationClip>>,
    skins: Vec<String>,
    bones: Vec<BoneData>,
    points: Vec<PointData>,
}

impl SkeletonData {
    /// Create empty skeleton data with a root bone
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            animations: HashMap::new(),
            skins: Vec::new(),
            bones: vec![BoneData {
                name: "root".to_string(),
                offset: Vec2::ZERO,
            }],
            points: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an animation clip, replacing any clip with the same name
    pub fn with_animation(mut self, clip: AnimationClip) -> Self {
        self.animations.insert(clip.name.clone(), Arc::new(clip));
        self
    }

    /// Add a named skin
    pub fn with_skin(mut self, name: &str) -> Self {
        if !self.skins.iter().any(|skin| skin == name) {
            self.skins.push(name.to_string());
        }
        self
    }

    /// Add a bone at an offset from the skeleton origin
    pub fn with_bone(mut self, name: &str, x: f32, y: f32) -> Self {
        self.bones.push(BoneData {
            name: name.to_string(),
            offset: Vec2::new(x, y),
        });
        self
    }

    /// Add a point attachment in `slot` bound to `bone`
    ///
    /// Unknown bones fall back to the root bone.
    pub fn with_point(mut self, slot: &str, name: &str, bone: &str, x: f32, y: f32) -> Self {
        let bone = self.find_bone(bone).unwrap_or(BoneId(0));
        self.points.push(PointData {
            slot: slot.to_string(),
            name: name.to_string(),
            bone,
            offset: Vec2::new(x, y),
        });
        self
    }

    /// Remove an animation (used to model incomplete character data)
    pub fn without_animation(mut self, name: &str) -> Self {
        self.animations.remove(name);
        self
    }

    pub fn find_animation(&self, name: &str) -> Result<Arc<AnimationClip>, SkeletonError> {
        self.animations
            .get(name)
            .cloned()
            .ok_or_else(|| SkeletonError::MissingAnimation {
                skeleton: self.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn find_skin(&self, name: &str) -> Result<SkinId, SkeletonError> {
        self.skins
            .iter()
            .position(|skin| skin == name)
            .map(SkinId)
            .ok_or_else(|| SkeletonError::MissingSkin {
                skeleton: self.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn find_bone(&self, name: &str) -> Result<BoneId, SkeletonError> {
        self.bones
            .iter()
            .position(|bone| bone.name == name)
            .map(BoneId)
            .ok_or_else(|| SkeletonError::MissingBone {
                skeleton: self.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn find_point(&self, slot: &str, name: &str) -> Result<PointAttachment, SkeletonError> {
        self.points
            .iter()
            .find(|point| point.slot == slot && point.name == name)
            .map(|point| PointAttachment {
                bone: point.bone,
                offset: point.offset,
            })
            .ok_or_else(|| SkeletonError::MissingAttachment {
                skeleton: self.name.clone(),
                slot: slot.to_string(),
                name: name.to_string(),
            })
    }

    pub fn skin_name(&self, skin: SkinId) -> Option<&str> {
        self.skins.get(skin.0).map(String::as_str)
    }

    pub fn bones(&self) -> &[BoneData] {
        &self.bones
    }
}

/// Registry of loaded skeleton data, keyed by rig name
#[derive(Debug, Clone, Default)]
pub struct SkeletonLibrary {
    skeletons: HashMap<String, Arc<SkeletonData>>,
}

impl SkeletonLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register skeleton data under its own name
    pub fn insert(&mut self, data: SkeletonData) {
        self.skeletons.insert(data.name().to_string(), Arc::new(data));
    }

    /// Remove a rig (used to model missing character data)
    pub fn remove(&mut self, name: &str) -> Option<Arc<SkeletonData>> {
        self.skeletons.remove(name)
    }

    pub fn get(&self, name: &str) -> Result<Arc<SkeletonData>, SkeletonError> {
        self.skeletons
            .get(name)
            .cloned()
            .ok_or_else(|| SkeletonError::MissingSkeleton(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.skeletons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skeletons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SkeletonData {
        SkeletonData::new("sample")
            .with_animation(AnimationClip::new("die", 1.0).with_event(0.4, "death"))
            .with_skin("none")
            .with_skin("left")
            .with_bone("body", 0.0, 100.0)
            .with_point("confetti", "confetti", "body", 0.0, 40.0)
    }

    #[test]
    fn test_clip_events_sorted_and_clamped() {
        let clip = AnimationClip::new("kick", 0.5)
            .with_event(0.3, "attack")
            .with_event_payload(0.1, "sound", "swoosh")
            .with_event(9.0, "late");

        let times: Vec<f32> = clip.events().iter().map(|key| key.time).collect();
        assert_eq!(times, vec![0.1, 0.3, 0.5]);
        assert_eq!(clip.events()[0].payload.as_deref(), Some("swoosh"));
        assert!(clip.has_event("attack"));
        assert!(!clip.has_event("death"));
    }

    #[test]
    fn test_lookups_resolve() {
        let data = sample();
        assert_eq!(data.find_animation("die").unwrap().name, "die");
        assert_eq!(data.find_skin("left").unwrap(), SkinId(1));
        assert_eq!(data.skin_name(SkinId(0)), Some("none"));
        assert_eq!(data.find_bone("body").unwrap(), BoneId(1));

        let point = data.find_point("confetti", "confetti").unwrap();
        assert_eq!(point.bone, BoneId(1));
        assert_eq!(point.offset, Vec2::new(0.0, 40.0));
    }

    #[test]
    fn test_missing_lookups_report_names() {
        let data = sample();
        let err = data.find_animation("walk").unwrap_err();
        assert_eq!(err.to_string(), "Skeleton 'sample' has no animation 'walk'");
        assert!(data.find_skin("right").is_err());
        assert!(data.find_bone("head").is_err());
        assert!(data.find_point("confetti", "streamer").is_err());
    }

    #[test]
    fn test_library_get_and_remove() {
        let mut library = SkeletonLibrary::new();
        library.insert(sample());
        assert_eq!(library.len(), 1);
        assert!(library.get("sample").is_ok());

        library.remove("sample");
        assert!(library.is_empty());
        assert!(matches!(
            library.get("sample"),
            Err(SkeletonError::MissingSkeleton(name)) if name == "sample"
        ));
    }
}
