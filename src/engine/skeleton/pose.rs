// Skeleton instance: position, orientation, skin and the pose applied each tick

use std::sync::Arc;

use glam::Vec2;

use super::data::{AnimationClip, BoneId, PointAttachment, SkeletonData, SkinId};

/// Per-instance bone state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bone {
    pub scale_x: f32,
}

impl Default for Bone {
    fn default() -> Self {
        Self { scale_x: 1.0 }
    }
}

/// One animation layer resolved onto the skeleton by `AnimationState::apply`
#[derive(Debug, Clone)]
pub struct PoseLayer {
    pub track: usize,
    pub clip: Arc<AnimationClip>,
    pub time: f32,
}

/// A posable instance of some `SkeletonData`
#[derive(Debug, Clone)]
pub struct Skeleton {
    data: Arc<SkeletonData>,
    position: Vec2,
    flip_x: bool,
    skin: Option<SkinId>,
    bones: Vec<Bone>,
    pose: Vec<PoseLayer>,
}

impl Skeleton {
    pub fn new(data: Arc<SkeletonData>) -> Self {
        let bones = vec![Bone::default(); data.bones().len()];
        Self {
            data,
            position: Vec2::ZERO,
            flip_x: false,
            skin: None,
            bones,
            pose: Vec::new(),
        }
    }

    pub fn data(&self) -> &Arc<SkeletonData> {
        &self.data
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Whether the skeleton is mirrored horizontally
    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    pub fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }

    pub fn skin(&self) -> Option<SkinId> {
        self.skin
    }

    pub fn skin_name(&self) -> Option<&str> {
        self.skin.and_then(|skin| self.data.skin_name(skin))
    }

    pub fn set_skin(&mut self, skin: Option<SkinId>) {
        self.skin = skin;
    }

    pub fn bone(&self, bone: BoneId) -> Option<&Bone> {
        self.bones.get(bone.0)
    }

    pub fn bone_mut(&mut self, bone: BoneId) -> Option<&mut Bone> {
        self.bones.get_mut(bone.0)
    }

    /// World position of a bone, honouring the horizontal flip
    pub fn bone_world_position(&self, bone: BoneId) -> Vec2 {
        let offset = self
            .data
            .bones()
            .get(bone.0)
            .map(|data| data.offset)
            .unwrap_or(Vec2::ZERO);
        self.position + self.mirror(offset)
    }

    /// World position of a point attachment
    pub fn point_world_position(&self, point: PointAttachment) -> Vec2 {
        self.bone_world_position(point.bone) + self.mirror(point.offset)
    }

    /// Layers applied by the most recent `AnimationState::apply`
    pub fn pose(&self) -> &[PoseLayer] {
        &self.pose
    }

    pub(crate) fn set_pose(&mut self, pose: Vec<PoseLayer>) {
        self.pose = pose;
    }

    fn mirror(&self, offset: Vec2) -> Vec2 {
        if self.flip_x {
            Vec2::new(-offset.x, offset.y)
        } else {
            offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Arc<SkeletonData> {
        Arc::new(
            SkeletonData::new("pinata")
                .with_skin("none")
                .with_skin("right")
                .with_bone("body", 10.0, 100.0)
                .with_bone("sign-miss", 0.0, 200.0)
                .with_point("confetti", "confetti", "body", 5.0, 40.0),
        )
    }

    #[test]
    fn test_point_world_position_follows_flip() {
        let data = data();
        let point = data.find_point("confetti", "confetti").unwrap();
        let mut skeleton = Skeleton::new(data);
        skeleton.set_position(Vec2::new(300.0, 250.0));

        assert_eq!(skeleton.point_world_position(point), Vec2::new(315.0, 390.0));

        skeleton.set_flip_x(true);
        assert_eq!(skeleton.point_world_position(point), Vec2::new(285.0, 390.0));
    }

    #[test]
    fn test_skin_switching() {
        let data = data();
        let right = data.find_skin("right").unwrap();
        let mut skeleton = Skeleton::new(data);
        assert_eq!(skeleton.skin_name(), None);

        skeleton.set_skin(Some(right));
        assert_eq!(skeleton.skin_name(), Some("right"));
    }

    #[test]
    fn test_bone_scale() {
        let data = data();
        let sign = data.find_bone("sign-miss").unwrap();
        let mut skeleton = Skeleton::new(data);
        assert_eq!(skeleton.bone(sign).map(|bone| bone.scale_x), Some(1.0));

        if let Some(bone) = skeleton.bone_mut(sign) {
            bone.scale_x = -1.0;
        }
        assert_eq!(skeleton.bone(sign).map(|bone| bone.scale_x), Some(-1.0));
    }
}
