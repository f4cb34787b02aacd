// Track-based animation playback
//
// Each track plays one entry at a time and may hold a queue of entries that
// take over once the current one finishes. Instead of listener callbacks,
// `update` returns the start/event/complete occurrences of that tick so the
// owning agent can branch on them synchronously.

use std::collections::VecDeque;
use std::sync::Arc;

use super::data::AnimationClip;
use super::pose::{PoseLayer, Skeleton};

/// Something that happened on a track during `AnimationState::update`
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationEvent {
    /// An entry became current and began playing
    Start { track: usize, animation: String },
    /// A keyed event was crossed
    Event {
        track: usize,
        name: String,
        payload: Option<String>,
    },
    /// An entry reached its end (every loop, for looping entries)
    Complete { track: usize, animation: String },
}

/// Playback state of one animation on one track
#[derive(Debug, Clone)]
pub struct TrackEntry {
    clip: Arc<AnimationClip>,
    looping: bool,
    /// Extra wait after the previous entry ends before this one starts
    delay: f32,
    time: f32,
    /// Time at which a queued successor may take over
    end_time: f32,
    started: bool,
    advanced: bool,
    completed: bool,
}

impl TrackEntry {
    fn new(clip: Arc<AnimationClip>, looping: bool, delay: f32) -> Self {
        let end_time = clip.duration;
        Self {
            clip,
            looping,
            delay: delay.max(0.0),
            time: 0.0,
            end_time,
            started: false,
            advanced: false,
            completed: false,
        }
    }

    pub fn animation_name(&self) -> &str {
        &self.clip.name
    }

    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Time played since this entry became current
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Check if a one-shot entry has played to its end
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// End of the loop cycle currently playing
    fn cycle_end(&self) -> f32 {
        let duration = self.clip.duration;
        if duration <= 0.0 {
            self.time
        } else {
            ((self.time / duration).floor() + 1.0) * duration
        }
    }

    /// Time within the clip, wrapped for looping entries
    fn local_time(&self) -> f32 {
        let duration = self.clip.duration;
        if duration <= 0.0 {
            0.0
        } else if self.looping {
            self.time % duration
        } else {
            self.time.min(duration)
        }
    }

    /// Collect keyed events and completions crossed between `previous` and
    /// the current time
    fn collect(&mut self, track: usize, previous: f32, events: &mut Vec<AnimationEvent>) {
        let first = !self.advanced;
        self.advanced = true;
        let duration = self.clip.duration;

        if self.looping && duration > 0.0 {
            let mut cycle = (previous / duration).floor();
            loop {
                let cycle_start = cycle * duration;
                if cycle_start > self.time {
                    break;
                }
                let from = previous - cycle_start;
                let to = (self.time - cycle_start).min(duration);
                self.collect_keys(track, from, to, first && cycle == 0.0, events);

                let cycle_end = cycle_start + duration;
                if cycle_end > previous && cycle_end <= self.time {
                    events.push(AnimationEvent::Complete {
                        track,
                        animation: self.clip.name.clone(),
                    });
                }
                cycle += 1.0;
            }
        } else {
            let to = self.time.min(duration);
            self.collect_keys(track, previous, to, first, events);
            if !self.completed && self.time >= duration {
                self.completed = true;
                events.push(AnimationEvent::Complete {
                    track,
                    animation: self.clip.name.clone(),
                });
            }
        }
    }

    fn collect_keys(
        &self,
        track: usize,
        from: f32,
        to: f32,
        inclusive: bool,
        events: &mut Vec<AnimationEvent>,
    ) {
        for key in self.clip.events() {
            let after_start = key.time > from || (inclusive && key.time >= from);
            if after_start && key.time <= to {
                events.push(AnimationEvent::Event {
                    track,
                    name: key.name.clone(),
                    payload: key.payload.clone(),
                });
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Track {
    current: Option<TrackEntry>,
    queue: VecDeque<TrackEntry>,
}

/// Animation playback across any number of tracks
///
/// Track 0 carries locomotion and combat; higher tracks are overlays that
/// play independently of it.
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    tracks: Vec<Track>,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    fn track_mut(&mut self, track: usize) -> &mut Track {
        if track >= self.tracks.len() {
            self.tracks.resize_with(track + 1, Track::default);
        }
        &mut self.tracks[track]
    }

    /// Replace whatever is playing on `track`, dropping anything queued
    pub fn set_animation(&mut self, track: usize, clip: &Arc<AnimationClip>, looping: bool) {
        let slot = self.track_mut(track);
        slot.queue.clear();
        slot.current = Some(TrackEntry::new(Arc::clone(clip), looping, 0.0));
    }

    /// Queue an animation after the last entry on `track`
    ///
    /// A looping current entry hands over at the end of its running cycle.
    /// On an empty track the animation starts immediately.
    pub fn add_animation(
        &mut self,
        track: usize,
        clip: &Arc<AnimationClip>,
        looping: bool,
        delay: f32,
    ) {
        let slot = self.track_mut(track);
        let entry = TrackEntry::new(Arc::clone(clip), looping, delay);
        match slot.current.as_mut() {
            None => slot.current = Some(entry),
            Some(current) => {
                if slot.queue.is_empty() && current.looping {
                    current.end_time = current.cycle_end();
                }
                slot.queue.push_back(entry);
            }
        }
    }

    /// Stop playback on a track
    pub fn clear_track(&mut self, track: usize) {
        if let Some(slot) = self.tracks.get_mut(track) {
            slot.current = None;
            slot.queue.clear();
        }
    }

    pub fn current(&self, track: usize) -> Option<&TrackEntry> {
        self.tracks.get(track).and_then(|slot| slot.current.as_ref())
    }

    /// Name of the animation currently on `track`
    pub fn current_animation_name(&self, track: usize) -> Option<&str> {
        self.current(track).map(TrackEntry::animation_name)
    }

    /// Check whether `name` is the current animation on `track`
    pub fn is_playing(&self, track: usize, name: &str) -> bool {
        self.current_animation_name(track) == Some(name)
    }

    /// Advance every track by `dt` and report what happened, in track order
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let mut events = Vec::new();

        for (index, slot) in self.tracks.iter_mut().enumerate() {
            let Some(entry) = slot.current.as_mut() else {
                continue;
            };

            if !entry.started {
                entry.started = true;
                events.push(AnimationEvent::Start {
                    track: index,
                    animation: entry.clip.name.clone(),
                });
            }

            let previous = entry.time;
            entry.time += dt.max(0.0);
            entry.collect(index, previous, &mut events);

            let hand_over = slot
                .queue
                .front()
                .is_some_and(|next| entry.time >= entry.end_time + next.delay);

            if hand_over {
                if let Some(mut next) = slot.queue.pop_front() {
                    next.started = true;
                    events.push(AnimationEvent::Start {
                        track: index,
                        animation: next.clip.name.clone(),
                    });
                    slot.current = Some(next);
                }
            }
        }

        events
    }

    /// Resolve the current entries onto the skeleton's pose
    pub fn apply(&self, skeleton: &mut Skeleton) {
        let pose = self
            .tracks
            .iter()
            .enumerate()
            .filter_map(|(track, slot)| {
                slot.current.as_ref().map(|entry| PoseLayer {
                    track,
                    clip: Arc::clone(&entry.clip),
                    time: entry.local_time(),
                })
            })
            .collect();
        skeleton.set_pose(pose);
    }
}
