use std::collections::BTreeMap;

use super::math::Recti;

/// Timing data for one named frame list. Frame rectangles and textures live
/// in the rendering layer; the simulation only needs cadence and collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameList {
    pub frame_count: usize,
    pub frame_duration_ms: f32,
    pub looping: bool,
    pub collider: Recti,
}

/// Event returned from an animation step, consumed the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The active frame list finished a full cycle: once per loop for a
    /// looping list, once ever for a one-shot list.
    Completed { list: &'static str },
}

/// Frame-list clock for one actor.
///
/// Tracks the active list, frame index and elapsed time, the sprite mirror
/// flag, and the hit-immunity window the damage flash runs for.
#[derive(Debug, Clone)]
pub struct SpritePlayer {
    lists: BTreeMap<&'static str, FrameList>,
    active: Option<&'static str>,
    frame: usize,
    elapsed_ms: f32,
    finished: bool,
    pub mirrored: bool,
    immunity_ms: f32,
}

impl Default for SpritePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpritePlayer {
    pub fn new() -> Self {
        Self {
            lists: BTreeMap::new(),
            active: None,
            frame: 0,
            elapsed_ms: 0.0,
            finished: false,
            mirrored: false,
            immunity_ms: 0.0,
        }
    }

    pub fn add_list(&mut self, name: &'static str, list: FrameList) {
        if self.active.is_none() {
            self.active = Some(name);
        }
        self.lists.insert(name, list);
    }

    /// Switches the active list, restarting it from frame zero. Re-setting
    /// the list that is already active does not restart it. Unknown names
    /// leave the player unchanged and return false.
    pub fn set_list(&mut self, name: &'static str) -> bool {
        if self.active == Some(name) {
            return true;
        }
        if !self.lists.contains_key(name) {
            return false;
        }
        self.active = Some(name);
        self.frame = 0;
        self.elapsed_ms = 0.0;
        self.finished = false;
        true
    }

    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Collider rect of the active frame list.
    pub fn collider(&self) -> Recti {
        self.active
            .and_then(|name| self.lists.get(name))
            .map(|list| list.collider)
            .unwrap_or_default()
    }

    pub fn trigger_immunity(&mut self, duration_ms: f32) {
        self.immunity_ms = duration_ms;
    }

    pub fn immunity_active(&self) -> bool {
        self.immunity_ms > 0.0
    }

    /// Advances the clock by one tick and reports a completed cycle, if any.
    pub fn update(&mut self, dt_ms: f32) -> Option<AnimationEvent> {
        if self.immunity_ms > 0.0 {
            self.immunity_ms = (self.immunity_ms - dt_ms).max(0.0);
        }

        let name = self.active?;
        let list = *self.lists.get(name)?;
        if self.finished {
            return None;
        }

        self.elapsed_ms += dt_ms;
        while self.elapsed_ms >= list.frame_duration_ms {
            self.elapsed_ms -= list.frame_duration_ms;
            self.frame += 1;
            if self.frame >= list.frame_count {
                if list.looping {
                    self.frame = 0;
                } else {
                    self.frame = list.frame_count - 1;
                    self.finished = true;
                }
                return Some(AnimationEvent::Completed { list: name });
            }
        }
        None
    }
}
