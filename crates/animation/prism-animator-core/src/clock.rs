//! Playback clock: the global animator timeline.
//!
//! State machine over {Playing, Paused} x {Once, Loop, PingPong}, gated by
//! `enabled`. Invariants:
//! - `animation_time >= 0`
//! - `0 <= current_time <= animation_time`
//! - `time_scale` is `+1` or `-1`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// End-of-timeline wrap policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum AnimationMode {
    /// Stop (pause) at the end.
    #[default]
    Once,
    /// Jump back to the start.
    Loop,
    /// Reverse direction at either end.
    PingPong,
}

impl AnimationMode {
    pub const ALL: [AnimationMode; 3] = [Self::Once, Self::Loop, Self::PingPong];

    /// Label for mode pickers.
    #[inline]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Once => "Once",
            Self::Loop => "Loop",
            Self::PingPong => "Ping pong",
        }
    }

    #[inline]
    pub fn ordinal(&self) -> u32 {
        match self {
            Self::Once => 0,
            Self::Loop => 1,
            Self::PingPong => 2,
        }
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }
}

impl fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AnimationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Once" | "once" => Ok(Self::Once),
            "Loop" | "loop" => Ok(Self::Loop),
            "PingPong" | "pingpong" | "Ping pong" | "ping_pong" => Ok(Self::PingPong),
            other => Err(format!("unknown animation mode '{other}'")),
        }
    }
}

/// Accepts the variant name or its ordinal (0 = Once, 1 = Loop, 2 = PingPong).
impl<'de> Deserialize<'de> for AnimationMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawMode {
            Ordinal(u32),
            Name(String),
        }

        match RawMode::deserialize(deserializer)? {
            RawMode::Ordinal(n) => Self::from_ordinal(n).ok_or_else(|| {
                D::Error::custom(format!("animation mode ordinal {n} out of range"))
            }),
            RawMode::Name(name) => name.parse().map_err(D::Error::custom),
        }
    }
}

/// Global timeline shared by every animated property.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackClock {
    enabled: bool,
    paused: bool,
    mode: AnimationMode,
    animation_time: f32,
    current_time: f32,
    time_scale: f32,
}

impl PlaybackClock {
    pub fn new(animation_time: f32, mode: AnimationMode, enabled: bool) -> Self {
        Self {
            enabled,
            paused: false,
            mode,
            animation_time: animation_time.max(0.0),
            current_time: 0.0,
            time_scale: 1.0,
        }
    }

    /// Rebuild a clock from persisted fields, healing each invariant:
    /// negative lengths become 0, the current time is clamped into the
    /// timeline and the time scale snaps to `+1` / `-1` by sign.
    pub fn restore(
        enabled: bool,
        paused: bool,
        mode: AnimationMode,
        animation_time: f32,
        current_time: f32,
        time_scale: f32,
    ) -> Self {
        let animation_time = animation_time.max(0.0);
        let current_time = current_time.max(0.0).min(animation_time);
        Self {
            enabled,
            paused,
            mode,
            animation_time,
            current_time,
            time_scale: if time_scale >= 0.0 { 1.0 } else { -1.0 },
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    #[inline]
    pub fn pause(&mut self) {
        self.paused = true;
    }

    #[inline]
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Rewind to the start and play, keeping mode and direction.
    pub fn restart(&mut self) {
        self.current_time = 0.0;
        self.paused = false;
    }

    /// Once-mode playback that stopped at the end of the timeline.
    pub fn is_finished(&self) -> bool {
        self.mode == AnimationMode::Once && self.paused && self.current_time >= self.animation_time
    }

    #[inline]
    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    /// Switch wrap policy. Always a full restart: time 0, forward, playing,
    /// even when `mode` equals the current one.
    pub fn set_mode(&mut self, mode: AnimationMode) {
        self.mode = mode;
        self.current_time = 0.0;
        self.time_scale = 1.0;
        self.paused = false;
    }

    #[inline]
    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    /// Negative input becomes 0. A shorter timeline pulls the current time in.
    pub fn set_animation_time(&mut self, value: f32) {
        self.animation_time = value.max(0.0);
        if self.current_time > self.animation_time {
            self.current_time = self.animation_time;
        }
    }

    #[inline]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Seek, clamped into `[0, animation_time]`.
    pub fn set_current_time(&mut self, value: f32) {
        self.current_time = value.max(0.0).min(self.animation_time);
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Advance by `delta_time` seconds and apply the mode's boundary policy.
    ///
    /// Returns `false` when the clock is disabled, in which case nothing
    /// moved and bound properties must not be written. A non-finite
    /// `delta_time` holds the current time.
    pub fn advance(&mut self, delta_time: f32) -> bool {
        if !self.enabled {
            return false;
        }
        if self.paused || self.animation_time <= 0.0 || !delta_time.is_finite() {
            return true;
        }

        self.current_time += delta_time * self.time_scale;
        let end = self.animation_time;
        match self.mode {
            AnimationMode::Once => {
                if self.current_time > end {
                    self.current_time = end;
                    self.paused = true;
                } else if self.current_time < 0.0 {
                    self.current_time = 0.0;
                    self.paused = true;
                }
            }
            AnimationMode::Loop => {
                if self.current_time > end || self.current_time < 0.0 {
                    self.current_time = self.current_time.rem_euclid(end);
                }
            }
            AnimationMode::PingPong => {
                if self.current_time < 0.0 {
                    self.time_scale = -self.time_scale;
                    self.current_time = 0.0;
                } else if self.current_time > end {
                    self.time_scale = -self.time_scale;
                    self.current_time = end;
                }
            }
        }
        true
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(0.0, AnimationMode::Once, false)
    }
}
