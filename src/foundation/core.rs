use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Frame rate used for every frame/second conversion in an audiogram composition.
pub const AUDIOGRAM_FPS: Fps = Fps { num: 30, den: 1 };

/// Zero-based frame number on a timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame inside the range.
    pub start: FrameIndex,
    /// First frame past the range.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> AudiogramResult<Self> {
        if start.0 > end.0 {
            return Err(AudiogramError::validation(
                "FrameRange start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frame.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `start <= f < end`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> AudiogramResult<Self> {
        if den == 0 {
            return Err(AudiogramError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(AudiogramError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration in seconds of `frames` frames.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Convert non-negative seconds to frames, rounding half away from zero.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }

    /// Convert milliseconds to frames, rounding half up in exact integer arithmetic.
    pub fn millis_to_frames_round(self, millis: u64) -> u64 {
        let num = u128::from(millis) * u128::from(self.num) * 2 + 1000 * u128::from(self.den);
        let den = 2000 * u128::from(self.den);
        (num / den) as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
