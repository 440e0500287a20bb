use crate::{
    config::color::Rgba8,
    foundation::core::FrameIndex,
    foundation::error::{AudiogramError, AudiogramResult},
};

/// Spectrum resolution requested from the audio analysis backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum WaveSamples {
    /// 32 bins.
    #[serde(rename = "32")]
    S32,
    /// 64 bins.
    #[serde(rename = "64")]
    S64,
    /// 128 bins.
    #[serde(rename = "128")]
    S128,
    /// 256 bins.
    #[serde(rename = "256")]
    S256,
    /// 512 bins.
    #[serde(rename = "512")]
    S512,
}

impl WaveSamples {
    /// Parse the prop string form (`"32"` .. `"512"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "32" => Some(Self::S32),
            "64" => Some(Self::S64),
            "128" => Some(Self::S128),
            "256" => Some(Self::S256),
            "512" => Some(Self::S512),
            _ => None,
        }
    }

    /// Number of spectrum bins.
    pub fn count(self) -> usize {
        match self {
            Self::S32 => 32,
            Self::S64 => 64,
            Self::S128 => 128,
            Self::S256 => 256,
            Self::S512 => 512,
        }
    }
}

/// Externally computed audio spectrum (FFT magnitudes normalized to `[0, 1]`).
pub trait SpectrumSource {
    /// Spectrum of `number_of_samples` bins at track frame `frame`.
    fn spectrum(&self, frame: FrameIndex, number_of_samples: usize) -> AudiogramResult<Vec<f32>>;
}

/// Waveform display options.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WaveformOptions {
    /// Bar color.
    pub color: Rgba8,
    /// Mirror the selected bins around the first one.
    pub mirror: bool,
    /// Spectrum resolution.
    pub number_of_samples: WaveSamples,
    /// Number of bars to show.
    pub lines_to_display: u32,
    /// First spectrum bin shown.
    pub freq_range_start_index: u32,
}

impl WaveformOptions {
    /// Bar heights in `[0, 1]` for one spectrum.
    ///
    /// Takes `lines_to_display` bins from `freq_range_start_index` (half as many, rounded, when
    /// mirrored, then laid out as `reverse(subset[1..]) ++ subset`). Heights are `sqrt(v)`.
    pub fn bars(&self, spectrum: &[f32]) -> Vec<f32> {
        let wanted = if self.mirror {
            (self.lines_to_display as usize).div_ceil(2)
        } else {
            self.lines_to_display as usize
        };
        let start = (self.freq_range_start_index as usize).min(spectrum.len());
        let end = start.saturating_add(wanted).min(spectrum.len());
        let subset = &spectrum[start..end];

        let ordered: Vec<f32> = if self.mirror && !subset.is_empty() {
            subset[1..]
                .iter()
                .rev()
                .chain(subset.iter())
                .copied()
                .collect()
        } else {
            subset.to_vec()
        };

        ordered
            .into_iter()
            .map(|v| {
                if v.is_finite() {
                    v.max(0.0).sqrt().min(1.0)
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Fetch the spectrum for `frame` from `source` and lay it out as bars.
    pub fn bars_at(
        &self,
        source: &dyn SpectrumSource,
        frame: FrameIndex,
    ) -> AudiogramResult<Vec<f32>> {
        let n = self.number_of_samples.count();
        let spectrum = source.spectrum(frame, n)?;
        if spectrum.len() != n {
            return Err(AudiogramError::evaluation(format!(
                "spectrum source returned {} bins, expected {n}",
                spectrum.len()
            )));
        }
        Ok(self.bars(&spectrum))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/waveform/bars.rs"]
mod tests;
