use std::collections::HashMap;

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{AudiogramError, AudiogramResult},
    subtitles::cue::Cue,
    text::measure::{FontSpec, TextMeasurer},
};

/// Width budget and font used when wrapping cue text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReflowSettings {
    /// Maximum line width in layout pixels.
    pub max_width_px: f32,
    /// Font every candidate line is measured with.
    pub font: FontSpec,
    /// Render surface zoom, see [`crate::zoom_factor`].
    pub zoom: f32,
}

impl ReflowSettings {
    /// Build settings, rejecting non-finite or non-positive width and zoom.
    pub fn new(max_width_px: f32, font: FontSpec, zoom: f32) -> AudiogramResult<Self> {
        if !max_width_px.is_finite() || max_width_px <= 0.0 {
            return Err(AudiogramError::validation(
                "reflow max_width_px must be finite and > 0",
            ));
        }
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(AudiogramError::validation(
                "reflow zoom must be finite and > 0",
            ));
        }
        Ok(Self {
            max_width_px,
            font,
            zoom,
        })
    }

    /// Width budget in measured (zoomed) pixels. A line whose width equals it still fits.
    pub fn width_budget_px(&self) -> f32 {
        self.max_width_px * self.zoom
    }
}

/// One physical line of wrapped cue text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MeasuredLine {
    /// Line text, words separated by single spaces.
    pub text: String,
    /// Index of the source cue in the parsed cue list.
    pub cue_index: usize,
    /// This line's share of its cue's active interval.
    pub range: FrameRange,
}

/// Wrap `text` into lines no wider than the settings' budget.
///
/// `'\n'` is a hard break. Within a paragraph words are packed greedily; a word that does not fit
/// on an empty line is still placed there alone. Empty or whitespace-only text yields no lines.
pub fn reflow_text(
    text: &str,
    settings: &ReflowSettings,
    measurer: &mut dyn TextMeasurer,
) -> AudiogramResult<Vec<String>> {
    LineBreaker::new(settings, measurer).wrap(text)
}

/// Wrap every cue and flatten the result into cue-tagged lines.
///
/// Each cue's interval is divided between its lines in proportion to line count, so the line
/// ranges of one cue are contiguous and together cover exactly the cue.
#[tracing::instrument(skip_all, fields(cues = cues.len()))]
pub fn reflow_cues(
    cues: &[Cue],
    settings: &ReflowSettings,
    measurer: &mut dyn TextMeasurer,
) -> AudiogramResult<Vec<MeasuredLine>> {
    let mut breaker = LineBreaker::new(settings, measurer);
    let mut out = Vec::new();

    for (cue_index, cue) in cues.iter().enumerate() {
        if cue.is_blank() {
            tracing::debug!(cue_index, "cue has no visible text");
            continue;
        }
        let lines = breaker.wrap(&cue.text)?;
        let n = lines.len() as u64;
        let start = cue.start_frame.0;
        let len = cue.range().len_frames();
        for (i, text) in lines.into_iter().enumerate() {
            let i = i as u64;
            out.push(MeasuredLine {
                text,
                cue_index,
                range: FrameRange {
                    start: FrameIndex(start + len * i / n),
                    end: FrameIndex(start + len * (i + 1) / n),
                },
            });
        }
    }

    tracing::debug!(
        lines = out.len(),
        measurements = breaker.cache.len(),
        "reflowed cues"
    );
    Ok(out)
}

struct LineBreaker<'a> {
    settings: &'a ReflowSettings,
    measurer: &'a mut dyn TextMeasurer,
    cache: HashMap<String, f32>,
}

impl<'a> LineBreaker<'a> {
    fn new(settings: &'a ReflowSettings, measurer: &'a mut dyn TextMeasurer) -> Self {
        Self {
            settings,
            measurer,
            cache: HashMap::new(),
        }
    }

    fn wrap(&mut self, text: &str) -> AudiogramResult<Vec<String>> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                if !current.is_empty() {
                    let candidate = format!("{current} {word}");
                    if self.fits(&candidate)? {
                        current = candidate;
                        continue;
                    }
                    lines.push(std::mem::take(&mut current));
                }
                // A word that opens a line is placed even when too wide, but still measured.
                self.width(word)?;
                current.push_str(word);
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }
        Ok(lines)
    }

    fn fits(&mut self, candidate: &str) -> AudiogramResult<bool> {
        Ok(self.width(candidate)? <= self.settings.width_budget_px())
    }

    fn width(&mut self, text: &str) -> AudiogramResult<f32> {
        if let Some(w) = self.cache.get(text) {
            return Ok(*w);
        }
        let w = self.measurer.measure(text, &self.settings.font)?;
        if !w.is_finite() || w < 0.0 {
            return Err(AudiogramError::measure(format!(
                "measured width {w} for \"{text}\" is not a valid pixel width"
            )));
        }
        self.cache.insert(text.to_string(), w);
        Ok(w)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/reflow.rs"]
mod tests;
