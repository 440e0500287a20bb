use crate::{
    foundation::error::{AudiogramError, AudiogramResult},
    text::measure::{FontSpec, TextMeasurer},
};

/// Monospace stand-in for a render surface: every char advances `advance_px`.
pub(crate) struct FixedAdvanceMeasurer {
    pub(crate) advance_px: f32,
    pub(crate) zoom: f32,
    pub(crate) calls: usize,
    pub(crate) fail: bool,
}

impl FixedAdvanceMeasurer {
    pub(crate) fn new(advance_px: f32) -> Self {
        Self {
            advance_px,
            zoom: 1.0,
            calls: 0,
            fail: false,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&mut self, text: &str, _font: &FontSpec) -> AudiogramResult<f32> {
        self.calls += 1;
        if self.fail {
            return Err(AudiogramError::measure("surface unavailable"));
        }
        Ok(text.chars().count() as f32 * self.advance_px * self.zoom)
    }

    fn reference_box(&mut self, size_px: f32) -> AudiogramResult<f32> {
        Ok(size_px * self.zoom)
    }
}

pub(crate) fn test_font() -> FontSpec {
    FontSpec::new("Test Mono", 10.0).unwrap()
}
