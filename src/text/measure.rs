use std::borrow::Cow;

use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Font description handed to a [`TextMeasurer`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FontSpec {
    /// Family name as known to the measurement backend.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f32,
}

impl FontSpec {
    /// Build a font spec, rejecting non-finite or non-positive sizes.
    pub fn new(family: impl Into<String>, size_px: f32) -> AudiogramResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AudiogramError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        Ok(Self {
            family: family.into(),
            size_px,
        })
    }
}

/// Capability that reports how wide a string renders.
///
/// Line breaking depends on real glyph advances, so reflow never estimates widths itself: every
/// candidate line goes through an implementation of this trait.
pub trait TextMeasurer {
    /// Rendered width in pixels of `text` laid out on a single line with `font`.
    fn measure(&mut self, text: &str, font: &FontSpec) -> AudiogramResult<f32>;

    /// Rendered extent in pixels of a square reference box declared as `size_px`.
    ///
    /// Surfaces that render at a scale factor report the scaled extent; the ratio between the two
    /// is the zoom applied to the width budget.
    fn reference_box(&mut self, size_px: f32) -> AudiogramResult<f32> {
        Ok(size_px)
    }
}

/// Zoom factor derived from a reference box: `reference_box(size) / size`, or `1.0` for
/// `size == 0`.
pub fn zoom_factor(
    measurer: &mut dyn TextMeasurer,
    reference_size_px: u32,
) -> AudiogramResult<f32> {
    if reference_size_px == 0 {
        return Ok(1.0);
    }
    let declared = reference_size_px as f32;
    let rendered = measurer.reference_box(declared)?;
    if !rendered.is_finite() || rendered <= 0.0 {
        return Err(AudiogramError::measure(format!(
            "zoom reference box of {reference_size_px}px rendered as {rendered}px"
        )));
    }
    Ok(rendered / declared)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct MeasureBrush;

/// [`TextMeasurer`] backed by Parley shaping over caller-provided font bytes.
pub struct ParleyMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
    family_name: String,
}

impl ParleyMeasurer {
    /// Register `font_bytes` and build fresh Parley contexts.
    pub fn from_font_bytes(font_bytes: &[u8]) -> AudiogramResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            AudiogramError::measure("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AudiogramError::measure("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family_name, "registered measurement font");
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name detected from the registered font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, text: &str, font: &FontSpec) -> AudiogramResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }

        // Registered family last so unknown configured families still shape with our font.
        let stack = if font.family == self.family_name {
            font.family.clone()
        } else {
            format!("{}, {}", font.family, self.family_name)
        };
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut width = 0.0f32;
        for line in layout.lines() {
            width = width.max(line.metrics().advance);
        }
        Ok(width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
