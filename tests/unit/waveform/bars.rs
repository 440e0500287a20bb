use super::*;

fn opts(mirror: bool, lines: u32, start: u32) -> WaveformOptions {
    WaveformOptions {
        color: Rgba8::new(255, 255, 255, 255),
        mirror,
        number_of_samples: WaveSamples::S32,
        lines_to_display: lines,
        freq_range_start_index: start,
    }
}

fn spectrum() -> Vec<f32> {
    (0..32).map(|i| (i as f32 / 31.0).powi(2)).collect()
}

struct Flat(f32);

impl SpectrumSource for Flat {
    fn spectrum(&self, _frame: FrameIndex, n: usize) -> AudiogramResult<Vec<f32>> {
        Ok(vec![self.0; n])
    }
}

struct Short;

impl SpectrumSource for Short {
    fn spectrum(&self, _frame: FrameIndex, _n: usize) -> AudiogramResult<Vec<f32>> {
        Ok(vec![0.5; 3])
    }
}

#[test]
fn wave_samples_parse_only_allowed_values() {
    assert_eq!(WaveSamples::parse("128"), Some(WaveSamples::S128));
    assert_eq!(WaveSamples::parse("512").unwrap().count(), 512);
    assert_eq!(WaveSamples::parse("100"), None);
    assert_eq!(WaveSamples::parse(""), None);
}

#[test]
fn plain_selection_takes_a_window_of_bins() {
    let s = spectrum();
    let bars = opts(false, 4, 2).bars(&s);
    assert_eq!(bars.len(), 4);
    for (i, b) in bars.iter().enumerate() {
        let expected = s[i + 2].sqrt();
        assert!((b - expected).abs() < 1e-6);
    }
}

#[test]
fn mirrored_selection_reflects_around_first_bin() {
    let s: Vec<f32> = vec![0.0, 0.01, 0.04, 0.09, 0.16, 0.25, 0.36, 0.49];
    // 5 lines mirrored -> 3 bins [0.01, 0.04, 0.09] -> [0.09, 0.04, 0.01, 0.04, 0.09] before sqrt.
    let bars = opts(true, 5, 1).bars(&s);
    let expected = [0.3, 0.2, 0.1, 0.2, 0.3];
    assert_eq!(bars.len(), expected.len());
    for (b, e) in bars.iter().zip(expected) {
        assert!((b - e).abs() < 1e-6, "{bars:?}");
    }
}

#[test]
fn selection_is_clamped_to_the_spectrum() {
    let s = spectrum();
    assert_eq!(opts(false, 10, 28).bars(&s).len(), 4);
    assert!(opts(false, 10, 40).bars(&s).is_empty());
    assert!(opts(true, 0, 0).bars(&s).is_empty());
}

#[test]
fn heights_are_clamped_and_sanitized() {
    let bars = opts(false, 3, 0).bars(&[4.0, -1.0, f32::NAN]);
    assert_eq!(bars, vec![1.0, 0.0, 0.0]);
}

#[test]
fn bars_at_checks_source_bin_count() {
    let o = opts(false, 2, 0);
    let bars = o.bars_at(&Flat(0.25), FrameIndex(3)).unwrap();
    assert_eq!(bars, vec![0.5, 0.5]);
    assert!(matches!(
        o.bars_at(&Short, FrameIndex(3)).unwrap_err(),
        AudiogramError::Evaluation(_)
    ));
}
