//! Spectrum-to-bar selection for the waveform visualization.

pub(crate) mod bars;
