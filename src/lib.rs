//! Audiogram is the timing core of a podcast-clip video: subtitles paged to the frame, plus
//! waveform bars, for a fixed 30 fps square composition.
//!
//! The public API is session-oriented:
//!
//! - Load [`AudiogramProps`] and validate them into an [`AudiogramConfig`]
//! - Prepare an [`AudiogramSession`] (fetch, parse, measure, paginate)
//! - Resolve the [`DisplaySpan`] for single frames or whole ranges
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod session;
mod subtitles;
mod text;
mod waveform;

pub use crate::foundation::core::{AUDIOGRAM_FPS, Fps, FrameIndex, FrameRange};
pub use crate::foundation::error::{AudiogramError, AudiogramResult};

pub use crate::assets::source::{FsSubtitleSource, SubtitleSource};
pub use crate::config::color::Rgba8;
pub use crate::config::props::{AudiogramConfig, AudiogramProps, SubtitleOptions, TitleOptions};
pub use crate::session::audiogram_session::{AudiogramSession, PlaybackWindow, ResolveThreading};
pub use crate::subtitles::cue::Cue;
pub use crate::subtitles::pages::{Page, PageTable, build_pages};
pub use crate::subtitles::resolve::{DisplayMode, DisplaySpan};
pub use crate::subtitles::srt::parse_srt;
pub use crate::text::measure::{FontSpec, ParleyMeasurer, TextMeasurer, zoom_factor};
pub use crate::text::reflow::{MeasuredLine, ReflowSettings, reflow_cues, reflow_text};
pub use crate::waveform::bars::{SpectrumSource, WaveSamples, WaveformOptions};
