use rayon::prelude::*;

use crate::{
    assets::source::SubtitleSource,
    config::props::AudiogramConfig,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{AudiogramError, AudiogramResult},
    subtitles::{
        pages::{PageTable, build_pages},
        resolve::DisplaySpan,
        srt::parse_srt,
    },
    text::{
        measure::{FontSpec, TextMeasurer, zoom_factor},
        reflow::{ReflowSettings, reflow_cues},
    },
    waveform::bars::SpectrumSource,
};

/// Frames of the composition during which the subtitle/audio track plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlaybackWindow {
    /// Track delay in frames.
    pub offset_frames: u64,
    /// `[offset, offset + duration)` in composition frames.
    pub range: FrameRange,
}

impl PlaybackWindow {
    /// Window for a track delayed by `offset_frames` in a composition of `duration_frames`.
    pub fn new(offset_frames: u64, duration_frames: u64) -> Self {
        Self {
            offset_frames,
            range: FrameRange {
                start: FrameIndex(offset_frames),
                end: FrameIndex(offset_frames.saturating_add(duration_frames)),
            },
        }
    }

    /// Track frame for composition frame `frame`, or `None` outside the window.
    pub fn to_track_frame(&self, frame: FrameIndex) -> Option<FrameIndex> {
        self.range
            .contains(frame)
            .then(|| FrameIndex(frame.0 - self.offset_frames))
    }
}

/// Options controlling `AudiogramSession::resolve_range`.
#[derive(Clone, Debug, Default)]
pub struct ResolveThreading {
    /// Resolve frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Prepared audiogram: validated config plus the immutable subtitle page table.
///
/// A session only exists once every prepare step succeeded. After that it is read-only, so frames
/// can be resolved from any number of threads.
#[derive(Debug)]
pub struct AudiogramSession {
    config: AudiogramConfig,
    window: PlaybackWindow,
    reflow: ReflowSettings,
    pages: PageTable,
}

impl AudiogramSession {
    /// Fetch, parse, measure and paginate the subtitle track named by `config`.
    #[tracing::instrument(skip_all, fields(subtitles = %config.subtitles.file_name))]
    pub fn prepare(
        config: AudiogramConfig,
        source: &dyn SubtitleSource,
        measurer: &mut dyn TextMeasurer,
    ) -> AudiogramResult<Self> {
        let srt = source.fetch(&config.subtitles.file_name).inspect_err(|e| {
            tracing::error!(error = %e, "failed to fetch subtitles");
        })?;
        Self::prepare_from_text(config, &srt, measurer)
    }

    /// Like [`AudiogramSession::prepare`], with the SRT text already in hand.
    #[tracing::instrument(skip_all, fields(bytes = srt.len()))]
    pub fn prepare_from_text(
        config: AudiogramConfig,
        srt: &str,
        measurer: &mut dyn TextMeasurer,
    ) -> AudiogramResult<Self> {
        let cues = parse_srt(srt, config.fps)?;

        let subs = &config.subtitles;
        let zoom = zoom_factor(measurer, subs.zoom_measurer_size)?;
        let font = FontSpec::new(subs.font_family.clone(), subs.font_size_px)?;
        let reflow = ReflowSettings::new(subs.max_width_px, font, zoom)?;

        let lines = reflow_cues(&cues, &reflow, measurer)?;
        let pages = build_pages(lines, subs.lines_per_page, subs.line_height_px);
        let window = PlaybackWindow::new(config.audio_offset_frames, config.duration_frames);

        tracing::debug!(
            cues = cues.len(),
            pages = pages.pages().len(),
            zoom,
            "audiogram session prepared"
        );
        Ok(Self {
            config,
            window,
            reflow,
            pages,
        })
    }

    /// Validated configuration.
    pub fn config(&self) -> &AudiogramConfig {
        &self.config
    }

    /// Playback window of the subtitle/audio track.
    pub fn window(&self) -> PlaybackWindow {
        self.window
    }

    /// Reflow settings, including the detected zoom.
    pub fn reflow_settings(&self) -> &ReflowSettings {
        &self.reflow
    }

    /// Subtitle page table.
    pub fn pages(&self) -> &PageTable {
        &self.pages
    }

    /// Composition length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.config.duration_frames
    }

    /// Subtitle span visible at composition frame `frame`.
    ///
    /// Frames outside the playback window resolve to an empty span.
    pub fn subtitles_at(&self, frame: FrameIndex) -> AudiogramResult<DisplaySpan<'_>> {
        self.check_frame(frame)?;
        let Some(track) = self.window.to_track_frame(frame) else {
            return Ok(DisplaySpan::empty(frame));
        };
        let mut span = self.pages.resolve(track, self.config.subtitles.mode);
        span.frame = frame;
        Ok(span)
    }

    /// Waveform bar heights at composition frame `frame`; empty outside the playback window.
    pub fn waveform_at(
        &self,
        frame: FrameIndex,
        source: &dyn SpectrumSource,
    ) -> AudiogramResult<Vec<f32>> {
        self.check_frame(frame)?;
        match self.window.to_track_frame(frame) {
            Some(track) => self.config.waveform.bars_at(source, track),
            None => Ok(Vec::new()),
        }
    }

    /// Resolve every frame in `range`, in frame order.
    #[tracing::instrument(skip(self), fields(start = range.start.0, end = range.end.0))]
    pub fn resolve_range(
        &self,
        range: FrameRange,
        threading: &ResolveThreading,
    ) -> AudiogramResult<Vec<DisplaySpan<'_>>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        if range.end.0 > self.config.duration_frames {
            return Err(AudiogramError::evaluation(
                "resolve_range range must be within composition duration",
            ));
        }

        if !threading.parallel {
            return (range.start.0..range.end.0)
                .map(|f| self.subtitles_at(FrameIndex(f)))
                .collect();
        }

        let pool = build_thread_pool(threading.threads)?;
        let frames: Vec<FrameIndex> = (range.start.0..range.end.0).map(FrameIndex).collect();
        pool.install(|| {
            frames
                .par_iter()
                .map(|&f| self.subtitles_at(f))
                .collect::<AudiogramResult<Vec<_>>>()
        })
    }

    fn check_frame(&self, frame: FrameIndex) -> AudiogramResult<()> {
        if frame.0 >= self.config.duration_frames {
            return Err(AudiogramError::evaluation(format!(
                "frame {} is outside the composition ({} frames)",
                frame.0, self.config.duration_frames
            )));
        }
        Ok(())
    }
}

fn build_thread_pool(threads: Option<usize>) -> AudiogramResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(AudiogramError::validation(
            "resolve_range 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AudiogramError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/audiogram_session.rs"]
mod tests;
