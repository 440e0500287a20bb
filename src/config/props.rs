use std::{fmt, fs::File, io::BufReader, path::Path};

use crate::{
    config::color::Rgba8,
    foundation::core::{AUDIOGRAM_FPS, Fps},
    foundation::error::{AudiogramError, AudiogramResult},
    subtitles::resolve::DisplayMode,
    waveform::bars::{WaveSamples, WaveformOptions},
};

/// Composition props as authored in JSON (camelCase keys).
///
/// Props are plain data; [`AudiogramProps::validate`] checks every field and produces the
/// [`AudiogramConfig`] the pipeline runs on.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudiogramProps {
    /// Composition length in seconds (> 0).
    pub duration_in_seconds: f64,
    /// Delay before the audio/subtitle track starts, in seconds (>= 0).
    pub audio_offset_in_seconds: f64,
    /// Subtitle resource, must end in `.srt`.
    pub subtitles_file_name: String,
    /// Audio resource, must end in `.mp3`.
    pub audio_file_name: String,
    /// Cover image, must end in `.jpg`, `.jpeg`, `.png` or `.bmp`.
    pub cover_img_file_name: String,
    /// Title shown above the waveform.
    pub title_text: String,
    /// Title color (CSS color string).
    pub title_color: String,
    /// Waveform bar color (CSS color string).
    pub wave_color: String,
    /// Subtitle text color (CSS color string).
    pub subtitles_text_color: String,
    /// Lines per page; `0` shows every line on one page.
    pub subtitles_line_per_page: i64,
    /// Line height in pixels.
    pub subtitles_line_height: i64,
    /// Declared size of the zoom reference box box; `0` disables zoom detection.
    pub subtitles_zoom_measurer_size: i64,
    /// Show only the cue active at the current frame.
    pub only_display_current_sentence: bool,
    /// Mirror waveform bars.
    pub mirror_wave: bool,
    /// Number of waveform bars.
    pub wave_lines_to_display: i64,
    /// First spectrum bin shown.
    pub wave_freq_range_start_index: i64,
    /// Spectrum resolution: `"32"`, `"64"`, `"128"`, `"256"` or `"512"`.
    pub wave_number_of_samples: String,
    /// Subtitle font family handed to the measurer.
    #[serde(default = "default_font_family")]
    pub subtitles_font_family: String,
    /// Subtitle font size in pixels.
    #[serde(default = "default_font_size_px")]
    pub subtitles_font_size_px: f32,
    /// Maximum subtitle line width in pixels.
    #[serde(default = "default_max_width_px")]
    pub subtitles_max_width_px: f32,
}

fn default_font_family() -> String {
    "IBM Plex Sans".to_string()
}

fn default_font_size_px() -> f32 {
    60.0
}

fn default_max_width_px() -> f32 {
    1000.0
}

/// Title options.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TitleOptions {
    /// Title text.
    pub text: String,
    /// Title color.
    pub color: Rgba8,
}

/// Subtitle pagination and layout options.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SubtitleOptions {
    /// Subtitle resource location.
    pub file_name: String,
    /// Text color.
    pub text_color: Rgba8,
    /// Lines per page; `0` is a single unlimited page.
    pub lines_per_page: u32,
    /// Line height in pixels.
    pub line_height_px: u32,
    /// Zoom reference box size; `0` disables zoom detection.
    pub zoom_measurer_size: u32,
    /// Page or single-cue display.
    pub mode: DisplayMode,
    /// Font family name.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Maximum line width in pixels.
    pub max_width_px: f32,
}

/// Validated configuration the session is prepared from.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AudiogramConfig {
    /// Composition frame rate.
    pub fps: Fps,
    /// Composition length in frames.
    pub duration_frames: u64,
    /// Audio offset in frames.
    pub audio_offset_frames: u64,
    /// Audio resource location.
    pub audio_file_name: String,
    /// Cover image location.
    pub cover_img_file_name: String,
    /// Title options.
    pub title: TitleOptions,
    /// Subtitle options.
    pub subtitles: SubtitleOptions,
    /// Waveform options.
    pub waveform: WaveformOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PropError {
    field: &'static str,
    message: String,
}

impl fmt::Display for PropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$.{}: {}", self.field, self.message)
    }
}

#[derive(Default)]
struct PropErrors {
    errors: Vec<PropError>,
}

impl PropErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(PropError {
            field,
            message: message.into(),
        });
    }

    fn non_negative_u32(&mut self, field: &'static str, v: i64) -> u32 {
        if v < 0 {
            self.push(field, "must be >= 0");
            return 0;
        }
        u32::try_from(v).unwrap_or_else(|_| {
            self.push(field, format!("must be <= {}", u32::MAX));
            0
        })
    }

    fn color(&mut self, field: &'static str, v: &str) -> Rgba8 {
        v.parse().unwrap_or_else(|e: String| {
            self.push(field, e);
            Rgba8::new(0, 0, 0, 0)
        })
    }

    fn extension(&mut self, field: &'static str, v: &str, allowed: &[&str], message: &str) {
        if !allowed.iter().any(|ext| v.ends_with(ext)) {
            self.push(field, message);
        }
    }
}

impl AudiogramProps {
    /// Parse props from a JSON string.
    pub fn from_json_str(s: &str) -> AudiogramResult<Self> {
        serde_json::from_str(s).map_err(|e| AudiogramError::serde(format!("props JSON: {e}")))
    }

    /// Parse props from a JSON reader.
    pub fn from_reader(r: impl std::io::Read) -> AudiogramResult<Self> {
        serde_json::from_reader(r).map_err(|e| AudiogramError::serde(format!("props JSON: {e}")))
    }

    /// Parse props from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> AudiogramResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AudiogramError::validation(format!("open props JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field and build the pipeline configuration.
    ///
    /// All problems are reported together, one `$.field: message` per line.
    pub fn validate(&self) -> AudiogramResult<AudiogramConfig> {
        let fps = AUDIOGRAM_FPS;
        let mut errs = PropErrors::default();

        let mut duration_frames = 0;
        if !self.duration_in_seconds.is_finite() || self.duration_in_seconds <= 0.0 {
            errs.push("durationInSeconds", "must be a finite number > 0");
        } else {
            duration_frames = fps.secs_to_frames_round(self.duration_in_seconds);
            if duration_frames == 0 {
                errs.push("durationInSeconds", "must cover at least one frame");
            }
        }

        let mut audio_offset_frames = 0;
        if !self.audio_offset_in_seconds.is_finite() || self.audio_offset_in_seconds < 0.0 {
            errs.push("audioOffsetInSeconds", "must be a finite number >= 0");
        } else {
            audio_offset_frames = fps.secs_to_frames_round(self.audio_offset_in_seconds);
        }

        errs.extension(
            "subtitlesFileName",
            &self.subtitles_file_name,
            &[".srt"],
            "Subtitles file must be a .srt file",
        );
        errs.extension(
            "audioFileName",
            &self.audio_file_name,
            &[".mp3"],
            "Audio file must be a .mp3 file",
        );
        errs.extension(
            "coverImgFileName",
            &self.cover_img_file_name,
            &[".jpg", ".jpeg", ".png", ".bmp"],
            "Cover image must be a .jpg / .jpeg / .png / .bmp file",
        );

        let title_color = errs.color("titleColor", &self.title_color);
        let wave_color = errs.color("waveColor", &self.wave_color);
        let text_color = errs.color("subtitlesTextColor", &self.subtitles_text_color);

        let lines_per_page =
            errs.non_negative_u32("subtitlesLinePerPage", self.subtitles_line_per_page);
        let line_height_px =
            errs.non_negative_u32("subtitlesLineHeight", self.subtitles_line_height);
        let zoom_measurer_size = errs.non_negative_u32(
            "subtitlesZoomMeasurerSize",
            self.subtitles_zoom_measurer_size,
        );
        let lines_to_display =
            errs.non_negative_u32("waveLinesToDisplay", self.wave_lines_to_display);
        let freq_range_start_index =
            errs.non_negative_u32("waveFreqRangeStartIndex", self.wave_freq_range_start_index);

        let number_of_samples = match WaveSamples::parse(&self.wave_number_of_samples) {
            Some(n) => {
                if freq_range_start_index as usize >= n.count() {
                    errs.push(
                        "waveFreqRangeStartIndex",
                        format!("must be < waveNumberOfSamples ({})", n.count()),
                    );
                }
                n
            }
            None => {
                errs.push(
                    "waveNumberOfSamples",
                    "must be one of \"32\", \"64\", \"128\", \"256\", \"512\"",
                );
                WaveSamples::S32
            }
        };

        if self.subtitles_font_family.trim().is_empty() {
            errs.push("subtitlesFontFamily", "must be non-empty");
        }
        if !self.subtitles_font_size_px.is_finite() || self.subtitles_font_size_px <= 0.0 {
            errs.push("subtitlesFontSizePx", "must be a finite number > 0");
        }
        if !self.subtitles_max_width_px.is_finite() || self.subtitles_max_width_px <= 0.0 {
            errs.push("subtitlesMaxWidthPx", "must be a finite number > 0");
        }

        if !errs.errors.is_empty() {
            let joined = errs
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            return Err(AudiogramError::validation(format!(
                "props validation failed:\n{joined}"
            )));
        }

        Ok(AudiogramConfig {
            fps,
            duration_frames,
            audio_offset_frames,
            audio_file_name: self.audio_file_name.clone(),
            cover_img_file_name: self.cover_img_file_name.clone(),
            title: TitleOptions {
                text: self.title_text.clone(),
                color: title_color,
            },
            subtitles: SubtitleOptions {
                file_name: self.subtitles_file_name.clone(),
                text_color,
                lines_per_page,
                line_height_px,
                zoom_measurer_size,
                mode: DisplayMode::from_only_current_sentence(self.only_display_current_sentence),
                font_family: self.subtitles_font_family.clone(),
                font_size_px: self.subtitles_font_size_px,
                max_width_px: self.subtitles_max_width_px,
            },
            waveform: WaveformOptions {
                color: wave_color,
                mirror: self.mirror_wave,
                number_of_samples,
                lines_to_display,
                freq_range_start_index,
            },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/props.rs"]
mod tests;
