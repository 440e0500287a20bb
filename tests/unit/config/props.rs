use super::*;
use serde_json::json;

fn base() -> serde_json::Value {
    json!({
        "durationInSeconds": 29.5,
        "audioOffsetInSeconds": 6.3,
        "subtitlesFileName": "audiogram/subtitles.srt",
        "audioFileName": "audiogram/audio.mp3",
        "coverImgFileName": "audiogram/cover.jpg",
        "titleText": "#234 - Money, Kids, and Choosing Your Market",
        "titleColor": "rgba(186, 186, 186, 0.93)",
        "waveColor": "#a3a5ae",
        "subtitlesTextColor": "rgba(255, 255, 255, 0.93)",
        "subtitlesLinePerPage": 4,
        "subtitlesLineHeight": 98,
        "subtitlesZoomMeasurerSize": 10,
        "onlyDisplayCurrentSentence": true,
        "mirrorWave": true,
        "waveLinesToDisplay": 66,
        "waveFreqRangeStartIndex": 7,
        "waveNumberOfSamples": "256"
    })
}

fn props(v: serde_json::Value) -> AudiogramProps {
    serde_json::from_value(v).unwrap()
}

fn validation_message(v: serde_json::Value) -> String {
    match props(v).validate().unwrap_err() {
        AudiogramError::Validation(msg) => msg,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn default_props_validate_into_config() {
    let cfg = props(base()).validate().unwrap();
    assert_eq!(cfg.fps, AUDIOGRAM_FPS);
    assert_eq!(cfg.duration_frames, 885);
    assert_eq!(cfg.audio_offset_frames, 189);
    assert_eq!(cfg.subtitles.lines_per_page, 4);
    assert_eq!(cfg.subtitles.line_height_px, 98);
    assert_eq!(cfg.subtitles.mode, DisplayMode::Sentence);
    assert_eq!(cfg.subtitles.font_family, "IBM Plex Sans");
    assert_eq!(cfg.subtitles.font_size_px, 60.0);
    assert_eq!(cfg.subtitles.max_width_px, 1000.0);
    assert_eq!(cfg.subtitles.text_color, Rgba8::new(255, 255, 255, 237));
    assert_eq!(cfg.waveform.number_of_samples, WaveSamples::S256);
    assert!(cfg.waveform.mirror);
    assert_eq!(cfg.title.color, Rgba8::new(186, 186, 186, 237));
}

#[test]
fn explicit_layout_props_override_defaults() {
    let mut v = base();
    v["subtitlesFontFamily"] = json!("Inter");
    v["subtitlesFontSizePx"] = json!(42.0);
    v["subtitlesMaxWidthPx"] = json!(640.0);
    v["onlyDisplayCurrentSentence"] = json!(false);
    let cfg = props(v).validate().unwrap();
    assert_eq!(cfg.subtitles.font_family, "Inter");
    assert_eq!(cfg.subtitles.font_size_px, 42.0);
    assert_eq!(cfg.subtitles.max_width_px, 640.0);
    assert_eq!(cfg.subtitles.mode, DisplayMode::Page);
}

#[test]
fn wrong_extensions_are_reported_per_field() {
    let mut v = base();
    v["subtitlesFileName"] = json!("subs.vtt");
    v["audioFileName"] = json!("audio.wav");
    v["coverImgFileName"] = json!("cover.gif");
    let msg = validation_message(v);
    assert!(msg.contains("$.subtitlesFileName: Subtitles file must be a .srt file"));
    assert!(msg.contains("$.audioFileName: Audio file must be a .mp3 file"));
    assert!(msg.contains("$.coverImgFileName:"));
}

#[test]
fn extension_check_is_case_sensitive() {
    let mut v = base();
    v["coverImgFileName"] = json!("COVER.PNG");
    v["subtitlesFileName"] = json!("subs.SRT");
    v["audioFileName"] = json!("audio.MP3");
    let msg = validation_message(v);
    assert!(msg.contains("$.coverImgFileName"));
    assert!(msg.contains("$.subtitlesFileName"));
    assert!(msg.contains("$.audioFileName"));

    let mut v = base();
    v["coverImgFileName"] = json!("Cover.Photo.jpeg");
    props(v).validate().unwrap();
}

#[test]
fn non_positive_duration_is_rejected() {
    for d in [0.0, -1.0] {
        let mut v = base();
        v["durationInSeconds"] = json!(d);
        assert!(validation_message(v).contains("$.durationInSeconds"));
    }
    let mut v = base();
    v["durationInSeconds"] = json!(0.001);
    assert!(validation_message(v).contains("at least one frame"));
}

#[test]
fn negative_offset_is_rejected() {
    let mut v = base();
    v["audioOffsetInSeconds"] = json!(-0.5);
    assert!(validation_message(v).contains("$.audioOffsetInSeconds"));
}

#[test]
fn negative_counts_are_rejected() {
    let mut v = base();
    v["subtitlesLinePerPage"] = json!(-1);
    v["waveLinesToDisplay"] = json!(-3);
    let msg = validation_message(v);
    assert!(msg.contains("$.subtitlesLinePerPage: must be >= 0"));
    assert!(msg.contains("$.waveLinesToDisplay: must be >= 0"));
}

#[test]
fn wave_sample_count_must_be_a_known_value() {
    let mut v = base();
    v["waveNumberOfSamples"] = json!("100");
    assert!(validation_message(v).contains("$.waveNumberOfSamples"));
}

#[test]
fn freq_start_index_must_be_inside_the_spectrum() {
    let mut v = base();
    v["waveNumberOfSamples"] = json!("32");
    v["waveFreqRangeStartIndex"] = json!(32);
    assert!(validation_message(v).contains("$.waveFreqRangeStartIndex"));
}

#[test]
fn css_named_and_hsl_colors_are_accepted() {
    let mut v = base();
    v["titleColor"] = json!("white");
    v["waveColor"] = json!("hsla(0, 100%, 50%, 0.5)");
    v["subtitlesTextColor"] = json!("transparent");
    let cfg = props(v).validate().unwrap();
    assert_eq!(cfg.title.color, Rgba8::new(255, 255, 255, 255));
    assert_eq!(cfg.waveform.color, Rgba8::new(255, 0, 0, 128));
    assert_eq!(cfg.subtitles.text_color, Rgba8::new(0, 0, 0, 0));
}

#[test]
fn bad_colors_are_reported() {
    let mut v = base();
    v["waveColor"] = json!("bluish");
    assert!(validation_message(v).contains("$.waveColor"));
}

#[test]
fn all_errors_are_collected_together() {
    let mut v = base();
    v["durationInSeconds"] = json!(0);
    v["audioFileName"] = json!("a.ogg");
    v["titleColor"] = json!("#zz");
    let msg = validation_message(v);
    assert_eq!(msg.lines().filter(|l| l.starts_with("$.")).count(), 3);
}

#[test]
fn missing_field_is_a_serde_error() {
    let mut v = base();
    v.as_object_mut().unwrap().remove("titleText");
    let err = AudiogramProps::from_json_str(&v.to_string()).unwrap_err();
    assert!(matches!(err, AudiogramError::Serde(_)));
}

#[test]
fn from_path_reads_json_file() {
    let dir = std::env::temp_dir().join(format!("audiogram-props-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("props.json");
    std::fs::write(&path, base().to_string()).unwrap();
    let p = AudiogramProps::from_path(&path).unwrap();
    assert_eq!(p.wave_lines_to_display, 66);
    let _ = std::fs::remove_dir_all(&dir);
}
