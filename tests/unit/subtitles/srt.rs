use super::*;
use crate::foundation::core::AUDIOGRAM_FPS;

fn parse(src: &str) -> Vec<Cue> {
    parse_srt(src, AUDIOGRAM_FPS).unwrap()
}

#[test]
fn parses_numbered_blocks_into_frames() {
    let cues = parse(
        "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n2\n00:00:01,000 --> 00:00:02,000\nWorld\n",
    );
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].start_frame, FrameIndex(0));
    assert_eq!(cues[0].end_frame, FrameIndex(30));
    assert_eq!(cues[0].text, "Hello");
    assert_eq!(cues[1].start_frame, FrameIndex(30));
    assert_eq!(cues[1].end_frame, FrameIndex(60));
    assert_eq!(cues[1].text, "World");
}

#[test]
fn multi_line_text_is_joined_with_break_marker() {
    let cues = parse("1\n00:00:00,000 --> 00:00:02,000\nfirst line  \nsecond line\n");
    assert_eq!(cues[0].text, "first line\nsecond line");
}

#[test]
fn tolerates_bom_crlf_dot_separator_and_missing_index() {
    let src = "\u{feff}1\r\n00:00:00.500 --> 00:00:01.000\r\nA\r\n\r\n\r\n   \r\n00:01:00,000 --> 00:01:01,000 X1:10 Y1:20\r\nB\r\n\r\n";
    let cues = parse(src);
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].start_frame, FrameIndex(15));
    assert_eq!(cues[0].text, "A");
    assert_eq!(cues[1].start_frame, FrameIndex(1800));
    assert_eq!(cues[1].end_frame, FrameIndex(1830));
    assert_eq!(cues[1].text, "B");
}

#[test]
fn empty_document_has_no_cues() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n   \n\t\n").is_empty());
}

#[test]
fn block_without_timing_line_is_a_parse_error() {
    let src = "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n2\nWorld\n";
    let err = parse_srt(src, AUDIOGRAM_FPS).unwrap_err();
    match err {
        AudiogramError::Parse { line, .. } => assert_eq!(line, 5),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn malformed_timestamps_are_parse_errors() {
    for bad in [
        "1\n00:00:xx,000 --> 00:00:01,000\nA\n",
        "1\n00:00:00 --> 00:00:01,000\nA\n",
        "1\n00:61:00,000 --> 00:62:00,000\nA\n",
        "1\n00:00:00,0000 --> 00:00:01,000\nA\n",
        "1\n00:00:00,000 --> \nA\n",
    ] {
        let err = parse_srt(bad, AUDIOGRAM_FPS).unwrap_err();
        assert!(
            matches!(err, AudiogramError::Parse { line: 2, .. }),
            "{bad:?} -> {err:?}"
        );
    }
}

#[test]
fn end_before_start_is_a_parse_error() {
    let err = parse_srt("1\n00:00:02,000 --> 00:00:01,000\nA\n", AUDIOGRAM_FPS).unwrap_err();
    assert!(err.to_string().contains("earlier than its start"));
}

#[test]
fn parse_timestamp_accepts_long_hours() {
    assert_eq!(parse_timestamp("01:02:03,004").unwrap(), 3_723_004);
    assert_eq!(parse_timestamp("100:00:00.000").unwrap(), 360_000_000);
}

#[test]
fn cues_are_sorted_and_overlaps_truncated() {
    let src = "\
2
00:00:02,000 --> 00:00:03,000
later

1
00:00:00,000 --> 00:00:02,500
earlier
";
    let cues = parse(src);
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].text, "earlier");
    assert_eq!(cues[0].end_frame, FrameIndex(60));
    assert_eq!(cues[1].start_frame, FrameIndex(60));
}

#[test]
fn zero_frame_cues_are_dropped() {
    let src = "1\n00:00:00,000 --> 00:00:00,010\ntoo short\n\n2\n00:00:01,000 --> 00:00:02,000\nok\n";
    let cues = parse(src);
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "ok");
}

#[test]
fn dropped_cue_does_not_truncate_its_predecessor() {
    let src = "\
1
00:00:00,000 --> 00:00:02,000
long

2
00:00:01,000 --> 00:00:01,010
blip
";
    let cues = parse(src);
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "long");
    assert_eq!(cues[0].end_frame, FrameIndex(60));
}

#[test]
fn same_start_overlap_keeps_only_the_later_cue() {
    let src = "1\n00:00:01,000 --> 00:00:02,000\nfirst\n\n2\n00:00:01,000 --> 00:00:03,000\nsecond\n";
    let cues = parse(src);
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "second");
}

#[test]
fn parsed_cues_are_strictly_ordered_and_non_empty() {
    let src = "\
1
00:00:00,000 --> 00:00:01,000
a

2
00:00:00,900 --> 00:00:01,500
b

3
00:00:01,500 --> 00:00:01,510
c

4
00:00:03,000 --> 00:00:04,000
d
";
    let cues = parse(src);
    for c in &cues {
        assert!(c.start_frame < c.end_frame);
    }
    for w in cues.windows(2) {
        assert!(w[0].start_frame < w[1].start_frame);
        assert!(w[0].end_frame <= w[1].start_frame);
    }
}
