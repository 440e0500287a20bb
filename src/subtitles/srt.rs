use crate::{
    foundation::core::{FrameIndex, Fps},
    foundation::error::{AudiogramError, AudiogramResult},
    subtitles::cue::Cue,
};

const TIMING_ARROW: &str = "-->";

/// Parse an SRT document into time-ordered, non-overlapping cues.
///
/// Timestamps are converted with [`Fps::millis_to_frames_round`]. Blank and whitespace-only
/// blocks are skipped; a block without a timing line or with malformed timestamps fails the whole
/// document. Overlapping cues are truncated at their successor's start, and cues that end up
/// covering no frame are dropped.
#[tracing::instrument(skip(src), fields(bytes = src.len()))]
pub fn parse_srt(src: &str, fps: Fps) -> AudiogramResult<Vec<Cue>> {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);

    let mut cues = Vec::new();
    for block in split_blocks(src) {
        cues.push(parse_block(&block, fps)?);
    }

    let cues = normalize_cues(cues);
    tracing::debug!(cues = cues.len(), "parsed srt document");
    Ok(cues)
}

struct Block<'a> {
    first_line: usize,
    lines: Vec<&'a str>,
}

fn split_blocks(src: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;

    for (idx, line) in src.lines().enumerate() {
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }
        current
            .get_or_insert_with(|| Block {
                first_line: idx + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }
    if let Some(block) = current {
        blocks.push(block);
    }
    blocks
}

fn parse_block(block: &Block<'_>, fps: Fps) -> AudiogramResult<Cue> {
    // Index line is optional; the timing line is the first or second line of the block.
    let timing_pos = block
        .lines
        .iter()
        .take(2)
        .position(|l| l.contains(TIMING_ARROW))
        .ok_or_else(|| {
            AudiogramError::parse(block.first_line, "subtitle block is missing a timing line")
        })?;
    let timing_line_no = block.first_line + timing_pos;

    let (start_ms, end_ms) = parse_timing_line(block.lines[timing_pos])
        .map_err(|msg| AudiogramError::parse(timing_line_no, msg))?;
    if end_ms < start_ms {
        return Err(AudiogramError::parse(
            timing_line_no,
            "cue end timestamp is earlier than its start",
        ));
    }

    let text = block.lines[timing_pos + 1..]
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Cue {
        start_frame: FrameIndex(fps.millis_to_frames_round(start_ms)),
        end_frame: FrameIndex(fps.millis_to_frames_round(end_ms)),
        text,
    })
}

fn parse_timing_line(line: &str) -> Result<(u64, u64), String> {
    let (left, right) = line
        .split_once(TIMING_ARROW)
        .ok_or_else(|| format!("timing line must contain '{TIMING_ARROW}'"))?;
    // Anything after the end timestamp (e.g. `X1:... Y1:...` position hints) is ignored.
    let right = right.split_whitespace().next().unwrap_or("");
    Ok((parse_timestamp(left.trim())?, parse_timestamp(right)?))
}

/// Parse `HH:MM:SS,mmm` (or `HH:MM:SS.mmm`) into milliseconds.
pub(crate) fn parse_timestamp(s: &str) -> Result<u64, String> {
    let malformed = || format!("malformed timestamp \"{s}\" (expected HH:MM:SS,mmm)");

    let (hms, millis) = s.rsplit_once([',', '.']).ok_or_else(malformed)?;
    let mut parts = hms.split(':');
    let (Some(h), Some(m), Some(sec), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    fn field(v: &str, max_len: usize) -> Option<u64> {
        if v.is_empty() || v.len() > max_len || !v.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        v.parse().ok()
    }

    let h = field(h, 4).ok_or_else(malformed)?;
    let m = field(m, 2).ok_or_else(malformed)?;
    let sec = field(sec, 2).ok_or_else(malformed)?;
    if millis.len() != 3 {
        return Err(malformed());
    }
    let millis = field(millis, 3).ok_or_else(malformed)?;
    if m >= 60 || sec >= 60 {
        return Err(format!("timestamp \"{s}\" has minutes or seconds out of range"));
    }

    Ok(((h * 60 + m) * 60 + sec) * 1000 + millis)
}

fn normalize_cues(mut cues: Vec<Cue>) -> Vec<Cue> {
    // Cues that cover no frame are gone before they can truncate a neighbour.
    drop_empty_cues(&mut cues, "dropping cue that covers no frame at this frame rate");
    cues.sort_by_key(|c| c.start_frame);

    for i in 1..cues.len() {
        let next_start = cues[i].start_frame;
        let prev = &mut cues[i - 1];
        if prev.end_frame > next_start {
            tracing::warn!(
                start = prev.start_frame.0,
                end = prev.end_frame.0,
                next_start = next_start.0,
                "truncating cue that overlaps its successor"
            );
            prev.end_frame = next_start;
        }
    }

    drop_empty_cues(&mut cues, "dropping cue hidden by a successor with the same start");
    cues
}

fn drop_empty_cues(cues: &mut Vec<Cue>, reason: &'static str) {
    cues.retain(|c| {
        let keep = c.end_frame > c.start_frame;
        if !keep {
            tracing::warn!(frame = c.start_frame.0, "{reason}");
        }
        keep
    });
}

#[cfg(test)]
#[path = "../../tests/unit/subtitles/srt.rs"]
mod tests;
