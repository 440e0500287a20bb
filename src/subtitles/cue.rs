use crate::foundation::core::{FrameIndex, FrameRange};

/// One timed subtitle entry.
///
/// `text` keeps the source's line structure: multi-line cue text is joined with `'\n'`, which
/// reflow treats as a hard break.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Cue {
    /// First frame on which the cue is active.
    pub start_frame: FrameIndex,
    /// First frame on which the cue is no longer active.
    pub end_frame: FrameIndex,
    /// Cue text.
    pub text: String,
}

impl Cue {
    /// Active interval `[start_frame, end_frame)`.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: self.start_frame,
            end: self.end_frame,
        }
    }

    /// `true` when the cue carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
