use crate::{
    foundation::core::{FrameIndex, FrameRange},
    subtitles::pages::{Page, PageTable},
    text::reflow::MeasuredLine,
};

/// What part of the current page is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DisplayMode {
    /// The whole current page; held through gaps until the next page starts.
    #[default]
    Page,
    /// Only the lines of the cue active at the frame; nothing in gaps.
    Sentence,
}

impl DisplayMode {
    /// Map the `onlyDisplayCurrentSentence` prop to a mode.
    pub fn from_only_current_sentence(only_current: bool) -> Self {
        if only_current {
            Self::Sentence
        } else {
            Self::Page
        }
    }
}

/// Text visible at one frame, borrowed from a [`PageTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DisplaySpan<'a> {
    /// Frame the span was resolved for.
    pub frame: FrameIndex,
    /// Index of the current page, if any.
    pub page_index: Option<usize>,
    /// Index of the cue active at the frame, if any.
    pub cue_index: Option<usize>,
    /// Visible lines; empty when nothing is shown.
    pub lines: &'a [MeasuredLine],
}

impl DisplaySpan<'_> {
    /// Span that shows nothing.
    pub fn empty(frame: FrameIndex) -> Self {
        Self {
            frame,
            page_index: None,
            cue_index: None,
            lines: &[],
        }
    }

    /// `true` when no line is visible.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Visible lines joined with `'\n'`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PageTable {
    /// Resolve the visible span at track frame `frame`.
    ///
    /// Pure and allocation-free: a binary search over page starts plus a scan of one page's
    /// lines. All intervals are half-open, so a page or cue ending at `f` is not visible at `f`.
    pub fn resolve(&self, frame: FrameIndex, mode: DisplayMode) -> DisplaySpan<'_> {
        let Some((page_index, page, has_next)) = self.page_at_or_before(frame) else {
            return DisplaySpan::empty(frame);
        };

        let active = page.range.contains(frame);
        let cue = if active {
            active_cue_lines(page, frame)
        } else {
            None
        };

        match mode {
            DisplayMode::Page if active || has_next => DisplaySpan {
                frame,
                page_index: Some(page_index),
                cue_index: cue.map(|lines| lines[0].cue_index),
                lines: &page.lines,
            },
            DisplayMode::Sentence => match cue {
                Some(lines) => DisplaySpan {
                    frame,
                    page_index: Some(page_index),
                    cue_index: Some(lines[0].cue_index),
                    lines,
                },
                None => DisplaySpan::empty(frame),
            },
            DisplayMode::Page => DisplaySpan::empty(frame),
        }
    }

    /// Last non-empty page starting at or before `frame`, and whether a later page exists.
    fn page_at_or_before(&self, frame: FrameIndex) -> Option<(usize, &Page, bool)> {
        let after = self.pages.partition_point(|p| p.range.start <= frame);
        let has_next = after < self.pages.len();
        self.pages[..after]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, p)| !p.range.is_empty())
            .map(|(i, p)| (i, p, has_next))
    }
}

/// The contiguous run of one cue's lines on `page` whose interval contains `frame`.
fn active_cue_lines(page: &Page, frame: FrameIndex) -> Option<&[MeasuredLine]> {
    page.lines
        .chunk_by(|a, b| a.cue_index == b.cue_index)
        .find(|group| {
            let range = FrameRange {
                start: group[0].range.start,
                end: group[group.len() - 1].range.end,
            };
            range.contains(frame)
        })
}

#[cfg(test)]
#[path = "../../tests/unit/subtitles/resolve.rs"]
mod tests;
