use crate::{
    foundation::core::{FrameIndex, FrameRange},
    text::reflow::MeasuredLine,
};

/// A group of consecutive lines displayed together.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Page {
    /// Lines in display order.
    pub lines: Vec<MeasuredLine>,
    /// Frames on which the page is current: first line start to last line end.
    pub range: FrameRange,
    /// Rendered height: line count times the configured line height.
    pub height_px: u64,
}

/// Immutable, ordered page list built once per subtitle track.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PageTable {
    pub(crate) pages: Vec<Page>,
    lines_per_page: u32,
    line_height_px: u32,
}

impl PageTable {
    /// Pages in timeline order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Configured page size; `0` means a single unlimited page.
    pub fn lines_per_page(&self) -> u32 {
        self.lines_per_page
    }

    /// Configured line height in pixels.
    pub fn line_height_px(&self) -> u32 {
        self.line_height_px
    }

    /// `true` when no cue produced any line.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Chunk ordered lines into pages of `lines_per_page` lines (the last page may be shorter).
///
/// `lines_per_page == 0` puts every line on a single page. Lines keep their order and their frame
/// shares, so a cue split across two pages shows each part only during its own share.
#[tracing::instrument(skip(lines), fields(lines = lines.len()))]
pub fn build_pages(
    lines: Vec<MeasuredLine>,
    lines_per_page: u32,
    line_height_px: u32,
) -> PageTable {
    let chunk = if lines_per_page == 0 {
        lines.len().max(1)
    } else {
        lines_per_page as usize
    };

    let mut pages = Vec::with_capacity(lines.len().div_ceil(chunk));
    let mut iter = lines.into_iter().peekable();
    while iter.peek().is_some() {
        let page_lines: Vec<MeasuredLine> = iter.by_ref().take(chunk).collect();
        pages.push(make_page(page_lines, line_height_px));
    }

    tracing::debug!(pages = pages.len(), "built page table");
    PageTable {
        pages,
        lines_per_page,
        line_height_px,
    }
}

fn make_page(lines: Vec<MeasuredLine>, line_height_px: u32) -> Page {
    let start = lines.first().map_or(FrameIndex(0), |l| l.range.start);
    let end = lines.last().map_or(start, |l| l.range.end);
    Page {
        height_px: lines.len() as u64 * u64::from(line_height_px),
        range: FrameRange { start, end },
        lines,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/subtitles/pages.rs"]
mod tests;
