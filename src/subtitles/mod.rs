//! Subtitle track: SRT parsing, pagination, and per-frame resolution.

pub(crate) mod cue;
pub(crate) mod pages;
pub(crate) mod resolve;
pub(crate) mod srt;
