//! Text measurement and line reflow.

pub(crate) mod measure;
pub(crate) mod reflow;

#[cfg(test)]
#[path = "../../tests/unit/text/support.rs"]
pub(crate) mod support;
