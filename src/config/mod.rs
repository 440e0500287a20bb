//! Composition props, their validation, and color parsing.

pub(crate) mod color;
pub(crate) mod props;
