//! Retrieval of external subtitle resources.

pub(crate) mod source;
