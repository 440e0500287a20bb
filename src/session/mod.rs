//! Two-phase session API: prepare once, resolve frames many times.

pub(crate) mod audiogram_session;
