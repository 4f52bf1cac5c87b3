//! Domain operations: thin, typed wrappers over the request pipeline,
//! grouped by area. Each call propagates `ApiError` untouched; the caller
//! maps it to a message and clears its loading state.

pub mod auth;
pub mod membership;
pub mod payments;
pub mod profile;
