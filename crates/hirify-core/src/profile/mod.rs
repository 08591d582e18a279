//! Profile editing module.

mod draft;

pub use draft::{ProfileDraft, ProfileField, SoughtField};
