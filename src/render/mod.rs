// src/render/mod.rs
// =============================================================================
// Rendering of the projects gallery.
//
// - card: pure functions from enriched projects to markup
// - target: the single write of that markup to stdout, a file, or a page
// =============================================================================

mod card;
mod target;

pub use card::{render_empty, render_error, render_gallery};
pub use target::RenderTarget;
