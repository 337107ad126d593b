//! The markup transform pipeline.
//!
//! Everything between a raw catalog record and an export-ready string lives
//! here: [`sanitize`] strips noise and scopes ids so icons can be injected
//! into a shared document repeatedly, and [`color`] extracts and rewrites
//! the paint tokens.
//!
//! Processing order matters: [`sanitize::strip_noise`] runs first so noise
//! never pollutes color extraction or id rewriting.

pub mod color;
pub mod sanitize;

pub use color::{ColorMap, apply_color_map, extract_colors, is_recolorable};
pub use sanitize::{RenderSeed, normalize_ids, strip_noise};
