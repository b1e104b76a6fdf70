//! Image rendering for the Darkroom asset pipeline.
//!
//! One job: take original image bytes and produce a variant that exactly
//! fills a target box. The source is scaled to fully cover the box, then
//! center-cropped, so variants never letterbox. Output is re-encoded in
//! the source's own format.
//!
//! ```rust,ignore
//! use darkroom_images::{render_fill, ResizeFilter};
//!
//! let thumb = render_fill(&original_bytes, 100, 100, ResizeFilter::default())?;
//! assert_eq!((thumb.width, thumb.height), (100, 100));
//! ```

mod error;
mod render;

pub use error::*;
pub use render::*;
