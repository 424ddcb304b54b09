//! Poster text compositor.
//!
//! Renders a headline and a subtext block over a background image at the background's native
//! resolution: greedy word wrap at 90% of the canvas width, per-block size and anchor, shared
//! color/alignment, and an optional soft drop shadow. The result is exported as a PNG.
//!
//! - Open a [`StudioSession`] on a background (or call [`PosterCompositor::render`] directly)
//! - Change it with [`Edit`]s; every change is a full redraw
//! - [`StudioSession::export`] the committed frame
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod layout;
pub mod poster;
pub mod render;
pub mod session;

pub use assets::color::TextColor;
pub use assets::decode::{Background, BackgroundSource};
pub use assets::store::{FontFace, FontSet};
pub use config::{FontPaths, StudioConfig};
pub use encode::png::{ExportedPoster, encode_png, export_file_name};
pub use foundation::core::Canvas;
pub use foundation::error::{PosterError, PosterResult};
pub use layout::block::{BlockLayout, FontSpec, PlacedLine, max_line_width};
pub use layout::wrap::wrap_paragraphs;
pub use poster::edit::Edit;
pub use poster::model::{
    ControlRange, FontWeight, LayerRole, PosterDocument, PosterLayer, PosterStyle, TextAlign,
};
pub use render::compositor::{PosterCompositor, PosterFrame};
pub use render::shadow::ShadowParams;
pub use render::text::{FontTextRenderer, TextLine, TextRenderer};
pub use session::studio::{RedrawRequest, StudioSession};
