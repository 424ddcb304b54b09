use crate::assets::color::TextColor;
use crate::foundation::error::PosterResult;
use crate::poster::model::{ControlRange, FontWeight, LayerRole, PosterDocument, TextAlign};

/// A single change made through the studio controls.
///
/// Numeric edits are clamped into the slider ranges the editor offers; non-finite values are
/// rejected. Background swaps are not edits: they need a load step and go through
/// [`crate::StudioSession::replace_background`].
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    Text(LayerRole, String),
    FontSize(LayerRole, f64),
    PositionX(LayerRole, f64),
    PositionY(LayerRole, f64),
    FontWeight(LayerRole, FontWeight),
    TextColor(TextColor),
    TextAlign(TextAlign),
    Shadow(bool),
    ToggleShadow,
}

impl Edit {
    /// Apply the edit to `doc`. On error the document is left unchanged.
    pub fn apply_to(self, doc: &mut PosterDocument) -> PosterResult<()> {
        match self {
            Self::Text(role, text) => doc.layer_mut(role).text = text,
            Self::FontSize(role, v) => {
                doc.layer_mut(role).font_size_percent = role.size_range().clamp(v)?;
            }
            Self::PositionX(role, v) => {
                doc.layer_mut(role).position_x_percent = ControlRange::POSITION_X.clamp(v)?;
            }
            Self::PositionY(role, v) => {
                doc.layer_mut(role).position_y_percent = ControlRange::POSITION_Y.clamp(v)?;
            }
            Self::FontWeight(role, w) => doc.layer_mut(role).font_weight = w,
            Self::TextColor(c) => doc.style.text_color = c,
            Self::TextAlign(a) => doc.style.text_align = a,
            Self::Shadow(on) => doc.style.shadow_enabled = on,
            Self::ToggleShadow => doc.style.shadow_enabled = !doc.style.shadow_enabled,
        }
        Ok(())
    }
}
