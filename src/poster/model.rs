use serde::{Deserialize, Serialize};

use crate::assets::color::TextColor;
use crate::foundation::core::Canvas;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::percent_of;

/// Glyph weight of a text layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Heavy display weight (CSS 900).
    #[default]
    Bold,
    /// Body weight (CSS 500).
    Medium,
}

impl FontWeight {
    /// Numeric CSS weight.
    pub fn css_weight(self) -> u16 {
        match self {
            Self::Bold => 900,
            Self::Medium => 500,
        }
    }
}

/// Horizontal alignment of every line relative to its layer's X anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// The anchor is the left edge of the line.
    Left,
    /// The anchor is the horizontal middle of the line.
    #[default]
    Center,
    /// The anchor is the right edge of the line.
    Right,
}

impl TextAlign {
    /// Fraction of the line width that lies left of the anchor.
    pub fn anchor_fraction(self) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// Which of the two poster text blocks a layer is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    /// Large title text.
    Headline,
    /// Smaller supporting text.
    Subtext,
}

impl LayerRole {
    /// Blocks are always drawn headline first.
    pub const DRAW_ORDER: [Self; 2] = [Self::Headline, Self::Subtext];

    /// Line spacing as a multiple of the pixel font size.
    pub fn line_height_multiplier(self) -> f64 {
        match self {
            Self::Headline => 1.2,
            Self::Subtext => 1.4,
        }
    }

    /// Text used when the provider supplies none.
    pub fn placeholder_text(self) -> &'static str {
        match self {
            Self::Headline => "YOUR HEADLINE",
            Self::Subtext => "Add your details here",
        }
    }

    /// Range of the size slider for this block, in percent of canvas height.
    pub fn size_range(self) -> ControlRange {
        match self {
            Self::Headline => ControlRange::HEADLINE_SIZE,
            Self::Subtext => ControlRange::SUBTEXT_SIZE,
        }
    }

    /// Layer the studio opens with.
    pub fn default_layer(self, text: Option<&str>) -> PosterLayer {
        let text = text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.placeholder_text())
            .to_owned();
        match self {
            Self::Headline => PosterLayer {
                text,
                font_size_percent: 8.0,
                position_x_percent: 50.0,
                position_y_percent: 40.0,
                font_weight: FontWeight::Bold,
            },
            Self::Subtext => PosterLayer {
                text,
                font_size_percent: 3.5,
                position_x_percent: 50.0,
                position_y_percent: 65.0,
                font_weight: FontWeight::Medium,
            },
        }
    }

    /// Lowercase name used in logs and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::Subtext => "subtext",
        }
    }
}

/// Inclusive slider range; editor input is clamped into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlRange {
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
}

impl ControlRange {
    /// Headline size, percent of canvas height.
    pub const HEADLINE_SIZE: Self = Self::new(2.0, 20.0);
    /// Subtext size, percent of canvas height.
    pub const SUBTEXT_SIZE: Self = Self::new(1.0, 10.0);
    /// Vertical anchor, percent of canvas height.
    pub const POSITION_Y: Self = Self::new(10.0, 90.0);
    /// Horizontal anchor, percent of canvas width.
    pub const POSITION_X: Self = Self::new(0.0, 100.0);

    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a finite value into the range.
    pub fn clamp(self, v: f64) -> PosterResult<f64> {
        if !v.is_finite() {
            return Err(PosterError::validation("control value must be finite"));
        }
        Ok(v.clamp(self.min, self.max))
    }
}

/// One text block: content, size, anchor and weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PosterLayer {
    /// Content; `\n` starts a new line.
    pub text: String,
    /// Font size in percent of canvas height.
    pub font_size_percent: f64,
    /// Horizontal anchor in percent of canvas width.
    pub position_x_percent: f64,
    /// Baseline of the first line in percent of canvas height.
    pub position_y_percent: f64,
    /// Glyph weight.
    pub font_weight: FontWeight,
}

impl PosterLayer {
    /// Pixel font size: `round(H * font_size_percent / 100)`.
    pub fn font_size_px(&self, canvas: Canvas) -> u32 {
        percent_of(canvas.height, self.font_size_percent)
            .round()
            .max(0.0) as u32
    }

    /// Anchor point `(x, y)` in canvas pixels.
    pub fn anchor_px(&self, canvas: Canvas) -> (f64, f64) {
        (
            percent_of(canvas.width, self.position_x_percent),
            percent_of(canvas.height, self.position_y_percent),
        )
    }

    fn validate(&self, role: LayerRole) -> PosterResult<()> {
        let name = role.as_str();
        if !self.font_size_percent.is_finite() || self.font_size_percent < 0.0 {
            return Err(PosterError::validation(format!(
                "{name}: font_size_percent must be finite and >= 0"
            )));
        }
        for (field, v) in [
            ("position_x_percent", self.position_x_percent),
            ("position_y_percent", self.position_y_percent),
        ] {
            if !v.is_finite() || !(0.0..=100.0).contains(&v) {
                return Err(PosterError::validation(format!(
                    "{name}: {field} must be within 0..=100"
                )));
            }
        }
        Ok(())
    }
}

/// Appearance shared by both blocks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterStyle {
    /// Fill color of all text.
    pub text_color: TextColor,
    /// Alignment of every line against its anchor.
    pub text_align: TextAlign,
    /// Draw a soft drop shadow under both blocks.
    pub shadow_enabled: bool,
}

/// Everything the compositor needs besides the decoded background pixels.
///
/// Documents live for one editing session. Missing fields in JSON take the values the studio
/// opens with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PosterDocumentRepr")]
pub struct PosterDocument {
    /// Opaque reference to the background image (path or data URL).
    pub background: String,
    /// Title block.
    pub headline: PosterLayer,
    /// Supporting block.
    pub subtext: PosterLayer,
    /// Shared appearance.
    pub style: PosterStyle,
}

impl PosterDocument {
    /// Studio defaults for a freshly opened background.
    pub fn new(background: impl Into<String>, headline: Option<&str>, subtext: Option<&str>) -> Self {
        Self {
            background: background.into(),
            headline: LayerRole::Headline.default_layer(headline),
            subtext: LayerRole::Subtext.default_layer(subtext),
            style: PosterStyle::default(),
        }
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> PosterResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Pretty JSON form.
    pub fn to_json_pretty(&self) -> PosterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn layer(&self, role: LayerRole) -> &PosterLayer {
        match role {
            LayerRole::Headline => &self.headline,
            LayerRole::Subtext => &self.subtext,
        }
    }

    pub fn layer_mut(&mut self, role: LayerRole) -> &mut PosterLayer {
        match role {
            LayerRole::Headline => &mut self.headline,
            LayerRole::Subtext => &mut self.subtext,
        }
    }

    /// Check numeric fields and the background reference.
    pub fn validate(&self) -> PosterResult<()> {
        if self.background.trim().is_empty() {
            return Err(PosterError::validation("background reference must be non-empty"));
        }
        for role in LayerRole::DRAW_ORDER {
            self.layer(role).validate(role)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct PosterDocumentRepr {
    background: String,
    #[serde(default)]
    headline: LayerPatch,
    #[serde(default)]
    subtext: LayerPatch,
    #[serde(default)]
    style: PosterStyle,
}

#[derive(Default, Deserialize)]
struct LayerPatch {
    text: Option<String>,
    font_size_percent: Option<f64>,
    position_x_percent: Option<f64>,
    position_y_percent: Option<f64>,
    font_weight: Option<FontWeight>,
}

impl LayerPatch {
    fn into_layer(self, role: LayerRole) -> PosterLayer {
        let mut layer = role.default_layer(None);
        if let Some(text) = self.text {
            layer.text = text;
        }
        if let Some(v) = self.font_size_percent {
            layer.font_size_percent = v;
        }
        if let Some(v) = self.position_x_percent {
            layer.position_x_percent = v;
        }
        if let Some(v) = self.position_y_percent {
            layer.position_y_percent = v;
        }
        if let Some(w) = self.font_weight {
            layer.font_weight = w;
        }
        layer
    }
}

impl From<PosterDocumentRepr> for PosterDocument {
    fn from(r: PosterDocumentRepr) -> Self {
        Self {
            background: r.background,
            headline: r.headline.into_layer(LayerRole::Headline),
            subtext: r.subtext.into_layer(LayerRole::Subtext),
            style: r.style,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/poster/model.rs"]
mod tests;
