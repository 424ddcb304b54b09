use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::assets::store::{FontFace, FontSet};
use crate::foundation::error::{PosterError, PosterResult};

/// Font files for the two poster weights.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontPaths {
    /// Heavy face used for headlines.
    pub bold: Option<PathBuf>,
    /// Body face used for subtext; falls back to `bold`.
    pub medium: Option<PathBuf>,
}

/// Studio settings read from a JSON file.
///
/// ```json
/// { "fonts": { "bold": "fonts/Quicksand-Bold.ttf", "medium": "fonts/Quicksand-Medium.ttf" },
///   "out_dir": "posters" }
/// ```
///
/// Relative paths are resolved against the directory holding the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    pub fonts: FontPaths,
    pub out_dir: Option<PathBuf>,
}

impl StudioConfig {
    pub fn from_path(path: &Path) -> PosterResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_str(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_relative(base);
        Ok(cfg)
    }

    fn resolve_relative(&mut self, base: &Path) {
        let fix = |p: &mut Option<PathBuf>| {
            if let Some(inner) = p
                && inner.is_relative()
            {
                *inner = base.join(&*inner);
            }
        };
        fix(&mut self.fonts.bold);
        fix(&mut self.fonts.medium);
        fix(&mut self.out_dir);
    }

    /// Overlay explicitly given values (e.g. command line flags) on top of this config.
    pub fn with_overrides(
        mut self,
        bold: Option<PathBuf>,
        medium: Option<PathBuf>,
        out_dir: Option<PathBuf>,
    ) -> Self {
        if bold.is_some() {
            self.fonts.bold = bold;
        }
        if medium.is_some() {
            self.fonts.medium = medium;
        }
        if out_dir.is_some() {
            self.out_dir = out_dir;
        }
        self
    }

    /// Output directory, defaulting to the working directory.
    pub fn out_dir(&self) -> PathBuf {
        self.out_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load the configured faces.
    ///
    /// At least one face is required; a lone medium face is used for both weights.
    pub fn load_fonts(&self) -> PosterResult<FontSet> {
        match (&self.fonts.bold, &self.fonts.medium) {
            (Some(bold), medium) => {
                let bold = FontFace::from_path(bold)?;
                let medium = medium.as_deref().map(FontFace::from_path).transpose()?;
                Ok(FontSet::new(bold, medium))
            }
            (None, Some(medium)) => Ok(FontSet::new(FontFace::from_path(medium)?, None)),
            (None, None) => Err(PosterError::validation(
                "no font configured: set fonts.bold (and optionally fonts.medium)",
            )),
        }
    }
}
