use crate::assets::decode::{Background, BackgroundSource};
use crate::encode::png::{ExportedPoster, now_millis};
use crate::foundation::error::{PosterError, PosterResult};
use crate::poster::edit::Edit;
use crate::poster::model::PosterDocument;
use crate::render::compositor::{PosterCompositor, PosterFrame};
use crate::render::text::TextRenderer;

/// Snapshot of everything one redraw reads.
///
/// Requests are numbered; only the result of the newest request may be committed, so a slow
/// redraw that finishes after a newer edit is simply discarded.
#[derive(Clone, Debug)]
pub struct RedrawRequest {
    pub generation: u64,
    pub document: PosterDocument,
    pub background: Background,
}

/// Live state of one poster editing session.
///
/// Opened on a background, mutated by [`Edit`]s, exported on demand and dropped on cancel. Every
/// change triggers a full redraw; a failed redraw keeps the last committed frame on screen.
pub struct StudioSession<R> {
    compositor: PosterCompositor<R>,
    background: Background,
    document: PosterDocument,
    generation: u64,
    committed: Option<(u64, PosterFrame)>,
}

impl<R: TextRenderer> StudioSession<R> {
    /// Load `source` and open the studio with default layers.
    ///
    /// `background_ref` is the opaque reference stored in the document. Fails without creating a
    /// session if the background cannot be loaded.
    pub fn open(
        text: R,
        background_ref: &str,
        headline: Option<&str>,
        subtext: Option<&str>,
    ) -> PosterResult<Self> {
        let background = Background::load(&BackgroundSource::parse(background_ref))?;
        let document = PosterDocument::new(background_ref, headline, subtext);
        Self::with_document(text, background, document)
    }

    /// Open on an already decoded background and an existing document.
    pub fn with_document(
        text: R,
        background: Background,
        document: PosterDocument,
    ) -> PosterResult<Self> {
        document.validate()?;
        let mut session = Self {
            compositor: PosterCompositor::new(text),
            background,
            document,
            generation: 0,
            committed: None,
        };
        session.redraw()?;
        Ok(session)
    }

    pub fn document(&self) -> &PosterDocument {
        &self.document
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Latest committed frame.
    pub fn frame(&self) -> Option<&PosterFrame> {
        self.committed.as_ref().map(|(_, f)| f)
    }

    /// Generation of the newest redraw request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Generation of the committed frame, if any.
    pub fn committed_generation(&self) -> Option<u64> {
        self.committed.as_ref().map(|(g, _)| *g)
    }

    pub fn compositor_mut(&mut self) -> &mut PosterCompositor<R> {
        &mut self.compositor
    }

    /// Apply one edit and redraw.
    ///
    /// Rejected edits leave both the document and the committed frame untouched.
    pub fn apply(&mut self, edit: Edit) -> PosterResult<&PosterFrame> {
        let mut next = self.document.clone();
        edit.apply_to(&mut next)?;
        next.validate()?;
        self.document = next;
        self.redraw()
    }

    /// Swap the background and redraw.
    ///
    /// The new background is loaded first; if that fails nothing changes and the load error is
    /// returned.
    pub fn replace_background(&mut self, background_ref: &str) -> PosterResult<&PosterFrame> {
        let background = Background::load(&BackgroundSource::parse(background_ref))?;
        self.replace_background_with(background_ref, background)
    }

    /// Swap in an already decoded background.
    pub fn replace_background_with(
        &mut self,
        background_ref: &str,
        background: Background,
    ) -> PosterResult<&PosterFrame> {
        if background_ref.trim().is_empty() {
            return Err(PosterError::validation(
                "background reference must be non-empty",
            ));
        }
        self.background = background;
        self.document.background = background_ref.to_owned();
        self.redraw()
    }

    /// Start a redraw of the current state, superseding any outstanding request.
    pub fn begin_redraw(&mut self) -> RedrawRequest {
        self.generation += 1;
        RedrawRequest {
            generation: self.generation,
            document: self.document.clone(),
            background: self.background.clone(),
        }
    }

    /// Render a request with this session's compositor.
    pub fn render_request(&mut self, request: &RedrawRequest) -> PosterResult<PosterFrame> {
        self.compositor
            .render(&request.background, &request.document)
    }

    /// Commit a finished frame if its request is still the newest. Returns whether it was kept.
    pub fn complete_redraw(&mut self, generation: u64, frame: PosterFrame) -> bool {
        if generation != self.generation {
            tracing::warn!(
                generation,
                latest = self.generation,
                "dropping stale poster redraw"
            );
            return false;
        }
        self.committed = Some((generation, frame));
        true
    }

    fn redraw(&mut self) -> PosterResult<&PosterFrame> {
        let request = self.begin_redraw();
        let frame = self.render_request(&request)?;
        self.complete_redraw(request.generation, frame);
        self.frame()
            .ok_or_else(|| PosterError::render("redraw produced no frame"))
    }

    /// Encode the committed frame as a timestamped PNG.
    pub fn export(&self) -> PosterResult<ExportedPoster> {
        self.export_at(now_millis())
    }

    pub fn export_at(&self, timestamp_ms: u128) -> PosterResult<ExportedPoster> {
        let frame = self
            .frame()
            .ok_or_else(|| PosterError::export("nothing has been rendered yet"))?;
        ExportedPoster::from_frame(frame, timestamp_ms)
    }

    /// Discard the session and everything it rendered.
    pub fn cancel(self) {
        tracing::debug!(generation = self.generation, "poster session cancelled");
    }
}
