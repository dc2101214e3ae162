//! Explicit state of one signing session and its transitions

use crate::composite::composite;
use crate::document::DocumentHandle;
use crate::modal::SignatureModal;
use crate::options::SignerOptions;
use crate::pad::SignaturePad;
use crate::placement::{PendingPlacement, PlacementController, PlacementRecord};
use crate::store::AnnotationStore;
use crate::surface::Surface;
use crate::types::*;

/// Token identifying one load request. Only the most recently issued
/// generation may install a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadGeneration(pub u64);

/// What happened to a finished load
#[derive(Debug)]
pub enum LoadOutcome {
    /// The document was installed
    Installed { page_count: usize },
    /// A newer load was started in the meantime; the result was dropped
    Stale,
    /// The current load failed; the previous document (if any) is kept
    Failed(SignerError),
}

/// Everything one signer widget owns: the document, the placements, the
/// click controller and the capture modal.
pub struct SignerSession {
    options: SignerOptions,
    document: Option<DocumentHandle>,
    annotations: AnnotationStore,
    controller: PlacementController,
    modal: SignatureModal,
    issued: LoadGeneration,
    loading: bool,
}

impl SignerSession {
    pub fn new(options: SignerOptions) -> Self {
        let pad = SignaturePad::new(options.pad_size, options.pen_width, options.pen_color);
        Self {
            options,
            document: None,
            annotations: AnnotationStore::new(),
            controller: PlacementController,
            modal: SignatureModal::new(pad),
            issued: LoadGeneration(0),
            loading: false,
        }
    }

    pub fn options(&self) -> &SignerOptions {
        &self.options
    }

    pub fn document(&self) -> Option<&DocumentHandle> {
        self.document.as_ref()
    }

    pub fn annotations(&self) -> &[PlacementRecord] {
        self.annotations.all()
    }

    pub fn modal(&self) -> &SignatureModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut SignatureModal {
        &mut self.modal
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_generation(&self) -> LoadGeneration {
        self.issued
    }

    /// Start a load. The returned generation must accompany the result.
    pub fn begin_load(&mut self) -> LoadGeneration {
        self.issued = LoadGeneration(self.issued.0 + 1);
        self.loading = true;
        log::debug!("Issued load generation {}", self.issued.0);
        self.issued
    }

    /// Finish the load tagged `generation`.
    ///
    /// Results from superseded generations are dropped so a slow earlier load
    /// can never replace a later document.
    pub fn finish_load(
        &mut self,
        generation: LoadGeneration,
        result: std::result::Result<DocumentHandle, SignerError>,
    ) -> LoadOutcome {
        if generation != self.issued {
            log::debug!(
                "Dropping load generation {} (current is {})",
                generation.0,
                self.issued.0
            );
            return LoadOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(document) => {
                let page_count = document.page_count();
                self.document = Some(document);
                log::info!("Loaded PDF with {} pages", page_count);
                LoadOutcome::Installed { page_count }
            }
            Err(e) => {
                log::warn!("Load failed: {}", e);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Drop the document, annotations and modal for a fresh start.
    ///
    /// The generation counter keeps counting and is bumped, so loads still in
    /// flight from before the reset come back stale.
    pub fn reset(&mut self) {
        let pad = SignaturePad::new(
            self.options.pad_size,
            self.options.pen_width,
            self.options.pen_color,
        );
        self.document = None;
        self.annotations = AnnotationStore::new();
        self.modal = SignatureModal::new(pad);
        self.issued = LoadGeneration(self.issued.0 + 1);
        self.loading = false;
        log::debug!("Session reset at generation {}", self.issued.0);
    }

    /// Handle a click at viewport point `client` on a surface whose bounding
    /// box starts at `surface_origin`. Opens the modal; returns the pending
    /// placement.
    pub fn click(&mut self, client: Point, surface_origin: Point) -> PendingPlacement {
        let pending = self.controller.on_surface_click(client, surface_origin);
        self.modal.open(pending);
        pending
    }

    /// Save the drawn signature at the pending placement
    pub fn save(&mut self) -> std::result::Result<PlacementRecord, CaptureError> {
        self.modal.save(&mut self.annotations)
    }

    /// Close the modal, discarding the pending placement
    pub fn cancel(&mut self) -> Option<PendingPlacement> {
        self.modal.cancel()
    }

    /// Run a composite pass over the current state. `Ok(None)` when no
    /// document is loaded yet.
    pub fn composite(&self) -> std::result::Result<Option<Surface>, RenderError> {
        let Some(document) = &self.document else {
            return Ok(None);
        };
        composite(
            document,
            self.annotations.all(),
            self.modal.pending(),
            &self.options,
        )
        .map(Some)
    }
}
