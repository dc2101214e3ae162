use crate::pad::SignaturePad;
use crate::placement::{PendingPlacement, PlacementRecord};
use crate::store::AnnotationStore;
use crate::types::*;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalState {
    Closed,
    Open { pending: PendingPlacement },
}

/// Signature capture dialog: owns the pending placement and the drawing pad
#[derive(Debug, Clone)]
pub struct SignatureModal {
    state: ModalState,
    pad: SignaturePad,
}

impl SignatureModal {
    pub fn new(pad: SignaturePad) -> Self {
        Self {
            state: ModalState::Closed,
            pad,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn pending(&self) -> Option<PendingPlacement> {
        match self.state {
            ModalState::Open { pending } => Some(pending),
            ModalState::Closed => None,
        }
    }

    pub fn pad(&self) -> &SignaturePad {
        &self.pad
    }

    pub fn pad_mut(&mut self) -> &mut SignaturePad {
        &mut self.pad
    }

    /// Whether Save would currently succeed
    pub fn can_save(&self) -> bool {
        self.is_open() && !self.pad.is_empty()
    }

    /// Open for `pending` with a blank pad. A second click while open
    /// replaces the earlier pending placement.
    pub fn open(&mut self, pending: PendingPlacement) {
        if let Some(previous) = self.pending() {
            log::debug!(
                "Replacing pending placement at ({}, {})",
                previous.x,
                previous.y
            );
        }
        self.pad.clear();
        self.state = ModalState::Open { pending };
    }

    /// Close without saving. Returns the discarded placement, if any.
    pub fn cancel(&mut self) -> Option<PendingPlacement> {
        let discarded = self.pending();
        self.state = ModalState::Closed;
        self.pad.clear();
        discarded
    }

    /// Export the pad, append the finished placement to `store` and close.
    ///
    /// An empty pad is refused and the modal stays open.
    pub fn save(
        &mut self,
        store: &mut AnnotationStore,
    ) -> std::result::Result<PlacementRecord, CaptureError> {
        let pending = self.pending().ok_or(CaptureError::NotOpen)?;
        let image = self
            .pad
            .export_trimmed_image()
            .ok_or(CaptureError::EmptySignature)?;

        let record = pending.sign(Arc::new(image));
        store.append(record.clone());

        self.state = ModalState::Closed;
        self.pad.clear();
        Ok(record)
    }
}
