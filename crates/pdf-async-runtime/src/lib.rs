use std::path::PathBuf;
use tokio::sync::mpsc;

// Re-export types from library crates
pub use pdf_signer::{DocumentHandle, LoadGeneration};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PdfCommand {
    /// Read a PDF from disk and decode it
    Open {
        path: PathBuf,
        generation: LoadGeneration,
        scale: f32,
    },
    /// Decode PDF bytes already in memory (dropped files, web uploads)
    LoadBytes {
        name: String,
        bytes: Vec<u8>,
        generation: LoadGeneration,
        scale: f32,
    },
}

impl PdfCommand {
    pub fn generation(&self) -> LoadGeneration {
        match self {
            PdfCommand::Open { generation, .. } | PdfCommand::LoadBytes { generation, .. } => {
                *generation
            }
        }
    }
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Progress {
        generation: LoadGeneration,
        operation: String,
    },
    Loaded {
        generation: LoadGeneration,
        name: String,
        backend: &'static str,
        document: DocumentHandle,
    },
    Error {
        generation: LoadGeneration,
        message: String,
    },
}

impl PdfUpdate {
    pub fn generation(&self) -> LoadGeneration {
        match self {
            PdfUpdate::Progress { generation, .. }
            | PdfUpdate::Loaded { generation, .. }
            | PdfUpdate::Error { generation, .. } => *generation,
        }
    }
}

pub type CommandSender = mpsc::UnboundedSender<PdfCommand>;
pub type CommandReceiver = mpsc::UnboundedReceiver<PdfCommand>;
pub type UpdateSender = mpsc::UnboundedSender<PdfUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<PdfUpdate>;

/// Create the UI-side and worker-side channel ends
pub fn channels() -> ((CommandSender, UpdateReceiver), (CommandReceiver, UpdateSender)) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    ((command_tx, update_rx), (command_rx, update_tx))
}
