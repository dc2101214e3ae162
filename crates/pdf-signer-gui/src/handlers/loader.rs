use pdf_async_runtime::{LoadGeneration, PdfUpdate, UpdateSender};
use pdf_signer::{DocumentHandle, LoadError};
use std::path::PathBuf;

use crate::pdfium::SharedBackend;

/// Read a PDF from disk, then decode it like dropped bytes
#[cfg(not(target_arch = "wasm32"))]
pub async fn handle_open(
    path: PathBuf,
    generation: LoadGeneration,
    scale: f32,
    backend: &SharedBackend,
    update_tx: &UpdateSender,
) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let _ = update_tx.send(PdfUpdate::Progress {
        generation,
        operation: format!("Reading {name}..."),
    });

    match tokio::fs::read(&path).await {
        Ok(bytes) => handle_load_bytes(name, bytes, generation, scale, backend, update_tx).await,
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                generation,
                message: format!("Failed to read {}: {}", path.display(), LoadError::from(e)),
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn handle_open(
    path: PathBuf,
    generation: LoadGeneration,
    _scale: f32,
    _backend: &SharedBackend,
    update_tx: &UpdateSender,
) {
    let _ = update_tx.send(PdfUpdate::Error {
        generation,
        message: format!("Cannot open {} from the browser sandbox", path.display()),
    });
}

pub async fn handle_load_bytes(
    name: String,
    bytes: Vec<u8>,
    generation: LoadGeneration,
    scale: f32,
    backend: &SharedBackend,
    update_tx: &UpdateSender,
) {
    let _ = update_tx.send(PdfUpdate::Progress {
        generation,
        operation: format!("Decoding {name} ({} bytes)...", bytes.len()),
    });

    match decode(bytes, scale, backend).await {
        Ok(document) => {
            log::info!(
                "Decoded {} with {} backend ({} pages)",
                name,
                backend.name(),
                document.page_count()
            );
            let _ = update_tx.send(PdfUpdate::Loaded {
                generation,
                name,
                backend: backend.name(),
                document,
            });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                generation,
                message: format!("Failed to load {name}: {e}"),
            });
        }
    }
}

/// Decoding is CPU-bound, keep it off the async worker
#[cfg(not(target_arch = "wasm32"))]
async fn decode(
    bytes: Vec<u8>,
    scale: f32,
    backend: &SharedBackend,
) -> Result<DocumentHandle, LoadError> {
    let backend = backend.clone();
    tokio::task::spawn_blocking(move || backend.load(&bytes, scale)).await?
}

#[cfg(target_arch = "wasm32")]
async fn decode(
    bytes: Vec<u8>,
    scale: f32,
    backend: &SharedBackend,
) -> Result<DocumentHandle, LoadError> {
    backend.load(&bytes, scale)
}
