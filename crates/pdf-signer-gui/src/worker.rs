use pdf_async_runtime::{CommandReceiver, PdfCommand, UpdateSender};

use crate::handlers;
use crate::pdfium::{SharedBackend, pdfium_available, preferred_backend};

/// Async worker task that processes PDF commands and sends updates
pub async fn worker_task(mut command_rx: CommandReceiver, update_tx: UpdateSender) {
    let backend = preferred_backend(pdfium_available());
    log::info!("PDF worker started with {} backend", backend.name());

    while let Some(mut cmd) = command_rx.recv().await {
        // Only the newest queued load matters; the UI has already moved past
        // the older generations and would drop their results anyway
        while let Ok(next_cmd) = command_rx.try_recv() {
            log::debug!(
                "Discarding queued load generation {}, using generation {}",
                cmd.generation().0,
                next_cmd.generation().0
            );
            cmd = next_cmd;
        }

        process_command(cmd, &backend, &update_tx).await;
    }

    log::debug!("PDF worker stopped");
}

async fn process_command(cmd: PdfCommand, backend: &SharedBackend, update_tx: &UpdateSender) {
    match cmd {
        PdfCommand::Open {
            path,
            generation,
            scale,
        } => {
            handlers::loader::handle_open(path, generation, scale, backend, update_tx).await;
        }
        PdfCommand::LoadBytes {
            name,
            bytes,
            generation,
            scale,
        } => {
            handlers::loader::handle_load_bytes(name, bytes, generation, scale, backend, update_tx)
                .await;
        }
    }
}
