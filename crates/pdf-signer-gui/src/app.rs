use eframe::egui;
use pdf_async_runtime::{CommandSender, PdfCommand, PdfUpdate, UpdateReceiver};
use pdf_signer::{LoadOutcome, SignerError, SignerOptions, SignerSession};
use std::path::PathBuf;

use crate::logger::AppLogger;
use crate::views::{ModalAction, show_empty, show_log_panel, show_page, show_signature_modal};

#[cfg(target_arch = "wasm32")]
use tokio::sync::mpsc;

pub struct PdfSignerApp {
    session: SignerSession,
    options: SignerOptions,
    document_name: Option<String>,
    status: String,
    progress: Option<String>,

    // Async infrastructure
    command_tx: CommandSender,
    update_rx: UpdateReceiver,

    // Composited page, re-uploaded after every committed change
    page_texture: Option<egui::TextureHandle>,

    logger: AppLogger,
    show_log: bool,

    // Files picked through the browser dialog arrive asynchronously
    #[cfg(target_arch = "wasm32")]
    picked_tx: mpsc::UnboundedSender<(String, Vec<u8>)>,
    #[cfg(target_arch = "wasm32")]
    picked_rx: mpsc::UnboundedReceiver<(String, Vec<u8>)>,

    // Runtime handle (native only)
    #[cfg(not(target_arch = "wasm32"))]
    _tokio_handle: tokio::runtime::Handle,
}

impl PdfSignerApp {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        options: SignerOptions,
        logger: AppLogger,
        tokio_handle: tokio::runtime::Handle,
    ) -> Self {
        let ((command_tx, update_rx), (command_rx, update_tx)) = pdf_async_runtime::channels();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            session: SignerSession::new(options.clone()),
            options,
            document_name: None,
            status: String::new(),
            progress: None,
            command_tx,
            update_rx,
            page_texture: None,
            logger,
            show_log: false,
            _tokio_handle: tokio_handle,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(_cc: &eframe::CreationContext<'_>, options: SignerOptions, logger: AppLogger) -> Self {
        let ((command_tx, update_rx), (command_rx, update_tx)) = pdf_async_runtime::channels();
        let (picked_tx, picked_rx) = mpsc::unbounded_channel();

        // Spawn worker task using wasm-bindgen-futures
        wasm_bindgen_futures::spawn_local(crate::worker::worker_task(command_rx, update_tx));

        Self {
            session: SignerSession::new(options.clone()),
            options,
            document_name: None,
            status: String::new(),
            progress: None,
            command_tx,
            update_rx,
            page_texture: None,
            logger,
            show_log: false,
            picked_tx,
            picked_rx,
        }
    }

    fn start_open(&mut self, path: PathBuf) {
        let generation = self.session.begin_load();
        let _ = self.command_tx.send(PdfCommand::Open {
            path,
            generation,
            scale: self.options.render_scale,
        });
        self.status = "Loading PDF...".to_string();
    }

    fn start_load_bytes(&mut self, name: String, bytes: Vec<u8>) {
        let generation = self.session.begin_load();
        let _ = self.command_tx.send(PdfCommand::LoadBytes {
            name,
            bytes,
            generation,
            scale: self.options.render_scale,
        });
        self.status = "Loading PDF...".to_string();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_file()
        {
            self.start_open(path);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn open_dialog(&mut self) {
        let picked_tx = self.picked_tx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(file) = rfd::AsyncFileDialog::new()
                .add_filter("PDF", &["pdf"])
                .pick_file()
                .await
            {
                let bytes = file.read().await;
                let _ = picked_tx.send((file.file_name(), bytes));
            }
        });
    }

    fn close_document(&mut self) {
        self.session.reset();
        self.document_name = None;
        self.page_texture = None;
        self.progress = None;
        self.status = "Closed PDF".to_string();
        log::info!("Session reset");
    }

    /// Run a composite pass and upload the result
    fn refresh_surface(&mut self, ctx: &egui::Context) {
        match self.session.composite() {
            Ok(Some(surface)) => {
                let (width, height) = surface.dimensions();
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [width as usize, height as usize],
                    surface.as_rgba_bytes(),
                );

                if let Some(texture) = &mut self.page_texture {
                    texture.set(color_image, egui::TextureOptions::default());
                } else {
                    self.page_texture = Some(ctx.load_texture(
                        "pdf_page",
                        color_image,
                        egui::TextureOptions::default(),
                    ));
                }
            }
            Ok(None) => self.page_texture = None,
            Err(e) => {
                self.page_texture = None;
                self.status = format!("Error: {e}");
                log::warn!("Composite pass failed: {}", e);
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let is_pdf = |name: &str| name.to_ascii_lowercase().ends_with(".pdf");

            if let Some(path) = file.path {
                if path
                    .extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
                {
                    self.start_open(path);
                }
            } else if let Some(bytes) = file.bytes {
                if is_pdf(&file.name) {
                    self.start_load_bytes(file.name, bytes.to_vec());
                }
            }
        }
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            let current = update.generation() == self.session.current_generation();
            match update {
                PdfUpdate::Progress { operation, .. } => {
                    if current {
                        self.progress = Some(operation);
                        ctx.request_repaint();
                    }
                }
                PdfUpdate::Loaded {
                    generation,
                    name,
                    backend,
                    document,
                } => match self.session.finish_load(generation, Ok(document)) {
                    LoadOutcome::Installed { page_count } => {
                        self.progress = None;
                        self.status = if backend == "structural" {
                            format!(
                                "Loaded {name} ({page_count} pages, page content unavailable without Pdfium)"
                            )
                        } else {
                            format!("Loaded {name} ({page_count} pages)")
                        };
                        self.document_name = Some(name);
                        self.refresh_surface(ctx);
                    }
                    LoadOutcome::Stale => {}
                    LoadOutcome::Failed(e) => self.status = format!("Error: {e}"),
                },
                PdfUpdate::Error {
                    generation,
                    message,
                } => {
                    if let LoadOutcome::Failed(e) = self
                        .session
                        .finish_load(generation, Err(SignerError::Worker(message)))
                    {
                        self.progress = None;
                        self.status = format!("Error: {e}");
                    }
                }
            }
        }
    }

    fn apply_modal_action(&mut self, action: ModalAction, ctx: &egui::Context) {
        match action {
            ModalAction::None => {}
            ModalAction::Save => match self.session.save() {
                Ok(record) => {
                    self.status = format!(
                        "Signature placed at ({:.0}, {:.0})",
                        record.x(),
                        record.y()
                    );
                    self.refresh_surface(ctx);
                }
                Err(e) => self.status = format!("Error: {e}"),
            },
            ModalAction::Cancel => {
                self.session.cancel();
                if self.options.show_pending_placeholder {
                    self.refresh_surface(ctx);
                }
            }
        }
    }
}

impl eframe::App for PdfSignerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        #[cfg(target_arch = "wasm32")]
        while let Ok((name, bytes)) = self.picked_rx.try_recv() {
            self.start_load_bytes(name, bytes);
        }

        // Process all pending updates from worker
        self.process_updates(ctx);
        if self.session.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        let mut open_requested = false;

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("📂 Open PDF...").clicked() {
                    open_requested = true;
                }

                let has_document = self.session.document().is_some();
                if ui
                    .add_enabled(has_document, egui::Button::new("Close PDF"))
                    .clicked()
                {
                    self.close_document();
                }

                if let Some(name) = &self.document_name {
                    ui.separator();
                    ui.label(name);
                    ui.label(format!(
                        "{} signature(s)",
                        self.session.annotations().len()
                    ));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_log, "📜 Log");
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if self.show_log {
                show_log_panel(ui, &self.logger);
                ui.separator();
            }

            ui.horizontal(|ui| {
                if let Some(progress) = &self.progress {
                    ui.spinner();
                    ui.label(progress);
                } else if !self.status.is_empty() {
                    ui.label(&self.status);
                } else if let Some(message) = self.logger.latest_message() {
                    ui.weak(message);
                }
            });
        });

        let page_texture = self.page_texture.clone();
        egui::CentralPanel::default().show(ctx, |ui| match page_texture {
            Some(texture) => {
                if let Some(click) = show_page(ui, &texture) {
                    let pending = self.session.click(click.client, click.surface_origin);
                    log::debug!("Pending placement at ({}, {})", pending.x, pending.y);
                    if self.options.show_pending_placeholder {
                        self.refresh_surface(ctx);
                    }
                }
            }
            None => show_empty(ui, self.session.is_loading(), &mut open_requested),
        });

        if self.session.modal().is_open() {
            let action = show_signature_modal(ctx, self.session.modal_mut());
            self.apply_modal_action(action, ctx);
        }

        if open_requested {
            self.open_dialog();
        }
    }
}
