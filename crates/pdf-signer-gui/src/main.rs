#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use pdf_signer::SignerOptions;

mod app;
mod handlers;
mod logger;
mod pdfium;
mod views;
mod worker;

use logger::AppLogger;

/// Optional settings file, looked up in the working directory
#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "pdf-signer.json";

const MAX_LOG_ENTRIES: usize = 500;

fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn load_options(path: &std::path::Path) -> SignerOptions {
    if !path.exists() {
        return SignerOptions::default();
    }
    match SignerOptions::load(path).await {
        Ok(options) => {
            log::info!("Loaded settings from {}", path.display());
            options
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            SignerOptions::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    let logger = AppLogger::new(MAX_LOG_ENTRIES, log_level());
    logger.clone().init()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let options = runtime.block_on(load_options(std::path::Path::new(SETTINGS_FILE)));
    let tokio_handle = runtime.handle().clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("PDF Signer"),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Signer",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(app::PdfSignerApp::new(
                cc,
                options,
                logger,
                tokio_handle,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run PDF Signer: {e}"))
}

// WASM entry point
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();

    let logger = AppLogger::new(MAX_LOG_ENTRIES, log_level());
    logger
        .clone()
        .init()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let canvas = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("pdf_signer_canvas"))
        .ok_or_else(|| JsValue::from_str("Missing #pdf_signer_canvas element"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    let web_options = eframe::WebOptions::default();
    eframe::WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(move |cc| {
                Ok(Box::new(app::PdfSignerApp::new(
                    cc,
                    SignerOptions::default(),
                    logger,
                )))
            }),
        )
        .await
}
