use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Pdfium release matching the `pdfium_7543` feature of pdfium-render
const PDFIUM_RELEASE: &str = "chromium/7543";

/// Prebuilt Pdfium archive naming for one target
struct PdfiumTarget {
    platform: &'static str,
    arch: &'static str,
    lib_name: &'static str,
}

impl PdfiumTarget {
    fn from_triple(target: &str) -> Option<Self> {
        let arm = target.contains("aarch64");
        if target.contains("apple") {
            Some(Self {
                platform: "mac",
                arch: if arm { "arm64" } else { "x64" },
                lib_name: "libpdfium.dylib",
            })
        } else if target.contains("linux") {
            Some(Self {
                platform: "linux",
                arch: if arm { "arm64" } else { "x64" },
                lib_name: "libpdfium.so",
            })
        } else if target.contains("windows") {
            let arch = if arm {
                "arm64"
            } else if target.contains("i686") {
                "x86"
            } else {
                "x64"
            };
            Some(Self {
                platform: "win",
                arch,
                lib_name: "pdfium.dll",
            })
        } else {
            None
        }
    }

    fn download_url(&self) -> String {
        format!(
            "https://github.com/bblanchon/pdfium-binaries/releases/download/{}/pdfium-{}-{}.tgz",
            PDFIUM_RELEASE, self.platform, self.arch
        )
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("wasm32") || env::var("CARGO_FEATURE_PDF_VIEWER").is_err() {
        return;
    }

    // Offline builds fall back to a system Pdfium at runtime
    if env::var_os("PDF_SIGNER_SKIP_PDFIUM_DOWNLOAD").is_some() {
        println!("cargo:warning=Skipping PDFium download");
        return;
    }

    let Some(pdfium) = PdfiumTarget::from_triple(&target) else {
        println!("cargo:warning=Unsupported target platform: {}", target);
        return;
    };

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let Some(workspace_root) = manifest_dir.parent().and_then(|p| p.parent()) else {
        println!("cargo:warning=Failed to find workspace root");
        return;
    };
    let pdfium_dir = workspace_root.join("vendor").join("pdfium");
    let lib_dir = pdfium_dir.join("lib");
    let lib_path = lib_dir.join(pdfium.lib_name);

    if !lib_path.exists() {
        if let Err(e) = install(&pdfium, &pdfium_dir, &lib_path) {
            // The app still runs against the structural backend
            println!("cargo:warning=PDFium install failed: {}", e);
            return;
        }
    }

    fix_library_install_name(&lib_path, pdfium.platform);
    configure_linking(&target, &lib_dir);
}

fn install(pdfium: &PdfiumTarget, pdfium_dir: &Path, lib_path: &Path) -> Result<(), String> {
    let url = pdfium.download_url();
    println!(
        "cargo:warning=Downloading PDFium {} for {}-{}",
        PDFIUM_RELEASE, pdfium.platform, pdfium.arch
    );

    fs::create_dir_all(pdfium_dir).map_err(|e| e.to_string())?;
    let temp_file = env::temp_dir().join("pdf-signer-pdfium.tgz");

    download_file(&url, &temp_file)?;
    let extracted = extract_tarball(&temp_file, pdfium_dir);
    let _ = fs::remove_file(&temp_file);
    extracted?;

    if !lib_path.exists() {
        return Err(format!("{} not found after extraction", lib_path.display()));
    }
    println!(
        "cargo:warning=PDFium installed to {}",
        pdfium_dir.display()
    );
    Ok(())
}

fn configure_linking(target: &str, lib_dir: &Path) {
    println!("cargo:rustc-link-search=native={}", lib_dir.display());

    // Let the binary find the vendored library without installing it
    if target.contains("apple") || target.contains("linux") {
        println!("cargo:rustc-link-arg=-Wl,-rpath,{}", lib_dir.display());
    }

    println!("cargo:rerun-if-changed={}", lib_dir.display());
}

fn download_file(url: &str, dest: &Path) -> Result<(), String> {
    use std::io::Write;

    let response = ureq::get(url)
        .call()
        .map_err(|e| format!("Failed to download {}: {}", url, e))?;

    let mut file = fs::File::create(dest).map_err(|e| e.to_string())?;
    std::io::copy(&mut response.into_reader(), &mut file).map_err(|e| e.to_string())?;
    file.flush().map_err(|e| e.to_string())
}

fn extract_tarball(tarball: &Path, dest: &Path) -> Result<(), String> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let tar_gz = fs::File::open(tarball).map_err(|e| e.to_string())?;
    Archive::new(GzDecoder::new(tar_gz))
        .unpack(dest)
        .map_err(|e| format!("Failed to extract {}: {}", tarball.display(), e))
}

fn fix_library_install_name(lib_path: &Path, platform: &str) {
    if platform != "mac" {
        return;
    }

    let output = std::process::Command::new("install_name_tool")
        .arg("-id")
        .arg("@rpath/libpdfium.dylib")
        .arg(lib_path)
        .output();

    match output {
        Ok(result) if result.status.success() => {}
        Ok(result) => {
            println!(
                "cargo:warning=Failed to fix install name: {}",
                String::from_utf8_lossy(&result.stderr)
            );
        }
        Err(e) => {
            println!("cargo:warning=install_name_tool not available: {}", e);
        }
    }
}
