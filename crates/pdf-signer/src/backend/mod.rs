//! PDF backends that live in this crate. The Pdfium backend lives with the
//! GUI because it needs the native library.

mod structural;

pub use structural::StructuralBackend;
