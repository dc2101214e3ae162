pub mod backend;
mod composite;
mod document;
mod modal;
mod options;
mod pad;
mod placement;
mod session;
mod store;
mod surface;
mod types;

pub use backend::StructuralBackend;
pub use composite::{composite, composite_into};
pub use document::{DocumentHandle, FIRST_PAGE, PageRaster, PdfBackend, render_page};
pub use modal::{ModalState, SignatureModal};
pub use options::*;
pub use pad::SignaturePad;
pub use placement::{PendingPlacement, PlacementController, PlacementRecord};
pub use session::{LoadGeneration, LoadOutcome, SignerSession};
pub use store::AnnotationStore;
pub use surface::Surface;
pub use types::*;
