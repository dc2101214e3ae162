pub mod log_panel;
pub mod page;
pub mod signature_modal;

pub use log_panel::show_log_panel;
pub use page::{PageClick, show_empty, show_page};
pub use signature_modal::{ModalAction, show_signature_modal};
