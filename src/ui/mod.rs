//! UI tree helpers.
//!
//! Builders for the element tree the client renders, and the modal
//! envelope every report response is wrapped in.

pub mod modal;
pub mod node;

pub use modal::{create_ui, ModalOptions, DEFAULT_MODAL_SIZE};
pub use node::*;
