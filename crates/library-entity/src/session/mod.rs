//! Session entities.

pub mod flash;
pub mod model;

pub use flash::{FlashLevel, FlashMessage};
pub use model::Session;
