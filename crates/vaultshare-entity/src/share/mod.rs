//! Share aggregate entities.

pub mod blob;
pub mod model;
pub mod recipient;
pub mod status;

pub use model::{CreateShareEntry, ShareEntry};
pub use recipient::Recipient;
pub use status::{AccessMode, RecipientRole, RecipientStatus, ShareStatus};
