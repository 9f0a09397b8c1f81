pub mod aggregator;
pub mod controller;
pub mod draft;

pub use aggregator::{accepted_readings, save_session, SessionMeta};
pub use controller::{BpTracker, Overview};
pub use draft::{DraftRow, DraftStatus, SessionDraft};
