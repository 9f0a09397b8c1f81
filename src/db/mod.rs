mod connection;
pub mod helpers;
mod migrations;
pub mod models;
mod repositories;
pub mod store;

pub use connection::Database;
pub use models::{HistoryEntry, NewReading, NewSession, Reading, Session, SessionWithReadings};
pub use store::ReadingStore;
