pub mod history;
pub mod reading;
pub mod session;

pub use history::{merge_history, EntryKind, HistoryEntry};
pub use reading::{validation, Average, BpValues, NewReading, RawReading, Reading};
pub use session::{NewSession, Session, SessionWithReadings};
