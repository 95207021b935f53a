pub mod journal;
pub mod pg;

pub use journal::{JournalError, RateJournal};
pub use pg::PgRateJournal;
