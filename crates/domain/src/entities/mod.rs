//! Domain entities - Records produced while handling requests

mod log_record;

pub use log_record::LogRecord;
