pub mod file_logger;

pub use file_logger::setup_logging;
