pub mod file_reader;
pub mod logger;
pub mod time;
