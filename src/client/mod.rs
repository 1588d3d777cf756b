pub mod collector;
pub mod db;
pub mod export;
pub mod pipeline;
pub mod recorder;
pub mod settings;
