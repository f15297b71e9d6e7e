pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod pipeline;
pub mod table;
