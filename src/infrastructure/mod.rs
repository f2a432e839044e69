pub mod ingest;
pub mod rendering;
pub mod services;

pub use ingest::parse_records_json;
