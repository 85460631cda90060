pub mod export;
pub mod ingest;
pub mod paths;
pub mod years;

pub use export::export;
pub use ingest::ingest;
pub use paths::paths;
pub use years::years;
