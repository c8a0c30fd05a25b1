mod config;
mod fetcher;
mod source;

pub use config::*;
pub use fetcher::*;
pub use source::*;
