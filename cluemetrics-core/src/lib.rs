pub mod error;
pub mod fetch;
pub mod metrics;

pub use metrics::*;
