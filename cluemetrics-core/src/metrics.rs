mod reduce;
mod word_exact;

pub use reduce::*;
pub use word_exact::*;
