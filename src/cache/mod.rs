pub mod response_cache;

mod macros;

pub use response_cache::ResponseCache;
