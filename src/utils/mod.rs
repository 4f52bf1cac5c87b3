pub mod debounce;
pub mod generation;
pub mod logger;

pub use debounce::Debouncer;
pub use generation::Generation;
pub use logger::init_logging;
