pub mod state;

pub use state::SessionState;
