pub mod bus;

pub use bus::{AppEvent, EventBus};
