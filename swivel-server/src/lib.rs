pub mod hub;
pub mod listener;
pub mod protocol;
pub mod registry;

pub use hub::*;
pub use listener::*;
pub use protocol::*;
pub use registry::*;
