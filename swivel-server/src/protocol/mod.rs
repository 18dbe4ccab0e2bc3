mod conn_state;
mod relay_handler;

pub use conn_state::*;
pub use relay_handler::*;
