mod client_sink;
mod connection_hub;

pub use client_sink::*;
pub use connection_hub::*;
