pub mod error;
pub mod relay_message;
pub mod wire;
