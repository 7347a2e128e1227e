pub mod client;
pub mod components;
pub mod device;
