pub mod api;
pub mod cli;
pub mod codec;
pub mod core;
