pub mod colors;
pub mod command;
pub mod environment;
