pub mod command;
pub mod files;
pub mod interrupt;
pub mod privilege;

pub use command::*;
