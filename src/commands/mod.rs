pub mod install;
pub mod profile;
