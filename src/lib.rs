pub mod catalog;
pub mod cli;
pub mod plan;
pub mod profile;
