pub mod catalog;
pub mod memory;
