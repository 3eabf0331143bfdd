pub mod assembler;
pub mod links;
pub mod pagination;
