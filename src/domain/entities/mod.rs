pub mod execute;
pub mod job;
pub mod landing;
pub mod link;
pub mod pagination;
pub mod process;
