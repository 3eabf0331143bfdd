pub mod ids;
pub mod request_urls;
