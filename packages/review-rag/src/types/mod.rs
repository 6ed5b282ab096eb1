pub mod config;
pub mod page;
pub mod request;
pub mod review;
