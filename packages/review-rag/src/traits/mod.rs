pub mod ai;
pub mod fetcher;
