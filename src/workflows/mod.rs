pub mod fetcher;
pub mod pipeline;
pub mod walker;
