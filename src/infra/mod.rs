pub mod http;
pub mod shooter;
