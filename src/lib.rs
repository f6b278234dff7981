pub mod catalog;
pub mod download;
pub mod extract;
pub mod fallback;
pub mod http;
pub mod input;
pub mod mirror;
pub mod models;
pub mod output;
pub mod storage;

pub use models::*;
