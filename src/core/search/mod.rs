//! Search module
//!
//! The public search/fetch contract, independent of which backend
//! answers it.

mod service;

pub use service::SearchService;
