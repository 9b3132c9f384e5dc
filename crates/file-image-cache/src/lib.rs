//! File-based image cache keyed by HTTP status code
//!
//! Stores one image file per status code, flat inside a cache root
//! directory. The filesystem is the sole source of truth: there is no
//! in-memory index, no TTL, and no eviction.

mod cache;

pub use cache::ImageCache;
