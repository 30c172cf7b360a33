//! Source adapter implementations.
//!
//! Each module provides a struct implementing [`crate::adapter::SourceAdapter`]
//! for one content source: HTML search engines, JSON APIs, RSS feeds, and
//! the synthesizing fallback desk.

pub mod bing;
pub mod curated;
pub mod duckduckgo;
pub mod hackernews;
pub mod india_feeds;
pub mod reddit;
pub mod wikipedia;

pub use bing::BingAdapter;
pub use curated::CuratedAdapter;
pub use duckduckgo::DuckDuckGoAdapter;
pub use hackernews::HackerNewsAdapter;
pub use india_feeds::IndiaFeedsAdapter;
pub use reddit::RedditAdapter;
pub use wikipedia::WikipediaAdapter;
