//! State module for tracking access timing
//!
//! # Components
//!
//! - `AccessState`: when a resolved host policy was last used, for crawl-delay throttling

mod access_state;

pub use access_state::AccessState;
