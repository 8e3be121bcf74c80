//! Request intent classification over a parsed document.
//!
//! A [`HandlerChain`] holds [`IntentHandler`]s in priority order. Search handlers claim a
//! document when it mentions their subject entity and turn the descriptive words hanging off
//! that subject into a search phrase; the fallback handler reports `UNKNOWN`.

mod chain;
mod config;
mod error;
mod handler;

pub use chain::HandlerChain;
pub use error::{ClassifyError, Result};
pub use handler::{extract_search_query, IntentHandler, ORDER_SEARCH, PRODUCT_SEARCH};
