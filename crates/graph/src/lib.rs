//! # Intent Graph
//!
//! Dependency-parse model of a single request and reachability over its head links.
//!
//! ## Architecture
//!
//! ```text
//! annotateText response
//!     │
//!     ├──> ParsedDocument
//!     │      ├─ Tokens: text, DependencyLabel, head index (validated in range)
//!     │      └─ Entities: recognized names
//!     │
//!     └──> Reachability
//!            ├─ Walk head links from a token
//!            ├─ Stop on the target (reached) or a revisited index (cycle)
//!            └─ Dependents of a subject token, in document order
//! ```

mod error;
mod graph;
mod label;
mod types;

pub use error::{GraphError, Result};
pub use graph::eventually_points_to;
pub use label::DependencyLabel;
pub use types::{Entity, ParsedDocument, Token};
