//! # Asterism Router
//!
//! Path normalization and route pattern matching for the Asterism
//! navigation engine.
//!
//! Route patterns support:
//! - Static segments (`/about`)
//! - Named parameters (`/users/:id`)
//! - A single trailing wildcard (`/files/*`)
//!
//! ## Path Normalization
//!
//! Both the pattern and the incoming URL are normalized before segment
//! comparison, so `/about`, `/about/`, `/about.html` and `/about/index.html`
//! all resolve to the same matching target. This symmetry is what makes
//! matching meaningful: a route author never has to anticipate which
//! spelling of a URL the browser hands over.
//!
//! ## Example
//!
//! ```
//! use asterism_router::{match_path, normalize};
//!
//! assert_eq!(normalize("/docs/index.html"), "/docs");
//!
//! let params = match_path("/users/:id", "/users/42").unwrap();
//! assert_eq!(params.get("id"), Some(&"42".to_string()));
//! ```

mod matcher;
mod path;

pub use matcher::{match_path, WILDCARD_KEY};
pub use path::{is_normalized, normalize};
