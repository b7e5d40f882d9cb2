//! Trawl: type-directed deep walking.
//!
//! A filter looks only at types and fields. From its answers, a [`Walker`]
//! is compiled once per type and cached; walking a value then visits
//! exactly the selected nodes without asking the filter again.
//!
//! # Example
//!
//! ```
//! use trawl::Reflect;
//!
//! #[derive(Reflect)]
//! pub struct Page {
//!     pub title: String,
//!     pub tags: Vec<String>,
//!     pub views: u64,
//! }
//!
//! let page = Page {
//!     title: "home".into(),
//!     tags: vec!["intro".into(), String::new()],
//!     views: 3,
//! };
//!
//! let mut strings: Vec<String> = Vec::new();
//! trawl::trawl(&page, &mut strings).expect("type filters are valid");
//! assert_eq!(strings, ["home", "intro"]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate self as trawl;

mod decision;
mod error;
pub mod filter;
mod invariants;
mod visitor;
mod walk;
mod walker;

#[cfg(test)]
mod test_utils;

pub use trawl_core::*;
#[doc(hidden)]
pub use trawl_core::reflect_boilerplate;
pub use trawl_derive::Reflect;

pub use decision::Decision;
pub use error::{Error, Result};
pub use filter::{Filter, FilterRef};
pub use visitor::{Appender, Visitor, VisitorFn, VisitorMut, VisitorMutFn};
pub use walk::{get_walker, trawl, trawl_with, walk, walk_fn, walk_mut, walk_ptr, walk_ptr_fn};
pub use walker::{DynamicWalker, FieldWalker, Walker, WalkerCache};
