//! ## Crate layout
//! - `core`: enumerators, the ordering engine, containers, dynamic values,
//!   config, and observability.
//!
//! The `prelude` module carries the query vocabulary most callers need.

pub use ordo_core as core;

/// re-exports
///
/// lets callers derive serde traits on their own element types without
/// adding serde to their Cargo.toml
pub mod __reexports {
    pub use serde;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::error::{Error, ErrorKind};

/// Start a deferred query over `items`.
pub fn enumerate<T, I>(items: I) -> core::enumerable::Enumerator<T>
where
    T: Clone + 'static,
    I: IntoIterator<Item = T>,
{
    items.into_iter().collect()
}

/// Start a query over a dynamically shaped list or map.
pub fn query(value: core::value::Value) -> Result<core::value::ValueQuery, Error> {
    core::value::ValueQuery::from_value(value)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::{enumerate, query};
    pub use serde::{Deserialize, Serialize};
}
