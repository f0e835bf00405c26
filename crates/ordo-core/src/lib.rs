//! Core runtime for Ordo: deferred enumerators, the stable multi-key
//! ordering engine, containers, and the dynamic `Value` query surface.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod collection;
pub mod comparer;
pub mod config;
pub mod enumerable;
pub mod error;
pub mod obs;
pub mod value;

///
/// Prelude
///
/// Prelude contains only query vocabulary.
/// No metrics, config, or engine internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        collection::{Dictionary, KeyValuePair, List},
        comparer::{Comparer, EqualityComparer},
        enumerable::{Enumerator, OrderedEnumerator},
        value::{FieldKey, OrderDirection, Value, ValueQuery},
    };
}
