//! Containers that produce and consume deferred queries.

mod dictionary;
mod list;

pub use dictionary::{Dictionary, KeyValuePair};
pub use list::List;
