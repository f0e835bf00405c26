//! Deferred sequence queries and the stable multi-key ordering engine.
//!
//! Data flow for an ordered query:
//! source → single partition → one sorter per `order_by`/`then_by` level →
//! flattening → output.

mod enumerator;
mod flatten;
mod ordered;
mod partition;
mod source;


pub use enumerator::Enumerator;
pub use flatten::{Flatten, flatten, flatten_to_vec};
pub use ordered::{Iter, OrderedEnumerator};
pub use partition::{Partition, Partitions};
pub use source::{BoxIter, Source};
