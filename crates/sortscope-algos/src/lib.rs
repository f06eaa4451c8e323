#![forbid(unsafe_code)]

//! Non-visual reference sorts.
//!
//! These are the plain, eager counterparts of the visualized engines: pure
//! functions from a finite sequence to a new ascending sequence. The step
//! engines in `sortscope-core` must reproduce their results exactly, so the
//! test suites cross-check against these where the algorithms overlap.

pub mod bucket;
pub mod counting;
pub mod insertion;
pub mod radix;

pub use bucket::bucket_sort;
pub use counting::counting_sort;
pub use insertion::insertion_sort;
pub use radix::{radix_sort_lsd, sort_records_by_key};
