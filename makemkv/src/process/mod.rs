//! Robot mode decoding.
//!
//! [`record`] splits output lines into typed records, [`translate`] maps
//! info attributes onto report fields and [`builder`] folds records into a
//! [`Report`](crate::structs::report::Report).

pub mod builder;
pub mod record;
pub mod translate;
