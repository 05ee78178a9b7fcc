//! Mathematical building blocks.
//!
//! - `statistics`: Streaming mean/variance accumulators that merge across workers

pub mod statistics;
