//! @ai:module:intent Retention series definitions
//! @ai:module:layer domain
//! @ai:module:public_api Period, Series, Benchmark

pub mod period;

pub use period::{Benchmark, Period, Series};
