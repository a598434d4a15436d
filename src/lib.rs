//! Character frequency counting for text files.
//!
//! [`FrequencyTable`] records every character of a stream in the order it
//! first appears; [`driver::run`] wires it to an input file, an output report
//! and the console.

pub mod config;
pub mod driver;
pub mod error;
pub mod frequency;

pub use config::Config;
pub use error::Error;
pub use frequency::{FrequencyEntry, FrequencyTable};
