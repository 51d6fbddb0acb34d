//! Command handlers module.
//!
//! - `load.rs`: load a casebase and print it
//! - `formats.rs`: list the parser registries

mod formats;
mod load;

pub use formats::cmd_formats;
pub use load::{LoadOptions, OutputFormat, cmd_load};
