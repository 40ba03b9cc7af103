//! Data module - tabular rows, file loading, profiling and cleaning

pub mod clean;
pub mod loader;
pub mod profile;
pub mod table;
pub mod writer;

pub use clean::*;
pub use loader::*;
pub use profile::*;
pub use table::*;
pub use writer::*;
