//! Statistics engine - pure Six Sigma calculations over in-memory data

pub mod categorical;
pub mod control;
pub mod correlation;
pub mod distribution;
pub mod error;
pub mod metrics;

pub use categorical::*;
pub use control::*;
pub use correlation::*;
pub use distribution::*;
pub use error::*;
pub use metrics::*;
