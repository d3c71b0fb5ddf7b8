//! The tools module provides the helpers around the stream driver.
//!
//! The tools are:
//! - options: Stream settings (block size, work factor, staging buffer size, report interval).
//! - logging: Terminal logger setup mapped from a verbosity level.
//!
pub mod logging;
pub mod options;
