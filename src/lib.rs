//! templog - leveled logger that spools into a temporary file
//!
//! A [`Logger`] appends `<timestamp> ][<LEVEL>] <message>` lines to a single
//! backing file. Without an explicit destination the file lives in a temp
//! directory and is removed when the logger is dropped, unless it was saved
//! with [`Logger::save_to`].
//!
//! ```rust,no_run
//! use templog::{Level, Logger};
//!
//! # fn main() -> templog::Result<()> {
//! let logger = Logger::new();
//! logger.info("build started")?;
//! logger.log(Level::Warning, "cache miss")?;
//! logger.save_to("/var/log/build.log")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod level;
pub mod logger;
pub mod message;
pub mod options;
pub mod temp_location;

pub use error::{LogError, Result};
pub use level::Level;
pub use logger::{Logger, EOL};
pub use message::{interpolate, Context, Message};
pub use options::Options;
pub use temp_location::TempLocation;
