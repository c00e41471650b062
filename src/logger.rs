//! File-backed leveled logger
//!
//! Lines are appended to a single backing file. Without an explicit
//! destination the file is created lazily in a temp location on the first
//! write, and deleted again when the logger goes away unless it was saved
//! with [`Logger::save_to`] first.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;

use crate::error::{LogError, Result};
use crate::level::Level;
use crate::message::{interpolate, Context, Message};
use crate::options::Options;
use crate::temp_location::TempLocation;

/// Line terminator written after every entry
#[cfg(windows)]
pub const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub const EOL: &str = "\n";

#[derive(Debug)]
struct State {
    /// File currently receiving appended lines
    path: Option<PathBuf>,
    /// Set once the file belongs to the caller; never cleared
    persisted: bool,
    options: Options,
}

/// Leveled logger writing to one backing file
#[derive(Debug)]
pub struct Logger {
    state: Mutex<State>,
    temp_location: TempLocation,
}

impl Logger {
    /// Create a logger that spools into the platform temp directory
    pub fn new() -> Self {
        Self::with_temp_location(TempLocation::system())
    }

    /// Create a logger that spools into the given temp location
    pub fn with_temp_location(temp_location: TempLocation) -> Self {
        Self {
            state: Mutex::new(State {
                path: None,
                persisted: false,
                options: Options::default(),
            }),
            temp_location,
        }
    }

    /// Create a logger writing straight to `path`
    ///
    /// The path is treated as final: it is never moved by `save_to` nor
    /// deleted on teardown. Fails if the file cannot be opened for appending.
    pub fn to_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(LogError::InvalidDestination {
                path: path.to_path_buf(),
                reason: "empty path".to_string(),
            });
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LogError::InvalidDestination {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let logger = Self::new();
        {
            let mut state = logger.lock();
            state.path = Some(path.to_path_buf());
            state.persisted = true;
        }
        Ok(logger)
    }

    /// Create a logger with an optional destination
    ///
    /// `None` or an empty path gives a temp-spooled logger, anything else
    /// goes through [`Logger::to_file`].
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::to_file(path),
            _ => Ok(Self::new()),
        }
    }

    /// Replace all options
    pub fn with_options(mut self, options: Options) -> Self {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .options = options;
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the backing file path, creating the temp file if needed
    fn ensure_file(&self, state: &mut State) -> Result<PathBuf> {
        if let Some(path) = &state.path {
            return Ok(path.clone());
        }

        let path = self.temp_location.create_file()?;
        // Assign before announcing so nothing observes a half-created state
        state.path = Some(path.clone());
        tracing::info!(path = %path.display(), "Created temporary log file");
        Ok(path)
    }

    /// Append `text` in a single write while holding the state lock
    fn append(&self, state: &mut State, text: &str) -> Result<()> {
        let path = self.ensure_file(state)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LogError::filesystem("open", &path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| LogError::filesystem("append to", &path, e))
    }

    /// Log a message at the given level
    ///
    /// Unknown level names given as strings are logged as `INFO`.
    pub fn log(&self, level: impl Into<Level>, message: impl Into<Message>) -> Result<()> {
        self.log_with_context(level, message, &Context::new())
    }

    /// Log a message with placeholder context
    ///
    /// The context only has an effect when the `interpolateContext` option
    /// is enabled, and then only on text messages.
    pub fn log_with_context(
        &self,
        level: impl Into<Level>,
        message: impl Into<Message>,
        context: &Context,
    ) -> Result<()> {
        let level = level.into();
        let message = message.into();

        let mut state = self.lock();
        let text = match &message {
            Message::Text(text) if state.options.interpolate_context() => {
                interpolate(text, context)
            }
            _ => message.render().into_owned(),
        };
        let line = format!(
            "{} ][{}] {}{}",
            state.options.format_timestamp(&Local::now())?,
            level.as_str(),
            text,
            EOL
        );
        self.append(&mut state, &line)
    }

    pub fn emergency(&self, message: impl Into<Message>) -> Result<()> {
        self.log(Level::Emergency, message)
    }

    pub fn alert(&self, message: impl Into<Message>) -> Result<()> {
        self.log(Level::Alert, message)
    }

    pub fn critical(&self, message: impl Into<Message>) -> Result<()> {
        self.log(Level::Critical, message)
    }

    pub fn error(&self, message: impl Into<Message>) -> Result<()> {
        self.log(Level::Error, message)
    }

    pub fn warning(&self, message: impl Into<Message>) -> Result<()> {
        self.log(Level::Warning, message)
    }

    pub fn notice(&self, message: impl Into<Message>) -> Result<()> {
        self.log(Level::Notice, message)
    }

    pub fn info(&self, message: impl Into<Message>) -> Result<()> {
        self.log(Level::Info, message)
    }

    pub fn debug(&self, message: impl Into<Message>) -> Result<()> {
        self.log(Level::Debug, message)
    }

    /// Append `count` empty lines
    pub fn nl(&self, count: usize) -> Result<()> {
        let mut state = self.lock();
        self.append(&mut state, &EOL.repeat(count))
    }

    /// Append `contents` on its own line, without timestamp or level
    pub fn raw_str(&self, contents: &str) -> Result<()> {
        let mut state = self.lock();
        self.append(&mut state, &format!("{EOL}{contents}{EOL}"))
    }

    /// Read the whole log, or `None` if nothing has been written yet
    pub fn contents(&self) -> Result<Option<String>> {
        let state = self.lock();
        match &state.path {
            Some(path) => fs::read_to_string(path)
                .map(Some)
                .map_err(|e| LogError::filesystem("read", path, e)),
            None => Ok(None),
        }
    }

    /// Move the log to `destination`
    ///
    /// Allowed once. Returns `Ok(false)` and leaves the logger untouched if
    /// the rename fails, so a different destination can be tried.
    pub fn save_to(&self, destination: impl AsRef<Path>) -> Result<bool> {
        let destination = destination.as_ref();
        let mut state = self.lock();
        if state.persisted {
            return Err(LogError::AlreadyPersisted);
        }

        let source = self.ensure_file(&mut state)?;
        match fs::rename(&source, destination) {
            Ok(()) => {
                state.path = Some(destination.to_path_buf());
                state.persisted = true;
                tracing::info!(
                    from = %source.display(),
                    to = %destination.display(),
                    "Saved log file"
                );
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(
                    from = %source.display(),
                    to = %destination.display(),
                    error = %e,
                    "Failed to save log file"
                );
                Ok(false)
            }
        }
    }

    /// Set a single option
    pub fn set_option(&self, key: &str, value: impl Into<String>) -> Result<()> {
        self.lock().options.set(key, value)
    }

    /// Snapshot of the current options
    pub fn options(&self) -> Options {
        self.lock().options.clone()
    }

    /// Path of the backing file, if one exists
    pub fn path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    /// Whether the backing file belongs to the caller
    pub fn is_persisted(&self) -> bool {
        self.lock().persisted
    }

    /// Tear the logger down, reporting cleanup failures
    ///
    /// Deletes the backing file unless it was persisted. Dropping the logger
    /// does the same but can only report failures through `tracing`.
    pub fn close(self) -> Result<()> {
        self.remove_unpersisted()
    }

    fn remove_unpersisted(&self) -> Result<()> {
        let mut state = self.lock();
        if state.persisted {
            return Ok(());
        }
        let Some(path) = state.path.take() else {
            return Ok(());
        };

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed temporary log file");
                Ok(())
            }
            // Already gone
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LogError::filesystem("remove", path, e)),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.remove_unpersisted() {
            tracing::warn!(error = %e, "Failed to remove temporary log file");
        }
    }
}
