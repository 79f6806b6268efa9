//! Configuration of a single generation run

use hoog_format::FormatterChoice;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::location::Location;

/// File name used when none is configured
pub const DEFAULT_FILE_NAME: &str = "generated.go";

/// Everything a generation run needs to know up front
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Package directory and interface name to hook
    pub source: Location,
    /// Package directory and hook type name to generate
    pub destination: Location,
    /// Guard the hook's list with a mutex
    pub thread_safe: bool,
    /// How the rendered source is formatted before it is written
    pub formatter: FormatterChoice,
    /// Name of the generated file inside the destination directory
    pub file_name: String,
}

impl GenerationConfig {
    pub fn new(source: Location, destination: Location) -> Self {
        Self {
            source,
            destination,
            thread_safe: false,
            formatter: FormatterChoice::default(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    pub fn with_thread_safe(mut self, thread_safe: bool) -> Self {
        self.thread_safe = thread_safe;
        self
    }

    pub fn with_formatter(mut self, formatter: FormatterChoice) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Check the locations before any package is loaded
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.is_empty() {
            return Err(ConfigError::EmptySource);
        }
        if self.destination.is_empty() {
            return Err(ConfigError::EmptyDestination);
        }
        if self.source.object().is_empty() {
            return Err(ConfigError::MissingSourceObject(self.source.to_string()));
        }
        Ok(())
    }
}
