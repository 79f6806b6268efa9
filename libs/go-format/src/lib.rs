//! Go source formatting.
//! Generated code is handed to one of the standard Go pretty-printers:
//! - `gofmt` normalizes layout only.
//! - `goimports` additionally fixes the import block.
//! - `noop` passes bytes through untouched.
//!
//! The external tools are run as child processes reading the source from
//! stdin; a non-zero exit means the source did not parse.

use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::thread;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{tool}: failed to start: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool}: {stderr}")]
    Failed { tool: &'static str, stderr: String },
    #[error("{tool}: IO error: {source}")]
    Io {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown formatter '{0}' (expected gofmt, goimports or noop)")]
    UnknownFormatter(String),
}

/// A pure transformation from raw Go source to formatted Go source
pub trait Formatter {
    fn format(&self, src: &[u8]) -> Result<Vec<u8>, FormatError>;
}

/// Which formatter a generation run uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterChoice {
    #[default]
    Gofmt,
    Goimports,
    Noop,
}

impl FormatterChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            FormatterChoice::Gofmt => "gofmt",
            FormatterChoice::Goimports => "goimports",
            FormatterChoice::Noop => "noop",
        }
    }
}

impl fmt::Display for FormatterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatterChoice {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gofmt" => Ok(FormatterChoice::Gofmt),
            "goimports" => Ok(FormatterChoice::Goimports),
            "noop" => Ok(FormatterChoice::Noop),
            other => Err(FormatError::UnknownFormatter(other.to_string())),
        }
    }
}

/// Select the formatter implementation for a choice
pub fn formatter_for(choice: FormatterChoice) -> Box<dyn Formatter> {
    match choice {
        FormatterChoice::Gofmt => Box::new(Gofmt),
        FormatterChoice::Goimports => Box::new(Goimports),
        FormatterChoice::Noop => Box::new(Noop),
    }
}

/// `gofmt` from the Go toolchain
#[derive(Debug, Clone, Copy, Default)]
pub struct Gofmt;

impl Formatter for Gofmt {
    fn format(&self, src: &[u8]) -> Result<Vec<u8>, FormatError> {
        run_tool("gofmt", &[], src)
    }
}

/// `goimports` from golang.org/x/tools
#[derive(Debug, Clone, Copy, Default)]
pub struct Goimports;

impl Formatter for Goimports {
    fn format(&self, src: &[u8]) -> Result<Vec<u8>, FormatError> {
        run_tool("goimports", &[], src)
    }
}

/// Pass-through formatter; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct Noop;

impl Formatter for Noop {
    fn format(&self, src: &[u8]) -> Result<Vec<u8>, FormatError> {
        Ok(src.to_vec())
    }
}

/// Pipe `src` through an external tool and collect its stdout
fn run_tool(tool: &'static str, args: &[&str], src: &[u8]) -> Result<Vec<u8>, FormatError> {
    debug!(tool, bytes = src.len(), "Formatting generated source");

    let mut child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| FormatError::Spawn { tool, source })?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| FormatError::Failed {
            tool,
            stderr: "stdin was not captured".to_string(),
        })?;

    // Feed stdin from a separate thread so a full stdout pipe cannot block us
    let input = src.to_vec();
    let writer = thread::spawn(move || stdin.write_all(&input));

    let output = child
        .wait_with_output()
        .map_err(|source| FormatError::Io { tool, source })?;

    match writer.join() {
        Ok(Ok(())) => {}
        Ok(Err(source)) => return Err(FormatError::Io { tool, source }),
        Err(_) => {
            return Err(FormatError::Failed {
                tool,
                stderr: "stdin writer panicked".to_string(),
            })
        }
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(FormatError::Failed { tool, stderr });
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_passes_bytes_through() {
        let src = b"package x\n\nfunc  broken( {\n";
        assert_eq!(Noop.format(src).unwrap(), src.to_vec());
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("gofmt".parse::<FormatterChoice>().unwrap(), FormatterChoice::Gofmt);
        assert_eq!(
            "goimports".parse::<FormatterChoice>().unwrap(),
            FormatterChoice::Goimports
        );
        assert_eq!("noop".parse::<FormatterChoice>().unwrap(), FormatterChoice::Noop);
        assert!(matches!(
            "prettier".parse::<FormatterChoice>(),
            Err(FormatError::UnknownFormatter(_))
        ));
    }

    #[test]
    fn test_default_choice_is_gofmt() {
        assert_eq!(FormatterChoice::default(), FormatterChoice::Gofmt);
        assert_eq!(FormatterChoice::default().to_string(), "gofmt");
    }

    #[test]
    fn test_formatter_for_noop() {
        let formatter = formatter_for(FormatterChoice::Noop);
        assert_eq!(formatter.format(b"x").unwrap(), b"x".to_vec());
    }

    #[test]
    fn test_missing_tool_is_a_spawn_error() {
        let err = run_tool("hoog-formatter-that-does-not-exist", &[], b"").unwrap_err();
        assert!(matches!(err, FormatError::Spawn { .. }));
    }
}
