//! Resource locations of the form `<package-path>[.<ObjectName>]`

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A package directory plus an optional object declared in it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    package: String,
    object: String,
}

impl Location {
    pub fn new(package: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            object: object.into(),
        }
    }

    /// Split a location string.
    ///
    /// Everything up to the last `/` is directory; inside the final segment
    /// the text after the last `.` is the object name. A trailing bare `.`
    /// yields an empty object name. The relative segments `.` and `..` are
    /// directories, never objects.
    pub fn parse(location: &str) -> Self {
        let (dir, last) = match location.rfind('/') {
            Some(idx) => location.split_at(idx + 1),
            None => ("", location),
        };

        if last == "." || last == ".." {
            return Self::new(location, "");
        }

        match last.rfind('.') {
            Some(idx) => Self::new(format!("{dir}{}", &last[..idx]), &last[idx + 1..]),
            None => Self::new(location, ""),
        }
    }

    /// The package path component
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The object name component; empty when none was given
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Directory holding the package; the current directory when the
    /// package component is empty
    pub fn dir(&self) -> PathBuf {
        if self.package.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.package)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.package.is_empty() && self.object.is_empty()
    }
}

impl FromStr for Location {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.object.is_empty() {
            f.write_str(&self.package)
        } else {
            write!(f, "{}.{}", self.package, self.object)
        }
    }
}
