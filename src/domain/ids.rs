//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that flow through an export attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Export job identifier
///
/// Issued by the configuration generator and correlates an export attempt
/// with its eventual result or error report.
///
/// # Examples
///
/// ```
/// use layout_export::domain::ids::JobId;
/// use std::str::FromStr;
///
/// let job_id = JobId::from_str("AIUHDKUHGDKHUD").unwrap();
/// assert_eq!(job_id.as_str(), "AIUHDKUHGDKHUD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobId(String);

impl JobId {
    /// Creates a new JobId from a string
    ///
    /// Returns `Err` if the identifier is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Job ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the job ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for JobId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JobId> for String {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Export format name (for example `pdf` or `png`)
///
/// Formats are matched exactly; no case folding or trimming happens after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatName(String);

impl FormatName {
    /// Creates a new FormatName, rejecting blank names
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Format name cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Returns the format name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FormatName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for FormatName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_valid() {
        let id = JobId::new("AIUHDKUHGDKHUD").unwrap();
        assert_eq!(id.as_str(), "AIUHDKUHGDKHUD");
        assert_eq!(id.to_string(), "AIUHDKUHGDKHUD");
    }

    #[test]
    fn test_job_id_empty() {
        assert!(JobId::new("").is_err());
        assert!(JobId::new("   ").is_err());
    }

    #[test]
    fn test_job_id_deserialize_rejects_blank() {
        let result: Result<JobId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());

        let id: JobId = serde_json::from_str("\"job-1\"").unwrap();
        assert_eq!(id.into_inner(), "job-1");
    }

    #[test]
    fn test_format_name_exact() {
        let format = FormatName::from_str("pdf").unwrap();
        assert_eq!(format.as_str(), "pdf");
        assert_ne!(format, FormatName::new("PDF").unwrap());
        assert!(FormatName::new("").is_err());
    }
}
