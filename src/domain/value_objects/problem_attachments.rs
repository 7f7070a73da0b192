//! Attachment references (image URLs) on a problem report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of attachment references. May be empty.
///
/// Entries are trimmed and blank entries dropped. The persistence form joins the
/// entries with `,` and no spaces; [`ProblemAttachments::from_string`] accepts that
/// form back, tolerating spaces after the commas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ProblemAttachments(Vec<String>);

impl ProblemAttachments {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            values
                .into_iter()
                .map(|v| v.as_ref().trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
        )
    }

    pub fn from_string(value: &str) -> Self {
        Self::new(value.split(','))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn serialize(&self) -> String {
        self.0.join(",")
    }
}

impl fmt::Display for ProblemAttachments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl From<Vec<String>> for ProblemAttachments {
    fn from(values: Vec<String>) -> Self {
        Self::new(values)
    }
}

impl From<ProblemAttachments> for Vec<String> {
    fn from(attachments: ProblemAttachments) -> Self {
        attachments.0
    }
}
