use serde::{Deserialize, Serialize};

/// Reply used when a completed job produced no assistant entry.
pub const NO_REPLY_FALLBACK: &str = "Sorry, I could not generate a response.";

/// Reply shown for every failure: transport, remote FAILED, protocol, timeout
/// or cancellation. Failure causes are never surfaced to the user.
pub const FAILURE_REPLY: &str = "Sorry, there was an error processing your message.";

const STATUS_COMPLETED: &str = "COMPLETED";
const STATUS_FAILED: &str = "FAILED";

/// Opaque identifier of a remote inference job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remote job state, reduced to terminal and non-terminal outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Any status other than the two terminal ones, kept verbatim for logging.
    Pending(String),
    Completed,
    Failed,
}

impl JobStatus {
    /// Classifies a raw status value. Matching is exact: `"completed"` is
    /// not terminal.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            STATUS_COMPLETED => JobStatus::Completed,
            STATUS_FAILED => JobStatus::Failed,
            other => JobStatus::Pending(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending(raw) => raw.as_str(),
            JobStatus::Completed => STATUS_COMPLETED,
            JobStatus::Failed => STATUS_FAILED,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending(raw) if raw.is_empty() => f.write_str("(no status)"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One role/content entry of a completed job's output list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEntry {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl OutputEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Reads an entry from a raw JSON element. Anything other than an object
    /// with string `role` and `content` yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let role = value.get("role")?.as_str()?;
        let content = value.get("content")?.as_str()?;
        Some(Self::new(role, content))
    }

    /// Reads a raw `output` value as a list, skipping malformed elements.
    /// Returns `None` when the value is not an array.
    pub fn list_from_json(value: &serde_json::Value) -> Option<Vec<Self>> {
        let items = value.as_array()?;
        Some(items.iter().filter_map(Self::from_json).collect())
    }
}

/// Result of a single status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    status: JobStatus,
    output: Option<Vec<OutputEntry>>,
}

impl StatusReport {
    pub fn new(status: JobStatus, output: Option<Vec<OutputEntry>>) -> Self {
        Self { status, output }
    }

    pub fn pending(raw: impl Into<String>) -> Self {
        Self::new(JobStatus::Pending(raw.into()), None)
    }

    pub fn completed(output: Vec<OutputEntry>) -> Self {
        Self::new(JobStatus::Completed, Some(output))
    }

    pub fn failed() -> Self {
        Self::new(JobStatus::Failed, None)
    }

    pub fn status(&self) -> &JobStatus {
        &self.status
    }

    pub fn output(&self) -> Option<&[OutputEntry]> {
        self.output.as_deref()
    }

    pub fn into_output(self) -> Option<Vec<OutputEntry>> {
        self.output
    }
}

/// Returns the content of the first assistant entry, or the fixed fallback
/// when the output has none. Entries that failed to decode never reach here.
pub fn extract_reply(output: &[OutputEntry]) -> String {
    output
        .iter()
        .find(|entry| entry.role == "assistant")
        .map(|entry| entry.content.clone())
        .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string())
}
