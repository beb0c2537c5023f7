use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Warning,
    Info,
    Low,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Low => "low",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Firing,
    Resolved,
    Acknowledged,
    Suppressed,
    Pending,
}

impl AlertStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "firing" => Some(Self::Firing),
            "resolved" => Some(Self::Resolved),
            "acknowledged" => Some(Self::Acknowledged),
            "suppressed" => Some(Self::Suppressed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Firing => "firing",
            Self::Resolved => "resolved",
            Self::Acknowledged => "acknowledged",
            Self::Suppressed => "suppressed",
            Self::Pending => "pending",
        }
    }
}

/// One received alert, as normalized by the gateway on ingest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: u64,
    pub preset: String,
    pub source_type: String,
    pub severity: Severity,
    pub status: AlertStatus,
    pub title: String,
    pub dismissed: bool,
    pub assignee: Option<String>,
    pub received_at: String,
    pub payload: serde_json::Value,
}

impl AlertRecord {
    /// The value this record contributes to a facet, if any.
    pub fn facet_value(&self, facet_key: &str) -> Option<String> {
        match facet_key {
            "source" => Some(self.source_type.clone()),
            "severity" => Some(self.severity.as_str().to_string()),
            "status" => Some(self.status.as_str().to_string()),
            "assignee" => self.assignee.clone(),
            "dismissed" => Some(self.dismissed.to_string()),
            "incident" => self
                .payload
                .get("incident")
                .and_then(serde_json::Value::as_str)
                .map(ToString::to_string),
            _ => None,
        }
    }
}
