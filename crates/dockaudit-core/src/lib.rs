use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a finding. Ordering is load-bearing: categories are built in
/// `Error > Warning > Info` priority and rendered in that order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// All severities in grouping priority order.
    pub const ORDERED: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "error" | "err" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" | "note" => Ok(Severity::Info),
            other => Err(format!("Unknown severity: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FixKind {
    /// The fix can be applied by the tool itself.
    Auto,
    /// The fix requires operator intervention.
    Manual,
}

impl FixKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixKind::Auto => "auto",
            FixKind::Manual => "manual",
        }
    }
}

impl fmt::Display for FixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One remediation suggestion attached to a finding. Instructions may mix
/// prose with fenced or indented configuration snippets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fix {
    pub description: String,
    pub kind: FixKind,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// One diagnostic result produced by the rule checks. Read-only to the
/// browser for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub fixes: Vec<Fix>,
}

/// The non-empty subset of findings sharing one severity. Members are
/// indices into the caller's finding slice.
#[derive(Debug, Clone)]
pub struct Category {
    pub severity: Severity,
    pub members: Vec<usize>,
}

impl Category {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Group findings into categories in severity-priority order. Severities
/// with no findings are omitted entirely, so every returned category is
/// non-empty.
pub fn group_by_severity(findings: &[Finding]) -> Vec<Category> {
    let mut categories = Vec::new();
    for severity in Severity::ORDERED {
        let members: Vec<usize> = findings
            .iter()
            .enumerate()
            .filter(|(_, finding)| finding.severity == severity)
            .map(|(idx, _)| idx)
            .collect();
        if !members.is_empty() {
            categories.push(Category { severity, members });
        }
    }
    categories
}
