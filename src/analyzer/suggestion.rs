//! Workflow Suggestion Data Structures
//!
//! The validated output of one analysis: candidate automations with their
//! complexity, target tooling, reconstructed steps, and generated code.
//! Enum fields reject out-of-vocabulary values at parse time, so a malformed
//! service response never propagates downstream.

use serde::{Deserialize, Serialize};

/// Estimated effort to adopt a suggested automation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Target tooling for a suggested automation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutomationType {
    #[serde(rename = "Python (Selenium)")]
    PythonSelenium,
    #[serde(rename = "Python (Playwright)")]
    PythonPlaywright,
    #[serde(rename = "Node.js (Puppeteer)")]
    NodePuppeteer,
    #[serde(rename = "Shell Script")]
    ShellScript,
    #[serde(rename = "Google Apps Script")]
    AppsScript,
}

impl AutomationType {
    /// The service's wire tag, also used for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PythonSelenium => "Python (Selenium)",
            Self::PythonPlaywright => "Python (Playwright)",
            Self::NodePuppeteer => "Node.js (Puppeteer)",
            Self::ShellScript => "Shell Script",
            Self::AppsScript => "Google Apps Script",
        }
    }
}

impl std::fmt::Display for AutomationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate automation produced by the inference service.
///
/// Immutable once created; owned by the display layer. The `id` is unique
/// within a result list so suggestions can be keyed and deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSuggestion {
    /// Unique identifier; synthesized as `sugg-<index>` when the service
    /// omits one
    #[serde(default)]
    pub id: String,
    /// Short name for the automation
    pub title: String,
    /// What the generated script does
    pub description: String,
    /// Estimated complexity
    pub complexity: Complexity,
    /// Target tooling
    #[serde(rename = "type")]
    pub automation: AutomationType,
    /// Logical steps reconstructed from the recording, in order
    pub steps: Vec<String>,
    /// Full generated code
    pub code: String,
}

/// Fill in missing ids deterministically from list position, so the list can
/// always be keyed by identifier.
pub fn assign_ids(mut suggestions: Vec<WorkflowSuggestion>) -> Vec<WorkflowSuggestion> {
    for (index, suggestion) in suggestions.iter_mut().enumerate() {
        if suggestion.id.trim().is_empty() {
            suggestion.id = format!("sugg-{}", index);
        }
    }
    suggestions
}
