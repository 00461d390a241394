//! Result Presentation
//!
//! Pure rendering of the suggestion list as markdown. No logic beyond
//! formatting; the core never depends on this module.

use crate::analyzer::WorkflowSuggestion;
use std::fmt::Write;

/// Language tag for a suggestion's fenced code block
fn code_fence_tag(suggestion: &WorkflowSuggestion) -> &'static str {
    use crate::analyzer::AutomationType::*;
    match suggestion.automation {
        PythonSelenium | PythonPlaywright => "python",
        NodePuppeteer | AppsScript => "javascript",
        ShellScript => "sh",
    }
}

/// Render suggestions as a markdown document.
pub fn render_markdown(suggestions: &[WorkflowSuggestion]) -> String {
    let mut out = String::from("# Automation Suggestions\n");
    for suggestion in suggestions {
        let _ = write!(
            out,
            "\n## {} ({})\n\n\
             - Complexity: {:?}\n\
             - Tooling: {}\n\n\
             {}\n\n\
             ### Steps\n\n",
            suggestion.title,
            suggestion.id,
            suggestion.complexity,
            suggestion.automation,
            suggestion.description,
        );
        for (index, step) in suggestion.steps.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", index + 1, step);
        }
        let _ = write!(
            out,
            "\n### Code\n\n```{}\n{}\n```\n",
            code_fence_tag(suggestion),
            suggestion.code.trim_end(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AutomationType, Complexity};

    fn make_suggestion() -> WorkflowSuggestion {
        WorkflowSuggestion {
            id: "sugg-0".to_string(),
            title: "Export the report".to_string(),
            description: "Downloads the weekly CSV".to_string(),
            complexity: Complexity::Medium,
            automation: AutomationType::PythonPlaywright,
            steps: vec!["Open dashboard".to_string(), "Click export".to_string()],
            code: "from playwright.sync_api import sync_playwright\n".to_string(),
        }
    }

    #[test]
    fn test_render_includes_all_sections() {
        let md = render_markdown(&[make_suggestion()]);
        assert!(md.contains("## Export the report (sugg-0)"));
        assert!(md.contains("- Complexity: Medium"));
        assert!(md.contains("- Tooling: Python (Playwright)"));
        assert!(md.contains("1. Open dashboard"));
        assert!(md.contains("2. Click export"));
        assert!(md.contains("```python\nfrom playwright.sync_api import sync_playwright\n```"));
    }

    #[test]
    fn test_render_empty_list_has_only_heading() {
        let md = render_markdown(&[]);
        assert_eq!(md, "# Automation Suggestions\n");
    }

    #[test]
    fn test_shell_suggestions_use_sh_fence() {
        let mut suggestion = make_suggestion();
        suggestion.automation = AutomationType::ShellScript;
        let md = render_markdown(&[suggestion]);
        assert!(md.contains("```sh\n"));
    }
}
