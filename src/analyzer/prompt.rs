//! Prompt and Output Schema
//!
//! The fixed system instruction, the trailing user prompt (parameterized only
//! by frame count), and the strict response schema imposed on the inference
//! service. The schema is sent with the request, so the service is
//! constrained to the expected structure up front rather than validated
//! loosely after the fact.

use crate::capture::types::CAPTURE_INTERVAL_MS;
use serde_json::{json, Value};

/// Fixed task description sent as the system instruction
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert Workflow Automation Engineer. \
You will receive a series of screenshots depicting a user's workflow in a web \
browser or desktop environment. Based on the visual evidence you must: \
1. Reconstruct the step-by-step workflow. \
2. Identify the intent of the user. \
3. Suggest the best way to automate the task with code (Python Selenium, \
Playwright, or Puppeteer are preferred for web tasks). \
4. Provide the actual executable code for the automation. \
Return the response as structured JSON.";

/// Build the trailing natural-language prompt for a frame sequence.
pub fn analysis_prompt(frame_count: usize) -> String {
    format!(
        "Here is a recording of a task I perform manually. Analyze these {} \
         frames (taken every {} seconds) and output a JSON array of automation \
         suggestions. Each suggestion needs a title, a description of what the \
         script does, a complexity of 'Low', 'Medium', or 'High', a type naming \
         the target tooling, the ordered logical steps you identified, and the \
         full code implementation.",
        frame_count,
        CAPTURE_INTERVAL_MS / 1000
    )
}

/// Structured output schema: an array of suggestion objects with complexity
/// and type constrained to their enumerations.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "complexity": {
                    "type": "STRING",
                    "enum": ["Low", "Medium", "High"]
                },
                "type": {
                    "type": "STRING",
                    "enum": [
                        "Python (Selenium)",
                        "Python (Playwright)",
                        "Node.js (Puppeteer)",
                        "Shell Script",
                        "Google Apps Script"
                    ]
                },
                "steps": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "code": { "type": "STRING" }
            },
            "required": ["title", "description", "complexity", "type", "steps", "code"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_parameterized_by_frame_count() {
        let prompt = analysis_prompt(7);
        assert!(prompt.contains("7 frames"));
        assert!(prompt.contains("every 2 seconds"));
    }

    #[test]
    fn test_system_instruction_describes_the_task() {
        assert!(SYSTEM_INSTRUCTION.contains("Workflow Automation Engineer"));
        assert!(SYSTEM_INSTRUCTION.contains("screenshots"));
        assert!(SYSTEM_INSTRUCTION.contains("JSON"));
    }

    #[test]
    fn test_schema_constrains_complexity_and_type() {
        let schema = response_schema();
        assert_eq!(schema["type"], "ARRAY");

        let properties = &schema["items"]["properties"];
        let complexities = properties["complexity"]["enum"].as_array().unwrap();
        assert_eq!(complexities.len(), 3);

        let types = properties["type"]["enum"].as_array().unwrap();
        assert!(types.contains(&serde_json::json!("Python (Playwright)")));
        assert!(types.contains(&serde_json::json!("Google Apps Script")));
    }

    #[test]
    fn test_schema_requires_all_fields_except_id() {
        let schema = response_schema();
        let required = schema["items"]["required"].as_array().unwrap();
        for field in ["title", "description", "complexity", "type", "steps", "code"] {
            assert!(required.contains(&serde_json::json!(field)), "{}", field);
        }
        assert!(!required.contains(&serde_json::json!("id")));
    }
}
