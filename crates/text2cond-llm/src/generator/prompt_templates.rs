//! Prompt templates for condition generation

use crate::columns::{describe_columns, ColumnsInfo};
use chrono::NaiveDate;
use text2cond_core::ConditionModel;

/// System instruction; `{schema}` is replaced with the document JSON Schema
pub const SYSTEM_MESSAGE_TEMPLATE: &str = "Generate JSON that conforms to this schema: {schema}";

/// User instruction for turning free text into a condition document
pub const CONDITION_GENERATION_PROMPT: &str = r#"Given a DataFrame with the following columns: {columns}

Convert the following free text conditions into a JSON format:
{free_text}

Instructions:
- Column names should be the exact column names from the DataFrame.
- Ensure that the operators are appropriate for the given column types.
- When dealing with dates, provide absolute dates in the format "YYYY-MM-DD".
- The current date is {today}.
- Provide the JSON only. Do not include any code block delimiters, text, explanation or comments.
"#;

/// System message embedding the condition document schema
pub fn system_message() -> String {
    let schema = ConditionModel::json_schema().to_string();
    render_template(SYSTEM_MESSAGE_TEMPLATE, &[("schema", &schema)])
}

/// User prompt for one generation request
pub fn build_prompt(free_text: &str, columns: &ColumnsInfo, today: NaiveDate) -> String {
    let columns = describe_columns(columns);
    let today = today.format("%Y-%m-%d").to_string();
    render_template(
        CONDITION_GENERATION_PROMPT,
        &[
            ("columns", &columns),
            ("today", &today),
            ("free_text", free_text),
        ],
    )
}

/// Fill `{name}` placeholders in a single pass over the template
///
/// Substituted values are copied verbatim and never scanned again, so braces
/// inside column names or free text stay literal. Unknown placeholders are
/// left as they are.
fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message_embeds_schema() {
        let system = system_message();
        assert!(system.starts_with("Generate JSON that conforms to this schema: {"));
        assert!(system.contains("\"ColumnNotInCondition\""));
        assert!(!system.contains("{schema}"));
    }

    #[test]
    fn test_build_prompt() {
        let mut columns = ColumnsInfo::new();
        columns.insert("amount".to_string(), "float".to_string());
        columns.insert("category".to_string(), "str".to_string());
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let prompt = build_prompt("amount over 100 and category is food", &columns, today);
        assert!(prompt.contains("following columns: amount (float), category (str)"));
        assert!(prompt.contains("amount over 100 and category is food"));
        assert!(prompt.contains("The current date is 2024-03-09."));
        assert!(!prompt.contains("{today}"));
    }

    #[test]
    fn test_placeholders_in_free_text_stay_literal() {
        let columns = ColumnsInfo::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let prompt = build_prompt("literal {today} and {columns} in text", &columns, today);
        assert!(prompt.contains("literal {today} and {columns} in text"));
        assert!(prompt.contains("The current date is 2024-03-09."));
    }

    #[test]
    fn test_placeholders_in_column_names_stay_literal() {
        let mut columns = ColumnsInfo::new();
        columns.insert("{free_text}".to_string(), "str".to_string());
        columns.insert("{today}".to_string(), "date".to_string());
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let prompt = build_prompt("amount over 100", &columns, today);
        assert!(prompt.contains("following columns: {free_text} (str), {today} (date)"));
        assert_eq!(prompt.matches("amount over 100").count(), 1);
        assert_eq!(prompt.matches("2024-03-09").count(), 1);
    }

    #[test]
    fn test_render_template_keeps_unknown_braces() {
        let rendered = render_template("{a} {b} {{a}} {", &[("a", "x")]);
        assert_eq!(rendered, "x {b} {x} {");
    }
}
