//! Markdown rendering of rule documentation for issue content bodies.

use serde_json::Value;

use crate::rules::RuleMetadata;

/// Renders one rule's metadata as the markdown body attached to issues.
///
/// Sections appear in a fixed order: heading, description, optional details
/// and rationale, a notes list for the metadata flags that are set, the
/// options description, fenced examples keyed by the rule name, the JSON
/// options schema when one is declared, and a link to the upstream rule
/// documentation.
pub fn render_rule_documentation(rule: &RuleMetadata) -> String {
    let mut body = format!("# Rule: {}\n", rule.rule_name);
    body.push_str(&format!("\n{}\n", rule.description));

    if let Some(details) = &rule.description_details {
        body.push_str(&format!("\n{}\n", details));
    }
    if let Some(rationale) = &rule.rationale {
        body.push_str(&format!("\n##### Rationale\n\n{}\n", rationale));
    }

    if rule.typescript_only || rule.has_fix || rule.requires_type_info {
        body.push_str("\n##### Notes\n\n");
        if rule.typescript_only {
            body.push_str("- **TypeScript Only**\n");
        }
        if rule.has_fix {
            body.push_str("- **Has Fix**\n");
        }
        if rule.requires_type_info {
            body.push_str("- **Requires Type Info**\n");
        }
    }

    body.push_str(&format!("\n### Config\n\n{}\n", rule.options_description));

    if !rule.option_examples.is_empty() {
        let fences: Vec<String> = rule
            .option_examples
            .iter()
            .map(|example| {
                format!(
                    "```json\n\"{}\": {}\n```",
                    rule.rule_name,
                    render_example(example)
                )
            })
            .collect();
        body.push_str("\n##### Examples\n\n");
        body.push_str(&fences.join("\n"));
        body.push('\n');
    }

    if !rule.options.is_null() {
        let schema = serde_json::to_string_pretty(&rule.options)
            .unwrap_or_else(|_| rule.options.to_string());
        body.push_str(&format!("\n##### Schema\n\n```json\n{}\n```\n", schema));
    }

    body.push_str(&format!(
        "\nFor more information see [this page](https://palantir.github.io/tslint/rules/{}).\n",
        rule.rule_name
    ));
    body
}

/// Examples are published either as raw configuration snippets (strings) or
/// as structured values; strings pass through verbatim.
fn render_example(example: &Value) -> String {
    match example {
        Value::String(raw) => raw.clone(),
        other => other.to_string(),
    }
}
