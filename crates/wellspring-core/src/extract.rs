//! Reply-text extraction from arbitrary agent responses.
//!
//! The agent returns loosely structured JSON whose shape depends on the
//! deployment. A fixed, ordered list of named probes is evaluated against
//! the parsed body; the first non-empty hit wins. When nothing matches, the
//! whole payload is pretty-printed so the user always sees *something* --
//! that outcome is degraded, not failed.

use serde_json::Value;

/// A named extraction probe.
///
/// Pure: probes never mutate, never touch the network, and are deterministic
/// for a given input.
#[derive(Clone, Copy)]
pub struct ExtractRule {
    pub name: &'static str,
    probe: fn(&Value) -> Option<String>,
}

impl ExtractRule {
    /// Run this probe against a response body.
    pub fn probe(&self, value: &Value) -> Option<String> {
        (self.probe)(value)
    }
}

impl std::fmt::Debug for ExtractRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractRule").field("name", &self.name).finish()
    }
}

/// The extracted display text and the rule that produced it.
#[derive(Debug, Clone)]
pub struct Extracted {
    pub text: String,
    /// `None` means the stringification fallback was used.
    pub rule: Option<&'static str>,
}

impl Extracted {
    /// Whether the fallback stringification was used.
    pub fn is_degraded(&self) -> bool {
        self.rule.is_none()
    }
}

/// The built-in probes, in priority order.
pub fn default_rules() -> Vec<ExtractRule> {
    vec![
        ExtractRule {
            name: "output_text",
            probe: |j| non_empty_str(j.pointer("/output/text")),
        },
        ExtractRule {
            name: "output_generic",
            probe: |j| join_texts(j.pointer("/output/generic")?.as_array()?, "text"),
        },
        ExtractRule {
            name: "output_messages",
            probe: |j| {
                let messages = j.pointer("/output/messages")?.as_array()?;
                let texts: Vec<&str> = messages
                    .iter()
                    .filter_map(|m| m.get("content")?.as_array())
                    .flatten()
                    .filter_map(|c| c.get("text")?.as_str())
                    .collect();
                if texts.is_empty() {
                    None
                } else {
                    Some(texts.join("\n\n"))
                }
            },
        },
        ExtractRule {
            name: "choices_message",
            probe: |j| {
                let content = j.pointer("/choices/0/message/content")?;
                if let Some(text) = non_empty_str(Some(content)) {
                    return Some(text);
                }
                join_texts(content.as_array()?, "text")
            },
        },
        ExtractRule {
            name: "results",
            probe: |j| {
                let results = j.get("results")?.as_array()?;
                results.iter().find_map(|item| {
                    ["generated_text", "output", "text"]
                        .iter()
                        .find_map(|key| non_empty_str(item.get(*key)))
                })
            },
        },
    ]
}

/// Resolve a configured rule order by name; empty means the built-in order.
///
/// Unknown names are skipped with a warning, mirroring payload-shape
/// selection.
pub fn select_rules(names: &[String]) -> Vec<ExtractRule> {
    let all = default_rules();
    if names.is_empty() {
        return all;
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        match all.iter().find(|r| r.name == name) {
            Some(rule) if selected.iter().any(|r: &ExtractRule| r.name == rule.name) => {
                tracing::warn!(rule = %name, "duplicate extraction rule in config, ignoring");
            }
            Some(rule) => selected.push(*rule),
            None => tracing::warn!(rule = %name, "unknown extraction rule in config, ignoring"),
        }
    }

    if selected.is_empty() {
        tracing::warn!("configured extraction rules resolved to nothing, using built-in order");
        return all;
    }
    selected
}

/// Extract display text from an agent response body.
///
/// Probes each rule in order and returns the first hit; otherwise falls back
/// to pretty-printed JSON of the whole payload (never empty, never an error).
pub fn extract_text(value: &Value, rules: &[ExtractRule]) -> Extracted {
    for rule in rules {
        if let Some(text) = rule.probe(value) {
            return Extracted {
                text,
                rule: Some(rule.name),
            };
        }
    }

    let fallback = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    Extracted {
        text: fallback,
        rule: None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Collect `key` string fields from a list of objects and join with blank lines.
fn join_texts(items: &[Value], key: &str) -> Option<String> {
    let texts: Vec<&str> = items.iter().filter_map(|it| it.get(key)?.as_str()).collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(value: &Value) -> Extracted {
        extract_text(value, &default_rules())
    }

    #[test]
    fn test_output_text() {
        let j = json!({"output": {"text": "Eat more greens."}});
        let e = extract(&j);
        assert_eq!(e.text, "Eat more greens.");
        assert_eq!(e.rule, Some("output_text"));
    }

    #[test]
    fn test_output_text_blank_falls_through() {
        let j = json!({"output": {"text": "   ", "generic": [{"text": "real reply"}]}});
        let e = extract(&j);
        assert_eq!(e.text, "real reply");
        assert_eq!(e.rule, Some("output_generic"));
    }

    #[test]
    fn test_output_generic_joins() {
        let j = json!({"output": {"generic": [{"text": "part one"}, {"text": "part two"}]}});
        assert_eq!(extract(&j).text, "part one\n\npart two");
    }

    #[test]
    fn test_output_messages_content_blocks() {
        let j = json!({
            "output": {
                "messages": [
                    {"content": [{"text": "a"}, {"text": "b"}]},
                    {"content": [{"text": "c"}]}
                ]
            }
        });
        let e = extract(&j);
        assert_eq!(e.text, "a\n\nb\n\nc");
        assert_eq!(e.rule, Some("output_messages"));
    }

    #[test]
    fn test_choices_string_content() {
        let j = json!({"choices": [{"message": {"content": "chat reply"}}]});
        let e = extract(&j);
        assert_eq!(e.text, "chat reply");
        assert_eq!(e.rule, Some("choices_message"));
    }

    #[test]
    fn test_choices_block_content() {
        let j = json!({"choices": [{"message": {"content": [{"text": "x"}, {"text": "y"}]}}]});
        assert_eq!(extract(&j).text, "x\n\ny");
    }

    #[test]
    fn test_results_field_priority() {
        let j = json!({"results": [{"generated_text": "gen", "text": "plain"}]});
        assert_eq!(extract(&j).text, "gen");

        let j = json!({"results": [{"output": ""}, {"text": "from text"}]});
        assert_eq!(extract(&j).text, "from text");
    }

    #[test]
    fn test_priority_order_is_fixed() {
        // Both output.text and results match; the earlier rule wins.
        let j = json!({
            "output": {"text": "first"},
            "results": [{"text": "second"}]
        });
        assert_eq!(extract(&j).text, "first");
    }

    #[test]
    fn test_fallback_stringifies_unknown_shapes() {
        let j = json!({"status": "queued", "eta": 5});
        let e = extract(&j);
        assert!(e.is_degraded());
        assert!(!e.text.is_empty());
        assert!(e.text.contains("queued"));
    }

    #[test]
    fn test_fallback_never_empty_for_scalars() {
        for j in [json!(null), json!([]), json!(""), json!(0)] {
            let e = extract(&j);
            assert!(!e.text.is_empty());
        }
    }

    #[test]
    fn test_extract_is_idempotent() {
        let j = json!({"output": {"generic": [{"text": "same"}]}});
        let a = extract(&j);
        let b = extract(&j);
        assert_eq!(a.text, b.text);
        assert_eq!(a.rule, b.rule);
    }

    #[test]
    fn test_select_rules_reorders() {
        let names = vec!["results".to_string(), "output_text".to_string()];
        let rules = select_rules(&names);
        let j = json!({
            "output": {"text": "first"},
            "results": [{"text": "second"}]
        });
        // With results promoted, it wins over output.text.
        assert_eq!(extract_text(&j, &rules).text, "second");
    }
}
