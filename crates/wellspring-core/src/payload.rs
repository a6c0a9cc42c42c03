//! Candidate payload shapes for the agent endpoint.
//!
//! Different deployments of the hosted agent accept different request-body
//! schemas, and the deployed schema is not discoverable up front. Each
//! candidate is a named pure builder; the negotiator tries them in order
//! until one is accepted. The list is data-driven so new shapes are added
//! here, not as branching logic at the call site.

use serde_json::{Value, json};

use wellspring_types::profile::Profile;

/// A named candidate request-body shape.
///
/// `build` is a pure function of the user text and the variables object;
/// the produced body is constructed per call and discarded after use.
#[derive(Clone, Copy)]
pub struct PayloadShape {
    pub name: &'static str,
    build: fn(&str, &Value) -> Value,
}

impl PayloadShape {
    /// Build the request body for this shape.
    pub fn build(&self, user_text: &str, variables: &Value) -> Value {
        (self.build)(user_text, variables)
    }
}

impl std::fmt::Debug for PayloadShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadShape").field("name", &self.name).finish()
    }
}

/// The built-in candidate shapes, in negotiation order.
pub fn default_shapes() -> Vec<PayloadShape> {
    vec![
        PayloadShape {
            name: "input_messages_string",
            build: |text, vars| {
                json!({
                    "input": {
                        "messages": [{"role": "user", "content": text}],
                        "variables": vars,
                    }
                })
            },
        },
        PayloadShape {
            name: "input_messages_input_text",
            build: |text, vars| {
                json!({
                    "input": {
                        "messages": [
                            {"role": "user", "content": [{"type": "input_text", "text": text}]}
                        ],
                        "variables": vars,
                    }
                })
            },
        },
        PayloadShape {
            name: "input_messages_text_block",
            build: |text, vars| {
                json!({
                    "input": {
                        "messages": [
                            {"role": "user", "content": [{"type": "text", "text": text}]}
                        ],
                        "variables": vars,
                    }
                })
            },
        },
        PayloadShape {
            name: "input_array_string",
            build: |text, vars| {
                json!({
                    "input": [{"role": "user", "content": text}],
                    "variables": vars,
                })
            },
        },
        PayloadShape {
            name: "input_array_text_block",
            build: |text, vars| {
                json!({
                    "input": [
                        {"role": "user", "content": [{"type": "text", "text": text}]}
                    ],
                    "variables": vars,
                })
            },
        },
        PayloadShape {
            name: "messages_string",
            build: |text, vars| {
                json!({
                    "messages": [{"role": "user", "content": text}],
                    "variables": vars,
                })
            },
        },
        PayloadShape {
            name: "input_text",
            build: |text, vars| {
                json!({
                    "input": {"text": text, "variables": vars}
                })
            },
        },
    ]
}

/// Resolve a configured shape order by name.
///
/// An empty list means the built-in order. Unknown names are skipped with a
/// warning rather than failing startup; duplicates keep their first position.
pub fn select_shapes(names: &[String]) -> Vec<PayloadShape> {
    let all = default_shapes();
    if names.is_empty() {
        return all;
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        match all.iter().find(|s| s.name == name) {
            Some(shape) if selected.iter().any(|s: &PayloadShape| s.name == shape.name) => {
                tracing::warn!(shape = %name, "duplicate payload shape in config, ignoring");
            }
            Some(shape) => selected.push(*shape),
            None => tracing::warn!(shape = %name, "unknown payload shape in config, ignoring"),
        }
    }

    if selected.is_empty() {
        tracing::warn!("configured payload shapes resolved to nothing, using built-in order");
        return all;
    }
    selected
}

/// Build the request variables object from the saved profile.
///
/// Always an object; the profile nests under a `profile` key only when
/// sending is enabled and the profile has content.
pub fn build_variables(profile: Option<&Profile>, send_profile: bool) -> Value {
    let mut variables = serde_json::Map::new();
    if send_profile {
        if let Some(profile) = profile {
            if !profile.is_empty() {
                variables.insert("profile".to_string(), profile.to_variables());
            }
        }
    }
    Value::Object(variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellspring_types::profile::{ActivityLevel, Goal};

    fn vars() -> Value {
        json!({"profile": {"age": 22}})
    }

    #[test]
    fn test_default_shape_order() {
        let names: Vec<&str> = default_shapes().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "input_messages_string",
                "input_messages_input_text",
                "input_messages_text_block",
                "input_array_string",
                "input_array_text_block",
                "messages_string",
                "input_text",
            ]
        );
    }

    #[test]
    fn test_first_shape_body() {
        let shapes = default_shapes();
        let body = shapes[0].build("hello", &vars());
        assert_eq!(body["input"]["messages"][0]["role"], "user");
        assert_eq!(body["input"]["messages"][0]["content"], "hello");
        assert_eq!(body["input"]["variables"]["profile"]["age"], 22);
    }

    #[test]
    fn test_block_content_shapes() {
        let shapes = default_shapes();
        let body = shapes[1].build("hi", &vars());
        assert_eq!(
            body["input"]["messages"][0]["content"][0]["type"],
            "input_text"
        );
        let body = shapes[2].build("hi", &vars());
        assert_eq!(body["input"]["messages"][0]["content"][0]["type"], "text");
        assert_eq!(body["input"]["messages"][0]["content"][0]["text"], "hi");
    }

    #[test]
    fn test_bare_messages_and_input_text_shapes() {
        let shapes = default_shapes();
        let body = shapes[5].build("hi", &vars());
        assert_eq!(body["messages"][0]["content"], "hi");
        assert!(body.get("input").is_none());

        let body = shapes[6].build("hi", &vars());
        assert_eq!(body["input"]["text"], "hi");
        assert_eq!(body["input"]["variables"]["profile"]["age"], 22);
    }

    #[test]
    fn test_select_shapes_empty_uses_default() {
        assert_eq!(select_shapes(&[]).len(), default_shapes().len());
    }

    #[test]
    fn test_select_shapes_reorders_and_skips_unknown() {
        let names = vec![
            "input_text".to_string(),
            "no_such_shape".to_string(),
            "messages_string".to_string(),
            "input_text".to_string(),
        ];
        let selected = select_shapes(&names);
        let selected_names: Vec<&str> = selected.iter().map(|s| s.name).collect();
        assert_eq!(selected_names, vec!["input_text", "messages_string"]);
    }

    #[test]
    fn test_select_shapes_all_unknown_falls_back() {
        let names = vec!["bogus".to_string()];
        assert_eq!(select_shapes(&names).len(), default_shapes().len());
    }

    #[test]
    fn test_build_variables_with_profile() {
        let profile = Profile {
            age: Some(22),
            sex: Some("male".to_string()),
            height_cm: Some(175.0),
            weight_kg: Some(78.0),
            activity: Some(ActivityLevel::Moderate),
            goal: Some(Goal::Lose),
        };
        let vars = build_variables(Some(&profile), true);
        assert_eq!(vars["profile"]["age"], 22);
        assert_eq!(vars["profile"]["activity"], "moderate");
    }

    #[test]
    fn test_build_variables_disabled_or_absent() {
        let profile = Profile {
            age: Some(22),
            ..Profile::default()
        };
        // Toggle off: profile omitted even when present.
        let vars = build_variables(Some(&profile), false);
        assert_eq!(vars, json!({}));
        // No profile saved.
        let vars = build_variables(None, true);
        assert_eq!(vars, json!({}));
        // Empty profile: omitted.
        let vars = build_variables(Some(&Profile::default()), true);
        assert_eq!(vars, json!({}));
    }
}
