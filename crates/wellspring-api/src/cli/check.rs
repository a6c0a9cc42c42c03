//! Configuration check without network calls.

use std::path::Path;

use wellspring_core::extract::select_rules;
use wellspring_core::payload::select_shapes;
use wellspring_infra::config::{load_pipeline_config, load_settings};

/// Verify the configuration surface: secrets present, URLs well-formed,
/// pipeline lists resolvable. Never touches the network.
pub async fn check(json: bool) -> anyhow::Result<()> {
    let pipeline = load_pipeline_config(Path::new(".")).await;
    let shapes: Vec<&str> = select_shapes(&pipeline.payload_shapes)
        .iter()
        .map(|s| s.name)
        .collect();
    let rules: Vec<&str> = select_rules(&pipeline.extract_rules)
        .iter()
        .map(|r| r.name)
        .collect();

    match load_settings() {
        Ok((settings, _api_key)) => {
            if json {
                let out = serde_json::json!({
                    "healthy": true,
                    "agent_url": settings.agent_url,
                    "token_url": settings.token_url,
                    "send_profile": settings.send_profile,
                    "request_timeout_secs": pipeline.request_timeout_secs,
                    "token_refresh_margin_secs": pipeline.token_refresh_margin_secs,
                    "payload_shapes": shapes,
                    "extract_rules": rules,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!();
                println!(
                    "  {} Wellspring configuration",
                    console::style("🔍").bold()
                );
                println!();
                println!("  {} API key present", console::style("✓").green());
                println!(
                    "  {} Agent URL: {}",
                    console::style("✓").green(),
                    console::style(&settings.agent_url).cyan()
                );
                println!(
                    "  {} Token URL: {}",
                    console::style("✓").green(),
                    console::style(&settings.token_url).cyan()
                );
                println!(
                    "  {} Profile transmission: {}",
                    console::style("✓").green(),
                    if settings.send_profile { "on" } else { "off" }
                );
                println!(
                    "  {} {} payload shapes, {} extraction rules",
                    console::style("✓").green(),
                    shapes.len(),
                    rules.len()
                );
                println!();
            }
            Ok(())
        }
        Err(err) => {
            if json {
                let out = serde_json::json!({
                    "healthy": false,
                    "error": err.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!();
                println!("  {} {}", console::style("✗").red(), err);
                println!();
                println!(
                    "  {}",
                    console::style(
                        "Set WELLSPRING_API_KEY and WELLSPRING_AGENT_URL in the environment or a .env file."
                    )
                    .dim()
                );
                println!();
            }
            Err(err.into())
        }
    }
}
