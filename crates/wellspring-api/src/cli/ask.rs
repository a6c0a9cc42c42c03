//! One-shot terminal turn against the configured agent.

use wellspring_types::chat::ChatSession;

use crate::state::AppState;

/// Send one message through the pipeline and print the reply.
///
/// Uses a throwaway session (no profile, no history); the command exists for
/// smoke-testing a deployment from the terminal.
pub async fn ask(state: &AppState, message: &str, json: bool) -> anyhow::Result<()> {
    let mut session = ChatSession::new();

    let outcome = match state.coach.handle_message(&mut session, message).await {
        Ok(outcome) => outcome,
        Err(e) => anyhow::bail!("{e}"),
    };

    if json {
        let out = serde_json::json!({
            "reply": outcome.reply,
            "errored": outcome.errored,
            "degraded": outcome.is_degraded(),
            "failed_attempts": outcome.failed_attempts,
            "shape": outcome.shape,
            "rule": outcome.rule,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    if outcome.errored {
        println!("  {}", console::style(&outcome.reply).red());
    } else {
        println!("  {}", outcome.reply);
        if outcome.is_degraded() {
            println!();
            println!(
                "  {}",
                console::style("(raw agent payload -- no known reply shape matched)").dim()
            );
        }
    }
    if outcome.failed_attempts > 0 {
        println!();
        println!(
            "  {}",
            console::style(format!(
                "{} candidate payload(s) rejected before this reply",
                outcome.failed_attempts
            ))
            .dim()
        );
    }
    println!();

    Ok(())
}
