use color_eyre::eyre::Result;
use juicecheck_platform::{acquire, read_basic_status, AttemptOutcome, SourceAttempt};

use crate::config::{config_path, log_dir, UserConfig};

pub fn run(config: &UserConfig) -> Result<()> {
    println!("juicecheck debug information");
    println!("{}", "=".repeat(60));

    println!("\n--- Basic Status ---");
    match read_basic_status() {
        Ok(Some(status)) => println!("{}", serde_json::to_string_pretty(&status)?),
        Ok(None) => println!("No battery found"),
        Err(e) => println!("Error: {}", e),
    }

    println!("\n--- Capacity Sources ---");
    match acquire(&config.acquire_options()) {
        Ok(acquisition) => {
            if acquisition.attempts.is_empty() {
                println!("(no sources invoked)");
            }
            for attempt in &acquisition.attempts {
                println!("{}", describe_attempt(attempt));
            }

            println!("\n--- Raw Fields ---");
            println!("{}", serde_json::to_string_pretty(&acquisition.fields)?);
        }
        Err(e) => println!("Acquisition failed: {}", e),
    }

    println!("\n--- Paths ---");
    println!("Config: {}", config_path().display());
    println!("Logs: {}", log_dir().display());

    println!("\n--- Current Config ---");
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}

fn describe_attempt(attempt: &SourceAttempt) -> String {
    let status = match &attempt.outcome {
        AttemptOutcome::Filled(_) => "found",
        AttemptOutcome::Empty => "empty",
        AttemptOutcome::Failed(_) => "failed",
    };

    format!(
        "{:<18} {:<7} asked {:<14} {}",
        attempt.source,
        status,
        attempt.asked.to_string(),
        attempt.outcome
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use juicecheck_platform::Wanted;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe_attempt() {
        let attempt = SourceAttempt {
            source: "wmi-static",
            asked: Wanted::BOTH,
            outcome: AttemptOutcome::Failed("access denied".to_string()),
        };

        assert_eq!(
            describe_attempt(&attempt),
            "wmi-static         failed  asked design + full  failed: access denied"
        );
    }
}
