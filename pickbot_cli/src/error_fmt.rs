//! Human-readable error descriptions and structured JSON error formatting.

use pickbot_core::error::DispatchError;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(de) = err.downcast_ref::<DispatchError>() {
        return match de {
            DispatchError::InvalidInput(msg) => format!(
                "What happened: The request was rejected before anything was sent ({msg}).\nLikely causes: A slot id below 1, or a controller host that is not an IPv4 address.\nHow to fix: Pass a 1-based slot id and check --host / controller.host in the config."
            ),
            DispatchError::InvalidConfiguration(msg) => format!(
                "What happened: The calibration was rejected at compile time ({msg}).\nLikely causes: Non-finite values, a sign that is not 1 or -1, or safe height at/below touch height.\nHow to fix: Edit the config TOML and rerun `pickbot self-check`."
            ),
            DispatchError::Network { channel, msg } => format!(
                "What happened: The {channel} channel could not be reached ({msg}).\nLikely causes: Controller powered off, wrong host, or a firewall blocking ports 29999/30002.\nHow to fix: Verify controller.host, confirm the controller is on the network, then retry."
            ),
            DispatchError::PartialDispatch { msg } => format!(
                "What happened: Brakes were released but the motion program was not delivered ({msg}).\nLikely causes: The program port dropped between the two sends, or the interpreter service is down.\nHow to fix: The arm received no motion command; inspect the cell, then re-run the dispatch."
            ),
        };
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("failed to read config") || lower.contains("failed to parse config") {
        return format!(
            "What happened: {msg}.\nLikely causes: Missing file or malformed TOML.\nHow to fix: Pass --config <FILE> pointing at a valid TOML; an empty file uses the shipped defaults."
        );
    }

    if lower.contains("invalid configuration") {
        let detail = err
            .source()
            .map(|s| format!(" ({s})"))
            .unwrap_or_default();
        return format!(
            "What happened: {msg}{detail}.\nLikely causes: Out-of-range values in the TOML (signs, pitch, heights, timeouts).\nHow to fix: Edit the config file, then rerun `pickbot self-check`."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Map DispatchError variants to stable exit codes; other errors return 1
/// (3 for configuration errors caught before dispatch).
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(de) = err.downcast_ref::<DispatchError>() {
        return match de {
            DispatchError::InvalidInput(_) => 2,
            DispatchError::InvalidConfiguration(_) => 3,
            DispatchError::Network { .. } => 4,
            DispatchError::PartialDispatch { .. } => 5,
        };
    }
    if err.to_string().to_ascii_lowercase().contains("invalid configuration") {
        return 3;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let msg = humanize(err);
    if let Some(de) = err.downcast_ref::<DispatchError>() {
        let obj = match de {
            DispatchError::InvalidInput(_) => json!({ "reason": "InvalidInput", "message": msg }),
            DispatchError::InvalidConfiguration(_) => {
                json!({ "reason": "InvalidConfiguration", "message": msg })
            }
            DispatchError::Network { channel, .. } => {
                json!({ "reason": "Network", "channel": channel.to_string(), "message": msg })
            }
            DispatchError::PartialDispatch { .. } => {
                json!({ "reason": "PartialDispatch", "channel": "program", "message": msg })
            }
        };
        return obj.to_string();
    }

    json!({ "reason": "Error", "message": msg }).to_string()
}
