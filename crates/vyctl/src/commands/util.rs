//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use vyos_api::{ConfigPath, PathElement};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Refuses to guess when stdin is not a terminal.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Positional segments as a path; none means the whole tree.
pub fn segments(path: Vec<String>) -> ConfigPath {
    ConfigPath::from_elements(path.into_iter().map(PathElement::Segment).collect())
}

/// Parse a JSON path list, e.g. `[["system","host-name","r1"],["service","ssh"]]`.
pub fn parse_batch(json: &str) -> Result<ConfigPath, CliError> {
    let path: ConfigPath = serde_json::from_str(json)?;
    if path.is_empty() {
        return Err(CliError::Validation {
            field: "batch".into(),
            reason: "at least one location is required".into(),
        });
    }
    Ok(path)
}

/// Read and parse a JSON path list for `--from-file`.
pub fn read_batch_file(path: &Path) -> Result<ConfigPath, CliError> {
    let contents = std::fs::read_to_string(path)?;
    parse_batch(&contents).map_err(|e| match e {
        CliError::Json(e) => CliError::Validation {
            field: "from-file".into(),
            reason: format!("invalid JSON in {}: {e}", path.display()),
        },
        other => other,
    })
}

/// Spinner on stderr while a request is in flight; hidden when quiet or
/// when stderr is not a terminal.
pub fn spinner(message: String, quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn no_segments_means_whole_tree() {
        assert_eq!(segments(Vec::new()), ConfigPath::Empty);
        assert_eq!(
            segments(vec!["system".into(), "host-name".into()]),
            ConfigPath::location(["system", "host-name"])
        );
    }

    #[test]
    fn batch_json_accepts_locations() {
        let path = parse_batch(r#"[["system","host-name","r1"],["service","ssh"]]"#).unwrap();
        assert_eq!(
            path,
            ConfigPath::batch([vec!["system", "host-name", "r1"], vec!["service", "ssh"]])
        );

        let single = parse_batch(r#"[["service","ssh"]]"#).unwrap();
        assert_eq!(single, ConfigPath::location(["service", "ssh"]));
    }

    #[test]
    fn batch_json_rejects_garbage_and_empty() {
        assert!(matches!(parse_batch("{not json"), Err(CliError::Json(_))));
        assert!(matches!(parse_batch("[]"), Err(CliError::Validation { .. })));
    }

    #[test]
    fn batch_file_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("batch.json");
        std::fs::write(&file, "nope").unwrap();

        let err = read_batch_file(&file).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "from-file"));

        std::fs::write(&file, r#"[["a"],["b","c"]]"#).unwrap();
        assert_eq!(
            read_batch_file(&file).unwrap(),
            ConfigPath::batch([vec!["a"], vec!["b", "c"]])
        );
    }
}
