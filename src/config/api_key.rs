//! NASA API key bootstrap
//!
//! When no key is configured and a person is at the terminal, ask once and
//! remember the answer in `.env` so the next start picks it up through
//! `dotenvy`. Without a key the service still runs; only the NEO feed is
//! unavailable.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{info, warn};

use super::defaults::NASA_API_KEY_VAR;
use super::NasaConfig;

/// Ensure `nasa.api_key` is set, prompting if `interactive`.
///
/// Returns whether a key is available afterwards.
pub fn bootstrap_api_key(nasa: &mut NasaConfig, interactive: bool, dotenv_path: &Path) -> bool {
    if nasa.api_key().is_some() {
        return true;
    }

    if !interactive {
        warn!("{} not set: /nasa_asteroids will report it as not configured", NASA_API_KEY_VAR);
        return false;
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stderr();
    let key = match prompt_for_api_key(&mut input, &mut output) {
        Ok(Some(key)) => key,
        Ok(None) => {
            warn!("No NASA API key entered: NEO feed disabled");
            return false;
        }
        Err(e) => {
            warn!(error = %e, "Could not read NASA API key: NEO feed disabled");
            return false;
        }
    };

    match persist_env_var(dotenv_path, NASA_API_KEY_VAR, &key) {
        Ok(()) => info!(path = %dotenv_path.display(), "Saved {} for next time", NASA_API_KEY_VAR),
        Err(e) => warn!(path = %dotenv_path.display(), error = %e, "Failed to save API key"),
    }

    nasa.api_key = Some(key);
    true
}

/// Ask for the key on `output` and read one line from `input`.
///
/// A blank line or end of input yields `None`.
pub fn prompt_for_api_key<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> std::io::Result<Option<String>> {
    writeln!(output)?;
    writeln!(output, "{NASA_API_KEY_VAR} not found in your environment.")?;
    write!(output, "Please enter your NASA API key: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let key = line.trim();

    Ok((!key.is_empty()).then(|| key.to_string()))
}

/// Set `key=value` in a dotenv file, replacing an existing assignment.
///
/// Other lines (comments included) are kept as they are.
pub fn persist_env_var(path: &Path, key: &str, value: &str) -> std::io::Result<()> {
    let existing = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    let assignment = format!("{key}={value}");
    let mut replaced = false;
    let mut lines: Vec<String> = existing
        .lines()
        .map(|line| {
            let name = line
                .trim_start()
                .trim_start_matches("export ")
                .split('=')
                .next()
                .unwrap_or_default()
                .trim();
            if !replaced && name == key && line.contains('=') {
                replaced = true;
                assignment.clone()
            } else {
                line.to_string()
            }
        })
        .collect();

    if !replaced {
        lines.push(assignment);
    }

    let mut contents = lines.join("\n");
    contents.push('\n');
    std::fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_trimmed_key() {
        let mut input = Cursor::new(b"  DEMO_KEY  \n".to_vec());
        let mut output = Vec::new();
        let key = prompt_for_api_key(&mut input, &mut output).unwrap();
        assert_eq!(key.as_deref(), Some("DEMO_KEY"));
        assert!(String::from_utf8(output).unwrap().contains("NASA API key"));
    }

    #[test]
    fn test_prompt_blank_or_eof() {
        let mut output = Vec::new();
        assert_eq!(prompt_for_api_key(&mut Cursor::new(b"\n".to_vec()), &mut output).unwrap(), None);
        assert_eq!(prompt_for_api_key(&mut Cursor::new(Vec::new()), &mut output).unwrap(), None);
    }

    #[test]
    fn test_persist_creates_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join(".env");
        persist_env_var(&path, "NASA_API_KEY", "abc").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "NASA_API_KEY=abc\n");
    }

    #[test]
    fn test_persist_replaces_existing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join(".env");
        std::fs::write(&path, "# keys\nRUST_LOG=debug\nNASA_API_KEY=old\nNASA_API_KEY_BACKUP=x\n").unwrap();

        persist_env_var(&path, "NASA_API_KEY", "new").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# keys\nRUST_LOG=debug\nNASA_API_KEY=new\nNASA_API_KEY_BACKUP=x\n"
        );
    }

    #[test]
    fn test_bootstrap_keeps_configured_key() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut nasa = NasaConfig {
            api_key: Some("configured".to_string()),
            ..NasaConfig::default()
        };
        assert!(bootstrap_api_key(&mut nasa, true, &tmp.path().join(".env")));
        assert_eq!(nasa.api_key(), Some("configured"));
        assert!(!tmp.path().join(".env").exists());
    }

    #[test]
    fn test_bootstrap_non_interactive_without_key() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut nasa = NasaConfig::default();
        assert!(!bootstrap_api_key(&mut nasa, false, &tmp.path().join(".env")));
        assert!(nasa.api_key().is_none());
    }
}
