//! In-place editing of `.env` files.
//!
//! Only lines starting with `KEY=` are touched; every other line, including
//! comments and its original line ending, is written back byte for byte.

use log::{debug, warn};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Error, Debug)]
pub enum EnvFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUpdate {
    /// Number of existing lines rewritten.
    Replaced(usize),
    /// The key was missing and a new line was added at the end.
    Appended,
}

/// Loads `path` into the process environment. A missing file is not an error.
///
/// Variables already set in the environment win. Malformed lines are skipped
/// so keys after them still load.
pub fn load_into_env(path: &Path) -> bool {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("could not load {}: {}", path.display(), e);
            return false;
        }
    };

    let mut loaded = 0;
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                if env::var_os(&key).is_none() {
                    env::set_var(&key, value);
                    loaded += 1;
                }
            }
            Err(e) => warn!("skipping line in {}: {}", path.display(), e),
        }
    }

    debug!("loaded {} variables from {}", loaded, path.display());
    true
}

pub fn set_key(contents: &str, key: &str, value: &str) -> (String, KeyUpdate) {
    let prefix = format!("{}=", key);
    let mut output = String::with_capacity(contents.len() + value.len());
    let mut replaced = 0;

    for line in contents.split_inclusive('\n') {
        if line.starts_with(&prefix) {
            output.push_str(&format!("{}{}\n", prefix, value));
            replaced += 1;
        } else {
            output.push_str(line);
        }
    }

    if replaced > 0 {
        return (output, KeyUpdate::Replaced(replaced));
    }

    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(&format!("{}{}\n", prefix, value));
    (output, KeyUpdate::Appended)
}

pub fn update_env_file(path: &Path, key: &str, value: &str) -> Result<KeyUpdate, EnvFileError> {
    let contents = fs::read_to_string(path)?;
    let (updated, outcome) = set_key(&contents, key, value);
    fs::write(path, updated)?;

    debug!("{:?} {} in {}", outcome, key, path.display());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_only_matching_line() {
        let contents = "CLIENT_ID=abc\r\n# comment\nYOUTUBE_ACCESS_TOKEN=old\nYOUTUBE_API_KEY=k\n";
        let (updated, outcome) = set_key(contents, "YOUTUBE_ACCESS_TOKEN", "new");

        assert_eq!(outcome, KeyUpdate::Replaced(1));
        assert_eq!(
            updated,
            "CLIENT_ID=abc\r\n# comment\nYOUTUBE_ACCESS_TOKEN=new\nYOUTUBE_API_KEY=k\n"
        );
    }

    #[test]
    fn test_prefix_must_include_equals() {
        let contents = "YOUTUBE_ACCESS_TOKEN_OLD=x\nYOUTUBE_ACCESS_TOKEN=y";
        let (updated, outcome) = set_key(contents, "YOUTUBE_ACCESS_TOKEN", "z");

        assert_eq!(outcome, KeyUpdate::Replaced(1));
        assert_eq!(updated, "YOUTUBE_ACCESS_TOKEN_OLD=x\nYOUTUBE_ACCESS_TOKEN=z\n");
    }

    #[test]
    fn test_indented_line_is_not_matched() {
        let (updated, outcome) = set_key("  KEY=1\n", "KEY", "2");
        assert_eq!(outcome, KeyUpdate::Appended);
        assert_eq!(updated, "  KEY=1\nKEY=2\n");
    }

    #[test]
    fn test_appends_missing_key() {
        let (updated, outcome) = set_key("A=1", "B", "2");
        assert_eq!(outcome, KeyUpdate::Appended);
        assert_eq!(updated, "A=1\nB=2\n");

        let (updated, _) = set_key("", "B", "2");
        assert_eq!(updated, "B=2\n");
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "BRAND_TOOLS_LOAD_FIRST=one\nthis line is not valid\nBRAND_TOOLS_LOAD_SECOND=two\n",
        )
        .unwrap();

        assert!(load_into_env(&path));
        assert_eq!(env::var("BRAND_TOOLS_LOAD_FIRST").unwrap(), "one");
        assert_eq!(env::var("BRAND_TOOLS_LOAD_SECOND").unwrap(), "two");
    }

    #[test]
    fn test_load_keeps_existing_variables() {
        env::set_var("BRAND_TOOLS_LOAD_EXISTING", "from-shell");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "BRAND_TOOLS_LOAD_EXISTING=from-file\n").unwrap();

        assert!(load_into_env(&path));
        assert_eq!(env::var("BRAND_TOOLS_LOAD_EXISTING").unwrap(), "from-shell");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_into_env(&dir.path().join(".env")));
    }
}
