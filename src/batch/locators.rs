//! Locator list reading

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Locator list used when none is given
pub const DEFAULT_LOCATOR_FILE: &str = "urls.txt";

/// Error type for reading a locator list
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The list file does not exist
    #[error("Locator file not found: {}", path.display())]
    Missing { path: PathBuf },

    /// The list file could not be read
    #[error("Failed to read locator file {}: {source}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },

    /// The list holds no locators
    #[error("No locators found in {}", path.display())]
    Empty { path: PathBuf },
}

/// Extract locators from list text.
///
/// One locator per line; surrounding whitespace is trimmed, blank lines and lines whose
/// first non-whitespace character is `#` are skipped. Input order is kept.
pub fn parse_locators(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Read the locator list at `path`
pub async fn read_locators(path: &Path) -> Result<Vec<String>, LocatorError> {
    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LocatorError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(LocatorError::Unreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let locators = parse_locators(&text);
    if locators.is_empty() {
        return Err(LocatorError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(locators)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let text = "https://example.com/a\n\n# https://example.com/b\n";
        assert_eq!(parse_locators(text), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_keeps_order_and_trims() {
        let text = "  https://example.com/2  \r\n\t# note\n   \nhttps://example.com/1\n";
        assert_eq!(
            parse_locators(text),
            vec!["https://example.com/2", "https://example.com/1"]
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = read_locators(Path::new("/no/such/urls.txt")).await;
        assert!(matches!(result, Err(LocatorError::Missing { .. })));
    }

    #[tokio::test]
    async fn test_file_with_only_comments_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "# nothing here\n\n   \n").unwrap();

        let result = read_locators(&path).await;
        assert!(matches!(result, Err(LocatorError::Empty { .. })));
    }

    #[tokio::test]
    async fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "https://example.com/a\n\n# https://example.com/b\n").unwrap();

        let locators = read_locators(&path).await.unwrap();
        assert_eq!(locators, vec!["https://example.com/a"]);
    }
}
