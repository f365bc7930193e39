//! Target listing input
//!
//! One match-page URL per line. Lines are trimmed; anything that does not
//! start with `http` is ignored, and `http`-looking lines that still fail to
//! parse as absolute URLs are dropped with a warning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use crate::errors::{ExtractError, ExtractResult};
use crate::utils::is_valid_url;

/// A validated match-page URL to process
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Target(String);

impl Target {
    /// Wrap `url` if it is an absolute http(s) URL
    #[must_use]
    pub fn parse(url: &str) -> Option<Self> {
        is_valid_url(url).then(|| Self(url.to_string()))
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Target {
    type Error = String;

    fn try_from(url: String) -> Result<Self, Self::Error> {
        if is_valid_url(&url) {
            Ok(Self(url))
        } else {
            Err(format!("not an absolute http(s) URL: {url}"))
        }
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Targets from in-memory listing text, in input order
#[must_use]
pub fn parse_targets(text: &str) -> Vec<Target> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("http"))
        .filter_map(|line| {
            let target = Target::parse(line);
            if target.is_none() {
                warn!("Skipping malformed URL in input: {line}");
            }
            target
        })
        .collect()
}

/// Read and parse the listing at `path`
///
/// # Errors
///
/// `ExtractError::Io` when the file cannot be read.
/// An empty result is not an error here; the orchestrator decides.
pub async fn read_targets(path: &Path) -> ExtractResult<Vec<Target>> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        ExtractError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read URL list {}: {e}", path.display()),
        ))
    })?;

    let targets = parse_targets(&text);
    info!("Loaded {} URLs from {}", targets.len(), path.display());
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_drops_noise() {
        let text = "\
https://app.veo.co/matches/first/

   https://app.veo.co/matches/second/
# comment line
ftp://files.example.com/match
www.veo.co/matches/no-scheme
https://app.veo.co/matches/third/
";
        let urls: Vec<_> = parse_targets(text)
            .into_iter()
            .map(|t| t.url().to_string())
            .collect();

        assert_eq!(
            urls,
            vec![
                "https://app.veo.co/matches/first/",
                "https://app.veo.co/matches/second/",
                "https://app.veo.co/matches/third/",
            ]
        );
    }

    #[test]
    fn http_prefixed_garbage_is_dropped() {
        let targets = parse_targets("httpnotaurl\nhttp://\nhttps://ok.example.com/m/1\n");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].to_string(), "https://ok.example.com/m/1");
    }

    #[test]
    fn empty_listing_yields_nothing() {
        assert!(parse_targets("").is_empty());
        assert!(parse_targets("\n  \n\t\n").is_empty());
    }

    #[test]
    fn deserializing_validates_like_parse() {
        let target: Target = serde_json::from_str(r#""https://app.veo.co/matches/m1/""#).unwrap();
        assert_eq!(target.url(), "https://app.veo.co/matches/m1/");
        assert_eq!(
            serde_json::to_string(&target).unwrap(),
            r#""https://app.veo.co/matches/m1/""#
        );

        assert!(serde_json::from_str::<Target>(r#""not a url""#).is_err());
        assert!(serde_json::from_str::<Target>(r#""ftp://files.example.com/m""#).is_err());
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_targets(&dir.path().join("absent.txt")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
