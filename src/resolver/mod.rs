//! Video URL resolution from rendered page markup
//!
//! Markup is treated as opaque text. Rules run in priority order and the
//! first rule yielding an *accepted* candidate wins:
//!
//! 1. a candidate containing the asset-file marker is accepted, joined
//!    against the CDN base when it is relative;
//! 2. a candidate merely on the CDN host must also carry a UUID-shaped path
//!    segment, which screens out thumbnails and other assets on that host;
//! 3. anything else is rejected.
//!
//! When no rule succeeds, a generic `.mp4` scan collects a few near misses
//! for the log. They are never returned as the result.

mod rules;

use regex::Regex;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::errors::ExtractResult;
use crate::utils::join_url;
use rules::{CandidateMatch, CompiledRule, compile};

/// Outcome of resolving one page's markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `url` was accepted from a candidate produced by rule `rule`
    Resolved { url: String, rule: String },
    /// No rule produced an accepted candidate
    Unresolved { near_misses: Vec<String> },
}

impl Resolution {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Resolution::Resolved { url, .. } => Some(url),
            Resolution::Unresolved { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PatternResolver {
    rules: Vec<CompiledRule>,
    uuid_segment: Regex,
    near_miss: Regex,
    cdn_base: String,
    cdn_host_marker: String,
    asset_file_marker: String,
    max_near_misses: usize,
}

impl PatternResolver {
    /// Compile every pattern in `config` once
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidPattern` for the first pattern that
    /// does not compile.
    pub fn new(config: &ResolverConfig) -> ExtractResult<Self> {
        let rules = config
            .rules
            .iter()
            .map(CompiledRule::new)
            .collect::<ExtractResult<Vec<_>>>()?;

        Ok(Self {
            rules,
            uuid_segment: compile(&config.uuid_segment_pattern)?,
            near_miss: compile(&config.near_miss_pattern)?,
            cdn_base: config.cdn_base.clone(),
            cdn_host_marker: config.cdn_host_marker.clone(),
            asset_file_marker: config.asset_file_marker.clone(),
            max_near_misses: config.max_near_misses,
        })
    }

    /// The accepted video URL in `markup`, if any
    #[must_use]
    pub fn resolve(&self, markup: &str) -> Option<String> {
        self.first_accepted(markup).map(|(url, _)| url)
    }

    /// Like `resolve`, but reports the winning rule or the near misses
    #[must_use]
    pub fn resolve_detailed(&self, markup: &str) -> Resolution {
        match self.first_accepted(markup) {
            Some((url, rule)) => {
                info!("Found video URL with rule: {rule}");
                Resolution::Resolved { url, rule }
            }
            None => {
                debug!("No video URL rule matched the page markup");
                Resolution::Unresolved {
                    near_misses: self.near_misses(markup),
                }
            }
        }
    }

    /// Up to `max_near_misses` generic `.mp4` URLs in `markup`, for diagnostics
    #[must_use]
    pub fn near_misses(&self, markup: &str) -> Vec<String> {
        self.near_miss
            .find_iter(markup)
            .take(self.max_near_misses)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// First accepted `(url, rule)` in rule priority order
    fn first_accepted(&self, markup: &str) -> Option<(String, String)> {
        self.rules
            .iter()
            .find_map(|rule| rule.candidates(markup).find_map(|c| self.accept(c)))
    }

    fn accept(&self, candidate: CandidateMatch<'_, '_>) -> Option<(String, String)> {
        let fragment = candidate.fragment;
        let rule = &candidate.rule.name;

        if fragment.contains(&self.asset_file_marker) {
            if fragment.starts_with("http") {
                return Some((fragment.to_string(), rule.clone()));
            }
            return match join_url(&self.cdn_base, fragment) {
                Ok(joined) => Some((joined, rule.clone())),
                Err(e) => {
                    debug!("Skipping candidate {fragment} from rule {rule}: {e}");
                    None
                }
            };
        }

        if fragment.contains(&self.cdn_host_marker) && self.uuid_segment.is_match(fragment) {
            return Some((fragment.to_string(), rule.clone()));
        }

        None
    }
}

impl Default for PatternResolver {
    fn default() -> Self {
        // Built-in patterns are constants; compilation cannot fail
        Self::new(&ResolverConfig::default())
            .unwrap_or_else(|e| unreachable!("built-in resolver patterns must compile: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionRule;

    const MATCH_UUID: &str = "3f2b9c1e-8a4d-4e6f-9b21-0c5d7e8f9a10";

    fn resolver() -> PatternResolver {
        PatternResolver::default()
    }

    #[test]
    fn direct_asset_url_returned_unchanged() {
        let url = format!("https://c.veocdn.com/{MATCH_UUID}/standard/machine/abc123/video.mp4");
        let markup = format!(r#"<video><source src="{url}"></video>"#);

        let resolution = resolver().resolve_detailed(&markup);
        assert_eq!(
            resolution,
            Resolution::Resolved {
                url: url.clone(),
                rule: "direct-asset".into(),
            }
        );
        assert_eq!(resolver().resolve(&markup), Some(url));
    }

    #[test]
    fn relative_attribute_joined_against_cdn() {
        let markup = r#"<div data-video-url="/abc/video.mp4"></div>"#;
        assert_eq!(
            resolver().resolve(markup).as_deref(),
            Some("https://c.veocdn.com/abc/video.mp4")
        );
    }

    #[test]
    fn relative_join_normalizes_like_a_browser() {
        // Url::join percent-encodes spaces and treats backslashes as separators
        assert_eq!(
            resolver().resolve(r#"data-video-url="/a b/video.mp4""#).as_deref(),
            Some("https://c.veocdn.com/a%20b/video.mp4")
        );
        assert_eq!(
            resolver().resolve(r#"data-video-url="/a\b/video.mp4""#).as_deref(),
            Some("https://c.veocdn.com/a/b/video.mp4")
        );
    }

    #[test]
    fn cdn_reference_with_uuid_segment_accepted() {
        let url = format!("https://c.veocdn.com/{MATCH_UUID}/standard/stream.m3u8");
        let markup = format!(r#"{{"url":"{url}"}}"#);

        let resolution = resolver().resolve_detailed(&markup);
        assert_eq!(resolution.url(), Some(url.as_str()));
        assert!(matches!(resolution, Resolution::Resolved { ref rule, .. } if rule == "json-url"));
    }

    #[test]
    fn cdn_reference_without_uuid_rejected() {
        let markup = r#"<img src="https://c.veocdn.com/thumbnails/poster.jpg">
            <a href="https://cdn.example.com/highlights/clip.mp4?t=3">clip</a>"#;

        match resolver().resolve_detailed(markup) {
            Resolution::Unresolved { near_misses } => {
                assert_eq!(
                    near_misses,
                    vec!["https://cdn.example.com/highlights/clip.mp4?t=3".to_string()]
                );
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn uppercase_uuid_does_not_count() {
        let markup = r#"src="https://c.veocdn.com/3F2B9C1E-8A4D-4E6F-9B21-0C5D7E8F9A10/poster.jpg""#;
        assert_eq!(resolver().resolve(markup), None);
    }

    #[test]
    fn higher_priority_rule_wins_even_if_later_in_markup() {
        let direct = format!("https://c.veocdn.com/{MATCH_UUID}/standard/machine/m1/video.mp4");
        let markup = format!(
            r#"<div data-video-url="/early/video.mp4"></div><p>{direct}</p>"#
        );

        assert_eq!(resolver().resolve(&markup), Some(direct));
    }

    #[test]
    fn rejected_candidates_fall_through_to_next_rule() {
        // data-video-url yields a non-CDN value, so video-src gets its turn
        let markup = r#"<div data-video-url="about:blank"></div><div video-src="/x/video.mp4"></div>"#;

        let resolution = resolver().resolve_detailed(markup);
        assert_eq!(resolution.url(), Some("https://c.veocdn.com/x/video.mp4"));
        assert!(matches!(resolution, Resolution::Resolved { ref rule, .. } if rule == "video-src"));
    }

    #[test]
    fn within_a_rule_later_candidate_can_be_accepted() {
        let markup = r#"<i data-video-url="/poster.jpg"></i><i data-video-url="/m/video.mp4"></i>"#;
        assert_eq!(
            resolver().resolve(markup).as_deref(),
            Some("https://c.veocdn.com/m/video.mp4")
        );
    }

    #[test]
    fn near_misses_capped_at_three() {
        let markup = (1..=5)
            .map(|i| format!(r#"<a href="https://media.example.org/clip{i}.mp4">"#))
            .collect::<String>();

        match resolver().resolve_detailed(&markup) {
            Resolution::Unresolved { near_misses } => {
                assert_eq!(near_misses.len(), 3);
                assert_eq!(near_misses[0], "https://media.example.org/clip1.mp4");
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn empty_markup_resolves_to_nothing() {
        assert_eq!(
            resolver().resolve_detailed(""),
            Resolution::Unresolved {
                near_misses: Vec::new()
            }
        );
    }

    #[test]
    fn synthetic_rule_set() {
        let config = ResolverConfig {
            rules: vec![ExtractionRule::new("player", r#"player-src='([^']+)'"#)],
            ..ResolverConfig::default()
        };
        let resolver = PatternResolver::new(&config).unwrap();

        assert_eq!(
            resolver.resolve("<x player-src='clips/video.mp4'>").as_deref(),
            Some("https://c.veocdn.com/clips/video.mp4")
        );
        // The default rules are gone
        assert_eq!(resolver.resolve(r#"data-video-url="/a/video.mp4""#), None);
    }

    #[test]
    fn invalid_rule_rejected_at_construction() {
        let config = ResolverConfig {
            rules: vec![ExtractionRule::new("broken", "data-video-url=\"(")],
            ..ResolverConfig::default()
        };
        assert!(PatternResolver::new(&config).is_err());
    }
}
