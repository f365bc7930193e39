//! Compiled extraction rules and the candidates they produce

use regex::Regex;

use crate::config::ExtractionRule;
use crate::errors::{ExtractError, ExtractResult};

pub(crate) fn compile(pattern: &str) -> ExtractResult<Regex> {
    Regex::new(pattern).map_err(|source| ExtractError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) name: String,
    regex: Regex,
}

impl CompiledRule {
    pub(crate) fn new(rule: &ExtractionRule) -> ExtractResult<Self> {
        Ok(Self {
            name: rule.name.clone(),
            regex: compile(&rule.pattern)?,
        })
    }

    /// Every candidate in `markup`, left to right
    ///
    /// Group 1 when the pattern captures, the whole match otherwise.
    pub(crate) fn candidates<'m, 'r>(
        &'r self,
        markup: &'m str,
    ) -> impl Iterator<Item = CandidateMatch<'m, 'r>> {
        let capturing = self.regex.captures_len() > 1;
        self.regex.captures_iter(markup).filter_map(move |caps| {
            let fragment = if capturing { caps.get(1) } else { caps.get(0) };
            fragment.map(|m| CandidateMatch {
                fragment: m.as_str(),
                rule: self,
            })
        })
    }
}

/// A matched fragment and the rule that produced it
#[derive(Debug, Clone, Copy)]
pub(crate) struct CandidateMatch<'m, 'r> {
    pub(crate) fragment: &'m str,
    pub(crate) rule: &'r CompiledRule,
}
