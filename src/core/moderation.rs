// content moderation - gates user input and redacts model output
// matching is plain substring, no word boundaries, so "kill" also hits "skill"

use crate::Error;
use regex::{NoExpand, Regex, RegexBuilder};
use std::path::Path;

/// Terms that block input and get redacted from output.
pub const BANNED_TERMS: &[&str] = &[
    "kill", "murder", "hack", "bomb", "exploit", "steal", "drug", "weapon", "terror", "abuse",
    "scam", "fraud", "suicide", "self-harm", "violence", "illegal",
];

/// Request phrasings that escalate an input which also carries a banned term.
pub const SENSITIVE_PATTERNS: &[&str] = &[
    "how to make",
    "how do i",
    "teach me to",
    "help me",
    "instructions for",
    "guide to",
    "steps to",
];

/// What a banned term is replaced with in model output.
pub const REDACTED: &str = "[REDACTED]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub safe: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redaction {
    pub text: String,
    pub modified: bool,
}

#[derive(Debug, Clone)]
struct Term {
    text: String,
    pattern: Regex,
}

/// Holds a fixed vocabulary and applies it to both sides of a chat turn.
///
/// The term and pattern lists never change after construction, so one
/// instance can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct ModerationSystem {
    terms: Vec<Term>,
    patterns: Vec<String>,
}

impl ModerationSystem {
    /// Build from the given banned terms and the built-in sensitive patterns.
    pub fn new<I, S>(terms: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_patterns(terms, SENSITIVE_PATTERNS)
    }

    /// Build from the built-in vocabulary.
    pub fn standard() -> Result<Self, Error> {
        Self::new(BANNED_TERMS)
    }

    /// Build from the given banned terms and sensitive patterns.
    pub fn with_patterns<I, S, P, T>(terms: I, patterns: P) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| -> Result<Term, Error> {
                let text = t.as_ref().to_lowercase();
                // an empty term would match between every character
                if text.is_empty() {
                    return Err(Error::EmptyTerm);
                }
                let pattern = RegexBuilder::new(&regex::escape(&text))
                    .case_insensitive(true)
                    .build()?;
                Ok(Term { text, pattern })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().to_lowercase())
            .collect();

        Ok(Self { terms, patterns })
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.text.as_str())
    }

    /// Decide whether `text` may be sent to the model. First matching term wins.
    pub fn check_input(&self, text: &str) -> Verdict {
        let lower = text.to_lowercase();

        if let Some(term) = self.find_term(&lower) {
            return Verdict {
                safe: false,
                reason: format!("Input contains prohibited content: '{term}'"),
            };
        }

        // pattern + term escalation. unreachable while the pass above scans
        // the same normalized text with the same terms
        for pattern in &self.patterns {
            if lower.contains(pattern.as_str()) && self.find_term(&lower).is_some() {
                return Verdict {
                    safe: false,
                    reason: "Input contains potentially harmful request".to_string(),
                };
            }
        }

        Verdict {
            safe: true,
            reason: "Input passed moderation".to_string(),
        }
    }

    /// Replace every case-insensitive occurrence of each banned term with
    /// [`REDACTED`], term by term, each pass working on the previous result.
    pub fn moderate_output(&self, text: &str) -> Redaction {
        let mut text = text.to_string();
        let mut modified = false;

        for term in &self.terms {
            if term.pattern.is_match(&text) {
                text = term.pattern.replace_all(&text, NoExpand(REDACTED)).into_owned();
                modified = true;
            }
        }

        Redaction { text, modified }
    }

    fn find_term(&self, lower: &str) -> Option<&str> {
        self.terms
            .iter()
            .map(|t| t.text.as_str())
            .find(|t| lower.contains(t))
    }
}

/// Read a vocabulary file: one term per line, blank lines and `#` comments skipped.
pub fn load_terms(path: &Path) -> Result<Vec<String>, Error> {
    let content = std::fs::read_to_string(path)?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}
