use regex::{Regex, RegexBuilder};

/// Keyword separating alternatives in a match pattern.
pub const OR_KEYWORD: &str = "OR";

/// Reasons a match pattern is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern is empty or whitespace.
    #[error("match pattern is empty")]
    Empty,
    /// An `OR` alternative has no text, e.g. `"head OR"`.
    #[error("match pattern '{pattern}' has an empty OR branch (alternative {branch})")]
    EmptyBranch {
        /// Offending pattern.
        pattern: String,
        /// 0-based alternative index.
        branch: usize,
    },
    /// The compiled expression was rejected by the regex engine.
    #[error("match pattern '{pattern}' cannot be compiled: {message}")]
    Invalid {
        /// Offending pattern.
        pattern: String,
        /// Regex engine message.
        message: String,
    },
}

/// Split a pattern into its `OR` alternatives.
///
/// `OR` separates only as a whole whitespace-delimited word. Each alternative keeps its inner
/// text verbatim and is trimmed at the ends; an empty one is kept so validation can report it.
fn alternatives(pattern: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut branch_start = 0;
    for (start, word) in words(pattern) {
        if word == OR_KEYWORD {
            out.push(pattern[branch_start..start].trim());
            branch_start = start + word.len();
        }
    }
    out.push(pattern[branch_start..].trim());
    out
}

/// Whitespace-separated words with their byte offsets.
fn words(s: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() {
            if let Some(st) = start.take() {
                out.push((st, &s[st..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(st) = start {
        out.push((st, &s[st..]));
    }
    out
}

/// Check pattern syntax without compiling it.
pub fn validate_pattern(pattern: &str) -> Result<(), PatternError> {
    if pattern.trim().is_empty() {
        return Err(PatternError::Empty);
    }
    for (branch, alt) in alternatives(pattern).iter().enumerate() {
        if alt.is_empty() {
            return Err(PatternError::EmptyBranch {
                pattern: pattern.to_owned(),
                branch,
            });
        }
    }
    Ok(())
}

fn wildcard_regex(alt: &str) -> String {
    let body = alt
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("^{body}$")
}

/// A compiled match pattern: one anchored, case-insensitive regex per alternative.
#[derive(Debug, Clone)]
pub struct PartPattern {
    source: String,
    alternatives: Vec<Regex>,
}

impl PartPattern {
    /// Validate and compile `pattern`.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        validate_pattern(pattern)?;
        let alternatives = alternatives(pattern)
            .iter()
            .map(|alt| {
                RegexBuilder::new(&wildcard_regex(alt))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| PatternError::Invalid {
                        pattern: pattern.to_owned(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source: pattern.to_owned(),
            alternatives,
        })
    }

    /// Whole-name, case-insensitive match against any alternative.
    pub fn matches(&self, name: &str) -> bool {
        self.alternatives.iter().any(|re| re.is_match(name))
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// One-off match of `name` against `pattern`. Invalid patterns match nothing.
pub fn matches(name: &str, pattern: &str) -> bool {
    PartPattern::compile(pattern).is_ok_and(|p| p.matches(name))
}

#[cfg(test)]
#[path = "../../tests/unit/matching/pattern.rs"]
mod tests;
