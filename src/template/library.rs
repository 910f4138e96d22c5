use std::collections::{BTreeMap, HashMap};

use crate::foundation::error::{KinemaError, KinemaResult};
use crate::foundation::issue::{Issue, PathElem};
use crate::template::model::{Template, normalize_word};
use crate::template::validate::validate;

/// Validated templates keyed by id, plus a trigger-word index.
///
/// Loading is tolerant: a template with validation errors is skipped and reported, the rest of
/// the batch still loads.
#[derive(Debug, Default, Clone)]
pub struct TemplateLibrary {
    templates: HashMap<String, Template>,
    word_index: BTreeMap<String, String>,
}

impl TemplateLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a batch of templates, returning every issue found.
    ///
    /// Templates with at least one error are skipped. Trigger words from later templates
    /// overwrite earlier ones (reported as a warning). Re-loading an id replaces the stored
    /// template and drops its previous trigger words.
    #[tracing::instrument(skip_all, fields(count = templates.len()))]
    pub fn load(&mut self, templates: Vec<Template>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut loaded = 0usize;

        for (i, template) in templates.into_iter().enumerate() {
            let found = validate(&template);
            let failed = found.iter().any(Issue::is_error);
            issues.extend(found);
            if failed {
                tracing::warn!(
                    index = i,
                    template = %template.id,
                    "skipping template with validation errors"
                );
                continue;
            }
            self.insert(i, template, &mut issues);
            loaded += 1;
        }

        tracing::debug!(loaded, total = self.templates.len(), "template batch loaded");
        issues
    }

    /// Parse a JSON array of templates and load it.
    ///
    /// Entries that do not deserialize are reported as errors at `$[i]` and skipped. Input that
    /// is not a JSON array fails outright.
    pub fn load_json(&mut self, json: &str) -> KinemaResult<Vec<Issue>> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| KinemaError::serde(format!("template batch must be a JSON array: {e}")))?;

        let mut issues = Vec::new();
        let mut valid = Vec::with_capacity(raw.len());
        let mut positions = Vec::with_capacity(raw.len());
        for (i, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<Template>(value) {
                Ok(t) => {
                    valid.push(t);
                    positions.push(i);
                }
                Err(e) => {
                    tracing::warn!(index = i, error = %e, "skipping undecodable template");
                    issues.push(Issue::error(None, &[PathElem::Index(i)], e.to_string()));
                }
            }
        }

        // Re-anchor batch positions so paths refer to the original array.
        let mut loaded = self.load(valid);
        for issue in &mut loaded {
            remap_batch_index(issue, &positions);
        }
        issues.extend(loaded);
        Ok(issues)
    }

    fn insert(&mut self, index: usize, template: Template, issues: &mut Vec<Issue>) {
        if self.templates.contains_key(&template.id) {
            tracing::debug!(template = %template.id, "replacing template");
            self.word_index.retain(|_, owner| *owner != template.id);
        }

        for word in template.normalized_verbs() {
            if let Some(prev) = self.word_index.insert(word.clone(), template.id.clone())
                && prev != template.id
            {
                issues.push(Issue::warning(
                    Some(template.id.as_str()),
                    &[PathElem::Index(index), PathElem::Field("anchor_verbs")],
                    format!("trigger word '{word}' reassigned from template '{prev}'"),
                ));
            }
        }

        self.templates.insert(template.id.clone(), template);
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    /// Look up the template id a trigger word selects (case-insensitive).
    pub fn id_for_word(&self, word: &str) -> Option<&str> {
        self.word_index.get(&normalize_word(word)).map(String::as_str)
    }

    /// Look up the template a trigger word selects.
    pub fn template_for_word(&self, word: &str) -> Option<&Template> {
        self.id_for_word(word).and_then(|id| self.get(id))
    }

    /// Snapshot of the word → template id index.
    pub fn trigger_words(&self) -> BTreeMap<String, String> {
        self.word_index.clone()
    }

    /// Stored template ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of stored templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Return `true` when no templates are stored.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Drop every template and trigger word.
    pub fn clear(&mut self) {
        self.templates.clear();
        self.word_index.clear();
    }
}

fn remap_batch_index(issue: &mut Issue, positions: &[usize]) {
    // Batch-level paths produced by `insert` start with `$[i]`.
    let Some(rest) = issue.path.strip_prefix("$[") else {
        return;
    };
    let Some((num, tail)) = rest.split_once(']') else {
        return;
    };
    if let Ok(i) = num.parse::<usize>()
        && let Some(orig) = positions.get(i)
    {
        issue.path = format!("$[{orig}]{tail}");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/library.rs"]
mod tests;
