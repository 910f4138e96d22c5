use std::collections::BTreeMap;

use crate::expression::value::{ParamMap, ParamValue};

/// A named motion recipe.
///
/// Templates are pure data: they deserialize from JSON, are checked by
/// [`crate::validate`], and are compiled against a part list by [`crate::TemplateParser`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Template {
    /// Unique template id.
    #[serde(rename = "template_id", default)]
    pub id: String,
    /// Trigger words (verbs) that select this template.
    #[serde(default)]
    pub anchor_verbs: Vec<String>,
    /// Motion applied to the object as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whole_body: Option<PrimitiveSpec>,
    /// Ordered per-part rules; later rules may override earlier explicit matches.
    #[serde(default)]
    pub part_rules: Vec<PartRule>,
    /// Default globals and adverb overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<TemplateDefaults>,
}

/// A primitive assignment with its parameter formulas.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrimitiveSpec {
    /// Primitive name, resolved through [`crate::Primitive::from_name`].
    #[serde(default)]
    pub primitive: String,
    /// Parameters in declaration order; packed positionally into 12 slots.
    #[serde(default)]
    pub params: ParamMap,
    /// Explicit duration in seconds. Absent: 1.0 for one-shot primitives, 0 (loop) otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<ParamValue>,
    /// Phase offset, usually a formula over `index`/`count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<ParamValue>,
    /// Start time in seconds relative to program activation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<ParamValue>,
}

/// A pattern plus the motion applied to every part it selects.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PartRule {
    /// Match pattern: `*` wildcards, alternatives joined with `OR`.
    #[serde(rename = "match", default)]
    pub pattern: String,
    /// Motion for matched parts.
    #[serde(flatten)]
    pub motion: PrimitiveSpec,
    /// How strongly rendering units follow the part.
    #[serde(default)]
    pub attachment_behavior: AttachmentBehavior,
}

/// Attachment falloff of rendering units bound to a part.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentBehavior {
    /// Weight grows with distance from the part root.
    #[default]
    Gradient,
    /// Every unit follows the part fully.
    Uniform,
}

impl AttachmentBehavior {
    /// Attachment weight at normalized distance `t` (0 = part root, 1 = tip).
    pub fn weight(self, t: f32) -> f32 {
        match self {
            Self::Gradient => t.clamp(0.0, 1.0),
            Self::Uniform => 1.0,
        }
    }
}

/// Template-level defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateDefaults {
    /// Global speed multiplier.
    #[serde(default = "default_multiplier")]
    pub speed: f64,
    /// Global amplitude multiplier.
    #[serde(default = "default_multiplier")]
    pub amplitude_scale: f64,
    /// Adverb (`"slowly"`, `"wildly"`) to global overrides.
    #[serde(default)]
    pub adverb_map: BTreeMap<String, AdverbOverride>,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            speed: default_multiplier(),
            amplitude_scale: default_multiplier(),
            adverb_map: BTreeMap::new(),
        }
    }
}

fn default_multiplier() -> f64 {
    1.0
}

/// Values an adverb replaces; absent fields keep the template default.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdverbOverride {
    /// Replacement speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Replacement amplitude scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude_scale: Option<f64>,
}

impl Template {
    /// Trigger words normalized for index lookups (trimmed, lowercase, non-empty).
    pub fn normalized_verbs(&self) -> impl Iterator<Item = String> + '_ {
        self.anchor_verbs
            .iter()
            .map(|w| normalize_word(w))
            .filter(|w| !w.is_empty())
    }
}

pub(crate) fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
