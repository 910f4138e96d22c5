use std::collections::HashSet;

use crate::compile::program::{MotionProgram, PartMotionData};
use crate::expression::eval::Variables;
use crate::expression::value::{ParamValue, resolve_value};
use crate::foundation::core::{PARAM_COUNT, PartInfo, PartList};
use crate::foundation::error::{KinemaError, KinemaResult};
use crate::matching::infer::{PartCategory, infer_part_category};
use crate::matching::pattern::PartPattern;
use crate::template::model::{
    AttachmentBehavior, PrimitiveSpec, Template, TemplateDefaults, normalize_word,
};
use crate::template::primitive::Primitive;

/// Caller-supplied adjustments applied on top of template defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseOverrides {
    /// Adverb looked up in the template's adverb map.
    #[serde(default)]
    pub adverb: Option<String>,
    /// Explicit speed; wins over defaults and the adverb.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Explicit amplitude scale; wins over defaults and the adverb.
    #[serde(default)]
    pub amplitude_scale: Option<f64>,
}

impl ParseOverrides {
    /// Overrides that only select an adverb.
    pub fn adverb(adverb: impl Into<String>) -> Self {
        Self {
            adverb: Some(adverb.into()),
            ..Self::default()
        }
    }
}

/// Parser configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParserOpts {
    /// Duration (seconds) given to one-shot primitives that declare none.
    #[serde(default = "default_one_shot_duration")]
    pub one_shot_default_duration: f64,
}

impl Default for ParserOpts {
    fn default() -> Self {
        Self {
            one_shot_default_duration: default_one_shot_duration(),
        }
    }
}

fn default_one_shot_duration() -> f64 {
    1.0
}

/// Global multipliers after defaults, adverb and explicit overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Globals {
    /// Speed multiplier.
    pub speed: f64,
    /// Amplitude multiplier.
    pub amplitude_scale: f64,
}

/// Resolve globals: template defaults, then the adverb entry, then explicit overrides.
pub fn resolve_globals(template: &Template, overrides: &ParseOverrides) -> Globals {
    let fallback = TemplateDefaults::default();
    let defaults = template.defaults.as_ref().unwrap_or(&fallback);
    let mut g = Globals {
        speed: defaults.speed,
        amplitude_scale: defaults.amplitude_scale,
    };

    if let Some(adverb) = overrides.adverb.as_deref() {
        let wanted = normalize_word(adverb);
        match defaults
            .adverb_map
            .iter()
            .find(|(k, _)| normalize_word(k) == wanted)
        {
            Some((_, o)) => {
                g.speed = o.speed.unwrap_or(g.speed);
                g.amplitude_scale = o.amplitude_scale.unwrap_or(g.amplitude_scale);
            }
            None => tracing::debug!(adverb, "adverb not in template map; ignored"),
        }
    }

    g.speed = overrides.speed.unwrap_or(g.speed);
    g.amplitude_scale = overrides.amplitude_scale.unwrap_or(g.amplitude_scale);
    g
}

/// Variables visible to parameter formulas.
///
/// Formulas see `speed`, `amplitudeScale`, `index` (position within the rule's matches) and
/// `count` (number of matches).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionVars {
    /// Resolved global speed.
    pub speed: f64,
    /// Resolved global amplitude scale.
    pub amplitude_scale: f64,
    /// 0-based position of the part within its rule's matches.
    pub index: f64,
    /// Number of parts the rule matched.
    pub count: f64,
}

impl Variables for MotionVars {
    fn get_var(&self, name: &str) -> Option<f64> {
        match name {
            "speed" => Some(self.speed),
            "amplitudeScale" => Some(self.amplitude_scale),
            "index" => Some(self.index),
            "count" => Some(self.count),
            _ => None,
        }
    }
}

/// Outcome of resolving which parts a rule applies to.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleTargets<'a> {
    /// The pattern matched part names directly.
    Exact(Vec<&'a PartInfo>),
    /// No direct match; parts of the category inferred from the pattern text, not yet claimed.
    Inferred {
        /// Category derived from the pattern.
        category: PartCategory,
        /// Unclaimed parts of that category.
        parts: Vec<&'a PartInfo>,
    },
    /// Nothing matched; the rule is skipped.
    Skipped,
}

impl<'a> RuleTargets<'a> {
    /// Matched parts in caller order (empty when skipped).
    pub fn parts(&self) -> &[&'a PartInfo] {
        match self {
            Self::Exact(parts) | Self::Inferred { parts, .. } => parts,
            Self::Skipped => &[],
        }
    }
}

/// Step (i): direct pattern match, ignoring earlier claims.
pub fn match_exact<'a>(pattern: &PartPattern, parts: &[&'a PartInfo]) -> Vec<&'a PartInfo> {
    parts
        .iter()
        .copied()
        .filter(|p| pattern.matches(&p.name))
        .collect()
}

/// Step (ii): parts whose inferred category equals the pattern's, excluding claimed ids.
///
/// Returns `None` when the pattern text does not infer a category or no unclaimed part has it.
pub fn match_inferred<'a>(
    pattern: &str,
    parts: &[&'a PartInfo],
    claimed: &HashSet<u32>,
) -> Option<(PartCategory, Vec<&'a PartInfo>)> {
    let category = infer_part_category(pattern)?;
    let found: Vec<&PartInfo> = parts
        .iter()
        .copied()
        .filter(|p| !claimed.contains(&p.id))
        .filter(|p| infer_part_category(&p.name) == Some(category))
        .collect();
    if found.is_empty() {
        None
    } else {
        Some((category, found))
    }
}

/// Run the fallback chain: exact match, then inferred category, then skip.
pub fn resolve_targets<'a>(
    pattern: &PartPattern,
    parts: &[&'a PartInfo],
    claimed: &HashSet<u32>,
) -> RuleTargets<'a> {
    let exact = match_exact(pattern, parts);
    if !exact.is_empty() {
        return RuleTargets::Exact(exact);
    }
    match match_inferred(pattern.as_str(), parts, claimed) {
        Some((category, parts)) => RuleTargets::Inferred { category, parts },
        None => RuleTargets::Skipped,
    }
}

/// Compiles a template against a part list into a [`MotionProgram`].
#[derive(Clone, Debug, Default)]
pub struct TemplateParser {
    opts: ParserOpts,
}

impl TemplateParser {
    /// Create a parser with explicit options.
    pub fn new(opts: ParserOpts) -> Self {
        Self { opts }
    }

    /// Borrow the parser options.
    pub fn opts(&self) -> &ParserOpts {
        &self.opts
    }

    /// Compile `template` for `parts`.
    ///
    /// Unknown primitives and formula errors abort the call; validate templates first. Rules
    /// that match nothing are skipped. Parts whose id cannot be encoded are ignored.
    #[tracing::instrument(skip_all, fields(template = %template.id, parts = parts.len()))]
    pub fn parse(
        &self,
        template: &Template,
        parts: &PartList,
        overrides: &ParseOverrides,
    ) -> KinemaResult<MotionProgram> {
        let globals = resolve_globals(template, overrides);

        let whole = template.whole_body.as_ref().ok_or_else(|| {
            KinemaError::validation(format!("template '{}' has no whole_body", template.id))
        })?;
        let body_vars = MotionVars {
            speed: globals.speed,
            amplitude_scale: globals.amplitude_scale,
            index: 0.0,
            count: parts.len() as f64,
        };
        let whole_body =
            self.resolve_motion(whole, &body_vars, "whole_body", AttachmentBehavior::Uniform)?;

        let mut program = MotionProgram::new(
            whole_body,
            globals.speed as f32,
            globals.amplitude_scale as f32,
        );

        let encodable: Vec<&PartInfo> = parts
            .iter()
            .filter(|p| {
                let ok = p.is_encodable();
                if !ok {
                    tracing::warn!(part = %p.name, id = p.id, "part id cannot be encoded; ignored");
                }
                ok
            })
            .collect();

        let mut claimed: HashSet<u32> = HashSet::new();
        for (i, rule) in template.part_rules.iter().enumerate() {
            let pattern = PartPattern::compile(&rule.pattern)?;
            let targets = resolve_targets(&pattern, &encodable, &claimed);
            match &targets {
                RuleTargets::Exact(found) => tracing::debug!(
                    rule = i,
                    pattern = %rule.pattern,
                    matched = found.len(),
                    "exact match"
                ),
                RuleTargets::Inferred { category, parts } => tracing::debug!(
                    rule = i,
                    pattern = %rule.pattern,
                    ?category,
                    matched = parts.len(),
                    "inferred-category match"
                ),
                RuleTargets::Skipped => {
                    tracing::debug!(
                        rule = i,
                        pattern = %rule.pattern,
                        "no parts matched; rule skipped"
                    );
                    continue;
                }
            }

            let matched = targets.parts();
            let count = matched.len() as f64;
            let ctx = format!("part_rules[{i}]");
            for (index, part) in matched.iter().enumerate() {
                let vars = MotionVars {
                    index: index as f64,
                    count,
                    ..body_vars
                };
                let data =
                    self.resolve_motion(&rule.motion, &vars, &ctx, rule.attachment_behavior)?;
                program.set_part(part.id, data);
                claimed.insert(part.id);
            }
        }

        tracing::debug!(assigned = program.part_count(), "template compiled");
        Ok(program)
    }

    fn resolve_motion(
        &self,
        spec: &PrimitiveSpec,
        vars: &MotionVars,
        ctx: &str,
        attachment: AttachmentBehavior,
    ) -> KinemaResult<PartMotionData> {
        let primitive = Primitive::from_name(&spec.primitive)
            .ok_or_else(|| KinemaError::unknown_primitive(spec.primitive.as_str()))?;

        let mut values = Vec::with_capacity(PARAM_COUNT);
        for (key, value) in spec.params.iter() {
            value
                .resolve_into(vars, &mut values)
                .map_err(|e| KinemaError::expression(format!("{ctx}.params.{key}"), e))?;
        }

        let duration = match &spec.duration {
            Some(v) => scalar(v, vars, ctx, "duration")?.max(0.0),
            None if primitive.is_one_shot() => self.opts.one_shot_default_duration,
            None => 0.0,
        };
        let phase = optional_scalar(spec.phase.as_ref(), vars, ctx, "phase")?;
        let start = optional_scalar(spec.start.as_ref(), vars, ctx, "start")?;

        let mut data = PartMotionData::new(primitive, &values);
        data.duration = duration as f32;
        data.phase = phase as f32;
        data.start_time = start as f32;
        data.attachment = attachment;
        Ok(data)
    }
}

fn scalar(value: &ParamValue, vars: &MotionVars, ctx: &str, field: &str) -> KinemaResult<f64> {
    resolve_value(value, vars)
        .map_err(|e| KinemaError::expression(format!("{ctx}.{field}"), e))
}

fn optional_scalar(
    value: Option<&ParamValue>,
    vars: &MotionVars,
    ctx: &str,
    field: &str,
) -> KinemaResult<f64> {
    value.map_or(Ok(0.0), |v| scalar(v, vars, ctx, field))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/parser.rs"]
mod tests;
