use std::collections::BTreeMap;

use crate::foundation::issue::{Issue, PathElem};
use crate::matching::pattern::validate_pattern;
use crate::template::model::{PrimitiveSpec, Template};
use crate::template::primitive::Primitive;

/// Check one template's structure and references.
///
/// Errors: missing id, missing whole-body spec, missing or unknown primitive names, malformed
/// match patterns. Warnings: no trigger words, no defaults section, negative multipliers.
pub fn validate(template: &Template) -> Vec<Issue> {
    let mut issues = Vec::new();
    let id = Some(template.id.as_str());

    if template.id.trim().is_empty() {
        issues.push(Issue::error(
            id,
            &[PathElem::Field("template_id")],
            "template_id is required",
        ));
    }

    match &template.whole_body {
        Some(spec) => check_primitive(id, spec, &[PathElem::Field("whole_body")], &mut issues),
        None => issues.push(Issue::error(
            id,
            &[PathElem::Field("whole_body")],
            "whole_body motion is required",
        )),
    }

    for (i, rule) in template.part_rules.iter().enumerate() {
        let base = [PathElem::Field("part_rules"), PathElem::Index(i)];
        if let Err(e) = validate_pattern(&rule.pattern) {
            let mut path = base.to_vec();
            path.push(PathElem::Field("match"));
            issues.push(Issue::error(id, &path, e.to_string()));
        }
        check_primitive(id, &rule.motion, &base, &mut issues);
    }

    if template.normalized_verbs().next().is_none() {
        issues.push(Issue::warning(
            id,
            &[PathElem::Field("anchor_verbs")],
            "no trigger words; template is reachable by id only",
        ));
    }

    match &template.defaults {
        Some(defaults) => {
            let base = [PathElem::Field("defaults")];
            check_multiplier(id, &base, "speed", Some(defaults.speed), &mut issues);
            check_multiplier(
                id,
                &base,
                "amplitude_scale",
                Some(defaults.amplitude_scale),
                &mut issues,
            );
            for (adverb, o) in &defaults.adverb_map {
                let base = [
                    PathElem::Field("defaults"),
                    PathElem::Field("adverb_map"),
                    PathElem::Key(adverb.clone()),
                ];
                check_multiplier(id, &base, "speed", o.speed, &mut issues);
                check_multiplier(id, &base, "amplitude_scale", o.amplitude_scale, &mut issues);
            }
        }
        None => issues.push(Issue::warning(
            id,
            &[PathElem::Field("defaults")],
            "no defaults section; speed and amplitude default to 1.0",
        )),
    }

    issues
}

fn check_multiplier(
    id: Option<&str>,
    base: &[PathElem],
    field: &'static str,
    value: Option<f64>,
    issues: &mut Vec<Issue>,
) {
    let Some(v) = value else {
        return;
    };
    if !v.is_finite() || v < 0.0 {
        let mut path = base.to_vec();
        path.push(PathElem::Field(field));
        issues.push(Issue::warning(
            id,
            &path,
            format!("{field} should be a finite, non-negative multiplier (got {v})"),
        ));
    }
}

fn check_primitive(
    id: Option<&str>,
    spec: &PrimitiveSpec,
    base: &[PathElem],
    issues: &mut Vec<Issue>,
) {
    let mut path = base.to_vec();
    path.push(PathElem::Field("primitive"));
    if spec.primitive.trim().is_empty() {
        issues.push(Issue::error(id, &path, "primitive name is required"));
    } else if Primitive::from_name(&spec.primitive).is_none() {
        issues.push(Issue::error(
            id,
            &path,
            format!("unknown primitive '{}'", spec.primitive),
        ));
    }
}

/// Validate a batch and additionally warn about trigger words claimed by several templates.
///
/// The later template wins a collision, matching [`crate::TemplateLibrary::load`].
pub fn validate_batch(templates: &[Template]) -> Vec<Issue> {
    let mut issues: Vec<Issue> = templates.iter().flat_map(validate).collect();

    let mut owners: BTreeMap<String, &str> = BTreeMap::new();
    for (i, t) in templates.iter().enumerate() {
        for word in t.normalized_verbs() {
            if let Some(prev) = owners.insert(word.clone(), t.id.as_str())
                && prev != t.id
            {
                issues.push(Issue::warning(
                    Some(t.id.as_str()),
                    &[PathElem::Index(i), PathElem::Field("anchor_verbs")],
                    format!("trigger word '{word}' also used by template '{prev}'"),
                ));
            }
        }
    }

    issues
}

#[cfg(test)]
#[path = "../../tests/unit/template/validate.rs"]
mod tests;
