use super::*;

const GALLOP: &str = r#"{
  "template_id": "gallop",
  "anchor_verbs": ["gallop", "Run "],
  "whole_body": {"primitive": "bob", "params": {"amp": "{{0.1*amplitudeScale}}", "freq": 2}},
  "part_rules": [
    {"match": "front_*_leg OR forelimb*", "primitive": "oscillate",
     "params": {"axis": [1, 0, 0], "amp": 0.4}, "phase": "{{index*0.5}}"},
    {"match": "tail", "primitive": "sway", "params": {}, "attachment_behavior": "uniform"}
  ],
  "defaults": {"speed": 1.5, "adverb_map": {"slowly": {"speed": 0.5}}}
}"#;

#[test]
fn deserializes_full_schema() {
    let t: Template = serde_json::from_str(GALLOP).unwrap();
    assert_eq!(t.id, "gallop");
    let body = t.whole_body.as_ref().unwrap();
    assert_eq!(body.primitive, "bob");
    assert_eq!(body.params.len(), 2);

    assert_eq!(t.part_rules.len(), 2);
    let legs = &t.part_rules[0];
    assert_eq!(legs.pattern, "front_*_leg OR forelimb*");
    assert_eq!(legs.motion.primitive, "oscillate");
    assert_eq!(legs.motion.phase, Some(ParamValue::from("{{index*0.5}}")));
    assert_eq!(legs.attachment_behavior, AttachmentBehavior::Gradient);
    assert_eq!(t.part_rules[1].attachment_behavior, AttachmentBehavior::Uniform);

    let d = t.defaults.as_ref().unwrap();
    assert_eq!(d.speed, 1.5);
    assert_eq!(d.amplitude_scale, 1.0);
    assert_eq!(d.adverb_map["slowly"].speed, Some(0.5));
    assert_eq!(d.adverb_map["slowly"].amplitude_scale, None);
}

#[test]
fn missing_sections_default_to_empty() {
    let t: Template = serde_json::from_str("{}").unwrap();
    assert!(t.id.is_empty());
    assert!(t.whole_body.is_none());
    assert!(t.part_rules.is_empty());
    assert!(t.defaults.is_none());
}

#[test]
fn normalized_verbs_trim_and_lowercase() {
    let t: Template = serde_json::from_str(GALLOP).unwrap();
    let verbs: Vec<String> = t.normalized_verbs().collect();
    assert_eq!(verbs, vec!["gallop".to_owned(), "run".to_owned()]);
}

#[test]
fn attachment_weights() {
    assert_eq!(AttachmentBehavior::Gradient.weight(0.25), 0.25);
    assert_eq!(AttachmentBehavior::Gradient.weight(3.0), 1.0);
    assert_eq!(AttachmentBehavior::Uniform.weight(0.0), 1.0);
}

#[test]
fn serializes_back_to_schema_field_names() {
    let t: Template = serde_json::from_str(GALLOP).unwrap();
    let v = serde_json::to_value(&t).unwrap();
    assert_eq!(v["template_id"], "gallop");
    assert_eq!(v["part_rules"][0]["match"], "front_*_leg OR forelimb*");
    assert_eq!(v["part_rules"][0]["primitive"], "oscillate");
}
