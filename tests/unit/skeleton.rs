use super::*;

#[test]
fn nouns_resolve_case_insensitively() {
    assert_eq!(skeleton_for("horse").kind, "quadruped");
    assert_eq!(skeleton_for("  Horse ").kind, "quadruped");
    assert_eq!(skeleton_for("EAGLE").kind, "bird");
    assert_eq!(skeleton_for("helicopter").kind, "aircraft");
}

#[test]
fn unknown_and_empty_nouns_fall_back_to_default() {
    for noun in ["teapot", "", "   "] {
        let p = skeleton_for(noun);
        assert_eq!(p.kind, DEFAULT_KIND);
        assert_eq!(p.part_names, &["body"]);
    }
}

#[test]
fn part_list_assigns_ids_in_order() {
    let parts = skeleton_for("dog").part_list();
    assert_eq!(parts.len(), 6);
    let ids: Vec<u32> = parts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(parts.get(3).unwrap().name, "front_legs");
    assert!(parts.validate().is_empty());
}

#[test]
fn presets_are_unique_and_fit_the_buffer() {
    let all = presets();
    assert_eq!(all.len(), 11);
    assert_eq!(all.last().unwrap().kind, DEFAULT_KIND);
    for p in all {
        assert!(p.num_parts() >= 1);
        assert!(p.num_parts() <= crate::foundation::core::MAX_PARTS);
        assert_eq!(preset(p.kind), Some(p));
    }

    let mut seen = std::collections::HashSet::new();
    for noun in all.iter().flat_map(|p| p.nouns) {
        assert!(seen.insert(*noun), "noun '{noun}' listed twice");
    }
}

#[test]
fn fallback_is_the_named_default_preset() {
    let fallback = skeleton_for("teapot");
    assert_eq!(Some(fallback), preset(DEFAULT_KIND));
    assert!(fallback.nouns.is_empty());
}
