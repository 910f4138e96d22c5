use super::*;

#[test]
fn matching_is_case_insensitive() {
    assert!(matches("HEAD", "head"));
    assert!(matches("head", "HEAD"));
    assert!(matches("Front_Left_Leg", "front_*_leg"));
}

#[test]
fn matching_is_whole_string() {
    assert!(!matches("forehead", "head"));
    assert!(!matches("head_top", "head"));
    assert!(matches("head_top", "head*"));
}

#[test]
fn star_matches_any_run_including_empty() {
    assert!(matches("front__leg", "front_*_leg"));
    assert!(matches("front_left_upper_leg", "front_*_leg"));
    assert!(matches("anything", "*"));
    assert!(matches("", "*"));
    assert!(matches("wing", "*wing*"));
}

#[test]
fn or_combines_alternatives() {
    let p = "front_*_leg OR forelimb*";
    assert!(matches("front_left_leg", p));
    assert!(matches("forelimb_r", p));
    assert!(!matches("back_left_leg", p));
}

#[test]
fn lowercase_or_is_literal_text() {
    // `or` is not the separator; the pattern is the single alternative "left or right".
    assert!(!matches("left", "left or right"));
    assert!(matches("LEFT OR RIGHT", "left or right"));
}

#[test]
fn regex_metacharacters_are_literal() {
    assert!(matches("wing.1", "wing.1"));
    assert!(!matches("wingx1", "wing.1"));
    assert!(matches("arm(l)", "arm(*)"));
}

#[test]
fn validate_rejects_empty_and_empty_branches() {
    assert_eq!(validate_pattern(""), Err(PatternError::Empty));
    assert_eq!(validate_pattern("   "), Err(PatternError::Empty));
    assert!(matches!(
        validate_pattern("head OR"),
        Err(PatternError::EmptyBranch { branch: 1, .. })
    ));
    assert!(matches!(
        validate_pattern("OR tail"),
        Err(PatternError::EmptyBranch { branch: 0, .. })
    ));
    assert!(matches!(
        validate_pattern("a OR  OR b"),
        Err(PatternError::EmptyBranch { branch: 1, .. })
    ));
    assert!(validate_pattern("a OR b").is_ok());
}

#[test]
fn invalid_patterns_match_nothing() {
    assert!(!matches("head", "head OR"));
    assert!(!matches("", ""));
}

#[test]
fn compiled_pattern_keeps_source() {
    let p = PartPattern::compile("tail* OR fin").unwrap();
    assert_eq!(p.as_str(), "tail* OR fin");
    assert!(p.matches("TAIL_TIP"));
    assert!(p.matches("fin"));
    assert!(!p.matches("fins"));
}

#[test]
fn inner_whitespace_is_kept_verbatim() {
    assert!(matches("left  leg", "left  leg"));
    assert!(!matches("left leg", "left  leg"));
    assert!(matches("left  leg", "  left  leg OR tail  "));
    assert!(matches("tail", "  left  leg OR tail  "));
    assert_eq!(alternatives("a  b OR\tc\td"), vec!["a  b", "c\td"]);
    assert_eq!(alternatives("ORCA OR or"), vec!["ORCA", "or"]);
}
