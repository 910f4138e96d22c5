use super::*;

#[test]
fn from_names_assigns_sequential_ids() {
    let parts = PartList::from_names(["head", "body", "tail"]);
    assert_eq!(parts.len(), 3);
    assert_eq!(parts.get(1).unwrap().name, "head");
    assert_eq!(parts.get(3).unwrap().name, "tail");
    assert!(parts.get(0).is_none());
    assert!(parts.iter().all(PartInfo::is_encodable));
}

#[test]
fn encodable_range_is_one_to_max_parts() {
    assert!(!PartInfo::new(0, "x").is_encodable());
    assert!(PartInfo::new(1, "x").is_encodable());
    assert!(PartInfo::new(MAX_PARTS as u32, "x").is_encodable());
    assert!(!PartInfo::new(MAX_PARTS as u32 + 1, "x").is_encodable());
}

#[test]
fn validate_reports_reserved_duplicate_and_dangling_parent() {
    let parts = PartList::new(vec![
        PartInfo::new(0, "ghost"),
        PartInfo::new(1, "body"),
        PartInfo::new(1, "head").with_parent(9),
        PartInfo::new(40, "far"),
    ]);
    let issues = parts.validate();
    assert!(issues.iter().all(|i| !i.is_error()));
    assert!(issues.iter().any(|i| i.message.contains("reserved id 0")));
    assert!(issues.iter().any(|i| i.message.contains("duplicate part id 1")));
    assert!(
        issues
            .iter()
            .any(|i| i.path == "$[2].parent" && i.message.contains("parent id 9"))
    );
    assert!(issues.iter().any(|i| i.message.contains("addressable slots")));
}

#[test]
fn clean_list_has_no_issues() {
    let parts = PartList::new(vec![
        PartInfo::new(1, "body"),
        PartInfo::new(2, "head").with_parent(1),
    ]);
    assert!(parts.validate().is_empty());
}

#[test]
fn json_accepts_parent_id_alias() {
    let parts: PartList =
        serde_json::from_str(r#"[{"id":1,"name":"body"},{"id":2,"name":"neck","parent_id":1}]"#)
            .unwrap();
    assert_eq!(parts.get(2).unwrap().parent, Some(1));
}
