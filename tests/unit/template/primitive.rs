use super::*;

#[test]
fn ids_are_dense_and_match_table_order() {
    for (i, p) in Primitive::ALL.iter().enumerate() {
        assert_eq!(p.id() as usize, i);
        assert_eq!(Primitive::from_id(i as u8), Some(*p));
    }
    assert_eq!(Primitive::from_id(15), None);
}

#[test]
fn names_round_trip() {
    for p in Primitive::ALL {
        assert_eq!(Primitive::from_name(p.name()), Some(p));
        assert_eq!(p.to_string().parse::<Primitive>().unwrap(), p);
    }
    assert_eq!(Primitive::from_name(" Spiral "), Some(Primitive::Spiral));
    assert_eq!(Primitive::from_name("warp"), None);
}

#[test]
fn exactly_five_primitives_are_one_shot() {
    let one_shot: Vec<_> = Primitive::ALL.iter().filter(|p| p.is_one_shot()).collect();
    assert_eq!(one_shot.len(), 5);
    assert!(Primitive::Burst.is_one_shot());
    assert!(!Primitive::Oscillate.is_one_shot());
}

#[test]
fn unknown_name_parse_error_names_the_primitive() {
    let err = "teleport".parse::<Primitive>().unwrap_err();
    assert!(err.to_string().contains("teleport"));
}
