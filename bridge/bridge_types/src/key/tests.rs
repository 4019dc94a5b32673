use super::*;

#[test]
fn raw_roundtrip() {
    assert_eq!(TypeKey::from_raw(7).raw(), 7);
    assert_eq!(TypeKey::from_raw(7).index(), 7);
}

#[test]
fn keys_compare_by_index() {
    assert_eq!(TypeKey::from_raw(3), TypeKey::from_raw(3));
    assert_ne!(TypeKey::from_raw(3), TypeKey::from_raw(4));
    assert!(TypeKey::from_raw(3) < TypeKey::from_raw(4));
}

#[test]
fn debug_shows_index() {
    assert_eq!(format!("{:?}", TypeKey::from_raw(12)), "TypeKey(12)");
}
