use super::*;
use pretty_assertions::assert_eq;

fn ty(raw: u32, name: &str) -> TypeDescriptor {
    TypeDescriptor::new(TypeKey::from_raw(raw), name)
}

#[test]
fn downcast_matches_payload_type() {
    let v = Value::new(ty(0, "int"), 42_i64);

    assert_eq!(v.downcast_ref::<i64>(), Some(&42));
    assert_eq!(v.downcast_ref::<String>(), None);
    assert_eq!(v.key(), TypeKey::from_raw(0));
}

#[test]
fn debug_shows_type_only() {
    let v = Value::new(ty(3, "token"), String::from("secret"));
    assert_eq!(format!("{v:?}"), "Value(token#3)");
}

#[test]
fn latest_prefers_last_appended() {
    let mut pool = ValuePool::new();
    pool.push(Value::new(ty(0, "int"), 1_i64));
    pool.push(Value::new(ty(1, "str"), "a"));
    pool.push(Value::new(ty(0, "int"), 2_i64));

    let latest = pool.latest(TypeKey::from_raw(0)).and_then(Value::downcast_ref::<i64>);
    assert_eq!(latest, Some(&2));
    assert!(pool.contains_key(TypeKey::from_raw(1)));
    assert!(!pool.contains_key(TypeKey::from_raw(2)));
    assert!(pool.latest(TypeKey::from_raw(2)).is_none());
}

#[test]
fn truncate_restores_earlier_length() {
    let mut pool: ValuePool = vec![Value::new(ty(0, "int"), 1_i64)].into();
    pool.extend([Value::new(ty(1, "str"), "x"), Value::new(ty(2, "bool"), true)]);
    assert_eq!(pool.len(), 3);

    pool.truncate(1);
    assert_eq!(pool.len(), 1);
    assert!(!pool.contains_key(TypeKey::from_raw(1)));
}

#[test]
fn collects_from_iterator() {
    let pool: ValuePool = (0..3).map(|i| Value::new(ty(i, "n"), i)).collect();
    let keys: Vec<u32> = pool.iter().map(|v| v.key().raw()).collect();

    assert_eq!(keys, vec![0, 1, 2]);
    assert_eq!(pool.as_slice().len(), 3);
    assert!(!pool.is_empty());
    assert_eq!((&pool).into_iter().count(), 3);
}
