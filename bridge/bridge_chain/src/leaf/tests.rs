use super::*;
use crate::test_helpers::Fixture;
use crate::Func;
use pretty_assertions::assert_eq;

fn names(leaves: Option<Vec<TypeDescriptor>>) -> Option<Vec<String>> {
    leaves.map(|tys| tys.iter().map(ToString::to_string).collect())
}

fn only<'n>(supplied: &'n [&'n str]) -> impl FnMut(&TypeDescriptor) -> bool + 'n {
    move |ty: &TypeDescriptor| supplied.iter().any(|name| *name == ty.name())
}

#[test]
fn supplied_through_single_mapper() {
    let mut fx = Fixture::new();
    let target = fx.mapper("t", &["str"], "out");
    let library = vec![fx.mapper("m2", &["int"], "str")];

    let leaves = required_leaf_types(&target, &library, only(&["int"]));
    assert_eq!(names(leaves), Some(vec!["int".to_string()]));
}

#[test]
fn directly_supplied_args_are_leaves() {
    let mut fx = Fixture::new();
    let target = fx.mapper("t", &["int", "str", "int"], "out");
    let library: Vec<Func> = Vec::new();

    let leaves = required_leaf_types(&target, &library, |_| true);
    assert_eq!(
        names(leaves),
        Some(vec!["int".to_string(), "str".to_string()])
    );
}

#[test]
fn unsatisfiable_type_yields_none() {
    let mut fx = Fixture::new();
    let target = fx.mapper("t", &["str"], "out");
    let library = vec![fx.mapper("m2", &["int"], "str")];

    assert_eq!(required_leaf_types(&target, &library, |_| false), None);
}

#[test]
fn cyclic_producers_yield_none() {
    let mut fx = Fixture::new();
    let target = fx.mapper("t", &["a"], "out");
    let library = vec![fx.mapper("ma", &["b"], "a"), fx.mapper("mb", &["a"], "b")];
    let mut trace = SearchTrace::recording();

    let leaves = required_leaf_types_traced(&target, &library, |_| false, &mut trace);

    assert_eq!(leaves, None);
    assert!(trace.events().contains(&TraceEvent::Unresolvable {
        func: "t".to_string(),
        ty: "a".to_string(),
    }));
}

#[test]
fn falls_back_to_next_producer() {
    let mut fx = Fixture::new();
    let target = fx.mapper("t", &["int"], "out");
    let library = vec![
        fx.mapper("from_secret", &["secret"], "int"),
        fx.mapper("from_str", &["str"], "int"),
    ];

    let leaves = required_leaf_types(&target, &library, only(&["str"]));
    assert_eq!(names(leaves), Some(vec!["str".to_string()]));
}

#[test]
fn leaves_accumulate_across_missing_types() {
    let mut fx = Fixture::new();
    let target = fx.mapper("deploy", &["client", "manifest", "env"], "release");
    let library = vec![
        fx.mapper("connect", &["url", "token"], "client"),
        fx.mapper("read", &["path"], "manifest"),
    ];

    let leaves = required_leaf_types(&target, &library, only(&["env", "url", "token", "path"]));
    assert_eq!(
        names(leaves),
        Some(vec![
            "env".to_string(),
            "url".to_string(),
            "token".to_string(),
            "path".to_string(),
        ])
    );
}

#[test]
fn independent_branches_reuse_a_mapper() {
    let mut fx = Fixture::new();
    let target = fx.mapper("t", &["left", "right"], "out");
    let library = vec![
        fx.mapper("l", &["int"], "left"),
        fx.mapper("r", &["int"], "right"),
        fx.mapper("parse", &["str"], "int"),
    ];

    let leaves = required_leaf_types(&target, &library, only(&["str"]));
    assert_eq!(names(leaves), Some(vec!["str".to_string()]));
}

#[test]
fn bound_values_are_not_leaves() {
    let mut fx = Fixture::new();
    let token = fx.value("token");
    let target = fx.mapper("t", &["session"], "out");
    let library = vec![fx.mapper("login", &["token", "user"], "session").with_values([token])];

    let leaves = required_leaf_types(&target, &library, only(&["user"]));
    assert_eq!(names(leaves), Some(vec!["user".to_string()]));
}

#[test]
fn trace_marks_supplied_and_missing() {
    let mut fx = Fixture::new();
    let target = fx.mapper("t", &["str"], "out");
    let library = vec![fx.mapper("m2", &["int"], "str")];
    let mut trace = SearchTrace::recording();

    let leaves = required_leaf_types_traced(&target, &library, only(&["int"]), &mut trace);

    assert!(leaves.is_some());
    let events = trace.into_events();
    assert!(events.contains(&TraceEvent::LeafMissing {
        func: "t".to_string(),
        ty: "str".to_string(),
    }));
    assert!(events.contains(&TraceEvent::LeafSupplied {
        func: "m2".to_string(),
        ty: "int".to_string(),
    }));
}
