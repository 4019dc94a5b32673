use super::*;
use crate::test_helpers::Fixture;
use crate::Func;
use pretty_assertions::assert_eq;

fn names(producers: &[&Func]) -> Vec<String> {
    producers.iter().map(|f| f.name().to_string()).collect()
}

#[test]
fn groups_by_output_in_library_order() {
    let mut fx = Fixture::new();
    let library = vec![
        fx.mapper("a", &[], "int"),
        fx.mapper("b", &["int"], "str"),
        fx.mapper("c", &["bool"], "int"),
    ];
    let index = MapperIndex::new(&library);

    assert_eq!(index.len(), 2);
    assert_eq!(names(index.producers(fx.ty("int").key())), vec!["a", "c"]);
    assert_eq!(names(index.producers(fx.ty("str").key())), vec!["b"]);
}

#[test]
fn unknown_output_has_no_producers() {
    let mut fx = Fixture::new();
    let library = vec![fx.mapper("a", &[], "int")];
    let index = MapperIndex::new(&library);

    assert!(index.producers(fx.ty("float").key()).is_empty());
}

#[test]
fn empty_library_builds_empty_index() {
    let library: Vec<Func> = Vec::new();
    let index = MapperIndex::new(&library);
    assert!(index.is_empty());
}
