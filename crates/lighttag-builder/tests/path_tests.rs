use super::*;

#[test]
fn test_reentered_type_survives_inner_leave() {
    let mut path = ExpansionPath::new();
    path.enter(&"T");
    path.enter(&"T");
    path.leave(&"T");

    assert!(path.contains(&"T"));
    assert_eq!(path.depth(), 1);

    path.leave(&"T");
    assert!(!path.contains(&"T"));
    assert!(path.is_empty());
}

#[test]
fn test_scope_pairs_enter_and_leave() {
    let mut path = ExpansionPath::new();
    let seen = path.scope(&1u32, |path| {
        assert!(path.contains(&1));
        path.scope(&2, |path| (path.depth(), path.level()))
    });

    assert_eq!(seen, (2, 1));
    assert!(path.is_empty());
    assert_eq!(path.level(), 0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "not on the path")]
fn test_leave_without_enter_panics_in_debug() {
    let mut path = ExpansionPath::<u32>::new();
    path.leave(&7);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "enter() without leave()")]
fn test_leaked_entry_detected_on_drop() {
    let mut path = ExpansionPath::new();
    path.enter(&7u32);
    drop(path);
}
