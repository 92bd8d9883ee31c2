use pretty_assertions::assert_eq;
use rolesync_core::Changes;

#[test]
fn empty_changes_render_only_the_prefix() {
    let changes = Changes::default();
    assert!(changes.is_empty());
    assert_eq!(changes.summary("roles updated:\n"), "roles updated:\n");
}

#[test]
fn added_and_updated_items_render_distinctly() {
    let mut changes = Changes::default();
    changes.add("nginx", "", "v1.0.0");
    changes.add("postgres", "v2.0.0", "v2.1.0");

    assert_eq!(
        changes.summary("roles updated:\n"),
        "roles updated:\nadded nginx (v1.0.0); updated postgres (v2.0.0 -> v2.1.0); "
    );
}

#[test]
fn summary_is_sorted_by_role_name() {
    let mut changes = Changes::default();
    changes.add("zebra", "", "v1");
    changes.add("alpha", "", "v1");

    let summary = changes.summary("");
    let alpha = summary.find("alpha").unwrap();
    let zebra = summary.find("zebra").unwrap();
    assert!(alpha < zebra);
}
