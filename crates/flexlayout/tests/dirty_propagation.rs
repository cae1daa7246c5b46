use flexlayout::{LayoutError, LayoutTree};

#[test]
fn style_changes_dirty_every_ancestor() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    let mid = tree.new_node();
    let leaf = tree.new_node();
    tree.add_child(root, mid).unwrap();
    tree.add_child(mid, leaf).unwrap();
    tree.update_style(root, |s| s.width = 100.0).unwrap();

    tree.calculate_layout(root).unwrap();
    for key in [root, mid, leaf] {
        tree.mark_layout_seen(key).unwrap();
        assert!(!tree.is_dirty(key));
    }

    tree.update_style(leaf, |s| s.height = 10.0).unwrap();

    assert!(tree.is_dirty(leaf));
    assert!(tree.is_dirty(mid));
    assert!(tree.is_dirty(root));
}

#[test]
fn setting_an_equal_style_is_a_no_op() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| s.width = 100.0).unwrap();
    tree.calculate_layout(root).unwrap();

    // The node is in HasNewLayout; an equal-value write must not try to
    // dirty it (which would be an error), nor change its state.
    tree.update_style(root, |s| s.width = 100.0).unwrap();
    assert!(tree.has_new_layout(root));
}

#[test]
fn mutating_an_unseen_layout_is_an_error() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| s.width = 100.0).unwrap();
    tree.calculate_layout(root).unwrap();

    let err = tree.update_style(root, |s| s.width = 200.0).unwrap_err();
    assert!(matches!(err, LayoutError::ProtocolMisuse { .. }));
}

#[test]
fn ancestors_with_unseen_layouts_also_reject_mutations() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    let leaf = tree.new_node();
    tree.add_child(root, leaf).unwrap();
    tree.update_style(root, |s| s.width = 100.0).unwrap();
    tree.calculate_layout(root).unwrap();

    // Only the leaf was acknowledged; dirtying it must still fail when the
    // propagation reaches the unseen root.
    tree.mark_layout_seen(leaf).unwrap();
    let err = tree.update_style(leaf, |s| s.height = 5.0).unwrap_err();
    assert!(matches!(err, LayoutError::ProtocolMisuse { .. }));
}

#[test]
fn mark_layout_seen_requires_a_pending_layout() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let node = tree.new_node();

    let err = tree.mark_layout_seen(node).unwrap_err();
    assert!(matches!(err, LayoutError::ProtocolMisuse { .. }));
}

#[test]
fn the_state_machine_walks_dirty_new_seen() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    assert!(tree.is_dirty(root), "fresh nodes start dirty");

    tree.calculate_layout(root).unwrap();
    assert!(tree.has_new_layout(root));
    assert!(!tree.is_dirty(root));

    tree.mark_layout_seen(root).unwrap();
    assert!(!tree.has_new_layout(root));
    assert!(!tree.is_dirty(root));

    tree.mark_dirty(root).unwrap();
    assert!(tree.is_dirty(root));
}

#[test]
fn detached_subtree_mutations_do_not_touch_the_old_parent() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    tree.add_child(root, child).unwrap();
    tree.update_style(root, |s| s.width = 100.0).unwrap();
    tree.calculate_layout(root).unwrap();
    for key in [root, child] {
        tree.mark_layout_seen(key).unwrap();
    }

    tree.remove_self(child).unwrap();
    tree.calculate_layout(root).unwrap();
    tree.mark_layout_seen(root).unwrap();

    tree.update_style(child, |s| s.width = 10.0).unwrap();
    assert!(tree.is_dirty(child));
    assert!(!tree.is_dirty(root));
}
