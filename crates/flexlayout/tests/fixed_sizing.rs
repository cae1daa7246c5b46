use flexlayout::{LayoutTree, SpacingType};

#[test]
fn styled_dimensions_become_the_layout_rect() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| {
        s.width = 120.0;
        s.height = 80.0;
    })
    .unwrap();

    tree.calculate_layout(root).unwrap();

    let layout = tree.layout(root);
    assert_eq!(layout.x(), 0.0);
    assert_eq!(layout.y(), 0.0);
    assert_eq!(layout.width(), 120.0);
    assert_eq!(layout.height(), 80.0);
}

#[test]
fn node_without_styled_size_collapses_to_zero() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();

    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(root).width(), 0.0);
    assert_eq!(tree.layout(root).height(), 0.0);
}

#[test]
fn padding_and_border_are_the_size_floor() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| {
        s.padding.set(SpacingType::All, 10.0);
        s.border.set(SpacingType::All, 2.0);
    })
    .unwrap();

    tree.calculate_layout(root).unwrap();

    // No styled size, no measure, no children: both axes settle at the sum
    // of padding and border.
    assert_eq!(tree.layout(root).width(), 24.0);
    assert_eq!(tree.layout(root).height(), 24.0);
}

#[test]
fn styled_size_cannot_undercut_padding_and_border() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| {
        s.width = 5.0;
        s.height = 5.0;
        s.padding.set(SpacingType::All, 10.0);
    })
    .unwrap();

    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(root).width(), 20.0);
    assert_eq!(tree.layout(root).height(), 20.0);
}

#[test]
fn max_bound_clamps_styled_dimensions() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| {
        s.width = 500.0;
        s.max_width = 300.0;
        s.height = 10.0;
        s.min_height = 50.0;
    })
    .unwrap();

    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(root).width(), 300.0);
    assert_eq!(tree.layout(root).height(), 50.0);
}

#[test]
fn every_node_ends_with_finite_dimensions() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| s.width = 90.0).unwrap();
    let a = tree.new_node();
    let b = tree.new_node();
    let c = tree.new_node();
    tree.add_child(root, a).unwrap();
    tree.add_child(root, b).unwrap();
    tree.add_child(a, c).unwrap();
    tree.update_style(b, |s| s.height = 12.0).unwrap();

    tree.calculate_layout(root).unwrap();

    for key in [root, a, b, c] {
        let layout = tree.layout(key);
        assert!(layout.width().is_finite(), "width of {key:?} is {}", layout.width());
        assert!(layout.height().is_finite(), "height of {key:?} is {}", layout.height());
        assert!(layout.width() >= 0.0);
        assert!(layout.height() >= 0.0);
    }
}
