use flexlayout::{FlexDirection, LayoutTree, SpacingType};

#[test]
fn margins_offset_a_child_inside_its_parent() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| s.width = 100.0).unwrap();

    let child = tree.new_node();
    tree.update_style(child, |s| {
        s.width = 40.0;
        s.height = 20.0;
        s.margin.set(SpacingType::Top, 5.0);
        s.margin.set(SpacingType::Left, 7.0);
    })
    .unwrap();
    tree.add_child(root, child).unwrap();

    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(child).x(), 7.0);
    assert_eq!(tree.layout(child).y(), 5.0);
}

#[test]
fn margins_count_toward_the_parents_content_extent() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| s.width = 100.0).unwrap();

    let first = tree.new_node();
    let second = tree.new_node();
    tree.update_style(first, |s| {
        s.height = 20.0;
        s.margin.set(SpacingType::Bottom, 6.0);
    })
    .unwrap();
    tree.update_style(second, |s| s.height = 10.0).unwrap();
    tree.add_child(root, first).unwrap();
    tree.add_child(root, second).unwrap();

    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(second).y(), 26.0);
    assert_eq!(tree.layout(root).height(), 36.0);
}

#[test]
fn padding_and_border_inset_flex_content() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| {
        s.width = 100.0;
        s.height = 100.0;
        s.padding.set(SpacingType::All, 10.0);
        s.border.set(SpacingType::All, 5.0);
    })
    .unwrap();

    let child = tree.new_node();
    tree.update_style(child, |s| s.flex = 1.0).unwrap();
    tree.add_child(root, child).unwrap();

    tree.calculate_layout(root).unwrap();

    let rect = tree.layout(child);
    assert_eq!((rect.x(), rect.y(), rect.width(), rect.height()), (15.0, 15.0, 70.0, 70.0));
}

#[test]
fn shorthand_slots_cover_every_edge() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| s.width = 100.0).unwrap();

    let child = tree.new_node();
    tree.update_style(child, |s| {
        s.height = 10.0;
        s.margin.set(SpacingType::All, 4.0);
    })
    .unwrap();
    tree.add_child(root, child).unwrap();

    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(child).x(), 4.0);
    assert_eq!(tree.layout(child).y(), 4.0);
    assert_eq!(tree.layout(root).height(), 18.0);
}

#[test]
fn horizontal_and_vertical_shorthands_split_by_axis() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| {
        s.width = 100.0;
        s.height = 60.0;
        s.padding.set(SpacingType::Horizontal, 6.0);
        s.padding.set(SpacingType::Vertical, 2.0);
    })
    .unwrap();

    let child = tree.new_node();
    tree.update_style(child, |s| s.height = 10.0).unwrap();
    tree.add_child(root, child).unwrap();

    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(child).x(), 6.0);
    assert_eq!(tree.layout(child).y(), 2.0);
    // Stretch fills the width between the horizontal padding.
    assert_eq!(tree.layout(child).width(), 88.0);
}

#[test]
fn relative_offsets_nudge_without_affecting_siblings() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| s.width = 100.0).unwrap();

    let nudged = tree.new_node();
    let after = tree.new_node();
    tree.update_style(nudged, |s| {
        s.height = 20.0;
        s.position.top = 3.0;
        s.position.left = 9.0;
    })
    .unwrap();
    tree.update_style(after, |s| s.height = 20.0).unwrap();
    tree.add_child(root, nudged).unwrap();
    tree.add_child(root, after).unwrap();

    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(nudged).y(), 3.0);
    assert_eq!(tree.layout(nudged).x(), 9.0);
    // The sibling still flows as if the offset never happened.
    assert_eq!(tree.layout(after).y(), 20.0);
}
