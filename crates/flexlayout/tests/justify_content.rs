use flexlayout::{FlexDirection, Justify, LayoutTree, NodeKey};

fn row_with_fixed_children(
    justify: Justify,
    container_width: f32,
    child_widths: &[f32],
) -> (LayoutTree, NodeKey, Vec<NodeKey>) {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |s| {
        s.flex_direction = FlexDirection::Row;
        s.justify_content = justify;
        s.width = container_width;
        s.height = 50.0;
    })
    .unwrap();

    let mut children = Vec::new();
    for &width in child_widths {
        let child = tree.new_node();
        tree.update_style(child, |s| s.width = width).unwrap();
        tree.add_child(root, child).unwrap();
        children.push(child);
    }
    (tree, root, children)
}

#[test]
fn space_between_spreads_the_gaps_evenly() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut tree, root, children) =
        row_with_fixed_children(Justify::SpaceBetween, 300.0, &[50.0, 50.0, 50.0]);
    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(children[0]).x(), 0.0);
    assert_eq!(tree.layout(children[1]).x(), 125.0);
    assert_eq!(tree.layout(children[2]).x(), 250.0);
}

#[test]
fn space_between_with_one_child_pins_it_to_the_leading_edge() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut tree, root, children) = row_with_fixed_children(Justify::SpaceBetween, 200.0, &[50.0]);
    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(children[0]).x(), 0.0);
}

#[test]
fn space_around_with_one_child_centers_it() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut tree, root, children) = row_with_fixed_children(Justify::SpaceAround, 200.0, &[50.0]);
    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(children[0]).x(), 75.0);
}

#[test]
fn space_around_edge_gaps_are_half_the_inner_gaps() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut tree, root, children) =
        row_with_fixed_children(Justify::SpaceAround, 300.0, &[50.0, 50.0, 50.0]);
    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(children[0]).x(), 25.0);
    assert_eq!(tree.layout(children[1]).x(), 125.0);
    assert_eq!(tree.layout(children[2]).x(), 225.0);
}

#[test]
fn center_packs_children_in_the_middle() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut tree, root, children) = row_with_fixed_children(Justify::Center, 200.0, &[50.0, 50.0]);
    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(children[0]).x(), 50.0);
    assert_eq!(tree.layout(children[1]).x(), 100.0);
}

#[test]
fn flex_end_packs_children_against_the_trailing_edge() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut tree, root, children) =
        row_with_fixed_children(Justify::FlexEnd, 200.0, &[50.0, 50.0]);
    tree.calculate_layout(root).unwrap();

    assert_eq!(tree.layout(children[0]).x(), 100.0);
    assert_eq!(tree.layout(children[1]).x(), 150.0);
}
