//! Tests for the arena-based derivation tree

use alchetree::domain::{parse_sequence, DerivTree, TreeBuilder};

fn example_tree() -> DerivTree {
    let steps = parse_sequence(["air + air = pressure", "earth + pressure = stone"])
        .expect("parse fixture");
    TreeBuilder::new(&steps).build().expect("build fixture")
}

#[test]
fn given_leaves_and_production_when_assembling_then_nodes_linked() {
    // Arrange
    let mut tree = DerivTree::new();

    // Act
    let left = tree.add_leaf("fire".to_string());
    let right = tree.add_leaf("water".to_string());
    let root = tree.add_production("steam".to_string(), left, right);
    tree.set_root(root);

    // Assert
    assert_eq!(tree.node_count(), 3);
    assert!(!tree.is_empty());
    assert_eq!(tree.root(), Some(root));

    let node = tree.get_node(root).expect("root node");
    assert_eq!(node.name, "steam");
    assert_eq!(node.children, Some((left, right)));
    assert!(tree.get_node(left).unwrap().is_leaf());
}

#[test]
fn given_new_tree_when_inspected_then_empty() {
    // Arrange
    let tree = DerivTree::new();

    // Assert
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
    assert!(tree.root().is_none());
    assert!(tree.display_tree().is_none());
    assert_eq!(tree.to_string(), "(empty)");
}

#[test]
fn given_tree_when_iterating_then_preorder_left_first() {
    // Arrange
    let tree = example_tree();

    // Act
    let names: Vec<&str> = tree.iter().map(|(_, node)| node.name.as_str()).collect();

    // Assert
    assert_eq!(names, vec!["stone", "earth", "pressure", "air", "air"]);
}

#[test]
fn given_tree_when_iterating_then_indices_resolve() {
    // Arrange
    let tree = example_tree();

    // Assert
    for (idx, node) in tree.iter() {
        let looked_up = tree.get_node(idx).expect("iterated index resolves");
        assert_eq!(looked_up.name, node.name);
    }
    assert_eq!(tree.iter().count(), tree.node_count());
}

#[test]
fn given_tree_when_displayed_then_nested_one_line_form() {
    // Arrange
    let tree = example_tree();

    // Assert
    assert_eq!(tree.to_string(), "stone(earth, pressure(air, air))");
}

#[test]
fn given_tree_when_rendering_display_tree_then_indented_branches() {
    // Arrange
    let tree = example_tree();

    // Act
    let rendered = tree.display_tree().expect("display tree").to_string();

    // Assert
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "stone",
            "├── earth",
            "└── pressure",
            "    ├── air",
            "    └── air",
        ]
    );
}

#[test]
fn given_tree_when_collecting_leaf_names_then_left_to_right() {
    // Arrange
    let tree = example_tree();

    // Assert
    assert_eq!(tree.leaf_names(), vec!["earth", "air", "air"]);
}

#[test]
fn given_rootless_tree_when_collecting_leaf_names_then_empty() {
    // Arrange
    let mut tree = DerivTree::new();
    tree.add_leaf("orphan".to_string());

    // Assert: nodes outside the rooted tree are not leaves of the derivation
    assert!(tree.leaf_names().is_empty());
}
