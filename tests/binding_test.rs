use facet_viewer::{
    binding::{Action, Binding, MaterialBindings, Pattern, numeric_suffix},
    data_structures::scene_graph::Node,
    material::MaterialSlot,
    render::plan_draws,
};

use crate::common::test_utils::{find_unnamed, mesh, ring_graph};

mod common;

fn material_of(root: &Node, name: &str) -> Option<MaterialSlot> {
    root.find(name).and_then(|node| node.material)
}

#[test]
fn should_bind_ring_meshes_by_name() {
    let mut root = ring_graph();
    MaterialBindings::ring().apply(&mut root);

    assert_eq!(material_of(&root, "Diamond5"), Some(MaterialSlot::Colored));
    assert_eq!(material_of(&root, "Diamond300"), Some(MaterialSlot::White));
    assert_eq!(material_of(&root, "Oval003"), Some(MaterialSlot::Colored));
    assert_eq!(material_of(&root, "Oval002"), Some(MaterialSlot::White));
    assert_eq!(material_of(&root, "Band"), None);

    let unnamed = find_unnamed(&root).expect("unnamed mesh is part of the graph");
    assert_eq!(unnamed.material, None);
    assert!(unnamed.visible);
}

#[test]
fn should_report_what_was_bound() {
    let mut root = ring_graph();
    let report = MaterialBindings::ring().apply(&mut root);

    // Diamond5, Oval003 and the Diamond7 below the occluder
    assert_eq!(report.colored, 3);
    assert_eq!(report.white, 2);
    assert_eq!(report.hidden, 1);
    assert!(report.unparsed.is_empty());
}

#[test]
fn should_split_diamonds_at_192() {
    let bindings = MaterialBindings::ring();
    assert_eq!(
        bindings.resolve("Diamond0"),
        Binding::Assign(MaterialSlot::Colored)
    );
    assert_eq!(
        bindings.resolve("Diamond191"),
        Binding::Assign(MaterialSlot::Colored)
    );
    assert_eq!(
        bindings.resolve("Diamond192"),
        Binding::Assign(MaterialSlot::White)
    );
    assert_eq!(
        bindings.resolve("Round_Diamond250"),
        Binding::Assign(MaterialSlot::White)
    );
}

#[test]
fn should_prefer_exact_overrides() {
    let bindings = MaterialBindings::ring();
    assert_eq!(
        bindings.resolve("trillion003"),
        Binding::Assign(MaterialSlot::White)
    );
    assert_eq!(
        bindings.resolve("trillion004"),
        Binding::Assign(MaterialSlot::White)
    );
    assert_eq!(bindings.resolve("trillion005"), Binding::Untouched);

    // An override listed first wins over a broader rule matching the same name
    let bindings = MaterialBindings::new()
        .exact("Diamond5", Action::Assign(MaterialSlot::White))
        .rule(
            Pattern::Contains("Diamond".to_string()),
            Action::Assign(MaterialSlot::Colored),
        );
    assert_eq!(
        bindings.resolve("Diamond5"),
        Binding::Assign(MaterialSlot::White)
    );
    assert_eq!(
        bindings.resolve("Diamond6"),
        Binding::Assign(MaterialSlot::Colored)
    );
}

#[test]
fn should_hide_occluder_and_its_subtree() {
    let mut root = ring_graph();
    MaterialBindings::ring().apply(&mut root);

    let occluder = root.find("#occluder").expect("occluder is part of the graph");
    assert!(!occluder.visible);

    let drawn: Vec<usize> = plan_draws(&root).iter().map(|item| item.mesh).collect();
    assert_eq!(drawn, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn should_carry_bound_slots_into_draws() {
    let mut root = ring_graph();
    MaterialBindings::ring().apply(&mut root);

    let draws = plan_draws(&root);
    let slot_of = |mesh: usize| {
        draws
            .iter()
            .find(|item| item.mesh == mesh)
            .map(|item| item.material)
    };
    assert_eq!(slot_of(0), Some(None));
    assert_eq!(slot_of(1), Some(Some(MaterialSlot::Colored)));
    assert_eq!(slot_of(2), Some(Some(MaterialSlot::White)));
}

#[test]
fn should_read_leading_digits_of_suffixes() {
    let bindings = MaterialBindings::ring();
    assert_eq!(
        bindings.resolve("Diamond5_1"),
        Binding::Assign(MaterialSlot::Colored)
    );
    assert_eq!(
        bindings.resolve("Diamond12b"),
        Binding::Assign(MaterialSlot::Colored)
    );
    assert_eq!(
        bindings.resolve("Diamond250.001"),
        Binding::Assign(MaterialSlot::White)
    );
    assert_eq!(
        bindings.resolve("DiamondX"),
        Binding::Unparsed(MaterialSlot::White)
    );
}

#[test]
fn should_give_white_to_diamonds_without_digits() {
    let mut root = Node::new(Some("Scene"));
    root.add_child(mesh(Some("Diamond_left"), 0));
    root.add_child(mesh(Some("Diamond"), 1));
    root.add_child(mesh(Some("Diamond12b"), 2));

    let report = MaterialBindings::ring().apply(&mut root);

    assert_eq!(report.colored, 1);
    assert_eq!(report.white, 2);
    assert_eq!(
        report.unparsed,
        vec!["Diamond_left".to_string(), "Diamond".to_string()]
    );
    assert_eq!(material_of(&root, "Diamond_left"), Some(MaterialSlot::White));
    assert_eq!(material_of(&root, "Diamond"), Some(MaterialSlot::White));
    assert_eq!(material_of(&root, "Diamond12b"), Some(MaterialSlot::Colored));
}

#[test]
fn should_only_bind_mesh_nodes() {
    let mut root = Node::new(Some("Scene"));
    let mut group = Node::new(Some("Diamond5"));
    group.add_child(mesh(Some("Diamond300"), 0));
    root.add_child(group);
    root.add_child(Node::new(Some("#occluder")));

    let report = MaterialBindings::ring().apply(&mut root);

    assert_eq!(material_of(&root, "Diamond5"), None);
    assert_eq!(material_of(&root, "Diamond300"), Some(MaterialSlot::White));
    assert_eq!(report.hidden, 0);
    assert!(root.find("#occluder").is_some_and(|node| node.visible));
}

#[test]
fn should_read_digits_after_the_first_marker() {
    assert_eq!(numeric_suffix("Diamond042", "Diamond"), Some(42));
    assert_eq!(numeric_suffix("Brilliant_Diamond12", "Diamond"), Some(12));
    assert_eq!(numeric_suffix("Diamond", "Diamond"), None);
    assert_eq!(numeric_suffix("Diamond1Diamond2", "Diamond"), Some(1));
    assert_eq!(numeric_suffix("Diamond7_2", "Diamond"), Some(7));
    assert_eq!(numeric_suffix("Diamond_7", "Diamond"), None);
    assert_eq!(
        numeric_suffix("Diamond99999999999", "Diamond"),
        Some(u32::MAX)
    );
    assert_eq!(numeric_suffix("Oval003", "Diamond"), None);
}
