//! Scene graph of a loaded model.
//!
//! A [`Node`] mirrors a glTF node: a name, a local transform, the GPU meshes it
//! draws and the material slot the binding table chose for it. The graph is
//! built once at load time and only mutated by the material binding pass.

use cgmath::SquareMatrix;

use crate::{data_structures::instance::Instance, material::MaterialSlot};

#[derive(Debug, Clone)]
pub struct Node {
    pub name: Option<String>,
    pub local: cgmath::Matrix4<f32>,
    /// Indices into [`crate::data_structures::model::Model::meshes`], one per glTF primitive.
    pub meshes: Vec<usize>,
    /// `None` keeps the material that came with the model.
    pub material: Option<MaterialSlot>,
    /// Hidden nodes are skipped together with their children.
    pub visible: bool,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            local: cgmath::Matrix4::identity(),
            meshes: Vec::new(),
            material: None,
            visible: true,
            children: Vec::new(),
        }
    }

    /// A node that draws the given meshes.
    pub fn with_meshes(name: Option<&str>, meshes: Vec<usize>) -> Self {
        Self {
            meshes,
            ..Self::new(name)
        }
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn is_mesh(&self) -> bool {
        !self.meshes.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Depth-first, pre-order visit of this node and all descendants.
    pub fn traverse_mut(&mut self, visit: &mut dyn FnMut(&mut Node)) {
        visit(self);
        for child in self.children.iter_mut() {
            child.traverse_mut(visit);
        }
    }

    pub fn traverse(&self, visit: &mut dyn FnMut(&Node)) {
        visit(self);
        for child in self.children.iter() {
            child.traverse(visit);
        }
    }

    /// First node with exactly this name, in pre-order.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// World transforms of every visible mesh node, in pre-order.
    ///
    /// A hidden node hides its whole subtree.
    pub fn visible_meshes(&self, parent: &Instance) -> Vec<(&Node, Instance)> {
        let mut out = Vec::new();
        self.collect_visible(parent, &mut out);
        out
    }

    fn collect_visible<'a>(&'a self, parent: &Instance, out: &mut Vec<(&'a Node, Instance)>) {
        if !self.visible {
            return;
        }
        let world = parent * &Instance::from(self.local);
        if self.is_mesh() {
            out.push((self, world.clone()));
        }
        for child in &self.children {
            child.collect_visible(&world, out);
        }
    }
}
