//! Mesh-to-material binding by node name.
//!
//! [`MaterialBindings`] is an ordered list of `{pattern -> action}` rules.
//! Each mesh node is matched against the rules in order and the first rule that
//! matches decides; exact-name overrides are listed before the generic
//! substring rule so they always win. Nodes no rule matches keep the material
//! that came with the model.

use crate::{data_structures::scene_graph::Node, material::MaterialSlot};

/// How a rule recognises a node name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Exact(String),
    Contains(String),
}

impl Pattern {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::Exact(exact) => name == exact,
            Pattern::Contains(marker) => name.contains(marker.as_str()),
        }
    }
}

/// What happens to a node whose name matched.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Hide,
    Assign(MaterialSlot),
    /// Read the digits that follow `marker` and pick a slot by threshold.
    /// Names without digits there get `at_or_above`.
    BySuffix {
        marker: String,
        threshold: u32,
        below: MaterialSlot,
        at_or_above: MaterialSlot,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub pattern: Pattern,
    pub action: Action,
}

/// Outcome of matching a single name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Hide,
    Assign(MaterialSlot),
    /// A suffix rule matched but no digits follow the marker.
    Unparsed(MaterialSlot),
    Untouched,
}

/// Summary of one [`MaterialBindings::apply`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingReport {
    pub colored: usize,
    pub white: usize,
    pub hidden: usize,
    /// Names without digits after the marker. They are counted in `white` or
    /// `colored` as well, depending on the fallback slot.
    pub unparsed: Vec<String>,
}

impl BindingReport {
    fn assign(&mut self, node: &mut Node, slot: MaterialSlot) {
        node.material = Some(slot);
        match slot {
            MaterialSlot::Colored => self.colored += 1,
            MaterialSlot::White => self.white += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialBindings {
    rules: Vec<Rule>,
}

impl MaterialBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Rules added earlier take precedence.
    pub fn rule(mut self, pattern: Pattern, action: Action) -> Self {
        self.rules.push(Rule { pattern, action });
        self
    }

    pub fn exact(self, name: &str, action: Action) -> Self {
        self.rule(Pattern::Exact(name.to_string()), action)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The table for the ring model.
    pub fn ring() -> Self {
        Self::new()
            .exact("#occluder", Action::Hide)
            .exact("Oval003", Action::Assign(MaterialSlot::Colored))
            .exact("Oval002", Action::Assign(MaterialSlot::White))
            .exact("trillion003", Action::Assign(MaterialSlot::White))
            .exact("trillion004", Action::Assign(MaterialSlot::White))
            .rule(
                Pattern::Contains("Diamond".to_string()),
                Action::BySuffix {
                    marker: "Diamond".to_string(),
                    threshold: 192,
                    below: MaterialSlot::Colored,
                    at_or_above: MaterialSlot::White,
                },
            )
    }

    /// Resolve a single node name against the table.
    pub fn resolve(&self, name: &str) -> Binding {
        let Some(rule) = self.rules.iter().find(|rule| rule.pattern.matches(name)) else {
            return Binding::Untouched;
        };
        match &rule.action {
            Action::Hide => Binding::Hide,
            Action::Assign(slot) => Binding::Assign(*slot),
            Action::BySuffix {
                marker,
                threshold,
                below,
                at_or_above,
            } => match numeric_suffix(name, marker) {
                Some(n) if n < *threshold => Binding::Assign(*below),
                Some(_) => Binding::Assign(*at_or_above),
                None => Binding::Unparsed(*at_or_above),
            },
        }
    }

    /// Bind every named mesh node below `root` (including `root`).
    pub fn apply(&self, root: &mut Node) -> BindingReport {
        let mut report = BindingReport::default();
        root.traverse_mut(&mut |node| {
            if !node.is_mesh() {
                return;
            }
            let Some(name) = node.name.clone() else {
                return;
            };
            match self.resolve(&name) {
                Binding::Hide => {
                    node.visible = false;
                    report.hidden += 1;
                }
                Binding::Assign(slot) => report.assign(node, slot),
                Binding::Unparsed(slot) => {
                    log::warn!("{} has no numeric suffix, using the {:?} gem", name, slot);
                    report.assign(node, slot);
                    report.unparsed.push(name);
                }
                Binding::Untouched => (),
            }
        });
        report
    }
}

/// The run of ASCII digits right after the first occurrence of `marker`.
/// Anything after the digits is ignored, so `Diamond5_1` reads as 5. Numbers
/// too large for `u32` saturate.
pub fn numeric_suffix(name: &str, marker: &str) -> Option<u32> {
    let (_, rest) = name.split_once(marker)?;
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}
