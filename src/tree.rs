//! The generic named tree handed to the visualization.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::skills::SkillRecord;

pub const ROOT_NAME: &str = "Skills";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Skill,
    Certification,
}

/// Branch nodes carry children and no type; leaves carry a type and no
/// `children` key at all once serialized. An untyped node always writes
/// `children`, so an empty tree is `{"name": "Skills", "children": []}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkillTreeNode {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<NodeKind>,
    #[serde(default)]
    pub children: Vec<SkillTreeNode>,
}

impl Serialize for SkillTreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let with_children = self.kind.is_none() || !self.children.is_empty();
        let len = 1 + usize::from(self.kind.is_some()) + usize::from(with_children);

        let mut node = serializer.serialize_struct("SkillTreeNode", len)?;
        node.serialize_field("name", &self.name)?;
        if let Some(kind) = &self.kind {
            node.serialize_field("type", kind)?;
        }
        if with_children {
            node.serialize_field("children", &self.children)?;
        }
        node.end()
    }
}

impl SkillTreeNode {
    pub fn branch(name: impl Into<String>, children: Vec<SkillTreeNode>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            children,
        }
    }

    pub fn leaf(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of typed (skill or certification) nodes in this subtree.
    pub fn skill_count(&self) -> usize {
        let own = usize::from(self.kind.is_some());
        own + self
            .children
            .iter()
            .map(SkillTreeNode::skill_count)
            .sum::<usize>()
    }

    pub fn find_child(&self, name: &str) -> Option<&SkillTreeNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// "programming_languages" -> "Programming Languages".
///
/// Underscores become spaces; a letter is uppercased when it follows a
/// non-letter and lowercased otherwise.
pub fn category_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut prev_is_letter = false;
    for ch in key.replace('_', " ").chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                label.extend(ch.to_lowercase());
            } else {
                label.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            label.push(ch);
            prev_is_letter = false;
        }
    }
    label
}

fn leaves(items: &[String], kind: NodeKind) -> Vec<SkillTreeNode> {
    items
        .iter()
        .map(|item| SkillTreeNode::leaf(item.as_str(), kind))
        .collect()
}

/// Build the display tree. Total: an empty record gives a root with no
/// children.
///
/// Levels and relationships are not part of the tree.
pub fn build(record: &SkillRecord) -> SkillTreeNode {
    let mut root = SkillTreeNode::branch(ROOT_NAME, Vec::new());

    let categories: Vec<SkillTreeNode> = record
        .technical
        .iter()
        .filter(|(_, skills)| !skills.is_empty())
        .map(|(category, skills)| {
            SkillTreeNode::branch(category_label(category), leaves(skills, NodeKind::Skill))
        })
        .collect();
    if !categories.is_empty() {
        root.children.push(SkillTreeNode::branch("Technical Skills", categories));
    }

    let sections = [
        ("Soft Skills", &record.soft_skills, NodeKind::Skill),
        ("Domain Expertise", &record.domains, NodeKind::Skill),
        ("Certifications", &record.certifications, NodeKind::Certification),
    ];
    for (name, items, kind) in sections {
        if !items.is_empty() {
            root.children.push(SkillTreeNode::branch(name, leaves(items, kind)));
        }
    }

    root
}
