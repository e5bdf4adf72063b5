//! The structured skill record produced by classification.
//!
//! On the wire the record keeps the nested shape the model is asked for:
//! `{"skills": {"technical": {..}, "soft_skills": [..], "domains": [..],
//! "certifications": [..]}, "experience_levels": {..}, "skill_relationships": [..]}`.
//! Every field is optional and `null` counts as empty. Objects keep their key
//! order so categories render in the order the model listed them.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("response is not valid skill JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Ordered map
// ============================================================================

/// A JSON object as an insertion-ordered list of entries.
/// A repeated key replaces the earlier value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

// ============================================================================
// Enumerations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
            ExperienceLevel::Expert => "expert",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            "expert" => Ok(ExperienceLevel::Expert),
            other => Err(format!("unknown experience level: {}", other)),
        }
    }
}

impl TryFrom<String> for ExperienceLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RelationKind {
    Prerequisite,
    Related,
    Specialization,
}

impl FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prerequisite" => Ok(RelationKind::Prerequisite),
            "related" => Ok(RelationKind::Related),
            "specialization" => Ok(RelationKind::Specialization),
            other => Err(format!("unknown relationship type: {}", other)),
        }
    }
}

impl TryFrom<String> for RelationKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRelationship {
    pub parent: String,
    pub child: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

// ============================================================================
// SkillRecord
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SkillDocument", into = "SkillDocument")]
pub struct SkillRecord {
    /// Category key (e.g. "programming_languages") to skills, in listed order
    pub technical: OrderedMap<Vec<String>>,
    pub soft_skills: Vec<String>,
    pub domains: Vec<String>,
    pub certifications: Vec<String>,
    pub experience_levels: OrderedMap<ExperienceLevel>,
    pub skill_relationships: Vec<SkillRelationship>,
}

impl SkillRecord {
    /// Parse and validate a model reply that has already been unfenced.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn technical_skill_count(&self) -> usize {
        self.technical.iter().map(|(_, skills)| skills.len()).sum()
    }

    /// True when nothing in the record would show up in the tree.
    pub fn is_empty(&self) -> bool {
        self.technical_skill_count() == 0
            && self.soft_skills.is_empty()
            && self.domains.is_empty()
            && self.certifications.is_empty()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SkillDocument {
    #[serde(default)]
    skills: Option<SkillSections>,
    #[serde(default)]
    experience_levels: Option<OrderedMap<ExperienceLevel>>,
    #[serde(default)]
    skill_relationships: Option<Vec<SkillRelationship>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SkillSections {
    #[serde(default)]
    technical: Option<OrderedMap<Option<Vec<String>>>>,
    #[serde(default)]
    soft_skills: Option<Vec<String>>,
    #[serde(default)]
    domains: Option<Vec<String>>,
    #[serde(default)]
    certifications: Option<Vec<String>>,
}

impl From<SkillDocument> for SkillRecord {
    fn from(doc: SkillDocument) -> Self {
        let sections = doc.skills.unwrap_or_default();
        let technical = sections
            .technical
            .unwrap_or_default()
            .0
            .into_iter()
            .map(|(category, skills)| (category, skills.unwrap_or_default()))
            .collect();

        Self {
            technical,
            soft_skills: sections.soft_skills.unwrap_or_default(),
            domains: sections.domains.unwrap_or_default(),
            certifications: sections.certifications.unwrap_or_default(),
            experience_levels: doc.experience_levels.unwrap_or_default(),
            skill_relationships: doc.skill_relationships.unwrap_or_default(),
        }
    }
}

impl From<SkillRecord> for SkillDocument {
    fn from(record: SkillRecord) -> Self {
        let technical = record
            .technical
            .0
            .into_iter()
            .map(|(category, skills)| (category, Some(skills)))
            .collect();

        Self {
            skills: Some(SkillSections {
                technical: Some(technical),
                soft_skills: Some(record.soft_skills),
                domains: Some(record.domains),
                certifications: Some(record.certifications),
            }),
            experience_levels: Some(record.experience_levels),
            skill_relationships: Some(record.skill_relationships),
        }
    }
}
