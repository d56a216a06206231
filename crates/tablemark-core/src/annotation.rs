//! Annotation blocks and their ordered store.

use crate::rectangle::Rectangle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Local identifier of a block. Never serialized.
pub type BlockId = Uuid;

fn new_block_id() -> BlockId {
    Uuid::new_v4()
}

/// A semantic tag bound to one or more ranges.
///
/// `selections` is a snapshot taken when the block was saved; later edits to
/// the live selection do not touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationBlock {
    #[serde(skip, default = "new_block_id")]
    pub(crate) id: BlockId,
    pub selections: Vec<Rectangle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Any other field (unit, property, language, ...). Stored values that
    /// are not strings are kept as they were loaded.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl AnnotationBlock {
    pub fn new(selections: Vec<Rectangle>) -> Self {
        Self {
            id: new_block_id(),
            selections,
            role: None,
            type_: None,
            fields: BTreeMap::new(),
        }
    }

    /// Build a block from submitted form values.
    ///
    /// `role` and `type` go to their own slots, empty values are dropped and
    /// everything else is kept as an extra field.
    pub fn from_fields(selections: Vec<Rectangle>, values: BTreeMap<String, String>) -> Self {
        let mut block = Self::new(selections);
        for (key, value) in values {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "role" => block.role = Some(value),
                "type" => block.type_ = Some(value),
                _ => {
                    block.fields.insert(key, Value::String(value));
                }
            }
        }
        block
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), Value::String(value.into()));
        self
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn type_(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    /// Text value of an extra field; `None` if missing or not a string.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Ordered collection of annotation blocks.
///
/// Iteration order is insertion order and decides which block wins when
/// regions overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationStore {
    blocks: Vec<AnnotationBlock>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<AnnotationBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[AnnotationBlock] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnotationBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<&AnnotationBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Append a block and return its id.
    pub fn add(&mut self, block: AnnotationBlock) -> BlockId {
        let id = block.id;
        self.blocks.push(block);
        id
    }

    /// Swap the block with `id` for `block`, keeping its place in the order.
    /// The replacement takes over the old id.
    pub fn replace(&mut self, id: BlockId, mut block: AnnotationBlock) -> bool {
        match self.blocks.iter_mut().find(|b| b.id == id) {
            Some(slot) => {
                block.id = id;
                *slot = block;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: BlockId) -> Option<AnnotationBlock> {
        let index = self.position(id)?;
        Some(self.blocks.remove(index))
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}

impl<'a> IntoIterator for &'a AnnotationStore {
    type Item = &'a AnnotationBlock;
    type IntoIter = std::slice::Iter<'a, AnnotationBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_splits_role_and_type() {
        let values = BTreeMap::from([
            ("role".to_string(), "dependentVar".to_string()),
            ("type".to_string(), "number".to_string()),
            ("unit".to_string(), "Q11573".to_string()),
            ("property".to_string(), String::new()),
        ]);
        let block = AnnotationBlock::from_fields(vec![Rectangle::new(1, 1, 2, 2)], values);
        assert_eq!(block.role(), Some("dependentVar"));
        assert_eq!(block.type_(), Some("number"));
        assert_eq!(block.field("unit"), Some("Q11573"));
        assert_eq!(block.field("property"), None);
    }

    #[test]
    fn test_json_shape() {
        let block = AnnotationBlock::new(vec![Rectangle::new(2, 1, 2, 9)])
            .with_role("mainSubject")
            .with_field("language", "en");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "selections": [{"x1": 2, "y1": 1, "x2": 2, "y2": 9}],
                "role": "mainSubject",
                "language": "en",
            })
        );
    }

    #[test]
    fn test_parse_assigns_fresh_ids() {
        let json = r#"[
            {"selections": [{"x1": 1, "y1": 1, "x2": 1, "y2": 4}], "role": "qualifier", "type": "time"},
            {"selections": [{"x1": 2, "y1": 1, "x2": 3, "y2": 4}], "role": "dependentVar"}
        ]"#;
        let blocks: Vec<AnnotationBlock> = serde_json::from_str(json).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_ne!(blocks[0].id(), blocks[1].id());
        assert_eq!(blocks[0].type_(), Some("time"));
        assert!(blocks[1].fields.is_empty());
    }

    #[test]
    fn test_non_string_fields_survive_round_trip() {
        let json = r#"[{"selections": [{"x1": 1, "y1": 1, "x2": 1, "y2": 2}], "role": "unit", "precision": 3, "note": null, "tags": ["a"]}]"#;
        let blocks: Vec<AnnotationBlock> = serde_json::from_str(json).unwrap();
        assert_eq!(blocks[0].fields.get("precision"), Some(&serde_json::json!(3)));
        assert_eq!(blocks[0].field("precision"), None);

        let saved = serde_json::to_value(&blocks).unwrap();
        assert_eq!(saved, serde_json::from_str::<Value>(json).unwrap());
    }

    #[test]
    fn test_store_replace_keeps_position_and_id() {
        let mut store = AnnotationStore::new();
        let a = store.add(AnnotationBlock::new(vec![Rectangle::new(1, 1, 1, 1)]).with_role("a"));
        let b = store.add(AnnotationBlock::new(vec![Rectangle::new(2, 2, 2, 2)]).with_role("b"));

        let replacement = AnnotationBlock::new(vec![Rectangle::new(3, 3, 4, 4)]).with_role("c");
        assert!(store.replace(a, replacement));
        assert_eq!(store.position(a), Some(0));
        assert_eq!(store.get(a).and_then(|blk| blk.role()), Some("c"));
        assert_eq!(store.position(b), Some(1));
    }

    #[test]
    fn test_store_remove() {
        let mut store = AnnotationStore::new();
        let a = store.add(AnnotationBlock::new(vec![Rectangle::new(1, 1, 1, 1)]));
        assert!(store.remove(a).is_some());
        assert!(store.remove(a).is_none());
        assert!(store.is_empty());
    }
}
