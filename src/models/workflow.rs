//! Alert workflow documents produced by the alert builder
//!
//! A workflow is a tree of AND/OR groups whose leaves are signal blocks. The
//! document arrives without upstream schema validation, so every type here
//! deserializes leniently: absent lists are empty, unknown group types mean
//! AND, and shapes that cannot be read are kept as nodes that evaluate false.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Root of an alert's condition tree
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_group: Option<Group>,
}

/// Boolean node combining its blocks and nested groups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: String,
    #[serde(rename = "type")]
    pub operator: LogicalOperator,
    pub blocks: Vec<Block>,
    pub groups: Vec<Group>,
    #[serde(skip)]
    malformed: bool,
}

/// Leaf signal condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    pub config: Map<String, Value>,
}

/// Logical operators for grouping
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[default]
    AND,
    OR,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Indicator,
    Social,
    Economic,
    Unknown,
}

/// A child of a group, in evaluation order: blocks first, then nested groups
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Block(&'a Block),
    Group(&'a Group),
}

impl LogicalOperator {
    /// Case-insensitive; anything other than OR is AND.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("OR") {
            LogicalOperator::OR
        } else {
            LogicalOperator::AND
        }
    }

    /// AND is vacuously true, OR vacuously false.
    pub fn combine(&self, results: &[bool]) -> bool {
        match self {
            LogicalOperator::AND => results.iter().all(|passed| *passed),
            LogicalOperator::OR => results.iter().any(|passed| *passed),
        }
    }
}

impl BlockType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "indicator" => BlockType::Indicator,
            "social" => BlockType::Social,
            "economic" => BlockType::Economic,
            _ => BlockType::Unknown,
        }
    }
}

impl Workflow {
    pub fn new(root_group: Group) -> Self {
        Self {
            root_group: Some(root_group),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let root_group = value
            .as_object()
            .and_then(|obj| obj.get("rootGroup"))
            .filter(|root| !root.is_null())
            .map(Group::from_value);
        Self { root_group }
    }

    /// Distinct symbols referenced by indicator blocks anywhere in the tree
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut symbols = BTreeSet::new();
        let mut pending: Vec<&Group> = self.root_group.iter().collect();
        while let Some(group) = pending.pop() {
            symbols.extend(
                group
                    .blocks
                    .iter()
                    .filter(|b| b.block_type == BlockType::Indicator)
                    .filter_map(Block::symbol),
            );
            pending.extend(group.groups.iter());
        }
        symbols
    }
}

impl Group {
    pub fn new(id: impl Into<String>, operator: LogicalOperator) -> Self {
        Self {
            id: id.into(),
            operator,
            blocks: Vec::new(),
            groups: Vec::new(),
            malformed: false,
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::unreadable(String::new());
        };

        let id = obj.get("id").map(id_string).unwrap_or_default();
        let operator = obj
            .get("type")
            .and_then(Value::as_str)
            .map(LogicalOperator::parse)
            .unwrap_or_default();

        let blocks = match obj.get("blocks") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(Block::from_value).collect(),
            Some(_) => return Self::unreadable(id),
        };
        let groups = match obj.get("groups") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(Group::from_value).collect(),
            Some(_) => return Self::unreadable(id),
        };

        Self {
            id,
            operator,
            blocks,
            groups,
            malformed: false,
        }
    }

    fn unreadable(id: String) -> Self {
        Self {
            malformed: true,
            ..Self::new(id, LogicalOperator::AND)
        }
    }

    /// Set when the group's own shape could not be read; it evaluates false.
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    pub fn child_count(&self) -> usize {
        self.blocks.len() + self.groups.len()
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = Node<'_>> {
        self.blocks
            .iter()
            .map(Node::Block)
            .chain(self.groups.iter().map(Node::Group))
    }
}

impl Block {
    pub fn indicator(
        id: impl Into<String>,
        content: impl Into<String>,
        config: Map<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            block_type: BlockType::Indicator,
            content: content.into(),
            config,
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self {
                id: String::new(),
                block_type: BlockType::Unknown,
                content: String::new(),
                config: Map::new(),
            };
        };

        let config = obj
            .get("config")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        // Older builder versions stored the indicator name inside config.
        let content = obj
            .get("content")
            .and_then(Value::as_str)
            .filter(|c| !c.trim().is_empty())
            .or_else(|| config.get("content").and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();

        Self {
            id: obj.get("id").map(id_string).unwrap_or_default(),
            block_type: obj
                .get("type")
                .and_then(Value::as_str)
                .map(BlockType::parse)
                .unwrap_or(BlockType::Unknown),
            content,
            config,
        }
    }

    /// Upper-cased market symbol from the block config, if any
    pub fn symbol(&self) -> Option<String> {
        self.config
            .get("symbol")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
    }
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for Workflow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Workflow::from_value(&value))
    }
}

impl<'de> Deserialize<'de> for Group {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Group::from_value(&value))
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Block::from_value(&value))
    }
}
