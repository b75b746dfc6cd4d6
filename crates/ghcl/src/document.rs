//! Parsed configuration tree
//!
//! A [Document] holds the root attributes and blocks of one configuration source.
//! A [Block] has a type, an optional label and the same kind of body:
//! attributes (name -> [Value], last write wins) and an ordered list of nested blocks.
//!
//! ```hcl
//! app_name = "Slate Demo"
//!
//! object "box" {
//!   id = "main-container"
//!
//!   object "box" {
//!     id = "child"
//!   }
//! }
//! ```
//!
//! Nothing is ever removed from a tree. Blocks and attributes are added while parsing and read
//! afterwards.
use crate::value::{Map, Value};
use serde::ser::SerializeStruct;

/// Attributes and nested blocks shared by [Document] and [Block]
#[derive(Debug, Clone, Default, PartialEq)]
struct Body {
    attributes: Map,
    blocks: Vec<Block>,
}

/// Root of a parsed configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    body: Body,
}

/// `type "label" { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    block_type: String,
    label: Option<String>,
    body: Body,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Block {
    pub fn new(block_type: impl Into<String>, label: Option<String>) -> Self {
        Self {
            block_type: block_type.into(),
            label,
            body: Body::default(),
        }
    }

    /// Shorthand for a block with a label
    pub fn labeled(block_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(block_type, Some(label.into()))
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }
}

/// Implements the attribute and child block accessors on a type with a `body: Body` field
macro_rules! body_accessors {
    ($ty:ty) => {
        impl $ty {
            /// Insert or replace an attribute
            ///
            /// Replacing keeps the original position of the attribute.
            pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
                self.body.attributes.insert(name.into(), value.into());
            }

            pub fn attribute(&self, name: &str) -> Option<&Value> {
                self.body.attributes.get(name)
            }

            pub fn has_attribute(&self, name: &str) -> bool {
                self.body.attributes.contains_key(name)
            }

            /// Attribute names in insertion order
            pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
                self.body.attributes.keys().map(String::as_str)
            }

            pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
                self.body
                    .attributes
                    .iter()
                    .map(|(name, value)| (name.as_str(), value))
            }

            pub fn attribute_count(&self) -> usize {
                self.body.attributes.len()
            }

            pub fn add_block(&mut self, block: Block) {
                self.body.blocks.push(block);
            }

            /// Direct child blocks in insertion order
            pub fn blocks(&self) -> &[Block] {
                &self.body.blocks
            }

            /// Direct child blocks of one type, in insertion order
            pub fn blocks_by_type(&self, block_type: &str) -> Vec<&Block> {
                self.body
                    .blocks
                    .iter()
                    .filter(|block| block.block_type == block_type)
                    .collect()
            }

            /// No attributes and no blocks
            pub fn is_empty(&self) -> bool {
                self.body.attributes.is_empty() && self.body.blocks.is_empty()
            }
        }
    };
}

body_accessors!(Document);
body_accessors!(Block);

impl serde::ser::Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut ser = serializer.serialize_struct("Document", 2)?;
        ser.serialize_field("attributes", &self.body.attributes)?;
        ser.serialize_field("blocks", &self.body.blocks)?;
        ser.end()
    }
}

impl serde::ser::Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut ser = serializer.serialize_struct("Block", 4)?;
        ser.serialize_field("type", &self.block_type)?;
        ser.serialize_field("label", &self.label)?;
        ser.serialize_field("attributes", &self.body.attributes)?;
        ser.serialize_field("blocks", &self.body.blocks)?;
        ser.end()
    }
}
