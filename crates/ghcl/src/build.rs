//! Building objects from blocks
//!
//! External object types implement [Buildable] to populate themselves from a [Block]. Which type
//! gets built for a block is decided by a [Registry] that the caller owns and passes around:
//!
//! - `object "box" { ... }`: the label names the object type
//! - `object { type = "box" ... }`: without a label the `type` attribute is used
//! - `box { ... }`: any other block type names the object type directly
//!
//! [BoxLayout] is the one object type that ships with the crate.
use crate::document::Block;
use indexmap::IndexMap;
use std::any::Any;

/// Template used by [Buildable::hcl] unless an implementation provides its own
pub const DEFAULT_HCL: &str = "object \"buildable\" {\n  id = \"buildable0\"\n}";

/// Capability of being constructed from a configuration block
pub trait Buildable: std::fmt::Debug {
    /// Object type name as used in configuration
    fn type_name(&self) -> &str;

    /// Example configuration for this object type
    fn hcl(&self) -> String {
        DEFAULT_HCL.to_string()
    }

    /// The block this object was last built from
    fn block(&self) -> Option<&Block>;

    fn set_block(&mut self, block: Block);

    /// Populate from `block`, using `registry` for any nested objects
    fn build_from_block(&mut self, block: &Block, registry: &Registry);

    fn as_any(&self) -> &dyn Any;
}

pub type Constructor = fn() -> Box<dyn Buildable>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Unknown block type: {0}")]
    UnknownType(String),
    #[error("Block '{0}' does not name an object type")]
    MissingType(String),
}

/// Object types that can be built, by name
#[derive(Clone)]
pub struct Registry {
    constructors: IndexMap<String, Constructor>,
}

impl Registry {
    /// A registry that knows no object types at all
    pub fn empty() -> Self {
        Self {
            constructors: IndexMap::new(),
        }
    }

    /// Add or replace an object type
    pub fn register(&mut self, type_name: impl Into<String>, constructor: Constructor) {
        self.constructors.insert(type_name.into(), constructor);
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// The object type a block asks for, if any
    pub fn object_type<'b>(&self, block: &'b Block) -> Option<&'b str> {
        if block.block_type() != "object" {
            return Some(block.block_type());
        }

        block.label().or_else(|| {
            block
                .attribute("type")
                .and_then(|value| value.as_str())
        })
    }

    pub fn build(&self, block: &Block) -> Result<Box<dyn Buildable>, BuildError> {
        let Some(type_name) = self.object_type(block) else {
            return Err(BuildError::MissingType(block.block_type().to_string()));
        };

        let Some(constructor) = self.constructors.get(type_name) else {
            return Err(BuildError::UnknownType(type_name.to_string()));
        };

        tracing::debug!(type_name, "building object");
        let mut object = constructor();
        object.build_from_block(block, self);
        Ok(object)
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("box", BoxLayout::boxed);
        registry
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.type_names()).finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown orientation '{0}'")]
pub struct ParseOrientationError(String);

impl std::str::FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            other => Err(ParseOrientationError(other.to_string())),
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

/// A container laying out its children in a row or column
///
/// ```hcl
/// object "box" {
///   id = "toolbar"
///   orientation = "horizontal"
///   spacing = 5
///   homogeneous = true
/// }
/// ```
#[derive(Debug, Default)]
pub struct BoxLayout {
    pub id: Option<String>,
    pub orientation: Orientation,
    pub spacing: i32,
    pub homogeneous: bool,
    pub children: Vec<Box<dyn Buildable>>,
    block: Option<Block>,
}

impl BoxLayout {
    pub fn new() -> Self {
        Self::default()
    }

    fn boxed() -> Box<dyn Buildable> {
        Box::new(Self::new())
    }

    /// Child boxes, skipping other object types
    pub fn child_boxes(&self) -> impl Iterator<Item = &BoxLayout> {
        self.children
            .iter()
            .filter_map(|child| child.as_any().downcast_ref::<BoxLayout>())
    }
}

impl Buildable for BoxLayout {
    fn type_name(&self) -> &str {
        "box"
    }

    fn hcl(&self) -> String {
        "object \"box\" {\n  id = \"box0\"\n}".to_string()
    }

    fn block(&self) -> Option<&Block> {
        self.block.as_ref()
    }

    fn set_block(&mut self, block: Block) {
        self.block = Some(block);
    }

    fn build_from_block(&mut self, block: &Block, registry: &Registry) {
        self.set_block(block.clone());

        for (name, value) in block.attributes() {
            match name {
                "id" => match value.as_str() {
                    Some(id) => self.id = Some(id.to_string()),
                    None => tracing::warn!(%name, found=%value.value_type(), "expected string"),
                },
                "orientation" => match value.as_str().map(str::parse::<Orientation>) {
                    Some(Ok(orientation)) => self.orientation = orientation,
                    Some(Err(err)) => tracing::warn!(%name, %err, "ignored"),
                    None => tracing::warn!(%name, found=%value.value_type(), "expected string"),
                },
                "homogeneous" => match value.as_bool() {
                    Some(homogeneous) => self.homogeneous = homogeneous,
                    None => tracing::warn!(%name, found=%value.value_type(), "expected bool"),
                },
                "spacing" => match value.as_i64() {
                    Some(spacing) => {
                        self.spacing = spacing.clamp(i32::MIN.into(), i32::MAX.into()) as i32
                    }
                    None => tracing::warn!(%name, found=%value.value_type(), "expected number"),
                },
                _ => {}
            }
        }

        for child in block.blocks() {
            match registry.build(child) {
                Ok(object) => self.children.push(object),
                Err(err) => tracing::warn!(%err, "skipping child block"),
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse_str;
    use pretty_assertions::assert_eq;

    fn build_first(input: &str) -> Result<Box<dyn Buildable>, BuildError> {
        let document = parse_str(input).unwrap();
        Registry::default().build(&document.blocks()[0])
    }

    fn as_box(object: &dyn Buildable) -> &BoxLayout {
        object.as_any().downcast_ref::<BoxLayout>().expect("must be a box")
    }

    #[test]
    fn box_from_labeled_object() {
        let object = build_first(
            "object \"box\" {\n  id = \"test-box\"\n  orientation = \"vertical\"\n  spacing = 10\n  homogeneous = true\n}",
        )
        .unwrap();

        assert_eq!(object.type_name(), "box");
        let layout = as_box(object.as_ref());
        assert_eq!(layout.id.as_deref(), Some("test-box"));
        assert_eq!(layout.orientation, Orientation::Vertical);
        assert_eq!(layout.spacing, 10);
        assert!(layout.homogeneous);
        assert_eq!(layout.block().map(Block::block_type), Some("object"));
    }

    #[test]
    fn box_from_type_attribute() {
        let object = build_first("object {\n  type = \"box\"\n  id = \"fallback\"\n}").unwrap();
        assert_eq!(as_box(object.as_ref()).id.as_deref(), Some("fallback"));
    }

    #[test]
    fn box_from_block_type() {
        let object = build_first("box { spacing = 2.9 }").unwrap();
        assert_eq!(as_box(object.as_ref()).spacing, 2);
    }

    #[test]
    fn wrong_attribute_types_keep_defaults() {
        let object = build_first(
            "box {\n  id = 5\n  orientation = \"diagonal\"\n  homogeneous = \"yes\"\n  spacing = \"wide\"\n}",
        )
        .unwrap();

        let layout = as_box(object.as_ref());
        assert_eq!(layout.id, None);
        assert_eq!(layout.orientation, Orientation::Horizontal);
        assert!(!layout.homogeneous);
        assert_eq!(layout.spacing, 0);
    }

    #[test]
    fn spacing_is_clamped() {
        let object = build_first("box { spacing = 99999999999 }").unwrap();
        assert_eq!(as_box(object.as_ref()).spacing, i32::MAX);
    }

    #[test]
    fn nested_boxes() {
        let object = build_first(
            "object \"box\" {\n  id = \"parent\"\n  object \"box\" {\n    id = \"child\"\n  }\n  style {}\n  box { id = \"second\" }\n}",
        )
        .unwrap();

        let layout = as_box(object.as_ref());
        let ids: Vec<_> = layout.child_boxes().filter_map(|child| child.id.as_deref()).collect();
        assert_eq!(ids, vec!["child", "second"]);
        assert_eq!(layout.children.len(), 2);
    }

    #[test]
    fn unknown_types() {
        assert_eq!(
            build_first("object \"button\" {}").unwrap_err(),
            BuildError::UnknownType("button".to_string())
        );
        assert_eq!(
            build_first("object {}").unwrap_err(),
            BuildError::MissingType("object".to_string())
        );
        assert_eq!(
            build_first("window {}").unwrap_err().to_string(),
            "Unknown block type: window"
        );
        assert!(Registry::empty().build(&Block::new("box", None)).is_err());
    }

    #[derive(Debug, Default)]
    struct Label {
        text: String,
        block: Option<Block>,
    }

    impl Buildable for Label {
        fn type_name(&self) -> &str {
            "label"
        }

        fn block(&self) -> Option<&Block> {
            self.block.as_ref()
        }

        fn set_block(&mut self, block: Block) {
            self.block = Some(block);
        }

        fn build_from_block(&mut self, block: &Block, _registry: &Registry) {
            self.set_block(block.clone());
            self.text = block
                .attribute("text")
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_string();
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn custom_types() {
        let mut registry = Registry::default();
        registry.register("label", || Box::new(Label::default()));
        assert_eq!(registry.type_names().collect::<Vec<_>>(), vec!["box", "label"]);

        let document = parse_str("box {\n  object \"label\" { text = \"hi\" }\n}").unwrap();
        let object = registry.build(&document.blocks()[0]).unwrap();

        let layout = as_box(object.as_ref());
        let label = layout.children[0].as_any().downcast_ref::<Label>().unwrap();
        assert_eq!(label.text, "hi");
        assert_eq!(label.hcl(), DEFAULT_HCL);
        assert_eq!(layout.hcl(), "object \"box\" {\n  id = \"box0\"\n}");
    }

    #[test]
    fn orientation_strings() {
        assert_eq!("vertical".parse(), Ok(Orientation::Vertical));
        assert_eq!(Orientation::Horizontal.to_string(), "horizontal");
        assert_eq!(
            "up".parse::<Orientation>().unwrap_err().to_string(),
            "unknown orientation 'up'"
        );
    }
}
