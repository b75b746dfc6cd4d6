//! Application configuration on top of a parsed [Document]
//!
//! [Config] holds at most one document. Lookups never fail: an attribute that is missing, has the
//! wrong type or is asked for before anything was loaded yields the type's default.
use crate::build::{BuildError, Buildable, Registry};
use crate::document::{Block, Document};
use crate::error::{Error, ParseError};
use crate::parser::{self, ParseOptions};
use crate::value::Value;
use std::path::Path;

#[derive(Debug, Default)]
pub struct Config {
    document: Option<Document>,
    registry: Registry,
    options: ParseOptions,
}

impl Config {
    pub fn new(registry: Registry) -> Self {
        Self {
            document: None,
            registry,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the loaded document with the contents of a file
    ///
    /// On failure nothing stays loaded.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.document = None;
        self.document = Some(parser::parse_file_with(path, &self.options)?);
        Ok(())
    }

    /// Replace the loaded document by parsing `input`
    ///
    /// On failure nothing stays loaded.
    pub fn load_str(&mut self, input: &str) -> Result<(), ParseError> {
        self.document = None;
        self.document = Some(parser::parse_str_with(input, &self.options)?);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.document.as_ref()?.attribute(name)?.as_str()
    }

    pub fn boolean(&self, name: &str) -> bool {
        self.lookup(name, |value| value.as_bool())
    }

    /// Integer attribute, floats are truncated toward zero
    pub fn int(&self, name: &str) -> i64 {
        self.lookup(name, |value| value.as_i64())
    }

    pub fn double(&self, name: &str) -> f64 {
        self.lookup(name, |value| value.as_f64())
    }

    /// Top level blocks of one type
    pub fn objects_by_type(&self, block_type: &str) -> Vec<&Block> {
        self.document
            .as_ref()
            .map(|document| document.blocks_by_type(block_type))
            .unwrap_or_default()
    }

    pub fn create_object(&self, block: &Block) -> Result<Box<dyn Buildable>, BuildError> {
        self.registry.build(block)
    }

    fn lookup<T: Default>(&self, name: &str, get: impl Fn(&Value) -> Option<T>) -> T {
        self.document
            .as_ref()
            .and_then(|document| document.attribute(name))
            .and_then(get)
            .unwrap_or_default()
    }
}
