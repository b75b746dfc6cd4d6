//! # ghcl - a small hcl-like configuration language
//!
//! `ghcl` turns configuration text into a tree of attributes and blocks that applications can
//! query, and builds application objects from that tree.
//!
//! ## The language
//!
//! A document is a list of items, where there are two kinds:
//! - `attribute`: a `name = value` pair
//! - `block`:
//!   - 1 `type` identifier
//!   - followed by 0 or 1 `label` (quoted string or identifier)
//!   - and a body enclosed in `{` and `}` holding more attributes and blocks
//!
//! Values are strings (`"..."` or `'...'` with `\n \t \r \\ \" \'` escapes), numbers (integers,
//! floats, `0x`/`0o`/`0b` radix literals), `true`/`false`, `null`, bare identifiers (read as
//! strings), lists `[...]` and objects `{ key = value }`.
//!
//! ```hcl
//! # single line comments work like this
//! // ...or like this
//!
//! app_name = "Slate Demo"
//! ports = [80, 443]
//!
//! object "box" {
//!   id = "main-container"
//!   orientation = "vertical"
//!   style = { padding = 4, "border color" = "red" }
//! }
//! ```
//!
//! ### Parsing
//!
//! The [lexer::Lexer] produces [lexer::Token]s on demand, the [parser::Parser] consumes them with a
//! single token of lookahead and builds a [Document]. The first problem aborts the parse with a
//! [ParseError] that carries an [ErrorKind] and the line/column where it was found.
//!
//! ```
//! let document = ghcl::parse_str("name = \"demo\"\nserver web { port = 8080 }").unwrap();
//!
//! assert_eq!(document.attribute("name").and_then(|v| v.as_str()), Some("demo"));
//! assert_eq!(document.blocks_by_type("server")[0].label(), Some("web"));
//! ```
//!
//! ### Consuming
//!
//! [Config] wraps a document with typed lookups that fall back to defaults, and hands blocks to a
//! [Registry] to build [Buildable] objects such as [BoxLayout].
//!
//! ```
//! let mut config = ghcl::Config::default();
//! config.load_str("object \"box\" {\n  id = \"root\"\n  spacing = 4\n}").unwrap();
//!
//! let object = config.create_object(config.objects_by_type("object")[0]).unwrap();
//! let layout = object.as_any().downcast_ref::<ghcl::BoxLayout>().unwrap();
//! assert_eq!(layout.spacing, 4);
//! ```
//!
//! ### Output
//!
//! [Document] and [Value] implement [serde::Serialize] for export and [std::fmt::Display] to
//! write canonical configuration text back out.
pub mod build;
pub mod config;
pub mod document;
pub mod error;
pub mod lexer;
pub mod parser;
mod render;
pub mod value;
mod visit;

pub use build::{BoxLayout, BuildError, Buildable, Orientation, Registry};
pub use config::Config;
pub use document::{Block, Document};
pub use error::{Error, ErrorKind, ParseError, Position};
pub use parser::{parse_file, parse_file_with, parse_str, parse_str_with, ParseOptions};
pub use render::is_identifier;
pub use value::{Number, Value};
pub use visit::Visit;
