//! Text rendering
//!
//! [Display] for [Value], [Block] and [Document] writes the tree back out in the configuration
//! language. The output is canonical (attributes before blocks, two space indentation, strings
//! always quoted, lists and objects on one line) and parses back into an equal tree.
//!
//! Floats are written in their shortest round-trip form and always carry a `.` or an exponent so
//! they stay floats. Infinities are written as `1e999`/`-1e999`, which overflow back to the same
//! value when parsed. NaN has no literal and is written as `null`.
//!
//! [Display]: std::fmt::Display
use crate::document::{Block, Document};
use crate::value::{Number, Value};
use std::fmt::{self, Display, Formatter, Write};

const INDENT: &str = "  ";

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(int) => write!(f, "{int}"),
            Number::Float(float) if float.is_finite() => write!(f, "{float:?}"),
            Number::Float(float) if *float == f64::INFINITY => f.write_str("1e999"),
            Number::Float(float) if *float == f64::NEG_INFINITY => f.write_str("-1e999"),
            Number::Float(_) => f.write_str("null"),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Number(number) => number.fmt(f),
            Value::String(value) => write_quoted(f, value),
            Value::List(items) => {
                f.write_char('[')?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_char(']')
            }
            Value::Object(members) if members.is_empty() => f.write_str("{}"),
            Value::Object(members) => {
                f.write_str("{ ")?;
                for (index, (key, member)) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write_key(f, key)?;
                    write!(f, " = {member}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, self, 0)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, value) in self.attributes() {
            writeln!(f, "{name} = {value}")?;
        }

        for (index, block) in self.blocks().iter().enumerate() {
            if index > 0 || self.attribute_count() > 0 {
                f.write_char('\n')?;
            }
            write_block(f, block, 0)?;
            f.write_char('\n')?;
        }

        Ok(())
    }
}

fn write_block(f: &mut Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
    f.write_str(block.block_type())?;
    if let Some(label) = block.label() {
        f.write_char(' ')?;
        write_quoted(f, label)?;
    }

    if block.is_empty() {
        return f.write_str(" {}");
    }

    f.write_str(" {\n")?;
    let indent = INDENT.repeat(depth + 1);

    for (name, value) in block.attributes() {
        writeln!(f, "{indent}{name} = {value}")?;
    }

    for child in block.blocks() {
        f.write_str(&indent)?;
        write_block(f, child, depth + 1)?;
        f.write_char('\n')?;
    }

    write!(f, "{}}}", INDENT.repeat(depth))
}

fn write_key(f: &mut Formatter<'_>, key: &str) -> fmt::Result {
    if is_identifier(key) {
        f.write_str(key)
    } else {
        write_quoted(f, key)
    }
}

fn write_quoted(f: &mut Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Would lex as a single [TokenKind::Identifier](crate::lexer::TokenKind::Identifier)
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(text, "true" | "false" | "null")
}
