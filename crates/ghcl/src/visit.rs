//! visitor pattern helpers
//!
//! Walks visit nested blocks depth first, parents before their children.
use crate::document::{Block, Document};

/// Visitor that visits its subjects immutably
pub trait Visit<T> {
    fn visit(&mut self, value: &T);
}

// blanket impl for FnMut
impl<T, F> Visit<T> for F
where
    F: FnMut(&T),
{
    fn visit(&mut self, value: &T) {
        self(value)
    }
}

fn walk<V: Visit<Block>>(blocks: &[Block], visitor: &mut V) {
    for block in blocks {
        visitor.visit(block);
        walk(block.blocks(), visitor);
    }
}

impl Document {
    /// Visit every block at any depth
    pub fn walk_blocks<V: Visit<Block>>(&self, visitor: &mut V) {
        walk(self.blocks(), visitor);
    }

    /// Blocks of one type at any depth, in document order
    pub fn find_blocks(&self, block_type: &str) -> Vec<&Block> {
        let mut found = Vec::new();
        collect(self.blocks(), block_type, &mut found);
        found
    }
}

impl Block {
    /// Visit every block nested in this one, not including itself
    pub fn walk_blocks<V: Visit<Block>>(&self, visitor: &mut V) {
        walk(self.blocks(), visitor);
    }
}

// same order as `walk`, but keeps borrows into the document
fn collect<'d>(blocks: &'d [Block], block_type: &str, found: &mut Vec<&'d Block>) {
    for block in blocks {
        if block.block_type() == block_type {
            found.push(block);
        }
        collect(block.blocks(), block_type, found);
    }
}

#[cfg(test)]
mod test {
    use crate::parser::parse_str;
    use pretty_assertions::assert_eq;

    const INPUT: &str = r#"
        object "box" {
          object "box" {
            label "inner" {}
          }
          label "first" {}
        }
        label "top" {}
    "#;

    #[test]
    fn walk_is_pre_order() {
        let document = parse_str(INPUT).unwrap();

        let mut seen = vec![];
        document.walk_blocks(&mut |block: &crate::Block| {
            seen.push(format!("{}:{}", block.block_type(), block.label().unwrap_or_default()))
        });

        assert_eq!(
            seen,
            vec!["object:box", "object:box", "label:inner", "label:first", "label:top"]
        );
    }

    #[test]
    fn walk_from_block_excludes_itself() {
        let document = parse_str(INPUT).unwrap();

        let mut count = 0;
        document.blocks()[0].walk_blocks(&mut |_: &crate::Block| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn find_blocks_at_any_depth() {
        let document = parse_str(INPUT).unwrap();

        let labels: Vec<_> = document
            .find_blocks("label")
            .into_iter()
            .filter_map(|block| block.label())
            .collect();
        assert_eq!(labels, vec!["inner", "first", "top"]);
        assert_eq!(document.blocks_by_type("label").len(), 1);
    }
}
