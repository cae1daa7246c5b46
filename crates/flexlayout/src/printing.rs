//! Indented textual dumps of layout trees for debugging.

use std::fmt;

use crate::{LayoutTree, NodeKey};

// The indent unit is `__` so structure survives terminal tooling that strips
// leading whitespace.
fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("__")?;
    }
    Ok(())
}

fn fmt_node(tree: &LayoutTree, key: NodeKey, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write_indent(f, depth)?;
    let layout = tree.layout(key);
    write!(
        f,
        "layout: {{left: {}, top: {}, width: {}, height: {}}}",
        layout.x(),
        layout.y(),
        layout.width(),
        layout.height()
    )?;
    if tree.child_count(key) == 0 {
        return writeln!(f);
    }
    writeln!(f, ", children: [")?;
    for &child in tree.children(key) {
        fmt_node(tree, child, f, depth + 1)?;
    }
    write_indent(f, depth)?;
    writeln!(f, "]")
}

struct DumpNode<'a> {
    tree: &'a LayoutTree,
    key: NodeKey,
}

impl fmt::Display for DumpNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_node(self.tree, self.key, f, 0)
    }
}

impl LayoutTree {
    /// Render the subtree rooted at `key` as indented text, one layout rect
    /// summary line per node.
    pub fn dump(&self, key: NodeKey) -> String {
        format!("{}", DumpNode { tree: self, key })
    }
}

impl fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LAYOUT")?;
        for root in self.roots() {
            fmt_node(self, root, f, 0)?;
        }
        Ok(())
    }
}
