//! Tree formatter for console output
//!
//! This module provides `TreeFormatter` which draws a `TreeNode` with box
//! connectors, one node per line, into a string or to stdout with colors.

use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::tree::{NodeValue, Side, TreeNode, with_stack};

use super::config::OutputConfig;

/// Text printed in place of a tree when nothing could be built.
pub const PLACEHOLDER: &str = "None";

/// Formatter for tree output.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render a tree, or the placeholder for `None`, as plain text.
    pub fn format(&self, node: Option<&TreeNode>) -> io::Result<String> {
        let mut buf = NoColor::new(Vec::new());
        self.write_to(&mut buf, node)?;
        Ok(String::from_utf8_lossy(&buf.into_inner()).into_owned())
    }

    pub fn print(&self, node: Option<&TreeNode>) -> io::Result<()> {
        // Whether to color was already decided from --color and the environment.
        let choice = if self.config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_to(&mut stdout, node)
    }

    /// Write the tree followed by the optional summary line, or the
    /// placeholder when there is no tree.
    pub fn write_to<W: WriteColor>(&self, out: &mut W, node: Option<&TreeNode>) -> io::Result<()> {
        let Some(node) = node else {
            return writeln!(out, "{}", PLACEHOLDER);
        };

        write_value(out, &node.value, true)?;
        writeln!(out)?;
        let mut prefix = String::new();
        write_children(out, node, &mut prefix)?;

        if self.config.show_summary {
            let count = node.node_count();
            writeln!(out)?;
            writeln!(
                out,
                "{} {}, height {}",
                count,
                if count == 1 { "node" } else { "nodes" },
                node.height()
            )?;
        }
        Ok(())
    }
}

/// Write the children of `node`, one per line. `prefix` holds the
/// continuation columns of the ancestors and is restored before returning.
fn write_children<W: WriteColor>(out: &mut W, node: &TreeNode, prefix: &mut String) -> io::Result<()> {
    let children: Vec<(Side, &TreeNode)> = node.children().collect();
    for (i, (side, child)) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };

        write!(out, "{}{}", prefix, connector)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{}:", side.tag())?;
        out.reset()?;
        write!(out, " ")?;
        write_value(out, &child.value, false)?;
        writeln!(out)?;

        let parent_len = prefix.len();
        prefix.push_str(if is_last { "    " } else { "│   " });
        let result = with_stack(|| write_children(out, child, prefix));
        prefix.truncate(parent_len);
        result?;
    }
    Ok(())
}

fn write_value<W: WriteColor>(out: &mut W, value: &NodeValue, is_root: bool) -> io::Result<()> {
    let color = match value {
        NodeValue::Number(_) => Color::Yellow,
        NodeValue::String(_) => Color::Green,
        NodeValue::Bool(_) => Color::Magenta,
        NodeValue::Null => Color::Red,
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(is_root))?;
    write!(out, "{}", value)?;
    out.reset()
}
