//! Forest to DOT (Graphviz) conversion.
//!
//! This module renders a correction forest in DOT format, which can be
//! visualized using Graphviz tools like `dot`, `neato`, or online viewers.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **Symbol nodes** are ellipses labeled with their frontier
//! - **Families** are unlabeled points below their symbol node, with one
//!   edge per child
//! - **Edit bundles** are boxes listing their operations line by line
//! - **The terminal leaf** is a single shared `end` node at the bottom
//!   (sink rank)
//!
//! # Examples
//!
//! ```
//! use cspf_rs::automaton::{Alphabet, Automaton};
//! use cspf_rs::forest::Forest;
//!
//! let to_correct = Automaton::new([0], [(0, 'a', 0)], [0]);
//! let target = Automaton::new([0], [(0, 'a', 0)], [0]);
//! let forest = Forest::build(&to_correct, &target, &Alphabet::new(['a']))?;
//!
//! let dot = forest.to_dot()?;
//! // Write to file and render with: dot -Tpng corrections.dot -o corrections.png
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::forest::Forest;
use crate::node::PackedChild;

/// Configuration options for DOT output generation.
///
/// Use `DotStyle::default()` for standard settings.
#[derive(Debug, Clone)]
pub struct DotStyle {
    /// Shape for symbol nodes (default: "ellipse")
    pub symbol_shape: &'static str,
    /// Shape for edit-bundle leaves (default: "box")
    pub edit_shape: &'static str,
    /// Shape for the terminal leaf (default: "doublecircle")
    pub end_shape: &'static str,
    /// Whether symbol nodes are labeled with their frontier instead of
    /// their id (default: true)
    pub frontier_labels: bool,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            symbol_shape: "ellipse",
            edit_shape: "box",
            end_shape: "doublecircle",
            frontier_labels: true,
        }
    }
}

impl Forest {
    /// Converts the forest to DOT (Graphviz) format.
    ///
    /// Every symbol node, family point, and leaf of the forest appears in
    /// the output; shared subgraphs are rendered once.
    ///
    /// # Examples
    ///
    /// ```
    /// use cspf_rs::automaton::{Alphabet, Automaton};
    /// use cspf_rs::forest::Forest;
    ///
    /// let to_correct = Automaton::new([0], [(0, 'a', 0)], [0]);
    /// let target = Automaton::new([0], [(0, 'a', 0)], [0]);
    /// let forest = Forest::build(&to_correct, &target, &Alphabet::new(['a']))?;
    ///
    /// let dot = forest.to_dot()?;
    /// println!("{}", dot);
    ///
    /// // To render the graph:
    /// // std::fs::write("corrections.dot", dot)?;
    /// // Then run: dot -Tpng corrections.dot -o corrections.png
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_style(&DotStyle::default())
    }

    /// Converts the forest to DOT format with custom styling.
    pub fn to_dot_with_style(&self, style: &DotStyle) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", style.symbol_shape)?;

        // The terminal leaf is shared by every finished family.
        writeln!(dot, "{{ rank=sink")?;
        writeln!(dot, "end [shape={}, label=\"end\"];", style.end_shape)?;
        writeln!(dot, "}}")?;

        for id in self.node_ids() {
            let label = if style.frontier_labels {
                format!("{}", self.frontier(id))
            } else {
                format!("{}", id)
            };
            writeln!(dot, "n{} [label=\"{}\"];", id.index(), label)?;
        }

        for id in self.node_ids() {
            for (family, packed) in self.families(id).iter().enumerate() {
                writeln!(dot, "n{}p{} [shape=point];", id.index(), family)?;
                writeln!(dot, "n{} -> n{}p{};", id.index(), id.index(), family)?;
                if let Some(left) = packed.left {
                    writeln!(dot, "n{}p{} -> n{};", id.index(), family, left.index())?;
                }
                match &packed.right {
                    PackedChild::Symbol(right) => {
                        writeln!(dot, "n{}p{} -> n{};", id.index(), family, right.index())?;
                    }
                    PackedChild::Edits(edits) => {
                        let label = edits
                            .iter()
                            .map(|op| op.to_string())
                            .collect::<Vec<_>>()
                            .join("\\n");
                        writeln!(
                            dot,
                            "n{}e{} [shape={}, label=\"{}\"];",
                            id.index(),
                            family,
                            style.edit_shape,
                            label
                        )?;
                        writeln!(dot, "n{}p{} -> n{}e{};", id.index(), family, id.index(), family)?;
                    }
                    PackedChild::End => {
                        writeln!(dot, "n{}p{} -> end;", id.index(), family)?;
                    }
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
