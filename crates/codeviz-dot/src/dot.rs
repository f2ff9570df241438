//! DOT format utilities for graph rendering.

use std::fmt::Write;

/// Escape special characters for DOT quoted strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Quote a path so it can be used as a DOT node identifier.
pub fn quote_id(path: &str) -> String {
    format!("\"{}\"", escape_label(path))
}

/// Every statement sits one level inside the `digraph` block.
const INDENT: &str = "    ";

fn write_indent(output: &mut String) {
    output.push_str(INDENT);
}

/// A DOT graph builder for constructing valid DOT output.
///
/// Node and edge statements pad the leading identifier to a fixed column
/// width so the emitted file reads as a table.
pub struct DotBuilder {
    output: String,
    id_width: usize,
}

impl DotBuilder {
    /// Create a new DOT graph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {name} {{");
        Self {
            output,
            id_width: 0,
        }
    }

    /// Column width used to pad node identifiers.
    pub fn with_id_width(mut self, id_width: usize) -> Self {
        self.id_width = id_width;
        self
    }

    /// Add a graph attribute written verbatim, e.g. `splines=true`.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output);
        let _ = writeln!(self.output, "{key}={value}");
        self
    }

    /// Add a node style default.
    pub fn node_style(&mut self, attrs: &str) -> &mut Self {
        write_indent(&mut self.output);
        let _ = writeln!(self.output, "node [{attrs}]");
        self
    }

    /// Add a blank line for readability.
    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    /// Add a node with an already-quoted ID and a label.
    pub fn node(&mut self, id: &str, label: &str) -> &mut Self {
        write_indent(&mut self.output);
        let _ = writeln!(
            self.output,
            "{:<width$} [label = \"{}\"]",
            id,
            escape_label(label),
            width = self.id_width
        );
        self
    }

    /// Add an edge.
    pub fn edge(&mut self, from: &str, to: &str) -> &mut Self {
        self.edge_with_attrs(from, to, &[])
    }

    /// Add an edge with attributes. Values are written verbatim.
    pub fn edge_with_attrs(&mut self, from: &str, to: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output);
        let _ = write!(
            self.output,
            "{:<width$} -> {}",
            from,
            to,
            width = self.id_width
        );
        if !attrs.is_empty() {
            self.output.push_str(" [");
            for (i, (key, value)) in attrs.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                let _ = write!(self.output, "{key}={value}");
            }
            self.output.push(']');
        }
        self.output.push('\n');
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("plain.h"), "plain.h");
        assert_eq!(escape_label("we\"ird.h"), "we\\\"ird.h");
        assert_eq!(escape_label("dir\\file.h"), "dir\\\\file.h");
        assert_eq!(escape_label("two\nlines"), "two\\nlines");
    }

    #[test]
    fn test_quote_id() {
        assert_eq!(quote_id("src/main.c"), "\"src/main.c\"");
    }

    #[test]
    fn test_builder_pads_ids() {
        let mut dot = DotBuilder::new("g").with_id_width(6);
        dot.node("\"a\"", "a").edge("\"a\"", "\"bb\"");
        let out = dot.build();
        assert_eq!(
            out,
            "digraph g {\n    \"a\"    [label = \"a\"]\n    \"a\"    -> \"bb\"\n}\n"
        );
    }

    #[test]
    fn test_statements_use_one_indent_level() {
        let mut dot = DotBuilder::new("g");
        dot.attr("splines", "true").node_style("shape=box").edge("a", "b");
        let out = dot.build();
        for line in out.lines().skip(1).filter(|l| *l != "}") {
            assert!(line.starts_with(INDENT), "{line:?}");
            assert!(!line.starts_with("        "), "{line:?}");
        }
    }

    #[test]
    fn test_edge_attrs() {
        let mut dot = DotBuilder::new("g");
        dot.edge_with_attrs("x", "y", &[("style", "dotted"), ("label", "\"?\"")]);
        assert_eq!(
            dot.build(),
            "digraph g {\n    x -> y [style=dotted, label=\"?\"]\n}\n"
        );
    }
}
