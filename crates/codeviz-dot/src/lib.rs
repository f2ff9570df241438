//! DOT serialization of include graphs.
//!
//! The output is deterministic: nodes and edges are written in the graph's
//! own order, nothing is merged or deduplicated, and the same graph always
//! produces the same bytes.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the [`DotBuilder`]

mod dot;

use std::time::Instant;

use tracing::debug;

use codeviz_core::{FileKind, Graph, Node};

pub use dot::{DotBuilder, escape_label, quote_id};

/// Name of the emitted `digraph`.
pub const GRAPH_NAME: &str = "codeviz";

/// Fill color for source files.
pub const SOURCE_FILL: &str = "#ff9999";
/// Fill color for header files.
pub const HEADER_FILL: &str = "#ccccff";
/// Fill color for highlighted files of either kind.
pub const HIGHLIGHT_FILL: &str = "#ccffcc";

/// Styling switches that only change attributes, never the node or edge set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOptions {
    pub use_color: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self { use_color: true }
    }
}

impl StyleOptions {
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }
}

/// Fill color for a node; the highlight color wins over the kind color.
pub fn fill_color(node: &Node) -> &'static str {
    if node.highlighted() {
        return HIGHLIGHT_FILL;
    }
    match node.kind() {
        FileKind::Source => SOURCE_FILL,
        FileKind::Header => HEADER_FILL,
    }
}

/// Render `graph` as a DOT document.
///
/// Collision edges get `style=dotted` and a `?` label so ambiguous
/// resolutions stand out from confident ones.
pub fn serialize(graph: &Graph, style: &StyleOptions) -> String {
    let render_start = Instant::now();

    let ids: Vec<String> = graph.nodes().iter().map(|n| quote_id(n.path())).collect();
    let id_width = ids.iter().map(|id| id.chars().count()).max().unwrap_or(0);

    let mut dot = DotBuilder::new(GRAPH_NAME).with_id_width(id_width);
    dot.attr("splines", "true")
        .attr("sep", "\"+15,15\"")
        .attr("overlap", "scalexy")
        .blank()
        .node_style("shape=Mrecord, fontsize=12")
        .blank();

    for (node, id) in graph.nodes().iter().zip(&ids) {
        if style.use_color {
            dot.node_style(&format!("fillcolor=\"{}\", style=filled", fill_color(node)));
        }
        dot.node(id, node.path());
    }

    dot.blank();
    for edge in graph.edges() {
        let from = &ids[edge.source.index()];
        let to = &ids[edge.target.index()];
        if edge.collision {
            dot.edge_with_attrs(from, to, &[("style", "dotted"), ("label", "\"?\"")]);
        } else {
            dot.edge(from, to);
        }
    }

    let output = dot.build();
    debug!(
        "DOT serialization: {:.4}s ({} bytes)",
        render_start.elapsed().as_secs_f64(),
        output.len()
    );
    output
}
