//! Graph construction: admit nodes, then resolve includes into edges.
//!
//! Includes are resolved by basename only. When several admitted files share
//! the basename of an include target, every one of them gets an edge flagged
//! as a collision and an [`Diagnostic::AmbiguousInclude`] is recorded. The
//! builder never guesses which of the candidates the compiler would pick.

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use tracing::{debug, info};

use codeviz_error::Result;

use crate::file::{Extensions, FileKind, SourceFile, basename};
use crate::graph::{Diagnostic, Edge, Graph, Node, NodeId};

/// Builds a [`Graph`] from a cataloged file set.
#[derive(Debug, Clone)]
pub struct GraphBuilder<'a> {
    extensions: &'a Extensions,
    highlight: Option<&'a BTreeSet<String>>,
    require_connected: bool,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(extensions: &'a Extensions) -> Self {
        Self {
            extensions,
            highlight: None,
            require_connected: false,
        }
    }

    /// Paths rendered with the highlight style.
    pub fn with_highlight(mut self, highlight: &'a BTreeSet<String>) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Drop source files none of whose includes name a cataloged path.
    pub fn with_require_connected(mut self, require_connected: bool) -> Self {
        self.require_connected = require_connected;
        self
    }

    /// Read every file in `files` and build the graph.
    ///
    /// Unreadable files abort the build. Files with an unknown extension are
    /// skipped and reported as diagnostics.
    pub fn build(&self, files: &BTreeSet<String>) -> Result<Graph> {
        let build_start = Instant::now();

        let mut diagnostics = Vec::new();
        let mut sources = Vec::with_capacity(files.len());

        for path in files {
            let Some(kind) = self.extensions.kind_of(path) else {
                debug!("Skipping {}: neither a source nor a header file", path);
                diagnostics.push(Diagnostic::UnsupportedFileType { path: path.clone() });
                continue;
            };
            sources.push(SourceFile::read(path, kind)?);
        }

        let graph = self.assemble(sources, files, diagnostics);

        info!(
            "Graph building: {:.2}s ({} nodes, {} edges)",
            build_start.elapsed().as_secs_f64(),
            graph.nodes().len(),
            graph.edges().len()
        );

        Ok(graph)
    }

    /// Build the graph from already-read files.
    ///
    /// `catalog` is the full discovered path set used by the must-include
    /// filter; `sources` must follow its sorted order.
    pub fn build_from_sources(
        &self,
        sources: Vec<SourceFile>,
        catalog: &BTreeSet<String>,
    ) -> Graph {
        self.assemble(sources, catalog, Vec::new())
    }

    fn assemble(
        &self,
        sources: Vec<SourceFile>,
        catalog: &BTreeSet<String>,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Graph {
        let nodes: Vec<Node> = sources
            .into_iter()
            .filter(|file| self.admits(file, catalog))
            .map(|file| {
                let highlighted = self
                    .highlight
                    .is_some_and(|set| set.contains(file.path()));
                Node::new(file, highlighted)
            })
            .collect();

        let edges = resolve_edges(&nodes, &mut diagnostics);
        Graph::new(nodes, edges, diagnostics)
    }

    fn admits(&self, file: &SourceFile, catalog: &BTreeSet<String>) -> bool {
        if !self.require_connected {
            return true;
        }
        match file.kind() {
            FileKind::Header => true,
            FileKind::Source => {
                let connected = file
                    .included_targets()
                    .iter()
                    .any(|target| catalog.contains(target));
                if !connected {
                    debug!("Excluding {}: no include names a cataloged file", file.path());
                }
                connected
            }
        }
    }
}

/// Resolve every include of every node against the node set by basename.
fn resolve_edges(nodes: &[Node], diagnostics: &mut Vec<Diagnostic>) -> Vec<Edge> {
    let mut by_basename: HashMap<&str, Vec<NodeId>> = HashMap::new();
    for (index, node) in nodes.iter().enumerate() {
        by_basename.entry(node.basename()).or_default().push(NodeId(index));
    }

    let mut edges = Vec::new();
    for (index, node) in nodes.iter().enumerate() {
        let source = NodeId(index);
        for target in node.file().included_targets() {
            let Some(candidates) = by_basename.get(basename(target)) else {
                continue;
            };

            match candidates.as_slice() {
                [] => {}
                [only] => edges.push(Edge {
                    source,
                    target: *only,
                    collision: false,
                }),
                many => {
                    let paths: Vec<String> = many
                        .iter()
                        .map(|id| nodes[id.index()].path().to_string())
                        .collect();
                    debug!(
                        "{} candidates for include \"{}\" in {}",
                        paths.len(),
                        target,
                        node.path()
                    );
                    edges.extend(many.iter().map(|&candidate| Edge {
                        source,
                        target: candidate,
                        collision: true,
                    }));
                    diagnostics.push(Diagnostic::AmbiguousInclude {
                        source: node.path().to_string(),
                        include: target.clone(),
                        candidates: paths,
                    });
                }
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(path: &str, includes: &[&str]) -> SourceFile {
        let kind = Extensions::default().kind_of(path).expect("known extension");
        SourceFile::new(path, kind, includes.iter().map(|s| s.to_string()).collect())
    }

    fn catalog(files: &[SourceFile]) -> BTreeSet<String> {
        files.iter().map(|f| f.path().to_string()).collect()
    }

    fn build(files: Vec<SourceFile>) -> Graph {
        let ext = Extensions::default();
        let set = catalog(&files);
        GraphBuilder::new(&ext).build_from_sources(files, &set)
    }

    #[test]
    fn test_single_match_is_plain_edge() {
        let graph = build(vec![src("main.c", &["util.h", "missing.h"]), src("util.h", &[])]);

        assert_eq!(graph.nodes().len(), 2);
        let edges: Vec<_> = graph.edge_paths().collect();
        assert_eq!(edges, vec![("main.c", "util.h", false)]);
        assert!(graph.diagnostics().is_empty());
    }

    #[test]
    fn test_resolution_uses_basename() {
        let graph = build(vec![
            src("src/main.c", &["../include/util.h"]),
            src("include/util.h", &[]),
        ]);
        let edges: Vec<_> = graph.edge_paths().collect();
        assert_eq!(edges, vec![("src/main.c", "include/util.h", false)]);
    }

    #[test]
    fn test_collision_emits_edge_per_candidate() {
        let graph = build(vec![
            src("a/types.h", &[]),
            src("b/types.h", &[]),
            src("main.c", &["types.h"]),
        ]);

        let edges: Vec<_> = graph.edge_paths().collect();
        assert_eq!(
            edges,
            vec![("main.c", "a/types.h", true), ("main.c", "b/types.h", true)]
        );
        assert_eq!(
            graph.diagnostics(),
            &[Diagnostic::AmbiguousInclude {
                source: "main.c".to_string(),
                include: "types.h".to_string(),
                candidates: vec!["a/types.h".to_string(), "b/types.h".to_string()],
            }]
        );
    }

    #[test]
    fn test_self_include_forms_self_edge() {
        let graph = build(vec![src("loop.h", &["loop.h"])]);
        let edges: Vec<_> = graph.edge_paths().collect();
        assert_eq!(edges, vec![("loop.h", "loop.h", false)]);
    }

    #[test]
    fn test_duplicate_includes_give_parallel_edges() {
        let graph = build(vec![src("main.c", &["util.h", "util.h"]), src("util.h", &[])]);
        assert_eq!(graph.edges().len(), 2);
    }

    #[test]
    fn test_highlight_membership() {
        let ext = Extensions::default();
        let files = vec![src("main.c", &[]), src("util.h", &[])];
        let set = catalog(&files);
        let highlight: BTreeSet<String> = ["util.h".to_string()].into();

        let graph = GraphBuilder::new(&ext)
            .with_highlight(&highlight)
            .build_from_sources(files, &set);

        assert!(!graph.node(graph.find("main.c").unwrap()).highlighted());
        assert!(graph.node(graph.find("util.h").unwrap()).highlighted());
    }

    #[test]
    fn test_require_connected_prunes_sources_only() {
        let ext = Extensions::default();
        let files = vec![
            src("lonely.c", &[]),
            src("outside.c", &["stdio.h"]),
            src("main.c", &["util.h"]),
            src("orphan.h", &[]),
            src("util.h", &[]),
        ];
        let set = catalog(&files);

        let graph = GraphBuilder::new(&ext)
            .with_require_connected(true)
            .build_from_sources(files.clone(), &set);
        let paths: Vec<_> = graph.nodes().iter().map(Node::path).collect();
        assert_eq!(paths, vec!["main.c", "orphan.h", "util.h"]);

        let graph = GraphBuilder::new(&ext).build_from_sources(files, &set);
        assert_eq!(graph.nodes().len(), 5);
    }

    #[test]
    fn test_require_connected_needs_exact_path() {
        let ext = Extensions::default();
        let files = vec![src("src/main.c", &["util.h"]), src("include/util.h", &[])];
        let set = catalog(&files);

        let graph = GraphBuilder::new(&ext)
            .with_require_connected(true)
            .build_from_sources(files, &set);
        let paths: Vec<_> = graph.nodes().iter().map(Node::path).collect();
        assert_eq!(paths, vec!["include/util.h"]);
    }

    #[test]
    fn test_pruned_nodes_are_not_edge_targets() {
        let ext = Extensions::default();
        let files = vec![src("a.c", &["b.c"]), src("b.c", &[]), src("x.c", &["a.c"])];
        let set = catalog(&files);

        let graph = GraphBuilder::new(&ext)
            .with_require_connected(true)
            .build_from_sources(files, &set);
        let edges: Vec<_> = graph.edge_paths().collect();
        assert_eq!(edges, vec![("x.c", "a.c", false)]);
    }
}
