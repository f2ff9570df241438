use std::collections::BTreeSet;

use codeviz_core::{Extensions, Graph, GraphBuilder, SourceFile};
use codeviz_dot::{HIGHLIGHT_FILL, StyleOptions, serialize};
use pretty_assertions::assert_eq;

fn src(path: &str, includes: &[&str]) -> SourceFile {
    let kind = Extensions::default().kind_of(path).expect("known extension");
    SourceFile::new(path, kind, includes.iter().map(|s| s.to_string()).collect())
}

fn graph_with(files: Vec<SourceFile>, highlight: &BTreeSet<String>) -> Graph {
    let ext = Extensions::default();
    let catalog: BTreeSet<String> = files.iter().map(|f| f.path().to_string()).collect();
    GraphBuilder::new(&ext)
        .with_highlight(highlight)
        .build_from_sources(files, &catalog)
}

fn scenario() -> Graph {
    graph_with(
        vec![src("main.c", &["util.h", "missing.h"]), src("util.h", &[])],
        &BTreeSet::new(),
    )
}

#[test]
fn colored_scenario_matches_grammar() {
    let expected = r##"digraph codeviz {
    splines=true
    sep="+15,15"
    overlap=scalexy

    node [shape=Mrecord, fontsize=12]

    node [fillcolor="#ff9999", style=filled]
    "main.c" [label = "main.c"]
    node [fillcolor="#ccccff", style=filled]
    "util.h" [label = "util.h"]

    "main.c" -> "util.h"
}
"##;
    assert_eq!(serialize(&scenario(), &StyleOptions::default()), expected);
}

#[test]
fn uncolored_output_has_no_fill_lines() {
    let expected = r##"digraph codeviz {
    splines=true
    sep="+15,15"
    overlap=scalexy

    node [shape=Mrecord, fontsize=12]

    "main.c" [label = "main.c"]
    "util.h" [label = "util.h"]

    "main.c" -> "util.h"
}
"##;
    let style = StyleOptions::default().with_color(false);
    assert_eq!(serialize(&scenario(), &style), expected);
}

#[test]
fn collision_edges_are_dotted_and_padded() {
    let graph = graph_with(
        vec![
            src("a/types.h", &[]),
            src("b/types.h", &[]),
            src("main.c", &["types.h"]),
        ],
        &BTreeSet::new(),
    );
    let out = serialize(&graph, &StyleOptions::default().with_color(false));

    assert!(out.contains("    \"main.c\"    [label = \"main.c\"]\n"));
    assert!(out.contains(
        "    \"main.c\"    -> \"a/types.h\" [style=dotted, label=\"?\"]\n    \"main.c\"    -> \"b/types.h\" [style=dotted, label=\"?\"]\n"
    ));
}

#[test]
fn highlight_overrides_kind_color() {
    let highlight: BTreeSet<String> = ["util.h".to_string()].into();
    let graph = graph_with(
        vec![src("main.c", &["util.h"]), src("util.h", &[])],
        &highlight,
    );
    let out = serialize(&graph, &StyleOptions::default());

    let util_fill = format!(
        "    node [fillcolor=\"{HIGHLIGHT_FILL}\", style=filled]\n    \"util.h\" [label = \"util.h\"]\n"
    );
    assert!(out.contains(&util_fill), "{out}");
    assert!(out.contains("fillcolor=\"#ff9999\""));
    assert!(!out.contains("#ccccff"));
}

#[test]
fn color_only_changes_style_lines() {
    let highlight: BTreeSet<String> = ["util.h".to_string()].into();
    let graph = graph_with(
        vec![src("main.c", &["util.h"]), src("util.h", &[])],
        &highlight,
    );

    let colored = serialize(&graph, &StyleOptions::default());
    let plain = serialize(&graph, &StyleOptions::default().with_color(false));

    let without_fill: Vec<_> = colored
        .lines()
        .filter(|line| !line.contains("fillcolor"))
        .collect();
    assert_eq!(without_fill, plain.lines().collect::<Vec<_>>());
}

#[test]
fn parallel_edges_are_preserved() {
    let graph = graph_with(
        vec![src("main.c", &["util.h", "util.h"]), src("util.h", &[])],
        &BTreeSet::new(),
    );
    let out = serialize(&graph, &StyleOptions::default());
    assert_eq!(out.matches("\"main.c\" -> \"util.h\"").count(), 2);
}

#[test]
fn serialization_is_deterministic() {
    let first = serialize(&scenario(), &StyleOptions::default());
    let second = serialize(&scenario(), &StyleOptions::default());
    assert_eq!(first, second);
}

#[test]
fn empty_graph_is_valid_digraph() {
    let graph = graph_with(Vec::new(), &BTreeSet::new());
    let out = serialize(&graph, &StyleOptions::default());
    assert!(out.starts_with("digraph codeviz {\n"));
    assert!(out.ends_with("}\n"));
    assert!(!out.contains("->"));
}

#[test]
fn quotes_in_paths_are_escaped() {
    let graph = graph_with(vec![src("we\"ird.h", &[])], &BTreeSet::new());
    let out = serialize(&graph, &StyleOptions::default().with_color(false));
    assert!(out.contains("    \"we\\\"ird.h\" [label = \"we\\\"ird.h\"]\n"));
}
