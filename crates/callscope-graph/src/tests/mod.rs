//! Unit tests for the callscope-graph crate.


use camino::Utf8Path;

use callscope_syntax::{Parser, SupportedLanguage};

use crate::extract::{Extraction, extract};

/// Test-only collection support so fixtures can build node tables with
/// `.collect()`; nodes are inserted in order via `NodeTable::insert`.
impl FromIterator<crate::node::CallableNode> for crate::graph::NodeTable {
    fn from_iter<I: IntoIterator<Item = crate::node::CallableNode>>(iter: I) -> Self {
        let mut table = Self::new();
        for node in iter {
            table.insert(node);
        }
        table
    }
}

const MODULE: &str = "app";
const PATH: &str = "/src/app.py";

fn extract_source(source: &str) -> Extraction {
    let mut parser = Parser::new(SupportedLanguage::Python).expect("parser init");
    let parsed = parser.parse(source).expect("parse");
    assert!(!parsed.has_errors(), "fixture source has errors: {source}");
    extract(&parsed, MODULE, Utf8Path::new(PATH))
}

fn edge_pairs(extraction: &Extraction) -> Vec<(String, String)> {
    extraction
        .edges()
        .iter()
        .map(|edge| (edge.caller().to_owned(), edge.callee().to_owned()))
        .collect()
}

fn pair(caller: &str, callee: &str) -> (String, String) {
    (caller.to_owned(), callee.to_owned())
}

mod scope_tests {
    use crate::scope::{ScopeKind, ScopeTracker};

    #[test]
    fn fresh_tracker_has_no_caller() {
        let tracker = ScopeTracker::new("app");
        assert_eq!(tracker.current_caller(), None);
        assert!(!tracker.in_class_body());
    }

    #[test]
    fn qualified_names_follow_the_whole_nesting_path() {
        let mut tracker = ScopeTracker::new("pkg.app");
        assert_eq!(tracker.enter("outer", ScopeKind::Function), "pkg.app.outer");
        assert_eq!(
            tracker.enter("helper", ScopeKind::Function),
            "pkg.app.outer.helper"
        );
        tracker.leave();
        tracker.leave();
        assert_eq!(tracker.enter("other", ScopeKind::Function), "pkg.app.other");
        assert_eq!(
            tracker.enter("helper", ScopeKind::Function),
            "pkg.app.other.helper"
        );
    }

    #[test]
    fn class_body_has_no_caller() {
        let mut tracker = ScopeTracker::new("app");
        tracker.enter("Engine", ScopeKind::Class);
        assert!(tracker.in_class_body());
        assert_eq!(tracker.current_caller(), None);

        tracker.enter("ignite", ScopeKind::Function);
        assert!(!tracker.in_class_body());
        assert_eq!(tracker.current_caller(), Some("app.Engine.ignite"));

        tracker.leave();
        assert_eq!(tracker.current_caller(), None);
    }

    #[test]
    fn empty_module_name_is_left_out() {
        let mut tracker = ScopeTracker::new("");
        assert_eq!(tracker.enter("main", ScopeKind::Function), "main");
    }

    #[test]
    fn qualify_does_not_push() {
        let tracker = ScopeTracker::new("app");
        assert_eq!(tracker.qualify("main"), "app.main");
        assert_eq!(tracker.current_caller(), None);
    }
}

mod extract_tests {
    use rstest::rstest;

    use super::{edge_pairs, extract_source, pair};
    use crate::node::CallableKind;

    #[test]
    fn module_level_calls_are_dropped() {
        let extraction = extract_source("setup()\nprint(run())\n");
        assert!(extraction.nodes().is_empty());
        assert!(extraction.edges().is_empty());
    }

    #[test]
    fn nested_calls_yield_an_edge_each() {
        let extraction = extract_source("def main():\n    outer(inner())\n");
        assert_eq!(
            edge_pairs(&extraction),
            vec![pair("app.main", "outer"), pair("app.main", "inner")]
        );
    }

    #[test]
    fn decorator_factory_resolves_to_the_factory() {
        let extraction = extract_source("def dispatch(payload):\n    make_handler()(payload)\n");
        let callees: Vec<_> = extraction.edges().iter().map(|e| e.callee()).collect();
        assert_eq!(callees, vec!["make_handler", "make_handler"]);
    }

    #[test]
    fn attribute_chains_resolve_base_first() {
        let extraction = extract_source("def run(self, x):\n    self.engine.ignite(x)\n");
        assert_eq!(
            edge_pairs(&extraction),
            vec![pair("app.run", "self.engine.ignite")]
        );
    }

    #[rstest]
    #[case::parenthesised("(handler)(x)", &["handler"])]
    #[case::call_base("factory().run()", &["run", "factory"])]
    #[case::subscript("handlers[0](x)", &[])]
    #[case::lambda("(lambda: 1)()", &[])]
    #[case::string_method("'-'.join(parts)", &["join"])]
    fn unusual_targets(#[case] call: &str, #[case] expected: &[&str]) {
        let source = format!("def main():\n    {call}\n");
        let extraction = extract_source(&source);
        let callees: Vec<_> = extraction.edges().iter().map(|e| e.callee()).collect();
        assert_eq!(callees, expected);
    }

    #[test]
    fn class_body_calls_are_dropped_but_methods_are_callers() {
        let source = "class Engine(make_base()):\n    size = compute()\n    def ignite(self):\n        self.spark()\n";
        let extraction = extract_source(source);

        let node = extraction.nodes().get("app.Engine.ignite").expect("method node");
        assert_eq!(node.kind(), CallableKind::Method);
        assert_eq!(
            edge_pairs(&extraction),
            vec![pair("app.Engine.ignite", "self.spark")]
        );
    }

    #[test]
    fn classes_are_not_nodes() {
        let extraction = extract_source("class Engine:\n    pass\n");
        assert!(extraction.nodes().is_empty());
    }

    #[rstest]
    #[case("def f():\n    pass\n", "app.f", CallableKind::Function)]
    #[case("async def f():\n    pass\n", "app.f", CallableKind::AsyncFunction)]
    #[case("class C:\n    def f(self):\n        pass\n", "app.C.f", CallableKind::Method)]
    #[case(
        "class C:\n    async def f(self):\n        pass\n",
        "app.C.f",
        CallableKind::AsyncMethod
    )]
    #[case(
        "class C:\n    def f(self):\n        def g():\n            pass\n",
        "app.C.f.g",
        CallableKind::Function
    )]
    #[case(
        "class Outer:\n    class Inner:\n        def f(self):\n            pass\n",
        "app.Outer.Inner.f",
        CallableKind::Method
    )]
    fn kinds_follow_the_immediate_scope(
        #[case] source: &str,
        #[case] name: &str,
        #[case] expected: CallableKind,
    ) {
        let extraction = extract_source(source);
        let node = extraction.nodes().get(name).expect("node present");
        assert_eq!(node.kind(), expected);
    }

    #[test]
    fn same_local_name_under_different_parents_does_not_collide() {
        let source = "def a():\n    def helper():\n        pass\ndef b():\n    def helper():\n        pass\n";
        let extraction = extract_source(source);
        let names: Vec<_> = extraction.nodes().iter().map(|n| n.qualified_name()).collect();
        assert_eq!(names, vec!["app.a", "app.a.helper", "app.b", "app.b.helper"]);
    }

    #[test]
    fn redeclaration_keeps_the_last_definition() {
        let source = "def f():\n    '''First.'''\n\ndef f():\n    '''Second.'''\n";
        let extraction = extract_source(source);

        assert_eq!(extraction.nodes().len(), 1);
        let node = extraction.nodes().get("app.f").expect("node present");
        assert_eq!(node.summary(), "Second.");
        assert_eq!(node.location().line(), 4);
    }

    #[test]
    fn decorators_belong_to_the_decorated_function() {
        let source = "@route(path())\ndef view():\n    render()\n";
        let extraction = extract_source(source);

        let node = extraction.nodes().get("app.view").expect("node present");
        assert_eq!(node.location().line(), 2);
        assert_eq!(
            edge_pairs(&extraction),
            vec![
                pair("app.view", "render"),
                pair("app.view", "route"),
                pair("app.view", "path"),
            ]
        );
    }

    #[test]
    fn return_annotation_follows_decorators() {
        let source = "@deco()\ndef f() -> make():\n    body()\n";
        let extraction = extract_source(source);
        assert_eq!(
            edge_pairs(&extraction),
            vec![
                pair("app.f", "body"),
                pair("app.f", "deco"),
                pair("app.f", "make"),
            ]
        );
    }

    #[test]
    fn deeply_nested_expressions_do_not_exhaust_the_stack() {
        let terms = vec!["x"; 50_000].join(" + ");
        let source = format!("def f(x):\n    total({terms})\n");
        let extraction = extract_source(&source);
        assert_eq!(edge_pairs(&extraction), vec![pair("app.f", "total")]);
    }

    #[test]
    fn deeply_chained_call_targets_resolve() {
        let source = format!("def f():\n    make{}\n", "()".repeat(5_000));
        let extraction = extract_source(&source);
        assert_eq!(extraction.edges().len(), 5_000);
        assert!(extraction.edges().iter().all(|e| e.callee() == "make"));
    }

    #[test]
    fn python2_print_chevron_still_contributes() {
        let source = "def main():\n    print >>sys.stderr, g()\n";
        let extraction = extract_source(source);
        assert_eq!(edge_pairs(&extraction), vec![pair("app.main", "g")]);
    }

    #[test]
    fn class_decorator_calls_are_dropped() {
        let extraction = extract_source("@register()\nclass Engine:\n    pass\n");
        assert!(extraction.edges().is_empty());
    }

    #[test]
    fn default_values_and_lambdas_belong_to_the_function() {
        let source = "def f(x=default()):\n    g = lambda: h()\n    return [k(i) for i in x]\n";
        let extraction = extract_source(source);
        let callees: Vec<_> = extraction.edges().iter().map(|e| e.callee()).collect();
        assert_eq!(callees, vec!["default", "h", "k"]);
        assert!(extraction.edges().iter().all(|e| e.caller() == "app.f"));
    }

    #[test]
    fn edges_record_call_lines() {
        let source = "def f():\n    first()\n\n    second(\n        arg,\n    )\n";
        let extraction = extract_source(source);
        let lines: Vec<_> = extraction
            .edges()
            .iter()
            .map(|e| e.location().line())
            .collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn duplicate_calls_are_kept() {
        let extraction = extract_source("def f():\n    g()\n    g()\n");
        assert_eq!(extraction.edges().len(), 2);
    }
}

mod summary_tests {
    use rstest::rstest;

    use super::extract_source;
    use crate::extract::SUMMARY_LIMIT;

    fn summary_of(source: &str) -> String {
        let extraction = extract_source(source);
        let node = extraction.nodes().get("app.f").expect("node present");
        node.summary().to_owned()
    }

    fn size_of(source: &str) -> usize {
        let extraction = extract_source(source);
        extraction
            .nodes()
            .get("app.f")
            .expect("node present")
            .size_hint()
    }

    #[rstest]
    #[case::single_line("def f():\n    '''Do the thing.'''\n", "Do the thing.")]
    #[case::multi_line(
        "def f():\n    '''\n    Summary here.\n\n    Details.\n    '''\n",
        "Summary here."
    )]
    #[case::trailing_space("def f():\n    '''Padded.   \n    more'''\n", "Padded.")]
    #[case::no_docstring("def f():\n    return 1\n", "")]
    #[case::not_first("def f():\n    x = 1\n    '''Late.'''\n", "")]
    #[case::f_string("def f():\n    f'Formatted.'\n", "")]
    #[case::after_comment("def f():\n    # note\n    '''Documented.'''\n", "Documented.")]
    #[case::concatenated("def f():\n    \"first\" \"second\"\n", "firstsecond")]
    #[case::concatenated_f_string("def f():\n    'plain' f'{x}'\n", "")]
    #[case::hex_escape("def f():\n    \"\\x41BC\"\n", "ABC")]
    fn docstring_summaries(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(summary_of(source), expected);
    }

    #[test]
    fn long_summaries_are_truncated() {
        let long = "a".repeat(SUMMARY_LIMIT + 50);
        let source = format!("def f():\n    '''{long}'''\n");
        assert_eq!(summary_of(&source).chars().count(), SUMMARY_LIMIT);
    }

    #[rstest]
    #[case::empty_body("def f():\n    pass\n", 0)]
    #[case::ellipsis("def f():\n    ...\n", 0)]
    #[case::docstring_only("def f():\n    '''Doc.'''\n", 0)]
    #[case::bare_calls("def f():\n    g()\n    h()\n", 0)]
    #[case::assignments("def f():\n    x = 1\n    x += 2\n    return x\n", 3)]
    #[case::compound("def f():\n    if x:\n        a()\n        b()\n    for i in y:\n        pass\n", 2)]
    #[case::nested_def("def f():\n    def g():\n        pass\n    return g\n", 2)]
    fn size_hint_counts_direct_statements(#[case] source: &str, #[case] expected: usize) {
        assert_eq!(size_of(source), expected);
    }
}

mod graph_tests {
    use crate::edge::CallEdge;
    use crate::graph::{CombinedGraph, NodeTable};
    use crate::node::{CallableKind, CallableNode, SourceLocation};

    fn node(name: &str, path: &str, summary: &str) -> CallableNode {
        CallableNode::new(name, CallableKind::Function, SourceLocation::new(path, 1))
            .with_summary(summary)
    }

    fn edge(caller: &str, callee: &str) -> CallEdge {
        CallEdge::new(caller, callee, SourceLocation::new("/src/a.py", 2))
    }

    fn sample_graph() -> CombinedGraph {
        let mut graph = CombinedGraph::new(2);
        let nodes: NodeTable = [
            node("a.ignite", "/src/a.py", "Start the engine."),
            node("a.mix", "/src/a.py", ""),
            node("b.plot", "/src/b.py", "Plot a course."),
        ]
        .into_iter()
        .collect();
        graph.merge(
            nodes,
            vec![
                edge("a.ignite", "a.mix"),
                edge("a.ignite", "print"),
                edge("a.mix", "min"),
                edge("b.plot", "a.ignite"),
            ],
        );
        graph
    }

    #[test]
    fn summary_counts_are_derived() {
        let graph = sample_graph();
        let summary = graph.summary();
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.functions, graph.nodes().len());
        assert_eq!(summary.calls, graph.edges().len());
    }

    #[test]
    fn merge_replaces_nodes_in_place() {
        let mut graph = sample_graph();
        let replacement: NodeTable = [node("a.mix", "/src/c.py", "Replaced.")]
            .into_iter()
            .collect();
        graph.merge(replacement, Vec::new());

        let names: Vec<_> = graph.nodes().iter().map(|n| n.qualified_name()).collect();
        assert_eq!(names, vec!["a.ignite", "a.mix", "b.plot"]);
        let mix = graph.node("a.mix").expect("node present");
        assert_eq!(mix.summary(), "Replaced.");
        assert_eq!(mix.location().path().as_str(), "/src/c.py");
    }

    #[test]
    fn focus_by_name_keeps_one_node_and_its_outgoing_edges() {
        let graph = sample_graph().focus("IGNITE");

        assert_eq!(graph.nodes().len(), 1);
        assert!(graph.node("a.ignite").is_some());
        assert_eq!(graph.edges().len(), 2);
        assert!(graph.edges().iter().all(|e| e.caller() == "a.ignite"));
        assert_eq!(graph.files_scanned(), 2);
    }

    #[test]
    fn focus_matches_summaries_and_paths() {
        assert_eq!(sample_graph().focus("course").nodes().len(), 1);
        assert_eq!(sample_graph().focus("/src/a.py").nodes().len(), 2);
    }

    #[test]
    fn focus_keeps_edges_to_filtered_out_callees() {
        let graph = sample_graph().focus("plot");
        let callees: Vec<_> = graph.edges().iter().map(|e| e.callee()).collect();
        assert_eq!(callees, vec!["a.ignite"]);
    }

    #[test]
    fn empty_focus_is_a_no_op() {
        assert_eq!(sample_graph().focus(""), sample_graph());
    }
}

mod payload_tests {
    use serde_json::json;

    use crate::edge::CallEdge;
    use crate::graph::{CombinedGraph, NodeTable};
    use crate::node::{CallableKind, CallableNode, SourceLocation};
    use crate::payload::GraphPayload;

    #[test]
    fn payload_uses_stable_key_names() {
        let mut graph = CombinedGraph::new(1);
        let nodes: NodeTable = [CallableNode::new(
            "engine.Engine.ignite",
            CallableKind::AsyncMethod,
            SourceLocation::new("/src/engine.py", 4),
        )
        .with_summary("Start.")
        .with_size_hint(3)]
        .into_iter()
        .collect();
        graph.merge(
            nodes,
            vec![CallEdge::new(
                "engine.Engine.ignite",
                "self.spark",
                SourceLocation::new("/src/engine.py", 6),
            )],
        );

        let value = serde_json::to_value(GraphPayload::from(&graph)).expect("serialise");

        assert_eq!(
            value,
            json!({
                "nodes": [{
                    "id": "engine.Engine.ignite",
                    "path": "/src/engine.py",
                    "lineno": 4,
                    "type": "async-method",
                    "doc": "Start.",
                    "complexity_hint": 3
                }],
                "edges": [{
                    "source": "engine.Engine.ignite",
                    "target": "self.spark",
                    "path": "/src/engine.py",
                    "lineno": 6
                }],
                "summary": {"files_scanned": 1, "functions": 1, "calls": 1}
            })
        );
    }

    #[test]
    fn empty_graph_payload_has_zero_counts() {
        let value =
            serde_json::to_value(GraphPayload::from(&CombinedGraph::new(0))).expect("serialise");
        assert_eq!(value["nodes"], json!([]));
        assert_eq!(value["edges"], json!([]));
        assert_eq!(
            value["summary"],
            json!({"files_scanned": 0, "functions": 0, "calls": 0})
        );
    }
}
