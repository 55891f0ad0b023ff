//! Tests of the page graph, pattern engine and exporter through the public API

use sitegraph::output::export;
use sitegraph::pattern::PatternEngine;
use sitegraph::url::strip_domain;
use sitegraph::SiteGraph;

#[test]
fn test_canonicalize_examples() {
    let engine = PatternEngine::default();

    assert_eq!(engine.canonicalize("/tag/5"), "/tag/*");
    assert_eq!(engine.canonicalize("/page/123"), "/page/*");
    assert_eq!(engine.canonicalize("/query?id=123"), "/query?id=*");
    assert_eq!(
        engine.canonicalize(
            "/lifestyle-sale/vip/gd2.html?saleType=2&channel=lifestyle&order=s_t_desc&price=0,149&sort=2"
        ),
        "/lifestyle-sale/vip/*.html?saleType=*&channel=*&order=*&price=*&sort=*"
    );
    assert_eq!(engine.canonicalize(""), "");
    assert_eq!(engine.canonicalize("/about/"), "/about/");
}

#[test]
fn test_custom_keyword_rule() {
    let engine = PatternEngine::new(&["author"]).unwrap();
    assert_eq!(engine.canonicalize("/author/alice"), "/author/*");
    assert_eq!(engine.canonicalize("/author/bob/"), "/author/*/");
}

#[test]
fn test_canonicalize_is_idempotent() {
    let engine = PatternEngine::new(&["author", "tag"]).unwrap();
    for path in [
        "/author/alice/",
        "/tag/love/page/2/",
        "/list/?page=3&sort=name",
        "/vip/gd2.html?x=1",
        "/plain/",
        "/",
    ] {
        let once = engine.canonicalize(path);
        assert_eq!(engine.canonicalize(&once), once, "not idempotent for {}", path);
    }
}

#[test]
fn test_every_added_pattern_resolves() {
    let engine = PatternEngine::new(&["tag"]).unwrap();
    let mut graph = SiteGraph::new();

    for path in ["/", "/tag/a/", "/tag/b/", "/item/1/", "/item/2/?x=3"] {
        let pattern = engine.canonicalize(path);
        graph.add_page(&pattern);
        let page = graph.page(&pattern).expect("pattern does not resolve");
        assert!(page.answers_to(&pattern));
    }
    assert_eq!(graph.len(), 4);
}

#[test]
fn test_redirect_shorter_wins() {
    let mut graph = SiteGraph::new();
    graph.add_page("/home.html/");
    graph.add_redirect("/home.html/", "/").unwrap();

    let page = graph.page("/").unwrap();
    assert_eq!(page.name(), "/");
    assert_eq!(page.aliases(), ["/home.html/"]);
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_redirect_merges_duplicate() {
    let mut graph = SiteGraph::new();
    graph.add_page("/");
    graph.add_link("/", "/a/");
    graph.add_link("/", "/b/");
    graph.add_redirect("/a/", "/b/").unwrap();

    assert_eq!(graph.len(), 2);
    let survivor = graph.page("/a/").unwrap();
    assert_eq!(survivor.name(), "/b/");
    assert!(survivor.aliases().contains(&"/a/".to_string()));
    assert!(graph.pages().all(|p| p.name() != "/a/"));

    let doc = export(&graph);
    let b = doc.node("/b/").unwrap().id;
    assert_eq!(doc.link_weight(0, b), Some(2));
    assert_eq!(doc.links.len(), 1);
}

#[test]
fn test_redirect_from_unknown_page_fails() {
    let mut graph = SiteGraph::new();
    graph.add_page("/");
    assert!(graph.add_redirect("/nowhere/", "/").is_err());
}

#[test]
fn test_edge_weight_accumulates() {
    let mut graph = SiteGraph::new();
    graph.add_link("/x/", "/y/");
    graph.add_link("/x/", "/y/");

    let doc = export(&graph);
    assert_eq!(doc.links.len(), 1);
    assert_eq!(doc.links[0].source, 0);
    assert_eq!(doc.links[0].target, 1);
    assert_eq!(doc.links[0].value, 2);
}

#[test]
fn test_strip_domain() {
    assert_eq!(strip_domain("//www.example.com/news.aspx", "example.com"), "/news.aspx");
    assert_eq!(
        strip_domain("//travel.example.com/", "example.com"),
        "travel.example.com/"
    );
}

#[test]
fn test_export_json_shape() {
    let mut graph = SiteGraph::new();
    graph.add_link("/", "/a/");

    let json = serde_json::to_value(export(&graph)).unwrap();
    assert_eq!(json["nodes"][0]["group"], "home");
    assert_eq!(json["nodes"][1]["group"], "page");
    assert_eq!(json["links"][0]["value"], 1);
}
