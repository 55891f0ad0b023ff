//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sitegraph::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use sitegraph::crawler::Coordinator;
use sitegraph::output::export;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given depth limit
fn create_test_config(max_depth: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth,
            max_pages: 50,
            request_delay: 0,
            timeout: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: Some("https://example.com/contact".to_string()),
        },
        output: OutputConfig::default(),
        rules: vec![],
    }
}

fn html_page(links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", anchors),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, page: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html_page(links))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_numeric_pages_collapse() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        &[
            "/page/1",
            "/page/2",
            "/about",
            "/logo.png",
            "https://other.org/",
            "mailto:someone@example.com",
            "#top",
        ],
    )
    .await;
    mount_page(&mock_server, "/page/1", &["/page/2", "/"]).await;
    mount_page(&mock_server, "/about", &[]).await;

    let config = create_test_config(3);
    let coordinator =
        Coordinator::new(&config, &mock_server.uri()).expect("Failed to create coordinator");
    let graph = coordinator.run().await.expect("Crawl failed");

    assert_eq!(graph.len(), 3, "Expected /, /page/*/ and /about/");
    assert!(graph.has_page("/page/*/"));
    assert!(graph.has_page("/about/"));

    let doc = export(&graph);
    let page = doc.node("/page/*/").expect("Missing /page/*/").id;
    let about = doc.node("/about/").expect("Missing /about/").id;
    assert_eq!(doc.nodes[0].name, "/");
    assert_eq!(doc.link_weight(0, page), Some(2));
    assert_eq!(doc.link_weight(0, about), Some(1));
    assert_eq!(doc.link_weight(page, 0), Some(1));
    assert_eq!(doc.links.len(), 3);
}

#[tokio::test]
async fn test_redirect_merges_into_root() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/home.html", "/a"]).await;
    Mock::given(method("GET"))
        .and(path("/home.html"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/a", &[]).await;

    let config = create_test_config(3);
    let coordinator =
        Coordinator::new(&config, &mock_server.uri()).expect("Failed to create coordinator");
    let graph = coordinator.run().await.expect("Crawl failed");

    assert_eq!(graph.len(), 2);
    let root = graph.root().expect("Missing root");
    assert_eq!(root.name(), "/");
    assert!(root.aliases().contains(&"/home.html/".to_string()));

    let doc = export(&graph);
    let a = doc.node("/a/").expect("Missing /a/").id;
    // The redirected request parsed the home page again under its old pattern
    assert_eq!(doc.link_weight(0, a), Some(2));
    assert_eq!(doc.link_weight(0, 0), None);
    assert_eq!(doc.links.len(), 1);
}

#[tokio::test]
async fn test_depth_limit() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/one"]).await;
    mount_page(&mock_server, "/one", &["/two"]).await;
    mount_page(&mock_server, "/two", &["/three"]).await;

    let config = create_test_config(1);
    let coordinator =
        Coordinator::new(&config, &mock_server.uri()).expect("Failed to create coordinator");
    let graph = coordinator.run().await.expect("Crawl failed");

    // /two is seen as a link target but never fetched
    assert!(graph.has_page("/one/"));
    assert!(graph.has_page("/two/"));
    assert!(!graph.has_page("/three/"));
}

#[tokio::test]
async fn test_failed_fetches_are_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/missing", "/data", "/ok"]).await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", &["/deeper"]).await;

    let config = create_test_config(3);
    let coordinator =
        Coordinator::new(&config, &mock_server.uri()).expect("Failed to create coordinator");
    let graph = coordinator.run().await.expect("Crawl failed");

    // Unfetchable pages stay in the graph as link targets
    assert!(graph.has_page("/missing/"));
    assert!(graph.has_page("/data/"));
    assert!(graph.has_page("/deeper/"));
    assert_eq!(graph.len(), 5);
}

#[tokio::test]
async fn test_invalid_root_url() {
    let config = create_test_config(1);
    assert!(Coordinator::new(&config, "not a url").is_err());
    assert!(Coordinator::new(&config, "ftp://example.com/").is_err());
}
