//! Research runs over parsed documents.

use std::io::Write;

use futures::executor::block_on;
use parsed_paper::research::{LinkTarget, ResearchContext, WordCount, run_research};
use parsed_paper::{Error, ResearchConfig, Researcher, parse_html};
use serde_json::json;

const ARTICLE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Ignored</title><style>a { color: red }</style></head>
<body>
  <h1>Link <a href="https://yoast.com/">building</a></h1>
  <p>Read the <a href="https://yoast.com/guide" rel="nofollow">guide</a> or
     <a href="http://example.org/elsewhere">elsewhere</a>.</p>
  <ul>
    <li><a href="#top">Back to top</a></li>
    <li><a href="ftp://files.example.org/pub">Files</a></li>
  </ul>
  <script>document.write('<a href="http://tracker.example">t</a>')</script>
</body>
</html>"##;

#[test]
fn test_link_statistics_over_document() {
    let tree = parse_html(ARTICLE);
    let config = ResearchConfig::new().with_site_domain("yoast.com");

    let value = block_on(Researcher::with_defaults().do_research("linkStatistics", &tree, &config))
        .unwrap();
    let records = value.as_array().unwrap();

    let summary: Vec<_> = records
        .iter()
        .map(|r| (r["href"].clone(), r["target"].clone(), r["noFollow"].clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (json!("https://yoast.com/"), json!("internal"), json!(false)),
            (json!("https://yoast.com/guide"), json!("internal"), json!(true)),
            (json!("http://example.org/elsewhere"), json!("external"), json!(false)),
            (json!("#top"), json!("other"), json!(false)),
            (json!("ftp://files.example.org/pub"), json!("other"), json!(false)),
        ]
    );
}

#[test]
fn test_without_domain_links_are_external() {
    let tree = parse_html(ARTICLE);
    let records = block_on(run_research(
        &parsed_paper::research::LinkStatistics,
        ResearchContext::new(&tree, &ResearchConfig::new()),
        tree.root(),
    ))
    .unwrap();

    let external = records
        .iter()
        .filter(|r| r.target == LinkTarget::External)
        .count();
    assert_eq!(external, 3);
}

#[test]
fn test_word_count_skips_irrelevant_content() {
    let tree = parse_html(ARTICLE);
    let count = block_on(run_research(
        &WordCount,
        ResearchContext::new(&tree, &ResearchConfig::new()),
        tree.root(),
    ))
    .unwrap();
    // "Ignored" sits in <title>, a structured node, and still counts
    assert_eq!(count, 1 + 2 + 5 + 3 + 1);
}

#[test]
fn test_do_all_reports_every_research() {
    let tree = parse_html(ARTICLE);
    let results = block_on(Researcher::with_defaults().do_all(&tree, &ResearchConfig::new()));
    assert!(results.values().all(Result::is_ok));
    assert_eq!(
        results.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["linkStatistics", "wordCount"]
    );
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "siteDomain": "yoast.com" }}"#).unwrap();
    let config = ResearchConfig::from_path(file.path()).unwrap();
    assert_eq!(config.site_domain(), Some("yoast.com"));
}

#[test]
fn test_config_from_missing_file() {
    let result = ResearchConfig::from_path("/nonexistent/parsed-paper.json");
    assert!(matches!(result, Err(Error::Io(_))));
}
