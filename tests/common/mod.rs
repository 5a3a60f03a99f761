//! Common test utilities for feed-fetch integration tests

use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serve a one-item feed at `/rss` whose link points at `/item` on the same server
pub async fn serve_single_item_feed(server: &MockServer, title: &str, pub_date: &str) {
    let body = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Integration Feed</title>
    <link>{uri}</link>
    <description>fixture</description>
    <item>
      <title>{title}</title>
      <guid>{uri}/details/1</guid>
      <pubDate>{pub_date}</pubDate>
      <link>{uri}/item</link>
    </item>
  </channel>
</rss>"#,
        uri = server.uri(),
        title = title,
        pub_date = pub_date,
    );

    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Sorted file names in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read output dir")
        .map(|e| {
            e.expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
