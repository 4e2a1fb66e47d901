//! Article store client for a PostgREST-compatible `articles` endpoint.
//!
//! Translates an [`ArticleQuery`] into horizontal filters (`or=`, `order=`,
//! `limit=`, `offset=`) and returns the rows as [`Article`]s.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::store::{Article, ArticleOrder, ArticleQuery, ArticleStore, RegionFilter};

const ARTICLE_COLUMNS: &str = "id,title,category,region,published_at,created_at,view_count";

#[derive(Debug, Clone)]
pub struct ArticleApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub total_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ArticleApiClient {
    client: Client,
    articles_url: Url,
    api_key: Option<String>,
}

impl ArticleApiClient {
    /// # Errors
    /// Returns an error when the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ArticleApiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.total_timeout)
            .build()
            .context("failed to build article API HTTP client")?;

        let mut base = config.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let articles_url = Url::parse(&base)
            .context("invalid article API base URL")?
            .join("rest/v1/articles")
            .context("failed to build articles URL")?;

        Ok(Self {
            client,
            articles_url,
            api_key: config.api_key,
        })
    }

    fn request_url(&self, query: &ArticleQuery) -> Url {
        let mut url = self.articles_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", ARTICLE_COLUMNS);
            pairs.append_pair("status", "eq.published");
            pairs.append_pair("or", &or_clause(&query.filter));
            pairs.append_pair("order", order_clause(query.order));
            pairs.append_pair("limit", &query.limit.to_string());
            if query.offset > 0 {
                pairs.append_pair("offset", &query.offset.to_string());
            }
        }
        url
    }
}

#[async_trait]
impl ArticleStore for ArticleApiClient {
    async fn fetch_published(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        if query.filter.is_empty() || query.limit == 0 {
            return Ok(Vec::new());
        }

        let url = self.request_url(query);
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("article API request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("article API returned error status {status}: {error_body}");
        }

        let articles = response
            .json::<Vec<Article>>()
            .await
            .context("failed to deserialize article API response")?;
        debug!(
            count = articles.len(),
            order = query.order.column(),
            "fetched articles from API"
        );
        Ok(articles)
    }
}

fn order_clause(order: ArticleOrder) -> &'static str {
    match order {
        ArticleOrder::PublishedAt => "published_at.desc.nullslast",
        ArticleOrder::ViewCount => "view_count.desc.nullslast,published_at.desc.nullslast",
    }
}

/// `(category.ilike.*name*,...,region.ilike.slug,...)`
///
/// `ilike` without wildcards is a case-insensitive equality on `region`.
fn or_clause(filter: &RegionFilter) -> String {
    let names = filter
        .names
        .iter()
        .map(|name| format!("category.ilike.{}", quote(&format!("*{name}*"))));
    let slugs = filter
        .slugs
        .iter()
        .map(|slug| format!("region.ilike.{}", quote(slug)));
    let conditions: Vec<String> = names.chain(slugs).collect();
    format!("({})", conditions.join(","))
}

/// Double-quote values containing PostgREST reserved characters.
fn quote(value: &str) -> String {
    if value.contains([',', '.', ':', '(', ')', '"', '\\']) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> ArticleApiConfig {
        ArticleApiConfig {
            base_url,
            api_key: Some("anon".to_string()),
            connect_timeout: Duration::from_secs(3),
            total_timeout: Duration::from_secs(10),
        }
    }

    fn naju_query(order: ArticleOrder) -> ArticleQuery {
        ArticleQuery::new(
            RegionFilter {
                names: vec!["나주".into(), "광주".into()],
                slugs: vec!["naju".into(), "gwangju".into()],
            },
            order,
            10,
        )
    }

    #[test]
    fn or_clause_combines_names_and_slugs() {
        let query = naju_query(ArticleOrder::PublishedAt);
        assert_eq!(
            or_clause(&query.filter),
            "(category.ilike.*나주*,category.ilike.*광주*,region.ilike.naju,region.ilike.gwangju)"
        );
    }

    #[test]
    fn quote_escapes_reserved_values() {
        assert_eq!(quote("naju"), "naju");
        assert_eq!(quote("a,b"), "\"a,b\"");
        assert_eq!(quote("say \"hi\"."), "\"say \\\"hi\\\".\"");
    }

    #[tokio::test]
    async fn fetch_sends_filters_and_parses_rows() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {
                "id": "a1",
                "title": "나주 배 축제",
                "category": "나주",
                "region": "Naju",
                "published_at": "2026-10-18T01:00:00Z",
                "created_at": "2026-10-18T00:00:00Z",
                "view_count": 12
            },
            {
                "id": "a2",
                "title": "광주 버스",
                "category": "광주",
                "region": null,
                "published_at": null,
                "created_at": "2026-10-17T00:00:00Z",
                "view_count": null
            }
        ]);

        Mock::given(method("GET"))
            .and(path("/rest/v1/articles"))
            .and(query_param("status", "eq.published"))
            .and(query_param(
                "order",
                "view_count.desc.nullslast,published_at.desc.nullslast",
            ))
            .and(query_param("limit", "10"))
            .and(query_param(
                "or",
                "(category.ilike.*나주*,category.ilike.*광주*,region.ilike.naju,region.ilike.gwangju)",
            ))
            .and(header("apikey", "anon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = ArticleApiClient::new(test_config(server.uri())).expect("client should build");
        let articles = client
            .fetch_published(&naju_query(ArticleOrder::ViewCount))
            .await
            .expect("fetch should succeed");

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].views(), 12);
        assert!(articles[1].published_at.is_none());
        assert!(articles[1].created_at.is_some());
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/articles"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = ArticleApiClient::new(test_config(server.uri())).expect("client should build");
        let error = client
            .fetch_published(&naju_query(ArticleOrder::PublishedAt))
            .await
            .expect_err("503 should fail");
        assert!(error.to_string().contains("503"));
    }

    #[tokio::test]
    async fn empty_filter_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let client = ArticleApiClient::new(test_config(server.uri())).expect("client should build");
        let query = ArticleQuery::new(RegionFilter::default(), ArticleOrder::PublishedAt, 5);
        let articles = client.fetch_published(&query).await.expect("no request");
        assert!(articles.is_empty());
    }
}
