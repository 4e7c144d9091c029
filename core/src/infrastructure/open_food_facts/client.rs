use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::{
    domain::{
        common::{OpenFoodFactsConfig, entities::app_errors::CoreError},
        product::{
            entities::{CandidateRecord, ProductRecord},
            ports::{CandidateSource, ProductLookup},
        },
    },
    infrastructure::open_food_facts::mappers::{PRODUCT_FIELDS, SearchResponse},
};

/// Client for the Open Food Facts product search
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    base_url: String,
    timeout: Duration,
    max_retries: usize,
    client: Client,
}

impl OpenFoodFactsClient {
    pub fn new(config: OpenFoodFactsConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CoreError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            max_retries: config.max_retries.max(1),
            client,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/cgi/search.pl", self.base_url)
    }

    async fn search(&self, terms: &str, page_size: usize) -> Result<SearchResponse, CoreError> {
        let page_size = page_size.to_string();
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            let timeout = attempt_timeout(self.timeout, attempt);

            let response = self
                .client
                .get(self.search_url())
                .query(&[
                    ("search_terms", terms),
                    ("search_simple", "1"),
                    ("action", "process"),
                    ("json", "1"),
                    ("page_size", page_size.as_str()),
                    ("fields", PRODUCT_FIELDS),
                ])
                .timeout(timeout)
                .send()
                .await;

            let error = match response {
                Ok(resp) if resp.status().is_success() => match resp.json::<SearchResponse>().await
                {
                    Ok(parsed) => return Ok(parsed),
                    Err(e) if is_retryable_error(&e) => {
                        format!("failed to parse product search response: {}", e)
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse Open Food Facts response: {}", e);
                        return Err(CoreError::UpstreamUnavailable(format!(
                            "failed to parse product search response: {}",
                            e
                        )));
                    }
                },
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp
                        .text()
                        .await
                        .unwrap_or_else(|_| "<body unavailable>".to_string());
                    if !should_retry(status) {
                        tracing::error!("Open Food Facts error: {} - {}", status, body);
                        return Err(CoreError::UpstreamUnavailable(format!(
                            "product search returned error: {} - {}",
                            status, body
                        )));
                    }
                    format!("product search returned error: {}", status)
                }
                Err(e) if is_retryable_error(&e) => format!("product search failed: {}", e),
                Err(e) => {
                    tracing::error!("Open Food Facts request failed: {}", e);
                    return Err(CoreError::UpstreamUnavailable(format!(
                        "product search failed: {}",
                        e
                    )));
                }
            };

            if attempt >= self.max_retries {
                tracing::error!(
                    "Open Food Facts unavailable after {} attempt(s): {}",
                    attempt,
                    error
                );
                return Err(CoreError::UpstreamUnavailable(error));
            }

            tracing::warn!(
                attempt,
                next_timeout_secs = attempt_timeout(self.timeout, attempt + 1).as_secs(),
                "Retrying Open Food Facts search: {}",
                error
            );
            tokio::time::sleep(retry_backoff(attempt)).await;
        }
    }
}

/// Each attempt waits longer than the previous one
fn attempt_timeout(base: Duration, attempt: usize) -> Duration {
    base.saturating_mul(attempt.max(1) as u32)
}

fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_body() || err.is_decode()
}

fn retry_backoff(attempt: usize) -> Duration {
    let capped = attempt.min(4) as u32;
    Duration::from_millis(250 * (1 << capped))
}

impl ProductLookup for OpenFoodFactsClient {
    async fn lookup(&self, query: String) -> Result<Option<ProductRecord>, CoreError> {
        let response = self.search(&query, 1).await?;
        if response.is_empty() {
            tracing::debug!("Open Food Facts has no product for {:?}", query);
            return Ok(None);
        }

        Ok(response.products().first().map(ProductRecord::from))
    }
}

impl CandidateSource for OpenFoodFactsClient {
    async fn search_by_category(
        &self,
        category: String,
        count: usize,
    ) -> Result<Vec<CandidateRecord>, CoreError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let response = self.search(&category, count).await?;
        Ok(response
            .products()
            .iter()
            .map(CandidateRecord::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::processing::entities::ProcessingTier;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    fn config(base_url: String, max_retries: usize) -> OpenFoodFactsConfig {
        OpenFoodFactsConfig {
            base_url,
            timeout_secs: 2,
            max_retries,
            ..Default::default()
        }
    }

    /// Answers the n-th connection with the n-th response, repeating the last
    /// one once the list runs out. Returns the base URL and a connection counter.
    async fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = connections.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let index = counter.fetch_add(1, Ordering::SeqCst);
                let (status_line, body) = responses[index.min(responses.len() - 1)];

                let mut buffer = [0u8; 4096];
                let _ = socket.read(&mut buffer).await;
                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", address), connections)
    }

    #[test]
    fn test_attempt_timeout_grows() {
        let base = Duration::from_secs(8);
        assert_eq!(attempt_timeout(base, 1), Duration::from_secs(8));
        assert_eq!(attempt_timeout(base, 2), Duration::from_secs(16));
        assert_eq!(attempt_timeout(base, 3), Duration::from_secs(24));
    }

    #[test]
    fn test_retry_backoff_is_capped() {
        assert_eq!(retry_backoff(1), Duration::from_millis(500));
        assert_eq!(retry_backoff(2), Duration::from_millis(1000));
        assert_eq!(retry_backoff(10), retry_backoff(4));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(should_retry(StatusCode::TOO_MANY_REQUESTS));
        assert!(should_retry(StatusCode::BAD_GATEWAY));
        assert!(!should_retry(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client =
            OpenFoodFactsClient::new(config("https://example.org/".to_string(), 3)).unwrap();
        assert_eq!(client.search_url(), "https://example.org/cgi/search.pl");
    }

    #[tokio::test]
    async fn test_lookup_maps_first_product() {
        let (base_url, _) = serve(vec![(
            "200 OK",
            r#"{"count": 1, "products": [{"product_name": "Oat Drink", "ingredients_text": "water, oats 10%, rapeseed oil, salt", "nova_group": "3", "categories_tags": ["en:plant-milks"]}]}"#,
        )])
        .await;
        let client = OpenFoodFactsClient::new(config(base_url, 1)).unwrap();

        let record = client.lookup("oat drink".to_string()).await.unwrap().unwrap();
        assert_eq!(record.name, "Oat Drink");
        assert_eq!(record.upstream_tier, Some(ProcessingTier::Processed));
        assert_eq!(record.categories, vec!["en:plant-milks"]);
    }

    #[tokio::test]
    async fn test_lookup_without_results_is_none() {
        let (base_url, _) = serve(vec![("200 OK", r#"{"count": 0, "products": []}"#)]).await;
        let client = OpenFoodFactsClient::new(config(base_url, 1)).unwrap();

        assert_eq!(client.lookup("nothing".to_string()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_null_products_is_not_found_without_retry() {
        let (base_url, connections) =
            serve(vec![("200 OK", r#"{"count": 0, "products": null}"#)]).await;
        let client = OpenFoodFactsClient::new(config(base_url, 3)).unwrap();

        assert_eq!(client.lookup("nothing".to_string()).await.unwrap(), None);
        assert_eq!(connections.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (base_url, connections) = serve(vec![("400 Bad Request", r#"{"error": "bad"}"#)]).await;
        let client = OpenFoodFactsClient::new(config(base_url, 3)).unwrap();

        let result = client.search_by_category("sodas".to_string(), 9).await;
        assert!(matches!(result, Err(CoreError::UpstreamUnavailable(_))));
        assert_eq!(connections.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_retries_up_to_max_attempts() {
        let (base_url, connections) =
            serve(vec![("503 Service Unavailable", r#"{"error": "busy"}"#)]).await;
        let client = OpenFoodFactsClient::new(config(base_url, 2)).unwrap();

        let result = client.lookup("cola".to_string()).await;
        assert!(matches!(result, Err(CoreError::UpstreamUnavailable(_))));
        assert_eq!(connections.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_server_error_then_success() {
        let (base_url, connections) = serve(vec![
            ("503 Service Unavailable", r#"{"error": "busy"}"#),
            (
                "200 OK",
                r#"{"count": 1, "products": [{"product_name": "Cola", "nova_group": 4}]}"#,
            ),
        ])
        .await;
        let client = OpenFoodFactsClient::new(config(base_url, 3)).unwrap();

        let record = client.lookup("cola".to_string()).await.unwrap().unwrap();
        assert_eq!(record.name, "Cola");
        assert_eq!(connections.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let client = OpenFoodFactsClient::new(config("http://127.0.0.1:1".to_string(), 2)).unwrap();

        let result = client.lookup("cola".to_string()).await;
        assert!(matches!(result, Err(CoreError::UpstreamUnavailable(_))));
    }
}
