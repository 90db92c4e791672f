use crate::domain::model::Fact;
use crate::domain::ports::FactGetter;
use crate::utils::error::{CatError, ProviderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use url::Url;

const FACTS_SEGMENT: &str = "facts";

#[derive(Debug, Deserialize)]
struct FactResponse {
    text: String,
}

/// Fact provider client: `GET <base_url>/facts` returning `{"text": ...}`.
#[derive(Debug, Clone)]
pub struct FactService {
    client: Client,
    base_url: String,
}

impl FactService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(CatError::MissingDependency {
                parameter: "base_url",
            });
        }

        Ok(Self { client, base_url })
    }

    fn facts_url(&self) -> std::result::Result<Url, ProviderError> {
        let construction = |reason: String| ProviderError::RequestConstruction {
            location: super::redact_location(&self.base_url),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| construction(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| construction("URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(FACTS_SEGMENT);

        Ok(url)
    }
}

#[async_trait]
impl FactGetter for FactService {
    async fn get_fact(&self, ctx: &CancellationToken) -> std::result::Result<Fact, ProviderError> {
        let url = self.facts_url()?;
        let response: FactResponse = super::get_json(&self.client, url, ctx).await?;
        Ok(Fact::new(response.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TransportFailure;
    use httpmock::prelude::*;
    use std::time::{Duration, Instant};

    const SAMPLE_FACT: &str = r#"{
        "used": false,
        "source": "api",
        "type": "cat",
        "deleted": false,
        "_id": "591f98703b90f7150a19c180",
        "__v": 0,
        "text": "Jaguars are the only big cats that don't roar.",
        "updatedAt": "2020-01-02T02:02:48.616Z",
        "createdAt": "2018-01-04T01:10:54.673Z",
        "status": {"verified": true, "sentCount": 1},
        "user": "5a9ac18c7478810ea6c06381"
    }"#;

    #[test]
    fn test_new_rejects_empty_base_url() {
        let err = FactService::new(Client::new(), "").unwrap_err();
        assert!(matches!(
            err,
            CatError::MissingDependency {
                parameter: "base_url"
            }
        ));
    }

    #[test]
    fn test_facts_url_appends_segment() {
        let service = FactService::new(Client::new(), "http://facts.test").unwrap();
        assert_eq!(service.facts_url().unwrap().as_str(), "http://facts.test/facts");

        let service = FactService::new(Client::new(), "http://facts.test/api/").unwrap();
        assert_eq!(
            service.facts_url().unwrap().as_str(),
            "http://facts.test/api/facts"
        );
    }

    #[tokio::test]
    async fn test_get_fact_successful_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/facts");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(SAMPLE_FACT);
        });

        let service = FactService::new(Client::new(), server.base_url()).unwrap();
        let fact = service.get_fact(&CancellationToken::new()).await.unwrap();

        api_mock.assert();
        assert_eq!(fact, Fact::from("Jaguars are the only big cats that don't roar."));
    }

    #[tokio::test]
    async fn test_get_fact_non_success_status_is_transport_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/facts");
            then.status(503);
        });

        let service = FactService::new(Client::new(), server.base_url()).unwrap();
        let err = service.get_fact(&CancellationToken::new()).await.unwrap_err();

        api_mock.assert();
        match err {
            ProviderError::Transport {
                source: TransportFailure::Status(status),
                ..
            } => assert_eq!(status.as_u16(), 503),
            other => panic!("expected status failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_fact_invalid_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/facts");
            then.status(200).body("some-invalid-response");
        });

        let service = FactService::new(Client::new(), server.base_url()).unwrap();
        let err = service.get_fact(&CancellationToken::new()).await.unwrap_err();

        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_get_fact_missing_text_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/facts");
            then.status(200).json_body(serde_json::json!({"fact": "wrong field"}));
        });

        let service = FactService::new(Client::new(), server.base_url()).unwrap();
        let err = service.get_fact(&CancellationToken::new()).await.unwrap_err();

        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_get_fact_unparseable_base_url() {
        let service = FactService::new(Client::new(), "some-baseurl").unwrap();
        let err = service.get_fact(&CancellationToken::new()).await.unwrap_err();

        match err {
            ProviderError::RequestConstruction { location, .. } => {
                assert_eq!(location, "some-baseurl")
            }
            other => panic!("expected request construction error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_fact_error_does_not_leak_query_string() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/facts");
            then.status(500);
        });

        let base_url = format!("{}?api_key=SECRET123", server.base_url());
        let service = FactService::new(Client::new(), base_url).unwrap();
        let err = service.get_fact(&CancellationToken::new()).await.unwrap_err();

        assert!(!err.to_string().contains("SECRET123"), "{}", err);
    }

    #[tokio::test]
    async fn test_get_fact_connection_refused_is_network_error() {
        let service = FactService::new(Client::new(), "http://127.0.0.1:1").unwrap();
        let err = service.get_fact(&CancellationToken::new()).await.unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Transport {
                source: TransportFailure::Network(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_get_fact_cancelled_token_skips_request() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/facts");
            then.status(200).body(SAMPLE_FACT);
        });

        let ctx = CancellationToken::new();
        ctx.cancel();

        let service = FactService::new(Client::new(), server.base_url()).unwrap();
        let err = service.get_fact(&ctx).await.unwrap_err();

        api_mock.assert_hits(0);
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_get_fact_cancelled_mid_flight() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/facts");
            then.status(200)
                .delay(Duration::from_secs(5))
                .body(SAMPLE_FACT);
        });

        let ctx = CancellationToken::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let service = FactService::new(Client::new(), server.base_url()).unwrap();
        let started = Instant::now();
        let err = service.get_fact(&ctx).await.unwrap_err();

        assert!(err.is_cancelled());
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
