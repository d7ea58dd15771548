use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{HourlySeries, UpstreamConfig, UpstreamError};

use super::RadiationProvider;

const HOURLY_VARIABLE: &str = "shortwave_radiation";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    base_url: String,
    timezone: String,
    max_retries: u32,
}

impl OpenMeteoProvider {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            bail!("upstream.base_url must not be empty");
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim().to_string(),
            timezone: config.timezone.clone(),
            max_retries: config.max_retries,
        })
    }

    async fn fetch_once(&self, latitude: f64, longitude: f64) -> Result<HourlySeries, UpstreamError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", HOURLY_VARIABLE.to_string()),
                ("timezone", self.timezone.clone()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status { status, body: truncate_body(&body) });
        }

        parse_forecast(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    hourly: HourlySeries,
}

fn parse_forecast(body: &str) -> Result<HourlySeries, UpstreamError> {
    let parsed: OmForecastResponse = serde_json::from_str(body)?;
    Ok(parsed.hourly)
}

#[async_trait]
impl RadiationProvider for OpenMeteoProvider {
    async fn fetch_hourly_radiation(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<HourlySeries, UpstreamError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(latitude, longitude).await {
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        latitude,
                        longitude,
                        attempt,
                        "Open-Meteo request failed, retrying: {err}"
                    );
                }
                other => return other,
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
    };

    /// Local stand-in for Open-Meteo. Records each request line; `reply` of `None` never answers.
    async fn stub_upstream(reply: Option<String>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else { return };
                let seen = Arc::clone(&seen);
                let reply = reply.clone();
                tokio::spawn(async move { serve_once(stream, seen, reply).await });
            }
        });

        (format!("http://{addr}/v1/forecast"), requests)
    }

    async fn serve_once(mut stream: TcpStream, seen: Arc<Mutex<Vec<String>>>, reply: Option<String>) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
        let head = String::from_utf8_lossy(&buf);
        let request_line = head.lines().next().unwrap_or_default().to_string();
        seen.lock().unwrap().push(request_line);

        match reply {
            Some(reply) => {
                stream.write_all(reply.as_bytes()).await.ok();
                stream.shutdown().await.ok();
            }
            None => tokio::time::sleep(Duration::from_secs(30)).await,
        }
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn provider_for(base_url: String, timeout_secs: u64, max_retries: u32) -> OpenMeteoProvider {
        OpenMeteoProvider::new(&UpstreamConfig {
            base_url,
            timeout_secs,
            max_retries,
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn parses_hourly_block() {
        let body = r#"{
            "latitude": 18.5,
            "longitude": -69.9375,
            "timezone": "America/Santo_Domingo",
            "hourly_units": { "time": "iso8601", "shortwave_radiation": "W/m²" },
            "hourly": {
                "time": ["2024-01-01T00:00", "2024-01-01T01:00"],
                "shortwave_radiation": [0.0, 100.0]
            }
        }"#;

        let series = parse_forecast(body).expect("valid forecast body");
        assert_eq!(series.time, vec!["2024-01-01T00:00", "2024-01-01T01:00"]);
        assert_eq!(series.shortwave_radiation, vec![0.0, 100.0]);
    }

    #[test]
    fn missing_hourly_block_is_decode_error() {
        let err = parse_forecast(r#"{"error": true, "reason": "bad latitude"}"#).unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[test]
    fn missing_radiation_field_is_decode_error() {
        let err = parse_forecast(r#"{"hourly": {"time": ["2024-01-01T00:00"]}}"#).unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[test]
    fn null_values_are_decode_error() {
        let body = r#"{"hourly": {"time": ["2024-01-01T00:00"], "shortwave_radiation": [null]}}"#;
        assert!(matches!(parse_forecast(body), Err(UpstreamError::Decode(_))));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(250);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_request_error() {
        let provider = OpenMeteoProvider::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:1/v1/forecast".into(),
            timeout_secs: 2,
            max_retries: 1,
            ..UpstreamConfig::default()
        })
        .unwrap();

        let err = provider.fetch_hourly_radiation(18.4861, -69.9312).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Request(_)));
    }

    #[tokio::test]
    async fn request_carries_coordinates_variable_and_timezone() {
        let body = r#"{"hourly":{"time":["2024-01-01T00:00"],"shortwave_radiation":[0.0]}}"#;
        let (base_url, requests) = stub_upstream(Some(http_response("200 OK", body))).await;

        let series = provider_for(base_url, 5, 0)
            .fetch_hourly_radiation(18.4861, -69.9312)
            .await
            .expect("stub forecast");

        assert_eq!(series.time, vec!["2024-01-01T00:00"]);
        assert_eq!(
            *requests.lock().unwrap(),
            vec![
                "GET /v1/forecast?latitude=18.4861&longitude=-69.9312&hourly=shortwave_radiation\
                 &timezone=America%2FSanto_Domingo&forecast_days=1 HTTP/1.1"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn error_status_maps_to_status_without_retry() {
        let reply = http_response("500 Internal Server Error", r#"{"error":true}"#);
        let (base_url, requests) = stub_upstream(Some(reply)).await;

        let err = provider_for(base_url, 5, 1)
            .fetch_hourly_radiation(19.4517, -70.6970)
            .await
            .unwrap_err();

        match err {
            UpstreamError::Status { status, ref body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, r#"{"error":true}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn silent_upstream_times_out_and_retries_once() {
        let (base_url, requests) = stub_upstream(None).await;

        let err = provider_for(base_url, 1, 1)
            .fetch_hourly_radiation(18.2085, -71.1008)
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Request(ref e) if e.is_timeout()), "{err:?}");
        assert!(err.is_transient());
        assert_eq!(requests.lock().unwrap().len(), 2);
    }
}
