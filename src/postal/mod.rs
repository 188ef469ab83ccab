use std::future::Future;
use std::time::Duration;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use crate::config::Settings;
use crate::postal::model::LookupEnvelope;

pub use error::LookupError;
pub use model::{InvalidPinCode, PinCode, PostOffice};

mod error;
pub mod model;

const UA: &str = concat!("pincode-check/", env!("CARGO_PKG_VERSION"));

/// how much of an unparseable body is kept for diagnostics
const BODY_EXCERPT_LEN: usize = 500;

/// Anything able to resolve a PIN code to the post offices it serves.
pub trait PincodeLookup {
    fn lookup(&self, pincode: &PinCode) -> impl Future<Output = Result<Vec<PostOffice>, LookupError>>;
}

impl<T: PincodeLookup> PincodeLookup for &T {
    fn lookup(&self, pincode: &PinCode) -> impl Future<Output = Result<Vec<PostOffice>, LookupError>> {
        (**self).lookup(pincode)
    }
}

/// HTTP client for the postal PIN code service (api.postalpincode.in)
pub struct PostalClient {
    client: Client,
    base_url: String,
}

impl PostalClient {
    pub fn new(settings: &Settings) -> Result<Self, LookupError> {
        Ok(
            Self {
                client: Client::builder()
                    .default_headers(Self::default_headers())
                    .timeout(Duration::from_secs(settings.timeout_secs))
                    .build()?,
                base_url: settings.base_url.trim_end_matches('/').to_owned(),
            }
        )
    }

    fn default_headers() -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(USER_AGENT, HeaderValue::from_static(UA));
        map
    }

    fn url(&self, pincode: &PinCode) -> String {
        format!("{}/pincode/{}", self.base_url, pincode)
    }
}

impl PincodeLookup for PostalClient {
    async fn lookup(&self, pincode: &PinCode) -> Result<Vec<PostOffice>, LookupError> {
        let url = self.url(pincode);
        debug!("looking up [{}] via [{}]", pincode, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::HttpStatus(status.as_u16()));
        }
        let body = response.text().await?;
        parse_body(&body)
    }
}

/// Interpret a `/pincode/{code}` response body.
///
/// The service wraps its answer in a one-element array; only the first
/// element is considered.
pub fn parse_body(body: &str) -> Result<Vec<PostOffice>, LookupError> {
    let envelopes: Vec<LookupEnvelope> = serde_json::from_str(body).map_err(|e| LookupError::Malformed {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_EXCERPT_LEN).collect()),
    })?;
    let envelope = envelopes.into_iter().next()
        .ok_or_else(|| LookupError::Malformed {
            message: "empty response array".to_owned(),
            body: None,
        })?;

    if !envelope.is_success() {
        return Err(LookupError::Status {
            message: envelope.message.unwrap_or_default(),
            status: envelope.status,
        });
    }
    match envelope.post_office {
        Some(offices) if !offices.is_empty() => Ok(offices),
        _ => Err(LookupError::NoPostOffices),
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use super::*;

    const SUCCESS_BODY: &str = r#"[{
        "Message": "Number of pincode(s) found:2",
        "Status": "Success",
        "PostOffice": [
            {"Name": "Banashankari", "District": "Bangalore", "State": "Karnataka", "Pincode": "560050"},
            {"Name": "Banashankari III Stage", "District": "Bangalore", "State": "Karnataka", "Pincode": "560085"}
        ]
    }]"#;

    #[test]
    fn parses_success_body() {
        let offices = parse_body(SUCCESS_BODY).unwrap();
        assert_eq!(offices.len(), 2);
        assert_eq!(offices[0], PostOffice::new("Banashankari", "Bangalore", "Karnataka"));
        assert_eq!(offices[1].name, "Banashankari III Stage");
    }

    #[test]
    fn error_status_is_reported() {
        let body = r#"[{"Message":"No records found","Status":"Error","PostOffice":null}]"#;
        match parse_body(body) {
            Err(LookupError::Status { status, message }) => {
                assert_eq!(status, "Error");
                assert_eq!(message, "No records found");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn success_without_post_offices() {
        let body = r#"[{"Message":"","Status":"Success","PostOffice":[]}]"#;
        assert!(matches!(parse_body(body), Err(LookupError::NoPostOffices)));

        let body = r#"[{"Message":"","Status":"Success","PostOffice":null}]"#;
        assert!(matches!(parse_body(body), Err(LookupError::NoPostOffices)));
    }

    #[test]
    fn malformed_bodies() {
        assert!(matches!(parse_body("<html>502 Bad Gateway</html>"), Err(LookupError::Malformed { body: Some(_), .. })));
        assert!(matches!(parse_body("[]"), Err(LookupError::Malformed { body: None, .. })));
        assert!(matches!(parse_body(r#"{"Status":"Success"}"#), Err(LookupError::Malformed { .. })));
    }

    #[test]
    fn malformed_body_excerpt_is_truncated() {
        let body = "x".repeat(2 * BODY_EXCERPT_LEN);
        match parse_body(&body) {
            Err(LookupError::Malformed { body: Some(excerpt), .. }) => assert_eq!(excerpt.len(), BODY_EXCERPT_LEN),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Serve one canned HTTP response on a local port and return the base URL
    /// plus a handle yielding the request line that was received.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body,
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).lines().next().unwrap_or_default().to_owned()
        });
        (base_url, handle)
    }

    fn client_for(base_url: String) -> PostalClient {
        let settings = Settings {
            base_url,
            timeout_secs: 5,
            ..Settings::default()
        };
        PostalClient::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn lookup_over_http_returns_offices() {
        let (base_url, server) = serve_once("200 OK", SUCCESS_BODY).await;
        let client = client_for(base_url);

        let offices = client.lookup(&PinCode::try_from("560050").unwrap()).await.unwrap();

        assert_eq!(offices.len(), 2);
        assert_eq!(offices[0], PostOffice::new("Banashankari", "Bangalore", "Karnataka"));
        assert_eq!(server.await.unwrap(), "GET /pincode/560050 HTTP/1.1");
    }

    #[tokio::test]
    async fn lookup_over_http_reports_error_status() {
        let (base_url, server) = serve_once("503 Service Unavailable", "").await;
        let client = client_for(base_url);

        let result = client.lookup(&PinCode::try_from("560050").unwrap()).await;

        assert!(matches!(result, Err(LookupError::HttpStatus(503))), "{:?}", result);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn lookup_over_http_reports_unreachable_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = client_for(base_url);

        let result = client.lookup(&PinCode::try_from("560050").unwrap()).await;

        assert!(matches!(result, Err(LookupError::Http(_))), "{:?}", result);
    }

    #[test]
    fn url_is_templated_with_code() {
        let settings = Settings {
            base_url: "http://localhost:8080/".to_owned(),
            ..Settings::default()
        };
        let client = PostalClient::new(&settings).unwrap();
        let pincode = PinCode::try_from("110001").unwrap();
        assert_eq!(client.url(&pincode), "http://localhost:8080/pincode/110001");
    }
}
