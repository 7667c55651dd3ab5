//! A blocking version of `ProcedureClient`, available with the `blocking`
//! feature. It must not be used from within an async runtime.

use crate::api::{ensure_success, log_failure, procedure_url, procedures_url, validate_url};
use crate::chain::{chain_url, ChainReport, CHAIN_ACTION};
use crate::err::{Error, NewClientError};
use crate::procedure::{Procedure, ProcedureId, ProcedureSummary};
use crate::validation::ValidationReport;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

type Result<T> = std::result::Result<T, Error>;

/// A blocking client for the procedure design service's API.
#[derive(Clone, Debug)]
pub struct ProcedureClient {
    client: Client,
    base_url: Url,
}

impl ProcedureClient {
    /// Create a new blocking `ProcedureClient`.
    ///
    /// # Example
    /// ```rust,no_run
    /// # fn run() {
    /// use afpd::blocking::ProcedureClient;
    /// use url::Url;
    /// let url = Url::parse("http://procedures.example.com/").unwrap();
    /// let client = ProcedureClient::new(url).unwrap();
    /// let report = client.chain_waypoints(42).unwrap();
    /// # }
    /// ```
    pub fn new(base_url: Url) -> std::result::Result<Self, NewClientError> {
        // The blocking client defaults to a 30 second timeout.
        let no_timeout: Option<std::time::Duration> = None;
        let client = Client::builder().timeout(no_timeout).build()?;
        Self::new_with_client(base_url, client)
    }

    /// Create a new blocking `ProcedureClient`, passing in an existing
    /// `reqwest::blocking::Client`.
    pub fn new_with_client(
        base_url: Url,
        client: Client,
    ) -> std::result::Result<Self, NewClientError> {
        let base_url = crate::add_backslash_if_necessary(base_url);

        if base_url.cannot_be_a_base() {
            let url_err_msg = "the base URL must be a valid base URL";
            return Err(NewClientError::url(url_err_msg));
        }

        Ok(ProcedureClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Ask the server to chain the waypoints of a procedure. Blocks until
    /// the response has been decoded.
    pub fn chain_waypoints<I>(&self, procedure_id: I) -> Result<ChainReport>
    where
        I: Into<ProcedureId>,
    {
        let procedure_id = procedure_id.into();
        let res = chain_url(&self.base_url, &procedure_id)
            .and_then(|url| self.get_response(url))
            .and_then(http_response_to_json)
            .map(ChainReport::new);
        log_failure(CHAIN_ACTION, Some(&procedure_id), res)
    }

    /// List every procedure stored on the server.
    pub fn procedures(&self) -> Result<Vec<ProcedureSummary>> {
        let res = procedures_url(&self.base_url)
            .and_then(|url| self.get_response(url))
            .and_then(http_response_to_json);
        log_failure("listing procedures", None, res)
    }

    /// Fetch a single procedure with its waypoints.
    pub fn procedure<I>(&self, procedure_id: I) -> Result<Procedure>
    where
        I: Into<ProcedureId>,
    {
        let procedure_id = procedure_id.into();
        let res = procedure_url(&self.base_url, &procedure_id)
            .and_then(|url| self.get_response(url))
            .and_then(http_response_to_json);
        log_failure("fetching procedure", Some(&procedure_id), res)
    }

    /// Ask the server to validate a stored procedure against its rules.
    pub fn validate<I>(&self, procedure_id: I) -> Result<ValidationReport>
    where
        I: Into<ProcedureId>,
    {
        let procedure_id = procedure_id.into();
        let res = validate_url(&self.base_url, &procedure_id)
            .and_then(|url| self.get_response(url))
            .and_then(http_response_to_json);
        log_failure("validating procedure", Some(&procedure_id), res)
    }

    fn get_response(&self, url: Url) -> Result<Response> {
        debug!(%url, "sending GET request");
        self.client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|err| err.into())
    }
}

fn http_response_to_json<T>(res: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    ensure_success(res.status())?;
    Ok(res.json()?)
}

#[cfg(test)]
mod test {
    use super::ProcedureClient;
    use crate::{Error, ProcedureType};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;
    use url::Url;

    fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).unwrap();

            let request = String::from_utf8(request).unwrap();
            request.lines().next().unwrap_or_default().to_owned()
        });

        let url = Url::parse(&format!("http://{}/", addr)).unwrap();
        (url, handle)
    }

    #[test]
    fn chain_waypoints_returns_decoded_body() {
        let (url, server) = serve_once("200 OK", r#"{"procedure_id": 9}"#);

        let client = ProcedureClient::new(url).unwrap();
        let report = client.chain_waypoints(9u64).unwrap();
        assert_eq!(report.procedure_id(), Some(9));

        let request_line = server.join().unwrap();
        assert_eq!(request_line, "GET /api/chain?procedure_id=9 HTTP/1.1");
    }

    #[test]
    fn chain_waypoints_fails_on_error_status() {
        let (url, server) = serve_once("403 FORBIDDEN", "{}");

        let client = ProcedureClient::new(url).unwrap();
        match client.chain_waypoints(9u64) {
            Err(Error::RequestFailed { status }) => {
                assert_eq!(status, reqwest::StatusCode::FORBIDDEN)
            }
            other => panic!("expected RequestFailed, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn procedures_lists_summaries() {
        let body = r#"[{"id": 2, "name": "ILS 27L", "airport_icao": "EGLL",
            "procedure_type": "Approach Procedure",
            "navigation_type": "Instrument Landing System", "waypoint_count": 3}]"#;
        let (url, server) = serve_once("200 OK", body);

        let client = ProcedureClient::new(url).unwrap();
        let procedures = client.procedures().unwrap();
        assert_eq!(procedures[0].procedure_type, ProcedureType::Approach);
        assert_eq!(procedures[0].waypoint_count, 3);

        let request_line = server.join().unwrap();
        assert_eq!(request_line, "GET /api/procedures HTTP/1.1");
    }

    #[test]
    fn procedure_returns_waypoints() {
        let body = r#"{"id": 2, "name": "ILS 27L", "airport_icao": "EGLL",
            "procedure_type": "Approach Procedure",
            "navigation_type": "Instrument Landing System",
            "waypoints": [{"name": "FAF", "latitude": 51.47, "longitude": -0.3,
                "sequence": 1}]}"#;
        let (url, server) = serve_once("200 OK", body);

        let client = ProcedureClient::new(url).unwrap();
        let procedure = client.procedure("2").unwrap();
        assert_eq!(procedure.waypoints[0].name, "FAF");
        assert_eq!(procedure.minimum_altitude, None);

        let request_line = server.join().unwrap();
        assert_eq!(request_line, "GET /api/procedures/2 HTTP/1.1");
    }

    #[test]
    fn validate_fails_on_error_status() {
        let (url, server) = serve_once("404 NOT FOUND", "{}");

        let client = ProcedureClient::new(url).unwrap();
        let err = client.validate(2u64).unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));

        let request_line = server.join().unwrap();
        assert_eq!(request_line, "GET /api/procedures/2/validate HTTP/1.1");
    }

    #[test]
    fn validate_returns_violations() {
        let body = r#"{"procedure_id": 2, "violations": {"critical": [],
            "warnings": ["Waypoints FAF and MAPT are too close (1.1 NM)"]}}"#;
        let (url, server) = serve_once("200 OK", body);

        let client = ProcedureClient::new(url).unwrap();
        let report = client.validate(2u64).unwrap();
        assert!(report.violations.is_acceptable());
        assert_eq!(report.violations.warnings.len(), 1);
        server.join().unwrap();
    }
}
