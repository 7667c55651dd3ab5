//! # Overview
//! This crate provides helpers for front-ends of a flight procedure design
//! service:
//!
//! * formatting of coordinates, altitudes, speeds and procedure types,
//! * coordinate validation, great-circle distance and bearing calculations,
//! * a local pre-check of a procedure's waypoints,
//! * a client for the service's waypoint chain and read-only procedure APIs,
//! * dismissible alert banners, shown through the `AlertSurface` trait.
//!
//! # Usage
//! ```rust,no_run
//! use afpd::{format_coordinate, Axis, ProcedureClient};
//! use url::Url;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let url = Url::parse("http://procedures.example.com/")?;
//! let client = ProcedureClient::new(url)?;
//! let report = client.chain_waypoints(42).await?;
//!
//! for segment in report.segments()? {
//!     let start = &segment.start_waypoint;
//!     println!(
//!         "{} {} {}: {:.1} NM",
//!         start.name,
//!         format_coordinate(start.latitude, Axis::Latitude),
//!         format_coordinate(start.longitude, Axis::Longitude),
//!         segment.distance,
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Failed requests are logged with `tracing` before the error is returned.

pub mod alert;
mod api;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod chain;
mod coord;
mod err;
mod format;
mod procedure;
pub mod validation;

pub use alert::{show_error, show_success, AlertKind, AlertSurface, Banner, HtmlRegion};
pub use chain::{ChainReport, Segment, TerrainProfile, TerrainViolation, WaypointSummary};
pub use coord::{
    calculate_distance, initial_bearing, turn_angle, validate_coordinates, Coord,
    EARTH_RADIUS_NM,
};
pub use err::{Error, NewClientError, ParseProcedureTypeError};
pub use format::{
    format_altitude, format_coordinate, format_procedure_type, format_speed, Axis,
    NOT_SPECIFIED,
};
pub use procedure::{
    NavigationType, Procedure, ProcedureId, ProcedureSummary, ProcedureType, Waypoint,
};
pub use validation::{validate_procedure, ValidationReport, Violations};

use reqwest::Client as ReqwestClient;
use url::Url;

/// Environment variable read by `ProcedureClient::from_env`.
pub const BASE_URL_ENV_VAR: &str = "AFPD_BASE_URL";

/// A client for the procedure design service's API.
#[derive(Clone, Debug)]
pub struct ProcedureClient {
    client: ReqwestClient,
    base_url: Url,
}

impl ProcedureClient {
    /// Create a new `ProcedureClient`. The underlying HTTP client has no
    /// timeout.
    ///
    /// # Example
    /// ```rust,no_run
    /// use afpd::ProcedureClient;
    /// use url::Url;
    /// let url = Url::parse("http://procedures.example.com/").unwrap();
    /// let client = ProcedureClient::new(url).unwrap();
    /// ```
    pub fn new(base_url: Url) -> Result<Self, NewClientError> {
        let client = ReqwestClient::builder().build()?;
        Self::new_with_client(base_url, client)
    }

    /// Create a new `ProcedureClient`, passing in an existing
    /// `reqwest::Client`. If creating multiple `ProcedureClient`s, the same
    /// `reqwest::Client` should be used for each.
    pub fn new_with_client(
        base_url: Url,
        client: ReqwestClient,
    ) -> Result<Self, NewClientError> {
        let base_url = add_backslash_if_necessary(base_url);

        if base_url.cannot_be_a_base() {
            let url_err_msg = "the base URL must be a valid base URL";
            return Err(NewClientError::url(url_err_msg));
        }

        Ok(ProcedureClient { client, base_url })
    }

    /// Create a new `ProcedureClient` using the base URL in the
    /// `AFPD_BASE_URL` environment variable.
    pub fn from_env() -> Result<Self, NewClientError> {
        let base_url = std::env::var(BASE_URL_ENV_VAR)
            .map_err(|_| NewClientError::MissingEnv(BASE_URL_ENV_VAR.to_owned()))?;
        Self::new(Url::parse(&base_url)?)
    }

    /// Return the base URL being used by this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn client(&self) -> &ReqwestClient {
        &self.client
    }

    /// Ask the server to chain the waypoints of a procedure, returning the
    /// decoded response body. The request is attempted once. A non-success
    /// status gives `Error::RequestFailed`.
    pub async fn chain_waypoints<I>(
        &self,
        procedure_id: I,
    ) -> Result<ChainReport, Error>
    where
        I: Into<ProcedureId>,
    {
        let procedure_id = procedure_id.into();
        let res = match chain::chain_url(&self.base_url, &procedure_id) {
            Ok(url) => chain::fetch_chain(&self.client, url).await,
            Err(err) => Err(err),
        };
        api::log_failure(chain::CHAIN_ACTION, Some(&procedure_id), res)
    }

    /// List every procedure stored on the server.
    pub async fn procedures(&self) -> Result<Vec<ProcedureSummary>, Error> {
        let res = match api::procedures_url(&self.base_url) {
            Ok(url) => api::fetch_json(&self.client, url).await,
            Err(err) => Err(err),
        };
        api::log_failure("listing procedures", None, res)
    }

    /// Fetch a single procedure with its waypoints.
    pub async fn procedure<I>(&self, procedure_id: I) -> Result<Procedure, Error>
    where
        I: Into<ProcedureId>,
    {
        let procedure_id = procedure_id.into();
        let res = match api::procedure_url(&self.base_url, &procedure_id) {
            Ok(url) => api::fetch_json(&self.client, url).await,
            Err(err) => Err(err),
        };
        api::log_failure("fetching procedure", Some(&procedure_id), res)
    }

    /// Ask the server to validate a stored procedure against its rules.
    pub async fn validate<I>(
        &self,
        procedure_id: I,
    ) -> Result<ValidationReport, Error>
    where
        I: Into<ProcedureId>,
    {
        let procedure_id = procedure_id.into();
        let res = match api::validate_url(&self.base_url, &procedure_id) {
            Ok(url) => api::fetch_json(&self.client, url).await,
            Err(err) => Err(err),
        };
        api::log_failure("validating procedure", Some(&procedure_id), res)
    }
}

/// If the path of the given url ends with a backslash, return the url
/// without any modifications. Otherwise append a backslash to the path.
pub(crate) fn add_backslash_if_necessary(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
