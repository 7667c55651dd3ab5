use crate::api::{api_url, fetch_json, log_failure};
use crate::coord::Coord;
use crate::err::Error;
use crate::procedure::ProcedureId;
use crate::validation::Violations;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Verb used when a chain request fails, as in "Error chaining waypoints".
pub(crate) const CHAIN_ACTION: &str = "chaining waypoints";

const CHAIN_SEGMENT: &str = "chain";

/// A standalone function to call the chain API, without creating a
/// `ProcedureClient`.
///
/// # Example
/// ```rust,no_run
/// # async fn run() {
/// use afpd::chain::chain_waypoints;
/// let client = reqwest::Client::new();
/// let report = chain_waypoints(&client, "http://procedures.example.com/", 42)
///     .await
///     .unwrap();
/// println!("{:?}", report.total_distance());
/// # }
/// ```
pub async fn chain_waypoints<I>(
    client: &Client,
    base_url: &str,
    procedure_id: I,
) -> Result<ChainReport, Error>
where
    I: Into<ProcedureId>,
{
    let procedure_id = procedure_id.into();
    let res = chain_from_base_str(client, base_url, &procedure_id).await;
    log_failure(CHAIN_ACTION, Some(&procedure_id), res)
}

async fn chain_from_base_str(
    client: &Client,
    base_url: &str,
    procedure_id: &ProcedureId,
) -> Result<ChainReport, Error> {
    let base_url = crate::add_backslash_if_necessary(Url::parse(base_url)?);

    if base_url.cannot_be_a_base() {
        let url_err_msg = "the base URL must be a valid base URL";
        return Err(Error::UrlFormat(url_err_msg.to_owned()));
    }

    let url = chain_url(&base_url, procedure_id)?;
    fetch_chain(client, url).await
}

/// Build `<base>/api/chain?procedure_id=<id>`.
pub(crate) fn chain_url(
    base_url: &Url,
    procedure_id: &ProcedureId,
) -> Result<Url, Error> {
    let mut url = api_url(base_url, &[CHAIN_SEGMENT])?;
    url.query_pairs_mut()
        .append_pair("procedure_id", procedure_id.as_str());
    Ok(url)
}

pub(crate) async fn fetch_chain(
    client: &Client,
    url: Url,
) -> Result<ChainReport, Error> {
    let json: Value = fetch_json(client, url).await?;
    Ok(ChainReport::new(json))
}

/// The decoded body returned by the chain API. The server owns the shape of
/// the body, so the raw JSON is kept and the accessors do not assume that
/// any field is present.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainReport {
    json: Value,
}

impl ChainReport {
    pub fn new(json: Value) -> Self {
        Self { json }
    }

    /// Return the underlying JSON value.
    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn into_json(self) -> Value {
        self.json
    }

    pub fn procedure_id(&self) -> Option<i64> {
        self.json["procedure_id"].as_i64()
    }

    /// Return the length of the whole chain, in nautical miles.
    pub fn total_distance(&self) -> Option<f64> {
        self.json["total_distance"].as_f64()
    }

    /// Return true if the server fell back to estimated terrain data.
    pub fn using_estimated_data(&self) -> bool {
        self.json["using_estimated_data"].as_bool().unwrap_or(false)
    }

    /// Parse the segments of the chain. A body with no `segments` field
    /// has no segments.
    pub fn segments(&self) -> Result<Vec<Segment>, serde_json::Error> {
        match self.json.get("segments") {
            Some(segments) => Vec::<Segment>::deserialize(segments),
            None => Ok(Vec::new()),
        }
    }

    /// Parse the procedure validation result sent with the chain.
    pub fn violations(&self) -> Result<Violations, serde_json::Error> {
        match self.json.get("violations") {
            Some(violations) => Violations::deserialize(violations),
            None => Ok(Violations::default()),
        }
    }

    /// Return the string representation of the underlying JSON value.
    pub fn to_json_string(&self) -> String {
        self.json.to_string()
    }

    /// Return a pretty formatted string representing the underlying JSON value.
    pub fn to_json_string_pretty(&self) -> String {
        format!("{:#}", self.json)
    }

    /// Return a CSV table with one row per segment.
    #[cfg(feature = "report_csv")]
    pub fn to_csv_string(&self) -> Result<String, CsvExportError> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(&[
            "start",
            "end",
            "distance",
            "bearing",
            "minimum_safe_altitude",
        ])?;

        for segment in self.segments()? {
            writer.write_record(&[
                segment.start_waypoint.name,
                segment.end_waypoint.name,
                segment.distance.to_string(),
                segment.bearing.to_string(),
                segment.minimum_safe_altitude.to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| CsvExportError::Io(err.error().to_string()))?;
        String::from_utf8(bytes).map_err(|err| CsvExportError::Io(err.to_string()))
    }
}

impl From<Value> for ChainReport {
    fn from(json: Value) -> Self {
        ChainReport::new(json)
    }
}

/// Errors that can occur when exporting a `ChainReport` as CSV.
#[cfg(feature = "report_csv")]
#[derive(Debug, thiserror::Error)]
pub enum CsvExportError {
    #[error("Could not parse the chain segments: {0}")]
    Segments(#[from] serde_json::Error),
    #[error("Could not write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not finish writing CSV: {0}")]
    Io(String),
}

/// One leg of a chained procedure.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Segment {
    pub start_waypoint: WaypointSummary,
    pub end_waypoint: WaypointSummary,
    /// In nautical miles.
    #[serde(default)]
    pub distance: f64,
    /// Initial true bearing, in degrees.
    #[serde(default)]
    pub bearing: f64,
    #[serde(default)]
    pub terrain_profile: TerrainProfile,
    /// In feet.
    #[serde(default)]
    pub minimum_safe_altitude: f64,
    #[serde(default)]
    pub terrain_violations: Vec<TerrainViolation>,
}

impl Segment {
    /// Great-circle length of this leg computed locally from the waypoint
    /// positions, for comparison with `distance`.
    pub fn great_circle_distance(&self) -> f64 {
        self.start_waypoint
            .coord()
            .distance_to(&self.end_waypoint.coord())
    }
}

/// The parts of a waypoint repeated in each segment.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WaypointSummary {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude_constraint: Option<f64>,
    #[serde(default)]
    pub speed_constraint: Option<f64>,
}

impl WaypointSummary {
    pub fn coord(&self) -> Coord {
        Coord::new(self.latitude, self.longitude)
    }
}

/// Terrain elevation sampled along a segment.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TerrainProfile {
    /// Distance of each sample from the segment start, in nautical miles.
    #[serde(default)]
    pub distances: Vec<f64>,
    /// Elevation of each sample, in feet.
    #[serde(default)]
    pub elevations: Vec<f64>,
}

/// A waypoint whose altitude constraint leaves too little terrain clearance.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TerrainViolation {
    pub waypoint_name: String,
    pub terrain_elevation: f64,
    pub required_altitude: f64,
    pub actual_altitude: f64,
}

#[cfg(test)]
mod test {
    use super::{chain_url, ChainReport};
    use crate::procedure::ProcedureId;
    use crate::validation::Violations;
    use serde_json::json;
    use url::Url;

    fn sample_report() -> ChainReport {
        ChainReport::new(json!({
            "procedure_id": 42,
            "total_distance": 60.04,
            "using_estimated_data": true,
            "segments": [{
                "start_waypoint": {
                    "name": "ALPHA",
                    "latitude": 0.0,
                    "longitude": 0.0,
                    "altitude_constraint": 5000.0,
                    "speed_constraint": null
                },
                "end_waypoint": {
                    "name": "BRAVO",
                    "latitude": 0.0,
                    "longitude": 1.0,
                    "altitude_constraint": null,
                    "speed_constraint": 210.0
                },
                "distance": 60.04,
                "bearing": 90.0,
                "terrain_profile": {
                    "distances": [0.0, 30.02, 60.04],
                    "elevations": [120.0, 340.0, 95.0]
                },
                "minimum_safe_altitude": 1340.0,
                "terrain_violations": [{
                    "waypoint_name": "ALPHA",
                    "terrain_elevation": 4500.0,
                    "required_altitude": 5500.0,
                    "actual_altitude": 5000.0
                }]
            }],
            "violations": {
                "critical": [],
                "warnings": ["Waypoints ALPHA and BRAVO are too close (1.2 NM)"]
            }
        }))
    }

    #[test]
    fn chain_url_appends_path_and_query() {
        let base = Url::parse("http://localhost:5000/").unwrap();
        let url = chain_url(&base, &ProcedureId::from(42u64)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/chain?procedure_id=42");
    }

    #[test]
    fn chain_url_keeps_base_path_and_encodes_id() {
        let base = Url::parse("https://example.com/afpd/").unwrap();
        let url = chain_url(&base, &ProcedureId::from("a&b")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/afpd/api/chain?procedure_id=a%26b"
        );
    }

    #[test]
    fn report_accessors() {
        let report = sample_report();
        assert_eq!(report.procedure_id(), Some(42));
        assert_eq!(report.total_distance(), Some(60.04));
        assert!(report.using_estimated_data());

        let violations = report.violations().unwrap();
        assert!(violations.is_acceptable());
        assert_eq!(violations.warnings.len(), 1);
    }

    #[test]
    fn report_segments_are_typed() {
        let segments = sample_report().segments().unwrap();
        assert_eq!(segments.len(), 1);

        let segment = &segments[0];
        assert_eq!(segment.start_waypoint.name, "ALPHA");
        assert_eq!(segment.start_waypoint.altitude_constraint, Some(5000.0));
        assert_eq!(segment.end_waypoint.speed_constraint, Some(210.0));
        assert_eq!(segment.terrain_profile.elevations.len(), 3);
        assert_eq!(segment.terrain_violations[0].required_altitude, 5500.0);
        assert!((segment.great_circle_distance() - 60.04).abs() < 0.01);
    }

    #[test]
    fn report_with_unknown_shape() {
        let report = ChainReport::from(json!({"message": "ok"}));
        assert_eq!(report.procedure_id(), None);
        assert_eq!(report.total_distance(), None);
        assert!(!report.using_estimated_data());
        assert!(report.segments().unwrap().is_empty());
        assert_eq!(report.violations().unwrap(), Violations::default());

        let bad = ChainReport::new(json!({"segments": "nope"}));
        assert!(bad.segments().is_err());
    }

    #[test]
    fn report_json_round_trip_string() {
        let report = ChainReport::new(json!({"procedure_id": 1}));
        assert_eq!(report.to_json_string(), "{\"procedure_id\":1}");
        assert!(report.to_json_string_pretty().contains('\n'));
        assert_eq!(report.into_json(), json!({"procedure_id": 1}));
    }

    #[cfg(feature = "report_csv")]
    #[test]
    fn report_to_csv() {
        let csv = sample_report().to_csv_string().unwrap();
        assert_eq!(
            csv,
            "start,end,distance,bearing,minimum_safe_altitude\nALPHA,BRAVO,60.04,90,1340\n"
        );
    }
}
