use crate::coord::Coord;
use crate::err::ParseProcedureTypeError;
use crate::validation::{validate_procedure, Violations};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An opaque identifier for a procedure stored on the server. It is passed
/// through to the server without being interpreted.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ProcedureId(String);

impl ProcedureId {
    pub fn new<S>(id: S) -> Self
    where
        S: Into<String>,
    {
        ProcedureId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProcedureId {
    fn from(id: &str) -> Self {
        ProcedureId::new(id)
    }
}

impl From<String> for ProcedureId {
    fn from(id: String) -> Self {
        ProcedureId(id)
    }
}

impl From<u64> for ProcedureId {
    fn from(id: u64) -> Self {
        ProcedureId(id.to_string())
    }
}

impl From<u32> for ProcedureId {
    fn from(id: u32) -> Self {
        ProcedureId(id.to_string())
    }
}

impl From<i32> for ProcedureId {
    fn from(id: i32) -> Self {
        ProcedureId(id.to_string())
    }
}

impl From<i64> for ProcedureId {
    fn from(id: i64) -> Self {
        ProcedureId(id.to_string())
    }
}

impl From<&ProcedureId> for ProcedureId {
    fn from(id: &ProcedureId) -> Self {
        id.clone()
    }
}

/// The kinds of instrument flight procedure.
///
/// Serialized as the code (`SID`). The long name the service sends back in
/// procedure listings is accepted when deserializing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcedureType {
    /// Standard Instrument Departure.
    #[serde(alias = "Standard Instrument Departure")]
    Sid,
    /// Standard Terminal Arrival Route.
    #[serde(alias = "Standard Terminal Arrival Route")]
    Star,
    #[serde(alias = "Approach Procedure")]
    Approach,
}

impl ProcedureType {
    /// Return the code used by the server, for example `STAR`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sid => "SID",
            Self::Star => "STAR",
            Self::Approach => "APPROACH",
        }
    }

    /// Return the long name, for example "Standard Terminal Arrival Route".
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sid => "Standard Instrument Departure",
            Self::Star => "Standard Terminal Arrival Route",
            Self::Approach => "Approach Procedure",
        }
    }

    /// Largest permitted turn between consecutive legs, in degrees.
    pub fn max_turn_angle(&self) -> f64 {
        match self {
            Self::Sid => 120.0,
            Self::Star | Self::Approach => 90.0,
        }
    }

    /// Largest permitted climb or descent gradient, in percent.
    pub fn max_gradient(&self) -> f64 {
        match self {
            Self::Sid => 8.3,
            Self::Star => 6.1,
            Self::Approach => 5.2,
        }
    }
}

impl FromStr for ProcedureType {
    type Err = ParseProcedureTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SID" => Ok(Self::Sid),
            "STAR" => Ok(Self::Star),
            "APPROACH" => Ok(Self::Approach),
            _ => Err(ParseProcedureTypeError::from_str(s)),
        }
    }
}

impl std::fmt::Display for ProcedureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The navigation specification a procedure is flown with. Deserializes
/// from either the code or the long name, like `ProcedureType`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NavigationType {
    #[serde(alias = "Area Navigation")]
    Rnav,
    #[serde(alias = "Required Navigation Performance")]
    Rnp,
    #[serde(alias = "Instrument Landing System")]
    Ils,
    #[serde(alias = "VHF Omnidirectional Range")]
    Vor,
    #[serde(alias = "Non-Directional Beacon")]
    Ndb,
}

impl NavigationType {
    /// Return the long name, for example "Area Navigation".
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rnav => "Area Navigation",
            Self::Rnp => "Required Navigation Performance",
            Self::Ils => "Instrument Landing System",
            Self::Vor => "VHF Omnidirectional Range",
            Self::Ndb => "Non-Directional Beacon",
        }
    }
}

/// A single fix within a procedure.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Waypoint {
    /// ICAO waypoint identifier.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Position of this waypoint within the procedure.
    pub sequence: i64,
    /// In feet.
    #[serde(default)]
    pub altitude_constraint: Option<f64>,
    /// In knots.
    #[serde(default)]
    pub speed_constraint: Option<f64>,
}

impl Waypoint {
    pub fn new<S>(name: S, latitude: f64, longitude: f64, sequence: i64) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            latitude,
            longitude,
            sequence,
            altitude_constraint: None,
            speed_constraint: None,
        }
    }

    pub fn with_altitude(mut self, feet: f64) -> Self {
        self.altitude_constraint = Some(feet);
        self
    }

    pub fn with_speed(mut self, knots: f64) -> Self {
        self.speed_constraint = Some(knots);
        self
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.latitude, self.longitude)
    }
}

/// One entry of the procedure listing.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ProcedureSummary {
    pub id: i64,
    pub name: String,
    pub airport_icao: String,
    pub procedure_type: ProcedureType,
    pub navigation_type: NavigationType,
    pub waypoint_count: usize,
}

/// A stored procedure with its waypoints in sequence order.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Procedure {
    pub id: i64,
    pub name: String,
    pub airport_icao: String,
    pub procedure_type: ProcedureType,
    pub navigation_type: NavigationType,
    /// In feet.
    #[serde(default)]
    pub minimum_altitude: Option<f64>,
    /// In feet.
    #[serde(default)]
    pub maximum_altitude: Option<f64>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl Procedure {
    /// Run the local pre-check against this procedure's waypoints.
    pub fn validate(&self) -> Violations {
        validate_procedure(self.procedure_type, &self.waypoints)
    }
}
