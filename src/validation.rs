//! # Procedure pre-check
//! Local checks of waypoint sequence, spacing, turns and gradients, run
//! before a procedure is sent to the server.

use crate::coord::turn_angle;
use crate::format::specified;
use crate::procedure::{ProcedureType, Waypoint};
use serde::{Deserialize, Serialize};

/// Waypoints closer than this, in nautical miles, produce a warning.
pub const MIN_WAYPOINT_SPACING_NM: f64 = 2.0;

const FEET_PER_NM: f64 = 6076.0;

/// Problems found in a procedure. Critical violations stop the procedure
/// from being accepted, warnings do not.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Violations {
    #[serde(default)]
    pub critical: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Violations {
    /// Return true if there are no critical violations.
    pub fn is_acceptable(&self) -> bool {
        self.critical.is_empty()
    }

    /// Return true if there are neither critical violations nor warnings.
    pub fn is_empty(&self) -> bool {
        self.critical.is_empty() && self.warnings.is_empty()
    }
}

/// The service's verdict on a stored procedure.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ValidationReport {
    pub procedure_id: i64,
    #[serde(default)]
    pub violations: Violations,
}

/// Check a procedure's waypoints, given in flying order.
pub fn validate_procedure(
    kind: ProcedureType,
    waypoints: &[Waypoint],
) -> Violations {
    let mut violations = Violations::default();

    if waypoints.len() < 2 {
        violations
            .critical
            .push("Procedure must have at least 2 waypoints".to_owned());
        return violations;
    }

    check_sequence(waypoints, &mut violations);
    check_turn_angles(kind, waypoints, &mut violations);
    check_gradients(kind, waypoints, &mut violations);

    violations
}

fn check_sequence(waypoints: &[Waypoint], violations: &mut Violations) {
    for pair in waypoints.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        if current.sequence >= next.sequence {
            violations.critical.push(format!(
                "Invalid waypoint sequence between {} and {}",
                current.name, next.name
            ));
        }

        let distance = current.coord().distance_to(&next.coord());
        if distance < MIN_WAYPOINT_SPACING_NM {
            violations.warnings.push(format!(
                "Waypoints {} and {} are too close ({:.1} NM)",
                current.name, next.name, distance
            ));
        }
    }
}

fn check_turn_angles(
    kind: ProcedureType,
    waypoints: &[Waypoint],
    violations: &mut Violations,
) {
    let max_angle = kind.max_turn_angle();

    for legs in waypoints.windows(3) {
        let angle =
            turn_angle(&legs[0].coord(), &legs[1].coord(), &legs[2].coord());
        if angle > max_angle {
            violations.critical.push(format!(
                "Turn angle between {} exceeds maximum ({:.1}° > {}°)",
                legs[1].name, angle, max_angle
            ));
        }
    }
}

fn check_gradients(
    kind: ProcedureType,
    waypoints: &[Waypoint],
    violations: &mut Violations,
) {
    let max_gradient = kind.max_gradient();

    for pair in waypoints.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        // Zero or NaN constraints count as unset, as they do for display.
        let (from_alt, to_alt) = match (
            specified(current.altitude_constraint),
            specified(next.altitude_constraint),
        ) {
            (Some(from_alt), Some(to_alt)) => (from_alt, to_alt),
            _ => continue,
        };

        let distance = current.coord().distance_to(&next.coord());
        let altitude_change = (to_alt - from_alt).abs();
        // Coincident waypoints with an altitude change give an infinite gradient.
        let gradient = altitude_change / (distance * FEET_PER_NM) * 100.0;

        if gradient > max_gradient {
            violations.critical.push(format!(
                "Gradient between {} and {} exceeds maximum ({:.1}% > {}%)",
                current.name, next.name, gradient, max_gradient
            ));
        }
    }
}
