/// Mean radius of the earth, in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// A geographical coordinate, in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    lat: f64,
    lng: f64,
}

impl Coord {
    /// Create a new `Coord`. The values are not range checked, use
    /// `is_valid` for that.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Return the latitude component of this `Coord`.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Return the longitude component of this `Coord`.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Return true if the latitude and longitude are within range.
    pub fn is_valid(&self) -> bool {
        validate_coordinates(self.lat, self.lng)
    }

    /// Return the great-circle distance to `other`, in nautical miles.
    pub fn distance_to(&self, other: &Coord) -> f64 {
        calculate_distance(self.lat, self.lng, other.lat, other.lng)
    }

    /// Return the initial bearing towards `other`, in degrees.
    pub fn bearing_to(&self, other: &Coord) -> f64 {
        initial_bearing(self.lat, self.lng, other.lat, other.lng)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat(), self.lng())
    }
}

/// Return true if `lat` is within [-90, 90] and `lon` is within
/// [-180, 180]. NaN values are rejected.
pub fn validate_coordinates(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Calculate the great-circle distance between two points using the
/// haversine formula. The result is in nautical miles.
///
/// # Example
/// ```rust
/// use afpd::calculate_distance;
/// let d = calculate_distance(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 60.04).abs() < 0.01);
/// ```
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}

/// Calculate the initial bearing (forward azimuth) from the first point
/// to the second, in degrees within [0, 360).
pub fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin()
        - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let bearing = y.atan2(x).to_degrees();
    (bearing + 360.0) % 360.0
}

/// Return the turn angle at `via` when flying from `from` to `to`, in
/// degrees within [0, 180].
pub fn turn_angle(from: &Coord, via: &Coord, to: &Coord) -> f64 {
    let inbound = from.bearing_to(via);
    let outbound = via.bearing_to(to);
    let angle = (outbound - inbound).abs();
    angle.min(360.0 - angle)
}
