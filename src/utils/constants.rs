use chrono::Duration;
use lazy_static::lazy_static;

/// Mean Earth radius used by the great-circle distance calculation.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Geofence radius within which a check-in is allowed.
pub const CHECK_IN_RADIUS_METERS: f64 = 100.0;
/// Outer radius of the "almost there" band shown to the user.
pub const NEAR_RADIUS_METERS: f64 = 500.0;

pub const GPS_ACTIVATION_LEAD_HOURS: i64 = 6;
pub const MIN_TARGET_LEAD_HOURS: i64 = 4;

pub const DEFAULT_DEADLINE_SCAN_INTERVAL_SECONDS: u64 = 30;
pub const DEFAULT_POSITION_CHANNEL_CAPACITY: usize = 32;

pub const PENALTY_CURRENCY: &str = "jpy";

lazy_static! {
    /// GPS monitoring starts this long before the target time.
    pub static ref GPS_ACTIVATION_LEAD: Duration = Duration::hours(GPS_ACTIVATION_LEAD_HOURS);
    /// A new pact may not target anything sooner than this from now.
    pub static ref MIN_TARGET_LEAD: Duration = Duration::hours(MIN_TARGET_LEAD_HOURS);
}
