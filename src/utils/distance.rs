use crate::utils::constants::EARTH_RADIUS_METERS;

/// Great-circle distance in meters between two points given in decimal
/// degrees, via the haversine formula. Total over all finite inputs;
/// out-of-range latitudes/longitudes are not rejected.
pub fn calculate_distance(lat_1: f64, lon_1: f64, lat_2: f64, lon_2: f64) -> f64 {
    let phi_1 = lat_1.to_radians();
    let phi_2 = lat_2.to_radians();
    let delta_phi = (lat_2 - lat_1).to_radians();
    let delta_lambda = (lon_2 - lon_1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi_1.cos() * phi_2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Renders a distance for display: whole meters below a kilometer,
/// otherwise kilometers with one decimal digit.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round() as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}
