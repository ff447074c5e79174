use shack_common::LatLng;

/// Initial great-circle bearing from `from` to `to`, in degrees within [0, 360).
pub fn initial_bearing(from: LatLng, to: LatLng) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Bearing rounded to a whole degree for display; 359.5 and up wraps to 0.
pub fn rounded_bearing(from: LatLng, to: LatLng) -> u16 {
    (initial_bearing(from, to).round() as u16) % 360
}
