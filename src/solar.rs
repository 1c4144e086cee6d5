//! Solar geometry as a function of day of year and latitude.

use log::trace;
use std::f64::consts::PI;

/// Inverse relative Earth-Sun distance (FAO-56 eq. 23).
pub fn relative_distance(doy: u32) -> f64 {
    1. + 0.033 * (2. * PI * doy as f64 / 365.).cos()
}

/// Solar declination [rad] (FAO-56 eq. 24).
pub fn solar_declination(doy: u32) -> f64 {
    0.409 * (2. * PI * doy as f64 / 365. - 1.39).sin()
}

/// Sunset hour angle [rad] (FAO-56 eq. 25).
///
/// Beyond the polar circles `-tan(lat) tan(δ)` leaves [-1, 1]; it is
/// clamped, so polar day gives π and polar night gives 0.
pub fn sunset_hour_angle(declination: f64, latitude: f64) -> f64 {
    let x = -latitude.tan() * declination.tan();
    if !(-1. ..=1.).contains(&x) {
        trace!("sunset hour angle argument {x} clamped to [-1, 1]");
    }
    x.clamp(-1., 1.).acos()
}

/// Maximum possible daylight duration [hours] (FAO-56 eq. 34).
pub fn daylight_hours(doy: u32, latitude: f64) -> f64 {
    24. / PI * sunset_hour_angle(solar_declination(doy), latitude)
}
