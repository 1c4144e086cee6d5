//! Daily radiation budget terms (FAO-56 chapter 3), all in MJ m-2 day-1.

use log::trace;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::model::Error;
use crate::solar::{relative_distance, solar_declination, sunset_hour_angle};

/// Solar constant [MJ m-2 min-1].
pub const SOLAR_CONSTANT: f64 = 0.0820;

/// Stefan-Boltzmann constant, daily [MJ K-4 m-2 day-1].
pub const STEFAN_BOLTZMANN: f64 = 4.903e-9;

/// Bounds applied to Rs/Rso before the cloudiness factor.
pub const SHORTWAVE_RATIO_BOUNDS: (f64, f64) = (0.05, 1.0);

/// Angstrom and albedo coefficients for building the radiation budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiationCoefficients {
    /// Fraction of Ra reaching the ground on overcast days
    pub a_s: f64,
    /// Additional fraction reaching the ground on clear days
    pub b_s: f64,
    pub albedo: f64,
}

impl Default for RadiationCoefficients {
    fn default() -> Self {
        RadiationCoefficients {
            a_s: 0.25,
            b_s: 0.50,
            albedo: 0.23,
        }
    }
}

/// Extraterrestrial radiation (FAO-56 eq. 21).
pub fn extraterrestrial_radiation(doy: u32, latitude: f64) -> f64 {
    let dr = relative_distance(doy);
    let declination = solar_declination(doy);
    let omega = sunset_hour_angle(declination, latitude);
    24. * 60. / PI
        * SOLAR_CONSTANT
        * dr
        * (omega * latitude.sin() * declination.sin()
            + latitude.cos() * declination.cos() * omega.sin())
}

/// Clear-sky solar radiation (FAO-56 eq. 37).
pub fn clear_sky_radiation(ra: f64, elevation: f64) -> f64 {
    (0.75 + 2e-5 * elevation) * ra
}

/// Incoming shortwave radiation from sunshine duration (Angstrom, FAO-56
/// eq. 35). With no possible daylight only the overcast fraction remains.
pub fn incoming_shortwave(
    sunshine: f64,
    daylight: f64,
    ra: f64,
    a_s: f64,
    b_s: f64,
) -> f64 {
    let relative_sunshine = if daylight > 0. { sunshine / daylight } else { 0. };
    (a_s + b_s * relative_sunshine) * ra
}

/// Net shortwave radiation (FAO-56 eq. 38).
pub fn net_shortwave(rs: f64, albedo: f64) -> f64 {
    (1. - albedo) * rs
}

/// Net outgoing longwave radiation (FAO-56 eq. 39).
///
/// `ea` is the actual vapour pressure [kPa]. Rs/Rso is held within
/// [`SHORTWAVE_RATIO_BOUNDS`]; a non-positive `rso` is a domain error.
pub fn net_longwave(
    rs: f64,
    rso: f64,
    tmax: f64,
    tmin: f64,
    ea: f64,
) -> Result<f64, Error> {
    if rso <= 0. {
        return Err(Error::Domain(format!(
            "clear-sky radiation must be positive for the longwave cloudiness term (got {rso})"
        )));
    }
    let (low, high) = SHORTWAVE_RATIO_BOUNDS;
    let ratio = rs / rso;
    if !(low..=high).contains(&ratio) {
        trace!("Rs/Rso ratio {ratio} clamped to [{low}, {high}]");
    }
    Ok(longwave(ratio.clamp(low, high), tmax, tmin, ea))
}

fn longwave(ratio: f64, tmax: f64, tmin: f64, ea: f64) -> f64 {
    let emissivity = 0.34 - 0.14 * ea.sqrt();
    let temperature_term =
        ((tmax + 273.2).powi(4) + (tmin + 273.2).powi(4)) / 2.;
    STEFAN_BOLTZMANN * emissivity * temperature_term * (1.35 * ratio - 0.35)
}

/// Net radiation (FAO-56 eq. 40). Negative values are valid.
pub fn net_radiation(rns: f64, rnl: f64) -> f64 {
    rns - rnl
}

/// Net radiation for one day from incoming shortwave radiation, chaining
/// clear-sky, net shortwave and net longwave terms.
///
/// When the sun does not rise (`ra <= 0`, polar night) there is no
/// clear-sky reference; Rs/Rso is then taken at its lower bound, so
/// Rn = -Rnl of a fully overcast sky.
pub fn net_radiation_from_shortwave(
    rs: f64,
    ra: f64,
    elevation: f64,
    tmax: f64,
    tmin: f64,
    ea: f64,
    albedo: f64,
) -> Result<f64, Error> {
    let rnl = if ra > 0. {
        net_longwave(rs, clear_sky_radiation(ra, elevation), tmax, tmin, ea)?
    } else {
        trace!("no extraterrestrial radiation, Rs/Rso set to its lower bound");
        longwave(SHORTWAVE_RATIO_BOUNDS.0, tmax, tmin, ea)
    };
    Ok(net_radiation(net_shortwave(rs, albedo), rnl))
}
