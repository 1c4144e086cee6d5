use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::model::{DailySeries, Error, Requirement, Site, Weather};
use crate::radiation::RadiationCoefficients;

/// Turc (1961) PET, with the arid-climate humidity correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Turc {
    pub k: f64,
    pub radiation: RadiationCoefficients,
    pub clip_zero: bool,
}

impl Default for Turc {
    fn default() -> Self {
        Turc {
            k: 0.013,
            radiation: RadiationCoefficients::default(),
            clip_zero: true,
        }
    }
}

/// Humidity correction factor; 1 at or above 50 % mean relative humidity.
pub fn humidity_correction(rh: f64) -> f64 {
    if rh < 50. {
        1. + (50. - rh) / 70.
    } else {
        1.
    }
}

/// `rs` in MJ m-2 day-1 (converted to cal cm-2 day-1 by the 23.88 factor).
/// Without a humidity observation the humid-climate form is used. Zero at
/// or below 0 °C, where the temperature factor stops being meaningful.
pub fn turc(tmean: f64, rs: f64, rh: Option<f64>, k: f64) -> f64 {
    if tmean <= 0. {
        return 0.;
    }
    let correction = rh.map_or(1., humidity_correction);
    k * (23.88 * rs + 50.) * tmean / (tmean + 15.) * correction
}

impl Turc {
    /// PET for one day from mean temperature, shortwave radiation and
    /// optional mean relative humidity.
    pub fn day(&self, tmean: f64, rs: f64, rh: Option<f64>) -> f64 {
        turc(tmean, rs, rh, self.k)
    }
}

impl Estimator for Turc {
    fn name(&self) -> &'static str {
        "Turc"
    }

    fn requires(&self) -> &'static [Requirement] {
        &[Requirement::Temperature, Requirement::Shortwave]
    }

    fn estimate(&self, weather: &Weather, site: &Site) -> Result<DailySeries, Error> {
        self.check_inputs(weather)?;
        let tmean = weather.tmean()?;
        let rs = inputs::shortwave(weather, site, &self.radiation)?;
        let rh = inputs::mean_humidity(weather);

        let pet = Array1::from_shape_fn(weather.len(), |i| {
            self.day(tmean[i], rs[i], rh.as_ref().map(|rh| rh[i]))
        });
        Ok(inputs::finish(weather, pet, self.clip_zero))
    }
}
