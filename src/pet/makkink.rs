use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::meteo::{atmospheric_pressure, psychrometric_constant, vapor_pressure_slope, LatentHeat};
use crate::model::{DailySeries, Error, Requirement, Site, Weather};
use crate::radiation::RadiationCoefficients;

/// Makkink (1957) radiation-based PET.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Makkink {
    pub k: f64,
    /// Constant subtracted from the radiation term [mm day-1]
    pub offset: f64,
    pub lambda: LatentHeat,
    pub radiation: RadiationCoefficients,
    pub clip_zero: bool,
}

impl Default for Makkink {
    fn default() -> Self {
        Makkink {
            k: 0.61,
            offset: 0.12,
            lambda: LatentHeat::FAO56,
            radiation: RadiationCoefficients::default(),
            clip_zero: true,
        }
    }
}

/// `rs` in MJ m-2 day-1, `lambda` in MJ kg-1.
pub fn makkink(delta: f64, gamma: f64, rs: f64, lambda: f64, k: f64, offset: f64) -> f64 {
    k * delta / (delta + gamma) * rs / lambda - offset
}

impl Makkink {
    pub fn day(&self, tmean: f64, rs: f64, pressure: f64) -> f64 {
        let lambda = self.lambda.value(tmean);
        makkink(
            vapor_pressure_slope(tmean),
            psychrometric_constant(pressure, lambda),
            rs,
            lambda,
            self.k,
            self.offset,
        )
    }
}

impl Estimator for Makkink {
    fn name(&self) -> &'static str {
        "Makkink"
    }

    fn requires(&self) -> &'static [Requirement] {
        &[Requirement::Temperature, Requirement::Shortwave]
    }

    fn estimate(&self, weather: &Weather, site: &Site) -> Result<DailySeries, Error> {
        self.check_inputs(weather)?;
        let tmean = weather.tmean()?;
        let rs = inputs::shortwave(weather, site, &self.radiation)?;
        let pressure = atmospheric_pressure(site.elevation);

        let pet = Array1::from_shape_fn(weather.len(), |i| self.day(tmean[i], rs[i], pressure));
        Ok(inputs::finish(weather, pet, self.clip_zero))
    }
}
