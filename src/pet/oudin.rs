use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::meteo::LatentHeat;
use crate::model::{DailySeries, Error, Requirement, Site, Weather};

/// Water density [kg m-3].
const WATER_DENSITY: f64 = 1000.;

/// Oudin et al. (2005) temperature and extraterrestrial radiation PET.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Oudin {
    /// Scaling constant [°C]
    pub k1: f64,
    /// Temperature threshold offset [°C]
    pub k2: f64,
    pub lambda: LatentHeat,
    pub clip_zero: bool,
}

impl Default for Oudin {
    fn default() -> Self {
        Oudin {
            k1: 100.,
            k2: 5.,
            lambda: LatentHeat::TemperatureDependent,
            clip_zero: true,
        }
    }
}

/// Zero whenever `tmean + k2` is not positive.
pub fn oudin(tmean: f64, ra: f64, lambda: f64, k1: f64, k2: f64) -> f64 {
    if tmean + k2 > 0. {
        ra / (lambda * WATER_DENSITY) * (tmean + k2) / k1 * 1000. // m -> mm
    } else {
        0.
    }
}

impl Oudin {
    pub fn day(&self, tmean: f64, ra: f64) -> f64 {
        oudin(tmean, ra, self.lambda.value(tmean), self.k1, self.k2)
    }
}

impl Estimator for Oudin {
    fn name(&self) -> &'static str {
        "Oudin"
    }

    fn requires(&self) -> &'static [Requirement] {
        &[Requirement::Temperature]
    }

    fn estimate(&self, weather: &Weather, site: &Site) -> Result<DailySeries, Error> {
        self.check_inputs(weather)?;
        let tmean = weather.tmean()?;
        let ra = inputs::extraterrestrial(weather, site);

        let pet = Array1::from_shape_fn(weather.len(), |i| self.day(tmean[i], ra[i]));
        Ok(inputs::finish(weather, pet, self.clip_zero))
    }
}
