use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::meteo::saturation_vapor_pressure;
use crate::model::{DailySeries, Error, Requirement, Site, Variable, Weather};

/// DVWK (1996) monthly Haude factors for grass [mm hPa-1], January first.
const GRASS_FACTORS: [f64; 12] = [
    0.22, 0.22, 0.22, 0.29, 0.29, 0.28, 0.26, 0.25, 0.23, 0.22, 0.22, 0.22,
];

/// Haude (1955) PET from the 14:00 vapour pressure deficit.
///
/// The afternoon temperature is read from `tmax`; the afternoon vapour
/// pressure from `ea`, else from `rhmin`, else from `rh`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Haude {
    /// Surface factor [mm hPa-1]
    pub factor: f64,
    pub clip_zero: bool,
}

impl Default for Haude {
    fn default() -> Self {
        Haude {
            factor: 0.35,
            clip_zero: true,
        }
    }
}

impl Haude {
    /// Grass factor for `month` (1-12).
    pub fn grass_for_month(month: u32) -> Result<Self, Error> {
        let factor = month
            .checked_sub(1)
            .and_then(|i| GRASS_FACTORS.get(i as usize))
            .ok_or_else(|| Error::Configuration(format!("month must be 1-12 (got {month})")))?;
        Ok(Haude {
            factor: *factor,
            ..Default::default()
        })
    }

    /// PET for one day from afternoon temperature and vapour pressure.
    pub fn day(&self, t14: f64, ea14: f64) -> f64 {
        haude(t14, ea14, self.factor)
    }
}

/// `t14` in °C, `ea14` in kPa, `factor` in mm hPa-1.
pub fn haude(t14: f64, ea14: f64, factor: f64) -> f64 {
    // kPa -> hPa
    factor * 10. * (saturation_vapor_pressure(t14) - ea14)
}

/// Same as [`haude`] with the deficit expressed through relative humidity [%].
pub fn haude_from_humidity(t14: f64, rh14: f64, factor: f64) -> f64 {
    factor * 10. * saturation_vapor_pressure(t14) * (1. - rh14 / 100.)
}

impl Estimator for Haude {
    fn name(&self) -> &'static str {
        "Haude"
    }

    fn requires(&self) -> &'static [Requirement] {
        &[
            Requirement::AfternoonTemperature,
            Requirement::AfternoonHumidity,
        ]
    }

    fn estimate(&self, weather: &Weather, _site: &Site) -> Result<DailySeries, Error> {
        self.check_inputs(weather)?;
        let t14 = inputs::require(weather, Variable::Tmax, Requirement::AfternoonTemperature)?;

        let pet = if let Some(ea) = weather.get(Variable::Ea) {
            Array1::from_shape_fn(weather.len(), |i| self.day(t14[i], ea[i]))
        } else {
            let rh = weather
                .get(Variable::RhMin)
                .or_else(|| weather.get(Variable::Rh))
                .ok_or(Error::MissingInput(Requirement::AfternoonHumidity))?;
            Array1::from_shape_fn(weather.len(), |i| {
                haude_from_humidity(t14[i], rh[i], self.factor)
            })
        };
        Ok(inputs::finish(weather, pet, self.clip_zero))
    }
}
