use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::meteo::{atmospheric_pressure, psychrometric_constant, vapor_pressure_slope, LatentHeat};
use crate::model::{DailySeries, Error, Requirement, Site, Variable, Weather};
use crate::radiation::RadiationCoefficients;
use crate::resistance::Canopy;

/// Thom and Oliver (1977): Penman's wind function scaled by 2.5, with the
/// psychrometric constant raised by the canopy resistances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThomOliver {
    pub aw: f64,
    pub bw: f64,
    pub canopy: Canopy,
    pub lambda: LatentHeat,
    /// λ used for the psychrometric constant
    pub psychrometric_lambda: LatentHeat,
    pub radiation: RadiationCoefficients,
    pub soil_heat_flux: f64,
    pub clip_zero: bool,
}

impl Default for ThomOliver {
    fn default() -> Self {
        ThomOliver {
            aw: 2.6,
            bw: 0.536,
            canopy: Canopy::default(),
            lambda: LatentHeat::TemperatureDependent,
            psychrometric_lambda: LatentHeat::FAO56,
            radiation: RadiationCoefficients::default(),
            soil_heat_flux: 0.,
            clip_zero: true,
        }
    }
}

impl ThomOliver {
    pub fn day(&self, tmean: f64, wind: f64, rn: f64, vpd: f64, pressure: f64) -> f64 {
        let gamma = psychrometric_constant(pressure, self.psychrometric_lambda.value(tmean));
        let delta = vapor_pressure_slope(tmean);
        let ra = self.canopy.aerodynamic_resistance(wind);
        let gamma_star = gamma * (1. + self.canopy.surface_resistance() / ra);
        let wind_function = self.aw * (1. + self.bw * wind);
        (delta * (rn - self.soil_heat_flux) + 2.5 * gamma * vpd * wind_function)
            / (self.lambda.value(tmean) * (delta + gamma_star))
    }
}

impl Estimator for ThomOliver {
    fn name(&self) -> &'static str {
        "Thom-Oliver"
    }

    fn requires(&self) -> &'static [Requirement] {
        &[
            Requirement::Temperature,
            Requirement::Wind,
            Requirement::Humidity,
            Requirement::NetRadiation,
        ]
    }

    fn estimate(&self, weather: &Weather, site: &Site) -> Result<DailySeries, Error> {
        self.check_inputs(weather)?;
        let tmean = weather.tmean()?;
        let wind = inputs::require(weather, Variable::Wind, Requirement::Wind)?;
        let es = inputs::saturation(weather, &tmean);
        let ea = inputs::actual_vapor(weather, &tmean, &es)?;
        let rn = inputs::net_radiation(weather, site, &self.radiation, &tmean)?;
        let pressure = atmospheric_pressure(site.elevation);

        let pet = Array1::from_shape_fn(weather.len(), |i| {
            self.day(tmean[i], wind[i], rn[i], es[i] - ea[i], pressure)
        });
        Ok(inputs::finish(weather, pet, self.clip_zero))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn alice_springs_reference_value() {
        let pet = ThomOliver::default().day(
            11.5,
            0.5903,
            6.0610,
            1.59632 - 0.56138,
            atmospheric_pressure(546.),
        );
        assert_abs_diff_eq!(pet, 2.6970, epsilon = 2e-3);
    }

    #[test]
    fn calm_air_still_evaporates_through_the_wind_constant() {
        let calm = ThomOliver::default().day(11.5, 0., 0., 1., 95.);
        assert!(calm > 0.);
    }
}
