use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::meteo::{atmospheric_pressure, psychrometric_constant, vapor_pressure_slope, LatentHeat};
use crate::model::{DailySeries, Error, Requirement, Site, Variable, Weather};
use crate::radiation::RadiationCoefficients;

/// Penman (1948) open-water combination equation with a linear wind function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Penman {
    /// Unit constant of the wind function [mm day-1 kPa-1]
    pub ku: f64,
    pub aw: f64,
    pub bw: f64,
    /// λ converting energy to evaporated depth
    pub lambda: LatentHeat,
    /// λ used for the psychrometric constant
    pub psychrometric_lambda: LatentHeat,
    pub radiation: RadiationCoefficients,
    pub soil_heat_flux: f64,
    pub clip_zero: bool,
}

impl Default for Penman {
    fn default() -> Self {
        Penman {
            ku: 6.43,
            aw: 1.,
            bw: 0.537,
            lambda: LatentHeat::TemperatureDependent,
            psychrometric_lambda: LatentHeat::FAO56,
            radiation: RadiationCoefficients::default(),
            soil_heat_flux: 0.,
            clip_zero: true,
        }
    }
}

/// `wind_function` is `ku (aw + bw u2)` in mm day-1 kPa-1.
pub fn penman(
    delta: f64,
    gamma: f64,
    rn: f64,
    g: f64,
    vpd: f64,
    wind_function: f64,
    lambda: f64,
) -> f64 {
    let den = lambda * (delta + gamma);
    delta * (rn - g) / den + gamma * vpd * wind_function / den
}

impl Penman {
    /// PET for one day; `vpd` = es - ea and `pressure` in kPa.
    pub fn day(&self, tmean: f64, wind: f64, rn: f64, vpd: f64, pressure: f64) -> f64 {
        let gamma = psychrometric_constant(pressure, self.psychrometric_lambda.value(tmean));
        penman(
            vapor_pressure_slope(tmean),
            gamma,
            rn,
            self.soil_heat_flux,
            vpd,
            self.ku * (self.aw + self.bw * wind),
            self.lambda.value(tmean),
        )
    }
}

impl Estimator for Penman {
    fn name(&self) -> &'static str {
        "Penman"
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
