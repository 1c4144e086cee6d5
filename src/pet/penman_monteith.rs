use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::meteo::{atmospheric_pressure, psychrometric_constant, vapor_pressure_slope, LatentHeat};
use crate::model::{DailySeries, Error, Requirement, Site, Variable, Weather};
use crate::radiation::RadiationCoefficients;

/// Reference crop of the standardized Penman-Monteith equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSurface {
    /// Clipped grass, 0.12 m (FAO-56)
    Short,
    /// Alfalfa, 0.50 m (ASCE-EWRI 2005)
    Tall,
}

impl ReferenceSurface {
    /// Numerator and denominator constants (Cn, Cd) for daily steps.
    pub fn constants(self) -> (f64, f64) {
        match self {
            ReferenceSurface::Short => (900., 0.34),
            ReferenceSurface::Tall => (1600., 0.38),
        }
    }
}

/// FAO-56 Penman-Monteith reference evapotranspiration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenmanMonteith {
    pub surface: ReferenceSurface,
    /// λ used for the psychrometric constant
    pub lambda: LatentHeat,
    pub radiation: RadiationCoefficients,
    /// Soil heat flux density G [MJ m-2 day-1], ~0 at a daily step
    pub soil_heat_flux: f64,
    pub clip_zero: bool,
}

impl Default for PenmanMonteith {
    fn default() -> Self {
        PenmanMonteith {
            surface: ReferenceSurface::Short,
            lambda: LatentHeat::FAO56,
            radiation: RadiationCoefficients::default(),
            soil_heat_flux: 0.,
            clip_zero: true,
        }
    }
}

/// FAO-56 eq. 6 for one day.
///
/// `delta` and `gamma` in kPa °C-1, `rn` and `g` in MJ m-2 day-1, `tmean`
/// in °C, `wind` in m/s at 2 m, `vpd` = es - ea in kPa.
#[allow(clippy::too_many_arguments)]
pub fn penman_monteith(
    delta: f64,
    gamma: f64,
    rn: f64,
    g: f64,
    tmean: f64,
    wind: f64,
    vpd: f64,
    surface: ReferenceSurface,
) -> f64 {
    let (cn, cd) = surface.constants();
    let radiation_term = 0.408 * delta * (rn - g);
    let aerodynamic_term = gamma * cn / (tmean + 273.) * wind * vpd;
    (radiation_term + aerodynamic_term) / (delta + gamma * (1. + cd * wind))
}

impl PenmanMonteith {
    /// Reference ET for one day; `pressure` in kPa, other units as in
    /// [`penman_monteith`].
    pub fn day(&self, tmean: f64, wind: f64, rn: f64, vpd: f64, pressure: f64) -> f64 {
        let gamma = psychrometric_constant(pressure, self.lambda.value(tmean));
        penman_monteith(
            vapor_pressure_slope(tmean),
            gamma,
            rn,
            self.soil_heat_flux,
            tmean,
            wind,
            vpd,
            self.surface,
        )
    }
}

impl Estimator for PenmanMonteith {
    fn name(&self) -> &'static str {
        match self.surface {
            ReferenceSurface::Short => "FAO-56",
            ReferenceSurface::Tall => "ASCE-tall",
        }
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

        let et = Array1::from_shape_fn(weather.len(), |i| {
            self.day(tmean[i], wind[i], rn[i], es[i] - ea[i], pressure)
        });
        Ok(inputs::finish(weather, et, self.clip_zero))
    }
}
