use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::meteo::{
    air_density, atmospheric_pressure, psychrometric_constant, vapor_pressure_slope, LatentHeat,
};
use crate::model::{DailySeries, Error, Requirement, Site, Variable, Weather};
use crate::radiation::RadiationCoefficients;
use crate::resistance::Canopy;

/// Specific heat of moist air at constant pressure [MJ kg-1 °C-1].
pub const SPECIFIC_HEAT: f64 = 1.013e-3;

const SECONDS_PER_DAY: f64 = 86400.;

/// Penman-Monteith (Monteith 1965) with explicit aerodynamic and surface
/// resistances, for any canopy height, leaf area and CO2 level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralPenmanMonteith {
    pub canopy: Canopy,
    /// Fraction of one-sided leaf area exchanging sensible heat
    pub sensible_heat_sides: f64,
    /// Fraction of one-sided leaf area with stomata
    pub stomata_sides: f64,
    pub lambda: LatentHeat,
    /// λ used for the psychrometric constant
    pub psychrometric_lambda: LatentHeat,
    pub radiation: RadiationCoefficients,
    pub soil_heat_flux: f64,
    pub clip_zero: bool,
}

impl Default for GeneralPenmanMonteith {
    fn default() -> Self {
        GeneralPenmanMonteith {
            canopy: Canopy::default(),
            sensible_heat_sides: 1.,
            stomata_sides: 1.,
            lambda: LatentHeat::TemperatureDependent,
            psychrometric_lambda: LatentHeat::FAO56,
            radiation: RadiationCoefficients::default(),
            soil_heat_flux: 0.,
            clip_zero: true,
        }
    }
}

impl GeneralPenmanMonteith {
    /// PET for one day. `ea` and `vpd` in kPa, `pressure` in kPa.
    pub fn day(&self, tmean: f64, wind: f64, rn: f64, ea: f64, vpd: f64, pressure: f64) -> f64 {
        let gamma = psychrometric_constant(pressure, self.psychrometric_lambda.value(tmean));
        let delta = vapor_pressure_slope(tmean);
        let ra = self.canopy.aerodynamic_resistance(wind);
        let rs = self.canopy.surface_resistance();
        let gamma_star =
            gamma * self.sensible_heat_sides / self.stomata_sides * (1. + rs / ra);
        let den = self.lambda.value(tmean) * (delta + gamma_star);
        let aerodynamic = air_density(pressure, tmean, ea)
            * SPECIFIC_HEAT
            * SECONDS_PER_DAY
            * vpd
            * self.sensible_heat_sides
            / ra;
        (delta * (rn - self.soil_heat_flux) + aerodynamic) / den
    }
}

impl Estimator for GeneralPenmanMonteith {
    fn name(&self) -> &'static str {
        "Penman-Monteith"
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
            self.day(tmean[i], wind[i], rn[i], ea[i], es[i] - ea[i], pressure)
        });
        Ok(inputs::finish(weather, pet, self.clip_zero))
    }
}
