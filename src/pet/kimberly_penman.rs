use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::meteo::{atmospheric_pressure, psychrometric_constant, vapor_pressure_slope, LatentHeat};
use crate::model::{DailySeries, Error, Requirement, Site, Variable, Weather};
use crate::radiation::RadiationCoefficients;

/// Kimberly-Penman (Wright 1982): Penman with a wind function whose
/// coefficients follow the season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KimberlyPenman {
    pub lambda: LatentHeat,
    /// λ used for the psychrometric constant
    pub psychrometric_lambda: LatentHeat,
    pub radiation: RadiationCoefficients,
    pub soil_heat_flux: f64,
    pub clip_zero: bool,
}

impl Default for KimberlyPenman {
    fn default() -> Self {
        KimberlyPenman {
            lambda: LatentHeat::TemperatureDependent,
            psychrometric_lambda: LatentHeat::FAO56,
            radiation: RadiationCoefficients::default(),
            soil_heat_flux: 0.,
            clip_zero: true,
        }
    }
}

/// Seasonal wind function for wind `wind` [m/s] on day of year `doy`.
/// Both Gaussian terms peak in northern summer.
pub fn kimberly_wind_function(wind: f64, doy: u32) -> f64 {
    let j = f64::from(doy);
    let aw = 0.4 + 0.14 * (-((j - 173.) / 58.).powi(2)).exp();
    let bw = 0.605 + 0.345 * (-((j - 243.) / 80.).powi(2)).exp();
    wind * aw + bw
}

impl KimberlyPenman {
    pub fn day(&self, tmean: f64, wind: f64, rn: f64, vpd: f64, pressure: f64, doy: u32) -> f64 {
        let gamma = psychrometric_constant(pressure, self.psychrometric_lambda.value(tmean));
        let delta = vapor_pressure_slope(tmean);
        let den = self.lambda.value(tmean) * (delta + gamma);
        (delta * (rn - self.soil_heat_flux) + gamma * vpd * kimberly_wind_function(wind, doy))
            / den
    }
}

impl Estimator for KimberlyPenman {
    fn name(&self) -> &'static str {
        "Kimberly-Penman"
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
        let doy = inputs::days_of_year(weather);

        let pet = Array1::from_shape_fn(weather.len(), |i| {
            self.day(tmean[i], wind[i], rn[i], es[i] - ea[i], pressure, doy[i])
        });
        Ok(inputs::finish(weather, pet, self.clip_zero))
    }
}
