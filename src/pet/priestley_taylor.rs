use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::meteo::{atmospheric_pressure, psychrometric_constant, vapor_pressure_slope, LatentHeat};
use crate::model::{DailySeries, Error, Requirement, Site, Weather};
use crate::radiation::RadiationCoefficients;

/// Priestley and Taylor (1972) equilibrium evaporation scaled by α.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriestleyTaylor {
    pub alpha: f64,
    pub lambda: LatentHeat,
    pub radiation: RadiationCoefficients,
    pub soil_heat_flux: f64,
    pub clip_zero: bool,
}

impl Default for PriestleyTaylor {
    fn default() -> Self {
        PriestleyTaylor {
            alpha: 1.26,
            lambda: LatentHeat::FAO56,
            radiation: RadiationCoefficients::default(),
            soil_heat_flux: 0.,
            clip_zero: true,
        }
    }
}

pub fn priestley_taylor(delta: f64, gamma: f64, rn: f64, g: f64, lambda: f64, alpha: f64) -> f64 {
    alpha * delta / (delta + gamma) * (rn - g) / lambda
}

impl PriestleyTaylor {
    /// PET for one day from net radiation; `pressure` in kPa.
    pub fn day(&self, tmean: f64, rn: f64, pressure: f64) -> f64 {
        let lambda = self.lambda.value(tmean);
        priestley_taylor(
            vapor_pressure_slope(tmean),
            psychrometric_constant(pressure, lambda),
            rn,
            self.soil_heat_flux,
            lambda,
            self.alpha,
        )
    }
}

impl Estimator for PriestleyTaylor {
    fn name(&self) -> &'static str {
        "Priestley-Taylor"
    }

    fn requires(&self) -> &'static [Requirement] {
        &[Requirement::Temperature, Requirement::NetRadiation]
    }

    fn estimate(&self, weather: &Weather, site: &Site) -> Result<DailySeries, Error> {
        self.check_inputs(weather)?;
        let tmean = weather.tmean()?;
        let rn = inputs::net_radiation(weather, site, &self.radiation, &tmean)?;
        let pressure = atmospheric_pressure(site.elevation);

        let pet = Array1::from_shape_fn(weather.len(), |i| self.day(tmean[i], rn[i], pressure));
        Ok(inputs::finish(weather, pet, self.clip_zero))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variable;
    use chrono::NaiveDate;

    #[test]
    fn negative_net_radiation_clips_to_zero() {
        let weather = Weather::single_day(NaiveDate::from_ymd_opt(2010, 12, 21).unwrap())
            .with_values(Variable::Tmean, vec![-5.0])
            .and_then(|w| w.with_values(Variable::Rn, vec![-1.5]))
            .unwrap();
        let pet = PriestleyTaylor::default()
            .estimate(&weather, &Site::from_degrees(60., 0.))
            .unwrap();
        assert_eq!(pet.values()[0], 0.);
    }

    #[test]
    fn sunshine_without_humidity_cannot_close_the_budget() {
        let weather = Weather::single_day(NaiveDate::from_ymd_opt(2010, 6, 21).unwrap())
            .with_values(Variable::Tmean, vec![15.0])
            .and_then(|w| w.with_values(Variable::Sunshine, vec![8.0]))
            .unwrap();
        let err = PriestleyTaylor::default()
            .estimate(&weather, &Site::from_degrees(60., 0.))
            .unwrap_err();
        assert_eq!(err, Error::MissingInput(Requirement::Humidity));
    }
}
