use log::debug;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::inputs;
use super::Estimator;
use crate::model::{DailySeries, Error, Requirement, Site, Variable, Weather};

/// Published parameterizations of the Blaney-Criddle equation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum BlaneyCriddleMethod {
    /// Schrodter (1985): `k p (0.46 T + 8.13)`
    Schrodter { k: f64 },
    /// Xu and Singh (2001): `a + b p (0.457 T + 8.128)`
    Xu { a: f64, b: f64 },
    /// FAO-24 with the Allen and Pruitt (1986) regression for b
    AllenPruitt,
    /// FAO-24 with the regression coefficients of McMahon et al. (2013)
    McMahon,
}

impl BlaneyCriddleMethod {
    pub const SCHRODTER: BlaneyCriddleMethod = BlaneyCriddleMethod::Schrodter { k: 0.65 };
    pub const XU: BlaneyCriddleMethod = BlaneyCriddleMethod::Xu { a: -1.55, b: 0.96 };
}

/// Legacy numeric method codes: 0 Schrodter, 1 and 2 the FAO-24 forms.
impl TryFrom<u8> for BlaneyCriddleMethod {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BlaneyCriddleMethod::SCHRODTER),
            1 => Ok(BlaneyCriddleMethod::AllenPruitt),
            2 => Ok(BlaneyCriddleMethod::McMahon),
            _ => Err(Error::Configuration(format!(
                "unknown Blaney-Criddle method {code}. Valid options: 0, 1, 2"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlaneyCriddle {
    pub method: BlaneyCriddleMethod,
    pub clip_zero: bool,
}

impl Default for BlaneyCriddle {
    fn default() -> Self {
        BlaneyCriddle {
            method: BlaneyCriddleMethod::SCHRODTER,
            clip_zero: true,
        }
    }
}

/// Mean daily percentage of annual daytime hours.
pub fn daytime_percentage(daylight: f64) -> f64 {
    100. * daylight / (365. * 12.)
}

pub fn schrodter(tmean: f64, p: f64, k: f64) -> f64 {
    k * p * (0.46 * tmean + 8.13)
}

pub fn xu(tmean: f64, p: f64, a: f64, b: f64) -> f64 {
    a + b * p * (0.457 * tmean + 8.128)
}

/// FAO-24 form `a + b p (0.46 T + 8.13)` with `a` and `b` adjusted for
/// minimum humidity [%], relative sunshine n/N and wind [m/s].
pub fn fao24(
    tmean: f64,
    p: f64,
    rhmin: f64,
    relative_sunshine: f64,
    wind: f64,
    method: BlaneyCriddleMethod,
) -> f64 {
    let a = 0.0043 * rhmin - relative_sunshine - 1.41;
    let b = match method {
        BlaneyCriddleMethod::McMahon => {
            0.81917 - 0.0040922 * rhmin + 1.0705 * relative_sunshine + 0.065649 * wind
                - 0.0059684 * rhmin * relative_sunshine
                - 0.0005967 * rhmin * wind
        }
        _ => {
            0.82 - 0.0041 * rhmin + 1.07 * relative_sunshine + 0.066 * wind
                - 0.006 * rhmin * relative_sunshine
                - 0.0006 * rhmin * wind
        }
    };
    a + b * p * (0.46 * tmean + 8.13)
}

/// Daily observations used only by the FAO-24 forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fao24Inputs {
    /// Minimum relative humidity [%]
    pub rhmin: f64,
    /// Sunshine duration [hours]
    pub sunshine: f64,
    /// Wind speed at 2 m [m/s]
    pub wind: f64,
}

impl BlaneyCriddle {
    /// PET for one day. The FAO-24 forms fail without `fao24_inputs`.
    pub fn day(
        &self,
        tmean: f64,
        daylight: f64,
        fao24_inputs: Option<Fao24Inputs>,
    ) -> Result<f64, Error> {
        let p = daytime_percentage(daylight);
        match self.method {
            BlaneyCriddleMethod::Schrodter { k } => Ok(schrodter(tmean, p, k)),
            BlaneyCriddleMethod::Xu { a, b } => Ok(xu(tmean, p, a, b)),
            method => {
                let Fao24Inputs {
                    rhmin,
                    sunshine,
                    wind,
                } = fao24_inputs.ok_or(Error::MissingInput(Requirement::MinimumHumidity))?;
                let relative_sunshine = if daylight > 0. {
                    sunshine / daylight
                } else {
                    0.
                };
                Ok(fao24(tmean, p, rhmin, relative_sunshine, wind, method))
            }
        }
    }
}

impl Estimator for BlaneyCriddle {
    fn name(&self) -> &'static str {
        "Blaney-Criddle"
    }

    fn requires(&self) -> &'static [Requirement] {
        match self.method {
            BlaneyCriddleMethod::Schrodter { .. } | BlaneyCriddleMethod::Xu { .. } => {
                &[Requirement::Temperature]
            }
            BlaneyCriddleMethod::AllenPruitt | BlaneyCriddleMethod::McMahon => &[
                Requirement::Temperature,
                Requirement::MinimumHumidity,
                Requirement::Sunshine,
                Requirement::Wind,
            ],
        }
    }

    fn estimate(&self, weather: &Weather, site: &Site) -> Result<DailySeries, Error> {
        self.check_inputs(weather)?;
        let tmean = weather.tmean()?;
        let daylight = inputs::daylight(weather, site);
        debug!("Blaney-Criddle with {:?}", self.method);

        let pet = match self.method {
            BlaneyCriddleMethod::Schrodter { .. } | BlaneyCriddleMethod::Xu { .. } => {
                (0..weather.len())
                    .map(|i| self.day(tmean[i], daylight[i], None))
                    .collect::<Result<Array1<f64>, Error>>()?
            }
            _ => {
                let rhmin = inputs::require(weather, Variable::RhMin, Requirement::MinimumHumidity)?;
                let sunshine = inputs::require(weather, Variable::Sunshine, Requirement::Sunshine)?;
                let wind = inputs::require(weather, Variable::Wind, Requirement::Wind)?;
                (0..weather.len())
                    .map(|i| {
                        let fao24 = Fao24Inputs {
                            rhmin: rhmin[i],
                            sunshine: sunshine[i],
                            wind: wind[i],
                        };
                        self.day(tmean[i], daylight[i], Some(fao24))
                    })
                    .collect::<Result<Array1<f64>, Error>>()?
            }
        };
        Ok(inputs::finish(weather, pet, self.clip_zero))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn method_codes() {
        assert_eq!(BlaneyCriddleMethod::try_from(0).unwrap(), BlaneyCriddleMethod::SCHRODTER);
        assert_eq!(BlaneyCriddleMethod::try_from(1).unwrap(), BlaneyCriddleMethod::AllenPruitt);
        assert_eq!(BlaneyCriddleMethod::try_from(2).unwrap(), BlaneyCriddleMethod::McMahon);
        assert!(matches!(
            BlaneyCriddleMethod::try_from(3),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn twelve_hour_days_give_mean_percentage() {
        assert_abs_diff_eq!(daytime_percentage(12.), 100. / 365., epsilon = 1e-12);
    }

    #[test]
    fn fao24_variants_agree_closely() {
        let p = daytime_percentage(10.7431);
        let rounded = fao24(11.5, p, 25., 0.996, 0.5903, BlaneyCriddleMethod::AllenPruitt);
        let precise = fao24(11.5, p, 25., 0.996, 0.5903, BlaneyCriddleMethod::McMahon);
        assert_abs_diff_eq!(rounded, precise, epsilon = 0.01);
    }

    #[test]
    fn fao24_needs_wind_humidity_and_sunshine() {
        let weather = Weather::single_day(chrono::NaiveDate::from_ymd_opt(1980, 7, 20).unwrap())
            .with_values(Variable::Tmean, vec![11.5])
            .unwrap();
        let estimator = BlaneyCriddle {
            method: BlaneyCriddleMethod::McMahon,
            ..Default::default()
        };
        let err = estimator
            .estimate(&weather, &Site::from_degrees(-23.8, 546.))
            .unwrap_err();
        assert_eq!(err, Error::MissingInput(Requirement::MinimumHumidity));
    }

    #[test]
    fn day_kernel_matches_the_formulas() {
        let schrodter_day = BlaneyCriddle::default().day(15., 14., None).unwrap();
        let expected = schrodter(15., daytime_percentage(14.), 0.65);
        assert_abs_diff_eq!(schrodter_day, expected, epsilon = 1e-12);

        let fao = BlaneyCriddle {
            method: BlaneyCriddleMethod::McMahon,
            ..Default::default()
        };
        assert_eq!(
            fao.day(11.5, 10.7431, None).unwrap_err(),
            Error::MissingInput(Requirement::MinimumHumidity)
        );
        let inputs = Fao24Inputs {
            rhmin: 25.,
            sunshine: 10.7,
            wind: 0.5903,
        };
        let expected = fao24(
            11.5,
            daytime_percentage(10.7431),
            25.,
            10.7 / 10.7431,
            0.5903,
            BlaneyCriddleMethod::McMahon,
        );
        let pet = fao.day(11.5, 10.7431, Some(inputs)).unwrap();
        assert_abs_diff_eq!(pet, expected, epsilon = 1e-12);
        // no daylight means no sunshine ratio
        assert!(fao.day(-10., 0., Some(inputs)).unwrap().is_finite());
    }

    #[test]
    fn method_from_config() {
        let method: BlaneyCriddleMethod =
            serde_json::from_str(r#"{"variant": "schrodter", "k": 0.7}"#).unwrap();
        assert_eq!(method, BlaneyCriddleMethod::Schrodter { k: 0.7 });
        let estimator: BlaneyCriddle =
            serde_json::from_str(r#"{"method": {"variant": "mc_mahon"}}"#).unwrap();
        assert_eq!(estimator.method, BlaneyCriddleMethod::McMahon);
        assert!(estimator.clip_zero);
    }
}
