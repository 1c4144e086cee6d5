//! Aerodynamic and surface resistances of a vegetated surface [s m-1].

use serde::{Deserialize, Serialize};

use crate::model::Error;

/// Von Karman's constant.
const VON_KARMAN: f64 = 0.41;

/// How the aerodynamic resistance is obtained from wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum AerodynamicMethod {
    /// `208 / u2`, the FAO-56 grass value
    Grass,
    /// Log wind profile (FAO 1990, annex V eq. 36) over the crop height,
    /// with wind and humidity measured at the given heights [m]
    Profile { wind_height: f64, humidity_height: f64 },
}

/// Effective leaf area index formulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveLai {
    /// `0.5 LAI`
    Half,
    /// `LAI / (0.3 LAI + 1.2)`
    Rational,
    /// `LAI` up to 2, then 2 up to 4, then `0.5 LAI` (Zhang et al. 2008)
    Zhang,
    /// `0.5 min(LAI, 4)`
    HalfCapped,
}

/// Legacy numeric codes 0-3, in declaration order.
impl TryFrom<u8> for EffectiveLai {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EffectiveLai::Half),
            1 => Ok(EffectiveLai::Rational),
            2 => Ok(EffectiveLai::Zhang),
            3 => Ok(EffectiveLai::HalfCapped),
            _ => Err(Error::Configuration(format!(
                "unknown effective LAI method {code}. Valid options: 0, 1, 2, 3"
            ))),
        }
    }
}

impl EffectiveLai {
    pub fn value(self, lai: f64) -> f64 {
        match self {
            EffectiveLai::Half => 0.5 * lai,
            EffectiveLai::Rational => lai / (0.3 * lai + 1.2),
            EffectiveLai::Zhang => {
                if lai <= 2. {
                    lai
                } else if lai < 4. {
                    2.
                } else {
                    0.5 * lai
                }
            }
            EffectiveLai::HalfCapped => 0.5 * lai.min(4.),
        }
    }
}

/// Canopy description shared by the resistance-based combination methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canopy {
    /// Crop height [m]
    pub height: f64,
    pub aerodynamic: AerodynamicMethod,
    /// Fixed bulk surface resistance [s m-1]; derived from the stomatal
    /// resistance when absent
    pub surface_resistance: Option<f64>,
    /// Bulk stomatal resistance of a well-illuminated leaf [s m-1]
    pub stomatal_resistance: f64,
    /// Leaf area index; FAO-56 uses `24 h` for clipped grass when absent
    pub lai: Option<f64>,
    pub effective_lai: EffectiveLai,
    /// Relative sensitivity of stomatal resistance to CO2 [ppm-1]
    pub co2_sensitivity: f64,
    /// Atmospheric CO2 concentration [ppm]
    pub co2: f64,
}

impl Default for Canopy {
    fn default() -> Self {
        Canopy {
            height: 0.12,
            aerodynamic: AerodynamicMethod::Grass,
            surface_resistance: None,
            stomatal_resistance: 100.,
            lai: None,
            effective_lai: EffectiveLai::Half,
            co2_sensitivity: 0.0009,
            co2: 300.,
        }
    }
}

impl Canopy {
    /// Aerodynamic resistance for wind speed `wind` [m/s] at 2 m. Infinite
    /// in calm air, which removes the aerodynamic term.
    pub fn aerodynamic_resistance(&self, wind: f64) -> f64 {
        match self.aerodynamic {
            AerodynamicMethod::Grass => 208. / wind,
            AerodynamicMethod::Profile {
                wind_height,
                humidity_height,
            } => {
                let d = 0.667 * self.height;
                let zom = 0.123 * self.height;
                let zoh = 0.0123 * self.height;
                ((wind_height - d) / zom).ln() * ((humidity_height - d) / zoh).ln()
                    / VON_KARMAN.powi(2)
                    / wind
            }
        }
    }

    /// Bulk surface resistance, scaled for CO2 above 300 ppm.
    pub fn surface_resistance(&self) -> f64 {
        if let Some(rs) = self.surface_resistance {
            return rs;
        }
        let co2_factor = 1. + self.co2_sensitivity * (self.co2 - 300.);
        let active_lai = match self.lai {
            Some(lai) => self.effective_lai.value(lai),
            None => 0.5 * 24. * self.height,
        };
        co2_factor * self.stomatal_resistance / active_lai
    }
}
