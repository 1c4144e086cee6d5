use chrono::NaiveDate;
use log::debug;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("input outside the valid domain: {0}")]
    Domain(String),
    #[error("series must share the same date index: {0}")]
    InputAlignment(String),
    #[error("unsupported configuration: {0}")]
    Configuration(String),
    #[error("missing input: {0}")]
    MissingInput(Requirement),
}

/// A physical quantity a [`Weather`] record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Mean daily air temperature [°C]
    Tmean,
    /// Maximum daily air temperature [°C]
    Tmax,
    /// Minimum daily air temperature [°C]
    Tmin,
    /// Mean daily relative humidity [%]
    Rh,
    /// Maximum daily relative humidity [%]
    RhMax,
    /// Minimum daily relative humidity [%]
    RhMin,
    /// Actual vapour pressure [kPa]
    Ea,
    /// Wind speed at 2 m [m/s]
    Wind,
    /// Bright sunshine duration [hours]
    Sunshine,
    /// Incoming shortwave radiation [MJ m-2 day-1]
    Rs,
    /// Net radiation [MJ m-2 day-1]
    Rn,
}

impl Variable {
    pub const ALL: [Variable; 11] = [
        Variable::Tmean,
        Variable::Tmax,
        Variable::Tmin,
        Variable::Rh,
        Variable::RhMax,
        Variable::RhMin,
        Variable::Ea,
        Variable::Wind,
        Variable::Sunshine,
        Variable::Rs,
        Variable::Rn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variable::Tmean => "tmean",
            Variable::Tmax => "tmax",
            Variable::Tmin => "tmin",
            Variable::Rh => "rh",
            Variable::RhMax => "rhmax",
            Variable::RhMin => "rhmin",
            Variable::Ea => "ea",
            Variable::Wind => "wind",
            Variable::Sunshine => "sunshine",
            Variable::Rs => "rs",
            Variable::Rn => "rn",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A class of input an estimator needs, satisfied by any one of several
/// combinations of [`Variable`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    Temperature,
    TemperatureExtremes,
    AfternoonTemperature,
    Humidity,
    AfternoonHumidity,
    MinimumHumidity,
    Wind,
    Sunshine,
    Shortwave,
    NetRadiation,
}

impl Requirement {
    pub fn alternatives(self) -> &'static [&'static [Variable]] {
        use Variable::*;
        match self {
            Requirement::Temperature => &[&[Tmean], &[Tmax, Tmin]],
            Requirement::TemperatureExtremes => &[&[Tmax, Tmin]],
            Requirement::AfternoonTemperature => &[&[Tmax]],
            Requirement::Humidity => &[&[Ea], &[RhMax, RhMin], &[Rh]],
            Requirement::AfternoonHumidity => &[&[Ea], &[RhMin], &[Rh]],
            Requirement::MinimumHumidity => &[&[RhMin]],
            Requirement::Wind => &[&[Wind]],
            Requirement::Sunshine => &[&[Sunshine]],
            Requirement::Shortwave => &[&[Rs], &[Sunshine]],
            Requirement::NetRadiation => &[&[Rn], &[Rs], &[Sunshine]],
        }
    }

    pub fn is_satisfied_by(self, weather: &Weather) -> bool {
        self.alternatives()
            .iter()
            .any(|set| set.iter().all(|&v| weather.has(v)))
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options: Vec<String> = self
            .alternatives()
            .iter()
            .map(|set| {
                set.iter()
                    .map(|v| v.name())
                    .collect::<Vec<_>>()
                    .join("+")
            })
            .collect();
        write!(f, "{:?} (one of: {})", self, options.join(", "))
    }
}

/// An ordered daily series of values, one per calendar day.
///
/// The date index is reference counted, so series derived from one another
/// share it and alignment checks are usually a pointer comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    dates: Arc<[NaiveDate]>,
    values: Array1<f64>,
}

impl DailySeries {
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, Error> {
        if dates.len() != values.len() {
            return Err(Error::InputAlignment(format!(
                "{} dates but {} values",
                dates.len(),
                values.len()
            )));
        }
        check_index(&dates)?;
        Ok(DailySeries {
            dates: dates.into(),
            values: Array1::from_vec(values),
        })
    }

    pub fn single(date: NaiveDate, value: f64) -> Self {
        DailySeries {
            dates: Arc::from(vec![date]),
            values: Array1::from_vec(vec![value]),
        }
    }

    pub(crate) fn from_parts(dates: Arc<[NaiveDate]>, values: Array1<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        DailySeries { dates, values }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn into_values(self) -> Array1<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value on `date`, if the date is part of the index.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Apply `f` to every value, keeping the date index.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        DailySeries {
            dates: Arc::clone(&self.dates),
            values: self.values.mapv(f),
        }
    }

    pub fn same_index(&self, other: &DailySeries) -> bool {
        Arc::ptr_eq(&self.dates, &other.dates) || self.dates == other.dates
    }
}

fn check_index(dates: &[NaiveDate]) -> Result<(), Error> {
    match dates.windows(2).find(|w| w[1] <= w[0]) {
        Some(w) => Err(Error::InputAlignment(format!(
            "dates must be unique and increasing ({} follows {})",
            w[1], w[0]
        ))),
        None => Ok(()),
    }
}

/// Fixed site constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Latitude [rad], southern hemisphere negative
    pub latitude: f64,
    /// Elevation above sea level [m]
    pub elevation: f64,
}

impl Site {
    pub fn new(latitude: f64, elevation: f64) -> Self {
        Site {
            latitude,
            elevation,
        }
    }

    pub fn from_degrees(latitude: f64, elevation: f64) -> Self {
        Site::new(latitude.to_radians(), elevation)
    }
}

/// Daily weather observations for one station, all sharing one date index.
#[derive(Debug, Clone)]
pub struct Weather {
    dates: Arc<[NaiveDate]>,
    values: [Option<Array1<f64>>; 11],
}

impl Weather {
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self, Error> {
        check_index(&dates)?;
        Ok(Weather {
            dates: dates.into(),
            values: Default::default(),
        })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Weather {
            dates: Arc::from(vec![date]),
            values: Default::default(),
        }
    }

    /// Attach `series`, which must share this record's date index.
    pub fn with(mut self, variable: Variable, series: DailySeries) -> Result<Self, Error> {
        if !(Arc::ptr_eq(&self.dates, &series.dates) || *self.dates == *series.dates) {
            return Err(Error::InputAlignment(format!(
                "'{}' is indexed differently from the weather record",
                variable
            )));
        }
        self.values[slot(variable)] = Some(series.values);
        Ok(self)
    }

    /// Attach raw values laid out on this record's date index.
    pub fn with_values(
        mut self,
        variable: Variable,
        values: impl Into<Array1<f64>>,
    ) -> Result<Self, Error> {
        let values = values.into();
        if values.len() != self.dates.len() {
            return Err(Error::InputAlignment(format!(
                "'{}' has {} values for {} dates",
                variable,
                values.len(),
                self.dates.len()
            )));
        }
        self.values[slot(variable)] = Some(values);
        Ok(self)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn has(&self, variable: Variable) -> bool {
        self.values[slot(variable)].is_some()
    }

    pub fn get(&self, variable: Variable) -> Option<&Array1<f64>> {
        self.values[slot(variable)].as_ref()
    }

    pub fn series(&self, variable: Variable) -> Option<DailySeries> {
        self.get(variable)
            .map(|v| DailySeries::from_parts(Arc::clone(&self.dates), v.clone()))
    }

    /// Mean temperature, averaged from the extremes when not observed.
    pub fn tmean(&self) -> Result<Array1<f64>, Error> {
        if let Some(tmean) = self.get(Variable::Tmean) {
            return Ok(tmean.clone());
        }
        match (self.get(Variable::Tmax), self.get(Variable::Tmin)) {
            (Some(tmax), Some(tmin)) => {
                debug!("deriving tmean from tmax and tmin");
                Ok((tmax + tmin) / 2.0)
            }
            _ => Err(Error::MissingInput(Requirement::Temperature)),
        }
    }

    /// Wrap `values` computed for each day into a series on this index.
    pub fn to_series(&self, values: Array1<f64>) -> DailySeries {
        DailySeries::from_parts(Arc::clone(&self.dates), values)
    }
}

fn slot(variable: Variable) -> usize {
    variable as usize
}

#[cfg(feature = "python")]
impl From<Error> for pyo3::PyErr {
    fn from(err: Error) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
