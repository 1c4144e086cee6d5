//! Daily intermediates shared by the estimators, derived from whatever the
//! weather record provides.

use log::debug;
use ndarray::Array1;

use crate::meteo::{
    actual_vapor_pressure_from_extremes, actual_vapor_pressure_from_mean, day_of_year,
    mean_saturation_vapor_pressure, saturation_vapor_pressure,
};
use crate::model::{DailySeries, Error, Requirement, Site, Variable, Weather};
use crate::radiation::{
    extraterrestrial_radiation, incoming_shortwave, net_radiation_from_shortwave,
    RadiationCoefficients,
};
use crate::solar::daylight_hours;

pub(crate) fn require<'a>(
    weather: &'a Weather,
    variable: Variable,
    requirement: Requirement,
) -> Result<&'a Array1<f64>, Error> {
    weather
        .get(variable)
        .ok_or(Error::MissingInput(requirement))
}

pub(crate) fn days_of_year(weather: &Weather) -> Vec<u32> {
    weather.dates().iter().map(|&d| day_of_year(d)).collect()
}

pub(crate) fn extraterrestrial(weather: &Weather, site: &Site) -> Array1<f64> {
    days_of_year(weather)
        .into_iter()
        .map(|doy| extraterrestrial_radiation(doy, site.latitude))
        .collect()
}

pub(crate) fn daylight(weather: &Weather, site: &Site) -> Array1<f64> {
    days_of_year(weather)
        .into_iter()
        .map(|doy| daylight_hours(doy, site.latitude))
        .collect()
}

/// Daily extremes, falling back to the mean temperature for both.
pub(crate) fn temperature_extremes(
    weather: &Weather,
    tmean: &Array1<f64>,
) -> (Array1<f64>, Array1<f64>) {
    match (weather.get(Variable::Tmax), weather.get(Variable::Tmin)) {
        (Some(tmax), Some(tmin)) => (tmax.clone(), tmin.clone()),
        _ => (tmean.clone(), tmean.clone()),
    }
}

/// Mean saturation vapour pressure [kPa].
pub(crate) fn saturation(weather: &Weather, tmean: &Array1<f64>) -> Array1<f64> {
    match (weather.get(Variable::Tmax), weather.get(Variable::Tmin)) {
        (Some(tmax), Some(tmin)) => Array1::from_shape_fn(tmax.len(), |i| {
            mean_saturation_vapor_pressure(
                saturation_vapor_pressure(tmax[i]),
                saturation_vapor_pressure(tmin[i]),
            )
        }),
        _ => tmean.mapv(saturation_vapor_pressure),
    }
}

/// Actual vapour pressure [kPa]: observed, else from the humidity extremes,
/// else from mean humidity.
pub(crate) fn actual_vapor(
    weather: &Weather,
    tmean: &Array1<f64>,
    es: &Array1<f64>,
) -> Result<Array1<f64>, Error> {
    if let Some(ea) = weather.get(Variable::Ea) {
        return Ok(ea.clone());
    }
    if let (Some(rhmax), Some(rhmin)) = (weather.get(Variable::RhMax), weather.get(Variable::RhMin))
    {
        let (tmax, tmin) = temperature_extremes(weather, tmean);
        return Ok(Array1::from_shape_fn(rhmax.len(), |i| {
            actual_vapor_pressure_from_extremes(tmax[i], tmin[i], rhmax[i], rhmin[i])
        }));
    }
    if let Some(rh) = weather.get(Variable::Rh) {
        return Ok(Array1::from_shape_fn(rh.len(), |i| {
            actual_vapor_pressure_from_mean(es[i], rh[i])
        }));
    }
    Err(Error::MissingInput(Requirement::Humidity))
}

/// Mean relative humidity [%], averaging the extremes when needed.
pub(crate) fn mean_humidity(weather: &Weather) -> Option<Array1<f64>> {
    if let Some(rh) = weather.get(Variable::Rh) {
        return Some(rh.clone());
    }
    match (weather.get(Variable::RhMax), weather.get(Variable::RhMin)) {
        (Some(rhmax), Some(rhmin)) => Some((rhmax + rhmin) / 2.),
        _ => None,
    }
}

/// Incoming shortwave radiation [MJ m-2 day-1], observed or estimated from
/// sunshine duration.
pub(crate) fn shortwave(
    weather: &Weather,
    site: &Site,
    coefficients: &RadiationCoefficients,
) -> Result<Array1<f64>, Error> {
    if let Some(rs) = weather.get(Variable::Rs) {
        return Ok(rs.clone());
    }
    let sunshine = require(weather, Variable::Sunshine, Requirement::Shortwave)?;
    debug!("estimating shortwave radiation from sunshine duration");
    let ra = extraterrestrial(weather, site);
    let n = daylight(weather, site);
    Ok(Array1::from_shape_fn(sunshine.len(), |i| {
        incoming_shortwave(sunshine[i], n[i], ra[i], coefficients.a_s, coefficients.b_s)
    }))
}

/// Net radiation [MJ m-2 day-1], observed or built from shortwave
/// radiation, temperature extremes and humidity.
pub(crate) fn net_radiation(
    weather: &Weather,
    site: &Site,
    coefficients: &RadiationCoefficients,
    tmean: &Array1<f64>,
) -> Result<Array1<f64>, Error> {
    if let Some(rn) = weather.get(Variable::Rn) {
        return Ok(rn.clone());
    }
    let rs = shortwave(weather, site, coefficients)
        .map_err(|_| Error::MissingInput(Requirement::NetRadiation))?;
    debug!("computing net radiation from the radiation budget");
    let ra = extraterrestrial(weather, site);
    let (tmax, tmin) = temperature_extremes(weather, tmean);
    let es = saturation(weather, tmean);
    let ea = actual_vapor(weather, tmean, &es)?;
    (0..rs.len())
        .map(|i| {
            net_radiation_from_shortwave(
                rs[i],
                ra[i],
                site.elevation,
                tmax[i],
                tmin[i],
                ea[i],
                coefficients.albedo,
            )
        })
        .collect::<Result<Vec<f64>, Error>>()
        .map(Array1::from_vec)
}

/// Replace negative PET with 0 when asked; NaN passes through.
pub(crate) fn clip(mut pet: Array1<f64>, clip_zero: bool) -> Array1<f64> {
    if clip_zero {
        pet.mapv_inplace(|v| if v < 0. { 0. } else { v });
    }
    pet
}

/// Wrap computed PET into a series, clipping negative values when asked.
pub(crate) fn finish(weather: &Weather, pet: Array1<f64>, clip_zero: bool) -> DailySeries {
    weather.to_series(clip(pet, clip_zero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn record() -> Weather {
        Weather::single_day(NaiveDate::from_ymd_opt(1980, 7, 20).unwrap())
            .with_values(Variable::Tmax, vec![21.0])
            .and_then(|w| w.with_values(Variable::Tmin, vec![2.0]))
            .unwrap()
    }

    #[test]
    fn observed_ea_takes_precedence() {
        let weather = record()
            .with_values(Variable::Ea, vec![1.19])
            .and_then(|w| w.with_values(Variable::Rh, vec![50.0]))
            .unwrap();
        let tmean = weather.tmean().unwrap();
        let es = saturation(&weather, &tmean);
        assert_eq!(actual_vapor(&weather, &tmean, &es).unwrap()[0], 1.19);
    }

    #[test]
    fn ea_from_mean_humidity() {
        let weather = record().with_values(Variable::Rh, vec![50.0]).unwrap();
        let tmean = weather.tmean().unwrap();
        let es = saturation(&weather, &tmean);
        assert_abs_diff_eq!(
            actual_vapor(&weather, &tmean, &es).unwrap()[0],
            es[0] / 2.,
            epsilon = 1e-12
        );
    }

    #[test]
    fn ea_without_humidity_is_missing_input() {
        let weather = record();
        let tmean = weather.tmean().unwrap();
        let es = saturation(&weather, &tmean);
        assert_eq!(
            actual_vapor(&weather, &tmean, &es).unwrap_err(),
            Error::MissingInput(Requirement::Humidity)
        );
    }

    #[test]
    fn mean_humidity_from_extremes() {
        let weather = record()
            .with_values(Variable::RhMax, vec![71.0])
            .and_then(|w| w.with_values(Variable::RhMin, vec![25.0]))
            .unwrap();
        assert_eq!(mean_humidity(&weather).unwrap()[0], 48.0);
    }

    #[test]
    fn clipping_keeps_nan() {
        let weather = Weather::new(vec![
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 3).unwrap(),
        ])
        .unwrap();
        let pet = finish(&weather, Array1::from_vec(vec![-1.0, f64::NAN, 2.0]), true);
        assert_eq!(pet.values()[0], 0.0);
        assert!(pet.values()[1].is_nan());
        assert_eq!(pet.values()[2], 2.0);
    }
}
