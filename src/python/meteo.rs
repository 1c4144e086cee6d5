use numpy::{PyArray1, PyReadonlyArray1, ToPyArray};
use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;

use super::days;
use crate::{meteo, radiation, solar};

#[gen_stub_pyfunction(module = "pet_rs.meteo")]
#[pyfunction]
#[pyo3(name = "saturation_vapor_pressure")]
pub fn py_saturation_vapor_pressure<'py>(
    py: Python<'py>,
    temperature: PyReadonlyArray1<'py, f64>,
) -> Bound<'py, PyArray1<f64>> {
    temperature
        .as_array()
        .mapv(meteo::saturation_vapor_pressure)
        .to_pyarray(py)
}

#[gen_stub_pyfunction(module = "pet_rs.meteo")]
#[pyfunction]
#[pyo3(name = "vapor_pressure_slope")]
pub fn py_vapor_pressure_slope<'py>(
    py: Python<'py>,
    temperature: PyReadonlyArray1<'py, f64>,
) -> Bound<'py, PyArray1<f64>> {
    temperature
        .as_array()
        .mapv(meteo::vapor_pressure_slope)
        .to_pyarray(py)
}

#[gen_stub_pyfunction(module = "pet_rs.meteo")]
#[pyfunction]
#[pyo3(name = "atmospheric_pressure")]
pub fn py_atmospheric_pressure(elevation: f64) -> f64 {
    meteo::atmospheric_pressure(elevation)
}

/// Latitude in degrees.
#[gen_stub_pyfunction(module = "pet_rs.meteo")]
#[pyfunction]
#[pyo3(name = "extraterrestrial_radiation")]
pub fn py_extraterrestrial_radiation<'py>(
    py: Python<'py>,
    day_of_year: PyReadonlyArray1<'py, usize>,
    latitude: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let latitude = latitude.to_radians();
    let ra: Vec<f64> = days(&day_of_year)?
        .into_iter()
        .map(|doy| radiation::extraterrestrial_radiation(doy, latitude))
        .collect();
    Ok(PyArray1::from_vec(py, ra))
}

/// Latitude in degrees.
#[gen_stub_pyfunction(module = "pet_rs.meteo")]
#[pyfunction]
#[pyo3(name = "daylight_hours")]
pub fn py_daylight_hours<'py>(
    py: Python<'py>,
    day_of_year: PyReadonlyArray1<'py, usize>,
    latitude: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let latitude = latitude.to_radians();
    let n: Vec<f64> = days(&day_of_year)?
        .into_iter()
        .map(|doy| solar::daylight_hours(doy, latitude))
        .collect();
    Ok(PyArray1::from_vec(py, n))
}

pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, "meteo")?;
    m.add_function(wrap_pyfunction!(py_saturation_vapor_pressure, &m)?)?;
    m.add_function(wrap_pyfunction!(py_vapor_pressure_slope, &m)?)?;
    m.add_function(wrap_pyfunction!(py_atmospheric_pressure, &m)?)?;
    m.add_function(wrap_pyfunction!(py_extraterrestrial_radiation, &m)?)?;
    m.add_function(wrap_pyfunction!(py_daylight_hours, &m)?)?;
    Ok(m)
}
