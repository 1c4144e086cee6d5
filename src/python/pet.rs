use ndarray::Array1;
use numpy::{PyArray1, PyReadonlyArray1, ToPyArray};
use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;

use super::{check_lengths, days};
use crate::meteo::{atmospheric_pressure, LatentHeat};
use crate::model::{Error, Requirement};
use crate::pet::inputs::clip;
use crate::pet::{
    BlaneyCriddle, BlaneyCriddleMethod, Fao24Inputs, GeneralPenmanMonteith, HargreavesMethod,
    HargreavesSamani, Haude, KimberlyPenman, Makkink, Oudin, PenmanMonteith, PriestleyTaylor,
    ReferenceSurface, ThomOliver, Turc,
};
use crate::radiation::extraterrestrial_radiation;
use crate::resistance::{AerodynamicMethod, Canopy, EffectiveLai};
use crate::solar::daylight_hours;

/// `latent_heat` in MJ kg-1; `None` follows the mean temperature.
fn latent_heat_choice(latent_heat: Option<f64>) -> LatentHeat {
    match latent_heat {
        Some(lambda) => LatentHeat::Fixed(lambda),
        None => LatentHeat::TemperatureDependent,
    }
}

/// FAO-56 Penman-Monteith from daily net radiation and vapour pressures.
/// `latent_heat` sets λ for the psychrometric constant.
#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(
    name = "penman_monteith",
    signature = (tmean, wind, rn, es, ea, elevation, tall = false, latent_heat = Some(2.45))
)]
#[allow(clippy::too_many_arguments)]
pub fn py_penman_monteith<'py>(
    py: Python<'py>,
    tmean: PyReadonlyArray1<'py, f64>,
    wind: PyReadonlyArray1<'py, f64>,
    rn: PyReadonlyArray1<'py, f64>,
    es: PyReadonlyArray1<'py, f64>,
    ea: PyReadonlyArray1<'py, f64>,
    elevation: f64,
    tall: bool,
    latent_heat: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (tmean, wind, rn, es, ea) = (
        tmean.as_array(),
        wind.as_array(),
        rn.as_array(),
        es.as_array(),
        ea.as_array(),
    );
    let n = check_lengths(&[
        ("tmean", tmean.len()),
        ("wind", wind.len()),
        ("rn", rn.len()),
        ("es", es.len()),
        ("ea", ea.len()),
    ])?;
    let estimator = PenmanMonteith {
        surface: if tall {
            ReferenceSurface::Tall
        } else {
            ReferenceSurface::Short
        },
        lambda: latent_heat_choice(latent_heat),
        ..Default::default()
    };
    let pressure = atmospheric_pressure(elevation);

    let pet = Array1::from_shape_fn(n, |i| {
        estimator.day(tmean[i], wind[i], rn[i], es[i] - ea[i], pressure)
    });
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

/// Penman-Monteith with explicit resistances. `lai_method` codes: 0 half,
/// 1 rational, 2 Zhang, 3 half capped at LAI 4. `profile` switches the
/// aerodynamic resistance from `208 / u2` to the log wind profile over
/// `crop_height`. `latent_heat` sets the λ dividing the energy terms.
#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(
    name = "pm",
    signature = (
        tmean, wind, rn, es, ea, elevation,
        crop_height = 0.12, lai = None, lai_method = 0, stomatal_resistance = 100.,
        surface_resistance = None, co2 = 300., profile = false, latent_heat = None
    )
)]
#[allow(clippy::too_many_arguments)]
pub fn py_pm<'py>(
    py: Python<'py>,
    tmean: PyReadonlyArray1<'py, f64>,
    wind: PyReadonlyArray1<'py, f64>,
    rn: PyReadonlyArray1<'py, f64>,
    es: PyReadonlyArray1<'py, f64>,
    ea: PyReadonlyArray1<'py, f64>,
    elevation: f64,
    crop_height: f64,
    lai: Option<f64>,
    lai_method: u8,
    stomatal_resistance: f64,
    surface_resistance: Option<f64>,
    co2: f64,
    profile: bool,
    latent_heat: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (tmean, wind, rn, es, ea) = (
        tmean.as_array(),
        wind.as_array(),
        rn.as_array(),
        es.as_array(),
        ea.as_array(),
    );
    let n = check_lengths(&[
        ("tmean", tmean.len()),
        ("wind", wind.len()),
        ("rn", rn.len()),
        ("es", es.len()),
        ("ea", ea.len()),
    ])?;
    let aerodynamic = if profile {
        AerodynamicMethod::Profile {
            wind_height: 2.,
            humidity_height: 2.,
        }
    } else {
        AerodynamicMethod::Grass
    };
    let estimator = GeneralPenmanMonteith {
        canopy: Canopy {
            height: crop_height,
            aerodynamic,
            surface_resistance,
            stomatal_resistance,
            lai,
            effective_lai: EffectiveLai::try_from(lai_method)?,
            co2,
            ..Default::default()
        },
        lambda: latent_heat_choice(latent_heat),
        ..Default::default()
    };
    let pressure = atmospheric_pressure(elevation);

    let pet = Array1::from_shape_fn(n, |i| {
        estimator.day(tmean[i], wind[i], rn[i], ea[i], es[i] - ea[i], pressure)
    });
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(
    name = "kimberly_penman",
    signature = (tmean, wind, rn, es, ea, day_of_year, elevation, latent_heat = None)
)]
#[allow(clippy::too_many_arguments)]
pub fn py_kimberly_penman<'py>(
    py: Python<'py>,
    tmean: PyReadonlyArray1<'py, f64>,
    wind: PyReadonlyArray1<'py, f64>,
    rn: PyReadonlyArray1<'py, f64>,
    es: PyReadonlyArray1<'py, f64>,
    ea: PyReadonlyArray1<'py, f64>,
    day_of_year: PyReadonlyArray1<'py, usize>,
    elevation: f64,
    latent_heat: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (tmean, wind, rn, es, ea) = (
        tmean.as_array(),
        wind.as_array(),
        rn.as_array(),
        es.as_array(),
        ea.as_array(),
    );
    let doy = days(&day_of_year)?;
    let n = check_lengths(&[
        ("tmean", tmean.len()),
        ("wind", wind.len()),
        ("rn", rn.len()),
        ("es", es.len()),
        ("ea", ea.len()),
        ("day_of_year", doy.len()),
    ])?;
    let estimator = KimberlyPenman {
        lambda: latent_heat_choice(latent_heat),
        ..Default::default()
    };
    let pressure = atmospheric_pressure(elevation);

    let pet = Array1::from_shape_fn(n, |i| {
        estimator.day(tmean[i], wind[i], rn[i], es[i] - ea[i], pressure, doy[i])
    });
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

/// Thom-Oliver on the FAO-56 grass canopy unless `surface_resistance` is given.
#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(
    name = "thom_oliver",
    signature = (
        tmean, wind, rn, es, ea, elevation,
        aw = 2.6, bw = 0.536, surface_resistance = None, latent_heat = None
    )
)]
#[allow(clippy::too_many_arguments)]
pub fn py_thom_oliver<'py>(
    py: Python<'py>,
    tmean: PyReadonlyArray1<'py, f64>,
    wind: PyReadonlyArray1<'py, f64>,
    rn: PyReadonlyArray1<'py, f64>,
    es: PyReadonlyArray1<'py, f64>,
    ea: PyReadonlyArray1<'py, f64>,
    elevation: f64,
    aw: f64,
    bw: f64,
    surface_resistance: Option<f64>,
    latent_heat: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (tmean, wind, rn, es, ea) = (
        tmean.as_array(),
        wind.as_array(),
        rn.as_array(),
        es.as_array(),
        ea.as_array(),
    );
    let n = check_lengths(&[
        ("tmean", tmean.len()),
        ("wind", wind.len()),
        ("rn", rn.len()),
        ("es", es.len()),
        ("ea", ea.len()),
    ])?;
    let estimator = ThomOliver {
        aw,
        bw,
        canopy: Canopy {
            surface_resistance,
            ..Default::default()
        },
        lambda: latent_heat_choice(latent_heat),
        ..Default::default()
    };
    let pressure = atmospheric_pressure(elevation);

    let pet = Array1::from_shape_fn(n, |i| {
        estimator.day(tmean[i], wind[i], rn[i], es[i] - ea[i], pressure)
    });
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(
    name = "priestley_taylor",
    signature = (tmean, rn, elevation, alpha = 1.26, latent_heat = Some(2.45))
)]
pub fn py_priestley_taylor<'py>(
    py: Python<'py>,
    tmean: PyReadonlyArray1<'py, f64>,
    rn: PyReadonlyArray1<'py, f64>,
    elevation: f64,
    alpha: f64,
    latent_heat: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (tmean, rn) = (tmean.as_array(), rn.as_array());
    let n = check_lengths(&[("tmean", tmean.len()), ("rn", rn.len())])?;
    let estimator = PriestleyTaylor {
        alpha,
        lambda: latent_heat_choice(latent_heat),
        ..Default::default()
    };
    let pressure = atmospheric_pressure(elevation);

    let pet = Array1::from_shape_fn(n, |i| estimator.day(tmean[i], rn[i], pressure));
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(name = "makkink", signature = (tmean, rs, elevation, k = 0.61, latent_heat = Some(2.45)))]
pub fn py_makkink<'py>(
    py: Python<'py>,
    tmean: PyReadonlyArray1<'py, f64>,
    rs: PyReadonlyArray1<'py, f64>,
    elevation: f64,
    k: f64,
    latent_heat: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (tmean, rs) = (tmean.as_array(), rs.as_array());
    let n = check_lengths(&[("tmean", tmean.len()), ("rs", rs.len())])?;
    let estimator = Makkink {
        k,
        lambda: latent_heat_choice(latent_heat),
        ..Default::default()
    };
    let pressure = atmospheric_pressure(elevation);

    let pet = Array1::from_shape_fn(n, |i| estimator.day(tmean[i], rs[i], pressure));
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

/// Without `rh` the humid-climate form is used.
#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(name = "turc", signature = (tmean, rs, rh = None, k = 0.013))]
pub fn py_turc<'py>(
    py: Python<'py>,
    tmean: PyReadonlyArray1<'py, f64>,
    rs: PyReadonlyArray1<'py, f64>,
    rh: Option<PyReadonlyArray1<'py, f64>>,
    k: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (tmean, rs) = (tmean.as_array(), rs.as_array());
    let rh = rh.as_ref().map(|rh| rh.as_array());
    let mut lengths = vec![("tmean", tmean.len()), ("rs", rs.len())];
    if let Some(rh) = &rh {
        lengths.push(("rh", rh.len()));
    }
    let n = check_lengths(&lengths)?;
    let estimator = Turc {
        k,
        ..Default::default()
    };

    let pet = Array1::from_shape_fn(n, |i| {
        estimator.day(tmean[i], rs[i], rh.as_ref().map(|rh| rh[i]))
    });
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

/// Latitude in degrees. `method` is "original" or "mcmahon".
#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(
    name = "hargreaves_samani",
    signature = (tmax, tmin, day_of_year, latitude, method = "original", latent_heat = Some(2.45))
)]
pub fn py_hargreaves_samani<'py>(
    py: Python<'py>,
    tmax: PyReadonlyArray1<'py, f64>,
    tmin: PyReadonlyArray1<'py, f64>,
    day_of_year: PyReadonlyArray1<'py, usize>,
    latitude: f64,
    method: &str,
    latent_heat: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let method = match method {
        "original" => HargreavesMethod::ORIGINAL,
        "mcmahon" => HargreavesMethod::MCMAHON,
        other => {
            return Err(Error::Configuration(format!(
                "unknown Hargreaves-Samani method {other}. Valid options: original, mcmahon"
            ))
            .into())
        }
    };
    let (tmax, tmin) = (tmax.as_array(), tmin.as_array());
    let doy = days(&day_of_year)?;
    let n = check_lengths(&[
        ("tmax", tmax.len()),
        ("tmin", tmin.len()),
        ("day_of_year", doy.len()),
    ])?;
    let estimator = HargreavesSamani {
        method,
        lambda: latent_heat_choice(latent_heat),
        ..Default::default()
    };
    let latitude = latitude.to_radians();

    let pet = (0..n)
        .map(|i| {
            let ra = extraterrestrial_radiation(doy[i], latitude);
            estimator.day((tmax[i] + tmin[i]) / 2., tmax[i], tmin[i], ra)
        })
        .collect::<Result<Array1<f64>, Error>>()?;
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

/// Latitude in degrees. Codes: 0 Schrodter, 1 FAO-24 (Allen and Pruitt),
/// 2 FAO-24 (McMahon); the FAO-24 forms also need `rhmin`, `sunshine` and
/// `wind`.
#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(
    name = "blaney_criddle",
    signature = (tmean, day_of_year, latitude, method = 0, rhmin = None, sunshine = None, wind = None)
)]
#[allow(clippy::too_many_arguments)]
pub fn py_blaney_criddle<'py>(
    py: Python<'py>,
    tmean: PyReadonlyArray1<'py, f64>,
    day_of_year: PyReadonlyArray1<'py, usize>,
    latitude: f64,
    method: u8,
    rhmin: Option<PyReadonlyArray1<'py, f64>>,
    sunshine: Option<PyReadonlyArray1<'py, f64>>,
    wind: Option<PyReadonlyArray1<'py, f64>>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let estimator = BlaneyCriddle {
        method: BlaneyCriddleMethod::try_from(method)?,
        ..Default::default()
    };
    let tmean = tmean.as_array();
    let doy = days(&day_of_year)?;
    let n = check_lengths(&[("tmean", tmean.len()), ("day_of_year", doy.len())])?;
    let latitude = latitude.to_radians();
    let daylight: Vec<f64> = doy.iter().map(|&d| daylight_hours(d, latitude)).collect();

    let pet = match estimator.method {
        BlaneyCriddleMethod::Schrodter { .. } | BlaneyCriddleMethod::Xu { .. } => (0..n)
            .map(|i| estimator.day(tmean[i], daylight[i], None))
            .collect::<Result<Array1<f64>, Error>>()?,
        _ => {
            let rhmin = rhmin.ok_or(Error::MissingInput(Requirement::MinimumHumidity))?;
            let sunshine = sunshine.ok_or(Error::MissingInput(Requirement::Sunshine))?;
            let wind = wind.ok_or(Error::MissingInput(Requirement::Wind))?;
            let (rhmin, sunshine, wind) = (rhmin.as_array(), sunshine.as_array(), wind.as_array());
            check_lengths(&[
                ("tmean", n),
                ("rhmin", rhmin.len()),
                ("sunshine", sunshine.len()),
                ("wind", wind.len()),
            ])?;
            (0..n)
                .map(|i| {
                    let fao24 = Fao24Inputs {
                        rhmin: rhmin[i],
                        sunshine: sunshine[i],
                        wind: wind[i],
                    };
                    estimator.day(tmean[i], daylight[i], Some(fao24))
                })
                .collect::<Result<Array1<f64>, Error>>()?
        }
    };
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

/// `t14` in °C, `ea14` in kPa, `factor` in mm hPa-1.
#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(name = "haude", signature = (t14, ea14, factor = 0.35))]
pub fn py_haude<'py>(
    py: Python<'py>,
    t14: PyReadonlyArray1<'py, f64>,
    ea14: PyReadonlyArray1<'py, f64>,
    factor: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (t14, ea14) = (t14.as_array(), ea14.as_array());
    let n = check_lengths(&[("t14", t14.len()), ("ea14", ea14.len())])?;
    let estimator = Haude {
        factor,
        ..Default::default()
    };
    let pet = Array1::from_shape_fn(n, |i| estimator.day(t14[i], ea14[i]));
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

/// Latitude in degrees. `latent_heat` defaults to the temperature-dependent λ.
#[gen_stub_pyfunction(module = "pet_rs.pet")]
#[pyfunction]
#[pyo3(name = "oudin", signature = (temperature, day_of_year, latitude, latent_heat = None))]
pub fn py_oudin<'py>(
    py: Python<'py>,
    temperature: PyReadonlyArray1<'py, f64>,
    day_of_year: PyReadonlyArray1<'py, usize>,
    latitude: f64,
    latent_heat: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let temperature = temperature.as_array();
    let doy = days(&day_of_year)?;
    let n = check_lengths(&[("temperature", temperature.len()), ("day_of_year", doy.len())])?;
    let estimator = Oudin {
        lambda: latent_heat_choice(latent_heat),
        ..Default::default()
    };
    let latitude = latitude.to_radians();

    let pet = Array1::from_shape_fn(n, |i| {
        estimator.day(temperature[i], extraterrestrial_radiation(doy[i], latitude))
    });
    Ok(clip(pet, estimator.clip_zero).to_pyarray(py))
}

pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, "pet")?;
    m.add_function(wrap_pyfunction!(py_penman_monteith, &m)?)?;
    m.add_function(wrap_pyfunction!(py_pm, &m)?)?;
    m.add_function(wrap_pyfunction!(py_kimberly_penman, &m)?)?;
    m.add_function(wrap_pyfunction!(py_thom_oliver, &m)?)?;
    m.add_function(wrap_pyfunction!(py_priestley_taylor, &m)?)?;
    m.add_function(wrap_pyfunction!(py_makkink, &m)?)?;
    m.add_function(wrap_pyfunction!(py_turc, &m)?)?;
    m.add_function(wrap_pyfunction!(py_hargreaves_samani, &m)?)?;
    m.add_function(wrap_pyfunction!(py_blaney_criddle, &m)?)?;
    m.add_function(wrap_pyfunction!(py_haude, &m)?)?;
    m.add_function(wrap_pyfunction!(py_oudin, &m)?)?;
    Ok(m)
}
