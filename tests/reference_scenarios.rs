use std::f64::consts::FRAC_PI_2;

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use pet_rs::meteo::{
    actual_vapor_pressure_from_extremes, atmospheric_pressure, day_of_year,
    psychrometric_constant, saturation_vapor_pressure, vapor_pressure_slope,
};
use pet_rs::pet::{
    BlaneyCriddle, BlaneyCriddleMethod, HargreavesMethod, HargreavesSamani, Haude, Makkink,
    Oudin, PenmanMonteith, PriestleyTaylor, ReferenceSurface, Turc,
};
use pet_rs::radiation::{
    clear_sky_radiation, extraterrestrial_radiation, incoming_shortwave, net_longwave,
    net_shortwave, RadiationCoefficients,
};
use pet_rs::solar::{daylight_hours, relative_distance, solar_declination, sunset_hour_angle};
use pet_rs::{all_estimators, Estimator, Site, Variable, Weather};

// -- Alice Springs, 20 July 1980 --

fn alice_springs_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1980, 7, 20).unwrap()
}

fn alice_springs() -> (Weather, Site) {
    let weather = Weather::single_day(alice_springs_date())
        .with_values(Variable::Tmax, vec![21.0])
        .and_then(|w| w.with_values(Variable::Tmin, vec![2.0]))
        .and_then(|w| w.with_values(Variable::RhMax, vec![71.0]))
        .and_then(|w| w.with_values(Variable::RhMin, vec![25.0]))
        .and_then(|w| w.with_values(Variable::Sunshine, vec![10.7]))
        .and_then(|w| w.with_values(Variable::Wind, vec![0.5903]))
        .unwrap();
    (weather, Site::from_degrees(-23.7951, 546.0))
}

fn angstrom_023() -> RadiationCoefficients {
    RadiationCoefficients {
        a_s: 0.23,
        ..Default::default()
    }
}

#[test]
fn alice_springs_intermediates() {
    let (_, site) = alice_springs();
    let doy = day_of_year(alice_springs_date());
    assert_eq!(doy, 202);

    let e_max = saturation_vapor_pressure(21.0);
    let e_min = saturation_vapor_pressure(2.0);
    assert_abs_diff_eq!(e_max, 2.4870, epsilon = 1e-4);
    assert_abs_diff_eq!(e_min, 0.7056, epsilon = 1e-4);
    assert_abs_diff_eq!((e_max + e_min) / 2., 1.5963, epsilon = 1e-4);
    assert_abs_diff_eq!(vapor_pressure_slope(11.5), 0.0898, epsilon = 1e-4);

    let pressure = atmospheric_pressure(546.0);
    assert_abs_diff_eq!(pressure, 95.01027, epsilon = 1e-4);
    assert_abs_diff_eq!(psychrometric_constant(pressure, 2.45), 0.0632, epsilon = 1e-4);

    assert_abs_diff_eq!(relative_distance(doy), 0.9688, epsilon = 1e-4);
    let declination = solar_declination(doy);
    assert_abs_diff_eq!(declination, 0.3557, epsilon = 1e-4);
    assert_abs_diff_eq!(sunset_hour_angle(declination, site.latitude), 1.4063, epsilon = 1e-4);

    let n = daylight_hours(doy, site.latitude);
    let ra = extraterrestrial_radiation(doy, site.latitude);
    assert_abs_diff_eq!(n, 10.7431, epsilon = 1e-3);
    assert_abs_diff_eq!(ra, 23.6182, epsilon = 1e-3);

    let rso = clear_sky_radiation(ra, 546.0);
    let rs = incoming_shortwave(10.7, n, ra, 0.23, 0.5);
    assert_abs_diff_eq!(rso, 17.9716, epsilon = 1e-3);
    assert_abs_diff_eq!(rs, 17.1940, epsilon = 1e-3);

    let ea = actual_vapor_pressure_from_extremes(21.0, 2.0, 71.0, 25.0);
    let rnl = net_longwave(rs, rso, 21.0, 2.0, ea).unwrap();
    let rns = net_shortwave(rs, 0.23);
    assert_abs_diff_eq!(rnl, 7.1784, epsilon = 1e-3);
    assert_abs_diff_eq!(rns, 13.2393, epsilon = 1e-3);
    assert_abs_diff_eq!(rns - rnl, 6.0610, epsilon = 1e-3);
}

#[test]
fn alice_springs_reference_et() {
    let (weather, site) = alice_springs();
    let model = PenmanMonteith {
        radiation: angstrom_023(),
        ..Default::default()
    };
    let eto = model.estimate(&weather, &site).unwrap();
    assert_eq!(eto.dates(), &[alice_springs_date()]);
    assert_abs_diff_eq!(eto.values()[0], 2.0775, epsilon = 1e-3);
}

#[test]
fn alice_springs_tall_reference() {
    let (weather, site) = alice_springs();
    let model = PenmanMonteith {
        surface: ReferenceSurface::Tall,
        radiation: angstrom_023(),
        ..Default::default()
    };
    assert_eq!(model.name(), "ASCE-tall");
    let etr = model.estimate(&weather, &site).unwrap();
    assert_abs_diff_eq!(etr.values()[0], 2.6272, epsilon = 1e-3);
}

// -- Empirical methods on the same station day --

#[test]
fn alice_springs_makkink() {
    let (weather, site) = alice_springs();
    let model = Makkink {
        radiation: angstrom_023(),
        ..Default::default()
    };
    let pet = model.estimate(&weather, &site).unwrap();
    assert_abs_diff_eq!(pet.values()[0], 2.3928, epsilon = 1e-3);
}

#[test]
fn alice_springs_blaney_criddle_fao24() {
    let (weather, site) = alice_springs();
    let model = BlaneyCriddle {
        method: BlaneyCriddleMethod::try_from(2).unwrap(),
        ..Default::default()
    };
    let pet = model.estimate(&weather, &site).unwrap();
    assert_abs_diff_eq!(pet.values()[0], 3.1426, epsilon = 0.05);
}

#[test]
fn alice_springs_turc() {
    let (weather, site) = alice_springs();
    let model = Turc {
        radiation: angstrom_023(),
        ..Default::default()
    };
    let pet = model.estimate(&weather, &site).unwrap();
    assert_abs_diff_eq!(pet.values()[0], 2.6727, epsilon = 1e-3);
}

#[test]
fn alice_springs_hargreaves_samani() {
    let (weather, site) = alice_springs();
    let model = HargreavesSamani {
        method: HargreavesMethod::MCMAHON,
        ..Default::default()
    };
    let pet = model.estimate(&weather, &site).unwrap();
    assert_abs_diff_eq!(pet.values()[0], 4.1129, epsilon = 1e-3);

    let original = HargreavesSamani::default()
        .estimate(&weather, &site)
        .unwrap();
    assert_abs_diff_eq!(original.values()[0], 2.8317, epsilon = 1e-3);
}

#[test]
fn alice_springs_priestley_taylor_with_observed_rn() {
    let (weather, site) = alice_springs();
    let weather = weather.with_values(Variable::Rn, vec![8.6401]).unwrap();
    let pet = PriestleyTaylor::default()
        .estimate(&weather, &site)
        .unwrap();
    assert_abs_diff_eq!(pet.values()[0], 2.6083, epsilon = 1e-3);
}

#[test]
fn alice_springs_oudin() {
    let (weather, site) = alice_springs();
    let pet = Oudin::default().estimate(&weather, &site).unwrap();
    assert_abs_diff_eq!(pet.values()[0], 1.5753, epsilon = 1e-3);
}

// -- Single-variable methods --

#[test]
fn schrodter_blaney_criddle_at_fifty_north() {
    let weather = Weather::single_day(NaiveDate::from_ymd_opt(1980, 6, 21).unwrap())
        .with_values(Variable::Tmean, vec![17.3])
        .unwrap();
    let model = BlaneyCriddle {
        method: BlaneyCriddleMethod::try_from(0).unwrap(),
        ..Default::default()
    };
    let pet = model
        .estimate(&weather, &Site::from_degrees(50.0, 0.0))
        .unwrap();
    assert_abs_diff_eq!(pet.values()[0], 3.9, epsilon = 0.05);
}

#[test]
fn haude_from_afternoon_vapour_pressure() {
    let weather = Weather::single_day(alice_springs_date())
        .with_values(Variable::Tmax, vec![21.5])
        .and_then(|w| w.with_values(Variable::Ea, vec![1.19]))
        .unwrap();
    let model = Haude {
        factor: 0.26,
        ..Default::default()
    };
    let pet = model
        .estimate(&weather, &Site::from_degrees(50.0, 0.0))
        .unwrap();
    assert_abs_diff_eq!(pet.values()[0], 3.6, epsilon = 0.05);

    let default = Haude::default()
        .estimate(&weather, &Site::from_degrees(50.0, 0.0))
        .unwrap();
    assert!(default.values()[0] > pet.values()[0]);
}

// -- Polar latitudes --

#[test]
fn polar_day_and_night() {
    assert_abs_diff_eq!(daylight_hours(172, FRAC_PI_2), 24.0, epsilon = 1e-9);
    assert_abs_diff_eq!(daylight_hours(355, FRAC_PI_2), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(daylight_hours(172, -FRAC_PI_2), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(daylight_hours(355, -FRAC_PI_2), 24.0, epsilon = 1e-9);

    for doy in [1, 80, 172, 266, 355] {
        for latitude in [FRAC_PI_2, -FRAC_PI_2] {
            let ra = extraterrestrial_radiation(doy, latitude);
            assert!(ra.is_finite());
            assert!(ra > -1e-9);
        }
    }
}

#[test]
fn polar_night_temperature_methods_stay_finite() {
    let dates: Vec<NaiveDate> = (18..=22)
        .map(|d| NaiveDate::from_ymd_opt(2001, 12, d).unwrap())
        .collect();
    let weather = Weather::new(dates)
        .and_then(|w| w.with_values(Variable::Tmax, vec![-20.0, -22.0, -18.0, -25.0, -19.0]))
        .and_then(|w| w.with_values(Variable::Tmin, vec![-30.0, -31.0, -28.0, -35.0, -29.0]))
        .unwrap();
    let site = Site::from_degrees(90.0, 0.0);
    for pet in [
        Oudin::default().estimate(&weather, &site).unwrap(),
        HargreavesSamani::default().estimate(&weather, &site).unwrap(),
        BlaneyCriddle::default().estimate(&weather, &site).unwrap(),
    ] {
        assert_eq!(pet.len(), 5);
        assert!(pet.values().iter().all(|v| v.is_finite() && *v >= 0.));
    }
}

#[test]
fn polar_night_radiation_methods_run_without_sun() {
    // Tromsø: the sun stays below the horizon, so Ra and Rso are both 0
    let dates: Vec<NaiveDate> = (18..=22)
        .map(|d| NaiveDate::from_ymd_opt(2001, 12, d).unwrap())
        .collect();
    let weather = Weather::new(dates)
        .and_then(|w| w.with_values(Variable::Tmax, vec![-1.5, 0.8, -3.2, -4.0, 1.1]))
        .and_then(|w| w.with_values(Variable::Tmin, vec![-6.0, -4.1, -8.7, -9.5, -3.3]))
        .and_then(|w| w.with_values(Variable::RhMax, vec![92.0, 95.0, 88.0, 90.0, 97.0]))
        .and_then(|w| w.with_values(Variable::RhMin, vec![78.0, 84.0, 70.0, 75.0, 86.0]))
        .and_then(|w| w.with_values(Variable::Wind, vec![3.1, 5.4, 2.2, 1.8, 6.0]))
        .and_then(|w| w.with_values(Variable::Sunshine, vec![0.0; 5]))
        .unwrap();
    let site = Site::from_degrees(69.65, 10.0);
    assert_eq!(extraterrestrial_radiation(354, site.latitude), 0.0);

    for estimator in all_estimators() {
        let pet = estimator
            .estimate(&weather, &site)
            .unwrap_or_else(|e| panic!("{}: {e}", estimator.name()));
        assert_eq!(pet.len(), 5, "{}", estimator.name());
        assert!(
            pet.values().iter().all(|v| v.is_finite() && *v >= 0.),
            "{}",
            estimator.name()
        );
    }
}

// -- Multi-day records --

#[test]
fn estimates_follow_the_weather_index() {
    let dates: Vec<NaiveDate> = (18..=22)
        .map(|d| NaiveDate::from_ymd_opt(1980, 7, d).unwrap())
        .collect();
    let weather = Weather::new(dates.clone())
        .and_then(|w| w.with_values(Variable::Tmax, vec![22.5, 19.8, 21.0, 20.4, 23.1]))
        .and_then(|w| w.with_values(Variable::Tmin, vec![3.1, 1.2, 2.0, 0.4, 4.0]))
        .and_then(|w| w.with_values(Variable::RhMax, vec![68.0, 75.0, 71.0, 80.0, 66.0]))
        .and_then(|w| w.with_values(Variable::RhMin, vec![22.0, 30.0, 25.0, 28.0, 20.0]))
        .and_then(|w| w.with_values(Variable::Sunshine, vec![10.2, 9.1, 10.7, 10.9, 10.5]))
        .and_then(|w| w.with_values(Variable::Wind, vec![1.2, 2.3, 0.5903, 0.8, 1.6]))
        .unwrap();
    let site = Site::from_degrees(-23.7951, 546.0);

    for estimator in all_estimators() {
        let pet = estimator.estimate(&weather, &site).unwrap();
        assert_eq!(pet.dates(), dates.as_slice(), "{}", estimator.name());
        let again = estimator.estimate(&weather, &site).unwrap();
        assert_eq!(pet.values(), again.values(), "{}", estimator.name());
    }

    // a single day of the record reproduces the stand-alone estimate
    let model = PenmanMonteith {
        radiation: angstrom_023(),
        ..Default::default()
    };
    let series = model.estimate(&weather, &site).unwrap();
    let (day, _) = alice_springs();
    let single = model.estimate(&day, &site).unwrap();
    assert_eq!(
        series.get(alice_springs_date()).unwrap().to_bits(),
        single.values()[0].to_bits()
    );
}
