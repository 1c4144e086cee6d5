//! Potential and reference evapotranspiration estimators, all in mm day-1.

pub mod blaney_criddle;
pub mod general_penman_monteith;
pub mod hargreaves;
pub mod haude;
pub(crate) mod inputs;
pub mod kimberly_penman;
pub mod makkink;
pub mod oudin;
pub mod penman;
pub mod penman_monteith;
pub mod priestley_taylor;
pub mod thom_oliver;
pub mod turc;

pub use blaney_criddle::{BlaneyCriddle, BlaneyCriddleMethod, Fao24Inputs};
pub use general_penman_monteith::GeneralPenmanMonteith;
pub use hargreaves::{HargreavesMethod, HargreavesSamani};
pub use haude::Haude;
pub use kimberly_penman::KimberlyPenman;
pub use makkink::Makkink;
pub use oudin::Oudin;
pub use penman::Penman;
pub use penman_monteith::{PenmanMonteith, ReferenceSurface};
pub use priestley_taylor::PriestleyTaylor;
pub use thom_oliver::ThomOliver;
pub use turc::Turc;

use crate::model::{DailySeries, Error, Requirement, Site, Weather};

/// A daily PET model.
///
/// Implementations hold only their coefficients, so estimating twice from
/// the same inputs gives identical output.
pub trait Estimator {
    fn name(&self) -> &'static str;

    /// Inputs the model cannot run without. Some may still be derived from
    /// others (net radiation from sunshine, for instance), in which case
    /// the derivation can report further missing inputs.
    fn requires(&self) -> &'static [Requirement];

    fn estimate(&self, weather: &Weather, site: &Site) -> Result<DailySeries, Error>;

    fn check_inputs(&self, weather: &Weather) -> Result<(), Error> {
        match self
            .requires()
            .iter()
            .find(|r| !r.is_satisfied_by(weather))
        {
            Some(&missing) => Err(Error::MissingInput(missing)),
            None => Ok(()),
        }
    }
}

/// Every estimator with its published default coefficients.
pub fn all_estimators() -> Vec<Box<dyn Estimator>> {
    vec![
        Box::new(PenmanMonteith::default()),
        Box::new(GeneralPenmanMonteith::default()),
        Box::new(Penman::default()),
        Box::new(KimberlyPenman::default()),
        Box::new(ThomOliver::default()),
        Box::new(PriestleyTaylor::default()),
        Box::new(Makkink::default()),
        Box::new(Turc::default()),
        Box::new(HargreavesSamani::default()),
        Box::new(BlaneyCriddle::default()),
        Box::new(Haude::default()),
        Box::new(Oudin::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variable;
    use chrono::NaiveDate;

    fn alice_springs() -> (Weather, Site) {
        let date = NaiveDate::from_ymd_opt(1980, 7, 20).unwrap();
        let weather = Weather::single_day(date)
            .with_values(Variable::Tmax, vec![21.0])
            .and_then(|w| w.with_values(Variable::Tmin, vec![2.0]))
            .and_then(|w| w.with_values(Variable::RhMax, vec![71.0]))
            .and_then(|w| w.with_values(Variable::RhMin, vec![25.0]))
            .and_then(|w| w.with_values(Variable::Sunshine, vec![10.7]))
            .and_then(|w| w.with_values(Variable::Wind, vec![0.5903]))
            .unwrap();
        (weather, Site::from_degrees(-23.7951, 546.0))
    }

    #[test]
    fn every_estimator_runs_on_a_full_record() {
        let (weather, site) = alice_springs();
        for estimator in all_estimators() {
            let pet = estimator.estimate(&weather, &site).unwrap();
            assert_eq!(pet.len(), 1, "{}", estimator.name());
            assert!(pet.values()[0].is_finite(), "{}", estimator.name());
            assert!(pet.values()[0] >= 0., "{}", estimator.name());
        }
    }

    #[test]
    fn estimators_are_idempotent() {
        let (weather, site) = alice_springs();
        for estimator in all_estimators() {
            let first = estimator.estimate(&weather, &site).unwrap();
            let second = estimator.estimate(&weather, &site).unwrap();
            assert_eq!(
                first.values()[0].to_bits(),
                second.values()[0].to_bits(),
                "{}",
                estimator.name()
            );
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = all_estimators().iter().map(|e| e.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all_estimators().len());
    }

    #[test]
    fn missing_inputs_are_reported_before_computing() {
        let date = NaiveDate::from_ymd_opt(1980, 7, 20).unwrap();
        let weather = Weather::single_day(date)
            .with_values(Variable::Tmean, vec![11.5])
            .unwrap();
        let site = Site::from_degrees(-23.7951, 546.0);
        let err = PenmanMonteith::default()
            .estimate(&weather, &site)
            .unwrap_err();
        assert_eq!(err, Error::MissingInput(Requirement::Wind));
    }
}
