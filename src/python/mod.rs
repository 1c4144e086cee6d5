mod meteo;
mod pet;

use numpy::PyReadonlyArray1;
use pyo3::prelude::*;

use crate::model::Error;

/// Register a submodule in sys.modules so it can be imported.
fn register_submodule(
    py: Python<'_>,
    parent: &Bound<'_, PyModule>,
    child: &Bound<'_, PyModule>,
    parent_name: &str,
) -> PyResult<()> {
    parent.add_submodule(child)?;
    let child_name = child.name()?;
    let full_name = format!("{}.{}", parent_name, child_name);
    py.import("sys")?
        .getattr("modules")?
        .set_item(full_name, child)?;
    Ok(())
}

/// All arrays must have the length of the first one.
fn check_lengths(arrays: &[(&str, usize)]) -> Result<usize, Error> {
    let (first_name, n) = arrays.first().copied().unwrap_or(("", 0));
    match arrays.iter().find(|(_, len)| *len != n) {
        Some((name, len)) => Err(Error::InputAlignment(format!(
            "{name} has {len} values but {first_name} has {n}"
        ))),
        None => Ok(n),
    }
}

/// Days of the year, each within 1 to 366.
fn days(day_of_year: &PyReadonlyArray1<'_, usize>) -> Result<Vec<u32>, Error> {
    day_of_year.as_array().iter().map(|&d| day_number(d)).collect()
}

fn day_number(d: usize) -> Result<u32, Error> {
    u32::try_from(d)
        .ok()
        .filter(|d| (1..=366).contains(d))
        .ok_or_else(|| Error::Domain(format!("day of year must be 1-366 (got {d})")))
}

#[pymodule]
fn pet_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    register_submodule(py, m, &meteo::make_module(py)?, "pet_rs")?;
    register_submodule(py, m, &pet::make_module(py)?, "pet_rs")?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_must_match() {
        assert_eq!(check_lengths(&[("tmean", 3), ("rs", 3)]).unwrap(), 3);
        assert!(matches!(
            check_lengths(&[("tmean", 3), ("rs", 2)]),
            Err(Error::InputAlignment(_))
        ));
    }

    #[test]
    fn day_numbers_outside_the_year_are_rejected() {
        assert_eq!(day_number(1).unwrap(), 1);
        assert_eq!(day_number(366).unwrap(), 366);
        assert!(matches!(day_number(0), Err(Error::Domain(_))));
        assert!(matches!(day_number(367), Err(Error::Domain(_))));
        assert!(matches!(day_number(1 << 33), Err(Error::Domain(_))));
    }
}
