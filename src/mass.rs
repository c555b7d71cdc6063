use crate::{extract_charge, parse_formula, Charge, ElementCounts, ElementMassTable};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MassError {
    #[error("Unknown element: {0}")]
    UnknownElement(String),
}

/// The molar mass of a formula in g/mol, with its charge if it had one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MolarMass {
    pub mass: f64,
    pub charge: Option<Charge>,
}

impl Display for MolarMass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:.3} g/mol", self.mass)?;
        if let Some(charge) = self.charge {
            write!(f, " with charge {}", charge)?;
        }
        Ok(())
    }
}

/// Sum the atomic masses of the counted elements.
///
/// Fails on the first element (in formula order) that has no entry in the
/// table. The charge is passed through untouched.
pub fn calculate_mass(
    counts: &ElementCounts,
    charge: Option<Charge>,
    table: &ElementMassTable,
) -> Result<MolarMass, MassError> {
    let mut mass = 0.0;
    for (symbol, count) in counts.iter() {
        let atomic_mass = table
            .get(symbol)
            .ok_or_else(|| MassError::UnknownElement(symbol.to_string()))?;
        mass += atomic_mass * count as f64;
    }
    Ok(MolarMass { mass, charge })
}

/// Compute the molar mass of a formula such as `K4[Fe(CN)6]`,
/// `CuSO4·5H2O` or `SO4^2-`.
#[instrument(level = "debug", skip(table))]
pub fn compute_molar_mass(formula: &str, table: &ElementMassTable) -> Result<MolarMass, MassError> {
    let (base, charge) = extract_charge(formula);
    let counts = parse_formula(&base);
    let result = calculate_mass(&counts, charge, table)?;
    debug!("{} = {}", formula, result);
    Ok(result)
}
