use csv::{ReaderBuilder, StringRecord, Trim};
use lazy_static::lazy_static;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::*;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read atomic mass table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Record on line {0} needs a symbol and a mass")]
    MalformedRecord(u64),
    #[error("Invalid atomic mass {mass:?} for element {symbol}")]
    InvalidMass { symbol: String, mass: String },
    #[error("Element {0} appears more than once in the atomic mass table")]
    DuplicateSymbol(String),
}

lazy_static! {
    /// The conventional atomic weights of all 118 elements, parsed on first use.
    static ref STANDARD_TABLE: ElementMassTable = {
        let csv_data = include_str!("atomic-masses.csv");
        ElementMassTable::from_csv_reader(csv_data.as_bytes())
            .expect("Embedded atomic mass table is malformed")
    };
}

/// Atomic mass (g/mol) of each element symbol.
///
/// A table is built once and only read afterwards, so a single table can be
/// shared by any number of calculations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementMassTable {
    masses: BTreeMap<String, f64>,
}

impl ElementMassTable {
    /// The table embedded in the crate.
    pub fn standard() -> &'static ElementMassTable {
        &STANDARD_TABLE
    }

    /// Read a table from CSV with a `symbol,mass` header row.
    ///
    /// Every mass must be a positive, finite number and every symbol must be
    /// unique.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut masses = BTreeMap::new();
        for result in rdr.records() {
            let record: StringRecord = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let (symbol, mass) = match (record.get(0), record.get(1)) {
                (Some(symbol), Some(mass)) if !symbol.is_empty() => (symbol, mass),
                _ => return Err(TableError::MalformedRecord(line)),
            };

            let value = match mass.parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => value,
                _ => {
                    return Err(TableError::InvalidMass {
                        symbol: symbol.to_string(),
                        mass: mass.to_string(),
                    })
                }
            };

            if masses.insert(symbol.to_string(), value).is_some() {
                return Err(TableError::DuplicateSymbol(symbol.to_string()));
            }
        }

        debug!("Loaded atomic masses for {} elements", masses.len());
        Ok(Self { masses })
    }

    /// Read a table from a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        info!("Loading atomic mass table from {}", path.display());
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::from_csv_reader(file)
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.masses.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.masses.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.masses.iter().map(|(symbol, mass)| (symbol.as_str(), *mass))
    }
}

/// Builds a table without validation; later entries replace earlier ones.
impl<S: Into<String>> FromIterator<(S, f64)> for ElementMassTable {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            masses: iter
                .into_iter()
                .map(|(symbol, mass)| (symbol.into(), mass))
                .collect(),
        }
    }
}
