//! Molar masses of chemical formulas.
//!
//! ```
//! use molar::{compute_molar_mass, ElementMassTable};
//!
//! let table = ElementMassTable::standard();
//! let result = compute_molar_mass("CuSO4·5H2O", table).unwrap();
//! assert_eq!(format!("{:.3}", result.mass), "249.677");
//! ```

use tracing::metadata::LevelFilter;

mod counts;
pub use counts::*;

mod parse;
pub use parse::*;

mod charge;
pub use charge::*;

mod table;
pub use table::*;

mod mass;
pub use mass::*;

/// Install a `tracing` subscriber printing to stderr at the given level
/// (`"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"` or `"off"`).
///
/// Unknown levels fall back to `info`. Calling this again after a subscriber
/// is installed does nothing.
pub fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
