use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Sign::Positive),
            '-' => Some(Sign::Negative),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_char())
    }
}

/// The ionic charge of a formula, written in caret notation (`SO4^2-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Charge {
    pub magnitude: u32,
    pub sign: Sign,
}

impl Charge {
    pub fn new(magnitude: u32, sign: Sign) -> Self {
        Self { magnitude, sign }
    }

    /// The charge as a signed number, e.g. `-2` for `2-`.
    pub fn value(&self) -> i64 {
        match self.sign {
            Sign::Positive => i64::from(self.magnitude),
            Sign::Negative => -i64::from(self.magnitude),
        }
    }
}

impl Display for Charge {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", self.magnitude, self.sign)
    }
}

/// Match `^<digits><sign>` at the end of `formula`, returning the formula
/// before the caret and the charge. A zero magnitude is stripped but gives
/// no charge; one too large for `u32` saturates.
fn caret_suffix(formula: &str) -> Option<(&str, Option<Charge>)> {
    let sign = Sign::from_char(formula.chars().last()?)?;
    let body = &formula[..formula.len() - 1];
    let digits_start = body.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let digits = &body[digits_start..];
    let base = body[..digits_start].strip_suffix('^')?;

    let magnitude = if digits.is_empty() {
        1
    } else {
        digits.parse::<u32>().unwrap_or(u32::MAX)
    };
    if magnitude == 0 {
        debug!("Dropping zero charge from {:?}", formula);
        return Some((base, None));
    }
    Some((base, Some(Charge::new(magnitude, sign))))
}

/// Whether the formula ends in a `+` or `-`, with or without a caret.
pub fn has_dangling_sign(formula: &str) -> bool {
    formula.trim().ends_with(|c: char| c == '+' || c == '-')
}

/// Strip a caret-notation charge (`NH4^+`, `SO4^2-`, `[Fe(CN)6]^3-`) from the
/// end of a formula.
///
/// The formula is trimmed first. A trailing sign without the caret is left
/// in place and only reported as a warning; the rest of the calculation then
/// treats the sign as part of the formula.
pub fn extract_charge(formula: &str) -> (String, Option<Charge>) {
    let formula = formula.trim();

    if let Some((base, charge)) = caret_suffix(formula) {
        return (base.to_string(), charge);
    }

    if has_dangling_sign(formula) {
        warn!("Note: Charge not extracted. Use '^' notation for charge (e.g. NH4^+, SO4^2-).");
    }
    (formula.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_logging;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `extract_charge` and return how many charge notes it logged.
    fn count_notes(formula: &str) -> usize {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            extract_charge(formula);
        });
        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        output.matches("Charge not extracted").count()
    }

    #[test]
    fn test_extract_charge() {
        assert_eq!(
            extract_charge("SO4^2-"),
            ("SO4".to_string(), Some(Charge::new(2, Sign::Negative)))
        );
        assert_eq!(
            extract_charge("NH4^+"),
            ("NH4".to_string(), Some(Charge::new(1, Sign::Positive)))
        );
        assert_eq!(
            extract_charge("  [Fe(CN)6]^3-  "),
            ("[Fe(CN)6]".to_string(), Some(Charge::new(3, Sign::Negative)))
        );
        assert_eq!(
            extract_charge("PO4^12-"),
            ("PO4".to_string(), Some(Charge::new(12, Sign::Negative)))
        );
    }

    #[test]
    fn test_dangling_sign_is_not_a_charge() {
        init_logging("warn");
        assert_eq!(extract_charge("NaCl-"), ("NaCl-".to_string(), None));
        assert_eq!(extract_charge("NH4+ "), ("NH4+".to_string(), None));
        assert!(has_dangling_sign("NaCl-"));
        assert!(has_dangling_sign("SO4^2-"));
        assert!(!has_dangling_sign("NaCl"));
    }

    #[test]
    fn test_dangling_sign_logs_a_note() {
        assert_eq!(count_notes("NaCl-"), 1);
        assert_eq!(count_notes("NH4+"), 1);
        assert_eq!(count_notes("SO4^2-"), 0);
        assert_eq!(count_notes("NH4^+"), 0);
        assert_eq!(count_notes("H2O"), 0);
    }

    #[test]
    fn test_no_charge() {
        assert_eq!(extract_charge("H2O"), ("H2O".to_string(), None));
        assert_eq!(extract_charge(""), ("".to_string(), None));
        assert_eq!(extract_charge("^"), ("^".to_string(), None));
        // The caret must sit directly before the digits and sign.
        assert_eq!(extract_charge("SO4^2 -"), ("SO4^2 -".to_string(), None));
        assert_eq!(extract_charge("SO4^-2"), ("SO4^-2".to_string(), None));
    }

    #[test]
    fn test_edge_magnitudes() {
        assert_eq!(extract_charge("SO4^0-"), ("SO4".to_string(), None));
        assert_eq!(extract_charge("^+"), ("".to_string(), Some(Charge::new(1, Sign::Positive))));
        assert_eq!(
            extract_charge("SO4^99999999999-"),
            ("SO4".to_string(), Some(Charge::new(u32::MAX, Sign::Negative)))
        );
    }

    #[test]
    fn test_charge_display_and_value() {
        let sulfate = Charge::new(2, Sign::Negative);
        assert_eq!(sulfate.to_string(), "2-");
        assert_eq!(sulfate.value(), -2);
        let ammonium = Charge::new(1, Sign::Positive);
        assert_eq!(ammonium.to_string(), "1+");
        assert_eq!(ammonium.value(), 1);
    }
}
