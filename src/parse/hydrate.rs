use super::{parse_group, tokenize};
use crate::ElementCounts;
use tracing::debug;

/// Glyphs accepted between the parts of a hydrate or adduct, e.g. `CuSO4·5H2O`.
const SEPARATORS: [char; 5] = ['·', '•', '∙', '⋅', '*'];

/// Rewrite `[]` and `{}` as `()`, every separator glyph as `.`, and drop all
/// whitespace.
pub fn normalize_formula(formula: &str) -> String {
    formula
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '[' | '{' => '(',
            ']' | '}' => ')',
            c if SEPARATORS.contains(&c) => '.',
            c => c,
        })
        .collect()
}

/// Split a leading multiplier off a dot-separated part.
///
/// The digits only count as a multiplier when they are directly followed by
/// an uppercase letter or `(`, so `5H2O` gives `(5, "H2O")` while `H2O` and
/// `5` are returned unchanged with a multiplier of 1. A multiplier too large
/// to represent saturates.
pub fn leading_multiplier(part: &str) -> (u64, &str) {
    let digits_end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    if digits_end == 0 {
        return (1, part);
    }

    let (digits, rest) = part.split_at(digits_end);
    match rest.chars().next() {
        Some(c) if c.is_ascii_uppercase() || c == '(' => {
            (digits.parse().unwrap_or(u64::MAX), rest)
        }
        _ => (1, part),
    }
}

/// Count the elements of a formula without a charge suffix.
///
/// Each dot-separated part is parsed on its own, scaled by its leading
/// multiplier and summed into the result. Malformed input never fails; it
/// just contributes fewer (or no) elements.
pub fn parse_formula(formula: &str) -> ElementCounts {
    let normalized = normalize_formula(formula);
    let mut total = ElementCounts::new();

    for part in normalized.split('.') {
        let (multiplier, subformula) = leading_multiplier(part);
        let tokens = tokenize(subformula);
        let (counts, consumed) = parse_group(&tokens);
        if consumed < tokens.len() {
            debug!(
                "Stopped parsing {:?} after {} of {} tokens",
                subformula,
                consumed,
                tokens.len()
            );
        }
        total.merge(&counts.scaled(multiplier));
    }

    debug!("Parsed {:?} as {}", formula, total);
    total
}
