use super::Token;
use crate::ElementCounts;
use tracing::trace;

/// Count the elements in a token sequence, descending into bracket groups.
///
/// Returns the counts together with the number of tokens consumed. A nested
/// call stops right after the `Close` that ends its group, so the caller
/// resumes exactly where the callee stopped. At the top level the whole
/// sequence is normally consumed.
///
/// Malformed input is tolerated rather than rejected:
/// * a stray `Close` at the top level ends parsing early, dropping whatever
///   follows it;
/// * an `Open` that is never closed consumes everything to the end;
/// * integers that follow neither an element nor a group are ignored.
pub fn parse_group(tokens: &[Token<'_>]) -> (ElementCounts, usize) {
    let mut fragments = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            Token::Open => {
                let (inner, consumed) = parse_group(&tokens[i + 1..]);
                i += consumed + 1;
                let mut multiplier = 1;
                if let Some(Token::Integer(n)) = tokens.get(i) {
                    multiplier = *n;
                    i += 1;
                }
                fragments.push(inner.scaled(multiplier));
            }
            Token::Close => {
                return (ElementCounts::merge_all(fragments), i + 1);
            }
            Token::Element(symbol) => {
                let mut count = 1;
                if let Some(Token::Integer(n)) = tokens.get(i + 1) {
                    count = *n;
                    i += 1;
                }
                fragments.push(ElementCounts::single(symbol, count));
                i += 1;
            }
            Token::Integer(n) => {
                trace!("Ignoring dangling number {}", n);
                i += 1;
            }
        }
    }

    (ElementCounts::merge_all(fragments), i)
}
