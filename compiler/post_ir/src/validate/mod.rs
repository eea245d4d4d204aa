//! Scope key validation.
//!
//! Every key of a [`Scope`](crate::Scope) is classified before any state is
//! built: a nonzero integer token names a numbered instruction, an
//! identifier token (`[A-Za-z_$][A-Za-z0-9_$]*`) names a subroutine. Keys
//! that are neither reject the whole program.

/// Parse an instruction index token.
///
/// Returns `None` unless the token is a nonzero integer that fits in `i64`.
pub fn parse_index(token: &str) -> Option<i64> {
    match token.parse::<i64>() {
        Ok(0) | Err(_) => None,
        Ok(index) => Some(index),
    }
}

/// Returns `true` if `token` is a legal instruction index.
#[inline]
pub fn is_valid_index(token: &str) -> bool {
    parse_index(token).is_some()
}

/// Returns `true` if `token` is a legal subroutine name.
pub fn is_valid_subroutine_name(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_continue),
        _ => false,
    }
}

/// Returns `true` if `token` reads as a number, even one that is not a
/// legal index (`0`, `1.5`, `-0`, out-of-range integers).
///
/// Used to tell a bad index apart from a bad subroutine name when reporting.
pub fn looks_numeric(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
        && token.parse::<f64>().is_ok()
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests;
