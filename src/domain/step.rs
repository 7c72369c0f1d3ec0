//! Combination steps: the flat log entries a search service records.

use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// Separator between the two operand names in a raw step line.
pub const OPERAND_SEPARATOR: &str = " + ";

/// Separator between the combination and its result in a raw step line.
pub const RESULT_SEPARATOR: &str = " = ";

/// One recorded binary combination: `left + right = result`.
///
/// Element names are opaque strings and case is preserved; icon lookup
/// applies its own normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub left: String,
    pub right: String,
    pub result: String,
}

impl Step {
    /// Parse one raw step line of the form `"<left> + <right> = <result>"`.
    ///
    /// The line must contain exactly one `" = "` and, on its combination
    /// side, exactly one `" + "`. Surrounding whitespace on the three names
    /// is trimmed; a name that is empty after trimming is rejected.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let (combination, result) = split_once_exact(raw, raw, RESULT_SEPARATOR)?;
        let (left, right) = split_once_exact(raw, combination, OPERAND_SEPARATOR)?;

        Ok(Self {
            left: required_name(raw, left, "left")?,
            right: required_name(raw, right, "right")?,
            result: required_name(raw, result, "result")?,
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.left, OPERAND_SEPARATOR, self.right, RESULT_SEPARATOR, self.result
        )
    }
}

/// Parse an ordered sequence of raw step lines, preserving order.
///
/// The index of a step in the returned vector is the discovery order of the
/// search that produced the log, and the sole disambiguation signal when
/// result names repeat.
pub fn parse_sequence<'a, I>(lines: I) -> DomainResult<Vec<Step>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().map(Step::parse).collect()
}

/// Split `haystack` on the single occurrence of `separator`.
///
/// `raw` is the full original line, carried into the error so the caller
/// sees the line as it was given, not a fragment of it.
fn split_once_exact<'a>(
    raw: &str,
    haystack: &'a str,
    separator: &'static str,
) -> DomainResult<(&'a str, &'a str)> {
    let mut parts = haystack.split(separator);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => Err(DomainError::MalformedStep {
            raw: raw.to_string(),
            separator,
        }),
    }
}

fn required_name(raw: &str, token: &str, role: &'static str) -> DomainResult<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyToken {
            raw: raw.to_string(),
            role,
        });
    }
    Ok(trimmed.to_string())
}
