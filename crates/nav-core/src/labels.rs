//! Human-readable labels derived from machine names.

use crate::errors::CoreError;

/// Turn a machine name into a heading: split on runs of `_` or `-`, upper-case
/// the first character of each token, join with a space.
///
/// `minor_changes` becomes `Minor Changes`.
#[must_use]
pub fn header_label(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|token| !token.is_empty())
        .map(|token| {
            let mut chars = token.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the short version tag (`v9`, `v10`) from a knowledge-base version
/// string such as `"ATT&CK v9"` or `"v10.1"`.
///
/// # Errors
///
/// Returns `CoreError::Validation` when no `v<digits>` token is present.
pub fn version_label(version: &str) -> Result<String, CoreError> {
    let chars: Vec<char> = version.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if !c.eq_ignore_ascii_case(&'v') {
            continue;
        }
        let digits: String = chars[i + 1..]
            .iter()
            .take_while(|d| d.is_ascii_digit())
            .collect();
        if !digits.is_empty() {
            return Ok(format!("v{digits}"));
        }
    }
    Err(CoreError::Validation(format!(
        "no version tag in '{version}'"
    )))
}
