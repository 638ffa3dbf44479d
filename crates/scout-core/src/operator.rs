//! Operator (scout) name conventions.

use std::sync::LazyLock;

use regex::Regex;

/// First name, one space, last initial: "Jane D".
static OPERATOR_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Lu}[^ ]* \p{Lu}$").unwrap());

/// Checks an operator name against the "First-Name Space Last-Initial" format.
///
/// Surrounding whitespace is ignored. This is advisory: the ledger and the
/// encoder accept any operator string.
pub fn is_valid_operator_name(name: &str) -> bool {
    OPERATOR_NAME_RE.is_match(name.trim())
}
