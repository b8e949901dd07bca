//! Identity parsing for composite `user@databaseAlias` logins.
//!
//! An identity without the composite shape is not an error: it means this
//! authentication mechanism does not apply, and the caller should abstain
//! so other mechanisms in the chain can run.

/// A composite identity split into its username and database alias.
///
/// Exists only transiently during one authentication attempt. The alias is
/// never empty; inputs that would produce one are not parsed at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIdentity {
    pub username: String,
    pub alias: String,
}

/// Split a raw identity string into `(username, alias)` on the first `@`.
///
/// Rules:
/// - `"alice@sales"` -> username `alice`, alias `sales`
/// - `"a@b@c"` -> username `a`, alias `b@c` (first `@` is the delimiter)
/// - `"@sales"` -> empty username, alias `sales` (no character validation)
/// - `"alice"` -> `None` (no `@`, mechanism does not apply)
/// - `"alice@"` -> `None` (an empty alias is never produced)
pub fn parse_identity(identity: &str) -> Option<ParsedIdentity> {
    let (username, alias) = identity.split_once('@')?;
    if alias.is_empty() {
        return None;
    }
    Some(ParsedIdentity {
        username: username.to_string(),
        alias: alias.to_string(),
    })
}
