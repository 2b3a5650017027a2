use super::Request;

/// Determine which type name a request targets.
///
/// Pure function of the request's addressing information: the first
/// positional route param, falling back to the `type` query parameter. The
/// returned name is raw — not canonicalized, not checked against the
/// registry. The dispatcher upgrades an unknown or missing name into a
/// `TypeNotFound` failure.
#[must_use]
pub fn resolve_type(request: &Request) -> Option<&str> {
    request
        .param(0)
        .or_else(|| request.query.get("type").map(String::as_str))
}
