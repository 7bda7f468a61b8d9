//! Location resolution: turns raw caller/detected location fields into one
//! canonical [`LocationSignature`] used by every query.
//!
//! Resolution never fails: every input combination degrades to a valid
//! (possibly empty) signature. An empty signature means "no geographic
//! restriction".

pub mod tables;

use crate::types::{LocationMode, LocationSignature, PartialLocation};

/// Resolves raw location inputs into canonical signatures and builds the
/// upstream `location` parameter string.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    /// Hint state-only signatures with the state's major city when building
    /// the upstream location string. Never alters the canonical signature.
    state_city_hint: bool,
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self {
            state_city_hint: true,
        }
    }
}

impl LocationResolver {
    pub fn new(state_city_hint: bool) -> Self {
        Self { state_city_hint }
    }

    /// Resolve manual and detected location into one canonical signature.
    ///
    /// - `Global` returns an all-empty signature, overriding everything
    ///   else, including a previously detected location.
    /// - `Manual` uses the caller-supplied fields verbatim; a country name
    ///   is resolved through the country table when no valid 2-letter code
    ///   was supplied. Unresolvable names leave `country_code` empty and
    ///   the search proceeds without geo bias.
    /// - `Normal` uses the detected location verbatim; failed detection
    ///   behaves like `Global`.
    pub fn resolve(
        &self,
        manual: &PartialLocation,
        detected: Option<&PartialLocation>,
        mode: LocationMode,
    ) -> LocationSignature {
        match mode {
            LocationMode::Global => LocationSignature::default(),
            LocationMode::Manual => self.signature_from(manual),
            LocationMode::Normal => match detected {
                Some(loc) if !loc.is_empty() => self.signature_from(loc),
                _ => {
                    tracing::debug!("no detected location; resolving as global");
                    LocationSignature::default()
                }
            },
        }
    }

    fn signature_from(&self, loc: &PartialLocation) -> LocationSignature {
        let country = loc.country.as_deref().unwrap_or("").trim().to_string();
        let state = loc.state.as_deref().unwrap_or("").trim().to_string();
        let city = loc.city.as_deref().unwrap_or("").trim().to_string();
        let country_code = resolve_country_code(loc.country_code.as_deref(), &country);

        let canonical = match loc.free_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => normalize_commas(text),
            _ => join_parts(&city, &state, &country),
        };

        LocationSignature {
            country,
            country_code,
            state,
            city,
            canonical,
        }
    }

    /// Build the upstream `location` parameter for a signature.
    ///
    /// When the signature has a state but no city and the state has a
    /// well-known major city on file, the hint narrows the location string
    /// to that city. This changes the geographic scope of the search, so
    /// every application is logged.
    pub fn upstream_location(&self, signature: &LocationSignature) -> Option<String> {
        if signature.is_empty() {
            return None;
        }

        if self.state_city_hint && signature.city.is_empty() && !signature.state.is_empty() {
            if let Some(city) = tables::major_city_for_state(&signature.state) {
                let hinted = join_parts(city, &signature.state, &signature.country);
                tracing::info!(
                    state = %signature.state,
                    hinted_city = city,
                    location = %hinted,
                    "state-only location hinted with major city for upstream call"
                );
                return Some(hinted);
            }
        }

        if signature.canonical.is_empty() {
            None
        } else {
            Some(signature.canonical.clone())
        }
    }
}

/// Normalize a free-text location: commas keep no surrounding whitespace.
fn normalize_commas(text: &str) -> String {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Join `[city, state, country]`, skipping empty parts and deduplicating a
/// trailing part equal to the country.
fn join_parts(city: &str, state: &str, country: &str) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(3);
    for part in [city, state, country] {
        if part.is_empty() {
            continue;
        }
        parts.push(part);
    }
    // "Singapore, Singapore" style duplicates collapse to one part.
    while parts.len() > 1
        && parts[parts.len() - 2].eq_ignore_ascii_case(country)
        && parts[parts.len() - 1].eq_ignore_ascii_case(country)
    {
        parts.pop();
    }
    parts.join(",")
}

/// Pick the country code: a supplied 2-letter code wins, else the country
/// name table, else empty.
fn resolve_country_code(supplied: Option<&str>, country_name: &str) -> String {
    if let Some(code) = supplied {
        let code = code.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            return code.to_lowercase();
        }
        // A non-code value in the code field is treated as a name too.
        if let Some(resolved) = tables::country_code_for(code) {
            return resolved.to_string();
        }
    }
    tables::country_code_for(country_name)
        .map(str::to_string)
        .unwrap_or_default()
}
