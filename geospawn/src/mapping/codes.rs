//! Realm and composite mapping codes.

use crate::geo::BiomeCode;

/// Realm name spellings and their two-letter codes.
const REALM_CODES: [(&str, &str); 16] = [
    ("nearctic", "NA"),
    ("palearctic", "PA"),
    ("palaearctic", "PA"),
    ("neotropic", "NT"),
    ("neotropical", "NT"),
    ("afrotropic", "AT"),
    ("afrotropical", "AT"),
    ("indomalayan", "IM"),
    ("indomalaya", "IM"),
    ("indo-malayan", "IM"),
    ("australasia", "AA"),
    ("australasian", "AA"),
    ("oceania", "OC"),
    ("oceanian", "OC"),
    ("antarctic", "AN"),
    ("antarctica", "AN"),
];

/// Two-letter code of a biogeographic realm.
///
/// Accepts common spellings case-insensitively, and the codes themselves.
pub fn realm_code(realm: &str) -> Option<&'static str> {
    let normalized = realm.trim().to_ascii_lowercase();
    REALM_CODES
        .iter()
        .find(|(name, code)| *name == normalized || code.eq_ignore_ascii_case(&normalized))
        .map(|(_, code)| *code)
}

/// Realm + biome code keying the wood and food tables, e.g. `"PA04"`.
///
/// `None` when the realm is unrecognised or the biome is unknown.
pub fn composite_code(realm: &str, biome: BiomeCode) -> Option<String> {
    let realm = realm_code(realm)?;
    let number = biome.number()?;
    Some(format!("{}{:02}", realm, number))
}
