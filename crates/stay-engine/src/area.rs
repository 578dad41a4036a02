//! Membership table for the area the rule applies to.

/// ISO 3166-1 alpha-2 codes of the participating states.
pub const MEMBER_COUNTRIES: &[&str] = &[
    "AT", "BE", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IS", "IT", "LV", "LI", "LT", "LU",
    "MT", "NL", "NO", "PL", "PT", "SK", "SI", "ES", "SE", "CH",
];

/// Whether a stay in `country_code` counts against the allowance.
///
/// Case-insensitive; surrounding whitespace is ignored.
pub fn is_member_country(country_code: &str) -> bool {
    let code = country_code.trim();
    MEMBER_COUNTRIES
        .iter()
        .any(|member| member.eq_ignore_ascii_case(code))
}
