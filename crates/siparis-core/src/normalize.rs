//! Product-code canonicalization.
//!
//! Codes from the primary import, the goods-received file, and the brand
//! exports all spell the same part differently (spacing, hyphens, vendor
//! prefixes, stray trailing zeros). Everything that joins rows across
//! sources goes through one of these functions first.

/// Fully canonical form: trimmed, whitespace/hyphen/underscore stripped,
/// uppercased, and reduced to letters, digits and periods.
///
/// Idempotent; empty or missing input yields the empty string.
#[must_use]
pub fn clean_product_code(code: &str) -> String {
    code.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Lighter comparison key used by the exact-match brand paths: trimmed,
/// whitespace removed, uppercased. Hyphens and other punctuation survive.
#[must_use]
pub fn compact_code(code: &str) -> String {
    code.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Secondary product code: everything after the first hyphen of the primary
/// code ("A-1234" → "1234"). Codes without a hyphen pass through unchanged.
#[must_use]
pub fn secondary_code(primary: &str) -> String {
    match primary.split_once('-') {
        Some((_, rest)) => rest.to_string(),
        None => primary.to_string(),
    }
}

/// Schaeffler catalogue numbers: strip the `LUK-` prefix, then drop a single
/// trailing zero when the character before it is not a digit, then apply the
/// generic cleaning.
#[must_use]
pub fn schaeffler_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix("LUK-").unwrap_or(trimmed);
    let mut code = stripped.to_string();
    let chars: Vec<char> = code.chars().collect();
    if chars.len() > 1
        && chars[chars.len() - 1] == '0'
        && !chars[chars.len() - 2].is_ascii_digit()
    {
        code.pop();
    }
    clean_product_code(&code)
}

/// Valeo references: strip the `VALE-` prefix, then apply generic cleaning.
#[must_use]
pub fn valeo_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix("VALE-").unwrap_or(trimmed);
    clean_product_code(stripped)
}

/// ZF material numbers carry a routing tag around a colon: `LF:`/`SX:`
/// prefixed values keep what follows the colon, any other colon-bearing
/// value keeps what precedes it, plain values just lose their spaces.
#[must_use]
pub fn zf_material_code(raw: &str) -> String {
    let value = raw.trim();
    if let Some(rest) = value
        .strip_prefix("LF:")
        .or_else(|| value.strip_prefix("SX:"))
    {
        rest.chars().filter(|c| !c.is_whitespace()).collect()
    } else if let Some((head, _)) = value.split_once(':') {
        head.trim().to_string()
    } else {
        value.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

/// Bosch reference codes: space-stripped and guaranteed to carry the
/// literal `3E-` prefix.
#[must_use]
pub fn bosch_code(raw: &str) -> String {
    let code: String = raw.trim().chars().filter(|c| !c.is_whitespace()).collect();
    if code.is_empty() {
        return code;
    }
    if code.starts_with("3E-") {
        code
    } else {
        format!("3E-{code}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_is_idempotent() {
        for raw in ["a b-c_d.9", "  LUK-00500 ", "şöğü-12", "", "   ", "A.B.C"] {
            let once = clean_product_code(raw);
            assert_eq!(clean_product_code(&once), once);
        }
    }

    #[test]
    fn clean_empty_and_blank_yield_empty() {
        assert_eq!(clean_product_code(""), "");
        assert_eq!(clean_product_code("   "), "");
        assert_eq!(clean_product_code("-_-"), "");
    }

    #[test]
    fn clean_strips_separators_and_uppercases() {
        assert_eq!(clean_product_code(" ab-12_3 .x "), "AB123.X");
        assert_eq!(clean_product_code("0 986 435 519"), "0986435519");
    }

    #[test]
    fn compact_keeps_hyphens() {
        assert_eq!(compact_code(" a-12 b "), "A-12B");
        assert_eq!(compact_code(""), "");
    }

    #[test]
    fn secondary_code_strips_through_first_hyphen() {
        assert_eq!(secondary_code("A-1234"), "1234");
        assert_eq!(secondary_code("TD-E01-X"), "E01-X");
        assert_eq!(secondary_code("1234"), "1234");
        assert_eq!(secondary_code(""), "");
    }

    #[test]
    fn schaeffler_strips_luk_prefix_without_dropping_digit_zero() {
        // "LUK-00500": after the prefix strip the trailing zero is preceded
        // by a digit, so it stays.
        assert_eq!(schaeffler_code("LUK-00500"), "00500");
    }

    #[test]
    fn schaeffler_drops_trailing_zero_after_non_digit() {
        assert_eq!(schaeffler_code("ABC0"), "ABC");
        assert_eq!(schaeffler_code("AB10"), "AB10");
        assert_eq!(schaeffler_code("0"), "0");
    }

    #[test]
    fn valeo_strips_vendor_prefix() {
        assert_eq!(valeo_code("VALE-826 704"), "826704");
        assert_eq!(valeo_code("826704"), "826704");
    }

    #[test]
    fn zf_material_colon_rules() {
        assert_eq!(zf_material_code("LF: 12 345"), "12345");
        assert_eq!(zf_material_code("SX:98-76"), "98-76");
        assert_eq!(zf_material_code("4047 333: old"), "4047 333");
        assert_eq!(zf_material_code(" 12 34 "), "1234");
    }

    #[test]
    fn bosch_code_prefixes_and_strips_spaces() {
        assert_eq!(bosch_code("0 986 435 519"), "3E-0986435519");
        assert_eq!(bosch_code("3E-123"), "3E-123");
        assert_eq!(bosch_code("  "), "");
    }
}
