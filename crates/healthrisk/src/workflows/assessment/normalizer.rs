/// Lower-cases, trims (including a stray BOM) and collapses inner whitespace so that
/// lookups tolerate the formatting drift seen across questionnaire revisions.
pub(crate) fn normalize_response(raw: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let collapsed = trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed.replace("mm hg", "mmhg")
}

/// Spend answers additionally drop thousands separators and currency markers.
pub(crate) fn normalize_amount(raw: &str) -> String {
    let normalized = normalize_response(raw);
    let stripped: String = normalized
        .replace("rs.", "")
        .replace("inr", "")
        .chars()
        .filter(|c| !matches!(c, ',' | '₹' | '$'))
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" -", "-")
        .replace("- ", "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_case_and_spacing() {
        assert_eq!(
            normalize_response("\u{feff}  130-139 mm Hg /  85-89 mmHg "),
            "130-139 mmhg / 85-89 mmhg"
        );
    }

    #[test]
    fn normalize_amount_strips_currency() {
        assert_eq!(normalize_amount("Below ₹5,000"), "below 5000");
        assert_eq!(normalize_amount("Rs. 5,000 - 10,000"), "5000-10000");
    }
}
