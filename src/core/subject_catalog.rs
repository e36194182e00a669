//! Keyword tables that map noisy report-card fragments onto canonical
//! subject names. Every table is an ordered slice scanned top to bottom;
//! the first hit wins, so entry order is part of the contract.

pub const MATHEMATICS: &str = "Mathematics";
pub const ENGLISH_HOME_LANGUAGE: &str = "English Home Language";
pub const FIRST_ADDITIONAL_LANGUAGE: &str = "First Additional Language";
pub const NATURAL_SCIENCES: &str = "Natural Sciences";
pub const SOCIAL_SCIENCES: &str = "Social Sciences";
pub const TECHNOLOGY: &str = "Technology";
pub const LIFE_ORIENTATION: &str = "Life Orientation";
pub const ECONOMIC_MANAGEMENT_SCIENCES: &str = "Economic Management Sciences";
pub const ACCOUNTING: &str = "Accounting";
pub const ECONOMICS: &str = "Economics";
pub const PHYSICAL_SCIENCES: &str = "Physical Sciences";
pub const LIFE_SCIENCES: &str = "Life Sciences";
pub const CREATIVE_ARTS: &str = "Creative Arts";

pub const CANONICAL_SUBJECTS: [&str; 13] = [
    MATHEMATICS,
    ENGLISH_HOME_LANGUAGE,
    FIRST_ADDITIONAL_LANGUAGE,
    NATURAL_SCIENCES,
    SOCIAL_SCIENCES,
    TECHNOLOGY,
    LIFE_ORIENTATION,
    ECONOMIC_MANAGEMENT_SCIENCES,
    ACCOUNTING,
    ECONOMICS,
    PHYSICAL_SCIENCES,
    LIFE_SCIENCES,
    CREATIVE_ARTS,
];

static SUBJECT_KEYWORDS: &[(&str, &str)] = &[
    ("mathematics", MATHEMATICS),
    ("math", MATHEMATICS),
    ("maths", MATHEMATICS),
    ("english", ENGLISH_HOME_LANGUAGE),
    ("home language", ENGLISH_HOME_LANGUAGE),
    ("first additional", FIRST_ADDITIONAL_LANGUAGE),
    ("additional language", FIRST_ADDITIONAL_LANGUAGE),
    ("afrikaans", FIRST_ADDITIONAL_LANGUAGE),
    ("isizulu", FIRST_ADDITIONAL_LANGUAGE),
    ("isixhosa", FIRST_ADDITIONAL_LANGUAGE),
    ("sesotho", FIRST_ADDITIONAL_LANGUAGE),
    ("natural science", NATURAL_SCIENCES),
    ("natural sciences", NATURAL_SCIENCES),
    ("science", NATURAL_SCIENCES),
    ("social science", SOCIAL_SCIENCES),
    ("social sciences", SOCIAL_SCIENCES),
    ("geography", SOCIAL_SCIENCES),
    ("history", SOCIAL_SCIENCES),
    ("technology", TECHNOLOGY),
    ("life orientation", LIFE_ORIENTATION),
    ("economic", ECONOMIC_MANAGEMENT_SCIENCES),
    ("business", ECONOMIC_MANAGEMENT_SCIENCES),
    ("ems", ECONOMIC_MANAGEMENT_SCIENCES),
    ("accounting", ACCOUNTING),
    ("economics", ECONOMICS),
    ("physical science", PHYSICAL_SCIENCES),
    ("physical sciences", PHYSICAL_SCIENCES),
    ("physics", PHYSICAL_SCIENCES),
    ("chemistry", PHYSICAL_SCIENCES),
    ("life science", LIFE_SCIENCES),
    ("life sciences", LIFE_SCIENCES),
    ("biology", LIFE_SCIENCES),
    ("creative arts", CREATIVE_ARTS),
    ("arts", CREATIVE_ARTS),
    ("music", CREATIVE_ARTS),
    ("drama", CREATIVE_ARTS),
];

/// Second-chance table used only when the line-by-line pass found nothing.
static FALLBACK_PATTERNS: &[(&str, &[&str])] = &[
    (MATHEMATICS, &["math", "mathematics"]),
    (ENGLISH_HOME_LANGUAGE, &["english", "home language"]),
    (
        FIRST_ADDITIONAL_LANGUAGE,
        &["first additional", "afrikaans", "isizulu", "isixhosa"],
    ),
    (NATURAL_SCIENCES, &["natural science", "science"]),
    (SOCIAL_SCIENCES, &["social science", "geography", "history"]),
    (TECHNOLOGY, &["technology"]),
    (LIFE_ORIENTATION, &["life orientation"]),
    (ECONOMIC_MANAGEMENT_SCIENCES, &["economic", "business", "ems"]),
    (CREATIVE_ARTS, &["creative arts", "arts", "music"]),
];

static CORE_SUBJECT_TOKENS: &[&str] = &[
    "mathematics",
    "english",
    "home language",
    "life orientation",
    "first additional language",
    "natural science",
    "science",
];

/// Canonical name for the first keyword contained in `raw_fragment`.
///
/// A fragment that already is a canonical name maps to itself, so
/// canonicalization is idempotent even for names like "Physical Sciences"
/// whose text also contains an earlier, broader keyword.
pub fn canonicalize(raw_fragment: &str) -> Option<&'static str> {
    let trimmed = raw_fragment.trim();
    if let Some(name) = CANONICAL_SUBJECTS
        .iter()
        .copied()
        .find(|name| name.eq_ignore_ascii_case(trimmed))
    {
        return Some(name);
    }

    let lower = trimmed.to_lowercase();
    SUBJECT_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, canonical)| *canonical)
}

pub fn is_core(canonical_name: &str) -> bool {
    let lower = canonical_name.to_lowercase();
    CORE_SUBJECT_TOKENS.iter().any(|token| lower.contains(token))
}

pub fn fallback_patterns() -> &'static [(&'static str, &'static [&'static str])] {
    FALLBACK_PATTERNS
}

/// Closed range a synthesized score for `canonical_name` is drawn from.
pub fn plausible_score_range(canonical_name: &str) -> (u8, u8) {
    match canonical_name {
        MATHEMATICS => (65, 85),
        ENGLISH_HOME_LANGUAGE => (70, 90),
        FIRST_ADDITIONAL_LANGUAGE => (60, 80),
        NATURAL_SCIENCES => (65, 85),
        SOCIAL_SCIENCES => (60, 80),
        TECHNOLOGY => (70, 90),
        LIFE_ORIENTATION => (75, 95),
        ECONOMIC_MANAGEMENT_SCIENCES => (60, 80),
        CREATIVE_ARTS => (70, 90),
        _ => (50, 80),
    }
}
