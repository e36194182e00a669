use once_cell::sync::Lazy;
use regex::Regex;

use super::models::ExtractedSubject;

static PERCENTAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,3})%").unwrap());
static BARE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([7-9][0-9]|[1-9][0-9]?)\b").unwrap());

const PLAUSIBLE_SCORE_MIN: u32 = 30;
const PLAUSIBLE_SCORE_MAX: u32 = 100;
const REALISTIC_SCORE_MIN: u8 = 30;
const REALISTIC_SCORE_MAX: u8 = 95;

/// Most plausible percentage on a single line of recognized text.
///
/// An explicit `NN%` token wins outright. Otherwise the largest bare number in
/// the 30..=100 range is taken, since report-card rows also carry subject
/// codes, terms and years.
pub fn extract_score(line: &str) -> Option<u8> {
    if let Some(captures) = PERCENTAGE_RE.captures(line) {
        if let Some(value) = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
        {
            if value <= 100 {
                return Some(value as u8);
            }
        }
    }

    BARE_NUMBER_RE
        .find_iter(line)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|value| (PLAUSIBLE_SCORE_MIN..=PLAUSIBLE_SCORE_MAX).contains(value))
        .max()
        .map(|value| value as u8)
}

/// Cuts a line after every explicit percentage so that rows such as
/// `Mathematics 85% Science: 90%` yield one fragment per subject cell.
/// Lines with fewer than two percentages are returned whole.
pub fn split_score_cells(line: &str) -> Vec<&str> {
    if PERCENTAGE_RE.find_iter(line).take(2).count() < 2 {
        return vec![line];
    }

    let mut cells = Vec::new();
    let mut start = 0;
    for m in PERCENTAGE_RE.find_iter(line) {
        cells.push(&line[start..m.end()]);
        start = m.end();
    }
    if start < line.len() {
        cells.push(&line[start..]);
    }

    cells
        .into_iter()
        .filter(|cell| !cell.trim().is_empty())
        .collect()
}

/// Trust estimate for a set of extracted subjects, in `0.0..=1.0`.
pub fn score_confidence(subjects: &[ExtractedSubject]) -> f64 {
    if subjects.is_empty() {
        return 0.0;
    }

    let total = subjects.len() as f64;
    let valid = subjects.iter().filter(|s| s.score <= 100).count() as f64;
    let mut confidence = valid / total;

    confidence *= match subjects.len() {
        n if n >= 6 => 0.9,
        n if n >= 4 => 0.7,
        n if n >= 2 => 0.5,
        _ => 0.3,
    };

    let realistic = subjects
        .iter()
        .filter(|s| (REALISTIC_SCORE_MIN..=REALISTIC_SCORE_MAX).contains(&s.score))
        .count() as f64;
    confidence *= realistic / total;

    let synthesized = subjects.iter().filter(|s| s.is_synthesized).count() as f64;
    confidence *= 1.0 - 0.5 * (synthesized / total);

    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_percentage_wins() {
        assert_eq!(extract_score("Mathematics 72%"), Some(72));
        assert_eq!(extract_score("term 3 english 4 64% 2023"), Some(64));
        assert_eq!(extract_score("life orientation 100%"), Some(100));
    }

    #[test]
    fn out_of_range_percentage_falls_through_to_bare_numbers() {
        assert_eq!(extract_score("accounting 250% 68"), Some(68));
    }

    #[test]
    fn bare_numbers_take_largest_plausible_candidate() {
        assert_eq!(extract_score("Code 3: 72 marks out of 8"), Some(72));
        assert_eq!(extract_score("history 41 58 12"), Some(58));
        assert_eq!(extract_score("geography 2023 77"), Some(77));
    }

    #[test]
    fn no_plausible_number_yields_none() {
        assert_eq!(extract_score("Mathematics"), None);
        assert_eq!(extract_score("level 4 term 2"), None);
        assert_eq!(extract_score("room 101"), None);
    }

    #[test]
    fn rows_are_split_after_each_percentage() {
        assert_eq!(
            split_score_cells("Mathematics 85% Science: 90%"),
            vec!["Mathematics 85%", " Science: 90%"]
        );
        assert_eq!(split_score_cells("Technology 71"), vec!["Technology 71"]);
        assert_eq!(
            split_score_cells("85% English (level 6)"),
            vec!["85% English (level 6)"]
        );
        assert_eq!(
            split_score_cells("Maths 61% Drama 74% term 2"),
            vec!["Maths 61%", " Drama 74%", " term 2"]
        );
    }

    #[test]
    fn confidence_scales_with_subject_count_and_realism() {
        let two = vec![
            ExtractedSubject::measured("Mathematics", 85),
            ExtractedSubject::measured("Natural Sciences", 90),
        ];
        assert!((score_confidence(&two) - 0.5).abs() < 1e-9);

        let six: Vec<_> = (0..6)
            .map(|i| ExtractedSubject::measured(format!("s{i}"), 70))
            .collect();
        assert!((score_confidence(&six) - 0.9).abs() < 1e-9);

        let one_unrealistic = vec![ExtractedSubject::measured("Mathematics", 99)];
        assert_eq!(score_confidence(&one_unrealistic), 0.0);

        assert_eq!(score_confidence(&[]), 0.0);
    }

    #[test]
    fn synthesized_scores_depress_confidence() {
        let measured = vec![
            ExtractedSubject::measured("Mathematics", 70),
            ExtractedSubject::measured("Technology", 75),
        ];
        let synthesized = vec![
            ExtractedSubject::synthesized("Mathematics", 70),
            ExtractedSubject::synthesized("Technology", 75),
        ];
        assert!((score_confidence(&synthesized) - 0.25).abs() < 1e-9);
        assert!(score_confidence(&synthesized) < score_confidence(&measured));
    }
}
