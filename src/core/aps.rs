use super::models::Subject;

/// Admission points earned by a single percentage.
pub fn points_for_score(score: u8) -> u32 {
    match score {
        80.. => 7,
        70..=79 => 6,
        60..=69 => 5,
        50..=59 => 4,
        40..=49 => 3,
        30..=39 => 2,
        _ => 1,
    }
}

pub fn compute_aps(subjects: &[Subject]) -> u32 {
    subjects.iter().map(|s| points_for_score(s.score)).sum()
}
