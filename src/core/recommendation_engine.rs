use std::collections::BTreeSet;

use tracing::debug;

use super::guidance_catalog::{self, PROGRAM_CANDIDATES};
use super::models::{
    AdmissionStatus, Career, Recommendation, RecommendationType, School, StudentProfile, Subject,
    University,
};

const STRONG_SCORE: u8 = 70;
const WEAK_SCORE: u8 = 50;
const STREAM_SUBJECT_MIN: u8 = 60;
const SCIENCE_STREAM_MIN_APS: u32 = 25;
const COMMERCE_STREAM_MIN_APS: u32 = 22;
const HIGH_DEMAND_MIN_APS: u32 = 40;
const MEDIUM_DEMAND_MIN_APS: u32 = 30;
const ADVISORY_APS_BELOW: u32 = 30;
const FALLBACK_CAREER_COUNT: usize = 3;

pub const SCIENCE_STREAM: &str = "Science Stream";
pub const ENGINEERING_FOCUS: &str = "Engineering Focus";
pub const IT_FOCUS: &str = "IT Focus";
pub const COMMERCE_STREAM: &str = "Commerce Stream";
pub const BUSINESS_MANAGEMENT: &str = "Business Management";
pub const GENERAL_STREAM: &str = "General Stream";
pub const VOCATIONAL_STREAM: &str = "Vocational Stream";

pub fn generate_for_profile(profile: &StudentProfile) -> Vec<Recommendation> {
    generate(
        profile.grade,
        &profile.subjects,
        profile.aps_score,
        &profile.selected_interests,
        &profile.selected_skills,
    )
}

/// Grade-appropriate guidance for a student. Grades outside 9..=12 get none.
pub fn generate(
    grade: u8,
    subjects: &[Subject],
    aps_score: u32,
    interests: &BTreeSet<String>,
    skills: &BTreeSet<String>,
) -> Vec<Recommendation> {
    let recommendations = match grade {
        9 => grade_nine(subjects, interests),
        10 => grade_ten(subjects, aps_score, interests),
        11 | 12 => vec![
            university_pathways(aps_score, interests),
            career_pathways(aps_score, interests, skills),
            admission_requirements(aps_score),
        ],
        _ => Vec::new(),
    };

    debug!(
        grade,
        aps_score,
        count = recommendations.len(),
        "recommendations generated"
    );
    recommendations
}

fn grade_nine(subjects: &[Subject], interests: &BTreeSet<String>) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let strong: Vec<&Subject> = subjects.iter().filter(|s| s.score >= STRONG_SCORE).collect();
    let weak: Vec<&Subject> = subjects.iter().filter(|s| s.score < WEAK_SCORE).collect();

    if !strong.is_empty() {
        recommendations.push(career_exploration(&strong, interests));
    }

    if !weak.is_empty() {
        let mut focus = Recommendation::new(
            "Skills Development Focus",
            "Consider focusing on these areas for improvement:",
            RecommendationType::CareerGuidance,
        );
        focus.requirements = weak
            .iter()
            .map(|s| format!("Improve {} (current: {}%)", s.name, s.score))
            .collect();
        recommendations.push(focus);
    }

    recommendations
}

fn career_exploration(strong: &[&Subject], interests: &BTreeSet<String>) -> Recommendation {
    let math_strength = strong.iter().any(|s| name_contains(s, "math"));
    let science_strength = strong.iter().any(|s| name_contains(s, "science"));
    let language_strength = strong
        .iter()
        .any(|s| name_contains(s, "english") || name_contains(s, "language"));

    let mut careers = Vec::new();
    if math_strength && has_any_interest(interests, &["Technology", "Engineering"]) {
        careers.push(guidance_catalog::software_developer());
    }
    if science_strength && has_any_interest(interests, &["Healthcare", "Science"]) {
        careers.push(guidance_catalog::medical_doctor());
    }
    if language_strength && has_any_interest(interests, &["Business", "Education"]) {
        careers.push(guidance_catalog::marketing_manager());
    }
    if careers.is_empty() {
        careers = guidance_catalog::default_careers();
    }

    let mut recommendation = Recommendation::new(
        "Career Pathways",
        format!(
            "Based on your strengths in {} subjects and interests",
            strong.len()
        ),
        RecommendationType::CareerGuidance,
    );
    recommendation.careers = careers;
    recommendation
}

fn grade_ten(
    subjects: &[Subject],
    aps_score: u32,
    interests: &BTreeSet<String>,
) -> Vec<Recommendation> {
    let streams = recommended_streams(subjects, aps_score, interests);
    let schools = schools_for_streams(&streams);

    let mut stream_recommendation = Recommendation::new(
        "Stream Recommendations",
        "Recommended academic streams based on your performance",
        RecommendationType::StreamRecommendation,
    );
    stream_recommendation.requirements = streams;
    stream_recommendation.schools = schools.clone();

    let mut school_recommendation = Recommendation::new(
        "Recommended Schools",
        "Schools offering your recommended streams in your area",
        RecommendationType::StreamRecommendation,
    );
    school_recommendation.schools = schools;

    vec![stream_recommendation, school_recommendation]
}

pub fn recommended_streams(
    subjects: &[Subject],
    aps_score: u32,
    interests: &BTreeSet<String>,
) -> Vec<String> {
    let math = first_score_matching(subjects, &["math"]);
    let science = first_score_matching(subjects, &["science"]);
    let commerce = first_score_matching(subjects, &["business", "economic"]);

    let mut streams = Vec::new();

    if math >= STREAM_SUBJECT_MIN
        && science >= STREAM_SUBJECT_MIN
        && aps_score >= SCIENCE_STREAM_MIN_APS
    {
        streams.push(SCIENCE_STREAM.to_string());
        if has_interest(interests, "Engineering") {
            streams.push(ENGINEERING_FOCUS.to_string());
        }
        if has_interest(interests, "Technology") {
            streams.push(IT_FOCUS.to_string());
        }
    }

    if commerce >= STREAM_SUBJECT_MIN && aps_score >= COMMERCE_STREAM_MIN_APS {
        streams.push(COMMERCE_STREAM.to_string());
        if has_interest(interests, "Business") {
            streams.push(BUSINESS_MANAGEMENT.to_string());
        }
    }

    if streams.is_empty() {
        streams.push(GENERAL_STREAM.to_string());
        streams.push(VOCATIONAL_STREAM.to_string());
    }

    streams
}

pub fn schools_for_streams(streams: &[String]) -> Vec<School> {
    let mut schools = Vec::new();

    if streams
        .iter()
        .any(|s| s.contains("Science") || s.contains("Engineering"))
    {
        schools.push(guidance_catalog::science_school());
    }
    if streams
        .iter()
        .any(|s| s.contains("Commerce") || s.contains("Business"))
    {
        schools.push(guidance_catalog::commerce_school());
    }
    schools.push(guidance_catalog::technical_school());

    schools
}

fn university_pathways(aps_score: u32, interests: &BTreeSet<String>) -> Recommendation {
    let universities = PROGRAM_CANDIDATES
        .iter()
        .filter(|c| c.admits(aps_score))
        .filter(|c| {
            c.required_interest
                .map_or(true, |interest| has_interest(interests, interest))
        })
        .map(|c| University {
            name: c.name.to_string(),
            program: c.program.to_string(),
            location: c.location.to_string(),
            aps_requirement: c.aps_requirement,
            status: c.status_for(aps_score),
        })
        .collect();

    let mut recommendation = Recommendation::new(
        "University Pathways",
        format!("Bachelor's programs matching your APS score of {aps_score}"),
        RecommendationType::UniversityRecommendation,
    );
    recommendation.universities = universities;
    recommendation
}

fn career_pathways(
    aps_score: u32,
    interests: &BTreeSet<String>,
    skills: &BTreeSet<String>,
) -> Recommendation {
    let (tier, description) = if aps_score >= HIGH_DEMAND_MIN_APS {
        (
            guidance_catalog::high_demand_careers(),
            "High-demand careers matching your profile",
        )
    } else if aps_score >= MEDIUM_DEMAND_MIN_APS {
        (
            guidance_catalog::medium_demand_careers(),
            "Careers in steady demand matching your profile",
        )
    } else {
        (
            guidance_catalog::vocational_careers(),
            "Vocational and technical careers matching your profile",
        )
    };

    let matching: Vec<Career> = tier
        .iter()
        .filter(|career| career_matches(career, interests, skills))
        .cloned()
        .collect();

    let careers = if matching.is_empty() {
        tier.into_iter().take(FALLBACK_CAREER_COUNT).collect()
    } else {
        matching
    };

    let mut recommendation = Recommendation::new(
        "Career Pathways",
        description,
        RecommendationType::CareerGuidance,
    );
    recommendation.careers = careers;
    recommendation
}

fn career_matches(career: &Career, interests: &BTreeSet<String>, skills: &BTreeSet<String>) -> bool {
    let title = career.title.to_lowercase();
    let title_matches = interests
        .iter()
        .any(|interest| title.contains(&interest.to_lowercase()));
    let skill_matches = career
        .skills_needed
        .iter()
        .any(|needed| skills.iter().any(|s| s.eq_ignore_ascii_case(needed)));

    title_matches || skill_matches
}

fn admission_requirements(aps_score: u32) -> Recommendation {
    let mut requirements: Vec<String> = guidance_catalog::BASELINE_ADMISSION_REQUIREMENTS
        .iter()
        .map(|v| v.to_string())
        .collect();

    if aps_score < ADVISORY_APS_BELOW {
        requirements.extend(guidance_catalog::LOW_APS_ADVICE.iter().map(|v| v.to_string()));
    }

    let mut recommendation = Recommendation::new(
        "Admission Requirements",
        "Key requirements for tertiary education applications",
        RecommendationType::Requirements,
    );
    recommendation.requirements = requirements;
    recommendation
}

fn name_contains(subject: &Subject, token: &str) -> bool {
    subject.name.to_lowercase().contains(token)
}

/// Score of the first subject whose name contains any token, 0 when absent.
fn first_score_matching(subjects: &[Subject], tokens: &[&str]) -> u8 {
    subjects
        .iter()
        .find(|s| tokens.iter().any(|t| name_contains(s, t)))
        .map_or(0, |s| s.score)
}

fn has_interest(interests: &BTreeSet<String>, wanted: &str) -> bool {
    interests.iter().any(|i| i.eq_ignore_ascii_case(wanted))
}

fn has_any_interest(interests: &BTreeSet<String>, wanted: &[&str]) -> bool {
    wanted.iter().any(|w| has_interest(interests, w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aps::compute_aps;

    fn tags(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn subject(name: &str, score: u8) -> Subject {
        Subject::new(name, score, false)
    }

    fn career_titles(recommendation: &Recommendation) -> Vec<&str> {
        recommendation.careers.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn grade_nine_matches_strengths_to_interests() {
        let subjects = vec![
            subject("Mathematics", 82),
            subject("Natural Sciences", 78),
            subject("English Home Language", 75),
            subject("Technology", 45),
        ];
        let result = generate(
            9,
            &subjects,
            compute_aps(&subjects),
            &tags(&["technology", "Healthcare"]),
            &tags(&[]),
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Career Pathways");
        assert_eq!(
            result[0].description,
            "Based on your strengths in 3 subjects and interests"
        );
        assert_eq!(
            career_titles(&result[0]),
            vec!["Software Developer", "Medical Doctor"]
        );
        assert_eq!(result[1].title, "Skills Development Focus");
        assert_eq!(result[1].kind, RecommendationType::CareerGuidance);
        assert_eq!(
            result[1].requirements,
            vec!["Improve Technology (current: 45%)".to_string()]
        );
    }

    #[test]
    fn grade_nine_without_matching_interest_uses_default_careers() {
        let subjects = vec![subject("Creative Arts", 91)];
        let result = generate(9, &subjects, 7, &tags(&["Sports"]), &tags(&[]));
        assert_eq!(result.len(), 1);
        assert_eq!(
            career_titles(&result[0]),
            vec!["IT Support Specialist", "Healthcare Assistant"]
        );
    }

    #[test]
    fn grade_nine_without_strong_or_weak_subjects_is_empty() {
        let subjects = vec![subject("Mathematics", 65), subject("Life Orientation", 55)];
        assert!(generate(9, &subjects, 9, &tags(&[]), &tags(&[])).is_empty());
    }

    #[test]
    fn grade_ten_needs_aps_for_science_stream() {
        let subjects = vec![
            Subject::new("Mathematics", 82, true),
            Subject::new("Natural Sciences", 78, true),
            Subject::new("Life Orientation", 80, true),
        ];
        let aps = compute_aps(&subjects);
        assert_eq!(aps, 18);

        let result = generate(10, &subjects, aps, &tags(&["Engineering"]), &tags(&[]));
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].kind, RecommendationType::StreamRecommendation);
        assert_eq!(
            result[0].requirements,
            vec![GENERAL_STREAM.to_string(), VOCATIONAL_STREAM.to_string()]
        );
        let school_names: Vec<&str> = result[1].schools.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(school_names, vec!["Tech Innovation Academy"]);
    }

    #[test]
    fn grade_ten_science_and_commerce_streams_with_foci() {
        let subjects = vec![
            subject("Mathematics", 72),
            subject("Natural Sciences", 68),
            subject("Economic Management Sciences", 64),
            subject("English Home Language", 70),
            subject("Life Orientation", 78),
        ];
        let streams = recommended_streams(
            &subjects,
            26,
            &tags(&["Engineering", "Technology", "business"]),
        );
        assert_eq!(
            streams,
            vec![
                SCIENCE_STREAM,
                ENGINEERING_FOCUS,
                IT_FOCUS,
                COMMERCE_STREAM,
                BUSINESS_MANAGEMENT,
            ]
        );

        let schools: Vec<String> = schools_for_streams(&streams)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            schools,
            vec![
                "Mpumalanga Science Academy",
                "Nelspruit Commercial High",
                "Tech Innovation Academy",
            ]
        );
    }

    #[test]
    fn grade_ten_commerce_only() {
        let subjects = vec![subject("Mathematics", 52), subject("Business studies", 71)];
        let streams = recommended_streams(&subjects, 22, &tags(&[]));
        assert_eq!(streams, vec![COMMERCE_STREAM]);
    }

    #[test]
    fn senior_grades_get_three_recommendations() {
        let result = generate(11, &[], 0, &tags(&[]), &tags(&[]));
        let kinds: Vec<RecommendationType> = result.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationType::UniversityRecommendation,
                RecommendationType::CareerGuidance,
                RecommendationType::Requirements,
            ]
        );
        assert!(result[0].universities.is_empty());
        assert_eq!(result[2].requirements.len(), 7);
    }

    #[test]
    fn engineering_interest_unlocks_gated_programme() {
        let result = generate(12, &[], 45, &tags(&["Engineering"]), &tags(&[]));
        let universities = &result[0].universities;

        let stellenbosch = universities
            .iter()
            .find(|u| u.name == "Stellenbosch University")
            .expect("engineering programme listed");
        assert_eq!(stellenbosch.status, AdmissionStatus::ExceedsRequirement);

        let uct = universities
            .iter()
            .find(|u| u.name == "University of Cape Town")
            .expect("40+ programme listed");
        assert_eq!(uct.status, AdmissionStatus::ExceedsRequirement);
        assert_eq!(universities.len(), 4);
        assert_eq!(result[2].requirements.len(), 5);
    }

    fn statuses_at(aps: u32) -> Vec<(String, AdmissionStatus)> {
        generate(12, &[], aps, &tags(&["Engineering"]), &tags(&[]))[0]
            .universities
            .iter()
            .map(|u| (u.name.clone(), u.status))
            .collect()
    }

    fn expected(rows: &[(&str, AdmissionStatus)]) -> Vec<(String, AdmissionStatus)> {
        rows.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    #[test]
    fn university_status_follows_each_programme_threshold() {
        use AdmissionStatus::*;

        assert_eq!(
            statuses_at(35),
            expected(&[
                ("University of Witwatersrand", MeetsRequirement),
                ("University of Mpumalanga", MeetsRequirement),
                ("Stellenbosch University", BelowRequirement),
            ])
        );
        assert_eq!(
            statuses_at(38),
            expected(&[
                ("University of Witwatersrand", ExceedsRequirement),
                ("University of Mpumalanga", MeetsRequirement),
                ("Stellenbosch University", BelowRequirement),
            ])
        );
        assert_eq!(
            statuses_at(40),
            expected(&[
                ("University of Cape Town", MeetsRequirement),
                ("University of Witwatersrand", ExceedsRequirement),
                ("University of Mpumalanga", MeetsRequirement),
                ("Stellenbosch University", ExceedsRequirement),
            ])
        );
        assert_eq!(
            statuses_at(42),
            expected(&[
                ("University of Cape Town", ExceedsRequirement),
                ("University of Witwatersrand", ExceedsRequirement),
                ("University of Mpumalanga", MeetsRequirement),
                ("Stellenbosch University", ExceedsRequirement),
            ])
        );
    }

    #[test]
    fn senior_careers_filter_by_interest_or_skill() {
        let by_interest = generate(12, &[], 42, &tags(&["Data"]), &tags(&[]));
        assert_eq!(career_titles(&by_interest[1]), vec!["Data Scientist"]);

        let by_skill = generate(12, &[], 33, &tags(&[]), &tags(&["compassion"]));
        assert_eq!(career_titles(&by_skill[1]), vec!["Registered Nurse"]);

        let unfiltered = generate(11, &[], 12, &tags(&["Sports"]), &tags(&["Leadership"]));
        assert_eq!(
            career_titles(&unfiltered[1]),
            vec!["Electrician", "IT Technician"]
        );
    }

    #[test]
    fn career_description_names_the_tier() {
        let description =
            |aps: u32| generate(12, &[], aps, &tags(&[]), &tags(&[]))[1].description.clone();
        assert_eq!(description(44), "High-demand careers matching your profile");
        assert_eq!(description(31), "Careers in steady demand matching your profile");
        assert_eq!(
            description(18),
            "Vocational and technical careers matching your profile"
        );
    }

    #[test]
    fn unsupported_grades_yield_nothing() {
        assert!(generate(8, &[], 30, &tags(&[]), &tags(&[])).is_empty());
        assert!(generate(13, &[], 30, &tags(&[]), &tags(&[])).is_empty());
    }

    #[test]
    fn output_is_deterministic() {
        let subjects = vec![subject("Mathematics", 88), subject("Physical Sciences", 74)];
        let interests = tags(&["Engineering", "Science"]);
        let skills = tags(&["Problem Solving"]);
        for grade in 9..=12 {
            assert_eq!(
                generate(grade, &subjects, 35, &interests, &skills),
                generate(grade, &subjects, 35, &interests, &skills)
            );
        }
    }
}
