//! Fixed careers, programmes and schools the recommendation rules draw from.

use super::models::{AdmissionStatus, Career, Demand, School};

fn career(
    title: &str,
    description: &str,
    demand: Demand,
    requirements: &[&str],
    skills_needed: &[&str],
    elevator_pitch: &str,
) -> Career {
    Career {
        title: title.to_string(),
        description: description.to_string(),
        demand,
        requirements: requirements.iter().map(|v| v.to_string()).collect(),
        skills_needed: skills_needed.iter().map(|v| v.to_string()).collect(),
        elevator_pitch: elevator_pitch.to_string(),
    }
}

fn school(name: &str, location: &str, distance: &str, school_type: &str, streams: &[&str]) -> School {
    School {
        name: name.to_string(),
        location: location.to_string(),
        distance: distance.to_string(),
        school_type: school_type.to_string(),
        streams: streams.iter().map(|v| v.to_string()).collect(),
    }
}

pub fn software_developer() -> Career {
    career(
        "Software Developer",
        "Design, develop, and test software applications and systems.",
        Demand::High,
        &["Mathematics", "Computer Science", "Problem Solving"],
        &["Logical Thinking", "Creativity", "Attention to Detail"],
        "Build the digital future with code and innovation",
    )
}

pub fn medical_doctor() -> Career {
    career(
        "Medical Doctor",
        "Diagnose and treat medical conditions, promote health and wellness.",
        Demand::VeryHigh,
        &["Life Sciences", "Physical Sciences", "Mathematics"],
        &["Empathy", "Communication", "Critical Thinking"],
        "Save lives and make a difference in healthcare",
    )
}

pub fn marketing_manager() -> Career {
    career(
        "Marketing Manager",
        "Develop strategies to promote products and services to target audiences.",
        Demand::High,
        &["Business Studies", "Languages", "Economics"],
        &["Creativity", "Communication", "Analytical Thinking"],
        "Shape brand stories and connect with customers",
    )
}

pub fn default_careers() -> Vec<Career> {
    vec![
        career(
            "IT Support Specialist",
            "Provide technical assistance and support for computer systems and software.",
            Demand::High,
            &["Computer Studies", "Mathematics"],
            &["Problem Solving", "Communication"],
            "Help people solve technology problems every day",
        ),
        career(
            "Healthcare Assistant",
            "Support medical staff in providing patient care in various healthcare settings.",
            Demand::VeryHigh,
            &["Life Sciences", "Life Orientation"],
            &["Empathy", "Teamwork", "Communication"],
            "Make a difference in patients' lives every day",
        ),
    ]
}

pub fn high_demand_careers() -> Vec<Career> {
    vec![
        career(
            "Data Scientist",
            "Analyze and interpret complex data to help organizations make better decisions.",
            Demand::VeryHigh,
            &["Mathematics", "Statistics", "Computer Science"],
            &["Analytical Thinking", "Programming", "Statistics"],
            "Turn data into insights that drive business decisions",
        ),
        career(
            "Software Engineer",
            "Design, develop, and maintain software systems and applications.",
            Demand::VeryHigh,
            &["Mathematics", "Computer Science", "Physics"],
            &["Problem Solving", "Logic", "Creativity"],
            "Create technology that changes how people live and work",
        ),
    ]
}

pub fn medium_demand_careers() -> Vec<Career> {
    vec![
        career(
            "Registered Nurse",
            "Provide and coordinate patient care, educate patients about health conditions.",
            Demand::High,
            &["Life Sciences", "Physical Sciences", "Mathematics"],
            &["Compassion", "Communication", "Critical Thinking"],
            "Provide compassionate care and save lives",
        ),
        career(
            "Marketing Specialist",
            "Develop and implement marketing strategies to promote products and services.",
            Demand::Medium,
            &["Business Studies", "Languages", "Economics"],
            &["Creativity", "Communication", "Analytical Skills"],
            "Connect brands with their ideal customers",
        ),
    ]
}

pub fn vocational_careers() -> Vec<Career> {
    vec![
        career(
            "Electrician",
            "Install, maintain, and repair electrical power systems and equipment.",
            Demand::High,
            &["Mathematics", "Physical Sciences", "Technical Drawing"],
            &["Problem Solving", "Technical Skills", "Safety Awareness"],
            "Power communities with essential electrical services",
        ),
        career(
            "IT Technician",
            "Install, maintain, and repair computer systems and networks.",
            Demand::Medium,
            &["Computer Studies", "Mathematics"],
            &["Technical Skills", "Problem Solving", "Customer Service"],
            "Keep technology running smoothly for businesses",
        ),
    ]
}

/// A bachelor's programme and the APS a student needs before it is shown.
pub struct ProgramCandidate {
    pub name: &'static str,
    pub program: &'static str,
    pub location: &'static str,
    pub aps_requirement: u32,
    pub min_aps: u32,
    pub required_interest: Option<&'static str>,
    /// APS from which the programme reports `ExceedsRequirement`; `None`
    /// means it never does.
    pub exceeds_at: Option<u32>,
    /// Status for an admitted student short of `exceeds_at`.
    pub otherwise: AdmissionStatus,
}

impl ProgramCandidate {
    pub fn admits(&self, aps_score: u32) -> bool {
        aps_score >= self.min_aps
    }

    pub fn status_for(&self, aps_score: u32) -> AdmissionStatus {
        match self.exceeds_at {
            Some(threshold) if aps_score >= threshold => AdmissionStatus::ExceedsRequirement,
            _ => self.otherwise,
        }
    }
}

pub static PROGRAM_CANDIDATES: &[ProgramCandidate] = &[
    ProgramCandidate {
        name: "University of Cape Town",
        program: "BSc Computer Science",
        location: "Cape Town",
        aps_requirement: 42,
        min_aps: 40,
        required_interest: None,
        exceeds_at: Some(42),
        otherwise: AdmissionStatus::MeetsRequirement,
    },
    ProgramCandidate {
        name: "University of Witwatersrand",
        program: "BCom Accounting",
        location: "Johannesburg",
        aps_requirement: 38,
        min_aps: 35,
        required_interest: None,
        exceeds_at: Some(38),
        otherwise: AdmissionStatus::MeetsRequirement,
    },
    ProgramCandidate {
        name: "University of Mpumalanga",
        program: "BEd Foundation Phase",
        location: "Mbombela",
        aps_requirement: 30,
        min_aps: 30,
        required_interest: None,
        exceeds_at: None,
        otherwise: AdmissionStatus::MeetsRequirement,
    },
    ProgramCandidate {
        name: "Stellenbosch University",
        program: "BEng Mechanical Engineering",
        location: "Stellenbosch",
        aps_requirement: 40,
        min_aps: 35,
        required_interest: Some("Engineering"),
        exceeds_at: Some(40),
        otherwise: AdmissionStatus::BelowRequirement,
    },
];

pub fn science_school() -> School {
    school(
        "Mpumalanga Science Academy",
        "Nelspruit",
        "5km",
        "Public",
        &["Science", "Engineering", "IT"],
    )
}

pub fn commerce_school() -> School {
    school(
        "Nelspruit Commercial High",
        "Nelspruit",
        "3km",
        "Public",
        &["Commerce", "Business Studies", "Economics"],
    )
}

pub fn technical_school() -> School {
    school(
        "Tech Innovation Academy",
        "Mbombela",
        "8km",
        "Technical",
        &["Engineering", "IT", "Technical Drawing"],
    )
}

pub const BASELINE_ADMISSION_REQUIREMENTS: [&str; 5] = [
    "Minimum 30% in Home Language",
    "50% in four subjects including Mathematics or Mathematical Literacy",
    "Valid South African ID",
    "Grade 12 Certificate",
    "Minimum APS score of 28 for most programs",
];

pub const LOW_APS_ADVICE: [&str; 2] = [
    "Consider foundation programs or bridging courses",
    "Improve your APS score by retaking key subjects",
];
