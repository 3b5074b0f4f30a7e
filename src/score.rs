/// Binary signals behind the attractiveness score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttractivenessSignals {
    pub salary_mentioned: bool,
    pub has_skills: bool,
    pub has_benefits: bool,
    pub is_remote: bool,
    pub long_description: bool,
}

const SALARY_POINTS: u8 = 2;
const SKILLS_POINTS: u8 = 1;
const BENEFITS_POINTS: u8 = 1;
const REMOTE_POINTS: u8 = 1;
const LENGTH_POINTS: u8 = 1;

pub const MAX_SCORE: u8 = SALARY_POINTS + SKILLS_POINTS + BENEFITS_POINTS + REMOTE_POINTS + LENGTH_POINTS;

pub fn calculate_job_attractiveness_score(signals: &AttractivenessSignals) -> u8 {
    [
        (signals.salary_mentioned, SALARY_POINTS),
        (signals.has_skills, SKILLS_POINTS),
        (signals.has_benefits, BENEFITS_POINTS),
        (signals.is_remote, REMOTE_POINTS),
        (signals.long_description, LENGTH_POINTS),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, points)| points)
    .sum()
}
