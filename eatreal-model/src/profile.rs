use strum::{AsRefStr, EnumIter, EnumString};

use crate::answer::AnswerSet;
use crate::question::ids;

#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
}

#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    VeryActive,
}

impl ActivityLevel {
    /// Scale applied to the basal metabolic rate to estimate daily expenditure.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }
}

#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Health,
    Energy,
}

/// Body measurements taken from an answer set. Each field is present only
/// once the matching question has been answered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub age: Option<f64>,
    pub gender: Option<Gender>,
    pub activity: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

impl Body {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        Self {
            height_cm: answers.number(ids::HEIGHT),
            current_weight_kg: answers.number(ids::CURRENT_WEIGHT),
            target_weight_kg: answers.number(ids::TARGET_WEIGHT),
            age: answers.number(ids::AGE),
            gender: answers.text(ids::GENDER).and_then(|s| s.parse().ok()),
            activity: answers.text(ids::ACTIVITY).and_then(|s| s.parse().ok()),
            goal: answers.text(ids::GOAL).and_then(|s| s.parse().ok()),
        }
    }

    pub fn height_m(&self) -> Option<f64> {
        self.height_cm.map(|h| h / 100.0)
    }
}

/// Turns a snake_case answer value into words, e.g. `weight_loss` into `weight loss`.
pub fn humanize(value: &str) -> String {
    value.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::AnswerValue;

    #[test]
    fn parses_answer_values() {
        assert_eq!("very_active".parse(), Ok(ActivityLevel::VeryActive));
        assert_eq!("Female".parse(), Ok(Gender::Female));
        assert_eq!("weight_loss".parse(), Ok(Goal::WeightLoss));
        assert!("couch".parse::<ActivityLevel>().is_err());
        assert_eq!(Goal::MuscleGain.as_ref(), "muscle_gain");
        assert_eq!("energy".parse(), Ok(Goal::Energy));
        assert!("maintenance".parse::<Goal>().is_err());
    }

    #[test]
    fn body_from_partial_answers() {
        let answers: AnswerSet = [
            ("goal", AnswerValue::from("muscle_gain")),
            ("gender", AnswerValue::from("male")),
            ("height", AnswerValue::from(180.0)),
        ]
        .into_iter()
        .collect();

        let body = Body::from_answers(&answers);
        assert_eq!(body.goal, Some(Goal::MuscleGain));
        assert_eq!(body.gender, Some(Gender::Male));
        assert_eq!(body.height_m(), Some(1.8));
        assert_eq!(body.current_weight_kg, None);
        assert_eq!(body.activity, None);
    }

    #[test]
    fn humanize_replaces_underscores() {
        assert_eq!(humanize("very_active"), "very active");
        assert_eq!(humanize("none"), "none");
    }
}
