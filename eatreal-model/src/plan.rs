use itertools::Itertools;

use crate::answer::AnswerSet;
use crate::profile::humanize;
use crate::question::ids;

pub const DAY_FORMAT: &str = "DAY [number]:
Breakfast: [detailed meal] | P: [X]g, C: [X]g, F: [X]g
Lunch: [detailed meal] | P: [X]g, C: [X]g, F: [X]g
Dinner: [detailed meal] | P: [X]g, C: [X]g, F: [X]g
Snacks: [detailed meal] | P: [X]g, C: [X]g, F: [X]g";

const NOT_SPECIFIED: &str = "not specified";

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("no answer for \"{0}\"")]
pub struct MissingAnswer(pub &'static str);

/// Body of a meal plan submission.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlanRequest {
    #[cfg_attr(feature = "serde", serde(default))]
    pub prompt: String,
    pub email: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub user_profile: AnswerSet,
}

impl PlanRequest {
    pub fn from_answers(answers: &AnswerSet) -> Result<Self, MissingAnswer> {
        let email = answers
            .text(ids::EMAIL)
            .ok_or(MissingAnswer(ids::EMAIL))?
            .to_owned();
        Ok(Self {
            prompt: personalized_prompt(answers),
            email,
            user_profile: answers.clone(),
        })
    }
}

fn field(answers: &AnswerSet, key: &str) -> String {
    answers
        .get(key)
        .map(|v| humanize(&v.to_string()))
        .unwrap_or_else(|| NOT_SPECIFIED.to_owned())
}

/// Describes the user's profile and goal in words and asks for a 7-day plan
/// in the fixed day format.
pub fn personalized_prompt(answers: &AnswerSet) -> String {
    let goal = field(answers, ids::GOAL);
    let current_weight = field(answers, ids::CURRENT_WEIGHT);
    let target_weight = field(answers, ids::TARGET_WEIGHT);
    let cooking_time = field(answers, ids::COOKING_TIME);
    let allergies = field(answers, ids::ALLERGIES);
    let diet = field(answers, ids::DIET_PREFERENCE);

    let profile = [
        ("Goal", goal.clone()),
        ("Gender", field(answers, ids::GENDER)),
        ("Age", field(answers, ids::AGE)),
        ("Height", format!("{}cm", field(answers, ids::HEIGHT))),
        ("Current Weight", format!("{}kg", current_weight)),
        ("Target Weight", format!("{}kg", target_weight)),
        ("Activity Level", field(answers, ids::ACTIVITY)),
        ("Dietary Preference", diet.clone()),
        ("Allergies", allergies.clone()),
        ("Cooking Time", format!("{} per day", cooking_time)),
        ("Meal Prep", field(answers, ids::MEAL_PREP)),
    ]
    .iter()
    .map(|(name, value)| format!("- {}: {}", name, value))
    .join("\n");

    format!(
        "Based on the following profile:
{profile}

Create a 7-day meal plan that:
1. Supports their {goal} journey from {current_weight}kg to {target_weight}kg
2. Can be prepared within their {cooking_time} time preference
3. Avoids any allergens ({allergies})
4. Includes meal prep suggestions if they selected 'yes'
5. Matches their {diet} dietary preference

Format each day exactly as:
{day_format}
",
        profile = profile,
        goal = goal,
        current_weight = current_weight,
        target_weight = target_weight,
        cooking_time = cooking_time,
        allergies = allergies,
        diet = diet,
        day_format = DAY_FORMAT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_answers() -> AnswerSet {
        let mut answers = AnswerSet::new();
        answers.insert("goal", "weight_loss");
        answers.insert("gender", "male");
        answers.insert("age", 30.0);
        answers.insert("height", 180.0);
        answers.insert("current_weight", 85.0);
        answers.insert("target_weight", 75.0);
        answers.insert("activity", "very_active");
        answers.insert("diet_preference", "omnivore");
        answers.insert("allergies", "none");
        answers.insert("cooking_time", "moderate");
        answers.insert("meal_prep", "yes");
        answers.insert("email", "jane@example.com");
        answers
    }

    #[test]
    fn prompt_describes_profile() {
        let prompt = personalized_prompt(&sample_answers());

        assert!(prompt.starts_with("Based on the following profile:\n- Goal: weight loss\n"));
        assert!(prompt.contains("- Height: 180cm\n"));
        assert!(prompt.contains("- Activity Level: very active\n"));
        assert!(prompt.contains("- Cooking Time: moderate per day\n"));
        assert!(prompt.contains("Supports their weight loss journey from 85kg to 75kg"));
        assert!(prompt.contains("Avoids any allergens (none)"));
        assert!(prompt.ends_with(&format!("{}\n", DAY_FORMAT)));
    }

    #[test]
    fn prompt_marks_missing_answers() {
        let mut answers = AnswerSet::new();
        answers.insert("goal", "energy");

        let prompt = personalized_prompt(&answers);
        assert!(prompt.contains("- Age: not specified\n"));
        assert!(prompt.contains("- Goal: energy\n"));
    }

    #[test]
    fn request_echoes_all_answers() {
        let answers = sample_answers();
        let request = PlanRequest::from_answers(&answers).unwrap();

        assert_eq!(request.email, "jane@example.com");
        assert_eq!(request.user_profile, answers);
        assert_eq!(request.prompt, personalized_prompt(&answers));
    }

    #[test]
    fn request_needs_email() {
        let answers: AnswerSet = sample_answers()
            .iter()
            .filter(|(k, _)| *k != "email")
            .map(|(k, v)| (k, v.clone()))
            .collect();

        assert_eq!(
            PlanRequest::from_answers(&answers),
            Err(MissingAnswer("email"))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn request_uses_camel_case_keys() {
        let request = PlanRequest::from_answers(&sample_answers()).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["email"], "jane@example.com");
        assert_eq!(json["userProfile"]["goal"], "weight_loss");
        assert_eq!(json["userProfile"]["age"], 30.0);
        assert!(json["prompt"].as_str().unwrap().contains("DAY [number]:"));
    }
}
