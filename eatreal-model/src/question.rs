use std::{ops::RangeInclusive, sync::OnceLock};

use regex::Regex;

use crate::answer::AnswerValue;

/// Question identifiers, also used as keys of the submitted profile.
pub mod ids {
    pub const GOAL: &str = "goal";
    pub const GENDER: &str = "gender";
    pub const AGE: &str = "age";
    pub const HEIGHT: &str = "height";
    pub const CURRENT_WEIGHT: &str = "current_weight";
    pub const TARGET_WEIGHT: &str = "target_weight";
    pub const ACTIVITY: &str = "activity";
    pub const DIET_PREFERENCE: &str = "diet_preference";
    pub const ALLERGIES: &str = "allergies";
    pub const COOKING_TIME: &str = "cooking_time";
    pub const MEAL_PREP: &str = "meal_prep";
    pub const EMAIL: &str = "email";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuestionKind {
    Choice {
        options: &'static [ChoiceOption],
    },
    Numeric {
        range: RangeInclusive<f64>,
        unit: &'static str,
    },
    Email {
        length: RangeInclusive<usize>,
    },
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("please enter a value")]
    Empty,
    #[error("\"{0}\" is not one of the options")]
    UnknownOption(String),
    #[error("\"{0}\" is not a number")]
    NotANumber(String),
    #[error("value must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
    #[error("please enter a valid email address")]
    InvalidEmail,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: QuestionKind,
}

impl QuestionDefinition {
    /// Checks a raw answer and returns the value to store for it.
    ///
    /// Choice answers may be given by option value (case-insensitive) or by
    /// 1-based option number, and are stored as the option value. Numeric
    /// bounds are inclusive.
    pub fn validate(&self, raw: &str) -> Result<AnswerValue, Rejection> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Rejection::Empty);
        }

        match &self.kind {
            QuestionKind::Choice { options } => options
                .iter()
                .enumerate()
                .find(|(i, o)| {
                    o.value.eq_ignore_ascii_case(raw) || raw.parse::<usize>() == Ok(i + 1)
                })
                .map(|(_, o)| AnswerValue::from(o.value))
                .ok_or_else(|| Rejection::UnknownOption(raw.to_owned())),
            QuestionKind::Numeric { range, .. } => {
                let value: f64 = raw
                    .parse()
                    .ok()
                    .filter(|x: &f64| x.is_finite())
                    .ok_or_else(|| Rejection::NotANumber(raw.to_owned()))?;
                if range.contains(&value) {
                    Ok(AnswerValue::Number(value))
                } else {
                    Err(Rejection::OutOfRange {
                        min: *range.start(),
                        max: *range.end(),
                    })
                }
            }
            QuestionKind::Email { length } => {
                if length.contains(&raw.len()) && is_email(raw) {
                    Ok(AnswerValue::from(raw))
                } else {
                    Err(Rejection::InvalidEmail)
                }
            }
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            QuestionKind::Choice { options } => *options,
            _ => &[],
        }
    }

    /// Label shown for a stored value, falling back to the value itself.
    pub fn label_for(&self, value: &AnswerValue) -> String {
        match (&self.kind, value) {
            (QuestionKind::Choice { options }, AnswerValue::Text(v)) => options
                .iter()
                .find(|o| o.value == v.as_str())
                .map(|o| o.label.to_owned())
                .unwrap_or_else(|| v.clone()),
            (QuestionKind::Numeric { unit, .. }, v) => format!("{}{}", v, unit),
            (_, v) => v.to_string(),
        }
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn is_email(s: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(s))
}

const GOALS: &[ChoiceOption] = &[
    option("weight_loss", "I want to lose weight"),
    option("muscle_gain", "I want to build muscle"),
    option("health", "I want to eat healthier"),
    option("energy", "I want more energy"),
];

const GENDERS: &[ChoiceOption] = &[option("male", "Male"), option("female", "Female")];

const ACTIVITY_LEVELS: &[ChoiceOption] = &[
    option("sedentary", "Mostly sitting"),
    option("light", "Light exercise 1-3 times/week"),
    option("moderate", "Active 3-5 times/week"),
    option("very_active", "Very active (almost daily)"),
];

const DIET_PREFERENCES: &[ChoiceOption] = &[
    option("omnivore", "I eat everything"),
    option("vegetarian", "Vegetarian"),
    option("vegan", "Vegan"),
    option("pescatarian", "Pescatarian"),
    option("animal_based", "Animal Based"),
];

const ALLERGIES: &[ChoiceOption] = &[
    option("none", "No allergies"),
    option("nuts", "Nuts"),
    option("dairy", "Dairy"),
    option("gluten", "Gluten"),
];

const COOKING_TIMES: &[ChoiceOption] = &[
    option("minimal", "30 mins or less"),
    option("moderate", "1 hour"),
    option("flexible", "1+ hours"),
];

const MEAL_PREP: &[ChoiceOption] = &[
    option("yes", "Yes, I want to prep meals"),
    option("no", "No, I prefer cooking daily"),
];

/// The questionnaire, in the order it is asked.
pub fn catalog() -> Vec<QuestionDefinition> {
    vec![
        QuestionDefinition {
            id: ids::GOAL,
            title: "What brings you here today?",
            kind: QuestionKind::Choice { options: GOALS },
        },
        QuestionDefinition {
            id: ids::GENDER,
            title: "What is your biological sex?",
            kind: QuestionKind::Choice { options: GENDERS },
        },
        QuestionDefinition {
            id: ids::AGE,
            title: "How old are you?",
            kind: QuestionKind::Numeric {
                range: 16.0..=100.0,
                unit: " years",
            },
        },
        QuestionDefinition {
            id: ids::HEIGHT,
            title: "How tall are you? (cm)",
            kind: QuestionKind::Numeric {
                range: 140.0..=220.0,
                unit: "cm",
            },
        },
        QuestionDefinition {
            id: ids::CURRENT_WEIGHT,
            title: "What is your current weight?",
            kind: QuestionKind::Numeric {
                range: 30.0..=250.0,
                unit: "kg",
            },
        },
        QuestionDefinition {
            id: ids::TARGET_WEIGHT,
            title: "What is your target weight?",
            kind: QuestionKind::Numeric {
                range: 30.0..=250.0,
                unit: "kg",
            },
        },
        QuestionDefinition {
            id: ids::ACTIVITY,
            title: "How active are you?",
            kind: QuestionKind::Choice {
                options: ACTIVITY_LEVELS,
            },
        },
        QuestionDefinition {
            id: ids::DIET_PREFERENCE,
            title: "Any dietary preferences?",
            kind: QuestionKind::Choice {
                options: DIET_PREFERENCES,
            },
        },
        QuestionDefinition {
            id: ids::ALLERGIES,
            title: "Any food allergies?",
            kind: QuestionKind::Choice { options: ALLERGIES },
        },
        QuestionDefinition {
            id: ids::COOKING_TIME,
            title: "How much time can you spend cooking a day?",
            kind: QuestionKind::Choice {
                options: COOKING_TIMES,
            },
        },
        QuestionDefinition {
            id: ids::MEAL_PREP,
            title: "Are you interested in meal prepping?",
            kind: QuestionKind::Choice { options: MEAL_PREP },
        },
        QuestionDefinition {
            id: ids::EMAIL,
            title: "Where should we send your plan?",
            kind: QuestionKind::Email { length: 3..=254 },
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn question(id: &str) -> QuestionDefinition {
        catalog().into_iter().find(|q| q.id == id).unwrap()
    }

    #[test]
    fn catalog_ids_are_unique() {
        let questions = catalog();
        let unique: HashSet<_> = questions.iter().map(|q| q.id).collect();
        assert_eq!(unique.len(), questions.len());
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let age = question(ids::AGE);
        let test_data = [
            ("15", false),
            ("16", true),
            ("55", true),
            ("100", true),
            ("101", false),
            ("15.99", false),
        ];

        for (i, (raw, accepted)) in test_data.into_iter().enumerate() {
            assert_eq!(age.validate(raw).is_ok(), accepted, "Test case #{}", i);
        }
    }

    #[test]
    fn every_numeric_question_rejects_values_just_outside_its_range() {
        for q in catalog() {
            let QuestionKind::Numeric { range, .. } = &q.kind else {
                continue;
            };
            let (min, max) = (*range.start(), *range.end());
            assert!(q.validate(&min.to_string()).is_ok(), "{} min", q.id);
            assert!(q.validate(&max.to_string()).is_ok(), "{} max", q.id);
            assert_eq!(
                q.validate(&(min - 1.0).to_string()),
                Err(Rejection::OutOfRange { min, max }),
                "{} below",
                q.id
            );
            assert_eq!(
                q.validate(&(max + 1.0).to_string()),
                Err(Rejection::OutOfRange { min, max }),
                "{} above",
                q.id
            );
        }
    }

    #[test]
    fn body_measurement_ranges() {
        let test_data = [
            (ids::HEIGHT, "139", false),
            (ids::HEIGHT, "140", true),
            (ids::HEIGHT, "220", true),
            (ids::HEIGHT, "221", false),
            (ids::CURRENT_WEIGHT, "29.9", false),
            (ids::CURRENT_WEIGHT, "30", true),
            (ids::CURRENT_WEIGHT, "250", true),
            (ids::TARGET_WEIGHT, "30", true),
            (ids::TARGET_WEIGHT, "250.5", false),
        ];

        for (i, (id, raw, accepted)) in test_data.into_iter().enumerate() {
            assert_eq!(question(id).validate(raw).is_ok(), accepted, "Test case #{}", i);
        }
    }

    #[test]
    fn choice_option_values() {
        let values = |id| {
            question(id)
                .options()
                .iter()
                .map(|o| o.value)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            values(ids::GOAL),
            ["weight_loss", "muscle_gain", "health", "energy"]
        );
        assert_eq!(
            values(ids::DIET_PREFERENCE),
            ["omnivore", "vegetarian", "vegan", "pescatarian", "animal_based"]
        );
        assert_eq!(values(ids::ALLERGIES), ["none", "nuts", "dairy", "gluten"]);
        assert_eq!(values(ids::COOKING_TIME), ["minimal", "moderate", "flexible"]);
        assert_eq!(
            question(ids::GOAL).validate("Energy"),
            Ok(AnswerValue::from("energy"))
        );
        assert!(question(ids::GOAL).validate("maintenance").is_err());
    }

    #[test]
    fn numeric_rejects_garbage() {
        let height = question(ids::HEIGHT);
        assert_eq!(
            height.validate("tall"),
            Err(Rejection::NotANumber("tall".to_owned()))
        );
        assert_eq!(height.validate("NaN"), Err(Rejection::NotANumber("NaN".to_owned())));
        assert_eq!(height.validate("  "), Err(Rejection::Empty));
        assert_eq!(height.validate(" 175 "), Ok(AnswerValue::Number(175.0)));
    }

    #[test]
    fn choice_accepts_value_or_number() {
        let activity = question(ids::ACTIVITY);
        assert_eq!(
            activity.validate("Very_Active"),
            Ok(AnswerValue::from("very_active"))
        );
        assert_eq!(activity.validate("3"), Ok(AnswerValue::from("moderate")));
        assert_eq!(
            activity.validate("5"),
            Err(Rejection::UnknownOption("5".to_owned()))
        );
        assert_eq!(
            activity.validate("0"),
            Err(Rejection::UnknownOption("0".to_owned()))
        );
    }

    #[test]
    fn email_validation() {
        let email = question(ids::EMAIL);
        let test_data = [
            ("jane@example.com", true),
            ("j.doe+plan@mail.example.org", true),
            ("jane@example", false),
            ("@example.com", false),
            ("jane@@example.com", false),
            ("jane@example..com", true),
            ("a@b..c", true),
            ("jane@.com", false),
            ("jane@example.", false),
            ("ja ne@example.com", false),
            ("jane.example.com", false),
        ];

        for (i, (raw, accepted)) in test_data.into_iter().enumerate() {
            assert_eq!(email.validate(raw).is_ok(), accepted, "Test case #{}", i);
        }
        assert_eq!(
            email.validate(&format!("{}@example.com", "a".repeat(250))),
            Err(Rejection::InvalidEmail)
        );
    }

    #[test]
    fn labels_for_stored_values() {
        assert_eq!(
            question(ids::GOAL).label_for(&AnswerValue::from("muscle_gain")),
            "I want to build muscle"
        );
        assert_eq!(
            question(ids::HEIGHT).label_for(&AnswerValue::Number(180.0)),
            "180cm"
        );
        assert_eq!(
            question(ids::EMAIL).label_for(&AnswerValue::from("a@b.co")),
            "a@b.co"
        );
    }
}
