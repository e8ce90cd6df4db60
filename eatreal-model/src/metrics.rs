use std::fmt;

use crate::answer::AnswerSet;
use crate::profile::{ActivityLevel, Body, Gender, Goal};

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.9 {
            BmiCategory::Healthy
        } else if bmi < 29.9 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Healthy => "Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        write!(f, "{}", label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

impl Bmi {
    pub fn new(weight_kg: f64, height_m: f64) -> Self {
        let value = body_mass_index(weight_kg, height_m);
        Self {
            value,
            category: BmiCategory::from_bmi(value),
        }
    }
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ({})", self.value, self.category)
    }
}

pub fn body_mass_index(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / height_m.powf(2.0)
}

/// Harris-Benedict basal metabolic rate in kcal per day.
pub fn basal_metabolic_rate(gender: Gender, weight_kg: f64, height_cm: f64, age: f64) -> f64 {
    match gender {
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
    }
}

pub fn daily_calories(bmr: f64, activity: ActivityLevel) -> u32 {
    (bmr * activity.multiplier()).round() as u32
}

/// Share of daily calories per macronutrient, in percent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MacroSplit {
    pub protein: u8,
    pub carbs: u8,
    pub fat: u8,
}

impl MacroSplit {
    /// Only weight loss and muscle gain have a fixed split. The other goals
    /// get no macro targets.
    pub fn for_goal(goal: Goal) -> Option<Self> {
        let (protein, carbs, fat) = match goal {
            Goal::WeightLoss => (40, 30, 30),
            Goal::MuscleGain => (35, 45, 20),
            Goal::Health | Goal::Energy => return None,
        };
        Some(Self {
            protein,
            carbs,
            fat,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Macros {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl Macros {
    /// Each nutrient is rounded on its own, so the grams need not add back up
    /// to exactly `calories`.
    pub fn new(calories: u32, split: MacroSplit) -> Self {
        let grams = |percent: u8, kcal_per_gram: f64| {
            (calories as f64 * percent as f64 / 100.0 / kcal_per_gram).round() as u32
        };
        Self {
            protein_g: grams(split.protein, KCAL_PER_GRAM_PROTEIN),
            carbs_g: grams(split.carbs, KCAL_PER_GRAM_CARBS),
            fat_g: grams(split.fat, KCAL_PER_GRAM_FAT),
        }
    }
}

/// Figures shown while the questionnaire is filled in. Each one is present
/// once every answer it depends on has been given.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DerivedMetrics {
    pub current_bmi: Option<Bmi>,
    pub target_bmi: Option<Bmi>,
    pub bmr: Option<f64>,
    pub calories: Option<u32>,
    pub macros: Option<Macros>,
}

impl DerivedMetrics {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        Self::from_body(&Body::from_answers(answers))
    }

    pub fn from_body(body: &Body) -> Self {
        let height_m = body.height_m();
        let current_bmi = body
            .current_weight_kg
            .zip(height_m)
            .map(|(w, h)| Bmi::new(w, h));
        let target_bmi = body
            .target_weight_kg
            .zip(height_m)
            .map(|(w, h)| Bmi::new(w, h));

        let bmr = match (body.gender, body.current_weight_kg, body.height_cm, body.age) {
            (Some(gender), Some(weight), Some(height), Some(age)) => {
                Some(basal_metabolic_rate(gender, weight, height, age))
            }
            _ => None,
        };
        let calories = bmr
            .zip(body.activity)
            .map(|(bmr, activity)| daily_calories(bmr, activity));
        let macros = calories
            .zip(body.goal.and_then(MacroSplit::for_goal))
            .map(|(calories, split)| Macros::new(calories, split));

        Self {
            current_bmi,
            target_bmi,
            bmr,
            calories,
            macros,
        }
    }
}
