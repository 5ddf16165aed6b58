use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: LoginUser,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub id: i64,
}

/// Body of `POST /api/profile`. Fields that failed numeric coercion go out as
/// `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfilePayload {
    pub user_id: i64,
    pub age: Option<i64>,
    pub gender: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub fitness_goal: String,
    pub experience_level: String,
    pub workout_days_per_week: Option<i64>,
    pub workout_time_minutes: Option<i64>,
    pub diet_type: String,
    pub monthly_budget: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Profile {
    pub age: Option<Scalar>,
    pub gender: Option<String>,
    pub fitness_goal: Option<String>,
    pub workout_days_per_week: Option<Scalar>,
    pub experience_level: Option<String>,
    pub diet_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TodayPlanResponse {
    #[serde(default)]
    pub success: bool,
    pub diet_plan: Option<DietPlan>,
    pub workout_plan: Option<WorkoutPlan>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DietPlan {
    pub total_cost: f64,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meal {
    pub meal_type: Option<String>,
    pub food_name: String,
    pub quantity_g: f64,
    pub calories: f64,
    pub protein_g: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutPlan {
    pub plan: WeeklyPlan,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyPlan {
    pub split_type: String,
    #[serde(default)]
    pub weekly_plan: Vec<WorkoutDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutDay {
    pub day_name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: Scalar,
    pub reps: Scalar,
    pub rest_seconds: Scalar,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PainRequest<'a> {
    pub pain_text: &'a str,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PainAdaptation {
    pub affected_body_part: Option<String>,
    pub severity: Option<Scalar>,
    pub medical_attention_needed: bool,
    pub modification_summary: String,
    pub immediate_action: String,
    pub modified_workout: Vec<Exercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub user: String,
    pub bot: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub history: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub workout_modified: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// A JSON number or string shown verbatim, e.g. reps as `10` or `"8-12"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercise_accepts_numeric_and_text_reps() {
        let exercise: Exercise = serde_json::from_value(serde_json::json!({
            "name": "Squat",
            "sets": 3,
            "reps": "8-12",
            "rest_seconds": 90
        }))
        .unwrap();
        assert_eq!(exercise.sets.to_string(), "3");
        assert_eq!(exercise.reps.to_string(), "8-12");
        assert!(exercise.instructions.is_none());
    }

    #[test]
    fn today_plan_without_success_flag_is_unsuccessful() {
        let response: TodayPlanResponse =
            serde_json::from_value(serde_json::json!({ "error": "No plan" })).unwrap();
        assert!(!response.success);
        assert!(response.diet_plan.is_none());
    }
}
