//! Markup for each dashboard region. Every function here is pure: view model
//! in, HTML fragment out.

use crate::models::{DietPlan, Exercise, PainAdaptation, Profile, Scalar, WorkoutPlan};
use crate::state::{ChatEntry, UiState};
use std::fmt::Write;

pub const NO_DIET_PLAN: &str = "<p>No diet plan for today. Generate a new plan!</p>";
pub const NO_WORKOUT_PLAN: &str = "<p>No workout plan for today. Generate a new plan!</p>";
pub const NO_ADAPTED_EXERCISES: &str = "<p>No exercises for today (Rest Day).</p>";
pub const TYPING_INDICATOR: &str = "Typing...";

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn scalar(value: &Option<Scalar>) -> String {
    value
        .as_ref()
        .map(|value| escape_html(&value.to_string()))
        .unwrap_or_default()
}

/// Fixed-point text with halves rounded away from zero.
pub fn to_fixed(value: f64, digits: u8) -> String {
    let factor = 10f64.powi(i32::from(digits));
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", usize::from(digits), rounded)
}

pub fn render_profile_summary(profile: &Profile) -> String {
    format!(
        "<strong>{}y, {}</strong> | Goal: {} | {} days/week",
        scalar(&profile.age),
        escape_html(profile.gender.as_deref().unwrap_or_default()),
        escape_html(
            &profile
                .fitness_goal
                .as_deref()
                .unwrap_or_default()
                .replacen('_', " ", 1)
        ),
        scalar(&profile.workout_days_per_week),
    )
}

pub fn render_diet_plan(plan: &DietPlan) -> String {
    let mut html = format!(
        r#"<div class="stats"><div class="stat-box"><h3>{}</h3><p>Cost (Rs.)</p></div></div>"#,
        to_fixed(plan.total_cost, 2)
    );

    for meal in &plan.meals {
        let _ = write!(
            html,
            concat!(
                r#"<div class="plan-item"><h4>{}</h4><p><strong>{}</strong></p>"#,
                "<p>Quantity: {}g | Calories: {} | Protein: {}g</p>",
                "<p>Cost: Rs.{}</p></div>"
            ),
            escape_html(meal.meal_type.as_deref().unwrap_or("Meal")),
            escape_html(&meal.food_name),
            meal.quantity_g,
            to_fixed(meal.calories, 0),
            to_fixed(meal.protein_g, 1),
            to_fixed(meal.cost, 2),
        );
    }

    html
}

pub fn render_workout_plan(workout: &WorkoutPlan) -> String {
    let plan = &workout.plan;
    let mut html = format!(
        "<p><strong>Split:</strong> {}</p>",
        escape_html(&plan.split_type)
    );

    for day in &plan.weekly_plan {
        let _ = write!(
            html,
            r#"<div class="workout-day"><h4>{}</h4>"#,
            escape_html(&day.day_name)
        );
        if day.exercises.is_empty() {
            html.push_str(r#"<p class="rest-day">Rest Day</p>"#);
        } else {
            for exercise in &day.exercises {
                html.push_str(&render_exercise(exercise, false));
            }
        }
        html.push_str("</div>");
    }

    html
}

fn render_exercise(exercise: &Exercise, with_instructions: bool) -> String {
    let mut html = format!(
        r#"<div class="exercise-item"><strong>{}</strong><span>{} sets × {} reps | Rest: {}s</span>"#,
        escape_html(&exercise.name),
        escape_html(&exercise.sets.to_string()),
        escape_html(&exercise.reps.to_string()),
        escape_html(&exercise.rest_seconds.to_string()),
    );
    if with_instructions {
        if let Some(instructions) = exercise.instructions.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(
                html,
                r#"<p class="instructions">{}</p>"#,
                escape_html(instructions)
            );
        }
    }
    html.push_str("</div>");
    html
}

pub fn render_pain_alert(adaptation: &PainAdaptation) -> String {
    format!(
        "<strong>Workout Adapted for {}</strong><p>Severity: {} | Medical Attention: {}</p><p>{}</p><p><em>{}</em></p>",
        escape_html(adaptation.affected_body_part.as_deref().unwrap_or("Pain")),
        scalar(&adaptation.severity),
        if adaptation.medical_attention_needed {
            "Yes"
        } else {
            "No"
        },
        escape_html(&adaptation.modification_summary),
        escape_html(&adaptation.immediate_action),
    )
}

pub fn render_adapted_exercises(exercises: &[Exercise]) -> String {
    if exercises.is_empty() {
        return NO_ADAPTED_EXERCISES.to_string();
    }
    exercises
        .iter()
        .map(|exercise| render_exercise(exercise, true))
        .collect()
}

pub fn render_chat_entry(entry: &ChatEntry) -> String {
    format!(
        r#"<div class="chat-message {}"><span>{}</span></div>"#,
        entry.sender.css_class(),
        escape_html(&entry.text)
    )
}

/// Whole dashboard body with every region filled from `state`.
pub fn render_dashboard(state: &UiState) -> String {
    let chat: String = state.chat.entries().iter().map(render_chat_entry).collect();
    let banner = state
        .banner
        .as_ref()
        .map(|banner| {
            format!(
                r#"<div class="message {}">{}</div>"#,
                banner.kind.css_class(),
                escape_html(&banner.text)
            )
        })
        .unwrap_or_default();

    DASHBOARD_HTML
        .replace("{{BANNER}}", &banner)
        .replace("{{PROFILE}}", &state.profile_info)
        .replace("{{DIET}}", &state.diet_plan)
        .replace("{{WORKOUT}}", &state.workout_plan)
        .replace("{{PAIN_ALERT}}", &state.pain_alert)
        .replace("{{ADAPTED}}", &state.adapted_exercises)
        .replace("{{CHAT}}", &chat)
}

const DASHBOARD_HTML: &str = r#"<main class="dashboard">
  {{BANNER}}
  <section id="profileInfo">{{PROFILE}}</section>
  <section id="dietPlan">{{DIET}}</section>
  <section id="workoutPlan">{{WORKOUT}}</section>
  <section id="painResult">
    <div id="painAlert">{{PAIN_ALERT}}</div>
    <div id="adaptedExercises">{{ADAPTED}}</div>
  </section>
  <section id="chatMessages">{{CHAT}}</section>
</main>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, WeeklyPlan, WorkoutDay};

    fn exercise(name: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            sets: Scalar::Int(3),
            reps: Scalar::Text("8-12".into()),
            rest_seconds: Scalar::Int(60),
            instructions: Some("Keep your back straight".into()),
        }
    }

    fn meal(food: &str, calories: f64, cost: f64) -> Meal {
        Meal {
            meal_type: None,
            food_name: food.to_string(),
            quantity_g: 150.0,
            calories,
            protein_g: 12.34,
            cost,
        }
    }

    #[test]
    fn diet_plan_has_one_row_per_meal_and_one_summary() {
        let plan = DietPlan {
            total_cost: 123.456,
            meals: vec![meal("Oats", 389.6, 20.0), meal("Dal", 120.2, 35.5), meal("Rice", 200.0, 10.0)],
        };
        let html = render_diet_plan(&plan);

        assert_eq!(html.matches(r#"class="plan-item""#).count(), 3);
        assert_eq!(html.matches(r#"class="stat-box""#).count(), 1);
        assert!(html.contains("<h3>123.46</h3>"));
        assert!(html.contains("Calories: 390 |"));
        assert!(html.contains("Protein: 12.3g"));
        assert!(html.contains("Cost: Rs.35.50"));
        assert!(html.contains("Quantity: 150g"));
        assert!(html.contains("<h4>Meal</h4>"));
    }

    #[test]
    fn diet_numbers_round_halves_up() {
        let plan = DietPlan {
            total_cost: 0.125,
            meals: vec![Meal {
                protein_g: 0.25,
                ..meal("Banana", 112.5, 2.5)
            }],
        };
        let html = render_diet_plan(&plan);

        assert!(html.contains("<h3>0.13</h3>"));
        assert!(html.contains("Calories: 113 |"));
        assert!(html.contains("Protein: 0.3g"));
        assert!(html.contains("Cost: Rs.2.50"));
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(-2.5, 0), "-3");
    }

    #[test]
    fn profile_summary_tolerates_missing_text() {
        let profile = Profile {
            age: Some(Scalar::Int(40)),
            workout_days_per_week: Some(Scalar::Int(3)),
            ..Profile::default()
        };
        assert_eq!(
            render_profile_summary(&profile),
            "<strong>40y, </strong> | Goal:  | 3 days/week"
        );

        let parsed: Profile = serde_json::from_value(serde_json::json!({
            "age": 40,
            "gender": null,
            "fitness_goal": null,
            "workout_days_per_week": 3
        }))
        .unwrap();
        assert_eq!(render_profile_summary(&parsed), render_profile_summary(&profile));
    }

    #[test]
    fn workout_plan_marks_empty_days_as_rest() {
        let plan = WorkoutPlan {
            plan: WeeklyPlan {
                split_type: "Upper/Lower".into(),
                weekly_plan: vec![
                    WorkoutDay {
                        day_name: "Monday".into(),
                        exercises: vec![exercise("Bench Press"), exercise("Row")],
                    },
                    WorkoutDay {
                        day_name: "Tuesday".into(),
                        exercises: vec![],
                    },
                ],
            },
        };
        let html = render_workout_plan(&plan);

        assert!(html.starts_with("<p><strong>Split:</strong> Upper/Lower</p>"));
        assert_eq!(html.matches(r#"class="workout-day""#).count(), 2);
        assert_eq!(html.matches(r#"class="exercise-item""#).count(), 2);
        assert_eq!(html.matches("Rest Day").count(), 1);
        assert!(html.contains("3 sets × 8-12 reps | Rest: 60s"));
        assert!(!html.contains("Keep your back straight"));
    }

    #[test]
    fn pain_alert_defaults_and_flags() {
        let adaptation = PainAdaptation {
            severity: Some(Scalar::Text("moderate".into())),
            medical_attention_needed: true,
            modification_summary: "Removed squats".into(),
            immediate_action: "Ice the knee".into(),
            ..PainAdaptation::default()
        };
        let html = render_pain_alert(&adaptation);
        assert!(html.contains("Workout Adapted for Pain"));
        assert!(html.contains("Severity: moderate | Medical Attention: Yes"));
        assert!(html.contains("<em>Ice the knee</em>"));
    }

    #[test]
    fn adapted_exercises_show_instructions_or_rest_day() {
        assert_eq!(render_adapted_exercises(&[]), NO_ADAPTED_EXERCISES);
        let html = render_adapted_exercises(&[exercise("Plank")]);
        assert!(html.contains("Keep your back straight"));
    }

    #[test]
    fn profile_summary_replaces_first_underscore() {
        let profile = Profile {
            age: Some(Scalar::Int(28)),
            gender: Some("male".into()),
            fitness_goal: Some("muscle_gain_fast".into()),
            workout_days_per_week: Some(Scalar::Int(5)),
            ..Profile::default()
        };
        assert_eq!(
            render_profile_summary(&profile),
            "<strong>28y, male</strong> | Goal: muscle gain_fast | 5 days/week"
        );
    }

    #[test]
    fn interpolated_text_is_escaped() {
        assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }
}
