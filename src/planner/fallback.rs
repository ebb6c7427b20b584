//! Deterministic baseline plan built from profile data alone.
//!
//! Nothing in here performs I/O, so the baseline is always available even when
//! every external collaborator is down.

use std::collections::HashSet;

use crate::models::mood::MoodSnapshot;
use crate::models::plan::{
    Intensity, LifestylePlan, MacroSplit, MealType, NutritionMeal, NutritionPlan, PlanDay,
    PlanExercise, PlanSections, PlanSession, RecoveryBlock, SleepPlan, WorkoutPlan, WEEK_DAYS,
};
use crate::models::profile::{contains_any, explicit, GoalKind, UserProfile};
use crate::planner::foods::{menu_for, MealTemplate};
use crate::planner::library::{
    normalize_equipment, ExerciseTemplate, EXERCISE_LIBRARY, PLACEHOLDER_NAME, PLACEHOLDER_REPS,
    PLACEHOLDER_SETS, PLACEHOLDER_TEMPO,
};
use crate::planner::mood::MoodModifier;

/// Every session carries at least this many exercises.
pub const MIN_SESSION_EXERCISES: usize = 3;

pub const CALORIE_FLOOR: i32 = 1500;
pub const DEFAULT_WEIGHT_KG: f64 = 72.0;
pub const DEFAULT_HEIGHT_CM: f64 = 172.0;
pub const DEFAULT_AGE: i32 = 30;
pub const DEFAULT_HYDRATION_ML: i32 = 2900;
pub const DEFAULT_SLEEP_HOURS: f64 = 7.5;

// ============================================================================
// Exercise selection
// ============================================================================

pub fn choose_exercises(focus: &str, profile: &UserProfile, target: usize) -> Vec<PlanExercise> {
    let equipment = normalize_equipment(&profile.equipment);
    let level = profile.experience();

    let mut picked: Vec<&ExerciseTemplate> = EXERCISE_LIBRARY
        .iter()
        .filter(|t| t.has_focus(focus) && t.suits(level) && t.usable_with(&equipment))
        .take(target)
        .collect();

    if picked.len() < target {
        picked.extend(
            EXERCISE_LIBRARY
                .iter()
                .filter(|t| t.has_focus(focus) && t.is_bodyweight()),
        );
    }

    let mut seen = HashSet::new();
    let mut exercises: Vec<PlanExercise> = picked
        .into_iter()
        .filter(|t| seen.insert(t.name))
        .take(target)
        .map(from_template)
        .collect();

    while exercises.len() < target {
        exercises.push(placeholder_exercise());
    }
    exercises
}

fn from_template(template: &ExerciseTemplate) -> PlanExercise {
    PlanExercise {
        name: template.name.to_string(),
        sets: Some(template.sets),
        reps: Some(template.reps.to_string()),
        tempo: template.tempo.map(String::from),
        rest_seconds: template.rest_seconds,
        notes: template.notes.map(String::from),
    }
}

pub fn placeholder_exercise() -> PlanExercise {
    PlanExercise {
        name: PLACEHOLDER_NAME.to_string(),
        sets: Some(PLACEHOLDER_SETS),
        reps: Some(PLACEHOLDER_REPS.to_string()),
        tempo: Some(PLACEHOLDER_TEMPO.to_string()),
        rest_seconds: Some(30),
        notes: Some("Flow through hips, spine and shoulders without pausing.".into()),
    }
}

// ============================================================================
// Weekly schedule
// ============================================================================

/// How a session's intensity is derived.
#[derive(Debug, Clone, Copy)]
enum Role {
    /// Goal-driven base intensity, shifted by the mood modifier.
    Primary,
    /// Moderate work that eases off with low mood but never ramps up.
    Support,
    /// Always moderate.
    Steady,
    /// Always low.
    Restorative,
}

struct SessionTemplate {
    name: &'static str,
    focus: &'static str,
    modality: &'static str,
    duration_minutes: u32,
    role: Role,
    exercise_count: usize,
    guidance: &'static str,
}

struct DayTemplate {
    emphasis: &'static str,
    sessions: &'static [SessionTemplate],
    recovery: Option<(&'static str, u32, &'static str)>,
    mindset: Option<&'static str>,
}

static WEEK_TEMPLATE: [DayTemplate; 7] = [
    DayTemplate {
        emphasis: "Upper Strength & Power",
        sessions: &[
            SessionTemplate {
                name: "Upper Body Strength",
                focus: "upper_push",
                modality: "strength",
                duration_minutes: 50,
                role: Role::Primary,
                exercise_count: 4,
                guidance: "Drive each press with intent; leave one to two reps in reserve.",
            },
            SessionTemplate {
                name: "Pulling Accessory Circuit",
                focus: "upper_pull",
                modality: "strength",
                duration_minutes: 20,
                role: Role::Support,
                exercise_count: 3,
                guidance: "Control the lowering phase and squeeze shoulder blades at the top.",
            },
        ],
        recovery: None,
        mindset: Some("Start the week by owning the first rep."),
    },
    DayTemplate {
        emphasis: "Conditioning & Core",
        sessions: &[
            SessionTemplate {
                name: "Metabolic Conditioning",
                focus: "conditioning",
                modality: "conditioning",
                duration_minutes: 30,
                role: Role::Primary,
                exercise_count: 4,
                guidance: "Work in 40/20 intervals; keep form crisp as fatigue builds.",
            },
            SessionTemplate {
                name: "Core Stability",
                focus: "core",
                modality: "core",
                duration_minutes: 15,
                role: Role::Support,
                exercise_count: 3,
                guidance: "Brace as if bracing for a punch; breathe behind the brace.",
            },
        ],
        recovery: None,
        mindset: None,
    },
    DayTemplate {
        emphasis: "Active Recovery & Mobility",
        sessions: &[SessionTemplate {
            name: "Mobility Flow",
            focus: "mobility",
            modality: "mobility",
            duration_minutes: 30,
            role: Role::Restorative,
            exercise_count: 4,
            guidance: "Move slowly and breathe into end ranges; nothing should hurt.",
        }],
        recovery: Some(("Parasympathetic reset", 15, "Easy walk followed by box breathing.")),
        mindset: Some("Recovery is where the adaptation happens."),
    },
    DayTemplate {
        emphasis: "Lower Strength & Stability",
        sessions: &[
            SessionTemplate {
                name: "Lower Body Strength",
                focus: "lower",
                modality: "strength",
                duration_minutes: 50,
                role: Role::Primary,
                exercise_count: 4,
                guidance: "Own the bottom position before adding load.",
            },
            SessionTemplate {
                name: "Anti-Rotation Core",
                focus: "core",
                modality: "core",
                duration_minutes: 15,
                role: Role::Support,
                exercise_count: 3,
                guidance: "Resist movement; keep hips square throughout.",
            },
        ],
        recovery: None,
        mindset: None,
    },
    DayTemplate {
        emphasis: "Athletic Power & Conditioning",
        sessions: &[
            SessionTemplate {
                name: "Full Body Power",
                focus: "full_body",
                modality: "strength",
                duration_minutes: 40,
                role: Role::Primary,
                exercise_count: 4,
                guidance: "Move fast on the concentric; rest fully between power sets.",
            },
            SessionTemplate {
                name: "Interval Finisher",
                focus: "conditioning",
                modality: "conditioning",
                duration_minutes: 15,
                role: Role::Support,
                exercise_count: 3,
                guidance: "Short, sharp efforts; stop the set when speed drops.",
            },
        ],
        recovery: None,
        mindset: Some("Finish the week stronger than you started it."),
    },
    DayTemplate {
        emphasis: "Endurance & Play",
        sessions: &[SessionTemplate {
            name: "Aerobic Base Builder",
            focus: "endurance",
            modality: "endurance",
            duration_minutes: 45,
            role: Role::Steady,
            exercise_count: 3,
            guidance: "Stay conversational; nasal breathing is a good ceiling.",
        }],
        recovery: Some(("Lower body flush", 10, "Legs up the wall and light foam rolling.")),
        mindset: None,
    },
    DayTemplate {
        emphasis: "Full Recovery Ritual",
        sessions: &[SessionTemplate {
            name: "Restorative Mobility",
            focus: "mobility",
            modality: "mobility",
            duration_minutes: 25,
            role: Role::Restorative,
            exercise_count: 3,
            guidance: "Gentle range of motion only; leave feeling better than you arrived.",
        }],
        recovery: Some(("Full recovery", 30, "Sauna, bath or a long walk outdoors.")),
        mindset: Some("Reflect on one win from this week and plan the next."),
    },
];

pub fn base_intensity(profile: &UserProfile) -> Intensity {
    if profile.is_cutting() {
        Intensity::Moderate
    } else {
        Intensity::High
    }
}

fn session_intensity(role: Role, base: Intensity, modifier: MoodModifier) -> Intensity {
    match (role, modifier) {
        (Role::Primary, MoodModifier::Ease) => base.step_down(),
        (Role::Primary, MoodModifier::Amplify) => base.step_up(),
        (Role::Primary, MoodModifier::Neutral) => base,
        (Role::Support, MoodModifier::Ease) => Intensity::Low,
        (Role::Support, _) | (Role::Steady, _) => Intensity::Moderate,
        (Role::Restorative, _) => Intensity::Low,
    }
}

pub fn focus_summary(profile: &UserProfile) -> String {
    let goal = profile.goal_text();
    if contains_any(&goal, &["muscle", "build"]) {
        "Lean mass acceleration: progressive strength blocks with enough volume to grow and enough recovery to adapt.".into()
    } else if contains_any(&goal, &["weight", "fat"]) {
        "Metabolic conditioning stack: strength to keep muscle, intervals to raise output, and daily movement to drive the deficit.".into()
    } else {
        "Hybrid performance week: balanced strength, conditioning and mobility to build a resilient, capable body.".into()
    }
}

pub fn build_workout_plan(profile: &UserProfile, modifier: MoodModifier) -> WorkoutPlan {
    let base = base_intensity(profile);

    let schedule = WEEK_DAYS
        .iter()
        .zip(WEEK_TEMPLATE.iter())
        .map(|(day, template)| PlanDay {
            day: day.to_string(),
            emphasis: template.emphasis.to_string(),
            sessions: template
                .sessions
                .iter()
                .map(|s| PlanSession {
                    name: s.name.to_string(),
                    focus: s.focus.to_string(),
                    duration_minutes: s.duration_minutes,
                    intensity: session_intensity(s.role, base, modifier),
                    modality: s.modality.to_string(),
                    guidance: s.guidance.to_string(),
                    exercises: choose_exercises(
                        s.focus,
                        profile,
                        s.exercise_count.max(MIN_SESSION_EXERCISES),
                    ),
                })
                .collect(),
            recovery: template.recovery.map(|(focus, minutes, notes)| RecoveryBlock {
                focus: focus.to_string(),
                duration_minutes: minutes,
                notes: notes.to_string(),
            }),
            mindset: template.mindset.map(String::from),
        })
        .collect();

    WorkoutPlan {
        focus_summary: focus_summary(profile),
        schedule,
    }
}

// ============================================================================
// Energy and macros
// ============================================================================

/// Mifflin-St Jeor BMR scaled by activity, adjusted for the goal.
pub fn compute_calorie_target(profile: &UserProfile) -> i32 {
    if let Some(target) = explicit(profile.daily_calorie_target) {
        return target;
    }

    let weight = explicit(profile.weight_kg).unwrap_or(DEFAULT_WEIGHT_KG);
    let height = explicit(profile.height_cm).unwrap_or(DEFAULT_HEIGHT_CM);
    let age = explicit(profile.age).unwrap_or(DEFAULT_AGE) as f64;

    let offset = if profile.is_female() { -161.0 } else { 5.0 };
    let bmr = 10.0 * weight + 6.25 * height - 5.0 * age + offset;
    let tdee = bmr * profile.activity_factor();

    let adjusted = match profile.goal_kind() {
        GoalKind::Gain => tdee + 250.0,
        GoalKind::Lose => tdee - 350.0,
        GoalKind::Endurance | GoalKind::General => tdee,
    };

    (adjusted.max(CALORIE_FLOOR as f64)).round() as i32
}

/// Protein / carbs / fat percentages of total calories.
pub fn macro_percentages(kind: GoalKind) -> (f64, f64, f64) {
    match kind {
        GoalKind::Gain => (0.32, 0.43, 0.25),
        GoalKind::Lose => (0.34, 0.33, 0.33),
        GoalKind::Endurance => (0.26, 0.50, 0.24),
        GoalKind::General => (0.30, 0.40, 0.30),
    }
}

/// Explicit gram targets are kept as given; the other macros share the
/// remaining energy in their goal proportions.
pub fn compute_macro_split(profile: &UserProfile, calories: i32) -> MacroSplit {
    let (protein_pct, carbs_pct, fat_pct) = macro_percentages(profile.goal_kind());
    let protein = explicit(profile.protein_target_g);
    let carbs = explicit(profile.carbs_target_g);
    let fat = explicit(profile.fat_target_g);
    let calories = calories as f64;

    let fixed_kcal = (protein.unwrap_or(0) * 4 + carbs.unwrap_or(0) * 4 + fat.unwrap_or(0) * 9) as f64;
    let open_pct: f64 = [(protein, protein_pct), (carbs, carbs_pct), (fat, fat_pct)]
        .iter()
        .filter(|(grams, _)| grams.is_none())
        .map(|(_, pct)| pct)
        .sum();
    let scale = if fixed_kcal == 0.0 {
        1.0
    } else if open_pct > 0.0 && calories > 0.0 {
        (calories - fixed_kcal).max(0.0) / (calories * open_pct)
    } else {
        0.0
    };
    let grams = |pct: f64, kcal_per_gram: f64| (calories * pct * scale / kcal_per_gram).round() as i32;

    MacroSplit {
        protein: protein.unwrap_or_else(|| grams(protein_pct, 4.0)),
        carbs: carbs.unwrap_or_else(|| grams(carbs_pct, 4.0)),
        fat: fat.unwrap_or_else(|| grams(fat_pct, 9.0)),
    }
}

/// Daily energy and macro targets. Without an explicit calorie target, explicit
/// macros that overshoot the computed energy raise the target to match them.
pub fn nutrition_targets(profile: &UserProfile) -> (i32, MacroSplit) {
    let calories = compute_calorie_target(profile);
    let split = compute_macro_split(profile, calories);
    if explicit(profile.daily_calorie_target).is_none() && split.kcal() > calories + 9 {
        return (split.kcal(), split);
    }
    (calories, split)
}

pub fn hydration_target(profile: &UserProfile) -> i32 {
    explicit(profile.hydration_target_ml)
        .or_else(|| explicit(profile.weight_kg).map(|w| (w * 35.0).round() as i32))
        .unwrap_or(DEFAULT_HYDRATION_ML)
}

// ============================================================================
// Meals
// ============================================================================

const BREAKFAST_RATIO: f64 = 0.28;
const LUNCH_RATIO: f64 = 0.32;
const DINNER_RATIO: f64 = 0.30;
const SNACK_RATIO: f64 = 0.05;

const MIN_MACRO_GRAMS: f64 = 5.0;
const FAT_SCALE: f64 = 0.9;

fn scaled_meal(
    template: &MealTemplate,
    meal_type: MealType,
    ratio: f64,
    calories: i32,
    split: MacroSplit,
    fiber_ratio: f64,
    profile: &UserProfile,
) -> NutritionMeal {
    let protein = (split.protein as f64 * ratio).max(MIN_MACRO_GRAMS).round() as i32;
    let carbs = (split.carbs as f64 * ratio).max(MIN_MACRO_GRAMS).round() as i32;
    let fat = (split.fat as f64 * ratio * FAT_SCALE).max(MIN_MACRO_GRAMS * FAT_SCALE).round() as i32;

    let ingredients: Vec<String> = template.ingredients.iter().map(|i| i.to_string()).collect();
    let conflicts = conflicting_ingredients(&ingredients, profile);
    let swaps: Vec<String> = conflicts
        .iter()
        .map(|i| format!("Replace {} with a similar-macro alternative you tolerate", i))
        .collect();
    let notes = if conflicts.is_empty() {
        None
    } else {
        Some(format!("Contains {} from your avoid list.", conflicts.join(", ")))
    };

    NutritionMeal {
        name: template.name.to_string(),
        meal_type,
        calories: (calories as f64 * ratio).round() as i32,
        protein,
        carbs,
        fat,
        fiber: Some((carbs as f64 * fiber_ratio).round() as i32),
        ingredients,
        preparation: Some(template.preparation.to_string()),
        notes,
        swaps,
    }
}

/// Ingredients that mention an allergy or avoided food (case-insensitive).
fn conflicting_ingredients(ingredients: &[String], profile: &UserProfile) -> Vec<String> {
    let avoid: Vec<String> = profile
        .allergies
        .iter()
        .chain(profile.avoid_foods.iter())
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect();

    ingredients
        .iter()
        .filter(|i| {
            let i = i.to_lowercase();
            avoid.iter().any(|a| i.contains(a.as_str()))
        })
        .cloned()
        .collect()
}

pub fn build_nutrition_plan(profile: &UserProfile) -> NutritionPlan {
    let (calories, split) = nutrition_targets(profile);
    let menu = menu_for(profile.diet_style());

    let meals = vec![
        scaled_meal(&menu.breakfast, MealType::Breakfast, BREAKFAST_RATIO, calories, split, 0.18, profile),
        scaled_meal(&menu.lunch, MealType::Lunch, LUNCH_RATIO, calories, split, 0.18, profile),
        scaled_meal(&menu.dinner, MealType::Dinner, DINNER_RATIO, calories, split, 0.18, profile),
    ];
    let snacks = menu
        .snacks
        .iter()
        .map(|s| scaled_meal(s, MealType::Snack, SNACK_RATIO, calories, split, 0.12, profile))
        .collect();

    let mut guidance: Vec<String> = menu.guidance.iter().map(|g| g.to_string()).collect();
    guidance.push(format!(
        "Target roughly {} kcal with {} g protein spread evenly across meals.",
        calories, split.protein
    ));
    if !profile.dietary_restrictions.is_empty() {
        guidance.push(format!(
            "Respect your restrictions: {}.",
            profile.dietary_restrictions.join(", ")
        ));
    }
    if !profile.favorite_foods.is_empty() {
        guidance.push(format!(
            "Work favorites like {} into snacks to keep the plan enjoyable.",
            profile.favorite_foods.join(", ")
        ));
    }

    NutritionPlan {
        calories_target: calories,
        macro_split: split,
        hydration_ml: hydration_target(profile),
        meals,
        snacks,
        supplements: menu.supplements.iter().map(|s| s.to_string()).collect(),
        guidance,
    }
}

// ============================================================================
// Lifestyle
// ============================================================================

pub fn build_lifestyle_plan(profile: &UserProfile, mood: Option<&MoodSnapshot>) -> LifestylePlan {
    let mut wind_down_rituals = vec![
        "Lights down and screens away 45 minutes before bed".to_string(),
        "Five minutes of slow nasal breathing".to_string(),
        "Write tomorrow's top three priorities".to_string(),
    ];
    if !profile.sleep_challenges.is_empty() {
        wind_down_rituals.push("Keep the bedroom cool (18-19C) and fully dark".into());
        wind_down_rituals.push("Same wake time every day, weekends included".into());
    }

    let mut mood_support = vec![
        "Ten minutes of daylight within an hour of waking".to_string(),
        "Daily check-in: rate energy, stress and motivation".to_string(),
    ];
    let mut recovery_focus = vec![
        "Hit your protein target on training days".to_string(),
        "Walk 7,000+ steps on rest days".to_string(),
    ];
    let mut micro_habits = vec![
        "Drink a full glass of water after waking".to_string(),
        "Two-minute mobility snack after long sitting blocks".to_string(),
    ];

    for injury in &profile.injuries {
        recovery_focus.push(format!("Protect your {}: warm it up first and skip painful ranges", injury));
    }

    if let Some(mood) = mood {
        if mood.has_tag("creative") {
            micro_habits.push("Playful movement break: dance, climb or explore for ten minutes".into());
        }
        if mood.has_tag("anxious") {
            mood_support.push("Physiological sigh: two inhales, one long exhale, three rounds".into());
        }
        if mood.has_tag("lonely") || mood.has_tag("social") {
            mood_support.push("Schedule one workout or walk with a friend this week".into());
        }
        if mood.energy_is("low") {
            recovery_focus.push("Prioritize a 20-minute afternoon rest if sleep was short".into());
        }
    }

    LifestylePlan {
        sleep: SleepPlan {
            target_hours: explicit(profile.sleep_target_hours).unwrap_or(DEFAULT_SLEEP_HOURS),
            wind_down_rituals,
        },
        mood_support,
        recovery_focus,
        micro_habits,
    }
}

pub fn generate_fallback_plan(profile: &UserProfile, mood: Option<&MoodSnapshot>) -> PlanSections {
    PlanSections {
        workout_plan: build_workout_plan(profile, MoodModifier::from_snapshot(mood)),
        nutrition_plan: build_nutrition_plan(profile),
        lifestyle_plan: build_lifestyle_plan(profile, mood),
    }
}

/// Brings every session up to [`MIN_SESSION_EXERCISES`] from the local library.
///
/// Runs after remote enrichment so externally supplied sessions keep the
/// same guarantee as generated ones.
pub fn top_up_sessions(plan: &WorkoutPlan, profile: &UserProfile) -> WorkoutPlan {
    let schedule = plan
        .schedule
        .iter()
        .map(|day| PlanDay {
            sessions: day.sessions.iter().map(|s| top_up_session(s, profile)).collect(),
            ..day.clone()
        })
        .collect();

    WorkoutPlan {
        focus_summary: plan.focus_summary.clone(),
        schedule,
    }
}

fn top_up_session(session: &PlanSession, profile: &UserProfile) -> PlanSession {
    if session.exercises.len() >= MIN_SESSION_EXERCISES {
        return session.clone();
    }

    let mut exercises = session.exercises.clone();
    let candidates = choose_exercises(&session.focus, profile, MIN_SESSION_EXERCISES + exercises.len());
    for candidate in candidates {
        if exercises.len() >= MIN_SESSION_EXERCISES {
            break;
        }
        if !exercises.iter().any(|e| e.name.eq_ignore_ascii_case(&candidate.name)) {
            exercises.push(candidate);
        }
    }
    while exercises.len() < MIN_SESSION_EXERCISES {
        exercises.push(placeholder_exercise());
    }

    PlanSession {
        exercises,
        ..session.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mood::snapshot;
    use crate::planner::library::Equipment;
    use chrono::Utc;

    fn beginner_cutting() -> UserProfile {
        UserProfile {
            primary_goal: Some("lose_weight".into()),
            experience_level: Some("beginner".into()),
            equipment: vec![],
            ..Default::default()
        }
    }

    #[test]
    fn test_choose_exercises_pads_to_target_without_equipment() {
        let profile = beginner_cutting();
        for focus in ["upper_push", "upper_pull", "lower", "core", "conditioning", "full_body", "mobility", "endurance", "unknown_focus"] {
            for target in 0..8 {
                let exercises = choose_exercises(focus, &profile, target);
                assert_eq!(exercises.len(), target, "focus {} target {}", focus, target);
            }
        }
    }

    #[test]
    fn test_unknown_focus_is_all_placeholders() {
        let exercises = choose_exercises("juggling", &UserProfile::default(), 3);
        assert!(exercises.iter().all(|e| e.name == PLACEHOLDER_NAME));
        assert_eq!(exercises[0].sets, Some(3));
        assert_eq!(exercises[0].reps.as_deref(), Some("45"));
        assert_eq!(exercises[0].tempo.as_deref(), Some("fluid"));
    }

    #[test]
    fn test_choose_exercises_respects_library_order_and_equipment() {
        let profile = UserProfile {
            experience_level: Some("intermediate".into()),
            equipment: vec!["barbell".into()],
            ..Default::default()
        };
        let names: Vec<String> = choose_exercises("upper_push", &profile, 3)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(
            names,
            vec!["Barbell Bench Press", "Standing Overhead Press", "Push-Up"]
        );
    }

    #[test]
    fn test_choose_exercises_widens_to_bodyweight_and_dedupes() {
        // Beginner without gear: "Pull-Up" is bodyweight but intermediate-only,
        // so it only appears via the widening pass.
        let profile = beginner_cutting();
        let names: Vec<String> = choose_exercises("upper_pull", &profile, 5)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Inverted Table Row",
                "Prone Y-T-W Raise",
                "Superman Hold",
                "Pull-Up",
                PLACEHOLDER_NAME,
            ]
        );
        let unique: HashSet<_> = names[..4].iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_schedule_has_canonical_week() {
        let plan = build_workout_plan(&UserProfile::default(), MoodModifier::Neutral);
        let days: Vec<&str> = plan.schedule.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, WEEK_DAYS.to_vec());
        for day in &plan.schedule {
            assert!((1..=2).contains(&day.sessions.len()));
            for session in &day.sessions {
                assert!(session.exercises.len() >= MIN_SESSION_EXERCISES);
            }
        }
        assert_eq!(plan.schedule[0].emphasis, "Upper Strength & Power");
        assert_eq!(plan.schedule[6].emphasis, "Full Recovery Ritual");
    }

    #[test]
    fn test_beginner_cutting_scenario() {
        let profile = beginner_cutting();
        let plan = build_workout_plan(&profile, MoodModifier::Neutral);
        let monday = &plan.schedule[0];
        assert_eq!(monday.sessions[0].intensity, Intensity::Moderate);

        let bodyweight: HashSet<&str> = EXERCISE_LIBRARY
            .iter()
            .filter(|t| t.equipment.contains(&Equipment::Bodyweight))
            .map(|t| t.name)
            .collect();
        for day in &plan.schedule {
            for session in &day.sessions {
                for exercise in &session.exercises {
                    assert!(
                        exercise.name == PLACEHOLDER_NAME || bodyweight.contains(exercise.name.as_str()),
                        "{} is not bodyweight",
                        exercise.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_primary_intensity_follows_goal_and_modifier() {
        let profile = UserProfile {
            primary_goal: Some("build muscle".into()),
            ..Default::default()
        };
        let neutral = build_workout_plan(&profile, MoodModifier::Neutral);
        assert_eq!(neutral.schedule[0].sessions[0].intensity, Intensity::High);

        let eased = build_workout_plan(&profile, MoodModifier::Ease);
        assert_eq!(eased.schedule[0].sessions[0].intensity, Intensity::Moderate);
        assert_eq!(eased.schedule[0].sessions[1].intensity, Intensity::Low);

        let cutting = beginner_cutting();
        let amplified = build_workout_plan(&cutting, MoodModifier::Amplify);
        assert_eq!(amplified.schedule[0].sessions[0].intensity, Intensity::High);
    }

    #[test]
    fn test_focus_summary_keywords() {
        let mut profile = UserProfile {
            primary_goal: Some("Build strength".into()),
            ..Default::default()
        };
        assert!(focus_summary(&profile).starts_with("Lean mass acceleration"));
        profile.primary_goal = Some("lose_weight".into());
        assert!(focus_summary(&profile).starts_with("Metabolic conditioning stack"));
        profile.primary_goal = None;
        assert!(focus_summary(&profile).starts_with("Hybrid performance"));
    }

    #[test]
    fn test_explicit_calorie_target_is_verbatim() {
        let profile = UserProfile {
            daily_calorie_target: Some(1234),
            ..Default::default()
        };
        assert_eq!(compute_calorie_target(&profile), 1234);
    }

    #[test]
    fn test_mifflin_st_jeor_defaults() {
        // Male defaults: 10*72 + 6.25*172 - 5*30 + 5 = 1650; moderate 1.55 -> 2557.5
        assert_eq!(compute_calorie_target(&UserProfile::default()), 2558);

        let profile = UserProfile {
            gender: Some("female".into()),
            weight_kg: Some(60.0),
            height_cm: Some(165.0),
            age: Some(35),
            activity_level: Some("sedentary".into()),
            primary_goal: Some("gain muscle".into()),
            ..Default::default()
        };
        // 600 + 1031.25 - 175 - 161 = 1295.25; * 1.2 = 1554.3; + 250 = 1804.3
        assert_eq!(compute_calorie_target(&profile), 1804);
    }

    #[test]
    fn test_calorie_floor() {
        let profile = UserProfile {
            gender: Some("F".into()),
            weight_kg: Some(40.0),
            height_cm: Some(145.0),
            age: Some(70),
            activity_level: Some("sedentary".into()),
            primary_goal: Some("cut".into()),
            ..Default::default()
        };
        assert_eq!(compute_calorie_target(&profile), CALORIE_FLOOR);
    }

    #[test]
    fn test_macro_grams_match_calories() {
        for goal in ["gain muscle", "lose fat", "marathon", "general health"] {
            for weight in [50.0, 72.0, 95.0, 130.0] {
                let profile = UserProfile {
                    primary_goal: Some(goal.into()),
                    weight_kg: Some(weight),
                    ..Default::default()
                };
                let plan = build_nutrition_plan(&profile);
                let diff = (plan.macro_split.kcal() - plan.calories_target).abs();
                assert!(diff <= 9, "goal {} weight {}: off by {}", goal, weight, diff);
            }
        }
    }

    #[test]
    fn test_explicit_macros_keep_calories_consistent() {
        let protein_only = UserProfile {
            protein_target_g: Some(250),
            ..Default::default()
        };
        let plan = build_nutrition_plan(&protein_only);
        assert_eq!(plan.macro_split.protein, 250);
        assert_eq!(plan.calories_target, 2558);
        assert!((plan.macro_split.kcal() - plan.calories_target).abs() <= 9);

        let oversized = UserProfile {
            protein_target_g: Some(300),
            carbs_target_g: Some(400),
            fat_target_g: Some(120),
            ..Default::default()
        };
        let plan = build_nutrition_plan(&oversized);
        assert_eq!(plan.calories_target, 300 * 4 + 400 * 4 + 120 * 9);
        assert_eq!(plan.macro_split.kcal(), plan.calories_target);

        let pinned = UserProfile {
            daily_calorie_target: Some(2000),
            fat_target_g: Some(90),
            ..Default::default()
        };
        let plan = build_nutrition_plan(&pinned);
        assert_eq!(plan.calories_target, 2000);
        assert_eq!(plan.macro_split.fat, 90);
        assert!((plan.macro_split.kcal() - 2000).abs() <= 9);
    }

    #[test]
    fn test_macro_percentages_by_goal() {
        let profile = UserProfile {
            primary_goal: Some("lose weight".into()),
            ..Default::default()
        };
        let split = compute_macro_split(&profile, 2000);
        assert_eq!(split.protein, 170);
        assert_eq!(split.carbs, 165);
        assert_eq!(split.fat, 73);
    }

    #[test]
    fn test_meals_scale_from_daily_totals() {
        let profile = UserProfile {
            daily_calorie_target: Some(2000),
            ..Default::default()
        };
        let plan = build_nutrition_plan(&profile);
        assert_eq!(plan.meals.len(), 3);
        assert_eq!(plan.snacks.len(), 2);
        assert_eq!(plan.meals[0].meal_type, MealType::Breakfast);
        assert_eq!(plan.meals[0].calories, 560);
        assert_eq!(plan.meals[1].calories, 640);
        assert_eq!(plan.meals[2].calories, 600);
        assert_eq!(plan.snacks[0].calories, 100);
        assert!(plan.snacks.iter().all(|s| s.meal_type == MealType::Snack));

        // General split at 2000 kcal: 150 p / 200 c / 67 f
        let breakfast = &plan.meals[0];
        assert_eq!(breakfast.protein, 42);
        assert_eq!(breakfast.carbs, 56);
        assert_eq!(breakfast.fat, 17);
        assert_eq!(breakfast.fiber, Some(10));

        let snack = &plan.snacks[0];
        assert_eq!(snack.protein, 8);
        assert_eq!(snack.carbs, 10);
        assert_eq!(snack.fat, 5);
        assert_eq!(snack.fiber, Some(1));
    }

    #[test]
    fn test_diet_preference_selects_menu() {
        let profile = UserProfile {
            dietary_preference: Some("Vegan".into()),
            ..Default::default()
        };
        let plan = build_nutrition_plan(&profile);
        assert_eq!(plan.meals[0].name, "Tofu Scramble Wrap");
        assert!(plan.supplements.iter().any(|s| s.contains("B12")));
    }

    #[test]
    fn test_allergy_adds_swap_but_keeps_meal() {
        let profile = UserProfile {
            allergies: vec!["Almonds".into()],
            ..Default::default()
        };
        let plan = build_nutrition_plan(&profile);
        let snack = &plan.snacks[0];
        assert_eq!(snack.name, "Greek Yogurt and Almonds");
        assert_eq!(snack.swaps.len(), 1);
        assert!(snack.notes.as_deref().unwrap().contains("almonds"));
        assert!(plan.meals.iter().all(|m| m.swaps.is_empty()));
    }

    #[test]
    fn test_hydration_target() {
        let mut profile = UserProfile::default();
        assert_eq!(hydration_target(&profile), DEFAULT_HYDRATION_ML);
        profile.weight_kg = Some(80.0);
        assert_eq!(hydration_target(&profile), 2800);
        profile.hydration_target_ml = Some(3500);
        assert_eq!(hydration_target(&profile), 3500);
    }

    #[test]
    fn test_lifestyle_extensions() {
        let profile = UserProfile {
            sleep_challenges: vec!["wakes at 3am".into()],
            injuries: vec!["left knee".into()],
            sleep_target_hours: Some(8.0),
            ..Default::default()
        };
        let mut mood = snapshot("happy", None, Utc::now());
        mood.tags = vec!["Creative".into()];

        let plain = build_lifestyle_plan(&UserProfile::default(), None);
        let lifestyle = build_lifestyle_plan(&profile, Some(&mood));

        assert_eq!(plain.sleep.target_hours, DEFAULT_SLEEP_HOURS);
        assert_eq!(lifestyle.sleep.target_hours, 8.0);
        assert_eq!(
            lifestyle.sleep.wind_down_rituals.len(),
            plain.sleep.wind_down_rituals.len() + 2
        );
        assert!(lifestyle.micro_habits.iter().any(|h| h.starts_with("Playful movement")));
        assert!(lifestyle.recovery_focus.iter().any(|r| r.contains("left knee")));
    }

    #[test]
    fn test_top_up_fills_thin_sessions() {
        let profile = beginner_cutting();
        let mut plan = build_workout_plan(&profile, MoodModifier::Neutral);
        plan.schedule[0].sessions[0].exercises.truncate(1);
        plan.schedule[1].sessions[0].focus = "juggling".into();
        plan.schedule[1].sessions[0].exercises.clear();
        let kept = plan.schedule[0].sessions[0].exercises[0].name.clone();

        let topped = top_up_sessions(&plan, &profile);
        let monday = &topped.schedule[0].sessions[0].exercises;
        assert_eq!(monday.len(), MIN_SESSION_EXERCISES);
        assert_eq!(monday[0].name, kept);
        let unique: HashSet<&str> = monday.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(unique.len(), MIN_SESSION_EXERCISES);

        let tuesday = &topped.schedule[1].sessions[0].exercises;
        assert!(tuesday.iter().all(|e| e.name == PLACEHOLDER_NAME));
        assert_eq!(tuesday.len(), MIN_SESSION_EXERCISES);
        assert_eq!(topped.schedule[2], plan.schedule[2]);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let profile = beginner_cutting();
        assert_eq!(
            generate_fallback_plan(&profile, None),
            generate_fallback_plan(&profile, None)
        );
    }
}
