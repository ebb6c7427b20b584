//! Static exercise catalog and equipment normalization.
//!
//! Templates are matched in declaration order, so ordering within a focus
//! group is meaningful: the first eligible entries are the ones users see.

use std::collections::HashSet;

use crate::models::profile::ExperienceLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equipment {
    Bodyweight,
    Dumbbell,
    Barbell,
    Kettlebell,
    Machine,
    Bands,
    Cardio,
}

#[derive(Debug)]
pub struct ExerciseTemplate {
    pub name: &'static str,
    pub focus: &'static [&'static str],
    pub equipment: &'static [Equipment],
    pub levels: &'static [ExperienceLevel],
    pub sets: u32,
    pub reps: &'static str,
    pub tempo: Option<&'static str>,
    pub rest_seconds: Option<u32>,
    pub notes: Option<&'static str>,
}

use Equipment::*;
use ExperienceLevel::{Advanced as Adv, Beginner as Beg, Intermediate as Int};

const ALL_LEVELS: &[ExperienceLevel] = &[Beg, Int, Adv];
const INT_ADV: &[ExperienceLevel] = &[Int, Adv];

macro_rules! template {
    ($name:expr, $focus:expr, $equipment:expr, $levels:expr, $sets:expr, $reps:expr, $tempo:expr, $rest:expr, $notes:expr) => {
        ExerciseTemplate {
            name: $name,
            focus: $focus,
            equipment: $equipment,
            levels: $levels,
            sets: $sets,
            reps: $reps,
            tempo: $tempo,
            rest_seconds: $rest,
            notes: $notes,
        }
    };
}

#[rustfmt::skip]
pub static EXERCISE_LIBRARY: &[ExerciseTemplate] = &[
    // Upper push
    template!("Barbell Bench Press", &["upper_push"], &[Barbell], INT_ADV, 4, "6-8", Some("3-1-1"), Some(120), Some("Keep shoulder blades pinned")),
    template!("Dumbbell Incline Press", &["upper_push"], &[Dumbbell], ALL_LEVELS, 3, "8-10", Some("3-1-1"), Some(90), None),
    template!("Standing Overhead Press", &["upper_push"], &[Barbell, Dumbbell], INT_ADV, 4, "6-8", None, Some(120), None),
    template!("Cable Chest Fly", &["upper_push"], &[Machine], ALL_LEVELS, 3, "12-15", Some("2-1-2"), Some(60), None),
    template!("Incline Push-Up", &["upper_push"], &[Bodyweight], &[Beg], 3, "10-12", Some("2-1-1"), Some(60), Some("Hands on a bench or counter")),
    template!("Push-Up", &["upper_push", "full_body"], &[Bodyweight], ALL_LEVELS, 3, "10-15", Some("2-0-1"), Some(60), None),
    template!("Pike Push-Up", &["upper_push"], &[Bodyweight], INT_ADV, 3, "8-10", None, Some(75), None),
    template!("Band Overhead Press", &["upper_push"], &[Bands], ALL_LEVELS, 3, "12", None, Some(60), None),
    template!("Bench Dips", &["upper_push"], &[Bodyweight], ALL_LEVELS, 3, "10-12", None, Some(60), None),
    // Upper pull
    template!("Pull-Up", &["upper_pull"], &[Bodyweight], INT_ADV, 4, "5-8", None, Some(120), None),
    template!("Barbell Bent-Over Row", &["upper_pull"], &[Barbell], INT_ADV, 4, "6-8", Some("2-1-2"), Some(120), None),
    template!("One-Arm Dumbbell Row", &["upper_pull"], &[Dumbbell], ALL_LEVELS, 3, "10 each side", None, Some(60), None),
    template!("Lat Pulldown", &["upper_pull"], &[Machine], ALL_LEVELS, 3, "10-12", Some("2-1-2"), Some(75), None),
    template!("Band Pull-Apart", &["upper_pull", "mobility"], &[Bands], ALL_LEVELS, 3, "15-20", None, Some(45), None),
    template!("Inverted Table Row", &["upper_pull"], &[Bodyweight], ALL_LEVELS, 3, "8-12", Some("2-1-2"), Some(60), Some("Use a sturdy table or low bar")),
    template!("Prone Y-T-W Raise", &["upper_pull", "mobility"], &[Bodyweight], ALL_LEVELS, 2, "8 each letter", None, Some(45), None),
    template!("Superman Hold", &["upper_pull", "core"], &[Bodyweight], ALL_LEVELS, 3, "30s", None, Some(45), None),
    // Lower body
    template!("Barbell Back Squat", &["lower"], &[Barbell], INT_ADV, 4, "5-8", Some("3-1-1"), Some(150), Some("Brace before every rep")),
    template!("Romanian Deadlift", &["lower"], &[Barbell, Dumbbell], INT_ADV, 4, "8", Some("3-0-1"), Some(120), None),
    template!("Goblet Squat", &["lower"], &[Dumbbell, Kettlebell], ALL_LEVELS, 3, "10-12", Some("3-1-1"), Some(90), None),
    template!("Leg Press", &["lower"], &[Machine], ALL_LEVELS, 3, "10-12", None, Some(90), None),
    template!("Bodyweight Squat", &["lower", "full_body"], &[Bodyweight], ALL_LEVELS, 3, "15", Some("2-1-1"), Some(60), None),
    template!("Reverse Lunge", &["lower"], &[Bodyweight, Dumbbell], ALL_LEVELS, 3, "10 each leg", None, Some(60), None),
    template!("Glute Bridge", &["lower", "core"], &[Bodyweight], ALL_LEVELS, 3, "15", Some("2-2-1"), Some(45), None),
    template!("Bulgarian Split Squat", &["lower"], &[Bodyweight, Dumbbell], INT_ADV, 3, "8 each leg", Some("3-1-1"), Some(75), None),
    template!("Banded Lateral Walk", &["lower", "mobility"], &[Bands], ALL_LEVELS, 3, "12 steps each way", None, Some(45), None),
    // Core
    template!("Forearm Plank", &["core"], &[Bodyweight], ALL_LEVELS, 3, "30-45s", None, Some(45), None),
    template!("Dead Bug", &["core"], &[Bodyweight], ALL_LEVELS, 3, "10 each side", Some("slow"), Some(45), None),
    template!("Side Plank", &["core"], &[Bodyweight], ALL_LEVELS, 3, "30s each side", None, Some(45), None),
    template!("Hollow Body Hold", &["core"], &[Bodyweight], INT_ADV, 3, "30s", None, Some(45), None),
    template!("Pallof Press", &["core"], &[Bands, Machine], ALL_LEVELS, 3, "12 each side", None, Some(45), None),
    template!("Hanging Knee Raise", &["core"], &[Bodyweight], INT_ADV, 3, "12", None, Some(60), None),
    // Conditioning
    template!("Kettlebell Swing", &["conditioning", "full_body"], &[Kettlebell], INT_ADV, 4, "15", None, Some(60), None),
    template!("Rower Intervals", &["conditioning", "endurance"], &[Cardio], ALL_LEVELS, 6, "250m", None, Some(60), None),
    template!("Bike Sprints", &["conditioning"], &[Cardio], INT_ADV, 8, "20s on / 40s off", None, None, None),
    template!("Jumping Jacks", &["conditioning"], &[Bodyweight], &[Beg, Int], 3, "45s", None, Some(30), None),
    template!("Mountain Climbers", &["conditioning", "core"], &[Bodyweight], ALL_LEVELS, 3, "30s", None, Some(30), None),
    template!("High Knees", &["conditioning"], &[Bodyweight], ALL_LEVELS, 3, "30s", None, Some(30), None),
    template!("Burpees", &["conditioning", "full_body"], &[Bodyweight], INT_ADV, 4, "10", None, Some(60), None),
    template!("Skater Hops", &["conditioning"], &[Bodyweight], INT_ADV, 3, "20", None, Some(45), None),
    // Full body / power
    template!("Power Clean", &["full_body"], &[Barbell], &[Adv], 5, "3", None, Some(150), Some("Technique first, bar speed second")),
    template!("Dumbbell Thruster", &["full_body"], &[Dumbbell], INT_ADV, 4, "10", None, Some(90), None),
    template!("Kettlebell Clean and Press", &["full_body"], &[Kettlebell], INT_ADV, 4, "6 each side", None, Some(90), None),
    template!("Squat to Press", &["full_body"], &[Dumbbell, Bands], ALL_LEVELS, 3, "12", None, Some(60), None),
    template!("Bear Crawl", &["full_body", "core"], &[Bodyweight], ALL_LEVELS, 3, "20m", None, Some(45), None),
    template!("Broad Jump", &["full_body"], &[Bodyweight], INT_ADV, 4, "5", None, Some(90), None),
    // Endurance
    template!("Zone 2 Treadmill Walk", &["endurance"], &[Cardio], ALL_LEVELS, 1, "30 min", None, None, Some("Conversational pace")),
    template!("Steady Cycling", &["endurance"], &[Cardio], ALL_LEVELS, 1, "35 min", None, None, None),
    template!("Brisk Outdoor Walk", &["endurance"], &[Bodyweight], ALL_LEVELS, 1, "30 min", None, None, None),
    template!("Easy Run", &["endurance"], &[Bodyweight], INT_ADV, 1, "25 min", None, None, None),
    template!("Step-Up Intervals", &["endurance", "lower"], &[Bodyweight], ALL_LEVELS, 4, "2 min", None, Some(60), None),
    // Mobility
    template!("World's Greatest Stretch", &["mobility"], &[Bodyweight], ALL_LEVELS, 2, "5 each side", Some("slow"), None, None),
    template!("Cat-Cow Flow", &["mobility"], &[Bodyweight], ALL_LEVELS, 2, "10", Some("breath-led"), None, None),
    template!("90/90 Hip Switch", &["mobility"], &[Bodyweight], ALL_LEVELS, 2, "8 each side", Some("slow"), None, None),
    template!("Thoracic Open Book", &["mobility"], &[Bodyweight], ALL_LEVELS, 2, "8 each side", None, None, None),
    template!("Foam Roll Circuit", &["mobility"], &[Bodyweight], ALL_LEVELS, 1, "8 min", None, None, None),
];

/// Inserted when no template satisfies the constraints.
pub const PLACEHOLDER_NAME: &str = "Dynamic Mobility Circuit";
pub const PLACEHOLDER_SETS: u32 = 3;
pub const PLACEHOLDER_REPS: &str = "45";
pub const PLACEHOLDER_TEMPO: &str = "fluid";

/// Maps free-text equipment entries onto canonical tags. Bodyweight is always available.
pub fn normalize_equipment(raw: &[String]) -> HashSet<Equipment> {
    let mut tags = HashSet::from([Bodyweight]);
    for entry in raw {
        let entry = entry.to_lowercase();
        if entry.contains("barbell") {
            tags.insert(Barbell);
        }
        if entry.contains("dumbbell") {
            tags.insert(Dumbbell);
        }
        if entry.contains("kettlebell") {
            tags.insert(Kettlebell);
        }
        if entry.contains("cable") || entry.contains("machine") {
            tags.insert(Machine);
        }
        if entry.contains("band") {
            tags.insert(Bands);
        }
        if entry.contains("bike") || entry.contains("row") || entry.contains("treadmill") {
            tags.insert(Cardio);
        }
        if entry.contains("full gym") || entry == "gym" {
            tags.extend([Barbell, Dumbbell, Machine, Cardio]);
        }
    }
    tags
}

impl ExerciseTemplate {
    pub fn has_focus(&self, focus: &str) -> bool {
        self.focus.iter().any(|f| *f == focus)
    }

    /// Advanced users may also use intermediate-tagged templates.
    pub fn suits(&self, level: ExperienceLevel) -> bool {
        self.levels.contains(&level)
            || (level == ExperienceLevel::Advanced && self.levels.contains(&ExperienceLevel::Intermediate))
    }

    pub fn usable_with(&self, available: &HashSet<Equipment>) -> bool {
        self.equipment.iter().any(|e| available.contains(e))
    }

    pub fn is_bodyweight(&self) -> bool {
        self.equipment.contains(&Bodyweight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_always_includes_bodyweight() {
        let tags = normalize_equipment(&[]);
        assert_eq!(tags, HashSet::from([Bodyweight]));
    }

    #[test]
    fn test_normalize_keywords() {
        let tags = normalize_equipment(&[
            "Olympic Barbell".into(),
            "cable station".into(),
            "Concept2 Rower".into(),
            "resistance bands".into(),
        ]);
        assert!(tags.contains(&Barbell));
        assert!(tags.contains(&Machine));
        assert!(tags.contains(&Cardio));
        assert!(tags.contains(&Bands));
        assert!(!tags.contains(&Dumbbell));
    }

    #[test]
    fn test_advanced_widening() {
        let bench = EXERCISE_LIBRARY
            .iter()
            .find(|t| t.name == "Barbell Bench Press")
            .unwrap();
        assert!(bench.suits(ExperienceLevel::Advanced));
        assert!(bench.suits(ExperienceLevel::Intermediate));
        assert!(!bench.suits(ExperienceLevel::Beginner));

        let incline = EXERCISE_LIBRARY
            .iter()
            .find(|t| t.name == "Incline Push-Up")
            .unwrap();
        assert!(!incline.suits(ExperienceLevel::Advanced));
    }

    #[test]
    fn test_library_names_unique() {
        let names: HashSet<_> = EXERCISE_LIBRARY.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), EXERCISE_LIBRARY.len());
    }
}
