//! Remote exercise lookup used to fill thin sessions.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::models::plan::{PlanDay, PlanExercise, PlanSession, WorkoutPlan};
use crate::planner::fallback::MIN_SESSION_EXERCISES;

const SEARCH_TIMEOUT_SECS: u64 = 8;
const DEFAULT_SETS: u32 = 3;

#[derive(Error, Debug)]
pub enum ExerciseSearchError {
    #[error("exercise search API key not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("exercise search returned {0}")]
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExerciseQuery {
    Muscle(&'static str),
    Type(&'static str),
}

impl ExerciseQuery {
    fn param(&self) -> (&'static str, &'static str) {
        match self {
            Self::Muscle(m) => ("muscle", m),
            Self::Type(t) => ("type", t),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteExercise {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub muscle: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[async_trait]
pub trait ExerciseSearch: Send + Sync {
    /// Empty on any failure.
    async fn search(&self, query: &ExerciseQuery, limit: usize) -> Vec<RemoteExercise>;
}

pub struct ExerciseSearchClient {
    client: Client,
    url: String,
    api_key: String,
}

impl ExerciseSearchClient {
    pub fn new(url: String, api_key: String) -> Result<Self, ExerciseSearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, url, api_key })
    }

    pub fn from_config(config: &Config) -> Result<Self, ExerciseSearchError> {
        Self::new(config.exercise_api_url.clone(), config.exercise_api_key.clone())
    }

    async fn fetch(&self, query: &ExerciseQuery, limit: usize) -> Result<Vec<RemoteExercise>, ExerciseSearchError> {
        if self.api_key.is_empty() {
            return Err(ExerciseSearchError::NotConfigured);
        }

        let response = self
            .client
            .get(&self.url)
            .header("X-Api-Key", &self.api_key)
            .query(&[query.param()])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExerciseSearchError::Status(response.status().as_u16()));
        }

        let mut exercises = response.json::<Vec<RemoteExercise>>().await?;
        exercises.truncate(limit);
        Ok(exercises)
    }
}

#[async_trait]
impl ExerciseSearch for ExerciseSearchClient {
    async fn search(&self, query: &ExerciseQuery, limit: usize) -> Vec<RemoteExercise> {
        match self.fetch(query, limit).await {
            Ok(exercises) => exercises,
            Err(ExerciseSearchError::NotConfigured) => Vec::new(),
            Err(e) => {
                tracing::warn!(query = ?query, error = %e, "Exercise search failed");
                Vec::new()
            }
        }
    }
}

// ============================================================================
// Enrichment
// ============================================================================

fn lookup(key: &str) -> Option<ExerciseQuery> {
    use ExerciseQuery::*;
    let query = match key.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
        "upper_push" | "push" | "chest" => Muscle("chest"),
        "upper_pull" | "pull" | "back" => Muscle("lats"),
        "lower" | "legs" | "lower_body" => Muscle("quadriceps"),
        "core" | "abs" => Muscle("abdominals"),
        "conditioning" | "cardio" | "endurance" | "hiit" => Type("cardio"),
        "full_body" | "power" | "plyometrics" => Type("plyometrics"),
        "mobility" | "stretching" | "recovery" | "yoga" => Type("stretching"),
        "strength" => Type("strength"),
        _ => return None,
    };
    Some(query)
}

fn lookup_by_name(name: &str) -> Option<ExerciseQuery> {
    use ExerciseQuery::*;
    let name = name.to_lowercase();
    let keywords: &[(&[&str], ExerciseQuery)] = &[
        (&["push", "chest", "press"], Muscle("chest")),
        (&["pull", "back", "row"], Muscle("lats")),
        (&["lower", "leg", "squat"], Muscle("quadriceps")),
        (&["core", "abs", "rotation"], Muscle("abdominals")),
        (&["mobility", "stretch", "flow"], Type("stretching")),
        (&["interval", "conditioning", "cardio", "aerobic"], Type("cardio")),
    ];
    keywords
        .iter()
        .find(|(words, _)| words.iter().any(|w| name.contains(w)))
        .map(|(_, query)| query.clone())
}

/// Focus first, then modality, then keywords in the session name.
pub fn query_for(session: &PlanSession) -> Option<ExerciseQuery> {
    lookup(&session.focus)
        .or_else(|| lookup(&session.modality))
        .or_else(|| lookup_by_name(&session.name))
}

/// Up to `count` sentences from the start of `text`.
fn first_sentences(text: &str, count: usize) -> String {
    let mut seen = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            seen += 1;
            if seen == count {
                return text[..i + c.len_utf8()].trim().to_string();
            }
        }
    }
    text.trim().to_string()
}

fn to_plan_exercise(remote: &RemoteExercise) -> PlanExercise {
    let beginner = remote
        .difficulty
        .as_deref()
        .map(|d| d.eq_ignore_ascii_case("beginner"))
        .unwrap_or(false);
    PlanExercise {
        name: remote.name.clone(),
        sets: Some(DEFAULT_SETS),
        reps: Some(if beginner { "12" } else { "8" }.to_string()),
        tempo: None,
        rest_seconds: None,
        notes: remote
            .instructions
            .as_deref()
            .map(|i| first_sentences(i, 2))
            .filter(|n| !n.is_empty()),
    }
}

/// Fills sessions below the minimum exercise count from the remote search.
///
/// One enricher serves a single generation: results are cached per query for
/// its lifetime only.
pub struct ExerciseEnricher<'a> {
    search: &'a dyn ExerciseSearch,
    limit: usize,
    cache: HashMap<ExerciseQuery, Vec<RemoteExercise>>,
}

impl<'a> ExerciseEnricher<'a> {
    pub fn new(search: &'a dyn ExerciseSearch, limit: usize) -> Self {
        Self {
            search,
            limit,
            cache: HashMap::new(),
        }
    }

    async fn candidates(&mut self, query: ExerciseQuery) -> &[RemoteExercise] {
        if !self.cache.contains_key(&query) {
            let found = self.search.search(&query, self.limit).await;
            tracing::debug!(query = ?query, results = found.len(), "Exercise search");
            self.cache.insert(query.clone(), found);
        }
        self.cache.get(&query).map(Vec::as_slice).unwrap_or(&[])
    }

    async fn enrich_session(&mut self, session: &PlanSession) -> Option<PlanSession> {
        if session.exercises.len() >= MIN_SESSION_EXERCISES {
            return None;
        }
        let query = query_for(session)?;
        let needed = MIN_SESSION_EXERCISES - session.exercises.len();

        let mut exercises = session.exercises.clone();
        let additions: Vec<PlanExercise> = {
            let candidates = self.candidates(query).await;
            let mut picked: Vec<PlanExercise> = Vec::new();
            for remote in candidates {
                if picked.len() == needed {
                    break;
                }
                let duplicate = exercises
                    .iter()
                    .chain(picked.iter())
                    .any(|e| e.name.eq_ignore_ascii_case(&remote.name));
                if !duplicate {
                    picked.push(to_plan_exercise(remote));
                }
            }
            picked
        };

        if additions.is_empty() {
            return None;
        }
        exercises.extend(additions);
        Some(PlanSession {
            exercises,
            ..session.clone()
        })
    }

    /// Returns the enriched plan and the number of sessions that gained exercises.
    pub async fn enrich(&mut self, plan: &WorkoutPlan) -> (WorkoutPlan, usize) {
        let mut enriched = 0;
        let mut schedule = Vec::with_capacity(plan.schedule.len());

        for day in &plan.schedule {
            let mut sessions = Vec::with_capacity(day.sessions.len());
            for session in &day.sessions {
                match self.enrich_session(session).await {
                    Some(updated) => {
                        enriched += 1;
                        sessions.push(updated);
                    }
                    None => sessions.push(session.clone()),
                }
            }
            schedule.push(PlanDay {
                sessions,
                ..day.clone()
            });
        }

        (
            WorkoutPlan {
                focus_summary: plan.focus_summary.clone(),
                schedule,
            },
            enriched,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::Intensity;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSearch {
        calls: AtomicUsize,
        results: Vec<RemoteExercise>,
    }

    #[async_trait]
    impl ExerciseSearch for CountingSearch {
        async fn search(&self, _query: &ExerciseQuery, limit: usize) -> Vec<RemoteExercise> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.results.iter().take(limit).cloned().collect()
        }
    }

    fn remote(name: &str, difficulty: &str) -> RemoteExercise {
        RemoteExercise {
            name: name.into(),
            kind: Some("strength".into()),
            muscle: Some("chest".into()),
            equipment: None,
            difficulty: Some(difficulty.into()),
            instructions: Some("Lie flat. Press up. Lower slowly. Repeat.".into()),
        }
    }

    fn session(focus: &str, exercises: &[&str]) -> PlanSession {
        PlanSession {
            name: "Coach Session".into(),
            focus: focus.into(),
            duration_minutes: 40,
            intensity: Intensity::Moderate,
            modality: "custom".into(),
            guidance: String::new(),
            exercises: exercises
                .iter()
                .map(|n| PlanExercise {
                    name: n.to_string(),
                    sets: None,
                    reps: None,
                    tempo: None,
                    rest_seconds: None,
                    notes: None,
                })
                .collect(),
        }
    }

    fn plan(sessions: Vec<PlanSession>) -> WorkoutPlan {
        WorkoutPlan {
            focus_summary: "test".into(),
            schedule: vec![PlanDay {
                day: "Monday".into(),
                emphasis: "test".into(),
                sessions,
                recovery: None,
                mindset: None,
            }],
        }
    }

    #[test]
    fn test_query_resolution_order() {
        assert_eq!(query_for(&session("upper_push", &[])), Some(ExerciseQuery::Muscle("chest")));
        assert_eq!(query_for(&session("Conditioning", &[])), Some(ExerciseQuery::Type("cardio")));

        let mut by_modality = session("unknown", &[]);
        by_modality.modality = "mobility".into();
        assert_eq!(query_for(&by_modality), Some(ExerciseQuery::Type("stretching")));

        let mut by_name = session("unknown", &[]);
        by_name.name = "Squat Ladder".into();
        assert_eq!(query_for(&by_name), Some(ExerciseQuery::Muscle("quadriceps")));

        assert_eq!(query_for(&session("unknown", &[])), None);
    }

    #[test]
    fn test_first_sentences() {
        assert_eq!(first_sentences("One. Two! Three.", 2), "One. Two!");
        assert_eq!(first_sentences("No terminator", 2), "No terminator");
    }

    #[tokio::test]
    async fn test_enrich_fills_to_minimum_without_duplicates() {
        let search = CountingSearch {
            calls: AtomicUsize::new(0),
            results: vec![
                remote("Push-Up", "beginner"),
                remote("Dumbbell Fly", "intermediate"),
                remote("Cable Crossover", "expert"),
            ],
        };
        let mut enricher = ExerciseEnricher::new(&search, 5);
        let (enriched, count) = enricher.enrich(&plan(vec![session("upper_push", &["push-up"])])).await;

        let exercises = &enriched.schedule[0].sessions[0].exercises;
        let names: Vec<&str> = exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["push-up", "Dumbbell Fly", "Cable Crossover"]);
        assert_eq!(exercises[1].reps.as_deref(), Some("8"));
        assert_eq!(exercises[1].notes.as_deref(), Some("Lie flat. Press up."));
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_beginner_difficulty_gets_twelve_reps() {
        let search = CountingSearch {
            calls: AtomicUsize::new(0),
            results: vec![remote("Wall Push-Up", "beginner")],
        };
        let mut enricher = ExerciseEnricher::new(&search, 5);
        let (enriched, _) = enricher.enrich(&plan(vec![session("upper_push", &[])])).await;
        assert_eq!(enriched.schedule[0].sessions[0].exercises[0].reps.as_deref(), Some("12"));
    }

    #[tokio::test]
    async fn test_cache_deduplicates_calls_per_focus() {
        let search = CountingSearch {
            calls: AtomicUsize::new(0),
            results: vec![remote("Plank", "beginner")],
        };
        let mut enricher = ExerciseEnricher::new(&search, 5);
        let workout = plan(vec![session("core", &[]), session("core", &[]), session("lower", &[])]);
        enricher.enrich(&workout).await;
        assert_eq!(search.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_full_sessions_and_empty_results_untouched() {
        let search = CountingSearch {
            calls: AtomicUsize::new(0),
            results: vec![],
        };
        let mut enricher = ExerciseEnricher::new(&search, 5);
        let workout = plan(vec![session("core", &["a", "b", "c"]), session("lower", &["a"])]);
        let (enriched, count) = enricher.enrich(&workout).await;
        assert_eq!(enriched, workout);
        assert_eq!(count, 0);
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_without_key_returns_empty() {
        let client = ExerciseSearchClient::new("http://127.0.0.1:9".into(), String::new()).unwrap();
        assert!(client.search(&ExerciseQuery::Muscle("chest"), 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_client_queries_and_caps_results() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/exercises")
            .match_query(mockito::Matcher::UrlEncoded("muscle".into(), "chest".into()))
            .match_header("X-Api-Key", "key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"name":"Bench Press","difficulty":"intermediate"},
                    {"name":"Push-Up","difficulty":"beginner"},
                    {"name":"Dip","difficulty":"intermediate"}]"#,
            )
            .create_async()
            .await;

        let client = ExerciseSearchClient::new(format!("{}/v1/exercises", server.url()), "key".into()).unwrap();
        let results = client.search(&ExerciseQuery::Muscle("chest"), 2).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Bench Press");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_error_status_returns_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/exercises")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = ExerciseSearchClient::new(format!("{}/v1/exercises", server.url()), "key".into()).unwrap();
        assert!(client.search(&ExerciseQuery::Type("cardio"), 5).await.is_empty());
    }
}
