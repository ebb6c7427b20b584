use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    // External planner (optional collaborator)
    pub planner_api_url: Option<String>,
    pub planner_api_key: String,
    pub planner_timeout_secs: u64,

    // Exercise search (enrichment)
    pub exercise_api_url: String,
    pub exercise_api_key: String,
    pub exercise_search_limit: usize,

    pub generate_rate_limit: u32,
    pub generate_rate_window_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            planner_api_url: env::var("PLANNER_API_URL").ok().filter(|s| !s.is_empty()),
            planner_api_key: env::var("PLANNER_API_KEY").unwrap_or_default(),
            planner_timeout_secs: env::var("PLANNER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "12".into())
                .parse()
                .unwrap_or(12),

            exercise_api_url: env::var("EXERCISE_API_URL")
                .unwrap_or_else(|_| "https://api.api-ninjas.com/v1/exercises".into()),
            exercise_api_key: env::var("EXERCISE_API_KEY").unwrap_or_default(),
            exercise_search_limit: env::var("EXERCISE_SEARCH_LIMIT")
                .unwrap_or_else(|_| "5".into())
                .parse()
                .unwrap_or(5),

            generate_rate_limit: env::var("GENERATE_RATE_LIMIT")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),
            generate_rate_window_secs: env::var("GENERATE_RATE_WINDOW_SECS")
                .unwrap_or_else(|_| "3600".into()) // 1 hour
                .parse()
                .unwrap_or(3600),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
