//! Servir API composition root.

#![forbid(unsafe_code)]

mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use servir_application::{
    AccountService, AvailabilityService, MinistryService, ScheduleService, SubstitutionPolicy,
    SubstitutionService, TextGenerator,
};
use servir_core::AppError;
use servir_infrastructure::{
    Argon2PasswordHasher, GeminiConfig, GeminiTextGenerator, PostgresAssignmentRepository,
    PostgresAvailabilityRepository, PostgresMinistryRepository, PostgresProfileRepository,
    PostgresScheduleRepository, PostgresServiceTimeRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    let database_url = required_env("DATABASE_URL")?;
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let session_secret = required_env("SESSION_SECRET")?;

    if session_secret.len() < 32 {
        return Err(AppError::Validation(
            "SESSION_SECRET must be at least 32 characters".to_owned(),
        ));
    }

    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .unwrap_or_else(|_| "false".to_owned())
        .eq_ignore_ascii_case("true");

    let include_leaders = env::var("SUBSTITUTE_INCLUDE_LEADERS")
        .unwrap_or_else(|_| "false".to_owned())
        .eq_ignore_ascii_case("true");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let session_store = PostgresStore::new(pool.clone())
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;
    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let profile_repository = Arc::new(PostgresProfileRepository::new(pool.clone()));
    let ministry_repository = Arc::new(PostgresMinistryRepository::new(pool.clone()));
    let schedule_repository = Arc::new(PostgresScheduleRepository::new(pool.clone()));
    let service_time_repository = Arc::new(PostgresServiceTimeRepository::new(pool.clone()));
    let assignment_repository = Arc::new(PostgresAssignmentRepository::new(pool.clone()));
    let availability_repository = Arc::new(PostgresAvailabilityRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    // The ranker is optional: without a key every suggestion uses the
    // deterministic resolver order.
    let ranker: Option<Arc<dyn TextGenerator>> = match env::var("GOOGLE_AI_KEY") {
        Ok(api_key) if !api_key.trim().is_empty() => {
            let model =
                env::var("GOOGLE_AI_MODEL").unwrap_or_else(|_| "gemini-pro".to_owned());
            let timeout_seconds = env::var("GOOGLE_AI_TIMEOUT_SECONDS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(10);

            Some(Arc::new(GeminiTextGenerator::new(GeminiConfig {
                api_key,
                model,
                timeout: std::time::Duration::from_secs(timeout_seconds),
            })?))
        }
        _ => {
            info!("GOOGLE_AI_KEY not set, substitute ranking falls back to resolver order");
            None
        }
    };

    let app_state = AppState {
        account_service: AccountService::new(profile_repository.clone(), password_hasher),
        availability_service: AvailabilityService::new(availability_repository.clone()),
        ministry_service: MinistryService::new(ministry_repository),
        schedule_service: ScheduleService::new(
            schedule_repository.clone(),
            service_time_repository,
            profile_repository.clone(),
            availability_repository.clone(),
            assignment_repository.clone(),
        ),
        substitution_service: SubstitutionService::new(
            schedule_repository,
            profile_repository,
            availability_repository,
            assignment_repository,
            ranker,
            SubstitutionPolicy { include_leaders },
        ),
        frontend_url: frontend_url.clone(),
    };

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/api/ministries",
            get(handlers::ministries::list_handler).post(handlers::ministries::create_handler),
        )
        .route(
            "/api/ministries/{ministry_id}",
            put(handlers::ministries::update_handler).delete(handlers::ministries::delete_handler),
        )
        .route(
            "/api/ministries/{ministry_id}/roster",
            get(handlers::ministries::roster_handler),
        )
        .route(
            "/api/service-times",
            get(handlers::schedules::list_service_times_handler)
                .post(handlers::schedules::create_service_time_handler),
        )
        .route(
            "/api/schedules",
            get(handlers::schedules::list_handler).post(handlers::schedules::create_handler),
        )
        .route(
            "/api/schedules/{schedule_id}/assignments",
            get(handlers::schedules::assignments_handler),
        )
        .route(
            "/api/schedules/{schedule_id}/substitutes/suggest",
            post(handlers::substitutes::suggest_handler),
        )
        .route(
            "/api/schedules/{schedule_id}/substitutes",
            post(handlers::substitutes::assign_handler),
        )
        .route(
            "/api/assignments/{assignment_id}/confirm",
            post(handlers::assignments::confirm_handler),
        )
        .route(
            "/api/assignments/{assignment_id}/decline",
            post(handlers::assignments::decline_handler),
        )
        .route(
            "/api/assignments/{assignment_id}/resend",
            post(handlers::assignments::resend_handler),
        )
        .route(
            "/api/assignments/{assignment_id}/cancel",
            post(handlers::assignments::cancel_handler),
        )
        .route(
            "/api/me/assignments",
            get(handlers::assignments::my_assignments_handler),
        )
        .route(
            "/api/me/availability",
            get(handlers::availability::list_handler).post(handlers::availability::set_handler),
        )
        .route(
            "/api/volunteers",
            get(handlers::volunteers::list_handler).post(handlers::volunteers::create_handler),
        )
        .route(
            "/api/volunteers/{profile_id}",
            put(handlers::volunteers::update_handler),
        )
        .route(
            "/api/volunteers/{profile_id}/reset-pin",
            post(handlers::volunteers::reset_pin_handler),
        )
        .route(
            "/api/leaders",
            post(handlers::volunteers::create_leader_handler),
        )
        .route("/api/members", get(handlers::volunteers::list_members_handler))
        .route(
            "/api/dashboard/counts",
            get(handlers::schedules::counts_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(auth::leader_login_handler))
        .route("/auth/login/pin", post(auth::volunteer_login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Internal(format!("invalid API_HOST '{api_host}': {error}")))?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "servir-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
