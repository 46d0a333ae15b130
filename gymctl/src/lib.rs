//! Multi-tenant gym management platform.
//!
//! One binary serves three audiences from a shared Postgres database:
//!
//! - the **platform back office** (`/api/gyms`, `/api/billing`,
//!   `/api/support/tickets`, `/api/logs`), restricted to platform operators;
//! - the **gym admin console** (`/api/gym/{gym_id}/...`), where every request
//!   is scoped to the gym bound into the caller's token;
//! - the **login portals** (`/api/auth/login`, `/api/gym-auth/login`).
//!
//! # Usage
//!
//! ```ignore
//! use gymctl::{Application, Config};
//!
//! # async fn run(config: Config) -> anyhow::Result<()> {
//! let app = Application::new(config).await?;
//! app.serve(std::future::pending()).await
//! # }
//! ```
//!
//! Migrations are embedded; `gymctl::migrator().run(&pool).await?` brings a
//! fresh database up to date.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test;
#[cfg(test)]
pub mod test_utils;

pub use config::Config;

use crate::api::handlers;
use crate::api::models::accounts::Role;
use crate::auth::password;
use crate::db::handlers::Accounts;
use crate::db::models::accounts::{AccountCreateDBRequest, AccountUpdateDBRequest};
use crate::openapi::ApiDoc;
use crate::types::AccountId;
use axum::{
    http,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use bon::Builder;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, instrument, warn, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the gymctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial platform operator account if it doesn't exist.
///
/// Idempotent: an existing account keeps its id, and its password is
/// rotated when one is supplied. Called on every startup so a fresh
/// deployment always has a way in.
#[instrument(skip_all)]
pub async fn create_initial_operator(
    email: &str,
    password: Option<&str>,
    db: &PgPool,
) -> anyhow::Result<Option<AccountId>> {
    let password_hash = password.map(password::hash_string).transpose()?;

    let mut tx = db.begin().await?;
    let mut repo = Accounts::new(&mut tx);

    let account = match repo.get_by_email(email).await? {
        Some(existing) => {
            if let Some(hash) = password_hash {
                repo.update(
                    existing.id,
                    &AccountUpdateDBRequest {
                        password_hash: Some(hash),
                        ..Default::default()
                    },
                )
                .await?;
            }
            existing
        }
        None => {
            let Some(password_hash) = password_hash else {
                warn!("No operator password configured; skipping initial operator creation");
                return Ok(None);
            };

            repo.create(&AccountCreateDBRequest {
                email: email.to_string(),
                password_hash,
                display_name: None,
                role: Role::PlatformOperator,
                gym_id: None,
            })
            .await?
        }
    };

    tx.commit().await?;
    Ok(Some(account.id))
}

/// Connect to Postgres, run migrations, and ensure the operator account.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.pool.max_connections)
        .min_connections(config.database.pool.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.database.pool.acquire_timeout_secs))
        .idle_timeout(std::time::Duration::from_secs(config.database.pool.idle_timeout_secs))
        .connect(&config.database.url)
        .await?;

    migrator().run(&pool).await?;

    create_initial_operator(&config.operator_email, config.operator_password.as_deref(), &pool).await?;

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    // AllowOrigin::list panics on a literal "*"; wildcard must map to any()
    let cors_config = &config.auth.security.cors;
    let allow_origin = if cors_config
        .allowed_origins
        .iter()
        .any(|origin| matches!(origin, config::CorsOrigin::Wildcard))
    {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let config::CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(cors_config.allow_credentials)
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
        ])
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE]);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let auth_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/gym-auth/login", post(handlers::auth::gym_login));

    let platform_routes = Router::new()
        .route("/api/gyms", get(handlers::gyms::list_gyms).post(handlers::gyms::create_gym))
        .route(
            "/api/gyms/{gym_id}",
            get(handlers::gyms::get_gym)
                .put(handlers::gyms::update_gym)
                .delete(handlers::gyms::delete_gym),
        )
        .route(
            "/api/billing",
            get(handlers::billing::list_billing_records).post(handlers::billing::create_billing_record),
        )
        .route(
            "/api/billing/{record_id}",
            get(handlers::billing::get_billing_record)
                .put(handlers::billing::update_billing_record)
                .delete(handlers::billing::delete_billing_record),
        )
        .route(
            "/api/support/tickets",
            get(handlers::support::list_tickets).post(handlers::support::create_ticket),
        )
        .route(
            "/api/support/tickets/{ticket_id}",
            get(handlers::support::get_ticket)
                .put(handlers::support::update_ticket)
                .delete(handlers::support::delete_ticket),
        )
        .route("/api/logs", get(handlers::logs::list_logs))
        .route("/api/logs/export", get(handlers::logs::export_logs));

    let tenant_routes = Router::new()
        .route(
            "/members",
            get(handlers::members::list_members).post(handlers::members::create_member),
        )
        .route(
            "/members/{member_id}",
            get(handlers::members::get_member)
                .put(handlers::members::update_member)
                .delete(handlers::members::delete_member),
        )
        .route(
            "/subscriptions",
            get(handlers::subscriptions::list_subscriptions).post(handlers::subscriptions::create_subscription),
        )
        .route(
            "/subscriptions/{subscription_id}",
            get(handlers::subscriptions::get_subscription)
                .put(handlers::subscriptions::update_subscription)
                .delete(handlers::subscriptions::delete_subscription),
        )
        .route(
            "/classes",
            get(handlers::classes::list_classes).post(handlers::classes::create_class),
        )
        .route(
            "/classes/{class_id}",
            get(handlers::classes::get_class)
                .put(handlers::classes::update_class)
                .delete(handlers::classes::delete_class),
        )
        .route(
            "/lockers",
            get(handlers::lockers::list_lockers).post(handlers::lockers::create_locker),
        )
        .route(
            "/lockers/{locker_id}",
            get(handlers::lockers::get_locker)
                .put(handlers::lockers::update_locker)
                .delete(handlers::lockers::delete_locker),
        )
        .route(
            "/expenses",
            get(handlers::expenses::list_expenses).post(handlers::expenses::create_expense),
        )
        .route(
            "/expenses/{expense_id}",
            get(handlers::expenses::get_expense)
                .put(handlers::expenses::update_expense)
                .delete(handlers::expenses::delete_expense),
        )
        .route(
            "/payroll",
            get(handlers::payroll::list_payroll).post(handlers::payroll::create_payroll_record),
        )
        .route(
            "/payroll/{record_id}",
            get(handlers::payroll::get_payroll_record)
                .put(handlers::payroll::update_payroll_record)
                .delete(handlers::payroll::delete_payroll_record),
        )
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/{product_id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/reservations",
            get(handlers::reservations::list_reservations).post(handlers::reservations::create_reservation),
        )
        .route(
            "/reservations/{reservation_id}",
            get(handlers::reservations::get_reservation)
                .put(handlers::reservations::update_reservation)
                .delete(handlers::reservations::delete_reservation),
        )
        .route(
            "/attendance",
            get(handlers::attendance::list_attendance).post(handlers::attendance::check_in),
        )
        .route(
            "/attendance/{record_id}",
            get(handlers::attendance::get_attendance_record)
                .put(handlers::attendance::check_out)
                .delete(handlers::attendance::delete_attendance_record),
        )
        .route(
            "/deposits",
            get(handlers::deposits::list_deposits).post(handlers::deposits::create_deposit),
        )
        .route(
            "/deposits/{deposit_id}",
            get(handlers::deposits::get_deposit)
                .put(handlers::deposits::update_deposit)
                .delete(handlers::deposits::delete_deposit),
        );

    let router = Router::new()
        .route("/api/health", get(handlers::probes::health))
        .merge(auth_routes)
        .merge(platform_routes)
        .nest("/api/gym/{gym_id}", tenant_routes)
        .with_state(state.clone())
        .route(
            "/openapi.json",
            get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The assembled application: pool, state, and router.
///
/// 1. **Create**: [`Application::new`] connects to the database, runs
///    migrations, ensures the operator account, and builds the router.
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application over an existing pool (used by tests, which
    /// arrive with a migrated per-test database).
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        let pool = match pool {
            Some(pool) => pool,
            None => setup_database(&config).await?,
        };

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("gymctl listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::create_initial_operator;
    use crate::api::models::accounts::Role;
    use crate::db::handlers::Accounts;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_create_initial_operator_idempotent(pool: PgPool) {
        let first = create_initial_operator("ops@platform.example", Some("super-secret"), &pool)
            .await
            .unwrap()
            .unwrap();
        let second = create_initial_operator("ops@platform.example", Some("rotated-secret"), &pool)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first, second);

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Accounts::new(&mut conn);
        assert_eq!(repo.count_by_role(Role::PlatformOperator).await.unwrap(), 1);

        // Rotated password is the one that verifies
        let account = repo.get_by_email("ops@platform.example").await.unwrap().unwrap();
        assert!(crate::auth::password::verify_string("rotated-secret", &account.password_hash).unwrap());
        assert!(!crate::auth::password::verify_string("super-secret", &account.password_hash).unwrap());
    }

    #[sqlx::test]
    async fn test_operator_skipped_without_password(pool: PgPool) {
        let created = create_initial_operator("ops@platform.example", None, &pool).await.unwrap();
        assert!(created.is_none());
    }
}
