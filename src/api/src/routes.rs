//! API route table and handlers.
//!
//! Each lookup is one [`RouteSpec`]: a path pattern, the parameters it binds
//! (in placeholder order), a validation rule, the store it reads and the
//! statement it runs. The two sub-APIs differ in response shape and in how
//! they treat empty results and query failures; see [`Family`].

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, on, MethodFilter, MethodRouter},
    Json, Router,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{error, warn};

use crate::storage::{sql, Row, Store, StoreError};
use crate::types::{ErrorResponse, HealthResponse, ScheduleResponse, StoreStatus};
use crate::validate::{Validation, GAME_STATUSES};

/// Application state shared across handlers.
pub struct AppState {
    pub plays: Arc<Store>,
    pub schedule: Arc<Store>,
}

impl AppState {
    pub fn new(plays: Store, schedule: Store) -> Self {
        Self {
            plays: Arc::new(plays),
            schedule: Arc::new(schedule),
        }
    }

    pub fn store(&self, kind: StoreKind) -> &Arc<Store> {
        match kind {
            StoreKind::Plays => &self.plays,
            StoreKind::Schedule => &self.schedule,
        }
    }

    /// Close both stores; failures are logged by the store itself
    pub fn close(&self) {
        self.plays.close();
        self.schedule.close();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Plays,
    Schedule,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Plays => f.write_str("plays"),
            StoreKind::Schedule => f.write_str("schedule"),
        }
    }
}

/// Response shape and failure policy of a sub-API.
///
/// - `Plays`: bare row array; query failures are 500 with `details`.
/// - `Schedule`: `{"message": "success", "data": [...]}`; query failures are
///   400, indistinguishable from validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Plays,
    Schedule,
}

impl Family {
    fn success(self, rows: Vec<Row>) -> Response {
        match self {
            Family::Plays => Json(rows).into_response(),
            Family::Schedule => Json(ScheduleResponse::success(rows)).into_response(),
        }
    }
}

/// One entry of the route table
#[derive(Debug)]
pub struct RouteSpec {
    pub name: &'static str,
    pub method: HttpMethod,
    pub pattern: &'static str,
    /// Path parameters in bind order
    pub params: &'static [&'static str],
    pub rule: Validation,
    pub store: StoreKind,
    pub sql: &'static str,
    pub family: Family,
    /// 404 message for an empty result. `None` means empty is a success.
    pub not_found: Option<&'static str>,
}

/// Every lookup, in registration order
pub static ROUTES: &[RouteSpec] = &[
    RouteSpec {
        name: "all_plays",
        method: HttpMethod::Get,
        pattern: "/plays",
        params: &[],
        rule: Validation::None,
        store: StoreKind::Plays,
        sql: sql::ALL_PLAYS,
        family: Family::Plays,
        not_found: None,
    },
    RouteSpec {
        name: "plays_by_game",
        method: HttpMethod::Get,
        pattern: "/plays/:game_id",
        params: &["game_id"],
        rule: Validation::NonEmpty,
        store: StoreKind::Plays,
        sql: sql::PLAYS_BY_GAME,
        family: Family::Plays,
        not_found: Some("No plays found for this game"),
    },
    RouteSpec {
        name: "plays_by_date",
        method: HttpMethod::Get,
        pattern: "/plays/date/:game_date",
        params: &["game_date"],
        rule: Validation::NonEmpty,
        store: StoreKind::Plays,
        sql: sql::PLAYS_BY_DATE,
        family: Family::Plays,
        not_found: Some("No plays found for this date"),
    },
    RouteSpec {
        name: "plays_by_date_and_game",
        method: HttpMethod::Get,
        pattern: "/plays/date/:game_date/game/:game_id",
        params: &["game_date", "game_id"],
        rule: Validation::NonEmpty,
        store: StoreKind::Plays,
        sql: sql::PLAYS_BY_DATE_AND_GAME,
        family: Family::Plays,
        not_found: Some("No plays found for this date and game"),
    },
    RouteSpec {
        name: "all_games",
        method: HttpMethod::Get,
        pattern: "/games",
        params: &[],
        rule: Validation::None,
        store: StoreKind::Schedule,
        sql: sql::ALL_GAMES,
        family: Family::Schedule,
        not_found: None,
    },
    RouteSpec {
        name: "game_by_id",
        method: HttpMethod::Get,
        pattern: "/games/:id",
        params: &["id"],
        rule: Validation::None,
        store: StoreKind::Schedule,
        sql: sql::GAME_BY_ID,
        family: Family::Schedule,
        not_found: None,
    },
    RouteSpec {
        name: "games_by_home_team",
        method: HttpMethod::Get,
        pattern: "/games/home/:name",
        params: &["name"],
        rule: Validation::None,
        store: StoreKind::Schedule,
        sql: sql::GAMES_BY_HOME_TEAM,
        family: Family::Schedule,
        not_found: None,
    },
    RouteSpec {
        name: "games_by_away_team",
        method: HttpMethod::Get,
        pattern: "/games/away/:name",
        params: &["name"],
        rule: Validation::None,
        store: StoreKind::Schedule,
        sql: sql::GAMES_BY_AWAY_TEAM,
        family: Family::Schedule,
        not_found: None,
    },
    RouteSpec {
        name: "games_by_status",
        method: HttpMethod::Get,
        pattern: "/games/status/:status",
        params: &["status"],
        rule: Validation::OneOf(GAME_STATUSES),
        store: StoreKind::Schedule,
        sql: sql::GAMES_BY_STATUS,
        family: Family::Schedule,
        not_found: None,
    },
    RouteSpec {
        name: "games_by_date",
        method: HttpMethod::Get,
        pattern: "/games/date/:date",
        params: &["date"],
        rule: Validation::IsoDate,
        store: StoreKind::Schedule,
        sql: sql::GAMES_BY_DATE,
        family: Family::Schedule,
        not_found: None,
    },
];

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<String>,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
            details: None,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
            details: None,
        }
    }

    /// Classify a failed query according to the route's family
    pub fn execution(family: Family, err: &StoreError) -> Self {
        match family {
            Family::Plays => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Internal server error".to_string(),
                details: Some(err.to_string()),
            },
            Family::Schedule => Self::bad_request(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

/// Build the router with every table entry plus `/health`.
///
/// Each entry also answers with a trailing slash (`/plays/` serves `/plays`).
pub fn router(state: Arc<AppState>) -> Router {
    ROUTES
        .iter()
        .fold(Router::new().route("/health", get(health)), |router, spec| {
            let route = method_router(spec);
            router
                .route(spec.pattern, route.clone())
                .route(&format!("{}/", spec.pattern), route)
        })
        .with_state(state)
}

fn method_router(spec: &'static RouteSpec) -> MethodRouter<Arc<AppState>> {
    let filter = spec.method.filter();
    if spec.params.is_empty() {
        on(filter, move |State(state): State<Arc<AppState>>| {
            lookup(spec, state, Ok(HashMap::new()))
        })
    } else {
        on(
            filter,
            move |State(state): State<Arc<AppState>>,
                  params: Result<Path<HashMap<String, String>>, PathRejection>| {
                lookup(spec, state, params.map(|Path(params)| params))
            },
        )
    }
}

async fn lookup(
    spec: &'static RouteSpec,
    state: Arc<AppState>,
    params: Result<HashMap<String, String>, PathRejection>,
) -> Response {
    // Undecodable segments (invalid UTF-8) get the same JSON error shape
    let params = match params {
        Ok(params) => params,
        Err(rejection) => {
            let msg = rejection.body_text();
            warn!(route = spec.name, "{}", msg);
            return ApiError::bad_request(msg).into_response();
        }
    };

    match run_lookup(spec, &state, params).await {
        Ok(rows) => spec.family.success(rows),
        Err(e) => e.into_response(),
    }
}

async fn run_lookup(
    spec: &'static RouteSpec,
    state: &AppState,
    mut params: HashMap<String, String>,
) -> Result<Vec<Row>, ApiError> {
    let mut bound = Vec::with_capacity(spec.params.len());
    for &name in spec.params {
        let value = params.remove(name).unwrap_or_default();
        if let Err(msg) = spec.rule.check(name, &value) {
            warn!(route = spec.name, param = name, value = %value, "{}", msg);
            return Err(ApiError::bad_request(msg));
        }
        bound.push(value);
    }

    let rows = state
        .store(spec.store)
        .query(spec.sql, bound)
        .await
        .map_err(|e| {
            error!(route = spec.name, store = %spec.store, error = %e, "Query failed");
            ApiError::execution(spec.family, &e)
        })?;

    if rows.is_empty() {
        if let Some(msg) = spec.not_found {
            warn!(route = spec.name, "{}", msg);
            return Err(ApiError::not_found(msg));
        }
    }

    Ok(rows)
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        stores: StoreStatus {
            plays: state.plays.is_open(),
            schedule: state.schedule.is_open(),
        },
    })
}
