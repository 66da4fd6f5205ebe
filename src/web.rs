use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::{EditError, StoreError};
use crate::form::{apply_edit, AddEventForm, AddEventRequest, EditOp};
use crate::projection::{categories, chart_series, events_by_category, team_detail};
use crate::role::{can_access_admin, can_edit_events, Role};
use crate::seed::{mock_user, mock_users};
use crate::standings::LiveTicker;
use crate::store::{EventDefinition, EventFields, EventId, SharedStore};

/// Header carrying the caller's role. Absent means `user`.
pub const ROLE_HEADER: &str = "X-Sims-Role";

pub struct AppState {
    pub store: SharedStore,
    pub ticker: LiveTicker,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Role '{0}' is not allowed to {1}")]
    Forbidden(Role, &'static str),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Unknown role '{0}'")]
    BadRole(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::Validation { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::UnknownSeries(_)) => StatusCode::NOT_FOUND,
            ApiError::Edit(_) | ApiError::BadRole(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(..) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

type ApiResult = Result<HttpResponse, ApiError>;

#[derive(Deserialize)]
pub struct SelectRequest {
    name: String,
}

fn role_of(req: &HttpRequest) -> Result<Role, ApiError> {
    match req.headers().get(ROLE_HEADER) {
        None => Ok(Role::default()),
        Some(value) => {
            let text = value.to_str().map_err(|_| ApiError::BadRole("<binary>".to_string()))?;
            text.parse::<Role>().map_err(|_| ApiError::BadRole(text.to_string()))
        }
    }
}

fn require_editor(req: &HttpRequest, action: &'static str) -> Result<Role, ApiError> {
    let role = role_of(req)?;
    if !can_edit_events(role) {
        warn!(role = %role, action, "Rejected event change");
        return Err(ApiError::Forbidden(role, action));
    }
    Ok(role)
}

async fn list_series(state: web::Data<AppState>) -> ApiResult {
    let (store, changed_at) = state.store.snapshot_with_time();
    let series: Vec<serde_json::Value> = store
        .series_names()
        .into_iter()
        .filter_map(|name| {
            let data = store.series(name)?;
            Some(serde_json::json!({
                "name": name,
                "teams": data.leaderboard.len(),
                "events": data.events.len(),
            }))
        })
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "series": series,
        "selected": store.selected_name(),
        "revision": store.revision(),
        "changedAt": changed_at,
    })))
}

async fn select_series(body: web::Json<SelectRequest>, state: web::Data<AppState>) -> ApiResult {
    let selected = state.store.try_apply(|s| {
        let next = s.select(&body.name)?;
        let name = next.selected_name().to_string();
        Ok::<_, StoreError>((next, name))
    })?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "selected": selected})))
}

async fn get_dashboard(state: web::Data<AppState>) -> ApiResult {
    let store = state.store.snapshot();
    let data = store.selected();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "series": store.selected_name(),
        "statCards": data.stat_cards,
        "topPlayers": data.top_players,
        "chart": chart_series(&data.leaderboard),
    })))
}

async fn get_leaderboard(state: web::Data<AppState>) -> ApiResult {
    let (store, changed_at) = state.store.snapshot_with_time();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "series": store.selected_name(),
        "leaderboard": store.selected().leaderboard,
        "live": state.ticker.is_running(),
        "changedAt": changed_at,
    })))
}

async fn get_team(req: HttpRequest, path: web::Path<String>, state: web::Data<AppState>) -> ApiResult {
    let role = role_of(&req)?;
    let name = path.into_inner();
    let store = state.store.snapshot();
    let view = team_detail(&store.selected().leaderboard, &name, role)
        .ok_or_else(|| ApiError::NotFound(format!("Team '{}'", name)))?;
    Ok(HttpResponse::Ok().json(view))
}

async fn mount_live(state: web::Data<AppState>) -> ApiResult {
    let started = state.ticker.mount();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "running": true,
        "started": started,
        "periodMs": state.ticker.period().as_millis() as u64,
    })))
}

async fn unmount_live(state: web::Data<AppState>) -> ApiResult {
    let stopped = state.ticker.unmount();
    Ok(HttpResponse::Ok().json(serde_json::json!({"running": false, "stopped": stopped})))
}

async fn list_events(state: web::Data<AppState>) -> ApiResult {
    let store = state.store.snapshot();
    let events = &store.selected().events;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "series": store.selected_name(),
        "groups": events_by_category(events),
        "categories": categories(events),
    })))
}

async fn add_event(req: HttpRequest, body: web::Json<AddEventRequest>, state: web::Data<AppState>) -> ApiResult {
    require_editor(&req, "add events")?;
    let fields = AddEventForm::from(body.into_inner()).finish()?;
    let event = state.store.try_apply(|s| s.add_event(fields))?;
    Ok(HttpResponse::Created().json(serde_json::json!({"success": true, "event": event})))
}

async fn update_event(
    req: HttpRequest,
    path: web::Path<EventId>,
    body: web::Json<EventFields>,
    state: web::Data<AppState>,
) -> ApiResult {
    require_editor(&req, "edit events")?;
    let fields = body.into_inner();
    let id = path.into_inner();

    let applied = state.store.apply(|s| {
        let result = s.update_event(EventDefinition::new(id, fields));
        (result.store, result.applied)
    });
    if !applied {
        info!(id, "Update for unknown event ignored");
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "applied": applied})))
}

/// Applies one nested edit (judge or criterion) to a stored event
async fn edit_event(
    req: HttpRequest,
    path: web::Path<EventId>,
    body: web::Json<EditOp>,
    state: web::Data<AppState>,
) -> ApiResult {
    require_editor(&req, "edit events")?;
    let id = path.into_inner();
    let op = body.into_inner();

    let event = state.store.try_apply(|s| {
        let current = s.find_event(id).ok_or_else(|| ApiError::NotFound(format!("Event {}", id)))?;
        let edited = apply_edit(&**current, &op)?;
        let result = s.update_event(edited.clone());
        Ok::<_, ApiError>((result.store, edited))
    })?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "event": event})))
}

async fn delete_event(req: HttpRequest, path: web::Path<EventId>, state: web::Data<AppState>) -> ApiResult {
    require_editor(&req, "delete events")?;
    let id = path.into_inner();

    let applied = state.store.apply(|s| {
        let result = s.delete_event(id);
        (result.store, result.applied)
    });
    if !applied {
        info!(id, "Delete for unknown event ignored");
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "applied": applied})))
}

async fn get_rules(state: web::Data<AppState>) -> ApiResult {
    let store = state.store.snapshot();
    match &store.selected().rules {
        Some(rules) => Ok(HttpResponse::Ok().json(rules)),
        None => Err(ApiError::NotFound(format!("Rules for '{}'", store.selected_name()))),
    }
}

async fn get_profile(req: HttpRequest) -> ApiResult {
    let role = role_of(&req)?;
    Ok(HttpResponse::Ok().json(mock_user(role)))
}

async fn list_users(req: HttpRequest) -> ApiResult {
    let role = role_of(&req)?;
    if !can_access_admin(role) {
        return Err(ApiError::Forbidden(role, "view users"));
    }
    Ok(HttpResponse::Ok().json(mock_users()))
}

/// Registers every API route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/series", web::get().to(list_series))
        .route("/api/series/select", web::post().to(select_series))
        .route("/api/dashboard", web::get().to(get_dashboard))
        .route("/api/leaderboard", web::get().to(get_leaderboard))
        // registered before "/{team}" so it wins the match
        .service(
            web::resource("/api/leaderboard/live")
                .route(web::post().to(mount_live))
                .route(web::delete().to(unmount_live)),
        )
        .service(web::resource("/api/leaderboard/{team}").route(web::get().to(get_team)))
        .service(
            web::resource("/api/events")
                .route(web::get().to(list_events))
                .route(web::post().to(add_event)),
        )
        .service(
            web::resource("/api/events/{id}")
                .route(web::put().to(update_event))
                .route(web::delete().to(delete_event)),
        )
        .route("/api/events/{id}/edits", web::post().to(edit_event))
        .route("/api/rules", web::get().to(get_rules))
        .route("/api/profile", web::get().to(get_profile))
        .route("/api/admin/users", web::get().to(list_users));
}

/// Serves the API until the server stops, then cancels the live ticker
pub async fn start_server(port: u16, state: web::Data<AppState>) -> std::io::Result<()> {
    info!(port, "Starting web server");
    let server_state = state.clone();
    let result = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await;

    state.ticker.unmount();
    info!("Web server stopped");
    result
}
