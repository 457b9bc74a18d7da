//! # Server Configuration
//!
//! Server setup and routing for the Houseflow API.

use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_middleware;
use crate::config::AppConfig;
use crate::handlers;
use crate::storage::{DynPhotoStore, LocalPhotoStore};
use crate::telemetry::{self, TraceContext};
use crate::workflow::LifecycleService;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Arc<DatabaseConnection>,
    pub lifecycle: LifecycleService,
    pub photos: DynPhotoStore,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        let config = Arc::new(config);
        let db = Arc::new(db);
        let photos: DynPhotoStore =
            Arc::new(LocalPhotoStore::new(config.photo_storage_root.clone()));
        Self {
            lifecycle: LifecycleService::new(Arc::clone(&db)),
            config,
            db,
            photos,
        }
    }

    /// State with a custom photo store (used by tests).
    pub fn with_photo_store(config: AppConfig, db: DatabaseConnection, photos: DynPhotoStore) -> Self {
        let config = Arc::new(config);
        let db = Arc::new(db);
        Self {
            lifecycle: LifecycleService::new(Arc::clone(&db)),
            config,
            db,
            photos,
        }
    }
}

/// Attaches a trace context to every request, honoring an incoming
/// `X-Trace-Id` header when present.
async fn trace_middleware(mut request: Request, next: Next) -> Response {
    let context = request
        .headers()
        .get("X-Trace-Id")
        .and_then(|value| value.to_str().ok())
        .map(|trace_id| TraceContext {
            trace_id: trace_id.to_string(),
        })
        .unwrap_or_else(TraceContext::generate);

    request.extensions_mut().insert(context.clone());
    telemetry::with_trace_context(context, next.run(request)).await
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let upload_limit = state.config.photo_upload_max_kb * 1024;

    let protected = Router::new()
        .route("/api/v1/profiles", post(handlers::profiles::create_profile))
        .route("/api/v1/profiles", get(handlers::profiles::list_profiles))
        .route(
            "/api/v1/profiles/{id}",
            get(handlers::profiles::get_profile),
        )
        .route("/api/v1/houses", post(handlers::housing::create_house))
        .route("/api/v1/houses", get(handlers::housing::list_houses))
        .route(
            "/api/v1/houses/{id}/rooms",
            post(handlers::housing::create_room),
        )
        .route(
            "/api/v1/houses/{id}/rooms",
            get(handlers::housing::list_rooms),
        )
        .route(
            "/api/v1/houses/{id}/coordinators",
            post(handlers::housing::assign_coordinator),
        )
        .route(
            "/api/v1/houses/{id}/coordinators",
            get(handlers::housing::list_coordinators),
        )
        .route(
            "/api/v1/houses/{id}/coordinators/{user_id}",
            delete(handlers::housing::remove_coordinator),
        )
        .route(
            "/api/v1/tenancies",
            post(handlers::tenancies::create_tenancy),
        )
        .route("/api/v1/tenancies", get(handlers::tenancies::list_tenancies))
        .route("/api/v1/my-tenancy", get(handlers::tenancies::my_tenancy))
        .route(
            "/api/v1/tenancies/{id}",
            get(handlers::tenancies::get_tenancy),
        )
        .route(
            "/api/v1/tenancies/{id}/end",
            post(handlers::tenancies::end_tenancy),
        )
        .route(
            "/api/v1/tenancies/{id}/move-out-intention",
            post(handlers::move_out::submit_intention),
        )
        .route(
            "/api/v1/move-out-intentions",
            get(handlers::move_out::list_intentions),
        )
        .route(
            "/api/v1/move-out-intentions/{id}/review",
            post(handlers::move_out::review_intention),
        )
        .route(
            "/api/v1/tenancies/{id}/photos/{category}",
            post(handlers::move_out::upload_photo).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/tenancies/{id}/inspections",
            post(handlers::inspections::create_inspection),
        )
        .route(
            "/api/v1/inspections/{id}",
            get(handlers::inspections::get_inspection),
        )
        .route(
            "/api/v1/inspections/{id}/checklist",
            put(handlers::inspections::save_checklist),
        )
        .route(
            "/api/v1/inspections/{id}/finalize",
            post(handlers::inspections::finalize_inspection),
        )
        .route(
            "/api/v1/tenancies/{id}/keys-received",
            post(handlers::move_in::confirm_keys_received),
        )
        .route(
            "/api/v1/tenancies/{id}/move-in",
            post(handlers::move_in::complete_move_in),
        )
        .route(
            "/api/v1/rooms/{id}/previous-tenant-evidence",
            get(handlers::move_in::previous_tenant_evidence),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(axum::middleware::from_fn(trace_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;
    let profile = config.profile.clone();

    let state = AppState::new(config, db);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::profiles::create_profile,
        crate::handlers::profiles::list_profiles,
        crate::handlers::profiles::get_profile,
        crate::handlers::housing::create_house,
        crate::handlers::housing::list_houses,
        crate::handlers::housing::create_room,
        crate::handlers::housing::list_rooms,
        crate::handlers::housing::list_coordinators,
        crate::handlers::housing::assign_coordinator,
        crate::handlers::housing::remove_coordinator,
        crate::handlers::tenancies::create_tenancy,
        crate::handlers::tenancies::list_tenancies,
        crate::handlers::tenancies::my_tenancy,
        crate::handlers::tenancies::get_tenancy,
        crate::handlers::tenancies::end_tenancy,
        crate::handlers::move_out::submit_intention,
        crate::handlers::move_out::list_intentions,
        crate::handlers::move_out::review_intention,
        crate::handlers::move_out::upload_photo,
        crate::handlers::inspections::create_inspection,
        crate::handlers::inspections::get_inspection,
        crate::handlers::inspections::save_checklist,
        crate::handlers::inspections::finalize_inspection,
        crate::handlers::move_in::confirm_keys_received,
        crate::handlers::move_in::complete_move_in,
        crate::handlers::move_in::previous_tenant_evidence,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::handlers::profiles::CreateProfileDto,
            crate::handlers::profiles::ProfileDto,
            crate::handlers::housing::CreateHouseDto,
            crate::handlers::housing::HouseDto,
            crate::handlers::housing::CreateRoomDto,
            crate::handlers::housing::RoomDto,
            crate::handlers::housing::AssignCoordinatorDto,
            crate::handlers::housing::CoordinatorDto,
            crate::handlers::tenancies::CreateTenancyDto,
            crate::handlers::tenancies::TenancyDto,
            crate::handlers::move_out::SubmitIntentionDto,
            crate::handlers::move_out::IntentionDto,
            crate::handlers::move_out::ReviewIntentionDto,
            crate::handlers::move_out::PhotoUploadResponseDto,
            crate::handlers::inspections::ChecklistItemDto,
            crate::handlers::inspections::ChecklistDto,
            crate::handlers::inspections::InspectionDto,
            crate::handlers::move_in::CompleteMoveInDto,
            crate::handlers::move_in::PriorEvidenceDto,
        )
    ),
    info(
        title = "Houseflow API",
        description = "Tenancy lifecycle API: move-out intentions, inspections and move-in acknowledgements",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
