pub mod error;
pub mod health;
pub mod load;
pub mod simulation;
pub mod weather;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::warn;

use crate::{
    config::Config,
    forecast::{OpenMeteoClient, WeatherForecaster},
};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub forecaster: Arc<dyn WeatherForecaster>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self> {
        let forecaster = OpenMeteoClient::new(
            cfg.forecast.base_url.clone(),
            Duration::from_secs(cfg.forecast.http_timeout_seconds),
        )?;
        Ok(Self::with_forecaster(cfg, Arc::new(forecaster)))
    }

    pub fn with_forecaster(cfg: Config, forecaster: Arc<dyn WeatherForecaster>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            forecaster,
        }
    }
}

fn v1_router() -> Router<AppState> {
    Router::new()
        .route("/solar/simulate", post(simulation::simulate_solar))
        .route("/battery/simulate", post(simulation::simulate_battery))
        .route("/load/profile", post(load::build_load_profile))
        .route("/appliances", get(load::list_appliances))
        .route("/weather/forecast", get(weather::get_weather_forecast))
}

pub fn router(state: AppState) -> Router {
    let cfg = state.cfg.clone();

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", v1_router())
        .with_state(state);

    if cfg.server.enable_cors {
        match cfg.server.cors_origin.parse::<HeaderValue>() {
            Ok(origin) => {
                let cors = CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([Method::GET, Method::POST])
                    .allow_headers([axum::http::header::CONTENT_TYPE]);
                router = router.layer(cors);
            }
            Err(e) => warn!(origin = %cfg.server.cors_origin, error = %e, "invalid CORS origin, CORS disabled"),
        }
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(cfg.server.request_timeout_secs))),
        )
        .layer(TraceLayer::new_for_http())
}
