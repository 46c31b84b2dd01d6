use std::sync::Arc;

use async_graphql_axum::GraphQL;
use axum::{
    Router,
    routing::{get, post},
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
#[cfg(not(debug_assertions))]
use tower_http::cors::{AllowMethods, AllowOrigin};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    database::Database,
    http_server::{
        error,
        graphql,
        http_routes::{artists, pages, shows, venues},
        state::AppState,
    },
    ports::clock::SystemClock,
};

pub struct HttpServerConfig {
    pub port: u16,
    pub bind_address: String,
    pub database: Database,
    /// Allowed CORS origin for release builds
    pub allowed_origin: Option<String>,
}

fn cors_layer(
    #[cfg_attr(debug_assertions, allow(unused_variables))] allowed_origin: Option<&str>,
) -> color_eyre::Result<CorsLayer> {
    #[cfg(debug_assertions)]
    {
        Ok(CorsLayer::permissive())
    }

    #[cfg(not(debug_assertions))]
    {
        let origin = match allowed_origin {
            Some(origin) => AllowOrigin::exact(
                origin
                    .parse()
                    .wrap_err_with(|| eyre!("Invalid allowed origin: {}", origin))?,
            ),
            None => AllowOrigin::any(),
        };
        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(AllowMethods::any()))
    }
}

pub fn router(app_state: Arc<AppState>, cors: CorsLayer) -> Router {
    let schema = graphql::create_schema(app_state.clone());

    Router::new()
        .route("/", get(pages::index))
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue_submission),
        )
        .route("/venues/{venue_id}", get(venues::show_venue))
        .route("/venues/{venue_id}/delete", post(venues::delete_venue))
        .route(
            "/venues/{venue_id}/edit",
            get(venues::edit_venue).post(venues::edit_venue_submission),
        )
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist_submission),
        )
        .route("/artists/{artist_id}", get(artists::show_artist))
        .route("/artists/{artist_id}/delete", post(artists::delete_artist))
        .route(
            "/artists/{artist_id}/edit",
            get(artists::edit_artist).post(artists::edit_artist_submission),
        )
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show_submission),
        )
        .route(
            "/graphql",
            get(graphql::graphql).post_service(GraphQL::new(schema)),
        )
        .fallback(error::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state)
}

pub async fn start(config: HttpServerConfig) -> color_eyre::Result<()> {
    let HttpServerConfig {
        port,
        bind_address,
        database,
        allowed_origin,
    } = config;

    let app_state = Arc::new(AppState {
        db: Arc::new(database),
        clock: Arc::new(SystemClock),
    });

    let app = router(app_state, cors_layer(allowed_origin.as_deref())?);

    let address = format!("{}:{}", bind_address, port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .wrap_err_with(|| eyre!("Failed to bind to {}", address))?;
    log::info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}
