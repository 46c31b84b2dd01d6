use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::Form;
use serde::Serialize;

use crate::forms::ArtistForm;
use crate::http_server::error::Report;
use crate::http_server::flash::HomePage;
use crate::http_server::http_routes::{SearchForm, SearchPage};
use crate::http_server::mutations;
use crate::http_server::state::AppState;
use crate::ports::clock::Clock;
use crate::services::artist::{ArtistDetail, ArtistService, ArtistSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditArtistPage {
    pub form: ArtistForm,
    pub artist: ArtistDetail,
}

fn service(app_state: &AppState) -> ArtistService<Arc<dyn Clock>> {
    ArtistService::new(app_state.db.clone(), app_state.clock.clone())
}

pub async fn list_artists(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistSummary>>, Report> {
    Ok(Json(service(&app_state).list().await?))
}

pub async fn search_artists(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchPage>, Report> {
    let results = service(&app_state).search(&form.search_term).await?;
    Ok(Json(SearchPage {
        search_term: form.search_term,
        results,
    }))
}

pub async fn show_artist(
    State(app_state): State<Arc<AppState>>,
    Path(artist_id): Path<i64>,
) -> Result<Json<ArtistDetail>, Report> {
    Ok(Json(service(&app_state).detail(artist_id).await?))
}

pub async fn create_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

pub async fn create_artist_submission(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<ArtistForm>,
) -> Json<HomePage> {
    Json(mutations::create_artist(&app_state, form).await.into())
}

pub async fn delete_artist(
    State(app_state): State<Arc<AppState>>,
    Path(artist_id): Path<i64>,
) -> Json<HomePage> {
    Json(mutations::delete_artist(&app_state, artist_id).await.into())
}

pub async fn edit_artist(
    State(app_state): State<Arc<AppState>>,
    Path(artist_id): Path<i64>,
) -> Result<Json<EditArtistPage>, Report> {
    let service = service(&app_state);
    let form = service.get(artist_id).await?.into();
    let artist = service.detail(artist_id).await?;
    Ok(Json(EditArtistPage { form, artist }))
}

pub async fn edit_artist_submission(
    State(app_state): State<Arc<AppState>>,
    Path(artist_id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> Json<HomePage> {
    Json(mutations::update_artist(&app_state, artist_id, form).await.into())
}
