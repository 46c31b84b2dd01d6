use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::Form;
use serde::Serialize;

use crate::forms::VenueForm;
use crate::http_server::error::Report;
use crate::http_server::flash::HomePage;
use crate::http_server::http_routes::{SearchForm, SearchPage};
use crate::http_server::mutations;
use crate::http_server::state::AppState;
use crate::ports::clock::Clock;
use crate::services::venue::{VenueArea, VenueDetail, VenueService};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditVenuePage {
    pub form: VenueForm,
    pub venue: VenueDetail,
}

fn service(app_state: &AppState) -> VenueService<Arc<dyn Clock>> {
    VenueService::new(app_state.db.clone(), app_state.clock.clone())
}

pub async fn list_venues(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<VenueArea>>, Report> {
    Ok(Json(service(&app_state).list_by_area().await?))
}

pub async fn search_venues(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchPage>, Report> {
    let results = service(&app_state).search(&form.search_term).await?;
    Ok(Json(SearchPage {
        search_term: form.search_term,
        results,
    }))
}

pub async fn show_venue(
    State(app_state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
) -> Result<Json<VenueDetail>, Report> {
    Ok(Json(service(&app_state).detail(venue_id).await?))
}

pub async fn create_venue_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

pub async fn create_venue_submission(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> Json<HomePage> {
    Json(mutations::create_venue(&app_state, form).await.into())
}

pub async fn delete_venue(
    State(app_state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
) -> Json<HomePage> {
    Json(mutations::delete_venue(&app_state, venue_id).await.into())
}

pub async fn edit_venue(
    State(app_state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
) -> Result<Json<EditVenuePage>, Report> {
    let service = service(&app_state);
    let form = service.get(venue_id).await?.into();
    let venue = service.detail(venue_id).await?;
    Ok(Json(EditVenuePage { form, venue }))
}

pub async fn edit_venue_submission(
    State(app_state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> Json<HomePage> {
    Json(mutations::update_venue(&app_state, venue_id, form).await.into())
}
