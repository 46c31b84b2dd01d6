use std::sync::Arc;

use axum::{Json, extract::State};
use axum_extra::extract::Form;

use crate::forms::ShowForm;
use crate::http_server::error::Report;
use crate::http_server::flash::HomePage;
use crate::http_server::mutations;
use crate::http_server::state::AppState;
use crate::services::show::{ShowListing, ShowService};

pub async fn list_shows(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, Report> {
    let shows = ShowService::new(app_state.db.clone()).list().await?;
    Ok(Json(shows))
}

pub async fn create_show_form() -> Json<ShowForm> {
    Json(ShowForm::default())
}

pub async fn create_show_submission(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> Json<HomePage> {
    Json(mutations::create_show(&app_state, form).await.into())
}
