//! Mutation boundary shared by the form routes and the GraphQL schema.
//!
//! Every failure is logged and turned into a generic notice; database error
//! text never reaches the user. Sea-orm rolls back any transaction that did
//! not commit, and pooled connections are released when dropped.

use color_eyre::Result;

use crate::forms::{ArtistForm, ShowForm, VenueForm};
use crate::http_server::flash::Flash;
use crate::http_server::state::AppState;
use crate::services::artist::ArtistService;
use crate::services::show::ShowService;
use crate::services::venue::VenueService;

fn settle<T>(outcome: Result<T>, action: &str, success: String, failure: String) -> Flash {
    match outcome {
        Ok(_) => Flash::success(success),
        Err(err) => {
            log::error!("Failed to {action}: {err:?}");
            Flash::error(failure)
        }
    }
}

// ---- Venues ----

async fn try_create_venue(state: &AppState, form: VenueForm) -> Result<()> {
    let input = form.validate()?;
    VenueService::new(state.db.clone(), state.clock.clone())
        .create(input)
        .await?;
    Ok(())
}

pub async fn create_venue(state: &AppState, form: VenueForm) -> Flash {
    let name = form.name.trim().to_string();
    let outcome = try_create_venue(state, form).await;
    settle(
        outcome,
        &format!("create venue '{name}'"),
        format!("Venue {name} was successfully listed!"),
        format!("An error occurred. Venue {name} could not be listed."),
    )
}

async fn try_update_venue(state: &AppState, venue_id: i64, form: VenueForm) -> Result<()> {
    let input = form.validate()?;
    VenueService::new(state.db.clone(), state.clock.clone())
        .update(venue_id, input)
        .await?;
    Ok(())
}

pub async fn update_venue(state: &AppState, venue_id: i64, form: VenueForm) -> Flash {
    let outcome = try_update_venue(state, venue_id, form).await;
    settle(
        outcome,
        &format!("edit venue {venue_id}"),
        "Venue successfully edited".to_string(),
        "Something went wrong! Venue was not edited".to_string(),
    )
    .with_redirect(format!("/venues/{venue_id}"))
}

pub async fn delete_venue(state: &AppState, venue_id: i64) -> Flash {
    let outcome = VenueService::new(state.db.clone(), state.clock.clone())
        .delete(venue_id)
        .await;
    settle(
        outcome,
        &format!("delete venue {venue_id}"),
        "Venue was successfully deleted!".to_string(),
        "An error occurred. Venue could not be deleted.".to_string(),
    )
}

// ---- Artists ----

async fn try_create_artist(state: &AppState, form: ArtistForm) -> Result<()> {
    let input = form.validate()?;
    ArtistService::new(state.db.clone(), state.clock.clone())
        .create(input)
        .await?;
    Ok(())
}

pub async fn create_artist(state: &AppState, form: ArtistForm) -> Flash {
    let name = form.name.trim().to_string();
    let outcome = try_create_artist(state, form).await;
    settle(
        outcome,
        &format!("create artist '{name}'"),
        format!("Artist {name} was successfully listed!"),
        format!("An error occurred. Artist {name} could not be listed."),
    )
}

async fn try_update_artist(state: &AppState, artist_id: i64, form: ArtistForm) -> Result<()> {
    let input = form.validate()?;
    ArtistService::new(state.db.clone(), state.clock.clone())
        .update(artist_id, input)
        .await?;
    Ok(())
}

pub async fn update_artist(state: &AppState, artist_id: i64, form: ArtistForm) -> Flash {
    let outcome = try_update_artist(state, artist_id, form).await;
    settle(
        outcome,
        &format!("edit artist {artist_id}"),
        "Artist successfully edited".to_string(),
        "Something went wrong! Artist was not edited".to_string(),
    )
    .with_redirect(format!("/artists/{artist_id}"))
}

pub async fn delete_artist(state: &AppState, artist_id: i64) -> Flash {
    let outcome = ArtistService::new(state.db.clone(), state.clock.clone())
        .delete(artist_id)
        .await;
    settle(
        outcome,
        &format!("delete artist {artist_id}"),
        "Artist was successfully deleted!".to_string(),
        "An error occurred. Artist could not be deleted.".to_string(),
    )
}

// ---- Shows ----

async fn try_create_show(state: &AppState, form: ShowForm) -> Result<()> {
    let input = form.validate()?;
    ShowService::new(state.db.clone()).create(input).await?;
    Ok(())
}

pub async fn create_show(state: &AppState, form: ShowForm) -> Flash {
    let outcome = try_create_show(state, form).await;
    settle(
        outcome,
        "create show",
        "Show was successfully listed!".to_string(),
        "An error occurred. Show could not be listed.".to_string(),
    )
}
