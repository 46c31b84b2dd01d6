use std::sync::Arc;

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use color_eyre::eyre::{Result, WrapErr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;

use crate::database::Database;
use crate::entities;
use crate::ports::clock::Clock;
use crate::services::error::ServiceError;
use crate::services::schedule::{partition, upcoming_counts};
use crate::services::search::{apply_text_search, name_matches};
use crate::services::{Listing, SearchResults, non_blank};

/// Venues sharing one exact (city, state) pair.
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<Listing>,
}

/// A show on a venue page, described by the artist playing it.
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Validated values for creating or replacing a venue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    fn apply(self, venue: &mut entities::venue::ActiveModel) {
        venue.name = Set(self.name);
        venue.city = Set(self.city);
        venue.state = Set(self.state);
        venue.address = Set(self.address);
        venue.phone = Set(non_blank(self.phone));
        venue.image_link = Set(non_blank(self.image_link));
        venue.facebook_link = Set(non_blank(self.facebook_link));
        venue.website_link = Set(non_blank(self.website_link));
        venue.genres = Set(self.genres.into());
        venue.seeking_talent = Set(self.seeking_talent);
        venue.seeking_description = Set(non_blank(self.seeking_description));
    }
}

pub struct VenueService<C: Clock> {
    db: Arc<Database>,
    clock: C,
}

impl<C: Clock> VenueService<C> {
    pub fn new(db: Arc<Database>, clock: C) -> Self {
        Self { db, clock }
    }

    // ---- Queries ----

    /// Every venue, grouped by exact (city, state), with upcoming show counts.
    pub async fn list_by_area(&self) -> Result<Vec<VenueArea>> {
        let venues = entities::venue::Entity::find()
            .order_by_asc(entities::venue::Column::State)
            .order_by_asc(entities::venue::Column::City)
            .order_by_asc(entities::venue::Column::Name)
            .order_by_asc(entities::venue::Column::Id)
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch venues")?;

        let counts = upcoming_counts(
            &self.db.conn,
            entities::show::Column::VenueId,
            self.clock.now(),
        )
        .await?;

        let mut areas: Vec<VenueArea> = Vec::new();
        for venue in venues {
            let listing = Listing {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
            };

            // Sorted by (state, city), so each area is one contiguous run
            match areas.last_mut() {
                Some(area) if area.city == venue.city && area.state == venue.state => {
                    area.venues.push(listing)
                }
                _ => areas.push(VenueArea {
                    city: venue.city,
                    state: venue.state,
                    venues: vec![listing],
                }),
            }
        }

        log::debug!("Listed venues in {} areas", areas.len());
        Ok(areas)
    }

    /// Case-insensitive partial match on venue name.
    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        let query = apply_text_search(
            entities::venue::Entity::find(),
            entities::venue::Column::Name,
            term,
        );

        let venues = query
            .order_by_asc(entities::venue::Column::Name)
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to search venues")?;

        let counts = upcoming_counts(
            &self.db.conn,
            entities::show::Column::VenueId,
            self.clock.now(),
        )
        .await?;

        let data: Vec<Listing> = venues
            .into_iter()
            .filter(|venue| name_matches(&venue.name, term))
            .map(|venue| Listing {
                num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
                id: venue.id,
                name: venue.name,
            })
            .collect();

        log::debug!("Venue search '{}' matched {}", term, data.len());
        Ok(data.into())
    }

    pub async fn get(&self, venue_id: i64) -> Result<entities::venue::Model> {
        let venue = entities::venue::Entity::find_by_id(venue_id)
            .one(&self.db.conn)
            .await
            .wrap_err("Failed to fetch venue")?
            .ok_or(ServiceError::venue_not_found(venue_id))?;
        Ok(venue)
    }

    /// The venue with its own shows split into past (newest first) and upcoming (soonest first).
    pub async fn detail(&self, venue_id: i64) -> Result<VenueDetail> {
        let venue = self.get(venue_id).await?;

        let shows = entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.eq(venue_id))
            .order_by_asc(entities::show::Column::StartTime)
            .find_also_related(entities::artist::Entity)
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch venue shows")?;

        let shows = shows.into_iter().filter_map(|(show, artist)| match artist {
            Some(artist) => Some(ArtistShow {
                artist_id: artist.id,
                artist_name: artist.name,
                artist_image_link: artist.image_link,
                start_time: show.start_time,
            }),
            None => {
                log::warn!("Show {} references missing artist {}", show.id, show.artist_id);
                None
            }
        });

        let mut split = partition(shows, self.clock.now(), |show| show.start_time);
        split.past.reverse();

        Ok(VenueDetail {
            id: venue.id,
            name: venue.name,
            genres: venue.genres.into(),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: split.past.len(),
            upcoming_shows_count: split.upcoming.len(),
            past_shows: split.past,
            upcoming_shows: split.upcoming,
        })
    }

    // ---- Mutations ----

    pub async fn create(&self, input: VenueInput) -> Result<entities::venue::Model> {
        let mut venue = entities::venue::ActiveModel::new();
        input.apply(&mut venue);

        let txn = self
            .db
            .conn
            .begin()
            .await
            .wrap_err("Failed to begin transaction")?;
        let model = venue
            .insert(&txn)
            .await
            .wrap_err("Failed to insert venue")?;
        txn.commit().await.wrap_err("Failed to commit venue")?;

        log::info!("Venue created: '{}' (ID: {})", model.name, model.id);
        Ok(model)
    }

    pub async fn update(&self, venue_id: i64, input: VenueInput) -> Result<entities::venue::Model> {
        let existing = self.get(venue_id).await?;
        let mut venue: entities::venue::ActiveModel = existing.into();
        input.apply(&mut venue);

        let txn = self
            .db
            .conn
            .begin()
            .await
            .wrap_err("Failed to begin transaction")?;
        let model = venue
            .update(&txn)
            .await
            .wrap_err("Failed to update venue")?;
        txn.commit().await.wrap_err("Failed to commit venue")?;

        log::info!("Venue updated: '{}' (ID: {})", model.name, model.id);
        Ok(model)
    }

    /// Delete the venue and every show booked there.
    pub async fn delete(&self, venue_id: i64) -> Result<()> {
        let venue = self.get(venue_id).await?;

        let removed_shows = self
            .db
            .conn
            .transaction::<_, u64, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let shows = entities::show::Entity::delete_many()
                        .filter(entities::show::Column::VenueId.eq(venue_id))
                        .exec(txn)
                        .await?;
                    entities::venue::Entity::delete_by_id(venue_id)
                        .exec(txn)
                        .await?;
                    Ok(shows.rows_affected)
                })
            })
            .await
            .wrap_err("Failed to delete venue")?;

        log::info!(
            "Venue deleted: '{}' (ID: {}), removed {} shows",
            venue.name,
            venue_id,
            removed_shows
        );
        Ok(())
    }
}
