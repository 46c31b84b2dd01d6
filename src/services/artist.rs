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

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
}

/// A show on an artist page, described by the venue hosting it.
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    fn apply(self, artist: &mut entities::artist::ActiveModel) {
        artist.name = Set(self.name);
        artist.city = Set(self.city);
        artist.state = Set(self.state);
        artist.phone = Set(non_blank(self.phone));
        artist.image_link = Set(non_blank(self.image_link));
        artist.facebook_link = Set(non_blank(self.facebook_link));
        artist.website_link = Set(non_blank(self.website_link));
        artist.genres = Set(self.genres.into());
        artist.seeking_venue = Set(self.seeking_venue);
        artist.seeking_description = Set(non_blank(self.seeking_description));
    }
}

pub struct ArtistService<C: Clock> {
    db: Arc<Database>,
    clock: C,
}

impl<C: Clock> ArtistService<C> {
    pub fn new(db: Arc<Database>, clock: C) -> Self {
        Self { db, clock }
    }

    // ---- Queries ----

    pub async fn list(&self) -> Result<Vec<ArtistSummary>> {
        let artists = entities::artist::Entity::find()
            .order_by_asc(entities::artist::Column::Name)
            .order_by_asc(entities::artist::Column::Id)
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch artists")?;

        Ok(artists
            .into_iter()
            .map(|artist| ArtistSummary {
                id: artist.id,
                name: artist.name,
            })
            .collect())
    }

    /// Case-insensitive partial match on artist name.
    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        let artists = apply_text_search(
            entities::artist::Entity::find(),
            entities::artist::Column::Name,
            term,
        )
        .order_by_asc(entities::artist::Column::Name)
        .all(&self.db.conn)
        .await
        .wrap_err("Failed to search artists")?;

        let counts = upcoming_counts(
            &self.db.conn,
            entities::show::Column::ArtistId,
            self.clock.now(),
        )
        .await?;

        let data: Vec<Listing> = artists
            .into_iter()
            .filter(|artist| name_matches(&artist.name, term))
            .map(|artist| Listing {
                num_upcoming_shows: counts.get(&artist.id).copied().unwrap_or(0),
                id: artist.id,
                name: artist.name,
            })
            .collect();

        log::debug!("Artist search '{}' matched {}", term, data.len());
        Ok(data.into())
    }

    pub async fn get(&self, artist_id: i64) -> Result<entities::artist::Model> {
        let artist = entities::artist::Entity::find_by_id(artist_id)
            .one(&self.db.conn)
            .await
            .wrap_err("Failed to fetch artist")?
            .ok_or(ServiceError::artist_not_found(artist_id))?;
        Ok(artist)
    }

    pub async fn detail(&self, artist_id: i64) -> Result<ArtistDetail> {
        let artist = self.get(artist_id).await?;

        let shows = entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.eq(artist_id))
            .order_by_asc(entities::show::Column::StartTime)
            .find_also_related(entities::venue::Entity)
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch artist shows")?;

        let shows = shows.into_iter().filter_map(|(show, venue)| match venue {
            Some(venue) => Some(VenueShow {
                venue_id: venue.id,
                venue_name: venue.name,
                venue_image_link: venue.image_link,
                start_time: show.start_time,
            }),
            None => {
                log::warn!("Show {} references missing venue {}", show.id, show.venue_id);
                None
            }
        });

        let mut split = partition(shows, self.clock.now(), |show| show.start_time);
        split.past.reverse();

        Ok(ArtistDetail {
            id: artist.id,
            name: artist.name,
            genres: artist.genres.into(),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website_link,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: split.past.len(),
            upcoming_shows_count: split.upcoming.len(),
            past_shows: split.past,
            upcoming_shows: split.upcoming,
        })
    }

    // ---- Mutations ----

    pub async fn create(&self, input: ArtistInput) -> Result<entities::artist::Model> {
        let mut artist = entities::artist::ActiveModel::new();
        input.apply(&mut artist);

        let txn = self
            .db
            .conn
            .begin()
            .await
            .wrap_err("Failed to begin transaction")?;
        let model = artist
            .insert(&txn)
            .await
            .wrap_err("Failed to insert artist")?;
        txn.commit().await.wrap_err("Failed to commit artist")?;

        log::info!("Artist created: '{}' (ID: {})", model.name, model.id);
        Ok(model)
    }

    pub async fn update(
        &self,
        artist_id: i64,
        input: ArtistInput,
    ) -> Result<entities::artist::Model> {
        let existing = self.get(artist_id).await?;
        let mut artist: entities::artist::ActiveModel = existing.into();
        input.apply(&mut artist);

        let txn = self
            .db
            .conn
            .begin()
            .await
            .wrap_err("Failed to begin transaction")?;
        let model = artist
            .update(&txn)
            .await
            .wrap_err("Failed to update artist")?;
        txn.commit().await.wrap_err("Failed to commit artist")?;

        log::info!("Artist updated: '{}' (ID: {})", model.name, model.id);
        Ok(model)
    }

    /// Delete the artist and every show they are booked for.
    pub async fn delete(&self, artist_id: i64) -> Result<()> {
        let artist = self.get(artist_id).await?;

        let removed_shows = self
            .db
            .conn
            .transaction::<_, u64, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let shows = entities::show::Entity::delete_many()
                        .filter(entities::show::Column::ArtistId.eq(artist_id))
                        .exec(txn)
                        .await?;
                    entities::artist::Entity::delete_by_id(artist_id)
                        .exec(txn)
                        .await?;
                    Ok(shows.rows_affected)
                })
            })
            .await
            .wrap_err("Failed to delete artist")?;

        log::info!(
            "Artist deleted: '{}' (ID: {}), removed {} shows",
            artist.name,
            artist_id,
            removed_shows
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::services::error::is_not_found;
    use crate::test_utils::{
        clock_at, fixed_now, insert_artist, insert_show, insert_venue, test_db,
    };

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let db = test_db().await;
        let sax = insert_artist(&db, "The Wild Sax Band").await;
        let petals = insert_artist(&db, "Guns N Petals").await;
        let service = ArtistService::new(db, clock_at(fixed_now()));

        let artists = service.list().await.unwrap();
        assert_eq!(
            artists,
            vec![
                ArtistSummary {
                    id: petals,
                    name: "Guns N Petals".to_string()
                },
                ArtistSummary {
                    id: sax,
                    name: "The Wild Sax Band".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_search() {
        let db = test_db().await;
        insert_artist(&db, "Guns N Petals").await;
        insert_artist(&db, "Matt Quevedo").await;
        insert_artist(&db, "The Wild Sax Band").await;
        let service = ArtistService::new(db, clock_at(fixed_now()));

        let results = service.search("A").await.unwrap();
        assert_eq!(results.count, 3);

        let results = service.search("band").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Wild Sax Band");

        let results = service.search("xyz").await.unwrap();
        assert_eq!(results.count, 0);
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let db = test_db().await;
        insert_artist(&db, "Ólafur Arnalds").await;
        insert_artist(&db, "Matt Quevedo").await;
        let service = ArtistService::new(db, clock_at(fixed_now()));

        let results = service.search("óLAFUR").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "Ólafur Arnalds");
    }

    #[tokio::test]
    async fn test_detail_splits_own_shows() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let park = insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        let petals = insert_artist(&db, "Guns N Petals").await;
        let sax = insert_artist(&db, "The Wild Sax Band").await;

        insert_show(&db, petals, hop, Duration::days(-400)).await;
        insert_show(&db, petals, park, Duration::days(-1)).await;
        insert_show(&db, petals, park, Duration::hours(2)).await;
        insert_show(&db, sax, hop, Duration::days(4)).await;

        let service = ArtistService::new(db, clock_at(fixed_now()));
        let detail = service.detail(petals).await.unwrap();

        assert_eq!(detail.past_shows_count, 2);
        assert_eq!(detail.upcoming_shows_count, 1);
        assert_eq!(detail.past_shows[0].venue_id, park);
        assert_eq!(detail.past_shows[1].venue_id, hop);
        assert_eq!(
            detail.upcoming_shows[0].venue_name,
            "Park Square Live Music & Coffee"
        );
        assert_eq!(detail.genres, vec!["Rock n Roll"]);
    }

    #[tokio::test]
    async fn test_detail_uses_clock() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let sax = insert_artist(&db, "The Wild Sax Band").await;
        insert_show(&db, sax, hop, Duration::days(1)).await;

        // Two days later the same show has moved into the past
        let later = fixed_now() + Duration::days(2);
        let service = ArtistService::new(db, clock_at(later));
        let detail = service.detail(sax).await.unwrap();

        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 0);
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let db = test_db().await;
        let service = ArtistService::new(db.clone(), clock_at(fixed_now()));

        let created = service
            .create(ArtistInput {
                name: "Matt Quevedo".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                genres: vec!["Jazz".to_string()],
                seeking_venue: true,
                seeking_description: Some("Looking for gigs".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(created.seeking_venue);

        let updated = service
            .update(
                created.id,
                ArtistInput {
                    name: "Matt Quevedo Trio".to_string(),
                    city: "New York".to_string(),
                    state: "NY".to_string(),
                    seeking_description: Some("".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Matt Quevedo Trio");
        assert!(!updated.seeking_venue);
        assert_eq!(updated.seeking_description, None);
        assert!(updated.genres.0.is_empty());

        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_show(&db, created.id, venue, Duration::days(1)).await;
        insert_show(&db, created.id, venue, Duration::days(-1)).await;

        service.delete(created.id).await.unwrap();

        let shows = entities::show::Entity::find()
            .all(&db.conn)
            .await
            .unwrap();
        assert!(shows.is_empty());
        assert!(is_not_found(&service.detail(created.id).await.unwrap_err()));
    }
}
