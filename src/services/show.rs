use std::collections::HashMap;
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
use crate::services::error::ServiceError;

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

pub struct ShowService {
    db: Arc<Database>,
}

impl ShowService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every show with its venue and artist names, soonest first.
    pub async fn list(&self) -> Result<Vec<ShowListing>> {
        let shows = entities::show::Entity::find()
            .order_by_asc(entities::show::Column::StartTime)
            .order_by_asc(entities::show::Column::Id)
            .find_also_related(entities::venue::Entity)
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch shows")?;

        let artist_ids: Vec<i64> = shows.iter().map(|(show, _)| show.artist_id).collect();
        let artists: HashMap<i64, entities::artist::Model> = entities::artist::Entity::find()
            .filter(entities::artist::Column::Id.is_in(artist_ids))
            .all(&self.db.conn)
            .await
            .wrap_err("Failed to fetch show artists")?
            .into_iter()
            .map(|artist| (artist.id, artist))
            .collect();

        let listings = shows
            .into_iter()
            .filter_map(|(show, venue)| {
                let (Some(venue), Some(artist)) = (venue, artists.get(&show.artist_id)) else {
                    log::warn!("Show {} is missing its venue or artist", show.id);
                    return None;
                };
                Some(ShowListing {
                    venue_id: venue.id,
                    venue_name: venue.name,
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect();

        Ok(listings)
    }

    /// Book an existing artist at an existing venue.
    pub async fn create(&self, input: ShowInput) -> Result<entities::show::Model> {
        entities::artist::Entity::find_by_id(input.artist_id)
            .one(&self.db.conn)
            .await
            .wrap_err("Failed to fetch artist")?
            .ok_or(ServiceError::artist_not_found(input.artist_id))?;

        entities::venue::Entity::find_by_id(input.venue_id)
            .one(&self.db.conn)
            .await
            .wrap_err("Failed to fetch venue")?
            .ok_or(ServiceError::venue_not_found(input.venue_id))?;

        let mut show = entities::show::ActiveModel::new();
        show.artist_id = Set(input.artist_id);
        show.venue_id = Set(input.venue_id);
        show.start_time = Set(input.start_time);

        let txn = self
            .db
            .conn
            .begin()
            .await
            .wrap_err("Failed to begin transaction")?;
        let model = show.insert(&txn).await.wrap_err("Failed to insert show")?;
        txn.commit().await.wrap_err("Failed to commit show")?;

        log::info!(
            "Show created: artist {} at venue {} on {} (ID: {})",
            model.artist_id,
            model.venue_id,
            model.start_time,
            model.id
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::services::error::is_not_found;
    use crate::test_utils::{fixed_now, insert_artist, insert_show, insert_venue, test_db};

    #[tokio::test]
    async fn test_list_empty() {
        let db = test_db().await;
        let service = ShowService::new(db);

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_joins_names() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let park = insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        let petals = insert_artist(&db, "Guns N Petals").await;
        let sax = insert_artist(&db, "The Wild Sax Band").await;
        insert_show(&db, sax, park, Duration::days(5)).await;
        insert_show(&db, petals, hop, Duration::days(-5)).await;

        let service = ShowService::new(db);
        let shows = service.list().await.unwrap();

        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].venue_name, "The Musical Hop");
        assert_eq!(shows[0].artist_name, "Guns N Petals");
        assert_eq!(shows[1].venue_id, park);
        assert_eq!(shows[1].artist_id, sax);
        assert_eq!(
            shows[1].artist_image_link.as_deref(),
            Some("https://img.example/The Wild Sax Band")
        );
    }

    #[tokio::test]
    async fn test_create() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let petals = insert_artist(&db, "Guns N Petals").await;
        let service = ShowService::new(db);

        let start_time = fixed_now() + Duration::days(7);
        let show = service
            .create(ShowInput {
                artist_id: petals,
                venue_id: hop,
                start_time,
            })
            .await
            .unwrap();

        assert_eq!(show.artist_id, petals);
        assert_eq!(show.venue_id, hop);
        assert_eq!(show.start_time, start_time);
    }

    #[tokio::test]
    async fn test_create_requires_existing_artist_and_venue() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let petals = insert_artist(&db, "Guns N Petals").await;
        let service = ShowService::new(db.clone());

        let err = service
            .create(ShowInput {
                artist_id: petals + 100,
                venue_id: hop,
                start_time: fixed_now(),
            })
            .await
            .unwrap_err();
        assert!(is_not_found(&err));

        let err = service
            .create(ShowInput {
                artist_id: petals,
                venue_id: hop + 100,
                start_time: fixed_now(),
            })
            .await
            .unwrap_err();
        assert!(is_not_found(&err));

        let count = entities::show::Entity::find().count(&db.conn).await.unwrap();
        assert_eq!(count, 0);
    }
}
