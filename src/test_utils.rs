use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database as SeaDatabase, Set};

use crate::database::Database;
use crate::entities;
use crate::ports::clock::MockClock;

pub async fn test_db() -> Arc<Database> {
    // A single connection, otherwise every pooled connection gets its own empty in-memory db
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let conn = SeaDatabase::connect(opt).await.unwrap();

    Arc::new(Database::prepare(conn).await.unwrap())
}

/// Fixed reference point for time-partition tests.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-06-15T20:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn clock_at(now: DateTime<Utc>) -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_now().return_const(now);
    clock
}

pub async fn insert_venue(db: &Database, name: &str, city: &str, state: &str) -> i64 {
    entities::venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1 Main St".to_string()),
        genres: Set(vec!["Jazz".to_string()].into()),
        seeking_talent: Set(false),
        image_link: Set(Some(format!("https://img.example/{name}"))),
        ..Default::default()
    }
    .insert(&db.conn)
    .await
    .unwrap()
    .id
}

pub async fn insert_artist(db: &Database, name: &str) -> i64 {
    entities::artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        genres: Set(vec!["Rock n Roll".to_string()].into()),
        seeking_venue: Set(false),
        image_link: Set(Some(format!("https://img.example/{name}"))),
        ..Default::default()
    }
    .insert(&db.conn)
    .await
    .unwrap()
    .id
}

/// Insert a show starting `offset` away from [`fixed_now`].
pub async fn insert_show(db: &Database, artist_id: i64, venue_id: i64, offset: Duration) -> i64 {
    entities::show::ActiveModel {
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        start_time: Set(fixed_now() + offset),
        ..Default::default()
    }
    .insert(&db.conn)
    .await
    .unwrap()
    .id
}
