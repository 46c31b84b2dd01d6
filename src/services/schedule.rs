use std::collections::HashMap;

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Result, WrapErr};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};

use crate::entities;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Past,
    Upcoming,
}

impl ShowTiming {
    /// A show starting exactly now counts as upcoming.
    pub fn classify(start_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if start_time < now {
            Self::Past
        } else {
            Self::Upcoming
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Split shows into past and upcoming relative to `now`, keeping input order within each bucket.
pub fn partition<T>(
    shows: impl IntoIterator<Item = T>,
    now: DateTime<Utc>,
    start_time: impl Fn(&T) -> DateTime<Utc>,
) -> Partitioned<T> {
    let mut partitioned = Partitioned {
        past: Vec::new(),
        upcoming: Vec::new(),
    };

    for show in shows {
        match ShowTiming::classify(start_time(&show), now) {
            ShowTiming::Past => partitioned.past.push(show),
            ShowTiming::Upcoming => partitioned.upcoming.push(show),
        }
    }

    partitioned
}

/// Count upcoming shows per owner, keyed by the value of `owner_column`
/// (`VenueId` or `ArtistId`). Owners without upcoming shows are absent from the map.
pub async fn upcoming_counts(
    conn: &DatabaseConnection,
    owner_column: entities::show::Column,
    now: DateTime<Utc>,
) -> Result<HashMap<i64, u64>> {
    let rows: Vec<(i64, i64)> = entities::show::Entity::find()
        .select_only()
        .column(owner_column)
        .column_as(entities::show::Column::Id.count(), "upcoming")
        .filter(entities::show::Column::StartTime.gte(now))
        .group_by(owner_column)
        .into_tuple()
        .all(conn)
        .await
        .wrap_err("Failed to count upcoming shows")?;

    Ok(rows
        .into_iter()
        .map(|(owner_id, count)| (owner_id, count.max(0) as u64))
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::test_utils::{fixed_now, insert_artist, insert_show, insert_venue, test_db};

    #[test]
    fn test_classify_boundaries() {
        let now = fixed_now();
        assert_eq!(
            ShowTiming::classify(now - Duration::seconds(1), now),
            ShowTiming::Past
        );
        assert_eq!(ShowTiming::classify(now, now), ShowTiming::Upcoming);
        assert_eq!(
            ShowTiming::classify(now + Duration::days(30), now),
            ShowTiming::Upcoming
        );
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let now = fixed_now();
        let offsets = [-48, -1, 0, 1, 72, -300, 5];
        let starts: Vec<DateTime<Utc>> = offsets
            .iter()
            .map(|h| now + Duration::hours(*h))
            .collect();

        let split = partition(starts.clone(), now, |start| *start);

        assert_eq!(split.past.len() + split.upcoming.len(), starts.len());
        assert!(split.past.iter().all(|s| *s < now));
        assert!(split.upcoming.iter().all(|s| *s >= now));
        assert!(split.past.iter().all(|s| !split.upcoming.contains(s)));
        // Input order is preserved within each bucket
        assert_eq!(
            split.past,
            vec![
                now - Duration::hours(48),
                now - Duration::hours(1),
                now - Duration::hours(300)
            ]
        );
    }

    #[test]
    fn test_partition_empty() {
        let split = partition(Vec::<DateTime<Utc>>::new(), fixed_now(), |s| *s);
        assert!(split.past.is_empty());
        assert!(split.upcoming.is_empty());
    }

    #[tokio::test]
    async fn test_upcoming_counts_per_venue() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let bar = insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
        let quiet = insert_venue(&db, "Quiet Hall", "Austin", "TX").await;
        let artist = insert_artist(&db, "Guns N Petals").await;

        insert_show(&db, artist, hop, Duration::days(2)).await;
        insert_show(&db, artist, hop, Duration::days(9)).await;
        insert_show(&db, artist, hop, Duration::days(-3)).await;
        insert_show(&db, artist, bar, Duration::zero()).await;
        insert_show(&db, artist, quiet, Duration::days(-1)).await;

        let counts = upcoming_counts(&db.conn, entities::show::Column::VenueId, fixed_now())
            .await
            .unwrap();

        assert_eq!(counts.get(&hop), Some(&2));
        assert_eq!(counts.get(&bar), Some(&1));
        assert_eq!(counts.get(&quiet), None);
    }

    #[tokio::test]
    async fn test_upcoming_counts_per_artist() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let petals = insert_artist(&db, "Guns N Petals").await;
        let sax = insert_artist(&db, "The Wild Sax Band").await;

        insert_show(&db, petals, venue, Duration::days(-10)).await;
        insert_show(&db, sax, venue, Duration::days(1)).await;
        insert_show(&db, sax, venue, Duration::days(8)).await;
        insert_show(&db, sax, venue, Duration::days(15)).await;

        let counts = upcoming_counts(&db.conn, entities::show::Column::ArtistId, fixed_now())
            .await
            .unwrap();

        assert_eq!(counts.get(&sax), Some(&3));
        assert_eq!(counts.get(&petals), None);
    }
}
