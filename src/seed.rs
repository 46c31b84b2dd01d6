use chrono::{DateTime, NaiveDateTime, Utc};
use color_eyre::eyre::{Result, WrapErr, eyre};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set, TransactionTrait};

use crate::database::Database;
use crate::entities;

struct SeedVenue {
    name: &'static str,
    city: &'static str,
    state: &'static str,
    address: &'static str,
    phone: &'static str,
    website: &'static str,
    facebook: &'static str,
    image: &'static str,
    genres: &'static [&'static str],
    seeking_talent: bool,
    seeking_description: Option<&'static str>,
}

struct SeedArtist {
    name: &'static str,
    city: &'static str,
    state: &'static str,
    phone: &'static str,
    website: Option<&'static str>,
    facebook: &'static str,
    image: &'static str,
    genres: &'static [&'static str],
    seeking_venue: bool,
    seeking_description: Option<&'static str>,
}

const VENUES: [SeedVenue; 3] = [
    SeedVenue {
        name: "The Musical Hop",
        city: "San Francisco",
        state: "CA",
        address: "1015 Folsom Street",
        phone: "123-123-1234",
        website: "https://www.themusicalhop.com",
        facebook: "https://www.facebook.com/TheMusicalHop",
        image: "https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=400&q=60",
        genres: &["Jazz", "Reggae", "Swing", "Classical", "Folk"],
        seeking_talent: true,
        seeking_description: Some(
            "We are on the lookout for a local artist to play every two weeks. Please call us.",
        ),
    },
    SeedVenue {
        name: "The Dueling Pianos Bar",
        city: "New York",
        state: "NY",
        address: "335 Delancey Street",
        phone: "914-003-1132",
        website: "https://www.theduelingpianos.com",
        facebook: "https://www.facebook.com/theduelingpianos",
        image: "https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=750&q=80",
        genres: &["Classical", "R&B", "Hip-Hop"],
        seeking_talent: false,
        seeking_description: None,
    },
    SeedVenue {
        name: "Park Square Live Music & Coffee",
        city: "San Francisco",
        state: "CA",
        address: "34 Whiskey Moore Ave",
        phone: "415-000-1234",
        website: "https://www.parksquarelivemusicandcoffee.com",
        facebook: "https://www.facebook.com/ParkSquareLiveMusicAndCoffee",
        image: "https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=747&q=80",
        genres: &["Rock n Roll", "Jazz", "Classical", "Folk"],
        seeking_talent: false,
        seeking_description: None,
    },
];

const ARTISTS: [SeedArtist; 3] = [
    SeedArtist {
        name: "Guns N Petals",
        city: "San Francisco",
        state: "CA",
        phone: "326-123-5000",
        website: Some("https://www.gunsnpetalsband.com"),
        facebook: "https://www.facebook.com/GunsNPetals",
        image: "https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=300&q=80",
        genres: &["Rock n Roll"],
        seeking_venue: true,
        seeking_description: Some(
            "Looking for shows to perform at in the San Francisco Bay Area!",
        ),
    },
    SeedArtist {
        name: "Matt Quevedo",
        city: "New York",
        state: "NY",
        phone: "300-400-5000",
        website: None,
        facebook: "https://www.facebook.com/mattquevedo923251523",
        image: "https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=334&q=80",
        genres: &["Jazz"],
        seeking_venue: false,
        seeking_description: None,
    },
    SeedArtist {
        name: "The Wild Sax Band",
        city: "San Francisco",
        state: "CA",
        phone: "432-325-5432",
        website: None,
        facebook: "https://www.facebook.com/thewildsaxband",
        image: "https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=794&q=80",
        genres: &["Jazz", "Classical"],
        seeking_venue: false,
        seeking_description: None,
    },
];

/// (artist index, venue index, start time)
const SHOWS: [(usize, usize, &str); 5] = [
    (0, 0, "2019-05-21 21:30:00"),
    (1, 2, "2019-06-15 23:00:00"),
    (2, 2, "2035-04-01 20:00:00"),
    (2, 2, "2035-04-08 20:00:00"),
    (2, 2, "2035-04-15 20:00:00"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

fn seed_time(value: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .wrap_err_with(|| format!("Invalid seed start time: {value}"))?;
    Ok(naive.and_utc())
}

/// Insert the demo listings in one transaction.
/// Refuses to touch a database that already has venues unless `force` is set.
pub async fn seed(db: &Database, force: bool) -> Result<SeedSummary> {
    let existing = entities::venue::Entity::find()
        .count(&db.conn)
        .await
        .wrap_err("Failed to count venues")?;
    if existing > 0 && !force {
        return Err(eyre!(
            "Database already contains {existing} venues, pass --force to seed anyway"
        ));
    }

    let txn = db.conn.begin().await.wrap_err("Failed to begin transaction")?;

    let mut venue_ids = Vec::with_capacity(VENUES.len());
    for venue in &VENUES {
        let model = entities::venue::ActiveModel {
            name: Set(venue.name.to_string()),
            city: Set(venue.city.to_string()),
            state: Set(venue.state.to_string()),
            address: Set(venue.address.to_string()),
            phone: Set(Some(venue.phone.to_string())),
            website_link: Set(Some(venue.website.to_string())),
            facebook_link: Set(Some(venue.facebook.to_string())),
            image_link: Set(Some(venue.image.to_string())),
            genres: Set(venue
                .genres
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .into()),
            seeking_talent: Set(venue.seeking_talent),
            seeking_description: Set(venue.seeking_description.map(str::to_string)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .wrap_err_with(|| format!("Failed to insert venue {}", venue.name))?;
        venue_ids.push(model.id);
    }

    let mut artist_ids = Vec::with_capacity(ARTISTS.len());
    for artist in &ARTISTS {
        let model = entities::artist::ActiveModel {
            name: Set(artist.name.to_string()),
            city: Set(artist.city.to_string()),
            state: Set(artist.state.to_string()),
            phone: Set(Some(artist.phone.to_string())),
            website_link: Set(artist.website.map(str::to_string)),
            facebook_link: Set(Some(artist.facebook.to_string())),
            image_link: Set(Some(artist.image.to_string())),
            genres: Set(artist
                .genres
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .into()),
            seeking_venue: Set(artist.seeking_venue),
            seeking_description: Set(artist.seeking_description.map(str::to_string)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .wrap_err_with(|| format!("Failed to insert artist {}", artist.name))?;
        artist_ids.push(model.id);
    }

    for (artist, venue, start_time) in SHOWS {
        entities::show::ActiveModel {
            artist_id: Set(artist_ids[artist]),
            venue_id: Set(venue_ids[venue]),
            start_time: Set(seed_time(start_time)?),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .wrap_err("Failed to insert show")?;
    }

    txn.commit().await.wrap_err("Failed to commit seed data")?;

    let summary = SeedSummary {
        venues: VENUES.len(),
        artists: ARTISTS.len(),
        shows: SHOWS.len(),
    };
    log::info!(
        "Seeded {} venues, {} artists, {} shows",
        summary.venues,
        summary.artists,
        summary.shows
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::venue::VenueService;
    use crate::test_utils::{clock_at, fixed_now, test_db};

    #[tokio::test]
    async fn test_seed_inserts_demo_listings() {
        let db = test_db().await;

        let summary = seed(&db, false).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                venues: 3,
                artists: 3,
                shows: 5
            }
        );

        let shows = entities::show::Entity::find().count(&db.conn).await.unwrap();
        assert_eq!(shows, 5);

        let service = VenueService::new(db.clone(), clock_at(fixed_now()));
        let results = service.search("Music").await.unwrap();
        let names: Vec<&str> = results.data.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Park Square Live Music & Coffee", "The Musical Hop"]
        );
        // The Wild Sax Band's 2035 shows are upcoming at Park Square
        assert_eq!(results.data[0].num_upcoming_shows, 3);
    }

    #[tokio::test]
    async fn test_seeded_shows_carry_image_links() {
        let db = test_db().await;
        seed(&db, false).await.unwrap();

        let venues = entities::venue::Entity::find().all(&db.conn).await.unwrap();
        let artists = entities::artist::Entity::find().all(&db.conn).await.unwrap();
        assert!(venues.iter().all(|venue| venue.image_link.is_some()));
        assert!(artists.iter().all(|artist| artist.image_link.is_some()));

        let shows = crate::services::show::ShowService::new(db).list().await.unwrap();
        assert_eq!(shows.len(), 5);
        assert!(shows.iter().all(|show| {
            show.artist_image_link
                .as_deref()
                .is_some_and(|link| link.starts_with("https://images.unsplash.com/"))
        }));
    }

    #[tokio::test]
    async fn test_seed_refuses_populated_database() {
        let db = test_db().await;
        seed(&db, false).await.unwrap();

        let err = seed(&db, false).await.unwrap_err();
        assert!(err.to_string().contains("--force"));

        // Forced seeding adds a second copy
        seed(&db, true).await.unwrap();
        let venues = entities::venue::Entity::find().count(&db.conn).await.unwrap();
        assert_eq!(venues, 6);
    }
}
