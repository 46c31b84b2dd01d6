//! Form payloads submitted by the listing pages.
//!
//! Every field defaults when absent so that an incomplete submission reaches
//! validation and produces a failure notice instead of a rejected request.

use async_graphql::InputObject;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities;
use crate::services::artist::ArtistInput;
use crate::services::error::ServiceError;
use crate::services::show::ShowInput;
use crate::services::venue::VenueInput;

const START_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// HTML checkboxes are only submitted when ticked.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "on" | "true" | "1"
    ))
}

fn required(field: &str, value: &str) -> Result<String, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn clean_genres(genres: Vec<String>) -> Vec<String> {
    genres
        .into_iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect()
}

/// Parse a show start time. Values without an offset are taken as UTC.
pub fn parse_start_time(value: &str) -> Result<DateTime<Utc>, ServiceError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ServiceError::Validation(format!("Invalid start time: '{value}'")))
}

#[derive(InputObject, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[graphql(name = "VenueInput")]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    #[graphql(default)]
    pub genres: Vec<String>,
    #[graphql(default)]
    #[serde(deserialize_with = "checkbox")]
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn validate(self) -> Result<VenueInput, ServiceError> {
        Ok(VenueInput {
            name: required("name", &self.name)?,
            city: required("city", &self.city)?,
            state: required("state", &self.state)?,
            address: required("address", &self.address)?,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            genres: clean_genres(self.genres),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        })
    }
}

impl From<entities::venue::Model> for VenueForm {
    fn from(venue: entities::venue::Model) -> Self {
        Self {
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            image_link: venue.image_link,
            facebook_link: venue.facebook_link,
            website_link: venue.website_link,
            genres: venue.genres.into(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
        }
    }
}

#[derive(InputObject, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[graphql(name = "ArtistInput")]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    #[graphql(default)]
    pub genres: Vec<String>,
    #[graphql(default)]
    #[serde(deserialize_with = "checkbox")]
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn validate(self) -> Result<ArtistInput, ServiceError> {
        Ok(ArtistInput {
            name: required("name", &self.name)?,
            city: required("city", &self.city)?,
            state: required("state", &self.state)?,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            genres: clean_genres(self.genres),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        })
    }
}

impl From<entities::artist::Model> for ArtistForm {
    fn from(artist: entities::artist::Model) -> Self {
        Self {
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            image_link: artist.image_link,
            facebook_link: artist.facebook_link,
            website_link: artist.website_link,
            genres: artist.genres.into(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
        }
    }
}

#[derive(InputObject, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[graphql(name = "ShowInput")]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    pub fn validate(self) -> Result<ShowInput, ServiceError> {
        let parse_id = |field: &str, value: &str| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| ServiceError::Validation(format!("{field} must be a number")))
        };

        Ok(ShowInput {
            artist_id: parse_id("artist_id", &self.artist_id)?,
            venue_id: parse_id("venue_id", &self.venue_id)?,
            start_time: parse_start_time(&self.start_time)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue_form() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_start_time_formats() {
        let expected = DateTime::parse_from_rfc3339("2035-04-01T20:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(parse_start_time("2035-04-01 20:00:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-01T20:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-01T20:00:00Z").unwrap(), expected);
        assert_eq!(
            parse_start_time("2035-04-01T22:00:00+02:00").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_start_time_invalid() {
        assert!(matches!(
            parse_start_time("next tuesday"),
            Err(ServiceError::Validation(_))
        ));
        assert!(parse_start_time("").is_err());
    }

    #[test]
    fn test_venue_form_requires_fields() {
        assert!(venue_form().validate().is_ok());

        let mut form = venue_form();
        form.address = "  ".to_string();
        assert_eq!(
            form.validate(),
            Err(ServiceError::Validation("address is required".to_string()))
        );
    }

    #[test]
    fn test_venue_form_trims_and_drops_blank_genres() {
        let mut form = venue_form();
        form.name = "  The Musical Hop ".to_string();
        form.genres = vec!["Jazz".to_string(), " ".to_string(), " Folk".to_string()];

        let input = form.validate().unwrap();
        assert_eq!(input.name, "The Musical Hop");
        assert_eq!(input.genres, vec!["Jazz", "Folk"]);
    }

    #[test]
    fn test_artist_form_requires_name() {
        let form = ArtistForm {
            city: "New York".to_string(),
            state: "NY".to_string(),
            ..Default::default()
        };
        assert!(matches!(form.validate(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn test_show_form_validation() {
        let form = ShowForm {
            artist_id: "4".to_string(),
            venue_id: " 1 ".to_string(),
            start_time: "2019-05-21 21:30:00".to_string(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.artist_id, 4);
        assert_eq!(input.venue_id, 1);

        let form = ShowForm {
            artist_id: "four".to_string(),
            venue_id: "1".to_string(),
            start_time: "2019-05-21 21:30:00".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_checkbox_values() {
        let ticked: VenueForm =
            serde_json::from_str(r#"{"name": "Hop", "seeking_talent": "y"}"#).unwrap();
        assert!(ticked.seeking_talent);

        let unticked: VenueForm = serde_json::from_str(r#"{"name": "Hop"}"#).unwrap();
        assert!(!unticked.seeking_talent);

        let off: ArtistForm = serde_json::from_str(r#"{"seeking_venue": "n"}"#).unwrap();
        assert!(!off.seeking_venue);
    }
}
