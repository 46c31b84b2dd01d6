#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn venue_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Venue",
            id,
        }
    }

    pub fn artist_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Artist",
            id,
        }
    }
}

/// True when the report (or anything it wraps) is a missing-entity error.
pub fn is_not_found(report: &color_eyre::Report) -> bool {
    report
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ServiceError>())
        .any(|err| matches!(err, ServiceError::NotFound { .. }))
}
