use async_graphql::{Error, ErrorExtensions};

use crate::services::error::is_not_found;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GraphqlError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Server error: {0}")]
    ServerError(String),
    #[error("Failed to get app state")]
    FailedToGetAppState,
}

impl Default for GraphqlError {
    fn default() -> Self {
        Self::ServerError("Unknown error".to_string())
    }
}

impl From<color_eyre::Report> for GraphqlError {
    fn from(report: color_eyre::Report) -> Self {
        if is_not_found(&report) {
            log::debug!("GraphQL lookup missed: {report}");
            return Self::NotFound(report.root_cause().to_string());
        }

        // Log the full error report with trace chain for debugging
        log::error!("GraphQL error: {:#?}", report);
        Self::ServerError("Something went wrong".to_string())
    }
}

impl ErrorExtensions for GraphqlError {
    fn extend(&self) -> Error {
        Error::new(format!("{}", self)).extend_with(|_err, e| match self {
            GraphqlError::NotFound(reason) => {
                e.set("code", "NOT_FOUND");
                e.set("reason", reason.clone());
            }
            GraphqlError::ServerError(reason) => {
                e.set("code", "INTERNAL_SERVER_ERROR");
                e.set("reason", reason.clone());
            }
            GraphqlError::FailedToGetAppState => {
                e.set("reason", "Failed to get app state".to_string())
            }
        })
    }
}

// Newtype wrapper to avoid blanket From implementation conflict for GraphqlError and async_graphql::Error
#[derive(Debug, Clone)]
pub struct GraphqlErrorWrapper(GraphqlError);

impl From<GraphqlError> for GraphqlErrorWrapper {
    fn from(err: GraphqlError) -> Self {
        Self(err)
    }
}

impl From<GraphqlErrorWrapper> for Error {
    fn from(wrapper: GraphqlErrorWrapper) -> Self {
        wrapper.0.extend()
    }
}

// Make it easy to convert from color_eyre::Report
impl From<color_eyre::Report> for GraphqlErrorWrapper {
    fn from(report: color_eyre::Report) -> Self {
        GraphqlError::from(report).into()
    }
}

pub type GraphqlResult<T> = Result<T, GraphqlErrorWrapper>;

#[cfg(test)]
mod tests {
    use color_eyre::eyre::WrapErr;

    use super::*;
    use crate::services::error::ServiceError;

    #[test]
    fn test_not_found_report_maps_to_not_found() {
        let report: color_eyre::Report = Err::<(), _>(ServiceError::venue_not_found(7))
            .wrap_err("Failed to load venue page")
            .unwrap_err();

        assert!(matches!(
            GraphqlError::from(report),
            GraphqlError::NotFound(_)
        ));
    }

    #[test]
    fn test_other_reports_hide_details() {
        let report = color_eyre::eyre::eyre!("database is locked");

        match GraphqlError::from(report) {
            GraphqlError::ServerError(reason) => assert_eq!(reason, "Something went wrong"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
