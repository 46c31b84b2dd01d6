use async_graphql::{Context, Object};

use crate::http_server::{graphql::context::get_app_state, graphql_error::GraphqlResult};
use crate::services::SearchResults;
use crate::services::venue::{VenueArea, VenueDetail, VenueService};

#[derive(Default)]
pub struct VenueQuery;

#[Object]
impl VenueQuery {
    /// Venues grouped by the city and state they are in
    async fn venue_areas(&self, ctx: &Context<'_>) -> GraphqlResult<Vec<VenueArea>> {
        let app_state = get_app_state(ctx)?;
        let service = VenueService::new(app_state.db.clone(), app_state.clock.clone());
        Ok(service.list_by_area().await?)
    }

    /// Case-insensitive partial match on venue names
    async fn search_venues(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] search_term: String,
    ) -> GraphqlResult<SearchResults> {
        let app_state = get_app_state(ctx)?;
        let service = VenueService::new(app_state.db.clone(), app_state.clock.clone());
        Ok(service.search(&search_term).await?)
    }

    async fn venue(&self, ctx: &Context<'_>, id: i64) -> GraphqlResult<VenueDetail> {
        let app_state = get_app_state(ctx)?;
        let service = VenueService::new(app_state.db.clone(), app_state.clock.clone());
        Ok(service.detail(id).await?)
    }
}
