use async_graphql::{Context, Object};

use crate::http_server::{graphql::context::get_app_state, graphql_error::GraphqlResult};
use crate::services::SearchResults;
use crate::services::artist::{ArtistDetail, ArtistService, ArtistSummary};

#[derive(Default)]
pub struct ArtistQuery;

#[Object]
impl ArtistQuery {
    async fn artists(&self, ctx: &Context<'_>) -> GraphqlResult<Vec<ArtistSummary>> {
        let app_state = get_app_state(ctx)?;
        let service = ArtistService::new(app_state.db.clone(), app_state.clock.clone());
        Ok(service.list().await?)
    }

    /// Case-insensitive partial match on artist names
    async fn search_artists(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] search_term: String,
    ) -> GraphqlResult<SearchResults> {
        let app_state = get_app_state(ctx)?;
        let service = ArtistService::new(app_state.db.clone(), app_state.clock.clone());
        Ok(service.search(&search_term).await?)
    }

    async fn artist(&self, ctx: &Context<'_>, id: i64) -> GraphqlResult<ArtistDetail> {
        let app_state = get_app_state(ctx)?;
        let service = ArtistService::new(app_state.db.clone(), app_state.clock.clone());
        Ok(service.detail(id).await?)
    }
}
