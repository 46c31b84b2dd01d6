use async_graphql::{Context, Object};

use crate::http_server::{graphql::context::get_app_state, graphql_error::GraphqlResult};
use crate::services::show::{ShowListing, ShowService};

#[derive(Default)]
pub struct ShowQuery;

#[Object]
impl ShowQuery {
    async fn shows(&self, ctx: &Context<'_>) -> GraphqlResult<Vec<ShowListing>> {
        let app_state = get_app_state(ctx)?;
        Ok(ShowService::new(app_state.db.clone()).list().await?)
    }
}
