use async_graphql::{Context, Object};

use crate::forms::ArtistForm;
use crate::http_server::flash::Flash;
use crate::http_server::mutations;
use crate::http_server::{graphql::context::get_app_state, graphql_error::GraphqlResult};

#[derive(Default)]
pub struct ArtistMutation;

#[Object]
impl ArtistMutation {
    async fn create_artist(&self, ctx: &Context<'_>, input: ArtistForm) -> GraphqlResult<Flash> {
        let app_state = get_app_state(ctx)?;
        Ok(mutations::create_artist(app_state, input).await)
    }

    async fn update_artist(
        &self,
        ctx: &Context<'_>,
        id: i64,
        input: ArtistForm,
    ) -> GraphqlResult<Flash> {
        let app_state = get_app_state(ctx)?;
        Ok(mutations::update_artist(app_state, id, input).await)
    }

    /// Deletes the artist together with all of their shows
    async fn delete_artist(&self, ctx: &Context<'_>, id: i64) -> GraphqlResult<Flash> {
        let app_state = get_app_state(ctx)?;
        Ok(mutations::delete_artist(app_state, id).await)
    }
}
