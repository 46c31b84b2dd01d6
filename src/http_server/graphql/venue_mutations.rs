use async_graphql::{Context, Object};

use crate::forms::VenueForm;
use crate::http_server::flash::Flash;
use crate::http_server::mutations;
use crate::http_server::{graphql::context::get_app_state, graphql_error::GraphqlResult};

#[derive(Default)]
pub struct VenueMutation;

#[Object]
impl VenueMutation {
    async fn create_venue(&self, ctx: &Context<'_>, input: VenueForm) -> GraphqlResult<Flash> {
        let app_state = get_app_state(ctx)?;
        Ok(mutations::create_venue(app_state, input).await)
    }

    async fn update_venue(
        &self,
        ctx: &Context<'_>,
        id: i64,
        input: VenueForm,
    ) -> GraphqlResult<Flash> {
        let app_state = get_app_state(ctx)?;
        Ok(mutations::update_venue(app_state, id, input).await)
    }

    /// Deletes the venue together with every show booked there
    async fn delete_venue(&self, ctx: &Context<'_>, id: i64) -> GraphqlResult<Flash> {
        let app_state = get_app_state(ctx)?;
        Ok(mutations::delete_venue(app_state, id).await)
    }
}
