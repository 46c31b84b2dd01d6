use async_graphql::{Context, Object};

use crate::forms::ShowForm;
use crate::http_server::flash::Flash;
use crate::http_server::mutations;
use crate::http_server::{graphql::context::get_app_state, graphql_error::GraphqlResult};

#[derive(Default)]
pub struct ShowMutation;

#[Object]
impl ShowMutation {
    async fn create_show(&self, ctx: &Context<'_>, input: ShowForm) -> GraphqlResult<Flash> {
        let app_state = get_app_state(ctx)?;
        Ok(mutations::create_show(app_state, input).await)
    }
}
