use axum::Json;

use crate::http_server::flash::HomePage;

pub async fn index() -> Json<HomePage> {
    Json(HomePage { flash: None })
}
