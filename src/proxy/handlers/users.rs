// Local user profile, served without touching the downstream API
use axum::extract::Path;

use crate::proxy::common::response::JsonPassthrough;

const DEMO_USER: &str =
    r#"{"userid": 1234, "name": "Demo Trader", "picture": "static/images/avatar.jpg"}"#;

/// The same fixed profile is returned for every user id
pub async fn handle_get_user(Path(_user_id): Path<String>) -> JsonPassthrough {
    JsonPassthrough(DEMO_USER.to_string())
}
