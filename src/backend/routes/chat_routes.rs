/**
 * Chat Routes
 *
 * Everything under `/chats` requires a bearer token. The auth middleware
 * is attached with `route_layer`, so it only runs for requests that
 * matched one of these routes.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};

use crate::backend::chat::handlers::{
    append_exchange, create_chat, delete_chat, get_chat, list_chats,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure chat routes
///
/// - `GET /chats` - List the caller's chats
/// - `POST /chats` - Create a chat
/// - `GET /chats/{id}` - Chat with messages
/// - `PUT|PATCH /chats/{id}` - Append a question/answer pair
/// - `DELETE /chats/{id}` - Delete a chat
pub fn configure_chat_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let collection = get(list_chats).post(create_chat);
    let item = get(get_chat)
        .put(append_exchange)
        .patch(append_exchange)
        .delete(delete_chat);

    let chats = Router::new()
        .route("/chats", collection.clone())
        .route("/chats/", collection)
        .route("/chats/{id}", item.clone())
        .route("/chats/{id}/", item)
        .route_layer(from_fn_with_state(app_state, auth_middleware));

    router.merge(chats)
}
