use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

/// Identity resolved by the fronting auth layer. The application consumes it
/// as a fact; there is no session machinery here.
#[derive(Clone, Debug)]
pub struct Auth {
    pub user_id: String,
}

const USER_ID_HEADER: &str = "x-user-id";

/// Require a resolved user id on every API request and expose it as an
/// [`Auth`] extension.
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let Some(user_id) = user_id else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    let user_id = user_id.to_owned();

    request.extensions_mut().insert(Auth { user_id });

    Ok(next.run(request).await)
}
