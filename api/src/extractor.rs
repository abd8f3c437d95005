use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use shared::error::AppError;

/// JSON body extractor whose rejection speaks the same language as the
/// field validator: a body that cannot be decoded into the target type
/// answers 400 with a field-level issue list, not axum's plain-text
/// rejection.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let (field, message) = field_and_message(&rejection.body_text());
                Err(AppError::MalformedRequest { field, message })
            }
        }
    }
}

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// axum prefixes decode failures with the path that failed, e.g.
/// "... into the target type: date: input contains invalid characters".
/// Split that path out when it is present; everything else (syntax
/// errors, missing content type) is attributed to the body as a whole.
fn field_and_message(text: &str) -> (String, String) {
    let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text);
    if let Some((path, rest)) = detail.split_once(": ") {
        if !path.is_empty() && path.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.') {
            return (path.to_string(), rest.to_string());
        }
    }
    ("body".to_string(), detail.to_string())
}
