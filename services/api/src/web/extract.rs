//! services/api/src/web/extract.rs
//!
//! A JSON body extractor whose rejection carries an error notice, like every
//! other failure the handlers return.

use crate::web::rest::{invalid_input, HandlerError};
use axum::{
    extract::{FromRequest, Request},
    response::Json,
};
use serde::de::DeserializeOwned;

/// Like `Json<T>`, but a body that cannot be parsed becomes a 400 `ErrorResponse`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_input(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::views::CreateFileRequest;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, StatusCode},
    };

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/subjects/1/files")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let ValidJson(body) = ValidJson::<CreateFileRequest>::from_request(
            json_request(r##"{"name":"x","url":"#","type":"exam"}"##),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(body.name, "x");
    }

    #[tokio::test]
    async fn unknown_file_type_is_a_bad_request_with_a_notice() {
        let (status, Json(err)) = ValidJson::<CreateFileRequest>::from_request(
            json_request(r##"{"name":"x","url":"#","type":"video"}"##),
            &(),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.notice.title, "Invalid Input");
        assert_eq!(err.notice.variant, "destructive");
        assert!(err.error.contains("video"));
    }

    #[tokio::test]
    async fn missing_content_type_is_a_bad_request_too() {
        let request = Request::builder()
            .method("POST")
            .uri("/subjects/1/files")
            .body(Body::from(r#"{"name":"x"}"#))
            .unwrap();
        let (status, _) = ValidJson::<CreateFileRequest>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
