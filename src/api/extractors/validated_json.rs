//! Request body extraction with `validator` checks applied.

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// JSON body that has been deserialized and passed `validator` checks.
///
/// Both a malformed body and a failed validation are rejected as
/// `AppError::Validation`, i.e. 400 without touching any state.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject_body)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(describe(&errors)))?;

        Ok(Self(value))
    }
}

/// Undecodable bodies get a fixed message; the parser detail stays in the logs.
fn reject_body(rejection: JsonRejection) -> AppError {
    tracing::debug!(
        status = %rejection.status(),
        error = %rejection.body_text(),
        "Rejected request body"
    );
    AppError::validation("Bad request")
}

/// First message of every failing field, fields in name order.
fn describe(errors: &ValidationErrors) -> String {
    let by_field: BTreeMap<_, String> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let message = errs
                .first()?
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            Some((field, message))
        })
        .collect();

    by_field.into_values().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Credentials {
        #[validate(length(min = 1, message = "Email is required"))]
        email: String,
        #[validate(length(min = 1))]
        password: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn extract(request: Request) -> Result<Credentials, AppError> {
        ValidatedJson::<Credentials>::from_request(request, &())
            .await
            .map(|ValidatedJson(value)| value)
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let credentials = extract(json_request(r#"{"email":"a@b.co","password":"x"}"#))
            .await
            .unwrap();
        assert_eq!(credentials.email, "a@b.co");
    }

    #[tokio::test]
    async fn test_undecodable_body_is_bad_request() {
        let error = extract(json_request(r#"{"email":"a@b.co"}"#)).await.unwrap_err();
        assert!(matches!(error, AppError::Validation(ref m) if m == "Bad request"));

        let request = Request::builder()
            .body(Body::from(r#"{"email":"a@b.co","password":"x"}"#))
            .unwrap();
        assert!(matches!(extract(request).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_failed_fields_reported_in_name_order() {
        let error = extract(json_request(r#"{"email":"","password":""}"#))
            .await
            .unwrap_err();
        assert_eq!(error.user_message(), "Email is required, password is invalid");
    }
}
