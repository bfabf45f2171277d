//! Request Extractors

use axum::extract::FromRequest;

use crate::error::AuthError;

/// `Json` whose rejection renders as an `AuthError` problem body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct JsonBody<T>(pub T);
