//! JSON body extractor whose rejections use the `{success:false, message}` shape.

use axum::extract::FromRequest;

use crate::http::error::AppError;

/// Like `axum::Json`, but rejections become [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
