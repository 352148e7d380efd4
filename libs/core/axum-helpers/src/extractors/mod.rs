//! Extractors that reject with [`AppError`](crate::errors::AppError) bodies
//! instead of axum's plain-text rejections.

pub mod json_body;
pub mod uuid_path;

pub use json_body::JsonBody;
pub use uuid_path::UuidPath;
