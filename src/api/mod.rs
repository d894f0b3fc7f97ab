//! Backend HTTP surface consumed by the client.
//!
//! - `backend`: [`VideoApi`] trait, the seam between state holders and HTTP
//! - `http`: [`HttpApi`], the `reqwest` implementation
//! - `models`: response payloads with no domain counterpart

pub mod backend;
pub mod http;
pub mod models;

pub use backend::VideoApi;
pub use http::{HttpApi, DEFAULT_API_URL};
pub use models::{LikeStatus, LoginResponse, MessageResponse, UploadResponse};
