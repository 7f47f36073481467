//! HTTP surface of the service.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned or propagated)
//!     → handlers.rs (list / count / get / create / update / delete)
//!         → etag.rs (conditional GET)
//!         → error.rs (failures as status + {"message"})
//!     → Send to client
//! ```

pub mod error;
pub mod etag;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use request::{RequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
