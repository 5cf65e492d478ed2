//! Bookmarks Module
//!
//! The bookmark resource: persisted saved links with a title, URL, free-text
//! description, and rating, exposed over a token-guarded REST surface.
//!
//! # Features
//!
//! - CRUD store gateway over the shared database connection
//! - Ready-to-use HTTP handlers and routes
//! - Payload validation and output sanitization
//! - Database migrations included
//!
//! # Usage
//!
//! ```rust,ignore
//! use bokmerke::bookmarks;
//!
//! // Mount the routes
//! let app = Router::new()
//!     .nest("/api", bookmarks::routes())
//!     .with_state(app_state);
//!
//! // Use the store directly
//! let store = bookmarks::Bookmarks::new(connection);
//! let bookmark = store.insert(input).await?;
//! ```

mod handler;
mod routes;
mod sanitize;
mod store;
mod validate;

pub use routes::routes;
pub use sanitize::sanitize;
pub use store::*;
pub use validate::{validate_create, validate_update};

/// Returns the migrations for the bookmarks module, applied during startup.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "bookmarks_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
