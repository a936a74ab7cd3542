//! axum front end: route guard, auth routes and role pages.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use classmaster::middleware::{WebConfig, router};
//!
//! let config = WebConfig::from_env()?;
//! let listener = tokio::net::TcpListener::bind(config.bind()).await?;
//! axum::serve(listener, router(config.into_state()?)).await?;
//! ```
//!
//! Every request except excluded paths goes through [`route_guard`]
//! before routing. Handlers read the signed-in user through
//! [`CurrentUser`].

mod config;
mod error;
mod extractor;
mod guard;
mod pages;
mod routes;
mod state;

pub use config::WebConfig;
pub use error::WebError;
pub use extractor::CurrentUser;
pub use guard::route_guard;
pub use state::AppState;

use axum::Router;

/// Full application router, guard included.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::auth_routes())
        .merge(pages::page_routes())
        .layer(axum::middleware::from_fn(route_guard))
        .with_state(state)
}
