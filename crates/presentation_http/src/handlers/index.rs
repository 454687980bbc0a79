//! Route listing served at the root path

use axum::response::Html;

/// Routes advertised on `/`; path parameters are HTML-escaped
pub const ROUTE_LISTING: &str = "Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/&lt;start&gt;<br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;";

/// List all available API routes
pub async fn list_routes() -> Html<&'static str> {
    Html(ROUTE_LISTING)
}
