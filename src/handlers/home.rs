//! Landing page listing the available routes.

use axum::response::Html;

const ROUTES_HTML: &str = "<h3>Available Routes:</h3><br/><br/>\
<h4>Precipitation:</h4>\
/api/v1.0/precipitation<br/>\
/api/v1.0/precipitation?format=map (one value per date; readings sharing a date collapse to one)<br/><br/>\
<h4>Stations:</h4>\
/api/v1.0/stations<br/><br/>\
<h4>Temperature Observations (most active station, last 12 months):</h4>\
/api/v1.0/tobs<br/><br/>\
<h4>Minimum, average, and max temperature of the most active station for a start or start-end range:</h4>\
/api/v1.0/&lt;start&gt;<br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>\
Dates are YYYY-MM-DD; both ends are inclusive.<br/><br/>\
<h4>Server status:</h4>\
/heartbeat<br/>";

/// Handle GET / requests
pub async fn home_handler() -> Html<&'static str> {
    Html(ROUTES_HTML)
}
