//! Embedded dashboard load-time probe.
//!
//! The browser side is an external collaborator: this module only renders the
//! embed snippet it runs and parses the load-time events it posts back. The
//! snippet wires `performance.now()` deltas to the dashboard component's
//! initialization and render-complete events and forwards them to the host
//! page via `postMessage` as `{"type": ..., "loadTime": ...}`.

use flexprobe_config::DashboardConfig;
use flexprobe_session::LoadStage;
use serde_json::Value;
use thiserror::Error;

/// Errors parsing a load-time event posted back by the embedded dashboard.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardEventError {
    #[error("dashboard event is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("dashboard event is missing field '{0}'")]
    MissingField(&'static str),

    #[error("dashboard event has unknown type '{0}'")]
    UnknownStage(String),
}

/// Render the embeddable dashboard snippet for the given host and dashboard.
#[must_use]
pub fn embed_html(hostname: &str, dashboard: &DashboardConfig) -> String {
    format!(
        r#"<div class="responsive-web-component-container">
    <script type="module" src="{hostname}/components/{component}.js?auth=sso"></script>
    <gd-dashboard
        id="probedDashboard"
        dashboard="{dashboard}"
    ></gd-dashboard>
</div>
<script>
    document.addEventListener('DOMContentLoaded', function() {{
        var start = performance.now();
        var dashboard = document.getElementById('probedDashboard');

        function reportLoadTime(type) {{
            var loadTime = performance.now() - start;
            console.log(type + ' load time:', loadTime, 'ms');
            window.parent.postMessage({{type: type, loadTime: loadTime}}, '*');
        }}

        dashboard.addEventListener('GDC.DASH/EVT.INITIALIZED', function() {{
            reportLoadTime('Initialization');
        }});

        dashboard.addEventListener('GDC.DASH/EVT.RENDER.RESOLVED', function() {{
            reportLoadTime('RenderComplete');
        }});
    }});
</script>
"#,
        hostname = hostname,
        component = dashboard.component_id,
        dashboard = dashboard.dashboard_id,
    )
}

/// Parse one posted-back load event into its stage and duration.
///
/// # Errors
///
/// Returns a [`DashboardEventError`] naming what is wrong with the payload.
pub fn parse_load_event(payload: &str) -> Result<(LoadStage, f64), DashboardEventError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| DashboardEventError::InvalidJson(e.to_string()))?;

    let stage = match value.get("type").and_then(Value::as_str) {
        Some("Initialization") => LoadStage::Initialization,
        Some("RenderComplete") => LoadStage::RenderComplete,
        Some(other) => return Err(DashboardEventError::UnknownStage(other.to_string())),
        None => return Err(DashboardEventError::MissingField("type")),
    };

    let load_ms = value
        .get("loadTime")
        .and_then(Value::as_f64)
        .ok_or(DashboardEventError::MissingField("loadTime"))?;

    Ok((stage, load_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DashboardConfig {
        DashboardConfig {
            dashboard_id: "dash-123".to_string(),
            component_id: "comp-456".to_string(),
        }
    }

    #[test]
    fn test_embed_html_wires_component_and_dashboard() {
        let html = embed_html("https://demo.cloud.example.com", &config());

        assert!(html.contains("https://demo.cloud.example.com/components/comp-456.js?auth=sso"));
        assert!(html.contains(r#"dashboard="dash-123""#));
        assert!(html.contains("GDC.DASH/EVT.INITIALIZED"));
        assert!(html.contains("GDC.DASH/EVT.RENDER.RESOLVED"));
        assert!(html.contains("postMessage"));
    }

    #[test]
    fn test_parse_initialization_event() {
        let (stage, load_ms) =
            parse_load_event(r#"{"type": "Initialization", "loadTime": 812.4}"#).unwrap();
        assert_eq!(stage, LoadStage::Initialization);
        assert_eq!(load_ms, 812.4);
    }

    #[test]
    fn test_parse_render_complete_event() {
        let (stage, _) =
            parse_load_event(r#"{"type": "RenderComplete", "loadTime": 2100}"#).unwrap();
        assert_eq!(stage, LoadStage::RenderComplete);
    }

    #[test]
    fn test_parse_rejects_unknown_stage() {
        let err = parse_load_event(r#"{"type": "Painted", "loadTime": 1}"#).unwrap_err();
        assert_eq!(err, DashboardEventError::UnknownStage("Painted".to_string()));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert_eq!(
            parse_load_event(r#"{"loadTime": 1}"#).unwrap_err(),
            DashboardEventError::MissingField("type")
        );
        assert_eq!(
            parse_load_event(r#"{"type": "Initialization"}"#).unwrap_err(),
            DashboardEventError::MissingField("loadTime")
        );
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(
            parse_load_event("not json").unwrap_err(),
            DashboardEventError::InvalidJson(_)
        ));
    }
}
