//! HTTP handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use promptlib::ExportFormat;
use promptlib::FilterState;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use super::state::SharedState;
use crate::analytics::{PROMPT_FILTER_CHANGED, Properties, ROI_CALCULATED};
use crate::assets;
use crate::error::SiteError;
use crate::pages::PageParams;
use crate::roi::{RoiInputs, RoiResult, calculate_roi, parse_number};
use crate::routes::{Page, Resolution};

/// Query parameters as ordered pairs; `tag` may repeat
pub type QueryPairs = Vec<(String, String)>;

/// Longest accepted client event name
const MAX_EVENT_NAME: usize = 64;

/// Build a prompt filter from `q`, `tag` and `category` parameters
pub fn filter_from_query(params: &[(String, String)]) -> FilterState {
    let mut state = FilterState::new();
    for (key, value) in params {
        match key.as_str() {
            "q" => state.set_search(value.as_str()),
            "tag" if !value.trim().is_empty() => {
                state.active_tags.insert(value.trim().to_string());
            }
            "category" => state.set_category(Some(value.clone())),
            _ => {}
        }
    }
    state
}

/// Override `defaults` with any calculator fields present in `params`
///
/// Malformed numbers count as zero.
pub fn roi_inputs_from_query(params: &[(String, String)], defaults: RoiInputs) -> RoiInputs {
    let mut inputs = defaults;
    for (key, value) in params {
        let slot = match key.as_str() {
            "dailyNoShows" => &mut inputs.daily_no_shows,
            "showRatePercent" => &mut inputs.show_rate_percent,
            "rebookRatePercent" => &mut inputs.rebook_rate_percent,
            "avgTicket" => &mut inputs.avg_ticket,
            "daysPerMonth" => &mut inputs.days_per_month,
            _ => continue,
        };
        *slot = parse_number(value);
    }
    inputs
}

fn has_roi_params(params: &[(String, String)]) -> bool {
    params.iter().any(|(k, _)| {
        matches!(
            k.as_str(),
            "dailyNoShows" | "showRatePercent" | "rebookRatePercent" | "avgTicket" | "daysPerMonth"
        )
    })
}

fn filter_properties(state: &FilterState) -> Properties {
    let mut props = Properties::new();
    props.insert("search".to_string(), Value::from(state.search_text.clone()));
    props.insert(
        "tags".to_string(),
        Value::from(state.active_tags.iter().cloned().collect::<Vec<_>>()),
    );
    props.insert(
        "category".to_string(),
        state.active_category.clone().map(Value::from).unwrap_or(Value::Null),
    );
    props
}

/// Every site page, print variant and redirect
pub async fn page(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    Query(params): Query<QueryPairs>,
) -> Response {
    debug!(%method, %uri, "page: called");
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    match state.site.routes.resolve(uri.path()) {
        Resolution::Redirect(to) => {
            let target = match uri.query() {
                Some(q) if !q.is_empty() => format!("{}?{}", to, q),
                _ => to,
            };
            Redirect::permanent(&target).into_response()
        }
        Resolution::Page { page, print } => {
            let mut page_params = PageParams::default();
            match page {
                Page::Prompts => {
                    page_params.filter = filter_from_query(&params);
                    if !page_params.filter.is_empty() {
                        state
                            .analytics
                            .track(PROMPT_FILTER_CHANGED, filter_properties(&page_params.filter));
                    }
                }
                Page::Roi if has_roi_params(&params) => {
                    page_params.roi = Some(roi_inputs_from_query(&params, state.site.content.roi));
                }
                _ => {}
            }
            match state.pages.render_page(&state.site, &page, print, &page_params) {
                Ok(html) => Html(html).into_response(),
                Err(SiteError::NotFound(_)) => not_found_page(&state, uri.path()),
                Err(e) => e.into_response(),
            }
        }
        Resolution::NotFound => not_found_page(&state, uri.path()),
    }
}

fn not_found_page(state: &SharedState, path: &str) -> Response {
    debug!(%path, "not_found_page: called");
    match state.pages.render_not_found(&state.site, path) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render not-found page: {}", e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// `GET /api/roi`
pub async fn api_roi(State(state): State<SharedState>, Query(params): Query<QueryPairs>) -> Json<RoiResult> {
    let inputs = roi_inputs_from_query(&params, state.site.content.roi).clamped();
    debug!(?inputs, "api_roi: called");
    let result = calculate_roi(&inputs, &state.site.tiers());

    if let Ok(Value::Object(mut props)) = serde_json::to_value(inputs) {
        props.insert("recoveredRevenue".to_string(), Value::from(result.recovered_revenue));
        state.analytics.track(ROI_CALCULATED, props);
    }
    Json(result)
}

/// Event posted by the page scripts
#[derive(Debug, Deserialize)]
pub struct ClientEvent {
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
}

fn valid_event_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_EVENT_NAME
        && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// `POST /api/events`
pub async fn api_events(State(state): State<SharedState>, Json(event): Json<ClientEvent>) -> Response {
    debug!(name = %event.name, "api_events: called");
    if !valid_event_name(&event.name) {
        return (StatusCode::BAD_REQUEST, "Invalid event name").into_response();
    }
    state.analytics.track(&event.name, event.properties);
    StatusCode::NO_CONTENT.into_response()
}

fn export_response(state: &SharedState, format: ExportFormat, attachment: bool) -> Result<Response, SiteError> {
    debug!(?format, attachment, "export_response: called");
    let body = promptlib::export::export(&state.site.library, &state.site.export_title(), format)?;
    let disposition = if attachment {
        format!("attachment; filename=\"{}\"", format.file_name())
    } else {
        format!("inline; filename=\"{}\"", format.file_name())
    };
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// `GET /prompts/download.md`
pub async fn download_markdown(State(state): State<SharedState>) -> Result<Response, SiteError> {
    export_response(&state, ExportFormat::Markdown, true)
}

/// `GET /prompts/download.html`, which opens the print dialog on load
pub async fn download_print(State(state): State<SharedState>) -> Result<Response, SiteError> {
    export_response(&state, ExportFormat::Html, false)
}

/// `GET /assets/{file}`
pub async fn asset(Path(file): Path<String>) -> Result<Response, SiteError> {
    let asset = assets::get(&file).ok_or_else(|| SiteError::NotFound(format!("asset {}", file)))?;
    Ok((
        [
            (header::CONTENT_TYPE, asset.content_type),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        asset.body,
    )
        .into_response())
}

/// `GET /healthz`
pub async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> QueryPairs {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_filter_from_query() {
        let state = filter_from_query(&pairs(&[
            ("q", "gap"),
            ("tag", "sms"),
            ("tag", "review"),
            ("tag", " "),
            ("category", "recovery"),
            ("other", "x"),
        ]));
        assert_eq!(state.search_text, "gap");
        assert_eq!(state.active_tags.len(), 2);
        assert!(state.active_tags.contains("review"));
        assert_eq!(state.active_category.as_deref(), Some("recovery"));
    }

    #[test]
    fn test_repeated_tag_is_not_toggled_off() {
        let state = filter_from_query(&pairs(&[("tag", "sms"), ("tag", "sms")]));
        assert!(state.active_tags.contains("sms"));
    }

    #[test]
    fn test_empty_query_is_empty_filter() {
        assert!(filter_from_query(&pairs(&[("category", "")])).is_empty());
    }

    #[test]
    fn test_roi_inputs_from_query() {
        let inputs = roi_inputs_from_query(
            &pairs(&[("avgTicket", "$95"), ("daysPerMonth", "abc")]),
            RoiInputs::default(),
        );
        assert_eq!(inputs.avg_ticket, 95.0);
        assert_eq!(inputs.days_per_month, 0.0);
        assert_eq!(inputs.daily_no_shows, 2.0);
    }

    #[test]
    fn test_event_names() {
        assert!(valid_event_name("prompt_copied"));
        assert!(!valid_event_name(""));
        assert!(!valid_event_name("Prompt Copied"));
        assert!(!valid_event_name(&"a".repeat(MAX_EVENT_NAME + 1)));
    }
}
