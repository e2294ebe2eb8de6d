use crate::trends::error::TrendDataError;
use crate::trends::timeline::{parse_timeline, timeseries_widget, ComparisonItem, ExploreRequest};
use crate::types::country::Country;
use crate::types::frames::trend_series::TrendSeries;
use crate::types::state::State;
use log::{info, warn};
use reqwest::blocking::Client;

const HOME_URL: &str = "https://trends.google.com/";
const EXPLORE_URL: &str = "https://trends.google.com/trends/api/explore";
const MULTILINE_URL: &str = "https://trends.google.com/trends/api/widgetdata/multiline";

/// Query settings for the trends service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsSettings {
    /// Interface language, e.g. `en-AU`.
    pub host_language: String,
    /// Offset from UTC in minutes, as the service expects it (positive west of UTC).
    pub tz_offset_minutes: i32,
    /// Relative time window of the query.
    pub timeframe: String,
}

impl Default for TrendsSettings {
    fn default() -> Self {
        Self {
            host_language: "en-AU".to_string(),
            tz_offset_minutes: 360,
            timeframe: "today 5-y".to_string(),
        }
    }
}

/// Fetches weekly interest-over-time data for a keyword.
pub struct TrendDataReader {
    client: Client,
    settings: TrendsSettings,
}

impl TrendDataReader {
    pub fn new(settings: TrendsSettings) -> Result<Self, TrendDataError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(TrendDataError::ClientBuild)?;
        Ok(Self { client, settings })
    }

    /// Reads the interest-over-time series for `keyword` in `country`-`state`.
    pub fn read(
        &self,
        keyword: &str,
        country: Country,
        state: State,
    ) -> Result<TrendSeries, TrendDataError> {
        let geo = country.geo_code(state);
        info!("Requesting Google trends data for '{}' in {}", keyword, geo);

        // The API rejects requests that do not carry the session cookie set by the home page.
        self.get_text(HOME_URL, &[("geo", country.code().to_string())])?;

        let explore_request = ExploreRequest {
            comparison_item: vec![ComparisonItem {
                keyword,
                time: &self.settings.timeframe,
                geo: &geo,
            }],
            category: 0,
            property: "",
        };
        let explore_payload =
            serde_json::to_string(&explore_request).map_err(TrendDataError::RequestEncode)?;
        let explore_body = self.get_text(EXPLORE_URL, &self.query(explore_payload, None))?;
        let (widget_request, token) = timeseries_widget(&explore_body, EXPLORE_URL, keyword)?;

        let timeline_body = self.get_text(
            MULTILINE_URL,
            &self.query(widget_request.to_string(), Some(token)),
        )?;
        let frame = parse_timeline(&timeline_body, keyword)?;
        info!("Received {} weeks of trend data", frame.height());

        Ok(TrendSeries::new(keyword, frame))
    }

    fn query(&self, request: String, token: Option<String>) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("hl", self.settings.host_language.clone()),
            ("tz", self.settings.tz_offset_minutes.to_string()),
            ("req", request),
        ];
        if let Some(token) = token {
            query.push(("token", token));
        }
        query
    }

    fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, TrendDataError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| TrendDataError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    TrendDataError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    TrendDataError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        response
            .text()
            .map_err(|e| TrendDataError::NetworkRequest(url.to_string(), e))
    }
}
