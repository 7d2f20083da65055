//! Current weather for a fixed set of cities
//!
//! City names resolve against a built-in coordinate table and conditions come
//! from the Open-Meteo forecast API, which needs no key. The last city's
//! report is cached so repeating a search does not hit the network.

use std::sync::Mutex;

use futures::future::BoxFuture;
use serde::Deserialize;

use crate::error::LabError;
use crate::pipeline::{Lookup, Verdict};

/// Open-Meteo API root
const OPEN_METEO_URL: &str = "https://api.open-meteo.com";

/// Cities the lookup can resolve, lowercase, with latitude and longitude
pub const SUPPORTED_CITIES: &[(&str, f64, f64)] = &[
    ("london", 51.5074, -0.1278),
    ("new york", 40.7128, -74.0060),
    ("mumbai", 19.0760, 72.8777),
    ("delhi", 28.6139, 77.2090),
    ("tokyo", 35.6895, 139.6917),
    ("paris", 48.8566, 2.3522),
    ("sydney", -33.8688, 151.2093),
    ("mangalagiri", 16.4312, 80.5687),
    ("vijayawada", 16.5062, 80.6480),
    ("guntur", 16.3067, 80.4365),
    ("amaravati", 16.5062, 80.6480),
];

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// City as typed, first letter capitalized
    pub city: String,
    /// Degrees Celsius, rounded
    pub temperature: i64,
    /// Relative humidity percentage
    pub humidity: i64,
    pub condition: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    weather_code: u16,
}

/// Human description of a WMO weather interpretation code
pub fn weather_code_description(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        _ => "Unknown",
    }
}

fn coordinates(city: &str) -> Option<(f64, f64)> {
    SUPPORTED_CITIES
        .iter()
        .find(|(name, _, _)| *name == city)
        .map(|&(_, lat, lon)| (lat, lon))
}

fn capitalize(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct WeatherLookup {
    client: reqwest::Client,
    base_url: String,
    /// Lowercase city and its report from the most recent fetch
    last: Mutex<Option<(String, WeatherReport)>>,
}

impl Default for WeatherLookup {
    fn default() -> Self {
        Self::new(OPEN_METEO_URL)
    }
}

impl WeatherLookup {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            last: Mutex::new(None),
        }
    }

    fn cached(&self, key: &str) -> Option<WeatherReport> {
        let last = self.last.lock().ok()?;
        match last.as_ref() {
            Some((city, report)) if city == key => Some(report.clone()),
            _ => None,
        }
    }

    fn remember(&self, key: String, report: WeatherReport) {
        if let Ok(mut last) = self.last.lock() {
            *last = Some((key, report));
        }
    }

    async fn fetch(&self, city: &str, lat: f64, lon: f64) -> Result<WeatherReport, LabError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,weather_code".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LabError::Network(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        let forecast: ForecastResponse = response.json().await?;
        let current = forecast.current;
        Ok(WeatherReport {
            city: capitalize(city),
            temperature: current.temperature_2m.round() as i64,
            humidity: current.relative_humidity_2m.round() as i64,
            condition: weather_code_description(current.weather_code).to_string(),
        })
    }
}

impl Lookup for WeatherLookup {
    type Hit = WeatherReport;

    fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Verdict<WeatherReport>, LabError>> {
        Box::pin(async move {
            let key = query.to_lowercase();
            if let Some(report) = self.cached(&key) {
                log::debug!("Weather cache hit for {:?}", key);
                return Ok(Verdict::Match(report));
            }

            let (lat, lon) = coordinates(&key).ok_or_else(|| {
                LabError::NotFound(
                    "City not supported. Try: London, Mumbai, Delhi, New York, etc.".to_string(),
                )
            })?;

            let report = self.fetch(query, lat, lon).await?;
            self.remember(key, report.clone());
            Ok(Verdict::Match(report))
        })
    }
}
