//! Text rendering of the view state.

use std::fmt;

use chrono::{DateTime, NaiveDate};

use crate::{
    model::{CurrentWeather, ForecastSample},
    state::ViewState,
};

pub const UNKNOWN_ICON: &str = "/weather-icons/unknown.svg";

/// Provider icon code → image path.
const ICONS: &[(&str, &str)] = &[
    ("01d", "/weather-icons/clear-day.svg"),
    ("01n", "/weather-icons/clear-night.svg"),
    ("02d", "/weather-icons/partly-cloudy-day.svg"),
    ("02n", "/weather-icons/partly-cloudy-night.svg"),
    ("03d", "/weather-icons/cloudy.svg"),
    ("03n", "/weather-icons/cloudy.svg"),
    ("04d", "/weather-icons/cloudy.svg"),
    ("04n", "/weather-icons/cloudy.svg"),
    ("09d", "/weather-icons/rain.svg"),
    ("09n", "/weather-icons/rain.svg"),
    ("10d", "/weather-icons/rain.svg"),
    ("10n", "/weather-icons/rain.svg"),
    ("11d", "/weather-icons/thunderstorm.svg"),
    ("11n", "/weather-icons/thunderstorm.svg"),
    ("13d", "/weather-icons/snow.svg"),
    ("13n", "/weather-icons/snow.svg"),
    ("50d", "/weather-icons/fog.svg"),
    ("50n", "/weather-icons/fog.svg"),
];

pub fn icon_path(code: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(UNKNOWN_ICON, |&(_, path)| path)
}

/// Short label for terminals, e.g. "partly-cloudy-day".
pub fn icon_label(code: &str) -> &'static str {
    let path = icon_path(code);
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".svg").unwrap_or(file)
}

pub fn round_temp(celsius: f64) -> i64 {
    celsius.round() as i64
}

/// m/s → km/h, rounded.
pub fn wind_kmh(mps: f64) -> i64 {
    (mps * 3.6).round() as i64
}

/// "Mon, Mar 4" from the sample's day stamp, or its UTC timestamp.
pub fn format_day(sample: &ForecastSample) -> String {
    let date = NaiveDate::parse_from_str(sample.day_key(), "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::from_timestamp(sample.timestamp, 0).map(|dt| dt.date_naive()));

    match date {
        Some(date) => date.format("%a, %b %-d").to_string(),
        None => sample.day_key().to_string(),
    }
}

/// "Monday, March 4, 2024".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render(state: &ViewState, today: NaiveDate) -> String {
    View { state, today }.to_string()
}

/// The view state as of `today`, printable.
pub struct View<'a> {
    pub state: &'a ViewState,
    pub today: NaiveDate,
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;

        writeln!(f, "Weather Forecast\n================")?;

        if state.is_loading {
            writeln!(f, "\nLoading...")?;
        }

        if let Some(message) = state.error_message() {
            writeln!(f, "\n! {message}")?;
        }

        if let Some(current) = &state.current {
            write_current(f, current, self.today)?;
        }

        if state.forecast.is_some() {
            writeln!(f, "\n5-Day Forecast\n--------------")?;
            for entry in state.daily_forecast() {
                let sample = entry.sample;
                writeln!(
                    f,
                    "{:<12} [{}] {:>4}°C  {:<24} Humidity: {}%",
                    format_day(sample),
                    icon_label(&sample.condition.icon),
                    round_temp(sample.temperature_c),
                    capitalize(&sample.condition.description),
                    sample.humidity_pct,
                )?;
            }
        }

        writeln!(f, "\nWeather data provided by OpenWeatherMap")
    }
}

fn write_current(
    f: &mut fmt::Formatter<'_>,
    current: &CurrentWeather,
    today: NaiveDate,
) -> fmt::Result {
    writeln!(f, "\n{}, {}", current.location_name, current.country)?;
    writeln!(f, "{}", format_long_date(today))?;
    writeln!(
        f,
        "\n  {}°C  {} [{}]",
        round_temp(current.temperature_c),
        capitalize(&current.condition.description),
        icon_label(&current.condition.icon),
    )?;
    writeln!(f, "  Feels like: {}°C", round_temp(current.feels_like_c))?;
    writeln!(f, "  Humidity:   {}%", current.humidity_pct)?;
    writeln!(f, "  Pressure:   {} hPa", current.pressure_hpa)?;
    writeln!(f, "  Wind:       {} km/h", wind_kmh(current.wind_speed_mps))
}
