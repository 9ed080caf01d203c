//! View state and the events that drive it.
//!
//! State only changes through [`ViewState::reduce`]. Every fetch attempt is
//! tagged with an [`AttemptId`]; results from an attempt that has since been
//! superseded are dropped instead of overwriting newer data.

use std::fmt;

use crate::{
    error::FetchError,
    forecast::{DailyForecastEntry, daily_forecast},
    model::{CurrentWeather, Forecast},
};

/// Monotonically increasing tag of a fetch attempt. `0` means none yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl AttemptId {
    pub fn next(self) -> Self {
        AttemptId(self.0 + 1)
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user edited the location text.
    LocationEdited(String),
    /// A new attempt begins.
    Started { attempt: AttemptId },
    /// Current conditions arrived. `rename` replaces the location text with
    /// the provider's place name (used for geolocated attempts).
    CurrentLoaded { attempt: AttemptId, weather: CurrentWeather, rename: bool },
    ForecastLoaded { attempt: AttemptId, forecast: Forecast },
    Failed { attempt: AttemptId, error: FetchError },
    /// The attempt is over, whatever the outcome.
    Settled { attempt: AttemptId },
}

impl Event {
    fn attempt(&self) -> Option<AttemptId> {
        match self {
            Event::LocationEdited(_) => None,
            Event::Started { attempt }
            | Event::CurrentLoaded { attempt, .. }
            | Event::ForecastLoaded { attempt, .. }
            | Event::Failed { attempt, .. }
            | Event::Settled { attempt } => Some(*attempt),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub location_text: String,
    pub current: Option<CurrentWeather>,
    pub forecast: Option<Forecast>,
    pub is_loading: bool,
    pub error: Option<FetchError>,
    attempt: AttemptId,
}

impl ViewState {
    /// The latest attempt that was started.
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    /// Id to use for the next attempt.
    pub fn next_attempt(&self) -> AttemptId {
        self.attempt.next()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Daily entries derived from the current forecast samples.
    pub fn daily_forecast(&self) -> Vec<DailyForecastEntry<'_>> {
        self.forecast.as_ref().map(|f| daily_forecast(&f.samples)).unwrap_or_default()
    }

    pub fn reduce(mut self, event: Event) -> Self {
        if let Event::Started { attempt } = event {
            if attempt <= self.attempt {
                tracing::debug!(%attempt, latest = %self.attempt, "ignoring out-of-order start");
                return self;
            }
            self.attempt = attempt;
            self.is_loading = true;
            self.error = None;
            return self;
        }

        if let Some(attempt) = event.attempt() {
            if attempt != self.attempt {
                tracing::debug!(%attempt, latest = %self.attempt, "discarding stale result");
                return self;
            }
        }

        match event {
            Event::LocationEdited(text) => self.location_text = text,
            Event::CurrentLoaded { weather, rename, .. } => {
                if rename {
                    self.location_text = weather.location_name.clone();
                }
                self.current = Some(weather);
                // The old forecast belongs to the previous place.
                self.forecast = None;
            }
            Event::ForecastLoaded { forecast, .. } => self.forecast = Some(forecast),
            Event::Failed { error, .. } => self.error = Some(error),
            Event::Settled { .. } => self.is_loading = false,
            Event::Started { .. } => {}
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, ForecastSample};

    fn weather(name: &str) -> CurrentWeather {
        CurrentWeather {
            location_name: name.to_string(),
            country: "GB".to_string(),
            temperature_c: 12.0,
            feels_like_c: 11.0,
            humidity_pct: 80,
            pressure_hpa: 1010,
            wind_speed_mps: 3.0,
            condition: Condition::default(),
        }
    }

    fn forecast() -> Forecast {
        Forecast {
            samples: vec![ForecastSample {
                timestamp: 1_709_294_400,
                day_stamp: "2024-03-01 12:00:00".into(),
                temperature_c: 5.0,
                feels_like_c: 3.0,
                humidity_pct: 70,
                condition: Condition::default(),
            }],
        }
    }

    fn apply(state: ViewState, events: impl IntoIterator<Item = Event>) -> ViewState {
        events.into_iter().fold(state, ViewState::reduce)
    }

    fn loaded(name: &str) -> ViewState {
        let attempt = AttemptId::default().next();
        apply(
            ViewState::default(),
            [
                Event::Started { attempt },
                Event::CurrentLoaded { attempt, weather: weather(name), rename: false },
                Event::ForecastLoaded { attempt, forecast: forecast() },
                Event::Settled { attempt },
            ],
        )
    }

    #[test]
    fn successful_attempt_populates_state() {
        let state = loaded("London");

        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.current.as_ref().map(|w| w.location_name.as_str()), Some("London"));
        assert_eq!(state.daily_forecast().len(), 1);
    }

    #[test]
    fn start_sets_loading_clears_error_and_keeps_data() {
        let mut state = loaded("London");
        state.error = Some(FetchError::ForecastUnavailable);

        let attempt = state.next_attempt();
        let state = state.reduce(Event::Started { attempt });

        assert!(state.is_loading);
        assert_eq!(state.error, None);
        assert!(state.current.is_some());
        assert!(state.forecast.is_some());
    }

    #[test]
    fn failure_keeps_previous_weather() {
        let state = loaded("London");
        let attempt = state.next_attempt();

        let state = apply(
            state,
            [
                Event::Started { attempt },
                Event::Failed { attempt, error: FetchError::LocationNotFound },
                Event::Settled { attempt },
            ],
        );

        assert!(!state.is_loading);
        assert_eq!(
            state.error_message().as_deref(),
            Some("Location not found. Please try another search term.")
        );
        assert_eq!(state.current.as_ref().map(|w| w.location_name.as_str()), Some("London"));
        assert!(state.forecast.is_some());
    }

    #[test]
    fn forecast_failure_shows_new_current_without_old_forecast() {
        let state = loaded("London");
        let attempt = state.next_attempt();

        let state = apply(
            state,
            [
                Event::Started { attempt },
                Event::CurrentLoaded { attempt, weather: weather("Paris"), rename: false },
                Event::Failed { attempt, error: FetchError::ForecastUnavailable },
                Event::Settled { attempt },
            ],
        );

        assert_eq!(state.current.as_ref().map(|w| w.location_name.as_str()), Some("Paris"));
        assert_eq!(state.forecast, None);
        assert!(state.daily_forecast().is_empty());
        assert_eq!(state.error, Some(FetchError::ForecastUnavailable));
    }

    #[test]
    fn results_from_superseded_attempt_are_dropped() {
        let first = AttemptId::default().next();
        let second = first.next();

        let state = apply(
            ViewState::default(),
            [
                Event::Started { attempt: first },
                Event::Started { attempt: second },
                Event::CurrentLoaded { attempt: second, weather: weather("Paris"), rename: false },
                // Late arrivals from the first attempt.
                Event::CurrentLoaded { attempt: first, weather: weather("London"), rename: true },
                Event::Failed { attempt: first, error: FetchError::ForecastUnavailable },
                Event::Settled { attempt: first },
            ],
        );

        assert_eq!(state.attempt(), second);
        assert!(state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.current.as_ref().map(|w| w.location_name.as_str()), Some("Paris"));
        assert_eq!(state.location_text, "");
    }

    #[test]
    fn late_start_of_older_attempt_is_ignored() {
        let first = AttemptId::default().next();
        let second = first.next();

        let state = apply(
            ViewState::default(),
            [
                Event::Started { attempt: second },
                Event::Settled { attempt: second },
                Event::Started { attempt: first },
            ],
        );

        assert_eq!(state.attempt(), second);
        assert!(!state.is_loading);
    }

    #[test]
    fn rename_replaces_location_text() {
        let attempt = AttemptId::default().next();
        let state = apply(
            ViewState::default(),
            [
                Event::LocationEdited("somewhere".into()),
                Event::Started { attempt },
                Event::CurrentLoaded { attempt, weather: weather("Berlin"), rename: true },
            ],
        );

        assert_eq!(state.location_text, "Berlin");
    }

    #[test]
    fn attempt_ids_increase() {
        let a = AttemptId::default();
        assert!(a.next() > a);
        assert_eq!(a.next().to_string(), "#1");
    }
}
