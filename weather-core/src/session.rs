//! Runs fetch attempts against a provider and folds their results into the view state.

use tracing::instrument;

use crate::{
    error::FetchError,
    geolocation::Geolocator,
    model::LocationQuery,
    provider::WeatherProvider,
    state::{AttemptId, Event, ViewState},
};

/// One user's view: a provider, a location source and the state they drive.
#[derive(Debug)]
pub struct Session {
    provider: Box<dyn WeatherProvider>,
    geolocator: Box<dyn Geolocator>,
    state: ViewState,
}

impl Session {
    pub fn new(provider: Box<dyn WeatherProvider>, geolocator: Box<dyn Geolocator>) -> Self {
        Self { provider, geolocator, state: ViewState::default() }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_location_text(&mut self, text: impl Into<String>) {
        self.dispatch(Event::LocationEdited(text.into()));
    }

    /// Search for the current location text. Blank text does nothing and
    /// returns `false`.
    pub async fn submit(&mut self) -> bool {
        if self.state.location_text.trim().is_empty() {
            return false;
        }
        let text = self.state.location_text.clone();
        self.search(&text).await;
        true
    }

    /// Fetch current conditions and forecast for a free-text location.
    pub async fn search(&mut self, text: &str) {
        let attempt = self.start();
        let query = LocationQuery::Text(text.to_string());
        self.fetch(attempt, &query, false).await;
        self.dispatch(Event::Settled { attempt });
    }

    /// Fetch for the position reported by the geolocator.
    pub async fn use_my_location(&mut self) {
        let attempt = self.start();

        match self.geolocator.locate().await {
            Ok(position) => {
                let query = LocationQuery::Coordinates(position);
                self.fetch(attempt, &query, true).await;
            }
            Err(err) => {
                tracing::warn!(%err, "geolocation failed");
                self.dispatch(Event::Failed { attempt, error: err.into() });
            }
        }

        self.dispatch(Event::Settled { attempt });
    }

    fn start(&mut self) -> AttemptId {
        let attempt = self.state.next_attempt();
        self.dispatch(Event::Started { attempt });
        attempt
    }

    fn dispatch(&mut self, event: Event) {
        self.state = std::mem::take(&mut self.state).reduce(event);
    }

    /// Current conditions first; the forecast is only requested once they
    /// arrived.
    #[instrument(skip(self, query), fields(query = %query))]
    async fn fetch(&mut self, attempt: AttemptId, query: &LocationQuery, by_position: bool) {
        let weather = match self.provider.current(query).await {
            Ok(weather) => weather,
            Err(err) => return self.fail(attempt, FetchError::from_api(&err, by_position), &err),
        };
        self.dispatch(Event::CurrentLoaded { attempt, weather, rename: by_position });

        match self.provider.forecast(query).await {
            Ok(forecast) => {
                tracing::info!("weather loaded");
                self.dispatch(Event::ForecastLoaded { attempt, forecast });
            }
            Err(err) => self.fail(attempt, FetchError::from_api(&err, by_position), &err),
        }
    }

    fn fail(&mut self, attempt: AttemptId, error: FetchError, cause: &dyn std::error::Error) {
        tracing::warn!(%cause, "fetch failed");
        self.dispatch(Event::Failed { attempt, error });
    }
}
