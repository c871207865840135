use thiserror::Error;

/// Non-200 responses from the weather provider, keyed by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("missing parameter in request (400)")]
    MissingParameter,

    #[error("invalid or unauthorized API key (401)")]
    Unauthorized,

    #[error("zip code or city not found (404)")]
    NotFound,

    #[error("API call quota exceeded (429)")]
    RateLimited,

    #[error("provider-side error ({0})")]
    Server(u16),

    #[error("unexpected response status ({0})")]
    Unexpected(u16),
}

impl ApiError {
    /// Actionable text for the user; none of these are retried automatically.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingParameter => {
                "Request was missing a parameter. Please re-check your zip code or city name."
                    .to_string()
            }
            ApiError::Unauthorized => {
                "Your API key is invalid or not yet activated. Please check it in Settings."
                    .to_string()
            }
            ApiError::NotFound => {
                "Zip code or city not found. Please check your zip code or city name.".to_string()
            }
            ApiError::RateLimited => {
                "You have exceeded the API call limit for your key. Please wait and try again."
                    .to_string()
            }
            ApiError::Server(status) => format!(
                "OpenWeatherMap is having problems (status {status}). Please try again later."
            ),
            ApiError::Unexpected(status) => {
                format!("Unexpected response from OpenWeatherMap (status {status}).")
            }
        }
    }
}

/// Map an HTTP status to success or a fixed diagnostic.
pub fn interpret_status(status: u16) -> Result<(), ApiError> {
    match status {
        200 => Ok(()),
        400 => Err(ApiError::MissingParameter),
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        429 => Err(ApiError::RateLimited),
        s if s >= 500 => Err(ApiError::Server(s)),
        s => Err(ApiError::Unexpected(s)),
    }
}

/// Everything that can end a weather action early.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather API error: {0}")]
    Api(#[from] ApiError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode weather response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("no {0} configured")]
    NotConfigured(&'static str),

    #[error("input failed: {0}")]
    Input(#[from] std::io::Error),

    #[error("input interrupted")]
    Interrupted,

    #[error("nothing to choose from")]
    NoChoices,
}

impl WeatherError {
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Api(e) => e.user_message(),
            WeatherError::Http(e) if e.is_timeout() => {
                "The weather service did not respond in time. Please try again.".to_string()
            }
            WeatherError::Http(_) => {
                "Could not reach the weather service. Please check your connection.".to_string()
            }
            WeatherError::Decode(_) | WeatherError::MissingField(_) => {
                format!("The weather service sent incomplete data: {self}.")
            }
            WeatherError::NotConfigured(what) => format!(
                "No {what} configured.\n\
                 Hint: open Settings from the main menu and enter your {what}."
            ),
            WeatherError::Input(_) | WeatherError::Interrupted | WeatherError::NoChoices => {
                self.to_string()
            }
        }
    }
}
