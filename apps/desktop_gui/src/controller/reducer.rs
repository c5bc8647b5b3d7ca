//! Screen routing state machine and session state.
//!
//! Which screen is visible is a function of the session: no user id means
//! the auth screen, no zip (or an explicit change request) means the zip
//! screen, otherwise the weather screen. The machine cycles between zip and
//! weather for as long as the app runs.

use shared::{
    domain::{UserId, ZipCode},
    protocol::Forecast,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    /// `updating` distinguishes first-time entry (POST) from editing an
    /// existing zip (PUT) and pre-fills the form with the current value.
    Zip {
        updating: bool,
    },
    Weather,
}

#[derive(Debug, Default)]
pub struct Session {
    pub user_id: Option<UserId>,
    pub zip: Option<ZipCode>,
}

/// Session plus current screen, with one method per allowed transition.
#[derive(Debug)]
pub struct Flow {
    pub screen: Screen,
    pub session: Session,
}

impl Default for Flow {
    fn default() -> Self {
        Self {
            screen: Screen::Auth,
            session: Session::default(),
        }
    }
}

impl Flow {
    /// Auth success. The user id is set once and kept for the session's
    /// life. A login that carries a stored zip skips the zip screen and
    /// goes straight to weather; otherwise zip entry comes next.
    pub fn on_auth_success(&mut self, user_id: UserId, zip: Option<ZipCode>) {
        if self.session.user_id.is_none() {
            self.session.user_id = Some(user_id);
        }
        match zip {
            Some(zip) => {
                self.session.zip = Some(zip);
                self.screen = Screen::Weather;
            }
            None => self.screen = Screen::Zip { updating: false },
        }
    }

    pub fn on_zip_saved(&mut self, zip: ZipCode) {
        self.session.zip = Some(zip);
        self.screen = Screen::Weather;
    }

    /// "Change Location" from the weather screen.
    pub fn request_zip_change(&mut self) {
        if self.screen == Screen::Weather {
            self.screen = Screen::Zip { updating: true };
        }
    }

    /// Initial zip form contents for the current screen: the saved zip when
    /// editing, empty on first entry.
    pub fn zip_form_initial(&self) -> &str {
        match self.screen {
            Screen::Zip { updating: true } => {
                self.session.zip.as_ref().map(ZipCode::as_str).unwrap_or("")
            }
            _ => "",
        }
    }
}

/// Forecast data for the weather screen, plus the fetch guard.
#[derive(Debug, Default)]
pub struct WeatherState {
    pub forecast: Option<Forecast>,
    pub loading: bool,
    pub error: Option<String>,
}

impl WeatherState {
    /// A fetch is due only when nothing is held, nothing is in flight, and
    /// the last attempt did not fail. This keeps repeated frame evaluation
    /// from firing duplicate requests for the same zip, and keeps a failed
    /// fetch from retrying until the zip changes again.
    pub fn needs_fetch(&self) -> bool {
        self.forecast.is_none() && !self.loading && self.error.is_none()
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish(&mut self, forecast: Forecast) {
        self.forecast = Some(forecast);
        self.loading = false;
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    /// Drops the held forecast when the zip changes.
    pub fn invalidate(&mut self) {
        self.forecast = None;
        self.loading = false;
        self.error = None;
    }
}
