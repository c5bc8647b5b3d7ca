//! App shell: the three screens, session event processing, and the
//! forecast fetch trigger.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{sanitize_zip_input, ZipCode, ZIP_LEN};
use shared::protocol::{CredentialsRequest, Forecast};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{Flow, Screen, WeatherState};

/// Backend caps credential fields at 100 characters.
const CREDENTIAL_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Register => "Create account",
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Register => "Register",
        }
    }

    fn toggle_label(self) -> &'static str {
        match self {
            Self::Login => "Need an account? Register",
            Self::Register => "Already have an account? Log in",
        }
    }
}

struct AuthForm {
    mode: AuthMode,
    username: String,
    password: String,
    error: Option<String>,
    submitting: bool,
    focus_username: bool,
}

impl AuthForm {
    fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            username: String::new(),
            password: String::new(),
            error: None,
            submitting: false,
            focus_username: true,
        }
    }

    /// One-shot: true on the first frame after the form appears or the mode
    /// flips, so focus lands on the username field without flickering.
    fn take_focus_username(&mut self) -> bool {
        std::mem::take(&mut self.focus_username)
    }
}

struct ZipForm {
    input: String,
    error: Option<String>,
    submitting: bool,
}

impl ZipForm {
    fn with_initial(initial: &str) -> Self {
        Self {
            input: initial.to_string(),
            error: None,
            submitting: false,
        }
    }
}

pub struct ZipcastApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    flow: Flow,
    weather: WeatherState,
    auth_form: AuthForm,
    zip_form: ZipForm,
    status: String,
}

impl ZipcastApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            flow: Flow::default(),
            weather: WeatherState::default(),
            auth_form: AuthForm::new(),
            zip_form: ZipForm::with_initial(""),
            status: "Not signed in".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::AuthOk { user_id, zip } => {
                    self.auth_form.submitting = false;
                    self.auth_form.error = None;
                    self.auth_form.password.clear();
                    self.flow.on_auth_success(user_id, zip);
                    self.zip_form = ZipForm::with_initial(self.flow.zip_form_initial());
                    self.status = "Signed in".to_string();
                }
                UiEvent::ZipSaved { zip } => {
                    self.zip_form.submitting = false;
                    self.zip_form.error = None;
                    self.flow.on_zip_saved(zip);
                    // Stale forecast belongs to the previous zip.
                    self.weather.invalidate();
                }
                UiEvent::ForecastLoaded(forecast) => {
                    self.weather.finish(forecast);
                }
                UiEvent::Failure(err) => match err.context() {
                    UiErrorContext::Register | UiErrorContext::Login => {
                        self.auth_form.submitting = false;
                        self.auth_form.error = Some(err.message().to_string());
                    }
                    UiErrorContext::SaveZip => {
                        self.zip_form.submitting = false;
                        self.zip_form.error = Some(err.message().to_string());
                    }
                    UiErrorContext::Forecast => {
                        self.weather.fail(err.message().to_string());
                    }
                    UiErrorContext::BackendStartup => {
                        self.status = err.message().to_string();
                    }
                },
            }
        }
    }

    /// Fires the forecast request when the weather screen is visible, the
    /// zip is known, and the fetch guard says one is due.
    fn maybe_fetch_forecast(&mut self) {
        if self.flow.screen != Screen::Weather {
            return;
        }
        let Some(zip) = self.flow.session.zip.clone() else {
            return;
        };
        if !self.weather.needs_fetch() {
            return;
        }
        self.weather.begin_fetch();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchForecast { zip },
            &mut self.status,
        );
    }

    fn toggle_auth_mode(&mut self) {
        self.auth_form.mode = self.auth_form.mode.toggled();
        self.auth_form.error = None;
        self.auth_form.focus_username = true;
    }

    fn submit_auth(&mut self) {
        if self.auth_form.submitting {
            return;
        }
        self.auth_form.error = None;
        if self.auth_form.username.trim().is_empty() || self.auth_form.password.is_empty() {
            self.auth_form.error = Some("Username and password are required".to_string());
            return;
        }
        let credentials = CredentialsRequest {
            username: self.auth_form.username.clone(),
            password: self.auth_form.password.clone(),
        };
        let cmd = match self.auth_form.mode {
            AuthMode::Register => BackendCommand::Register { credentials },
            AuthMode::Login => BackendCommand::Login { credentials },
        };
        self.auth_form.submitting = true;
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn submit_zip(&mut self) {
        if self.zip_form.submitting {
            return;
        }
        self.zip_form.error = None;
        let zip = match ZipCode::parse(&self.zip_form.input) {
            Ok(zip) => zip,
            Err(err) => {
                // Local validation failure: no request goes out.
                self.zip_form.error = Some(err.to_string());
                return;
            }
        };
        let Some(user_id) = self.flow.session.user_id.clone() else {
            return;
        };
        let mode = match self.flow.screen {
            Screen::Zip { updating: true } => client_core::ZipSaveMode::Update,
            _ => client_core::ZipSaveMode::Create,
        };
        self.zip_form.submitting = true;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SaveZip { user_id, zip, mode },
            &mut self.status,
        );
    }

    fn on_change_location(&mut self) {
        self.flow.request_zip_change();
        self.zip_form = ZipForm::with_initial(self.flow.zip_form_initial());
    }

    // ---------- rendering ----------

    fn show_auth_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            screen_card(ui, |ui| {
                ui.heading(self.auth_form.mode.heading());
                ui.add_space(8.0);

                let user_resp = form_text_field(
                    ui,
                    "auth_username",
                    "Username",
                    "alice",
                    &mut self.auth_form.username,
                    CREDENTIAL_LIMIT,
                    false,
                );
                if self.auth_form.take_focus_username() {
                    user_resp.request_focus();
                }
                ui.add_space(6.0);
                let pass_resp = form_text_field(
                    ui,
                    "auth_password",
                    "Password",
                    "",
                    &mut self.auth_form.password,
                    CREDENTIAL_LIMIT,
                    true,
                );

                if let Some(error) = &self.auth_form.error {
                    ui.add_space(6.0);
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }

                ui.add_space(10.0);
                let submit_clicked = ui
                    .add_enabled(
                        !self.auth_form.submitting,
                        egui::Button::new(self.auth_form.mode.submit_label()),
                    )
                    .clicked();
                let enter_pressed = (user_resp.lost_focus() || pass_resp.lost_focus())
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if submit_clicked || enter_pressed {
                    self.submit_auth();
                }

                ui.add_space(4.0);
                if ui.link(self.auth_form.mode.toggle_label()).clicked() {
                    self.toggle_auth_mode();
                }
            });
        });
    }

    fn show_zip_screen(&mut self, ctx: &egui::Context, updating: bool) {
        egui::CentralPanel::default().show(ctx, |ui| {
            screen_card(ui, |ui| {
                ui.heading(if updating {
                    "Update your zip code"
                } else {
                    "Enter your zip code"
                });
                ui.add_space(8.0);

                let response = form_text_field(
                    ui,
                    "zip_input",
                    "Zip code",
                    "12345",
                    &mut self.zip_form.input,
                    ZIP_LEN,
                    false,
                );
                if response.changed() {
                    self.zip_form.input = sanitize_zip_input(&self.zip_form.input);
                }

                if let Some(error) = &self.zip_form.error {
                    ui.add_space(6.0);
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }

                ui.add_space(10.0);
                let label = if self.zip_form.submitting {
                    "Saving..."
                } else {
                    "Submit"
                };
                let submit_clicked = ui
                    .add_enabled(!self.zip_form.submitting, egui::Button::new(label))
                    .clicked();
                let enter_pressed = response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if submit_clicked || enter_pressed {
                    self.submit_zip();
                }
            });
        });
    }

    fn show_weather_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            screen_card(ui, |ui| {
                if self.weather.loading && self.weather.forecast.is_none() {
                    ui.label("Loading weather...");
                }
                if let Some(error) = &self.weather.error {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }
                if let Some(forecast) = &self.weather.forecast {
                    ui.heading(weather_heading(forecast));
                    ui.add_space(6.0);
                    ui.label(&forecast.summary);
                    ui.add_space(4.0);
                    ui.label(format!("High: {}", format_temperature(forecast.high)));
                    ui.label(format!("Low: {}", format_temperature(forecast.low)));
                }

                ui.add_space(12.0);
                if ui.button("Change Location").clicked() {
                    self.on_change_location();
                }
            });
        });
    }

    fn show_status_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.weak(&self.status);
        });
    }
}

impl eframe::App for ZipcastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.maybe_fetch_forecast();

        self.show_status_footer(ctx);
        match self.flow.screen {
            Screen::Auth => self.show_auth_screen(ctx),
            Screen::Zip { updating } => self.show_zip_screen(ctx, updating),
            Screen::Weather => self.show_weather_screen(ctx),
        }

        // Channel events arrive off-frame; poll at a steady cadence.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

fn weather_heading(forecast: &Forecast) -> String {
    format!("Today's weather in {}", forecast.location)
}

/// Whole-degree values render without a fraction (75.0 -> "75°F").
fn format_temperature(value: f64) -> String {
    format!("{value}°F")
}

fn screen_card(ui: &mut egui::Ui, add: impl FnOnce(&mut egui::Ui)) {
    let avail = ui.available_size();
    let card_width = avail.x.clamp(320.0, 460.0);
    let top_space = (avail.y * 0.12).clamp(18.0, 90.0);

    ui.add_space(top_space);
    ui.vertical_centered(|ui| {
        ui.set_width(card_width);
        egui::Frame::NONE
            .fill(ui.visuals().panel_fill)
            .corner_radius(14.0)
            .stroke(egui::Stroke::new(
                1.0,
                ui.visuals().widgets.noninteractive.bg_stroke.color,
            ))
            .inner_margin(egui::Margin::symmetric(20, 18))
            .show(ui, |ui| {
                ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                add(ui);
            });
    });
}

fn form_text_field(
    ui: &mut egui::Ui,
    id: &'static str,
    label: &str,
    hint: &str,
    value: &mut String,
    char_limit: usize,
    password: bool,
) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(id)
        .hint_text(hint)
        .desired_width(f32::INFINITY)
        .char_limit(char_limit)
        .password(password);
    ui.add_sized([ui.available_width(), 34.0], edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::UserId;

    fn test_app() -> (
        ZipcastApp,
        Receiver<BackendCommand>,
        Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        (ZipcastApp::new(cmd_tx, ui_rx), cmd_rx, ui_tx)
    }

    fn signed_in_without_zip(app: &mut ZipcastApp) {
        app.flow
            .on_auth_success(UserId("u1".to_string()), None);
        app.zip_form = ZipForm::with_initial(app.flow.zip_form_initial());
    }

    fn zip(s: &str) -> ZipCode {
        ZipCode::parse(s).expect("valid zip")
    }

    #[test]
    fn malformed_zip_is_rejected_locally_without_network_call() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        signed_in_without_zip(&mut app);

        app.zip_form.input = "1234".to_string();
        app.submit_zip();

        assert_eq!(
            app.zip_form.error.as_deref(),
            Some("Zip must be exactly 5 numbers")
        );
        assert!(!app.zip_form.submitting);
        assert!(cmd_rx.try_recv().is_err(), "no request may be sent");
    }

    #[test]
    fn first_time_zip_submit_uses_create_mode() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        signed_in_without_zip(&mut app);

        app.zip_form.input = "12345".to_string();
        app.submit_zip();

        assert!(app.zip_form.submitting);
        match cmd_rx.try_recv().expect("command queued") {
            BackendCommand::SaveZip { user_id, zip, mode } => {
                assert_eq!(user_id, UserId("u1".to_string()));
                assert_eq!(zip.as_str(), "12345");
                assert_eq!(mode, client_core::ZipSaveMode::Create);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn change_location_prefills_zip_and_submits_update() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        app.flow
            .on_auth_success(UserId("u1".to_string()), Some(zip("90210")));

        app.on_change_location();
        assert_eq!(app.flow.screen, Screen::Zip { updating: true });
        assert_eq!(app.zip_form.input, "90210");

        app.zip_form.input = "10001".to_string();
        app.submit_zip();
        match cmd_rx.try_recv().expect("command queued") {
            BackendCommand::SaveZip { mode, .. } => {
                assert_eq!(mode, client_core::ZipSaveMode::Update);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn auth_submit_requires_non_empty_fields() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        app.auth_form.username = "  ".to_string();
        app.auth_form.password = String::new();

        app.submit_auth();

        assert!(app.auth_form.error.is_some());
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn auth_submit_is_single_flight() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        app.auth_form.mode = AuthMode::Register;
        app.auth_form.username = "alice".to_string();
        app.auth_form.password = "pw123456".to_string();

        app.submit_auth();
        app.submit_auth();

        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::Register { .. })
        ));
        assert!(cmd_rx.try_recv().is_err(), "second submit must be ignored");
    }

    #[test]
    fn mode_toggle_clears_error() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.auth_form.error = Some("Login failed".to_string());
        app.toggle_auth_mode();
        assert_eq!(app.auth_form.mode, AuthMode::Register);
        assert!(app.auth_form.error.is_none());
    }

    #[test]
    fn username_focus_fires_once_and_rearms_on_mode_toggle() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        assert!(app.auth_form.take_focus_username());
        assert!(!app.auth_form.take_focus_username(), "focus is one-shot");

        app.toggle_auth_mode();
        assert!(app.auth_form.take_focus_username());
        assert!(!app.auth_form.take_focus_username());
    }

    #[test]
    fn login_with_stored_zip_goes_straight_to_weather_fetch() {
        let (mut app, cmd_rx, ui_tx) = test_app();
        ui_tx
            .send(UiEvent::AuthOk {
                user_id: UserId("u2".to_string()),
                zip: Some(zip("90210")),
            })
            .expect("send event");

        app.process_ui_events();
        assert_eq!(app.flow.screen, Screen::Weather);

        app.maybe_fetch_forecast();
        match cmd_rx.try_recv().expect("fetch queued") {
            BackendCommand::FetchForecast { zip } => assert_eq!(zip.as_str(), "90210"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn login_without_zip_routes_to_zip_screen() {
        let (mut app, cmd_rx, ui_tx) = test_app();
        ui_tx
            .send(UiEvent::AuthOk {
                user_id: UserId("u3".to_string()),
                zip: None,
            })
            .expect("send event");

        app.process_ui_events();
        assert_eq!(app.flow.screen, Screen::Zip { updating: false });
        assert_eq!(app.zip_form.input, "");

        app.maybe_fetch_forecast();
        assert!(cmd_rx.try_recv().is_err(), "no fetch without a zip");
    }

    #[test]
    fn forecast_fetch_fires_once_per_zip() {
        let (mut app, cmd_rx, ui_tx) = test_app();
        app.flow
            .on_auth_success(UserId("u1".to_string()), Some(zip("90210")));

        app.maybe_fetch_forecast();
        app.maybe_fetch_forecast();
        assert!(cmd_rx.try_recv().is_ok());
        assert!(cmd_rx.try_recv().is_err(), "one fetch per zip");

        // Saving a new zip invalidates the held forecast and re-arms.
        ui_tx
            .send(UiEvent::ZipSaved { zip: zip("10001") })
            .expect("send event");
        app.process_ui_events();
        app.maybe_fetch_forecast();
        match cmd_rx.try_recv().expect("fetch for new zip") {
            BackendCommand::FetchForecast { zip } => assert_eq!(zip.as_str(), "10001"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn renders_whole_degree_fahrenheit() {
        assert_eq!(format_temperature(75.0), "75°F");
        assert_eq!(format_temperature(58.0), "58°F");
        assert_eq!(format_temperature(72.5), "72.5°F");
    }

    #[test]
    fn weather_heading_names_the_location() {
        let forecast = Forecast {
            location: "Beverly Hills".to_string(),
            high: 75.0,
            low: 58.0,
            summary: "Sunny".to_string(),
        };
        assert_eq!(weather_heading(&forecast), "Today's weather in Beverly Hills");
    }
}
