//! One async function per user action. Each issues a single request, then
//! updates `UiState` or schedules navigation; no error leaves an action.

use crate::api::ApiClient;
use crate::config::{ClientConfig, Delays};
use crate::errors::ApiError;
use crate::forms::{credentials, profile_payload};
use crate::state::{BannerKind, GENERATE_LABEL, GENERATING_LABEL, Route, Sender, UiState};
use crate::storage::{LocalStorage, USER_ID_KEY};
use crate::ui::{
    NO_DIET_PLAN, NO_WORKOUT_PLAN, render_adapted_exercises, render_diet_plan, render_pain_alert,
    render_profile_summary, render_workout_plan,
};
use chrono::Local;
use tracing::{error, info, warn};

pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";
pub const NO_SESSION: &str = "No active session. Please login again.";
pub const CHAT_FAILED: &str = "Sorry, I encountered an error. Please try again.";
pub const CHAT_NETWORK_FAILED: &str = "Network error. Please check your connection.";

pub struct App {
    api: ApiClient,
    storage: LocalStorage,
    delays: Delays,
}

impl App {
    pub fn new(api: ApiClient, storage: LocalStorage, delays: Delays) -> Self {
        Self {
            api,
            storage,
            delays,
        }
    }

    pub async fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(config.base_url.clone())?;
        let storage = match &config.storage_path {
            Some(path) => LocalStorage::open(path.clone()).await,
            None => LocalStorage::in_memory(),
        };
        Ok(Self::new(api, storage, config.delays))
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn delays(&self) -> &Delays {
        &self.delays
    }

    pub async fn register(&self, ui: &mut UiState) {
        let credentials = credentials(&ui.form);

        match self.api.register(&credentials).await {
            Ok(_) => {
                info!("registration accepted");
                self.success(ui, "Registration successful! Redirecting to login...");
                ui.navigate_after(Local::now(), Route::Login, self.delays.registered);
            }
            Err(err) => self.fail(ui, &err, "Registration failed"),
        }
    }

    pub async fn login(&mut self, ui: &mut UiState) {
        let credentials = credentials(&ui.form);

        match self.api.login(&credentials).await {
            Ok(response) => {
                info!(user_id = response.user.id, "logged in");
                self.success(ui, "Login successful! Redirecting...");
                self.storage
                    .set_item(USER_ID_KEY, response.user.id.to_string())
                    .await;
                ui.navigate_after(Local::now(), Route::Dashboard, self.delays.logged_in);
            }
            Err(err) => self.fail(ui, &err, "Login failed"),
        }
    }

    pub async fn save_profile(&self, ui: &mut UiState) {
        let Some(user_id) = self.require_session(ui) else {
            return;
        };
        let payload = profile_payload(user_id, &ui.form);

        match self.api.save_profile(&payload).await {
            Ok(_) => {
                info!(user_id, "profile saved");
                self.success(ui, "Profile saved! Redirecting to dashboard...");
                ui.navigate_after(Local::now(), Route::Dashboard, self.delays.profile_saved);
            }
            Err(err) if err.is_unauthorized() => self.expire_later(ui),
            Err(err) => self.fail(ui, &err, "Failed to save profile"),
        }
    }

    /// Loads the profile summary, then today's plan.
    pub async fn init_dashboard(&self, ui: &mut UiState) {
        let Some(user_id) = self.require_session(ui) else {
            return;
        };

        match self.api.profile(user_id).await {
            Ok(response) => {
                if let Some(profile) = &response.profile {
                    ui.profile_info = render_profile_summary(profile);
                }
            }
            Err(err) if err.is_unauthorized() => {
                ui.navigate_now(Route::Login);
                return;
            }
            Err(err) if err.is_not_found() => {
                self.error(ui, "Please create your profile first");
                ui.navigate_after(Local::now(), Route::Profile, self.delays.missing_profile);
                return;
            }
            Err(ApiError::Transport(detail)) => {
                error!("dashboard init error: {detail}");
                self.error(ui, "Failed to load dashboard. Please try again.");
                return;
            }
            Err(err) => warn!("profile lookup failed: {err}"),
        }

        self.load_today_plan(ui).await;
    }

    pub async fn generate_plans(&self, ui: &mut UiState) {
        ui.generate_button.disabled = true;
        ui.generate_button.label = GENERATING_LABEL.to_string();

        let outcome = self.api.generate_plan().await;
        ui.generate_button.disabled = false;
        ui.generate_button.label = GENERATE_LABEL.to_string();

        match outcome {
            Ok(_) => {
                info!("plans generated");
                self.success(ui, "Plans generated successfully!");
                self.load_today_plan(ui).await;
            }
            Err(err) if err.is_unauthorized() => self.expire_later(ui),
            Err(err) => self.fail(ui, &err, "Failed to generate plans"),
        }
    }

    pub async fn load_today_plan(&self, ui: &mut UiState) {
        match self.api.today_plan().await {
            Ok(response) if response.success => {
                if let Some(diet) = &response.diet_plan {
                    ui.diet_plan = render_diet_plan(diet);
                }
                if let Some(workout) = &response.workout_plan {
                    ui.workout_plan = render_workout_plan(workout);
                }
            }
            Err(err) if err.is_unauthorized() => ui.navigate_now(Route::Login),
            Err(ApiError::Transport(detail)) => error!("error loading plan: {detail}"),
            _ => {
                ui.diet_plan = NO_DIET_PLAN.to_string();
                ui.workout_plan = NO_WORKOUT_PLAN.to_string();
            }
        }
    }

    pub async fn adapt_workout(&self, ui: &mut UiState) {
        let pain_text = ui.form.value("painText").to_string();
        if pain_text.trim().is_empty() {
            self.error(ui, "Please describe your pain");
            return;
        }

        match self.api.adaptive_workout(&pain_text).await {
            Ok(adaptation) => {
                info!(
                    body_part = adaptation.affected_body_part.as_deref().unwrap_or("unknown"),
                    "workout adapted"
                );
                ui.pain_result_visible = true;
                ui.pain_alert = render_pain_alert(&adaptation);
                ui.adapted_exercises = render_adapted_exercises(&adaptation.modified_workout);
                self.load_today_plan(ui).await;
                ui.form.clear("painText");
            }
            Err(err) if err.is_unauthorized() => ui.navigate_now(Route::Login),
            Err(err) => self.fail(ui, &err, "Failed to adapt workout"),
        }
    }

    pub async fn send_chat_message(&self, ui: &mut UiState) {
        let message = ui.form.value("chatInput").trim().to_string();
        if message.is_empty() {
            return;
        }

        ui.chat.push(Sender::User, message.clone());
        ui.form.clear("chatInput");

        let typing = ui.chat.show_typing();
        let result = self.api.chat_workout(&message, ui.chat.transcript()).await;
        ui.chat.remove_typing(typing);

        match result {
            Ok(reply) => {
                ui.chat.push(Sender::Bot, reply.response.clone());
                ui.chat.record_turn(message, reply.response);
                if reply.workout_modified {
                    info!("chat modified the workout, reloading plan");
                    self.load_today_plan(ui).await;
                }
            }
            Err(ApiError::Transport(detail)) => {
                warn!("chat request failed: {detail}");
                ui.chat.push(Sender::Bot, CHAT_NETWORK_FAILED);
            }
            Err(err) => {
                warn!("chat request rejected: {err}");
                ui.chat.push(Sender::Bot, CHAT_FAILED);
                if err.is_unauthorized() {
                    ui.navigate_now(Route::Login);
                }
            }
        }
    }

    /// Ends the session locally whatever the server answers.
    pub async fn logout(&mut self, ui: &mut UiState) {
        if let Err(err) = self.api.logout().await {
            error!("logout error: {err}");
        }
        self.storage.remove_item(USER_ID_KEY).await;
        ui.navigate_now(Route::Login);
    }

    fn require_session(&self, ui: &mut UiState) -> Option<i64> {
        let user_id = self.storage.user_id();
        if user_id.is_none() {
            warn!("no stored session id");
            self.error(ui, NO_SESSION);
            ui.navigate_after(Local::now(), Route::Login, self.delays.session_expired);
        }
        user_id
    }

    fn expire_later(&self, ui: &mut UiState) {
        warn!("session expired");
        self.error(ui, SESSION_EXPIRED);
        ui.navigate_after(Local::now(), Route::Login, self.delays.session_expired);
    }

    fn fail(&self, ui: &mut UiState, err: &ApiError, fallback: &str) {
        match err {
            ApiError::Transport(detail) => {
                warn!("request failed: {detail}");
                self.error(ui, format!("Network error: {detail}"));
            }
            _ => {
                warn!("request rejected: {err}");
                self.error(ui, err.message_or(fallback).to_string());
            }
        }
    }

    fn success(&self, ui: &mut UiState, text: impl Into<String>) {
        ui.show_message_at(Local::now(), text, BannerKind::Success, self.delays.banner);
    }

    fn error(&self, ui: &mut UiState, text: impl Into<String>) {
        ui.show_message_at(Local::now(), text, BannerKind::Error, self.delays.banner);
    }
}
