use crate::forms::FormFields;
use crate::models::ChatTurn;
use crate::ui::TYPING_INDICATOR;
use chrono::{DateTime, Duration, Local};

pub const GENERATE_LABEL: &str = "Generate New Plan";
pub const GENERATING_LABEL: &str = "Generating...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Profile,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login.html",
            Route::Dashboard => "/dashboard.html",
            Route::Profile => "/profile.html",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn css_class(self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub kind: BannerKind,
    pub shown_at: DateTime<Local>,
    pub hides_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Navigation {
    pub route: Route,
    pub due_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub disabled: bool,
    pub label: String,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            disabled: false,
            label: GENERATE_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
    Typing,
}

impl Sender {
    pub fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
            Sender::Typing => "bot typing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
}

/// Proof that a typing placeholder is on screen. Consumed on removal, so
/// each insertion is paired with exactly one removal.
#[must_use]
#[derive(Debug)]
pub struct TypingIndicator(());

/// Rendered chat bubbles plus the conversation sent back as context.
#[derive(Debug, Default)]
pub struct ChatView {
    entries: Vec<ChatEntry>,
    transcript: Vec<ChatTurn>,
}

impl ChatView {
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.entries.push(ChatEntry {
            sender,
            text: text.into(),
        });
    }

    pub fn show_typing(&mut self) -> TypingIndicator {
        self.entries.retain(|entry| entry.sender != Sender::Typing);
        self.push(Sender::Typing, TYPING_INDICATOR);
        TypingIndicator(())
    }

    pub fn remove_typing(&mut self, _indicator: TypingIndicator) {
        self.entries.retain(|entry| entry.sender != Sender::Typing);
    }

    pub fn is_typing(&self) -> bool {
        self.entries.iter().any(|entry| entry.sender == Sender::Typing)
    }

    pub fn record_turn(&mut self, user: String, bot: String) {
        self.transcript.push(ChatTurn { user, bot });
    }
}

/// Everything the page shows, owned in one place and handed to each action.
#[derive(Debug, Default)]
pub struct UiState {
    pub form: FormFields,
    pub banner: Option<Banner>,
    pub navigation: Option<Navigation>,
    pub location: Option<Route>,
    pub profile_info: String,
    pub diet_plan: String,
    pub workout_plan: String,
    pub pain_result_visible: bool,
    pub pain_alert: String,
    pub adapted_exercises: String,
    pub generate_button: ButtonState,
    pub profile_dropdown_open: bool,
    pub chat_open: bool,
    pub chat: ChatView,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: FormFields) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn show_message_at(
        &mut self,
        now: DateTime<Local>,
        text: impl Into<String>,
        kind: BannerKind,
        visible_for: std::time::Duration,
    ) {
        self.banner = Some(Banner {
            text: text.into(),
            kind,
            shown_at: now,
            hides_at: now + to_delta(visible_for),
        });
    }

    pub fn navigate_after(
        &mut self,
        now: DateTime<Local>,
        route: Route,
        delay: std::time::Duration,
    ) {
        self.navigation = Some(Navigation {
            route,
            due_at: now + to_delta(delay),
        });
    }

    pub fn navigate_now(&mut self, route: Route) {
        self.navigation = None;
        self.location = Some(route);
    }

    /// Runs the page timers up to `now`: hides an expired banner and performs
    /// a due navigation, returning where the page went.
    pub fn advance(&mut self, now: DateTime<Local>) -> Option<Route> {
        if self.banner.as_ref().is_some_and(|banner| now >= banner.hides_at) {
            self.banner = None;
        }

        match self.navigation {
            Some(navigation) if now >= navigation.due_at => {
                self.navigate_now(navigation.route);
                Some(navigation.route)
            }
            _ => None,
        }
    }

    pub fn toggle_profile_menu(&mut self) {
        self.profile_dropdown_open = !self.profile_dropdown_open;
    }

    /// A click anywhere outside the profile icon closes the dropdown.
    pub fn click_outside_profile_menu(&mut self) {
        self.profile_dropdown_open = false;
    }

    pub fn toggle_chat(&mut self) {
        self.chat_open = !self.chat_open;
    }
}

fn to_delta(duration: std::time::Duration) -> Duration {
    Duration::milliseconds(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[test]
    fn banner_hides_after_its_timeout() {
        let now = Local::now();
        let mut state = UiState::new();
        state.show_message_at(now, "Saved", BannerKind::Success, StdDuration::from_secs(5));

        state.advance(now + Duration::milliseconds(4999));
        assert!(state.banner.is_some());

        state.advance(now + Duration::seconds(5));
        assert!(state.banner.is_none());
    }

    #[test]
    fn navigation_fires_once_when_due() {
        let now = Local::now();
        let mut state = UiState::new();
        state.navigate_after(now, Route::Dashboard, StdDuration::from_millis(1500));

        assert_eq!(state.advance(now + Duration::milliseconds(1000)), None);
        assert_eq!(state.location, None);
        assert_eq!(
            state.advance(now + Duration::milliseconds(1500)),
            Some(Route::Dashboard)
        );
        assert_eq!(state.location, Some(Route::Dashboard));
        assert_eq!(state.navigation, None);
        assert_eq!(state.advance(now + Duration::seconds(10)), None);
    }

    #[test]
    fn banner_timer_is_independent_of_navigation() {
        let now = Local::now();
        let mut state = UiState::new();
        state.show_message_at(now, "Login successful!", BannerKind::Success, StdDuration::from_secs(5));
        state.navigate_after(now, Route::Dashboard, StdDuration::from_millis(1500));

        assert_eq!(
            state.advance(now + Duration::seconds(2)),
            Some(Route::Dashboard)
        );
        assert!(state.banner.is_some());
    }

    #[test]
    fn typing_indicator_is_single() {
        let mut chat = ChatView::default();
        chat.push(Sender::User, "hi");
        let first = chat.show_typing();
        chat.remove_typing(first);
        let second = chat.show_typing();
        assert_eq!(
            chat.entries()
                .iter()
                .filter(|entry| entry.sender == Sender::Typing)
                .count(),
            1
        );
        chat.remove_typing(second);
        assert!(!chat.is_typing());
        assert_eq!(chat.entries().len(), 1);
    }

    #[test]
    fn toggles_flip_and_outside_click_closes() {
        let mut state = UiState::new();
        state.toggle_profile_menu();
        assert!(state.profile_dropdown_open);
        state.click_outside_profile_menu();
        assert!(!state.profile_dropdown_open);
        state.toggle_chat();
        assert!(state.chat_open);
        state.toggle_chat();
        assert!(!state.chat_open);
    }
}
