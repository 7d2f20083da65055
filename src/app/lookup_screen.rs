//! Screens driven by a debounced lookup

use ratatui::crossterm::event::KeyEvent;

use super::input_field::InputField;
use crate::lookup::WeatherReport;
use crate::pipeline::{Display, Outcome, QueryPipeline};
use crate::records::Record;

/// An input box feeding a query pipeline
pub struct LookupPane<H> {
    pub input: InputField,
    pub pipeline: QueryPipeline<H>,
}

impl<H: Send + 'static> LookupPane<H> {
    pub fn new(label: &str, pipeline: QueryPipeline<H>) -> Self {
        Self {
            input: InputField::new(label),
            pipeline,
        }
    }

    /// Edit the input and restart the countdown if the text changed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let changed = self.input.handle_key(key);
        if changed {
            self.pipeline.on_input(self.input.value());
        }
        changed
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.pipeline.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFocus {
    Username,
    Email,
}

/// Registration form gated on username availability
pub struct RegisterScreen {
    pub username: LookupPane<()>,
    pub email: InputField,
    pub focus: RegisterFocus,
}

/// Why a registration was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterRefusal {
    UsernameUnavailable,
    InvalidEmail,
}

impl RegisterScreen {
    pub fn new(pipeline: QueryPipeline<()>) -> Self {
        Self {
            username: LookupPane::new("Username", pipeline),
            email: InputField::new("Email"),
            focus: RegisterFocus::Username,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            RegisterFocus::Username => RegisterFocus::Email,
            RegisterFocus::Email => RegisterFocus::Username,
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.focus {
            RegisterFocus::Username => self.username.handle_key(key),
            RegisterFocus::Email => self.email.handle_key(key),
        }
    }

    /// Status line under the username box
    pub fn status(&self) -> Option<(&'static str, bool)> {
        match self.username.pipeline.display() {
            Display::Empty => None,
            Display::Loading { .. } => Some(("Checking availability...", true)),
            Display::Settled(result) => Some(match result.outcome {
                Outcome::Match(()) => ("Username available!", true),
                Outcome::NoMatch => ("Username already taken", false),
                Outcome::Error(_) => ("Error checking availability", false),
            }),
        }
    }

    /// Register the current username and email, resetting the form
    pub fn submit(&mut self) -> Result<String, RegisterRefusal> {
        if !self.username.pipeline.submit_enabled() {
            return Err(RegisterRefusal::UsernameUnavailable);
        }
        let email = self.email.value().trim().to_string();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(RegisterRefusal::InvalidEmail);
        }

        let message = format!(
            "Registration successful! Username: {}, Email: {}",
            self.username.pipeline.live_query(),
            email
        );
        self.username.clear();
        self.email.clear();
        self.focus = RegisterFocus::Username;
        Ok(message)
    }
}

/// Why a weather search did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherRefusal {
    BlankCity,
    Busy,
}

/// City search, triggered explicitly rather than on every keystroke
pub struct WeatherScreen {
    pub city: LookupPane<WeatherReport>,
    pub last_city: Option<String>,
}

impl WeatherScreen {
    pub fn new(pipeline: QueryPipeline<WeatherReport>) -> Self {
        Self {
            city: LookupPane::new("City", pipeline),
            last_city: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let changed = self.city.input.handle_key(key);
        if changed {
            self.city.pipeline.note_input(self.city.input.value());
        }
        changed
    }

    /// Look up the typed city now
    pub fn search(&mut self) -> Result<(), WeatherRefusal> {
        if !self.city.pipeline.submit_enabled() {
            return Err(WeatherRefusal::Busy);
        }
        let city = self.city.input.value().trim().to_string();
        if city.is_empty() {
            return Err(WeatherRefusal::BlankCity);
        }
        self.city.pipeline.submit_now(&city);
        Ok(())
    }

    /// Bookkeeping after a new result was applied
    pub fn on_settled(&mut self) {
        if let Display::Settled(result) = self.city.pipeline.display()
            && let Outcome::Match(report) = &result.outcome
        {
            self.last_city = Some(report.city.clone());
            self.city.input.clear();
        }
    }
}

pub enum LookupScreen {
    Register(RegisterScreen),
    Products(LookupPane<Vec<Record>>),
    Weather(WeatherScreen),
}

impl LookupScreen {
    pub fn title(&self) -> &'static str {
        match self {
            LookupScreen::Register(_) => "Register",
            LookupScreen::Products(_) => "Product Search",
            LookupScreen::Weather(_) => "Weather",
        }
    }

    /// Advance countdowns and apply finished lookups; true if anything changed
    pub fn tick_at(&mut self, now: std::time::Instant) -> bool {
        match self {
            LookupScreen::Register(screen) => {
                let pipeline = &mut screen.username.pipeline;
                pipeline.tick_at(now) | pipeline.poll_response()
            }
            LookupScreen::Products(pane) => pane.pipeline.tick_at(now) | pane.pipeline.poll_response(),
            LookupScreen::Weather(screen) => {
                let changed = screen.city.pipeline.poll_response();
                if changed {
                    screen.on_settled();
                }
                changed
            }
        }
    }
}

#[cfg(test)]
#[path = "lookup_screen_tests.rs"]
mod lookup_screen_tests;
