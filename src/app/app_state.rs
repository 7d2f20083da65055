use std::time::{Duration, Instant};

use super::actions::ActionMap;
use super::lookup_screen::LookupScreen;
use super::table_screen::TableScreen;
use crate::config::Config;
use crate::notification::NotificationState;

pub enum Screen {
    Lookup(LookupScreen),
    Table(TableScreen),
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Lookup(screen) => screen.title(),
            Screen::Table(screen) => screen.collection.kind().title(),
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub notification: NotificationState,
    /// Click targets from the last render
    pub actions: ActionMap,
    pub should_quit: bool,
}

impl App {
    pub fn new(screen: Screen, config: &Config) -> Self {
        Self {
            screen,
            notification: NotificationState::new(config.notification.dismiss_ms),
            actions: ActionMap::new(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance timers and apply finished lookups
    ///
    /// Returns true if anything on screen changed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        let expired = self.notification.clear_if_expired_at(now);
        let changed = match &mut self.screen {
            Screen::Lookup(screen) => screen.tick_at(now),
            Screen::Table(screen) => screen.tick_at(now),
        };
        expired || changed
    }

    /// How long the event loop may block before the next timer is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        const IDLE: Duration = Duration::from_millis(50);

        let next_fire = match &self.screen {
            Screen::Lookup(LookupScreen::Register(s)) => {
                s.username.pipeline.debouncer().time_until_fire(now)
            }
            Screen::Lookup(LookupScreen::Products(pane)) => {
                pane.pipeline.debouncer().time_until_fire(now)
            }
            Screen::Lookup(LookupScreen::Weather(_)) => None,
            Screen::Table(screen) => screen
                .search
                .as_ref()
                .and_then(|s| s.debouncer.time_until_fire(now)),
        };
        next_fire.map_or(IDLE, |remaining| remaining.min(IDLE))
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
