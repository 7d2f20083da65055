mod actions;
mod app_events;
mod app_render;
mod app_state;
mod form;
mod input_field;
mod launch;
mod lookup_render;
mod lookup_screen;
mod table_render;
mod table_screen;

pub use actions::{ActionMap, RowAction};
pub use app_state::{App, Screen};
pub use form::{FormKey, FormState};
pub use input_field::InputField;
pub use launch::{DEFAULT_DOCUMENT_DIR, ScreenKind, open_screen};
pub use lookup_screen::{
    LookupPane, LookupScreen, RegisterFocus, RegisterRefusal, RegisterScreen, WeatherRefusal,
    WeatherScreen,
};
pub use table_screen::{SearchBox, TableMode, TableScreen};
