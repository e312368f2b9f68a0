use eframe::egui::Context;

use crate::app::state::AppState;
use crate::app::App;

/// One screen of the app. `tick` draws it and returns the state for the next frame.
pub(crate) trait PhaseView {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState;
}
