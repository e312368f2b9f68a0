use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::{AppState, FailedState}};

impl PhaseView for FailedState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_failed_state(ctx, self)
    }
}
