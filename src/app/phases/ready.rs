use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::{AppState, ReadyState}};

impl PhaseView for ReadyState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_ready_state(ctx)
    }
}
