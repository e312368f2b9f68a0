use {
    crate::{
        config::PLOT_CONFIG,
        ui::UI_TEXT,
        utils::{AppInstant, format_duration},
    },
    eframe::egui::{RichText, Spinner, Ui},
};

pub(crate) fn render_loading(ui: &mut Ui, started: AppInstant) {
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.heading(
            RichText::new(&UI_TEXT.ls_title)
                .size(24.0)
                .strong()
                .color(PLOT_CONFIG.color_warning),
        );
        ui.add_space(20.0);
        ui.add(Spinner::new().size(32.0));
        ui.add_space(10.0);
        ui.label(
            RichText::new(&UI_TEXT.ls_fetching_coins)
                .italics()
                .color(PLOT_CONFIG.color_text_neutral),
        );
        ui.label(
            RichText::new(format_duration(started.elapsed().as_millis() as i64))
                .small()
                .color(PLOT_CONFIG.color_text_subdued),
        );
    });
}
