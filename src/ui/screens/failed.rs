use {
    crate::{config::PLOT_CONFIG, ui::UI_TEXT},
    eframe::egui::{RichText, Ui},
};

/// Error screen with a retry button. Returns true when retry was clicked.
pub(crate) fn render_failed(ui: &mut Ui, title: &str, message: &str) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.heading(
            RichText::new(title)
                .size(22.0)
                .strong()
                .color(PLOT_CONFIG.color_loss),
        );
        ui.add_space(10.0);
        ui.label(RichText::new(message).color(PLOT_CONFIG.color_text_neutral));
        ui.add_space(20.0);
        retry = ui.button(UI_TEXT.button_retry.as_str()).clicked();
    });
    retry
}
