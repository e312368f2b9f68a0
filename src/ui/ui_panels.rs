use {
    crate::{
        app::Selection,
        config::{HORIZON_YEARS, PLOT_CONFIG},
        domain::CoinListing,
        ui::{UI_TEXT, styles::UiStyleExt},
    },
    eframe::egui::{Button, ComboBox, RichText, Slider, Spinner, Ui},
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// What the top panel asks the app to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsAction {
    None,
    SelectionChanged,
    Reload,
}

/// Coin dropdown, horizon slider, reload button and the loading status.
pub(crate) fn render_controls(
    ui: &mut Ui,
    listing: &CoinListing,
    selection: &mut Selection,
    busy: bool,
) -> ControlsAction {
    let mut action = ControlsAction::None;

    ui.horizontal(|ui| {
        ui.heading(
            RichText::new(&UI_TEXT.app_title)
                .strong()
                .color(PLOT_CONFIG.color_warning),
        );
        ui.separator();

        ui.label(&UI_TEXT.label_select_coin);
        let current = selection
            .coin
            .as_ref()
            .map(|c| format!("{} ({})", c.name, c.symbol))
            .unwrap_or_default();
        ComboBox::from_id_salt("coin_select")
            .selected_text(current)
            .width(220.0)
            .height(400.0)
            .show_ui(ui, |ui| {
                for (name, symbol) in listing.iter() {
                    let is_selected = selection.coin.as_ref().is_some_and(|c| c.name == name);
                    if ui
                        .selectable_label(is_selected, format!("{} ({})", name, symbol))
                        .clicked()
                        && !is_selected
                    {
                        selection.coin = listing.get(name);
                        action = ControlsAction::SelectionChanged;
                    }
                }
            });

        ui.separator();
        ui.label(&UI_TEXT.label_years);
        let response = ui.add(Slider::new(&mut selection.years, HORIZON_YEARS));
        // Refit once the handle is released, not on every drag step.
        if response.drag_stopped() || (response.changed() && !response.dragged()) {
            action = ControlsAction::SelectionChanged;
        }

        ui.separator();
        if ui
            .add_enabled(!busy, Button::new(UI_TEXT.button_reload.as_str()))
            .on_hover_text(&UI_TEXT.tooltip_reload)
            .clicked()
        {
            action = ControlsAction::Reload;
        }

        ui.separator();
        if busy {
            ui.add(Spinner::new());
            ui.label_subdued(&UI_TEXT.label_loading_data);
        } else {
            ui.label_subdued(&UI_TEXT.label_loading_done);
        }
    });

    #[cfg(debug_assertions)]
    if DF.log_selection && action != ControlsAction::None {
        log::info!("Controls action: {:?}", action);
    }

    action
}
