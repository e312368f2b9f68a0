mod plot_layers;
mod screens;
mod styles;
mod ui_config;
mod ui_panels;
mod ui_plot_view;
mod ui_range;
mod ui_render;
mod ui_tables;
mod ui_text;
mod utils;

pub(crate) use screens::{render_failed, render_loading};
pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub(crate) use ui_panels::{ControlsAction, render_controls};
pub(crate) use ui_range::{ForecastView, RawRangeSelector};
pub(crate) use ui_render::render_dashboard;
pub(crate) use utils::setup_custom_visuals;
