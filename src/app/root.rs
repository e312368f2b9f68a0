use {
    eframe::{
        Frame, Storage,
        egui::{CentralPanel, Context, ScrollArea, TopBottomPanel},
    },
    serde::{Deserialize, Serialize},
    std::mem,
};

use crate::{
    Cli,
    app::{
        AppState, DashboardState, FailedState, LoadingState, PersistedSelection, PhaseView,
        ReadyState, Selection,
    },
    config::HORIZON_YEARS,
    data::MarketData,
    domain::CoinListing,
    engine::{ForecastEngine, JobResult},
    ui::{
        ControlsAction, ForecastView, RawRangeSelector, UI_CONFIG, UI_TEXT, render_controls,
        render_dashboard, render_failed, render_loading, setup_custom_visuals,
    },
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct App {
    pub(crate) persisted_selection: PersistedSelection, // persists across sessions.
    #[serde(skip)]
    pub(crate) selection: Selection,
    #[serde(skip)]
    pub(crate) coin_limit: usize,
    #[serde(skip)]
    pub(crate) listing: CoinListing,
    #[serde(skip)]
    pub(crate) engine: Option<ForecastEngine>,
    #[serde(skip)]
    pub(crate) dashboard: DashboardState,
    #[serde(skip)]
    pub(crate) raw_range: RawRangeSelector,
    #[serde(skip)]
    pub(crate) forecast_view: ForecastView,
    #[serde(skip)]
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self {
            persisted_selection: PersistedSelection::default(),
            selection: Selection::default(),
            coin_limit: Cli::default().coin_limit,
            listing: CoinListing::new(),
            engine: None,
            dashboard: DashboardState::default(),
            raw_range: RawRangeSelector::default(),
            forecast_view: ForecastView::default(),
            state: AppState::default(),
        }
    }
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut app: App = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        app.coin_limit = args.coin_limit;
        app.selection.years = app
            .persisted_selection
            .years
            .clamp(*HORIZON_YEARS.start(), *HORIZON_YEARS.end());

        app.state = match MarketData::from_settings(&args.market_settings()) {
            Ok(market) => {
                let mut engine = ForecastEngine::new(market);
                engine.request_coin_list(app.coin_limit);
                app.engine = Some(engine);
                AppState::Loading(LoadingState::default())
            }
            Err(e) => {
                log::error!("Could not build HTTP clients: {}", e);
                AppState::Failed(FailedState {
                    message: e.to_string(),
                })
            }
        };

        app
    }

    fn poll_engine(&mut self) -> Vec<JobResult> {
        match &mut self.engine {
            Some(e) => e.poll(),
            None => Vec::new(),
        }
    }

    /// Applies a fresh listing and picks the coin to show: the current one if
    /// still listed, else the persisted one, else the top coin.
    pub(crate) fn apply_listing(&mut self, listing: CoinListing) {
        let wanted = self
            .selection
            .coin
            .as_ref()
            .map(|c| c.name.clone())
            .or_else(|| self.persisted_selection.coin_name.clone());
        self.selection.coin = wanted
            .and_then(|name| listing.get(&name))
            .or_else(|| listing.first());

        #[cfg(debug_assertions)]
        if DF.log_selection {
            log::info!(
                "Listing has {} coins, selected {:?}",
                listing.len(),
                self.selection.coin.as_ref().map(|c| c.name.as_str())
            );
        }
        self.listing = listing;
    }

    pub(crate) fn request_forecast(&mut self) {
        let Some(coin) = self.selection.coin.clone() else {
            return;
        };
        if let Some(e) = &mut self.engine {
            let id = e.request_forecast(coin, self.selection.years);
            self.dashboard.pending = Some(id);
            self.dashboard.error = None;
        }
    }

    fn handle_forecast_result(&mut self, result: JobResult) {
        let JobResult::Forecast {
            request_id,
            duration_ms,
            result,
            ..
        } = result
        else {
            return;
        };
        if self.dashboard.pending == Some(request_id) {
            self.dashboard.pending = None;
        }
        self.dashboard.last_duration_ms = Some(duration_ms);
        match result {
            Ok(data) => {
                if self.dashboard.data.as_ref().map(|d| &d.coin) != Some(&data.coin) {
                    self.raw_range = RawRangeSelector::default();
                }
                self.dashboard.data = Some(data);
                self.dashboard.error = None;
            }
            Err(msg) => {
                log::error!("Forecast failed: {}", msg);
                self.dashboard.data = None;
                self.dashboard.error = Some(msg);
            }
        }
    }

    pub(crate) fn reload_data(&mut self) {
        if let Some(e) = &mut self.engine {
            e.clear_cache();
            e.request_coin_list(self.coin_limit);
        }
        self.dashboard.pending = None;
    }

    pub(crate) fn tick_loading_state(&mut self, ctx: &Context, state: &mut LoadingState) -> AppState {
        for result in self.poll_engine() {
            if let JobResult::CoinList { result, .. } = result {
                return match result {
                    Ok(listing) => {
                        self.apply_listing(listing);
                        self.request_forecast();
                        AppState::Ready(ReadyState)
                    }
                    Err(message) => {
                        log::error!("{}", message);
                        AppState::Failed(FailedState { message })
                    }
                };
            }
        }

        CentralPanel::default().show(ctx, |ui| render_loading(ui, state.started));
        ctx.request_repaint();
        AppState::Loading(state.clone())
    }

    pub(crate) fn tick_ready_state(&mut self, ctx: &Context) -> AppState {
        for result in self.poll_engine() {
            match result {
                JobResult::CoinList { result: Ok(listing), .. } => {
                    // After a reload: keep the selection if possible, then refit.
                    self.apply_listing(listing);
                    self.request_forecast();
                }
                JobResult::CoinList { result: Err(message), .. } => {
                    log::error!("{}", message);
                    self.dashboard.error = Some(message);
                }
                forecast @ JobResult::Forecast { .. } => self.handle_forecast_result(forecast),
            }
        }

        let busy = self.engine.as_ref().is_some_and(ForecastEngine::is_busy);
        let mut action = ControlsAction::None;
        TopBottomPanel::top("controls")
            .frame(UI_CONFIG.top_panel_frame())
            .show(ctx, |ui| {
                action = render_controls(ui, &self.listing, &mut self.selection, busy);
            });

        match action {
            ControlsAction::SelectionChanged => {
                #[cfg(debug_assertions)]
                if DF.log_selection {
                    log::info!("Selection changed to {:?}", self.selection);
                }
                self.persisted_selection = PersistedSelection {
                    coin_name: self.selection.coin.as_ref().map(|c| c.name.clone()),
                    years: self.selection.years,
                };
                self.request_forecast();
            }
            ControlsAction::Reload => self.reload_data(),
            ControlsAction::None => {}
        }

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    render_dashboard(
                        ui,
                        &self.dashboard,
                        &mut self.raw_range,
                        &mut self.forecast_view,
                    );
                });
            });

        if busy {
            ctx.request_repaint();
        }
        AppState::Ready(ReadyState)
    }

    pub(crate) fn tick_failed_state(&mut self, ctx: &Context, state: &mut FailedState) -> AppState {
        let mut retry = false;
        CentralPanel::default().show(ctx, |ui| {
            retry = render_failed(ui, &UI_TEXT.error_listing, &state.message);
        });
        if retry && self.engine.is_some() {
            self.reload_data();
            return AppState::Loading(LoadingState::default());
        }
        AppState::Failed(state.clone())
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        let current = mem::take(&mut self.state);
        self.state = match current {
            AppState::Loading(mut s) => s.tick(self, ctx),
            AppState::Ready(mut s) => s.tick(self, ctx),
            AppState::Failed(mut s) => s.tick(self, ctx),
        };
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        self.persisted_selection = PersistedSelection {
            coin_name: self
                .selection
                .coin
                .as_ref()
                .map(|c| c.name.clone())
                .or_else(|| self.persisted_selection.coin_name.clone()),
            years: self.selection.years,
        };
        #[cfg(debug_assertions)]
        if DF.log_selection {
            log::info!(
                "💾 SAVE [App]: PersistedSelection = {:?}",
                self.persisted_selection
            );
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}
