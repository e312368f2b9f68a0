use {
    crate::{
        config::HORIZON_YEARS,
        domain::Coin,
        models::DashboardData,
        utils::AppInstant,
    },
    serde::{Deserialize, Serialize},
    std::sync::Arc,
};

pub(crate) enum AppState {
    /// Waiting for the coin listing.
    Loading(LoadingState),
    Ready(ReadyState),
    /// The listing could not be fetched; nothing else can run.
    Failed(FailedState),
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Loading(LoadingState::default())
    }
}

#[derive(Clone)]
pub(crate) struct LoadingState {
    pub(crate) started: AppInstant,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            started: AppInstant::now(),
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct ReadyState;

#[derive(Clone, Default)]
pub(crate) struct FailedState {
    pub(crate) message: String,
}

/// What the user picked, as it survives restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PersistedSelection {
    pub(crate) coin_name: Option<String>,
    pub(crate) years: u32,
}

impl Default for PersistedSelection {
    fn default() -> Self {
        Self {
            coin_name: None,
            years: *HORIZON_YEARS.start(),
        }
    }
}

/// Live selection, resolved against the current listing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Selection {
    pub(crate) coin: Option<Coin>,
    pub(crate) years: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            coin: None,
            years: *HORIZON_YEARS.start(),
        }
    }
}

/// The forecast on screen plus the one being computed.
#[derive(Default)]
pub(crate) struct DashboardState {
    pub(crate) data: Option<Arc<DashboardData>>,
    pub(crate) pending: Option<u64>,
    pub(crate) error: Option<String>,
    pub(crate) last_duration_ms: Option<u128>,
}

impl DashboardState {
    pub(crate) fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
