mod phases;
mod root;
mod state;

pub(crate) use {
    phases::PhaseView,
    state::{
        AppState, DashboardState, FailedState, LoadingState, PersistedSelection, ReadyState,
        Selection,
    },
};

pub use root::App;
