mod core;
mod messages;
mod pipeline;
mod worker;

pub use {
    core::ForecastEngine,
    messages::{JobRequest, JobResult},
    pipeline::{component_profiles, run_forecast},
    worker::process_request,
};
