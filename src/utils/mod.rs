mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{AppInstant, TimeUtils, format_duration};

pub(crate) use maths_utils::{finite_min_max, linspace, mean_and_stddev, padded_range};
