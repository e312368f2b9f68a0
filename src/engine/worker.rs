use std::sync::mpsc::{Receiver, Sender};

#[cfg(not(target_arch = "wasm32"))]
use {std::thread, tokio::runtime::Runtime};

use {
    super::{
        messages::{JobRequest, JobResult},
        pipeline::run_forecast,
    },
    crate::{data::MarketData, utils::AppInstant},
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// NATIVE ONLY: one background thread with its own runtime, jobs run in order.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_worker_thread(market: MarketData, rx: Receiver<JobRequest>, tx: Sender<JobResult>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Worker could not start its runtime: {}", e);
                return;
            }
        };
        while let Ok(req) = rx.recv() {
            let result = rt.block_on(process_request(&market, req));
            if tx.send(result).is_err() {
                // UI side hung up.
                break;
            }
        }
    });
}

/// WASM ONLY: No thread. The Engine spawns each request on the browser event loop.
#[cfg(target_arch = "wasm32")]
pub fn spawn_worker_thread(_market: MarketData, _rx: Receiver<JobRequest>, _tx: Sender<JobResult>) {
    // Do nothing.
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_local_request(market: MarketData, req: JobRequest, tx: Sender<JobResult>) {
    wasm_bindgen_futures::spawn_local(async move {
        let _ = tx.send(process_request(&market, req).await);
    });
}

pub async fn process_request(market: &MarketData, req: JobRequest) -> JobResult {
    #[cfg(debug_assertions)]
    if DF.log_engine {
        log::info!("Worker: start {:?}", req);
    }

    match req {
        JobRequest::CoinList { limit } => {
            let result = market
                .top_coins(limit)
                .await
                .map_err(|e| format!("fetching the top {} coins: {}", limit, e));
            JobResult::CoinList { limit, result }
        }
        JobRequest::Forecast {
            request_id,
            coin,
            years,
        } => {
            let start = AppInstant::now();
            let result = crate::trace_time!(&format!("Total JOB [{} {}y]", coin.symbol, years), 100_000, {
                run_forecast(market, &coin, years).await
            });
            JobResult::Forecast {
                request_id,
                coin,
                years,
                duration_ms: start.elapsed().as_millis(),
                result: result.map(std::sync::Arc::new).map_err(|e| format!("{:#}", e)),
            }
        }
    }
}
