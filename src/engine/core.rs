use std::sync::mpsc::{Receiver, Sender, channel};

use super::{
    messages::{JobRequest, JobResult},
    worker,
};
use crate::{data::MarketData, domain::Coin};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Owns the UI ends of the job channels.
pub struct ForecastEngine {
    market: MarketData,

    job_tx: Sender<JobRequest>,     // UI writes to this
    result_rx: Receiver<JobResult>, // UI reads from this

    // WASM ONLY: results are sent from spawned futures.
    #[cfg(target_arch = "wasm32")]
    result_tx: Sender<JobResult>,

    next_request_id: u64,
    /// Only the forecast with this id is delivered; older ones are stale.
    latest_forecast: Option<u64>,
    in_flight: usize,
}

impl ForecastEngine {
    pub fn new(market: MarketData) -> Self {
        let (job_tx, job_rx) = channel::<JobRequest>();
        let (result_tx, result_rx) = channel::<JobResult>();

        #[cfg(not(target_arch = "wasm32"))]
        worker::spawn_worker_thread(market.clone(), job_rx, result_tx);

        #[cfg(target_arch = "wasm32")]
        let result_tx = {
            worker::spawn_worker_thread(market.clone(), job_rx, result_tx.clone());
            result_tx
        };

        Self {
            market,
            job_tx,
            result_rx,
            #[cfg(target_arch = "wasm32")]
            result_tx,
            next_request_id: 0,
            latest_forecast: None,
            in_flight: 0,
        }
    }

    fn dispatch(&mut self, req: JobRequest) {
        self.in_flight += 1;

        #[cfg(not(target_arch = "wasm32"))]
        if self.job_tx.send(req).is_err() {
            log::error!("Worker thread is gone, job dropped");
            self.in_flight -= 1;
        }

        #[cfg(target_arch = "wasm32")]
        {
            let _ = &self.job_tx;
            worker::spawn_local_request(self.market.clone(), req, self.result_tx.clone());
        }
    }

    pub fn request_coin_list(&mut self, limit: usize) {
        self.dispatch(JobRequest::CoinList { limit });
    }

    /// Queues a forecast and returns its id. Supersedes any earlier forecast.
    pub fn request_forecast(&mut self, coin: Coin, years: u32) -> u64 {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.latest_forecast = Some(request_id);

        #[cfg(debug_assertions)]
        if DF.log_engine {
            log::info!("Engine: forecast #{} for {} ({}y)", request_id, coin, years);
        }

        self.dispatch(JobRequest::Forecast {
            request_id,
            coin,
            years,
        });
        request_id
    }

    /// Drains finished jobs. Superseded forecasts are dropped here.
    pub fn poll(&mut self) -> Vec<JobResult> {
        let mut out = Vec::new();
        while let Ok(result) = self.result_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            if let JobResult::Forecast { request_id, .. } = &result {
                if Some(*request_id) != self.latest_forecast {
                    #[cfg(debug_assertions)]
                    if DF.log_engine {
                        log::info!("Engine: dropping stale forecast #{}", request_id);
                    }
                    continue;
                }
            }
            out.push(result);
        }
        out
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Forget every memoised fetch; the next requests hit the network.
    pub fn clear_cache(&self) {
        self.market.clear();
    }
}
