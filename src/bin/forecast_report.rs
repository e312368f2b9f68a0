use {
    anyhow::{Result, bail},
    clap::Parser,
    crypto_forecast::{
        Cli, DataError, MarketData,
        config::{HORIZON_YEARS, TABLE_TAIL_ROWS},
        domain::DailyBar,
        models::ForecastRow,
        run_forecast,
        utils::{AppInstant, TimeUtils},
    },
    itertools::Itertools,
    tabled::{Table, Tabled, settings::Style},
};

/// Fetches one coin's history, fits the forecast model and prints the tails.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Display name or symbol, e.g. "Bitcoin" or "btc"
    #[arg(long, default_value = "Bitcoin")]
    coin: String,

    /// Forecast horizon in years
    #[arg(long, default_value_t = *HORIZON_YEARS.start(),
          value_parser = clap::value_parser!(u32).range(*HORIZON_YEARS.start() as i64..=*HORIZON_YEARS.end() as i64))]
    years: u32,

    /// Rows printed from the end of each table
    #[arg(long, default_value_t = TABLE_TAIL_ROWS)]
    rows: usize,

    #[command(flatten)]
    common: Cli,
}

#[derive(Tabled)]
struct BarRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Adj Close")]
    adj_close: String,
    #[tabled(rename = "Volume")]
    volume: u64,
}

impl From<DailyBar> for BarRow {
    fn from(b: DailyBar) -> Self {
        Self {
            date: TimeUtils::format_date(b.date),
            open: format!("{:.4}", b.open),
            high: format!("{:.4}", b.high),
            low: format!("{:.4}", b.low),
            close: format!("{:.4}", b.close),
            adj_close: format!("{:.4}", b.adj_close),
            volume: b.volume,
        }
    }
}

#[derive(Tabled)]
struct PredictionRow {
    ds: String,
    trend: String,
    yhat_lower: String,
    yhat_upper: String,
    additive_terms: String,
    yhat: String,
}

impl From<&ForecastRow> for PredictionRow {
    fn from(r: &ForecastRow) -> Self {
        Self {
            ds: TimeUtils::format_date(r.ds),
            trend: format!("{:.4}", r.trend),
            yhat_lower: format!("{:.4}", r.yhat_lower),
            yhat_upper: format!("{:.4}", r.yhat_upper),
            additive_terms: format!("{:.4}", r.additive_terms),
            yhat: format!("{:.4}", r.yhat),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let market = MarketData::from_settings(&args.common.market_settings())?;

    let coin = match market.resolve_coin(args.common.coin_limit, &args.coin).await {
        Ok(coin) => coin,
        Err(DataError::UnknownCoin(name)) => {
            let listing = market.top_coins(args.common.coin_limit).await?;
            bail!(
                "'{}' is not in the top {} coins. Try one of: {}",
                name,
                args.common.coin_limit,
                listing.names().take(10).join(", ")
            );
        }
        Err(e) => return Err(e.into()),
    };

    log::info!("Forecasting {} ({}) for {} years", coin.name, coin.ticker(), args.years);
    let started = AppInstant::now();
    let data = run_forecast(&market, &coin, args.years).await?;

    println!(
        "{} ({}): {} days of history, {} forecast rows ({} days ahead), fitted in {} ms",
        data.coin.name,
        data.coin.ticker(),
        data.prices.len(),
        data.forecast.len(),
        data.forecast.horizon_days(),
        started.elapsed().as_millis()
    );

    println!("\nRaw data");
    let bars = data.prices.tail(args.rows).into_iter().map(BarRow::from);
    println!("{}", Table::new(bars).with(Style::rounded()));

    println!("\nForecast data");
    let preds = data.forecast.tail(args.rows).iter().map(PredictionRow::from);
    println!("{}", Table::new(preds).with(Style::rounded()));

    let seasonalities = [
        (data.forecast.has_yearly, "yearly"),
        (data.forecast.has_weekly, "weekly"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .join(", ");
    if !seasonalities.is_empty() {
        println!("\nSeasonalities: {}", seasonalities);
    }

    Ok(())
}
