use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use weather_analytics::{
    build_router, AppState, CityDaily, CurrentConditions, DailySource, LatLon, OpenWeatherClient,
    ProxyConfig, RealtimeDbClient, RefreshScheduler, SchedulerConfig, WeatherSource,
    DEFAULT_CITY_ID,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceKind {
    /// Full history from a realtime database snapshot.
    RealtimeDb,
    /// Current conditions from OpenWeatherMap, accumulated locally.
    Openweather,
}

#[derive(Debug, Parser)]
#[command(name = "weather-analytics", version, about = "Weather trend and change dashboard service")]
struct Cli {
    /// Socket address to bind, e.g. 127.0.0.1:8080
    #[arg(long, default_value = "127.0.0.1:8080", env = "WEATHER_LISTEN")]
    listen: SocketAddr,
    /// Where the dashboard reads its samples from.
    #[arg(long, value_enum, default_value_t = SourceKind::RealtimeDb, env = "WEATHER_SOURCE")]
    source: SourceKind,
    /// Root URL of the realtime database.
    #[arg(long, env = "WEATHER_DATABASE_URL")]
    database_url: Option<String>,
    /// Path of the readings node inside the database.
    #[arg(long, env = "WEATHER_DATABASE_PATH")]
    database_path: Option<String>,
    /// Auth token for the realtime database.
    #[arg(long, env = "WEATHER_DATABASE_AUTH", hide_env_values = true)]
    database_auth: Option<String>,
    /// OpenWeatherMap API key. Also enables /api/weather.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Latitude for current conditions.
    #[arg(long, default_value_t = 51.5074, env = "WEATHER_LAT", allow_negative_numbers = true)]
    lat: f64,
    /// Longitude for current conditions.
    #[arg(long, default_value_t = -0.1278, env = "WEATHER_LON", allow_negative_numbers = true)]
    lon: f64,
    /// City id used by /api/weather.
    #[arg(long, default_value = DEFAULT_CITY_ID, env = "WEATHER_CITY_ID")]
    city_id: String,
    /// Seconds between refresh cycles.
    #[arg(long, default_value_t = 60, env = "WEATHER_REFRESH_SECS")]
    refresh_secs: u64,
    /// Longest range /api/weather accepts, in days.
    #[arg(long, default_value_t = 366, env = "WEATHER_MAX_RANGE_DAYS")]
    max_range_days: u32,
    /// Show only the error after a failed refresh instead of the last good data.
    #[arg(long, default_value_t = false)]
    no_stale: bool,
}

fn resolve_source(
    cli: &Cli,
    openweather: Option<&OpenWeatherClient>,
) -> anyhow::Result<Arc<dyn WeatherSource>> {
    let source: Arc<dyn WeatherSource> = match cli.source {
        SourceKind::RealtimeDb => {
            let database_url = cli
                .database_url
                .clone()
                .context("--source realtime-db requires --database-url or WEATHER_DATABASE_URL")?;
            Arc::new(
                RealtimeDbClient::builder()
                    .database_url(database_url)
                    .maybe_path(cli.database_path.clone())
                    .maybe_auth_token(cli.database_auth.clone())
                    .build(),
            )
        }
        SourceKind::Openweather => {
            let client = openweather
                .cloned()
                .context("--source openweather requires --api-key or OPENWEATHER_API_KEY")?;
            Arc::new(CurrentConditions::new(client, LatLon(cli.lat, cli.lon)))
        }
    };
    Ok(source)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let openweather = cli
        .api_key
        .as_ref()
        .map(|key| OpenWeatherClient::builder().api_key(key.clone()).build());
    let source = resolve_source(&cli, openweather.as_ref())?;
    let daily = openweather
        .map(|client| Arc::new(CityDaily::new(client, cli.city_id.clone())) as Arc<dyn DailySource>);

    let scheduler = RefreshScheduler::start(
        source,
        SchedulerConfig::builder()
            .period(Duration::from_secs(cli.refresh_secs.max(1)))
            .keep_stale_on_error(!cli.no_stale)
            .build(),
    );

    let app = build_router(AppState {
        dashboard: scheduler.subscribe(),
        daily,
        proxy: ProxyConfig::builder()
            .max_range_days(cli.max_range_days)
            .build(),
    });

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    info!("weather-analytics listening on {}", cli.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            // resolves on Ctrl-C, or at once if the handler cannot be installed
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    scheduler.stop().await;
    info!("weather-analytics stopped");
    Ok(())
}
