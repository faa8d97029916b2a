use std::error::Error;
use weather_analytics::{evaluate_source, CurrentConditions, LatLon, OpenWeatherClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let api_key = std::env::var("OPENWEATHER_API_KEY")?;
    let client = OpenWeatherClient::builder().api_key(api_key).build();
    let london = CurrentConditions::new(client, LatLon(51.5074, -0.1278));

    let snapshot = evaluate_source(&london).await?;
    println!(
        "{}: {:.1} °C, {:.0} % humidity, {:.1} mm rain",
        snapshot.current.timestamp(),
        snapshot.current.temperature(),
        snapshot.current.humidity(),
        snapshot.current.rainfall()
    );
    Ok(())
}
