use chrono::Utc;
use weather_analytics::{DashboardSnapshot, Sample, Series, SeriesFrame, WeatherAnalyticsError};

fn main() -> Result<(), WeatherAnalyticsError> {
    let series = Series::new(vec![
        Sample::new("2024-06-01 12:00:00", 24.3, 41.0, 0.0)?,
        Sample::new("2024-06-01 11:55:00", 24.1, 43.0, 0.0)?,
        Sample::new("2024-06-01 10:50:00", 18.6, 58.0, 2.4)?,
        Sample::new("2024-05-31 22:00:00", 12.0, 80.0, 0.4)?,
    ]);

    let snapshot = DashboardSnapshot::evaluate(&series, Utc::now())?;
    println!("Current: {:?}", snapshot.current);
    if let Some(trends) = snapshot.trends {
        for (metric, trend) in trends.iter() {
            println!("{}: {} {}", metric.label(), trend.arrow(), trend.description());
        }
    }
    for change in &snapshot.changes {
        println!("{}: {}", change.title, change.message);
    }

    println!("\n{}\n", snapshot.to_csv()?);

    let today = SeriesFrame::from_series(&series)?.get_range("2024-06-01", "2024-06-01 23:59:59")?;
    println!("Samples on 2024-06-01: {}", today.count()?);
    for day in snapshot.daily()? {
        println!(
            "{}: {:.1} °C, {:.0} %, {:.1} mm",
            day.date, day.temperature, day.humidity, day.rainfall
        );
    }
    Ok(())
}
