//! `GET /api/weather?start=YYYY-MM-DD&end=YYYY-MM-DD`: one [`DailyRecord`] per day of an
//! inclusive date range, fetched concurrently from the configured [`DailySource`].

use crate::server::error::ApiError;
use crate::server::AppState;
use crate::types::daily_record::DailyRecord;
use crate::types::traits::any_date::AnyDate;
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use futures_util::future::try_join_all;
use log::info;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RangeQuery {
    start: Option<String>,
    end: Option<String>,
}

/// Validates the query and returns every day of the range in order.
pub(crate) fn parse_range(query: &RangeQuery, max_days: u32) -> Result<Vec<NaiveDate>, ApiError> {
    let (Some(start), Some(end)) = (
        query.start.as_deref().filter(|s| !s.trim().is_empty()),
        query.end.as_deref().filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(ApiError::bad_request("Start and end dates are required"));
    };
    let (Some(start), Some(end)) = (start.get_date(), end.get_date()) else {
        return Err(ApiError::bad_request("Invalid date format"));
    };
    if start > end {
        return Err(ApiError::bad_request(
            "Start date must not be after end date",
        ));
    }
    let days = (end - start).num_days() + 1;
    if days > i64::from(max_days) {
        return Err(ApiError::bad_request(format!(
            "Date range must not exceed {} days",
            max_days
        )));
    }
    Ok(start.iter_days().take(days as usize).collect())
}

pub(crate) async fn weather_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<DailyRecord>>, ApiError> {
    let days = parse_range(&query, state.proxy.max_range_days)?;
    let source = state
        .daily
        .as_ref()
        .ok_or_else(|| ApiError::unavailable("Daily weather source is not configured"))?;

    let records = try_join_all(days.iter().map(|day| source.daily(*day))).await?;
    info!("Served {} daily records", records.len());
    Ok(Json(records))
}
