/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use weather_analytics::LatLon;
///
/// let aden = LatLon(13.54, 44.39);
/// assert_eq!(aden.0, 13.54); // Latitude
/// assert_eq!(aden.1, 44.39); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);
