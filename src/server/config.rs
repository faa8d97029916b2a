use bon::Builder;

/// Settings for the date-range weather endpoint.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ProxyConfig {
    /// Longest accepted range, both ends included.
    #[builder(default = 366)]
    pub max_range_days: u32,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
