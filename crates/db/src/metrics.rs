use carbon_core::CarbonMetrics;

use crate::Db;
use crate::error::Result;

pub const METRICS_KEY: &str = "copilot-carbon-metrics";

impl Db {
    /// Stored totals, or `None` before the first save. Fields absent from
    /// older blobs take their defaults.
    pub fn load_metrics(&self) -> Result<Option<CarbonMetrics>> {
        match self.get_setting(METRICS_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save_metrics(&self, metrics: &CarbonMetrics) -> Result<()> {
        let raw = serde_json::to_string(metrics)?;
        self.set_setting(METRICS_KEY, &raw)
    }
}
