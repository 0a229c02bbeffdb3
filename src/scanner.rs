//! Proximity scan over the report collection.
//!
//! Exhaustive by design: the whole collection is fetched and filtered here,
//! no geographic pre-filter at the query layer. Acceptable at current report
//! volumes; a geo-indexed query can replace the `ReportStore` backend without
//! changing this contract.

use std::sync::Arc;

use anyhow::Result;

use crate::config::PROXIMITY_RADIUS_METERS;
use crate::geo::distance_meters;
use crate::model::ReportRecord;
use crate::store::ReportStore;

/// One report that qualified, with its computed distance.
#[derive(Debug, Clone)]
pub struct NearbyReport {
    pub report: ReportRecord,
    pub distance_m: f64,
}

/// Inclusion is `<=`: a report at exactly the radius still alerts.
pub fn within_alert_radius(distance_m: f64) -> bool {
    distance_m <= PROXIMITY_RADIUS_METERS
}

#[derive(Clone)]
pub struct ProximityScanner {
    reports: Arc<dyn ReportStore>,
}

impl ProximityScanner {
    pub fn new(reports: Arc<dyn ReportStore>) -> Self {
        Self { reports }
    }

    /// Reports within the alert radius of (`lat`, `lon`), excluding reports
    /// authored by `updating_user_id` and reports without a coordinate.
    /// Order matches the underlying storage iteration order. Read-only.
    pub async fn find_nearby_reports(
        &self,
        updating_user_id: &str,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<NearbyReport>> {
        let all = self.reports.list_reports().await?;

        Ok(all
            .into_iter()
            .filter_map(|report| {
                let loc = report.location?;
                if report.user_id == updating_user_id {
                    return None;
                }
                let distance_m = distance_meters(lat, lon, loc.latitude, loc.longitude);
                within_alert_radius(distance_m).then_some(NearbyReport { report, distance_m })
            })
            .collect())
    }
}
