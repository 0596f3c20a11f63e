//! Hospital provisioning: CSV loading and a deterministic fallback set.
//!
//! # CSV format
//!
//! ```csv
//! name,lon,lat
//! New Civil Hospital Surat,72.8311,21.2090
//! ,72.7804,21.1702
//! ```
//!
//! A blank `name` becomes `"Hospital"`.
//!
//! # Fallback
//!
//! Callers that need a guaranteed minimum number of hospitals pass their
//! load result through [`hospitals_with_fallback`].  A failed load or a
//! short list is replaced by [`fallback_hospitals`], five fixed hospitals in
//! Surat, India.

use std::fmt::Display;
use std::io::Read;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use ed_core::GeoPoint;

use crate::assign::UNKNOWN_HOSPITAL_NAME;
use crate::record::Hospital;
use crate::{DispatchError, DispatchResult};

/// `(name, lon, lat)` of the fallback set.
const FALLBACK_HOSPITALS: [(&str, f64, f64); 5] = [
    ("New Civil Hospital Surat", 72.8311, 21.2090),
    ("Kiran Hospital",           72.7804, 21.1702),
    ("Sunshine Global Hospital", 72.7928, 21.2040),
    ("Apple Hospital",           72.8019, 21.1972),
    ("Unique Hospital",          72.7991, 21.1911),
];

#[derive(Deserialize)]
struct HospitalRecord {
    name: Option<String>,
    lon:  f64,
    lat:  f64,
}

/// Load hospitals from a CSV file.
pub fn load_hospitals_csv(path: &Path) -> DispatchResult<Vec<Hospital>> {
    let file = std::fs::File::open(path)?;
    load_hospitals_reader(file)
}

/// Like [`load_hospitals_csv`] but accepts any `Read` source.
pub fn load_hospitals_reader<R: Read>(reader: R) -> DispatchResult<Vec<Hospital>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<HospitalRecord>()
        .map(|row| {
            let row = row.map_err(|e| DispatchError::Parse(e.to_string()))?;
            let name = row
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_HOSPITAL_NAME.to_string());
            Ok(Hospital::new(name, GeoPoint::new(row.lon, row.lat)))
        })
        .collect()
}

/// The five fixed Surat hospitals.
pub fn fallback_hospitals() -> Vec<Hospital> {
    FALLBACK_HOSPITALS
        .iter()
        .map(|&(name, lon, lat)| Hospital::new(name, GeoPoint::new(lon, lat)))
        .collect()
}

/// `source` if it loaded and holds at least `min_count` hospitals, the
/// fallback set otherwise.
pub fn hospitals_with_fallback<E: Display>(
    source: Result<Vec<Hospital>, E>,
    min_count: usize,
) -> Vec<Hospital> {
    match source {
        Ok(hospitals) if hospitals.len() >= min_count => hospitals,
        Ok(hospitals) => {
            warn!(
                "only {} hospitals loaded (need {min_count}); using fallback set",
                hospitals.len()
            );
            fallback_hospitals()
        }
        Err(e) => {
            warn!("hospital load failed ({e}); using fallback set");
            fallback_hospitals()
        }
    }
}
