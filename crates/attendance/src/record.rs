//! Core attendance record types.
//!
//! This module defines the single persisted entity, [`AttendanceRecord`],
//! along with the fixed work-option enumeration and the location stamp that
//! is stored alongside each record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Wire marker stored when no device position could be obtained.
pub const LOCATION_UNAVAILABLE: &str = "Location not available";

/// Format used for the `date` field of a record.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for the `time` field of a record.
const TIME_FORMAT: &str = "%H:%M:%S";

/// The attendance type selected on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOption {
    /// Working remotely.
    #[serde(rename = "Work From Home")]
    WorkFromHome,
    /// Present at the office.
    #[serde(rename = "Work From Office")]
    WorkFromOffice,
    /// Absent for the day.
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl fmt::Display for WorkOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkFromHome => write!(f, "Work From Home"),
            Self::WorkFromOffice => write!(f, "Work From Office"),
            Self::OnLeave => write!(f, "On Leave"),
        }
    }
}

/// Error returned when a string does not name a work option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown work option: {0}")]
pub struct UnknownWorkOption(String);

impl FromStr for WorkOption {
    type Err = UnknownWorkOption;

    /// Accepts the stored display form ("Work From Home") as well as the
    /// kebab-case CLI form ("work-from-home").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Work From Home" | "work-from-home" => Ok(Self::WorkFromHome),
            "Work From Office" | "work-from-office" => Ok(Self::WorkFromOffice),
            "On Leave" | "on-leave" => Ok(Self::OnLeave),
            other => Err(UnknownWorkOption(other.to_string())),
        }
    }
}

/// The position recorded with a submission.
///
/// Serialized as the store's string field: `"lat, lng"` with six decimals
/// when a fix was obtained, or the [`LOCATION_UNAVAILABLE`] marker.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationStamp {
    /// Client-reported, unverified coordinates.
    Coordinates {
        /// Degrees north.
        latitude: f64,
        /// Degrees east.
        longitude: f64,
    },
    /// Permission denied, unsupported platform, or timed out.
    Unavailable,
}

impl LocationStamp {
    /// Whether a position was actually captured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Coordinates { .. })
    }
}

impl fmt::Display for LocationStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{latitude:.6}, {longitude:.6}"),
            Self::Unavailable => write!(f, "{LOCATION_UNAVAILABLE}"),
        }
    }
}

impl Serialize for LocationStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocationStamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

impl LocationStamp {
    /// Parse the stored string form. Anything that is not a `"lat, lng"`
    /// pair folds to [`LocationStamp::Unavailable`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(2, ',');
        let latitude = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
        let longitude = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Self::Coordinates {
                latitude,
                longitude,
            },
            _ => Self::Unavailable,
        }
    }
}

/// One attendance submission.
///
/// Records are append-only: once stored they are never updated or deleted
/// by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Identifier assigned by the store (`None` until persisted).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,

    /// Trimmed, human-entered display name.
    pub employee_name: String,

    /// Derived slug; not guaranteed unique.
    pub username: String,

    /// The selected attendance type.
    pub work_option: WorkOption,

    /// Creation instant; the store assigns the canonical value on append.
    pub timestamp: DateTime<Utc>,

    /// Local calendar date at submission time (`%Y-%m-%d`).
    ///
    /// Derived from the client clock, not from `timestamp`; this is the
    /// field the duplicate check and the date filter compare against.
    pub date: String,

    /// Local wall-clock time at submission time (`%H:%M:%S`).
    pub time: String,

    /// Position stamp, or the unavailable marker.
    pub location: LocationStamp,
}

impl AttendanceRecord {
    /// Build a new record from a submitted name and option.
    ///
    /// The name is trimmed, the username slug is derived from it, and the
    /// date/time strings are taken from the local clock now.
    #[must_use]
    pub fn new(name: &str, work_option: WorkOption, location: LocationStamp) -> Self {
        let employee_name = name.trim().to_string();
        let username = derive_username(&employee_name);
        let now = Local::now();
        Self {
            id: None,
            employee_name,
            username,
            work_option,
            timestamp: Utc::now(),
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
            location,
        }
    }

    /// Whether this record was submitted under the given name today.
    ///
    /// Name comparison is case-insensitive on the trimmed input; the date
    /// comparison is exact string equality.
    #[must_use]
    pub fn is_marked_by(&self, name: &str, date: &str) -> bool {
        self.employee_name.to_lowercase() == name.trim().to_lowercase() && self.date == date
    }
}

/// Derive the username slug for a display name: lowercase, with whitespace
/// runs collapsed to single underscores.
#[must_use]
pub fn derive_username(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Today's local date in the record `date` format.
#[must_use]
pub fn today_stamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_option_display() {
        assert_eq!(WorkOption::WorkFromHome.to_string(), "Work From Home");
        assert_eq!(WorkOption::WorkFromOffice.to_string(), "Work From Office");
        assert_eq!(WorkOption::OnLeave.to_string(), "On Leave");
    }

    #[test]
    fn test_work_option_from_str() {
        assert_eq!(
            "Work From Home".parse::<WorkOption>().unwrap(),
            WorkOption::WorkFromHome
        );
        assert_eq!(
            "on-leave".parse::<WorkOption>().unwrap(),
            WorkOption::OnLeave
        );
        assert!("Telecommuting".parse::<WorkOption>().is_err());
    }

    #[test]
    fn test_work_option_wire_form() {
        let json = serde_json::to_string(&WorkOption::WorkFromOffice).unwrap();
        assert_eq!(json, "\"Work From Office\"");

        let parsed: WorkOption = serde_json::from_str("\"On Leave\"").unwrap();
        assert_eq!(parsed, WorkOption::OnLeave);
    }

    #[test]
    fn test_derive_username() {
        assert_eq!(derive_username("Asha Rao"), "asha_rao");
        assert_eq!(derive_username("  Asha   Rao  "), "asha_rao");
        assert_eq!(derive_username("single"), "single");
    }

    #[test]
    fn test_location_stamp_display() {
        let stamp = LocationStamp::Coordinates {
            latitude: 12.971598,
            longitude: 77.594566,
        };
        assert_eq!(stamp.to_string(), "12.971598, 77.594566");
        assert_eq!(LocationStamp::Unavailable.to_string(), LOCATION_UNAVAILABLE);
    }

    #[test]
    fn test_location_stamp_rounds_to_six_decimals() {
        let stamp = LocationStamp::Coordinates {
            latitude: 1.23456789,
            longitude: -2.0,
        };
        assert_eq!(stamp.to_string(), "1.234568, -2.000000");
    }

    #[test]
    fn test_location_stamp_parse() {
        let stamp = LocationStamp::parse("12.971598, 77.594566");
        assert_eq!(
            stamp,
            LocationStamp::Coordinates {
                latitude: 12.971598,
                longitude: 77.594566,
            }
        );

        assert_eq!(
            LocationStamp::parse(LOCATION_UNAVAILABLE),
            LocationStamp::Unavailable
        );
        assert_eq!(LocationStamp::parse("garbage"), LocationStamp::Unavailable);
        assert_eq!(LocationStamp::parse("12.0"), LocationStamp::Unavailable);
    }

    #[test]
    fn test_location_stamp_serde_round_trip() {
        let stamp = LocationStamp::Coordinates {
            latitude: -33.868820,
            longitude: 151.209290,
        };
        let json = serde_json::to_string(&stamp).unwrap();
        assert_eq!(json, "\"-33.868820, 151.209290\"");

        let back: LocationStamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stamp);
    }

    #[test]
    fn test_record_new_trims_and_derives() {
        let record = AttendanceRecord::new(
            "  Asha Rao ",
            WorkOption::WorkFromOffice,
            LocationStamp::Unavailable,
        );

        assert!(record.id.is_none());
        assert_eq!(record.employee_name, "Asha Rao");
        assert_eq!(record.username, "asha_rao");
        assert_eq!(record.work_option, WorkOption::WorkFromOffice);
        assert_eq!(record.date, today_stamp());
        assert_eq!(record.location, LocationStamp::Unavailable);
    }

    #[test]
    fn test_record_date_and_time_shapes() {
        let record =
            AttendanceRecord::new("x", WorkOption::OnLeave, LocationStamp::Unavailable);
        // 2024-01-05 / 09:30:00
        assert_eq!(record.date.len(), 10);
        assert_eq!(&record.date[4..5], "-");
        assert_eq!(record.time.len(), 8);
        assert_eq!(&record.time[2..3], ":");
    }

    #[test]
    fn test_record_is_marked_by() {
        let record = AttendanceRecord::new(
            "Asha Rao",
            WorkOption::WorkFromHome,
            LocationStamp::Unavailable,
        );

        assert!(record.is_marked_by("asha rao", &record.date));
        assert!(record.is_marked_by("  ASHA RAO  ", &record.date));
        assert!(!record.is_marked_by("asha rao", "1999-12-31"));
        assert!(!record.is_marked_by("someone else", &record.date));
    }

    #[test]
    fn test_record_wire_field_names() {
        let record = AttendanceRecord::new(
            "Asha Rao",
            WorkOption::WorkFromHome,
            LocationStamp::Unavailable,
        );
        let value = serde_json::to_value(&record).unwrap();

        assert!(value.get("employeeName").is_some());
        assert!(value.get("workOption").is_some());
        assert!(value.get("id").is_none());
        assert_eq!(
            value.get("location").unwrap().as_str().unwrap(),
            LOCATION_UNAVAILABLE
        );
    }

    #[test]
    fn test_record_deserialize_with_id() {
        let json = r#"{
            "id": "doc-1",
            "employeeName": "Asha Rao",
            "username": "asha_rao",
            "workOption": "Work From Office",
            "timestamp": "2024-01-05T09:30:00Z",
            "date": "2024-01-05",
            "time": "09:30:00",
            "location": "Location not available"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("doc-1"));
        assert_eq!(record.work_option, WorkOption::WorkFromOffice);
        assert_eq!(record.location, LocationStamp::Unavailable);
    }
}
