// src/listing.rs
//
// Typed listing/slot records plus their flat CSV row mapping.
// One CSV row per listing; the party is a JSON-serialized slot array.

use std::error::Error;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::consts::TIMESTAMP_FMT;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tank,
    Healer,
    Dps,
    Unknown,
}

impl Role {
    /// Role from a slot's class list (substring check, like the site markup).
    pub fn from_classes(classes: &str) -> Self {
        if classes.contains("tank") {
            Role::Tank
        } else if classes.contains("healer") {
            Role::Healer
        } else if classes.contains("dps") {
            Role::Dps
        } else {
            Role::Unknown
        }
    }
}

/// One role position within a listing. Field order matters: it is the JSON
/// shape the exports have always used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub filled: bool,
    pub role: Role,
    /// Possibly several space-separated job abbreviations.
    pub job: String,
}

impl Slot {
    pub fn jobs(&self) -> impl Iterator<Item = &str> {
        self.job.split_whitespace()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tags {
    pub practice: bool,
    pub loot: bool,
    pub duty_completion: bool,
    pub one_player_per_job: bool,
}

/// One party-recruitment post as observed in a single time bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// UTC, floored to the 15-minute bucket it was observed in.
    pub timestamp: NaiveDateTime,
    pub id: u64,
    pub data_centre: String,
    pub category: String,
    pub duty: String,
    pub party: Vec<Slot>,
    pub tags: Tags,
}

impl Listing {
    /// Dedup key: one observation per listing per bucket.
    pub fn key(&self) -> (NaiveDateTime, u64) {
        (self.timestamp, self.id)
    }

    pub fn to_row(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let party = serde_json::to_string(&self.party)?;
        Ok(vec![
            self.timestamp.format(TIMESTAMP_FMT).to_string(),
            self.id.to_string(),
            self.data_centre.clone(),
            self.category.clone(),
            self.duty.clone(),
            party,
            flag(self.tags.practice),
            flag(self.tags.loot),
            flag(self.tags.duty_completion),
            flag(self.tags.one_player_per_job),
        ])
    }

    pub fn from_row(row: &[String]) -> Result<Self, Box<dyn Error>> {
        if row.len() < 10 {
            return Err(format!("Short row: {} columns", row.len()).into());
        }
        let timestamp = parse_timestamp(&row[0])?;
        let id: u64 = row[1].trim().parse()?;
        let party: Vec<Slot> = serde_json::from_str(&row[5])?;
        Ok(Self {
            timestamp,
            id,
            data_centre: row[2].clone(),
            category: row[3].clone(),
            duty: row[4].clone(),
            party,
            tags: Tags {
                practice: row[6].trim() == "1",
                loot: row[7].trim() == "1",
                duty_completion: row[8].trim() == "1",
                one_player_per_job: row[9].trim() == "1",
            },
        })
    }
}

fn flag(b: bool) -> String {
    if b { s!("1") } else { s!("0") }
}

/// Accept the export format plus the ISO "T" variant some sheets produce.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, Box<dyn Error>> {
    let t = s.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(t, TIMESTAMP_FMT) {
        return Ok(ts);
    }
    NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("Bad timestamp {:?}: {}", s, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Listing {
        Listing {
            timestamp: parse_timestamp("2025-06-01 18:45:00").unwrap(),
            id: 4217,
            data_centre: s!("Light"),
            category: s!("HighEndDuty"),
            duty: s!("Dragonsong's Reprise"),
            party: vec![
                Slot { filled: true, role: Role::Tank, job: s!("PLD WAR") },
                Slot { filled: false, role: Role::Healer, job: s!("WHM SGE") },
            ],
            tags: Tags { practice: true, ..Tags::default() },
        }
    }

    #[test]
    fn row_round_trip() {
        let l = sample();
        let row = l.to_row().unwrap();
        assert_eq!(row[0], "2025-06-01 18:45:00");
        assert_eq!(row[6], "1"); // [Practice]
        assert_eq!(row[9], "0");
        let back = Listing::from_row(&row).unwrap();
        assert_eq!(back, l);
    }

    #[test]
    fn party_json_field_order_is_stable() {
        let l = sample();
        let row = l.to_row().unwrap();
        assert!(row[5].starts_with(r#"[{"filled":true,"role":"tank","job":"PLD WAR"}"#));
    }

    #[test]
    fn from_row_rejects_malformed_party() {
        let mut row = sample().to_row().unwrap();
        row[5] = s!("{not json");
        assert!(Listing::from_row(&row).is_err());
    }

    #[test]
    fn from_row_rejects_short_rows() {
        assert!(Listing::from_row(&[s!("2025-06-01 18:45:00")]).is_err());
    }
}
