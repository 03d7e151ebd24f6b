// src/timeline.rs
//
// Bucketing and the group aggregation: per 15-minute bucket, per job
// group, how many listings still have an unfilled slot for that group.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::config::consts::BUCKET_MINUTES;
use crate::listing::Listing;

/// Floor to the previous bucket boundary (seconds dropped).
pub fn floor_bucket(ts: NaiveDateTime) -> NaiveDateTime {
    let m = ts.minute() - ts.minute() % BUCKET_MINUTES;
    ts.date().and_hms_opt(ts.hour(), m, 0).unwrap_or(ts)
}

/// Bucket shifted into the display timezone. Raw timestamps (sheets can
/// hold unfloored times) are floored here, so a row at 18:47:23 lands in
/// the 18:45 bucket.
pub fn local_bucket(ts: NaiveDateTime, tz_offset_min: i32) -> NaiveDateTime {
    floor_bucket(ts) + Duration::minutes(tz_offset_min as i64)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    None,
    Practice,
    DutyCompletion,
    Loot,
}

impl TagFilter {
    pub const ALL: [TagFilter; 4] = [
        TagFilter::None,
        TagFilter::Practice,
        TagFilter::DutyCompletion,
        TagFilter::Loot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TagFilter::None => "None",
            TagFilter::Practice => "[Practice]",
            TagFilter::DutyCompletion => "[Duty Completion]",
            TagFilter::Loot => "[Loot]",
        }
    }

    pub fn matches(&self, l: &Listing) -> bool {
        match self {
            TagFilter::None => true,
            TagFilter::Practice => l.tags.practice,
            TagFilter::DutyCompletion => l.tags.duty_completion,
            TagFilter::Loot => l.tags.loot,
        }
    }
}

/// Sidebar filter state applied before aggregation. Dates are in the
/// display timezone.
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub data_centre: Option<String>,
    /// None leaves duties unrestricted; Some is a strict allow-list, so
    /// an empty selection matches nothing until the user picks duties.
    pub duties: Option<Vec<String>>,
    pub tag: TagFilter,
    pub tz_offset_min: i32,
}

impl FilterSet {
    pub fn matches(&self, l: &Listing) -> bool {
        let date = local_bucket(l.timestamp, self.tz_offset_min).date();
        if let Some(start) = self.start_date {
            if date < start { return false; }
        }
        if let Some(end) = self.end_date {
            if date > end { return false; }
        }
        if let Some(dc) = &self.data_centre {
            if &l.data_centre != dc { return false; }
        }
        if let Some(duties) = &self.duties {
            if !duties.iter().any(|d| d == &l.duty) {
                return false;
            }
        }
        self.tag.matches(l)
    }

    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Does this listing still seek at least one job from `jobs`?
///
/// With [One Player per Job] set, a group whose every member job already
/// appears among the filled slots can no longer be recruited from, even
/// if an unfilled slot nominally lists one of them.
pub fn listing_matches_group(l: &Listing, jobs: &[String]) -> bool {
    if jobs.is_empty() {
        return false;
    }

    if l.tags.one_player_per_job {
        let filled_jobs: HashSet<&str> = l
            .party
            .iter()
            .filter(|s| s.filled)
            .flat_map(|s| s.jobs())
            .collect();
        if jobs.iter().all(|j| filled_jobs.contains(j.as_str())) {
            return false;
        }
    }

    l.party
        .iter()
        .any(|s| !s.filled && s.jobs().any(|j| jobs.iter().any(|g| g == j)))
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupSeries {
    pub label: String,
    pub jobs: Vec<String>,
    /// (bucket in display timezone, matching listing count)
    pub points: Vec<(NaiveDateTime, u32)>,
    pub average: f64,
}

/// Per bucket, per group: count of listings still unfulfilled for the
/// group. Every bucket present in `listings` appears in every series, so
/// zero-match buckets plot as zero instead of a gap.
pub fn build_series(
    listings: &[&Listing],
    groups: &[(String, Vec<String>)],
    tz_offset_min: i32,
) -> Vec<GroupSeries> {
    let buckets: BTreeSet<NaiveDateTime> = listings
        .iter()
        .map(|l| local_bucket(l.timestamp, tz_offset_min))
        .collect();

    groups
        .iter()
        .map(|(label, jobs)| {
            let mut counts: BTreeMap<NaiveDateTime, u32> =
                buckets.iter().map(|b| (*b, 0)).collect();
            for l in listings {
                if listing_matches_group(l, jobs) {
                    let b = local_bucket(l.timestamp, tz_offset_min);
                    if let Some(c) = counts.get_mut(&b) {
                        *c += 1;
                    }
                }
            }

            let points: Vec<(NaiveDateTime, u32)> = counts.into_iter().collect();
            let average = if points.is_empty() {
                0.0
            } else {
                points.iter().map(|(_, c)| *c as f64).sum::<f64>() / points.len() as f64
            };

            GroupSeries {
                label: label.clone(),
                jobs: jobs.clone(),
                points,
                average,
            }
        })
        .collect()
}

/// Job abbreviations actually observed in the given listings, restricted
/// to the known combat job table, sorted.
pub fn observed_jobs(listings: &[&Listing]) -> Vec<String> {
    let mut jobs: BTreeSet<String> = BTreeSet::new();
    for l in listings {
        for slot in &l.party {
            for j in slot.jobs() {
                if crate::jobs::is_known(j) {
                    jobs.insert(s!(j));
                }
            }
        }
    }
    jobs.into_iter().collect()
}
