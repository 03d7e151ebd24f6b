// src/scrape.rs
//
// One scrape pass: fetch the Party Finder page, extract listing blocks,
// append to the dated export file.
//
// Assumptions (by design, matching the page markup):
// - a listing is `<div class="listing" data-id=.. data-centre=.. data-pf-category=..>`
// - the block runs to the first `</div>` followed only by whitespace and
//   another `</div>`
// - slots are `<div class="slot ...">` tags with the job(s) in `title`

use std::error::Error;
use std::path::PathBuf;

use chrono::{NaiveDateTime, Utc};

use crate::config::options::ScrapeOptions;
use crate::core::html::{attr_value, find_ci, find_double_close, open_tag_at, slice_between_ci, strip_tags};
use crate::core::net;
use crate::core::sanitize::decode_entities;
use crate::listing::{Listing, Role, Slot, Tags};
use crate::progress::Progress;
use crate::store;
use crate::timeline::floor_bucket;

const LISTING_OPEN: &str = r#"<div class="listing""#;
const SLOT_OPEN: &str = r#"<div class="slot"#;

/// Extract all listing records from a page, stamped with `timestamp`.
/// Blocks missing their identifying attributes are skipped with a warning.
pub fn extract_listings(doc: &str, timestamp: NaiveDateTime) -> Vec<Listing> {
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some(start) = find_ci(doc, LISTING_OPEN, pos) {
        let Some(tag) = open_tag_at(doc, start) else { break };
        let tag_end = start + tag.len();

        let Some(end) = find_double_close(doc, tag_end, "</div>") else { break };
        pos = end;

        let id = match attr_value(tag, "data-id").map(|v| v.parse::<u64>()) {
            Some(Ok(v)) => v,
            _ => {
                logw!("Scrape: listing block without numeric data-id, skipping");
                continue;
            }
        };
        let (Some(dc), Some(category)) = (
            attr_value(tag, "data-centre"),
            attr_value(tag, "data-pf-category"),
        ) else {
            logw!("Scrape: listing {} missing data-centre/category, skipping", id);
            continue;
        };

        let block = &doc[start..end];
        out.push(Listing {
            timestamp,
            id,
            data_centre: s!(dc),
            category: s!(category),
            duty: extract_duty(block),
            party: extract_slots(block),
            tags: extract_tags(block),
        });
    }

    out
}

fn extract_duty(block: &str) -> String {
    slice_between_ci(block, r#"<div class="duty"#, "</div>")
        .map(|inner| strip_tags(decode_entities(inner)))
        .unwrap_or_default()
}

fn extract_slots(block: &str) -> Vec<Slot> {
    let mut slots = Vec::new();
    let mut pos = 0usize;

    while let Some(start) = find_ci(block, SLOT_OPEN, pos) {
        let Some(tag) = open_tag_at(block, start) else { break };
        pos = start + tag.len();

        let classes = attr_value(tag, "class").unwrap_or("");
        // the page always titles real slots; a bare tag is decoration
        let Some(job) = attr_value(tag, "title") else { continue };
        slots.push(Slot {
            filled: classes.contains("filled"),
            role: Role::from_classes(classes),
            job: s!(job),
        });
    }

    slots
}

fn extract_tags(block: &str) -> Tags {
    Tags {
        practice: block.contains("[Practice]"),
        loot: block.contains("[Loot]"),
        duty_completion: block.contains("[Duty Completion]"),
        one_player_per_job: block.contains("[One Player per Job]"),
    }
}

/// Fetch the page and append the extracted listings to the dated export
/// file. Returns the file path and how many listings this pass added.
pub fn run(
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Option<(PathBuf, usize)>, Box<dyn Error>> {
    let bucket = floor_bucket(Utc::now().naive_utc());

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching http://{}{}", opts.host, opts.path));
    }
    let doc = net::http_get(&opts.host, &opts.path)?;

    let listings = extract_listings(&doc, bucket);
    logf!("Scrape: {} listings at {}", listings.len(), bucket);

    if listings.is_empty() {
        logw!("Scrape: no listings found, nothing written");
        if let Some(p) = progress.as_deref_mut() {
            p.log("No listings found");
        }
        return Ok(None);
    }

    let (path, added) = store::append_day_file(&opts.out_dir, &listings)?;
    logf!("Scrape: {} new rows → {}", added, path.display());
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Saved {} listings to {}", added, path.display()));
        p.finish();
    }
    Ok(Some((path, added)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::parse_timestamp;

    const PAGE: &str = r#"
        <div class="listings">
          <div class="listing" data-id="101" data-centre="Light" data-pf-category="HighEndDuty">
            <div class="left">
              <div class="duty cross">Dragonsong&#x27;s Reprise (Ultimate)</div>
              <div class="description">[Practice] P1 prog [One Player per Job]</div>
              <div class="party">
                <div class="slot filled tank" title="PLD"></div>
                <div class="slot dps" title="SAM RPR VPR"></div>
                <div class="slot healer" title="WHM SGE"></div>
              </div>
            </div>
          </div>
          <div class="listing" data-id="abc" data-centre="Light" data-pf-category="Other">
            <div class="duty">Bad id</div>
          </div>
          <div class="listing" data-id="102" data-centre="Chaos" data-pf-category="DungeonsGuildhestsTrials">
            <div class="duty">Sastasha</div>
            <div class="party">
              <div class="slot filled dps" title="BLM"></div>
            </div>
          </div>
        </div>
    "#;

    fn ts() -> NaiveDateTime {
        parse_timestamp("2025-06-01 18:45:00").unwrap()
    }

    #[test]
    fn extracts_listing_fields() {
        let listings = extract_listings(PAGE, ts());
        assert_eq!(listings.len(), 2); // non-numeric id skipped

        let l = &listings[0];
        assert_eq!(l.id, 101);
        assert_eq!(l.data_centre, "Light");
        assert_eq!(l.category, "HighEndDuty");
        assert_eq!(l.duty, "Dragonsong's Reprise (Ultimate)");
        assert_eq!(l.timestamp, ts());
    }

    #[test]
    fn extracts_slots_with_roles_and_fill() {
        let listings = extract_listings(PAGE, ts());
        let party = &listings[0].party;
        assert_eq!(party.len(), 3);
        assert_eq!(party[0], Slot { filled: true, role: Role::Tank, job: s!("PLD") });
        assert_eq!(party[1], Slot { filled: false, role: Role::Dps, job: s!("SAM RPR VPR") });
        assert_eq!(party[2], Slot { filled: false, role: Role::Healer, job: s!("WHM SGE") });
    }

    #[test]
    fn extracts_tags_from_block_text() {
        let listings = extract_listings(PAGE, ts());
        let tags = listings[0].tags;
        assert!(tags.practice);
        assert!(tags.one_player_per_job);
        assert!(!tags.loot);
        assert!(!tags.duty_completion);

        assert_eq!(listings[1].tags, Tags::default());
    }

    #[test]
    fn second_listing_parsed_independently() {
        let listings = extract_listings(PAGE, ts());
        let l = &listings[1];
        assert_eq!(l.id, 102);
        assert_eq!(l.data_centre, "Chaos");
        assert_eq!(l.duty, "Sastasha");
        assert_eq!(l.party.len(), 1);
        assert!(l.party[0].filled);
    }

    #[test]
    fn untitled_slot_tags_are_skipped() {
        let page = r#"
            <div class="listing" data-id="8" data-centre="Light" data-pf-category="HighEndDuty">
              <div class="duty">UCoB</div>
              <div class="party">
                <div class="slot summary"></div>
                <div class="slot healer" title="WHM SGE"></div>
              </div>
            </div>
        "#;
        let listings = extract_listings(page, ts());
        assert_eq!(listings.len(), 1);
        let party = &listings[0].party;
        assert_eq!(party.len(), 1);
        assert_eq!(party[0].job, "WHM SGE");
    }

    #[test]
    fn empty_page_yields_no_listings() {
        assert!(extract_listings("<html><body>maintenance</body></html>", ts()).is_empty());
    }

    #[test]
    fn unknown_role_classes() {
        let page = r#"
            <div class="listing" data-id="7" data-centre="Aether" data-pf-category="Other">
              <div class="duty">FATE train</div>
              <div class="slot empty" title=""></div>
            </div>
            </div>
        "#;
        // the block terminator needs the trailing close pair above
        let listings = extract_listings(page, ts());
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].party[0].role, Role::Unknown);
    }
}
