// tests/aggregation.rs
//
// The full pipeline feeding the chart: markup → CSV round trip →
// filters → per-bucket group counts.

use std::fs;
use std::path::PathBuf;

use pftrack::listing::parse_timestamp;
use pftrack::timeline::{self, FilterSet, TagFilter};
use pftrack::{scrape, store};

const BUCKET_A: &str = "2025-06-01 18:45:00";
const BUCKET_B: &str = "2025-06-01 19:00:00";

// One listing seeking WHM/SGE; one [One Player per Job] listing whose WHM
// is already taken; one unrelated DPS listing.
const PAGE: &str = r#"
    <div class="listing" data-id="1" data-centre="Light" data-pf-category="HighEndDuty">
      <div class="duty">The Omega Protocol (Ultimate)</div>
      <div class="party">
        <div class="slot filled tank" title="PLD"></div>
        <div class="slot healer" title="WHM SGE"></div>
      </div>
    </div>
    <div class="listing" data-id="2" data-centre="Light" data-pf-category="HighEndDuty">
      <div class="duty">The Omega Protocol (Ultimate)</div>
      <div class="description">[One Player per Job]</div>
      <div class="party">
        <div class="slot filled healer" title="WHM"></div>
        <div class="slot healer" title="WHM"></div>
      </div>
    </div>
    <div class="listing" data-id="3" data-centre="Chaos" data-pf-category="HighEndDuty">
      <div class="duty">The Omega Protocol (Ultimate)</div>
      <div class="party">
        <div class="slot dps" title="BLM"></div>
      </div>
    </div>
"#;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("pftrack_agg_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn group(jobs: &[&str]) -> (String, Vec<String>) {
    ("Group 1".to_string(), jobs.iter().map(|j| j.to_string()).collect())
}

#[test]
fn whm_series_counts_only_open_whm_listings() {
    let dir = tmp_dir("whm_series");
    store::append_day_file(&dir, &scrape::extract_listings(PAGE, parse_timestamp(BUCKET_A).unwrap())).unwrap();
    store::append_day_file(&dir, &scrape::extract_listings(PAGE, parse_timestamp(BUCKET_B).unwrap())).unwrap();

    let all = store::load_dir(&dir).unwrap();
    assert_eq!(all.len(), 6);

    let filter = FilterSet::default();
    let filtered = filter.apply(&all);
    let series = timeline::build_series(&filtered, &[group(&["WHM"])], 0);

    // Listing 1 seeks WHM; listing 2's WHM group is excluded by the
    // one-player-per-job rule; listing 3 never matches.
    let s = &series[0];
    assert_eq!(
        s.points,
        vec![
            (parse_timestamp(BUCKET_A).unwrap(), 1),
            (parse_timestamp(BUCKET_B).unwrap(), 1),
        ]
    );
    assert!((s.average - 1.0).abs() < 1e-9);
}

#[test]
fn data_centre_filter_scopes_the_series() {
    let all = scrape::extract_listings(PAGE, parse_timestamp(BUCKET_A).unwrap());

    let chaos = FilterSet { data_centre: Some("Chaos".to_string()), ..FilterSet::default() };
    let filtered = chaos.apply(&all);
    let series = timeline::build_series(&filtered, &[group(&["BLM"]), group(&["WHM"])], 0);

    assert_eq!(series[0].points, vec![(parse_timestamp(BUCKET_A).unwrap(), 1)]);
    assert_eq!(series[1].points, vec![(parse_timestamp(BUCKET_A).unwrap(), 0)]);
}

#[test]
fn tag_filter_narrows_before_counting() {
    let all = scrape::extract_listings(PAGE, parse_timestamp(BUCKET_A).unwrap());

    let f = FilterSet { tag: TagFilter::Practice, ..FilterSet::default() };
    assert!(f.apply(&all).is_empty());
}

#[test]
fn observed_jobs_reflect_filtered_data() {
    let all = scrape::extract_listings(PAGE, parse_timestamp(BUCKET_A).unwrap());

    let light = FilterSet { data_centre: Some("Light".to_string()), ..FilterSet::default() };
    let filtered = light.apply(&all);
    assert_eq!(timeline::observed_jobs(&filtered), vec!["PLD", "SGE", "WHM"]);
}
