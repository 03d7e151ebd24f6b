// benches/parse.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pftrack::listing::parse_timestamp;
use pftrack::scrape;

fn synthetic_page(listings: usize) -> String {
    let mut doc = String::from(r#"<div class="listings">"#);
    for i in 0..listings {
        doc.push_str(&format!(
            r#"
            <div class="listing" data-id="{}" data-centre="Light" data-pf-category="HighEndDuty">
              <div class="duty cross">The Omega Protocol (Ultimate)</div>
              <div class="description">[Practice] phase {} prog</div>
              <div class="party">
                <div class="slot filled tank" title="PLD WAR DRK GNB"></div>
                <div class="slot filled healer" title="WHM SCH AST SGE"></div>
                <div class="slot dps" title="MNK DRG NIN SAM RPR VPR"></div>
                <div class="slot dps" title="BLM SMN RDM PCT"></div>
              </div>
            </div>"#,
            i,
            i % 6 + 1
        ));
    }
    doc.push_str("</div>");
    doc
}

fn bench_extract(c: &mut Criterion) {
    let ts = parse_timestamp("2025-06-01 18:45:00").unwrap();

    for n in [50usize, 400] {
        let doc = synthetic_page(n);
        c.bench_function(&format!("extract_listings_{}", n), |b| {
            b.iter(|| {
                let listings = scrape::extract_listings(black_box(&doc), ts);
                black_box(listings.len())
            })
        });
    }
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
