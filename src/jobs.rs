// src/jobs.rs
//
// Combat job table: abbreviations, chart colours, role presets.

pub const NEUTRAL: [u8; 3] = [0xAA, 0xAA, 0xAA];

pub const JOBS: &[(&str, [u8; 3])] = &[
    ("VPR", [0x10, 0x82, 0x10]),
    ("MNK", [0xD6, 0x9C, 0x00]),
    ("DRG", [0x41, 0x64, 0xCD]),
    ("BLM", [0xA5, 0x79, 0xD6]),
    ("SAM", [0xE4, 0x6D, 0x04]),
    ("RPR", [0x96, 0x5A, 0x90]),
    ("NIN", [0xFC, 0x92, 0xE1]),
    ("PCT", [0xFC, 0x92, 0xE1]),
    ("RDM", [0xE8, 0x7B, 0x7B]),
    ("SMN", [0x2D, 0x9B, 0x78]),
    ("DNC", [0xE2, 0xB0, 0xAF]),
    ("BRD", [0x91, 0xBA, 0x5E]),
    ("MCH", [0x6E, 0xE1, 0xD6]),
    ("GNB", [0x79, 0x6D, 0x30]),
    ("PLD", [0xA8, 0xD2, 0xE6]),
    ("DRK", [0xD1, 0x26, 0xCC]),
    ("WAR", [0xCF, 0x26, 0x21]),
    ("AST", [0xFF, 0xE7, 0x4A]),
    ("WHM", [0xFF, 0xF0, 0xDC]),
    ("SGE", [0x80, 0xA0, 0xF0]),
    ("SCH", [0x86, 0x57, 0xFF]),
];

pub const ROLE_PRESETS: &[(&str, &[&str])] = &[
    ("Tanks", &["PLD", "WAR", "DRK", "GNB"]),
    ("Healers", &["WHM", "SCH", "AST", "SGE"]),
    ("Melee", &["MNK", "DRG", "NIN", "SAM", "RPR", "VPR"]),
    ("Ranged", &["BRD", "MCH", "DNC"]),
    ("Caster", &["BLM", "SMN", "RDM", "PCT"]),
];

pub fn is_known(job: &str) -> bool {
    JOBS.iter().any(|(j, _)| *j == job)
}

pub fn color_of(job: &str) -> [u8; 3] {
    JOBS.iter()
        .find(|(j, _)| *j == job)
        .map(|(_, c)| *c)
        .unwrap_or(NEUTRAL)
}

/// Channel-mean blend of the member jobs' colours; neutral grey when the
/// group is empty.
pub fn blend<'a, I: IntoIterator<Item = &'a str>>(jobs: I) -> [u8; 3] {
    let mut sum = [0u32; 3];
    let mut n = 0u32;
    for job in jobs {
        let c = color_of(job);
        for (s, v) in sum.iter_mut().zip(c) {
            *s += v as u32;
        }
        n += 1;
    }
    if n == 0 {
        return NEUTRAL;
    }
    [(sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8]
}
