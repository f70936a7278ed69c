use swatch_core::types::{PolishRecord, RankedPolish};
use tracing::{debug, warn};

use crate::hex::parse_hex;

/// Number of nearest colors returned when no explicit limit is configured.
pub const DEFAULT_TOP_N: usize = 15;

/// Ranks `records` by ascending RGB distance to `target` and keeps the first
/// `top_n`.
///
/// Records without a decodable `color_hex` are skipped. Equal distances keep
/// their input order. A malformed `target` yields an empty list.
pub fn rank_by_similarity<'a, I>(records: I, target: &str, top_n: usize) -> Vec<RankedPolish>
where
    I: IntoIterator<Item = &'a PolishRecord>,
{
    let Some(target_rgb) = parse_hex(target) else {
        warn!(color = target, "ignoring malformed target color");
        return Vec::new();
    };

    let mut skipped = 0usize;
    let mut scored: Vec<(f64, &PolishRecord)> = Vec::new();
    for record in records {
        match record.color_hex.as_deref().and_then(parse_hex) {
            Some(rgb) => scored.push((rgb.distance(&target_rgb), record)),
            None => skipped += 1,
        }
    }

    // stable: ties stay in catalog order
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.truncate(top_n);
    debug!(color = %target_rgb, kept = scored.len(), skipped, "ranked by color");

    scored
        .into_iter()
        .map(|(distance, record)| RankedPolish { record: record.clone(), distance: Some(distance) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colored(id: &str, hex: &str) -> PolishRecord {
        let mut r = PolishRecord::new(id, format!("polish {id}"));
        r.color_hex = Some(hex.to_string());
        r
    }

    fn ids(results: &[RankedPolish]) -> Vec<&str> {
        results.iter().map(|r| r.record.id.as_str()).collect()
    }

    #[test]
    fn nearest_first() {
        let catalog = vec![colored("1", "#000000"), colored("2", "#FFFFFF"), colored("3", "#101010")];
        let ranked = rank_by_similarity(&catalog, "#000000", DEFAULT_TOP_N);
        assert_eq!(ids(&ranked), vec!["1", "3", "2"]);
        let d: Vec<f64> = ranked.iter().map(|r| r.distance.unwrap()).collect();
        assert_eq!(d[0], 0.0);
        assert!((d[1] - 27.712_812_921_102_035).abs() < 1e-9);
        assert!((d[2] - 441.672_955_930_063_7).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_input_order() {
        let catalog = vec![colored("a", "#0a0000"), colored("b", "#000a00"), colored("c", "#00000a")];
        let ranked = rank_by_similarity(&catalog, "#000000", DEFAULT_TOP_N);
        assert_eq!(ids(&ranked), vec!["a", "b", "c"]);
    }

    #[test]
    fn uncolored_and_malformed_records_are_skipped() {
        let mut catalog = vec![colored("bad", "not-a-color"), colored("ok", "#123456")];
        catalog.push(PolishRecord::new("none", "no hex"));
        let ranked = rank_by_similarity(&catalog, "#123456", DEFAULT_TOP_N);
        assert_eq!(ids(&ranked), vec!["ok"]);
    }

    #[test]
    fn malformed_target_yields_nothing() {
        let catalog = vec![colored("1", "#000000")];
        assert!(rank_by_similarity(&catalog, "#zzz", DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn truncates_to_top_n() {
        let catalog: Vec<PolishRecord> = (0..20u8).map(|i| colored(&i.to_string(), &format!("#{:02x}0000", i * 10))).collect();
        let ranked = rank_by_similarity(&catalog, "#000000", DEFAULT_TOP_N);
        assert_eq!(ranked.len(), 15);
        assert_eq!(ranked[14].record.id, "14");
        assert_eq!(rank_by_similarity(&catalog, "#000000", 3).len(), 3);
    }
}
