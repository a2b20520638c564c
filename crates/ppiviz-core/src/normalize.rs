//! Row Normalization
//!
//! Interaction tables come from several pipelines that disagree on field spelling. Every
//! row is reduced here, once, to an [`InteractionRow`]; nothing downstream looks at raw
//! field names. The alias tables below are listed in priority order.
use crate::location::{LocationError, ResidueLocation};
use crate::protein::{DomainProvider, InteractionRow, Protein, Scores, DEFAULT_PROTEIN_LENGTH};
use std::collections::{HashMap, HashSet};

pub const PROTEIN1_FIELDS: &[&str] = &["Protein1", "protein1"];
pub const PROTEIN2_FIELDS: &[&str] = &["Protein2", "protein2"];
pub const ABSOLUTE_LOCATION_FIELDS: &[&str] =
    &["absolute_location", "Absolute_location", "absolute location"];
pub const RELATIVE_LOCATION_FIELDS: &[&str] = &["location", "Location"];
pub const DOMAIN1_FIELDS: &[&str] = &["Protein1_Domain", "protein1_domain"];
pub const DOMAIN2_FIELDS: &[&str] = &["Protein2_Domain", "protein2_domain"];
pub const COUNT_FIELDS: &[&str] = &["contacts", "Contacts"];
const IPTM_FIELDS: &[&str] = &["iptm", "ipTM"];
const MIN_PAE_FIELDS: &[&str] = &["min_pae", "min_PAE"];
const PDOCKQ_FIELDS: &[&str] = &["pdockq", "pDockQ"];
const MAX_PROMISCUITY_FIELDS: &[&str] = &["max_promiscuity", "Max_promiscuity"];

/// Partner keys inside a location literal, matched after lower-casing.
pub const SIDE1_KEYS: &[&str] = &["protein1", "chaina", "chain a"];
pub const SIDE2_KEYS: &[&str] = &["protein2", "chainb", "chain b"];

/// One untyped input row: field name to text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// First non-blank value among `aliases`.
    pub fn get(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.fields.get(*alias))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
    }

    fn number(&self, aliases: &[&str]) -> Option<f64> {
        self.get(aliases)?
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    fn location(&self, aliases: &[&str], index: usize) -> Result<ResidueLocation, LocationError> {
        let text = self.get(aliases).ok_or(LocationError::Absent)?;
        ResidueLocation::parse(text).inspect_err(|err| {
            if !matches!(err, LocationError::Absent) {
                log::warn!("row {}: {}", index, err);
            }
        })
    }
}

impl FromIterator<(String, String)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        RawRow {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Suffix after the last `_F` of a domain id: `"Q9XYZ1_F3"` gives `"3"`.
pub fn fragment_suffix(domain_id: &str) -> String {
    domain_id
        .rfind("_F")
        .map(|index| domain_id[index + 2..].to_string())
        .unwrap_or_default()
}

/// Drawable rows plus what was learned along the way.
#[derive(Clone, Debug, Default)]
pub struct Normalized {
    pub rows: Vec<InteractionRow>,
    /// Rows that could not be drawn.
    pub dropped: usize,
    /// Largest residue index seen per protein, over every input row.
    pub observed_max: HashMap<String, i64>,
}

fn interval(residues: Option<&[i64]>) -> Option<(i64, i64)> {
    let residues = residues?;
    Some((*residues.iter().min()?, *residues.iter().max()?))
}

/// Reduces raw rows to drawable [`InteractionRow`]s.
///
/// A row is dropped, with a warning, when a partner name is missing or a side has no
/// residues. Malformed location literals count as empty and never abort the batch.
pub fn normalize_rows(raw: &[RawRow]) -> Normalized {
    let mut normalized = Normalized::default();

    for (index, row) in raw.iter().enumerate() {
        let (Some(protein1), Some(protein2)) = (row.get(PROTEIN1_FIELDS), row.get(PROTEIN2_FIELDS))
        else {
            log::warn!("row {}: missing partner name, skipped", index);
            normalized.dropped += 1;
            continue;
        };

        let absolute = row
            .location(ABSOLUTE_LOCATION_FIELDS, index)
            .or_else(|err| match err {
                LocationError::Absent => {
                    log::debug!("row {}: no absolute location, using relative", index);
                    row.location(RELATIVE_LOCATION_FIELDS, index)
                }
                err => Err(err),
            })
            .unwrap_or_default();
        let relative = row
            .location(RELATIVE_LOCATION_FIELDS, index)
            .unwrap_or_default();

        let side1 = absolute.side(SIDE1_KEYS);
        let side2 = absolute.side(SIDE2_KEYS);
        for (name, residues) in [(protein1, side1), (protein2, side2)] {
            if let Some(max) = residues.and_then(|r| r.iter().max()) {
                let entry = normalized.observed_max.entry(name.to_string()).or_insert(0);
                *entry = (*entry).max(*max);
            }
        }

        let (Some(res1), Some(res2)) = (interval(side1), interval(side2)) else {
            log::warn!(
                "row {} ({} / {}): no residues for one side, skipped",
                index,
                protein1,
                protein2
            );
            normalized.dropped += 1;
            continue;
        };

        let shift = |absolute: Option<&[i64]>, relative: Option<&[i64]>| {
            Some(absolute?.first()? - relative?.first()?)
        };

        normalized.rows.push(InteractionRow {
            protein1: protein1.to_string(),
            protein2: protein2.to_string(),
            res1,
            res2,
            absolute1: side1.map(<[i64]>::to_vec).unwrap_or_default(),
            absolute2: side2.map(<[i64]>::to_vec).unwrap_or_default(),
            shift1: shift(side1, relative.side(SIDE1_KEYS)),
            shift2: shift(side2, relative.side(SIDE2_KEYS)),
            fragment1: row.get(DOMAIN1_FIELDS).map(fragment_suffix).unwrap_or_default(),
            fragment2: row.get(DOMAIN2_FIELDS).map(fragment_suffix).unwrap_or_default(),
            scores: Scores {
                iptm: row.number(IPTM_FIELDS),
                min_pae: row.number(MIN_PAE_FIELDS),
                pdockq: row.number(PDOCKQ_FIELDS),
                max_promiscuity: row.number(MAX_PROMISCUITY_FIELDS),
            },
            count: row.get(COUNT_FIELDS).unwrap_or_default().to_string(),
            source_index: index,
        });
    }

    if normalized.dropped > 0 {
        log::warn!(
            "{} of {} interaction rows could not be drawn",
            normalized.dropped,
            raw.len()
        );
    }
    normalized
}

/// Proteins of the drawable rows in first-appearance order, with resolved lengths.
///
/// Length resolution: the provider's length if positive, else the largest observed
/// residue index, else [`DEFAULT_PROTEIN_LENGTH`].
pub fn resolve_proteins(normalized: &Normalized, provider: &dyn DomainProvider) -> Vec<Protein> {
    let mut proteins: Vec<Protein> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for row in &normalized.rows {
        for name in [&row.protein1, &row.protein2] {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let length = provider
                .length(name)
                .filter(|&length| length > 0)
                .or_else(|| {
                    normalized
                        .observed_max
                        .get(name.as_str())
                        .filter(|&&max| max > 0)
                        .map(|&max| max.min(u32::MAX as i64) as u32)
                })
                .unwrap_or_else(|| {
                    log::warn!("no length for {}, using {}", name, DEFAULT_PROTEIN_LENGTH);
                    DEFAULT_PROTEIN_LENGTH
                });
            proteins.push(Protein::new(name.clone(), length));
        }
    }
    proteins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protein::{Domain, NoDomains};

    struct Lengths(HashMap<String, u32>);

    impl DomainProvider for Lengths {
        fn length(&self, protein: &str) -> Option<u32> {
            self.0.get(protein).copied()
        }
        fn domains(&self, _protein: &str) -> Vec<Domain> {
            vec![]
        }
    }

    fn row(p1: &str, p2: &str, location: &str) -> RawRow {
        RawRow::new()
            .with("Protein1", p1)
            .with("Protein2", p2)
            .with("absolute_location", location)
    }

    #[test]
    fn test_capitalized_field_wins() {
        let raw = RawRow::new()
            .with("Protein1", "A")
            .with("protein1", "a")
            .with("protein2", "b");
        assert_eq!(raw.get(PROTEIN1_FIELDS), Some("A"));
        assert_eq!(raw.get(PROTEIN2_FIELDS), Some("b"));

        let blank = RawRow::new().with("Protein1", " ").with("protein1", "a");
        assert_eq!(blank.get(PROTEIN1_FIELDS), Some("a"));
    }

    #[test]
    fn test_normalize_row() {
        let raw = row("A", "B", "{'Protein1': [12, 10, 20], 'Protein2': [100, 120]}")
            .with("location", "{'Protein1': [2, 3], 'Protein2': [1, 21]}")
            .with("Protein1_Domain", "A_F2")
            .with("iptm", "0.8312")
            .with("min_pae", "n/a")
            .with("contacts", "17");
        let normalized = normalize_rows(&[raw]);
        assert_eq!(normalized.dropped, 0);
        let row = &normalized.rows[0];
        assert_eq!(row.res1, (10, 20));
        assert_eq!(row.res2, (100, 120));
        assert_eq!(row.shift1, Some(10));
        assert_eq!(row.shift2, Some(99));
        assert_eq!(row.fragment1, "2");
        assert_eq!(row.fragment2, "");
        assert_eq!(row.scores.iptm, Some(0.8312));
        assert_eq!(row.scores.min_pae, None);
        assert_eq!(row.count, "17");
    }

    #[test]
    fn test_rows_without_both_sides_are_dropped() {
        let raw = vec![
            row("A", "B", "{'Protein1': [1, 2], 'Protein2': []}"),
            row("A", "B", "{'ChainA': [3, 4], 'ChainB': [7]}"),
            row("A", "B", "{'Protein1': [1, 2"),
            RawRow::new().with("Protein1", "A"),
        ];
        let normalized = normalize_rows(&raw);
        assert_eq!(normalized.rows.len(), 1);
        assert_eq!(normalized.dropped, 3);
        assert_eq!(normalized.rows[0].res1, (3, 4));
        assert_eq!(normalized.rows[0].source_index, 1);
    }

    #[test]
    fn test_relative_location_fallback() {
        let raw = RawRow::new()
            .with("protein1", "A")
            .with("protein2", "B")
            .with("location", "{'chain a': [4], 'chain b': [8, 9]}");
        let normalized = normalize_rows(&[raw]);
        assert_eq!(normalized.rows[0].res1, (4, 4));
        assert_eq!(normalized.rows[0].shift1, Some(0));
    }

    #[test]
    fn test_fragment_suffix() {
        assert_eq!(fragment_suffix("P12345_F3"), "3");
        assert_eq!(fragment_suffix("X_F1_F12"), "12");
        assert_eq!(fragment_suffix("P12345"), "");
    }

    #[test]
    fn test_length_resolution_order() {
        let raw = vec![
            row("A", "B", "{'Protein1': [10, 80], 'Protein2': [5, 6]}"),
            row("C", "B", "{'Protein1': [300], 'Protein2': [140]}"),
            // dropped, but its coordinates still count towards A's observed length
            row("B", "A", "{'Protein1': [], 'Protein2': [95]}"),
        ];
        let normalized = normalize_rows(&raw);
        let table = Lengths(HashMap::from([("B".to_string(), 500), ("C".to_string(), 0)]));
        let proteins = resolve_proteins(&normalized, &table);
        assert_eq!(
            proteins,
            vec![
                Protein::new("A", 95),
                Protein::new("B", 500),
                Protein::new("C", 300)
            ]
        );
    }

    #[test]
    fn test_default_length_fallback() {
        let mut normalized = normalize_rows(&[row("A", "B", "{'Protein1': [1], 'Protein2': [2]}")]);
        normalized.observed_max.clear();
        let proteins = resolve_proteins(&normalized, &NoDomains);
        assert!(proteins.iter().all(|p| p.length == DEFAULT_PROTEIN_LENGTH));
    }

    #[test]
    fn test_many_rows_list_each_protein_once() {
        let raw: Vec<RawRow> = (0..200)
            .map(|i| {
                row(
                    &format!("P{}", i % 7),
                    &format!("P{}", (i + 3) % 7),
                    "{'Protein1': [1], 'Protein2': [2]}",
                )
            })
            .collect();
        let proteins = resolve_proteins(&normalize_rows(&raw), &NoDomains);
        let names: Vec<&str> = proteins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["P0", "P3", "P1", "P4", "P2", "P5", "P6"]);
    }
}
