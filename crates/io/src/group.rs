// Group selection over a validated table

use serde::Serialize;

use crate::schema::{GROUP_COLUMN, SPECIES_COLUMN};
use crate::table::Table;

/// A row narrowed to the two fields the reconciliation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationRecord {
    pub group: String,
    pub species_name: String,
}

/// Distinct non-null values of the group column, in first-seen order.
pub fn distinct_groups(table: &Table) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for row in &table.rows {
        if let Some(group) = row.get(GROUP_COLUMN) {
            if !groups.iter().any(|g| g == group) {
                groups.push(group.to_string());
            }
        }
    }
    groups
}

/// Rows belonging to `group`, with null species names excluded.
///
/// Duplicate species are kept; uniqueness is the engine's concern.
pub fn select_group(table: &Table, group: &str) -> Vec<ObservationRecord> {
    table
        .rows
        .iter()
        .filter(|row| row.get(GROUP_COLUMN) == Some(group))
        .filter_map(|row| {
            row.get(SPECIES_COLUMN).map(|species| ObservationRecord {
                group: group.to_string(),
                species_name: species.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_table;

    fn table() -> Table {
        parse_table(
            "\
componente_biologico,especie
fauna,Puma concolor
flora,Cedrela odorata
fauna,
,Tapirus terrestris
fauna,Puma concolor
aves,Vultur gryphus
fauna,Puma concolor sp.
",
            b',',
        )
        .unwrap()
    }

    #[test]
    fn groups_in_first_seen_order_without_nulls() {
        assert_eq!(distinct_groups(&table()), vec!["fauna", "flora", "aves"]);
    }

    #[test]
    fn select_excludes_null_species_and_other_groups() {
        let records = select_group(&table(), "fauna");
        let names: Vec<&str> = records.iter().map(|r| r.species_name.as_str()).collect();
        assert_eq!(names, vec!["Puma concolor", "Puma concolor", "Puma concolor sp."]);
        assert!(records.iter().all(|r| r.group == "fauna"));
    }

    #[test]
    fn select_unknown_group_is_empty() {
        assert!(select_group(&table(), "hongos").is_empty());
    }

    #[test]
    fn na_markers_are_treated_as_missing() {
        let t = parse_table(
            "componente_biologico,especie\nNA,Tapirus terrestris\nfauna,NA\nfauna,Puma concolor\nnull,Vultur gryphus\n",
            b',',
        )
        .unwrap();
        assert_eq!(distinct_groups(&t), vec!["fauna"]);
        let records = select_group(&t, "fauna");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].species_name, "Puma concolor");
    }
}
