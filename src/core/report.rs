use crate::models::{CommissionEntry, SalesPerson, SalesPersonFilter};
use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;

/// Restrict entries to one salesperson; `All` is an identity passthrough
pub fn filter_by_sales_person(
    entries: &[CommissionEntry],
    filter: &SalesPersonFilter,
) -> Vec<CommissionEntry> {
    match filter {
        SalesPersonFilter::All => entries.to_vec(),
        SalesPersonFilter::Id(id) => entries
            .iter()
            .filter(|entry| entry.sales_person_id == *id)
            .cloned()
            .collect(),
    }
}

/// Case-insensitive substring search over invoice number, client name,
/// salesperson name and proposal number. A blank query matches everything.
pub fn filter_by_search(entries: &[CommissionEntry], query: &str) -> Vec<CommissionEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|entry| {
            entry.invoice_number.to_lowercase().contains(&needle)
                || entry.client_name.to_lowercase().contains(&needle)
                || entry.sales_person_name.to_lowercase().contains(&needle)
                || entry.proposal_number.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Sum of commission amounts over the given entries.
///
/// Decimal accumulation; order of the input never changes the result.
pub fn total_commission(entries: &[CommissionEntry]) -> BigDecimal {
    entries
        .iter()
        .fold(BigDecimal::zero(), |acc, entry| acc + &entry.commission_amount)
}

/// Commission total restricted to one salesperson
pub fn total_by_sales_person(entries: &[CommissionEntry], sales_person_id: &str) -> BigDecimal {
    entries
        .iter()
        .filter(|entry| entry.sales_person_id == sales_person_id)
        .fold(BigDecimal::zero(), |acc, entry| acc + &entry.commission_amount)
}

/// Unique salespersons in order of first appearance, each with the name
/// carried by that first entry
pub fn distinct_sales_persons(entries: &[CommissionEntry]) -> Vec<SalesPerson> {
    let mut seen: IndexMap<&str, &str> = IndexMap::new();
    for entry in entries {
        seen.entry(entry.sales_person_id.as_str())
            .or_insert(entry.sales_person_name.as_str());
    }

    seen.into_iter()
        .map(|(id, name)| SalesPerson {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn create_entry(invoice_id: &str, sales_person: (&str, &str), commission: &str) -> CommissionEntry {
        CommissionEntry {
            invoice_id: invoice_id.to_string(),
            invoice_number: format!("INV-{}", invoice_id),
            proposal_id: format!("p-{}", invoice_id),
            proposal_number: format!("PROP-{}", invoice_id),
            client_name: "Acme Construction".to_string(),
            sales_person_id: sales_person.0.to_string(),
            sales_person_name: sales_person.1.to_string(),
            invoice_total: BigDecimal::from(10_000),
            general_conditions: BigDecimal::from(500),
            supervision_fee: BigDecimal::from(300),
            base_amount: BigDecimal::from(9_200),
            commission_rate: 0.05,
            commission_amount: BigDecimal::from_str(commission).unwrap(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            paid_date: None,
        }
    }

    #[test]
    fn test_filter_all_is_identity() {
        let entries = vec![
            create_entry("i1", ("s1", "Alice"), "460.00"),
            create_entry("i2", ("s2", "Bob"), "120.00"),
        ];

        let filtered = filter_by_sales_person(&entries, &SalesPersonFilter::All);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].invoice_id, "i1");
        assert_eq!(filtered[1].invoice_id, "i2");
    }

    #[test]
    fn test_filter_by_id() {
        let entries = vec![
            create_entry("i1", ("s1", "Alice"), "460.00"),
            create_entry("i2", ("s2", "Bob"), "120.00"),
        ];

        let filtered =
            filter_by_sales_person(&entries, &SalesPersonFilter::Id("s2".to_string()));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].sales_person_name, "Bob");

        let empty =
            filter_by_sales_person(&entries, &SalesPersonFilter::Id("ghost".to_string()));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let entries = vec![
            create_entry("i1", ("s1", "Alice"), "460.00"),
            create_entry("i2", ("s2", "Bob"), "120.00"),
        ];

        assert_eq!(filter_by_search(&entries, "aLiCe").len(), 1);
        assert_eq!(filter_by_search(&entries, "inv-i2").len(), 1);
        assert_eq!(filter_by_search(&entries, "acme").len(), 2);
        assert_eq!(filter_by_search(&entries, "prop-i1").len(), 1);
        assert!(filter_by_search(&entries, "nothing").is_empty());
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let entries = vec![create_entry("i1", ("s1", "Alice"), "460.00")];

        assert_eq!(filter_by_search(&entries, "").len(), 1);
        assert_eq!(filter_by_search(&entries, "   ").len(), 1);
    }

    #[test]
    fn test_total_commission() {
        assert_eq!(total_commission(&[]), BigDecimal::zero());

        let mut entries = vec![
            create_entry("i1", ("s1", "Alice"), "460.00"),
            create_entry("i2", ("s2", "Bob"), "120.50"),
            create_entry("i3", ("s1", "Alice"), "-20.00"),
        ];

        let total = total_commission(&entries);
        assert_eq!(total, BigDecimal::from_str("560.50").unwrap());

        // Order-independent
        entries.reverse();
        assert_eq!(total_commission(&entries), total);
    }

    #[test]
    fn test_total_by_sales_person() {
        let entries = vec![
            create_entry("i1", ("s1", "Alice"), "460.00"),
            create_entry("i2", ("s2", "Bob"), "120.50"),
            create_entry("i3", ("s1", "Alice"), "40.00"),
        ];

        assert_eq!(
            total_by_sales_person(&entries, "s1"),
            BigDecimal::from_str("500.00").unwrap()
        );
        assert_eq!(total_by_sales_person(&entries, "ghost"), BigDecimal::zero());
    }

    #[test]
    fn test_distinct_sales_persons_first_appearance_order() {
        let entries = vec![
            create_entry("i1", ("s2", "Bob"), "120.00"),
            create_entry("i2", ("s1", "Alice"), "460.00"),
            create_entry("i3", ("s2", "Bobby"), "10.00"),
        ];

        let persons = distinct_sales_persons(&entries);

        assert_eq!(
            persons,
            vec![
                SalesPerson {
                    id: "s2".to_string(),
                    name: "Bob".to_string()
                },
                SalesPerson {
                    id: "s1".to_string(),
                    name: "Alice".to_string()
                },
            ]
        );
    }
}
