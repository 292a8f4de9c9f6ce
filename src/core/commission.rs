use crate::models::{ClientApproval, CommissionEntry, Invoice, InvoiceStatus, ManagementApproval, Proposal};
use bigdecimal::{BigDecimal, RoundingMode};
use std::collections::HashMap;

/// Default commission rate in basis points (500 = 5%)
pub const DEFAULT_COMMISSION_RATE_BPS: u32 = 500;

/// A proposal is won iff both management and the client approved it
#[inline]
pub fn is_won(proposal: &Proposal) -> bool {
    proposal.management_approval == ManagementApproval::Approved
        && proposal.client_approval == Some(ClientApproval::Approved)
}

/// Derives commission entries from invoices and proposals.
///
/// The rate is expressed in basis points so that the configured fraction is
/// exact in decimal arithmetic; commission amounts are rounded to cents with
/// half-even (banker's) rounding.
#[derive(Debug, Clone)]
pub struct CommissionEngine {
    rate: BigDecimal,
    rate_f64: f64,
}

impl CommissionEngine {
    pub fn new(rate_bps: u32) -> Self {
        Self {
            rate: BigDecimal::from(rate_bps) / BigDecimal::from(10_000u32),
            rate_f64: f64::from(rate_bps) / 10_000.0,
        }
    }

    /// Compute the commission entry for one invoice, if it qualifies.
    ///
    /// Returns `None` when the invoice is not paid, carries no proposal id,
    /// the given proposal is not the one it references, or the proposal is
    /// not won. The invoice author is treated as the salesperson of record.
    /// `paid_date` is taken from `approved_at`; the legacy schema stores the
    /// paid timestamp under that name and the mapping is kept as-is.
    pub fn compute_entry(&self, invoice: &Invoice, proposal: &Proposal) -> Option<CommissionEntry> {
        if invoice.status != InvoiceStatus::Paid {
            return None;
        }

        let proposal_id = invoice.proposal_id.as_deref()?;
        if proposal_id != proposal.id {
            return None;
        }
        if !is_won(proposal) {
            return None;
        }

        // Pass-through costs are not commissionable. The base may go
        // negative when they exceed the invoice total; it is not clamped.
        let base_amount =
            &invoice.total_cost - &invoice.general_conditions - &invoice.supervision_fee;
        let commission_amount =
            (&base_amount * &self.rate).with_scale_round(2, RoundingMode::HalfEven);

        Some(CommissionEntry {
            invoice_id: invoice.id.clone(),
            invoice_number: invoice.invoice_number.clone(),
            proposal_id: proposal.id.clone(),
            proposal_number: proposal.number.clone(),
            client_name: invoice.client_name.clone(),
            sales_person_id: invoice.created_by.clone(),
            sales_person_name: invoice.created_by_name.clone(),
            invoice_total: invoice.total_cost.clone(),
            general_conditions: invoice.general_conditions.clone(),
            supervision_fee: invoice.supervision_fee.clone(),
            base_amount,
            commission_rate: self.rate_f64,
            commission_amount,
            invoice_date: invoice.invoice_date,
            paid_date: invoice.approved_at,
        })
    }

    /// Build entries for every qualifying invoice, joining each to its
    /// proposal by id. Dangling proposal ids contribute nothing. Output
    /// follows input invoice order; no implicit sort.
    pub fn build_entries(&self, invoices: &[Invoice], proposals: &[Proposal]) -> Vec<CommissionEntry> {
        let by_id: HashMap<&str, &Proposal> = proposals
            .iter()
            .map(|proposal| (proposal.id.as_str(), proposal))
            .collect();

        invoices
            .iter()
            .filter_map(|invoice| {
                let proposal = by_id.get(invoice.proposal_id.as_deref()?)?;
                self.compute_entry(invoice, proposal)
            })
            .collect()
    }
}

impl Default for CommissionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_COMMISSION_RATE_BPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn create_invoice(id: &str, status: InvoiceStatus, proposal_id: Option<&str>) -> Invoice {
        Invoice {
            id: id.to_string(),
            invoice_number: format!("INV-{}", id),
            client_name: "Acme Construction".to_string(),
            status,
            proposal_id: proposal_id.map(str::to_string),
            total_cost: BigDecimal::from(10_000),
            general_conditions: BigDecimal::from(500),
            supervision_fee: BigDecimal::from(300),
            created_by: "s1".to_string(),
            created_by_name: "Alice".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            approved_at: Some(Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap()),
        }
    }

    fn won_proposal(id: &str) -> Proposal {
        Proposal {
            id: id.to_string(),
            number: format!("PROP-{}", id),
            management_approval: ManagementApproval::Approved,
            client_approval: Some(ClientApproval::Approved),
        }
    }

    #[test]
    fn test_is_won() {
        assert!(is_won(&won_proposal("p1")));

        let mut pending_client = won_proposal("p1");
        pending_client.client_approval = Some(ClientApproval::Pending);
        assert!(!is_won(&pending_client));

        let mut no_client = won_proposal("p1");
        no_client.client_approval = None;
        assert!(!is_won(&no_client));

        let mut rejected = won_proposal("p1");
        rejected.management_approval = ManagementApproval::Rejected;
        assert!(!is_won(&rejected));
    }

    #[test]
    fn test_compute_entry_amounts() {
        let engine = CommissionEngine::default();
        let invoice = create_invoice("i1", InvoiceStatus::Paid, Some("p1"));
        let proposal = won_proposal("p1");

        let entry = engine.compute_entry(&invoice, &proposal).unwrap();

        assert_eq!(entry.base_amount, BigDecimal::from(9_200));
        assert_eq!(entry.commission_amount, BigDecimal::from(460));
        assert_eq!(entry.commission_rate, 0.05);
        assert_eq!(entry.sales_person_id, "s1");
        assert_eq!(entry.sales_person_name, "Alice");
        assert_eq!(entry.paid_date, invoice.approved_at);
    }

    #[test]
    fn test_compute_entry_negative_base_not_clamped() {
        let engine = CommissionEngine::default();
        let mut invoice = create_invoice("i1", InvoiceStatus::Paid, Some("p1"));
        invoice.total_cost = BigDecimal::from(400);

        let entry = engine.compute_entry(&invoice, &won_proposal("p1")).unwrap();

        assert_eq!(entry.base_amount, BigDecimal::from(-400));
        assert_eq!(entry.commission_amount, BigDecimal::from(-20));
    }

    #[test]
    fn test_compute_entry_rejects_unpaid_invoice() {
        let engine = CommissionEngine::default();
        let proposal = won_proposal("p1");

        for status in [
            InvoiceStatus::Pending,
            InvoiceStatus::Overdue,
            InvoiceStatus::PartialPaid,
            InvoiceStatus::Cancelled,
        ] {
            let invoice = create_invoice("i1", status, Some("p1"));
            assert!(engine.compute_entry(&invoice, &proposal).is_none());
        }
    }

    #[test]
    fn test_compute_entry_rejects_missing_or_mismatched_proposal() {
        let engine = CommissionEngine::default();

        let no_proposal = create_invoice("i1", InvoiceStatus::Paid, None);
        assert!(engine.compute_entry(&no_proposal, &won_proposal("p1")).is_none());

        let other_proposal = create_invoice("i1", InvoiceStatus::Paid, Some("p2"));
        assert!(engine.compute_entry(&other_proposal, &won_proposal("p1")).is_none());
    }

    #[test]
    fn test_compute_entry_rejects_unwon_proposal() {
        let engine = CommissionEngine::default();
        let invoice = create_invoice("i1", InvoiceStatus::Paid, Some("p1"));

        let mut proposal = won_proposal("p1");
        proposal.client_approval = Some(ClientApproval::RequestChanges);

        assert!(engine.compute_entry(&invoice, &proposal).is_none());
    }

    #[test]
    fn test_build_entries_joins_and_preserves_order() {
        let engine = CommissionEngine::default();
        let invoices = vec![
            create_invoice("i2", InvoiceStatus::Paid, Some("p2")),
            create_invoice("i1", InvoiceStatus::Paid, Some("p1")),
            create_invoice("i3", InvoiceStatus::Paid, Some("dangling")),
            create_invoice("i4", InvoiceStatus::Pending, Some("p1")),
        ];
        let proposals = vec![won_proposal("p1"), won_proposal("p2")];

        let entries = engine.build_entries(&invoices, &proposals);

        let ids: Vec<&str> = entries.iter().map(|e| e.invoice_id.as_str()).collect();
        assert_eq!(ids, vec!["i2", "i1"]);
    }

    #[test]
    fn test_custom_rate() {
        // 7.5%
        let engine = CommissionEngine::new(750);
        let invoice = create_invoice("i1", InvoiceStatus::Paid, Some("p1"));

        let entry = engine.compute_entry(&invoice, &won_proposal("p1")).unwrap();

        assert_eq!(entry.commission_amount, BigDecimal::from(690));
        assert_eq!(entry.commission_rate, 0.075);
    }
}
