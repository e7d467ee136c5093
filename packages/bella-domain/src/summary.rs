use serde::{Deserialize, Serialize};

/// Outstanding invoice totals, recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
	pub total_overdue: f64,
	pub total_unpaid: f64,
	pub overdue_count: u64,
	pub unpaid_count: u64,
}
impl FinancialSummary {
	pub fn from_amounts(overdue: &[f64], unpaid: &[f64]) -> Self {
		Self {
			total_overdue: overdue.iter().sum(),
			total_unpaid: unpaid.iter().sum(),
			overdue_count: overdue.len() as u64,
			unpaid_count: unpaid.len() as u64,
		}
	}
}
