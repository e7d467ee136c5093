//! Read-only listings and aggregates that span a whole table.

use crate::{BellaService, InvoiceRecord, Result, TaskRecord};
use bella_domain::{FinancialSummary, InvoiceStatus, TaskStatus};
use bella_storage::{invoices, tasks};

impl BellaService {
	pub async fn get_overdue_invoices(&self) -> Result<Vec<InvoiceRecord>> {
		let rows =
			invoices::list_invoices_with_status(&self.db.pool, InvoiceStatus::Overdue.as_str())
				.await?;

		tracing::debug!(count = rows.len(), "Listed overdue invoices.");

		Ok(rows.into_iter().map(InvoiceRecord::from).collect())
	}

	/// Pending tasks, newest first.
	pub async fn get_pending_tasks(&self) -> Result<Vec<TaskRecord>> {
		let rows = tasks::list_tasks_with_status(&self.db.pool, TaskStatus::Pending.as_str()).await?;

		tracing::debug!(count = rows.len(), "Listed pending tasks.");

		Ok(rows.into_iter().map(TaskRecord::from).collect())
	}

	/// Totals and counts of overdue and unpaid invoices, recomputed from storage on every call.
	pub async fn get_financial_summary(&self) -> Result<FinancialSummary> {
		let overdue =
			invoices::invoice_amounts_with_status(&self.db.pool, InvoiceStatus::Overdue.as_str())
				.await?;
		let unpaid =
			invoices::invoice_amounts_with_status(&self.db.pool, InvoiceStatus::Unpaid.as_str())
				.await?;
		let summary = FinancialSummary::from_amounts(&overdue, &unpaid);

		tracing::debug!(
			overdue_count = summary.overdue_count,
			unpaid_count = summary.unpaid_count,
			"Computed financial summary."
		);

		Ok(summary)
	}
}
