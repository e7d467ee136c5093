pub mod client;
pub mod invoice;
pub mod payload;
pub mod session;
pub mod status;
pub mod summary;
pub mod task;
pub mod time_serde;

use serde::{Deserialize, Serialize};

pub use client::ClientFields;
pub use invoice::InvoiceFields;
pub use session::SessionFields;
pub use status::{ClientStatus, InvoiceStatus, TaskPriority, TaskStatus};
pub use summary::FinancialSummary;
pub use task::TaskFields;

/// Outcome of a store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreAction {
	Created,
	Updated,
}
impl StoreAction {
	pub fn from_inserted(inserted: bool) -> Self {
		if inserted { Self::Created } else { Self::Updated }
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Created => "created",
			Self::Updated => "updated",
		}
	}
}
