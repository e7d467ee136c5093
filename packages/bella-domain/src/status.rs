//! Known lifecycle values for the normalized `status` and `priority` columns.
//!
//! Stored values are plain strings. A payload carrying a value outside these sets is stored
//! verbatim; `parse` returning `None` only tells callers the value is unrecognized.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
	Active,
	Overdue,
	Paid,
	Blacklisted,
}
impl ClientStatus {
	pub const DEFAULT: Self = Self::Active;

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Active => "active",
			Self::Overdue => "overdue",
			Self::Paid => "paid",
			Self::Blacklisted => "blacklisted",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"active" => Some(Self::Active),
			"overdue" => Some(Self::Overdue),
			"paid" => Some(Self::Paid),
			"blacklisted" => Some(Self::Blacklisted),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
	Unpaid,
	Paid,
	Overdue,
	Cancelled,
}
impl InvoiceStatus {
	pub const DEFAULT: Self = Self::Unpaid;

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Unpaid => "unpaid",
			Self::Paid => "paid",
			Self::Overdue => "overdue",
			Self::Cancelled => "cancelled",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"unpaid" => Some(Self::Unpaid),
			"paid" => Some(Self::Paid),
			"overdue" => Some(Self::Overdue),
			"cancelled" => Some(Self::Cancelled),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
	Pending,
	InProgress,
	Completed,
}
impl TaskStatus {
	pub const DEFAULT: Self = Self::Pending;

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::InProgress => "in_progress",
			Self::Completed => "completed",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"pending" => Some(Self::Pending),
			"in_progress" => Some(Self::InProgress),
			"completed" => Some(Self::Completed),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPriority {
	High,
	Medium,
	Low,
}
impl TaskPriority {
	pub const DEFAULT: Self = Self::Medium;

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::High => "high",
			Self::Medium => "medium",
			Self::Low => "low",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"high" => Some(Self::High),
			"medium" => Some(Self::Medium),
			"low" => Some(Self::Low),
			_ => None,
		}
	}
}
