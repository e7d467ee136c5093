/// Tables created by [`crate::db::Db::ensure_schema`], in creation order.
pub const TABLES: [&str; 5] = ["clients", "invoices", "sessions", "tasks", "memory_chunks"];

pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

/// Splits a rendered script into individual statements, dropping empty fragments.
pub fn statements(sql: &str) -> impl Iterator<Item = &str> {
	sql.split(';').map(str::trim).filter(|statement| !statement.is_empty())
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_clients.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_clients.sql")),
				"tables/002_invoices.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_invoices.sql")),
				"tables/003_sessions.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_sessions.sql")),
				"tables/004_tasks.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_tasks.sql")),
				"tables/005_memory_chunks.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_memory_chunks.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_include_is_expanded() {
		let sql = render_schema();

		assert!(!sql.contains("\\ir "), "Unexpanded include in rendered schema.");

		for table in TABLES {
			assert!(
				sql.contains(&format!("CREATE TABLE IF NOT EXISTS {table} (")),
				"Missing table {table}."
			);
		}
	}

	#[test]
	fn identifier_indexes_are_unique_except_for_tasks() {
		let sql = render_schema();

		for table in ["clients", "invoices", "sessions"] {
			assert!(
				sql.contains(&format!(
					"CREATE UNIQUE INDEX IF NOT EXISTS {table}_entity_id_key ON {table} (entity_id)"
				)),
				"Missing unique identifier index on {table}."
			);
		}

		assert!(sql.contains("CREATE INDEX IF NOT EXISTS tasks_entity_id_idx ON tasks (entity_id)"));
		assert!(!sql.contains("UNIQUE INDEX IF NOT EXISTS tasks_"));
	}

	#[test]
	fn statements_skip_blank_fragments() {
		let parts = statements("SELECT 1;\n\n;  SELECT 2 ;").collect::<Vec<_>>();

		assert_eq!(parts, vec!["SELECT 1", "SELECT 2"]);
	}
}
