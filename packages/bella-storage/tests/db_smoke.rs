use serde_json::json;
use time::{Duration, OffsetDateTime};
use tokio::task::JoinSet;
use uuid::Uuid;

use bella_config::Postgres;
use bella_domain::{ClientFields, TaskFields};
use bella_storage::{clients, db::Db, models::MemoryChunk, tasks};
use bella_testkit::TestDatabase;

async fn bootstrap(test_db: &TestDatabase, pool_max_conns: u32) -> Db {
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BELLA_PG_DSN to run."]
async fn schema_creates_every_table_idempotently() {
	let Some(base_dsn) = bella_testkit::env_dsn() else {
		eprintln!(
			"Skipping schema_creates_every_table_idempotently; set BELLA_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db, 2).await;

	db.ensure_schema().await.expect("Second schema pass should be a no-op.");

	for table in ["clients", "invoices", "sessions", "tasks", "memory_chunks"] {
		let count: i64 = sqlx::query_scalar(
			"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
		)
		.bind(table)
		.fetch_one(&db.pool)
		.await
		.expect("Failed to query schema tables.");

		assert_eq!(count, 1, "missing table {table}");
	}

	let chunks: Vec<MemoryChunk> = sqlx::query_as(
		"\
SELECT chunk_id, parent_id, parent_type, chunk_index, content, summary, created_at
FROM memory_chunks",
	)
	.fetch_all(&db.pool)
	.await
	.expect("Failed to read memory chunks.");

	assert!(chunks.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BELLA_PG_DSN to run."]
async fn client_upsert_reports_insert_then_update() {
	let Some(base_dsn) = bella_testkit::env_dsn() else {
		eprintln!(
			"Skipping client_upsert_reports_insert_then_update; set BELLA_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db, 2).await;
	let now = OffsetDateTime::now_utc();
	let first_payload = json!({ "name": "Acme", "amount_owed": 500 });
	let first = clients::upsert_client(
		&db.pool,
		Uuid::new_v4(),
		"c1",
		&ClientFields::from_payload("c1", &first_payload),
		&first_payload,
		now,
	)
	.await
	.expect("Failed to insert client.");

	assert!(first.inserted);

	let second_payload = json!({ "status": "paid" });
	let later = now + Duration::seconds(5);
	let second = clients::upsert_client(
		&db.pool,
		Uuid::new_v4(),
		"c1",
		&ClientFields::from_payload("c1", &second_payload),
		&second_payload,
		later,
	)
	.await
	.expect("Failed to update client.");

	assert!(!second.inserted);
	assert_eq!(second.row_id, first.row_id);

	let row = clients::find_client(&db.pool, "c1")
		.await
		.expect("Failed to read client.")
		.expect("Client should exist.");

	assert_eq!(row.name, "c1");
	assert_eq!(row.amount_owed, 0.0);
	assert_eq!(row.status, "paid");
	assert_eq!(row.data, second_payload);
	assert_eq!(row.row_id, first.row_id);
	assert!(row.updated_at > now, "updated_at should advance on update.");
	assert_eq!(row.updated_at.unix_timestamp(), later.unix_timestamp());

	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM clients WHERE entity_id = 'c1'")
		.fetch_one(&db.pool)
		.await
		.expect("Failed to count clients.");

	assert_eq!(count, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BELLA_PG_DSN to run."]
async fn tasks_with_the_same_identifier_are_kept_apart() {
	let Some(base_dsn) = bella_testkit::env_dsn() else {
		eprintln!(
			"Skipping tasks_with_the_same_identifier_are_kept_apart; set BELLA_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db, 2).await;
	let now = OffsetDateTime::now_utc();
	let payload = json!({ "description": "Call Acme" });
	let fields = TaskFields::from_payload(&payload, now);
	let first = tasks::insert_task(&db.pool, Uuid::new_v4(), "t1", &fields, &payload, now)
		.await
		.expect("Failed to insert task.");
	let second = tasks::insert_task(&db.pool, Uuid::new_v4(), "t1", &fields, &payload, now)
		.await
		.expect("Failed to insert task.");

	assert_ne!(first, second);

	let pending = tasks::list_tasks_with_status(&db.pool, "pending")
		.await
		.expect("Failed to list pending tasks.");

	assert_eq!(pending.len(), 2);
	assert_eq!(pending[0].row_id, second);
	assert_eq!(pending[1].row_id, first);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BELLA_PG_DSN to run."]
async fn concurrent_client_upserts_leave_one_row() {
	let Some(base_dsn) = bella_testkit::env_dsn() else {
		eprintln!(
			"Skipping concurrent_client_upserts_leave_one_row; set BELLA_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db, 16).await;
	let mut writers = JoinSet::new();

	for attempt in 0..16 {
		let pool = db.pool.clone();

		writers.spawn(async move {
			let payload = json!({ "name": "Acme", "amount_owed": attempt });

			clients::upsert_client(
				&pool,
				Uuid::new_v4(),
				"racy",
				&ClientFields::from_payload("racy", &payload),
				&payload,
				OffsetDateTime::now_utc(),
			)
			.await
		});
	}

	let mut outcomes = Vec::new();

	while let Some(joined) = writers.join_next().await {
		outcomes.push(joined.expect("Writer task panicked.").expect("Failed to upsert client."));
	}

	assert_eq!(outcomes.len(), 16);
	assert_eq!(outcomes.iter().filter(|outcome| outcome.inserted).count(), 1);
	assert!(outcomes.iter().all(|outcome| outcome.row_id == outcomes[0].row_id));

	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM clients WHERE entity_id = 'racy'")
		.fetch_one(&db.pool)
		.await
		.expect("Failed to count clients.");

	assert_eq!(count, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
