use super::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tern_core::LedgerConfig;
use tern_db::{DbResult, DuckDbBackend, Row};

// ── Helpers ────────────────────────────────────────────────────────────

fn write_scripts(dir: &Path, scripts: &[(&str, &str)]) {
    for (name, sql) in scripts {
        fs::write(dir.join(name), sql).unwrap();
    }
}

fn entries(db: &dyn Database) -> Vec<(String, bool)> {
    LedgerStore::new(db, &LedgerConfig::default())
        .entries()
        .unwrap()
        .into_iter()
        .map(|e| (e.script.to_string(), e.success))
        .collect()
}

fn table_exists(db: &dyn Database, table: &str) -> bool {
    db.relation_exists("main", table).unwrap()
}

/// DuckDB wrapper that counts script statements and can refuse ledger
/// inserts.
struct ProbeDb {
    inner: DuckDbBackend,
    reject_ledger_writes: bool,
    batches: AtomicUsize,
}

impl ProbeDb {
    fn new(reject_ledger_writes: bool) -> Self {
        Self {
            inner: DuckDbBackend::in_memory().unwrap(),
            reject_ledger_writes,
            batches: AtomicUsize::new(0),
        }
    }
}

impl Database for ProbeDb {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        if self.reject_ledger_writes && sql.starts_with("INSERT INTO \"main\".\"tern_migrations\"") {
            return Err(DbError::ExecutionError("ledger is read-only".to_string()));
        }
        self.inner.execute(sql)
    }
    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        self.inner.execute_batch(sql)
    }
    fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.inner.query_count(sql)
    }
    fn query_rows(&self, sql: &str, width: usize) -> DbResult<Vec<Row>> {
        self.inner.query_rows(sql, width)
    }
    fn relation_exists(&self, schema: &str, name: &str) -> DbResult<bool> {
        self.inner.relation_exists(schema, name)
    }
    fn begin(&self) -> DbResult<()> {
        self.inner.begin()
    }
    fn commit(&self) -> DbResult<()> {
        self.inner.commit()
    }
    fn rollback(&self) -> DbResult<()> {
        self.inner.rollback()
    }
    fn supports_transactional_ddl(&self) -> bool {
        true
    }
    fn db_type(&self) -> &'static str {
        "probe"
    }
}

// ── Apply ──────────────────────────────────────────────────────────────

#[test]
fn test_apply_runs_scripts_in_numeric_order() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(
        dir.path(),
        &[
            ("10_second.sql", "INSERT INTO seen VALUES ('10');\n"),
            ("9_first.sql", "CREATE TABLE seen (v VARCHAR);\nINSERT INTO seen VALUES ('9');\n"),
            ("notes.txt", "not a script"),
        ],
    );
    let db = DuckDbBackend::in_memory().unwrap();
    let migrator = Migrator::new(&db, RunConfig::default());

    let report = migrator.run_dir(dir.path()).unwrap();

    let names: Vec<&str> = report.outcomes.iter().map(|o| o.script.as_str()).collect();
    assert_eq!(names, vec!["9_first.sql", "10_second.sql"]);
    assert_eq!(report.count(RunOutcome::Applied), 2);
    assert_eq!(db.query_count("SELECT * FROM seen").unwrap(), 2);
}

#[test]
fn test_apply_empty_directory_creates_ledger_only() {
    let dir = tempfile::tempdir().unwrap();
    let db = DuckDbBackend::in_memory().unwrap();

    let report = Migrator::new(&db, RunConfig::default())
        .run_dir(dir.path())
        .unwrap();

    assert!(report.outcomes.is_empty());
    assert!(table_exists(&db, "tern_migrations"));
}

#[test]
fn test_apply_skips_already_applied() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), &[("001_init.sql", "CREATE TABLE a (id INT);\n")]);
    let db = DuckDbBackend::in_memory().unwrap();
    let migrator = Migrator::new(&db, RunConfig::default());

    migrator.run_dir(dir.path()).unwrap();
    let second = migrator.run_dir(dir.path()).unwrap();

    assert_eq!(second.count(RunOutcome::AlreadyApplied), 1);
    assert_eq!(second.count(RunOutcome::Applied), 0);
    assert_eq!(entries(&db), vec![("001_init.sql".to_string(), true)]);
}

#[test]
fn test_apply_failure_records_and_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(
        dir.path(),
        &[
            ("001_ok.sql", "CREATE TABLE a (id INT);\n"),
            ("002_bad.sql", "CREATE TABLE b (id INT);\nSELEKT 1;\n"),
            ("003_never.sql", "CREATE TABLE c (id INT);\n"),
        ],
    );
    let db = DuckDbBackend::in_memory().unwrap();
    let migrator = Migrator::new(&db, RunConfig::default());
    let catalog = migrator.discover(dir.path()).unwrap();
    let mut report = RunReport::new(RunMode::Apply);

    let err = migrator.run_into(&catalog, &mut report).unwrap_err();

    assert!(matches!(err, MigrateError::Statement { ref script, .. } if script == "002_bad.sql"));
    assert_eq!(err.script(), Some("002_bad.sql"));
    assert_eq!(report.count(RunOutcome::Applied), 1);
    assert_eq!(report.scripts_with(RunOutcome::Failed), vec![&catalog.scripts()[1].name]);
    assert_eq!(report.outcomes.len(), 2);
    assert!(table_exists(&db, "a"));
    assert!(!table_exists(&db, "b"));
    assert!(!table_exists(&db, "c"));
    assert_eq!(
        entries(&db),
        vec![
            ("001_ok.sql".to_string(), true),
            ("002_bad.sql".to_string(), false),
        ]
    );
}

#[test]
fn test_failure_entry_names_statement() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(
        dir.path(),
        &[("001_bad.sql", "CREATE TABLE a (id INT);\nINSERT INTO missing VALUES (1);\n")],
    );
    let db = DuckDbBackend::in_memory().unwrap();

    Migrator::new(&db, RunConfig::default())
        .run_dir(dir.path())
        .unwrap_err();

    let ledger = LedgerStore::new(&db, &LedgerConfig::default());
    let failure = ledger.entries_for("001_bad.sql").unwrap().remove(0);
    assert!(!failure.success);
    assert!(failure.error.unwrap().contains("Statement 2 of 2"));
}

#[test]
fn test_init_reapplies_everything() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(
        dir.path(),
        &[("001_init.sql", "CREATE OR REPLACE TABLE a (id INT);\n")],
    );
    let db = DuckDbBackend::in_memory().unwrap();
    Migrator::new(&db, RunConfig::default())
        .run_dir(dir.path())
        .unwrap();

    let report = Migrator::new(&db, RunConfig::default().with_init(true))
        .run_dir(dir.path())
        .unwrap();

    assert_eq!(report.count(RunOutcome::Applied), 1);
    assert_eq!(entries(&db), vec![("001_init.sql".to_string(), true)]);
}

#[test]
fn test_upto_limits_catalog() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(
        dir.path(),
        &[
            ("1_a.sql", "CREATE TABLE a (id INT);\n"),
            ("2_b.sql", "CREATE TABLE b (id INT);\n"),
            ("3_c.sql", "CREATE TABLE c (id INT);\n"),
        ],
    );
    let db = DuckDbBackend::in_memory().unwrap();

    let report = Migrator::new(&db, RunConfig::default().with_upto(Some(2)))
        .run_dir(dir.path())
        .unwrap();

    assert_eq!(report.count(RunOutcome::Applied), 2);
    assert!(!table_exists(&db, "c"));
}

#[test]
fn test_unreadable_directory_leaves_ledger_alone() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), &[("001_init.sql", "CREATE TABLE a (id INT);\n")]);
    let db = DuckDbBackend::in_memory().unwrap();
    Migrator::new(&db, RunConfig::default())
        .run_dir(dir.path())
        .unwrap();

    let err = Migrator::new(&db, RunConfig::default().with_init(true))
        .run_dir(&dir.path().join("missing"))
        .unwrap_err();

    assert!(matches!(err, MigrateError::Discovery(_)));
    assert_eq!(entries(&db).len(), 1);
}

// ── Ledger write failures ──────────────────────────────────────────────

#[test]
fn test_success_not_recorded_rolls_back_script() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), &[("001_init.sql", "CREATE TABLE a (id INT);\n")]);
    let db = ProbeDb::new(true);

    let err = Migrator::new(&db, RunConfig::default())
        .run_dir(dir.path())
        .unwrap_err();

    assert!(matches!(err, MigrateError::LedgerWrite { .. }));
    assert!(!table_exists(&db, "a"));
}

#[test]
fn test_failure_not_recorded_names_both_errors() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), &[("001_bad.sql", "SELEKT 1;\n")]);
    let db = ProbeDb::new(true);

    let err = Migrator::new(&db, RunConfig::default())
        .run_dir(dir.path())
        .unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, MigrateError::FailureNotRecorded { .. }));
    assert!(message.contains("001_bad.sql"));
    assert!(message.contains("ledger is read-only"));
}

// ── Dry run ────────────────────────────────────────────────────────────

#[test]
fn test_dry_run_without_ledger_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(
        dir.path(),
        &[
            ("001_a.sql", "CREATE TABLE a (id INT);\n"),
            ("002_b.sql", "CREATE TABLE b (id INT);\n"),
        ],
    );
    let db = ProbeDb::new(false);

    let report = Migrator::new(&db, RunConfig::default().with_mode(RunMode::DryRun))
        .run_dir(dir.path())
        .unwrap();

    assert_eq!(report.mode, RunMode::DryRun);
    assert_eq!(report.count(RunOutcome::WouldApply), 2);
    assert_eq!(db.batches.load(Ordering::SeqCst), 0);
    assert!(!table_exists(&db, "tern_migrations"));
}

#[test]
fn test_dry_run_consults_existing_ledger() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), &[("001_a.sql", "CREATE TABLE a (id INT);\n")]);
    let db = DuckDbBackend::in_memory().unwrap();
    Migrator::new(&db, RunConfig::default())
        .run_dir(dir.path())
        .unwrap();
    write_scripts(dir.path(), &[("002_b.sql", "CREATE TABLE b (id INT);\n")]);

    let report = Migrator::new(&db, RunConfig::default().with_mode(RunMode::DryRun))
        .run_dir(dir.path())
        .unwrap();

    assert_eq!(report.count(RunOutcome::AlreadyApplied), 1);
    assert_eq!(report.count(RunOutcome::WouldApply), 1);
    assert!(!table_exists(&db, "b"));
    assert_eq!(entries(&db).len(), 1);
}

#[test]
fn test_dry_run_with_init_keeps_ledger() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), &[("001_a.sql", "CREATE TABLE a (id INT);\n")]);
    let db = DuckDbBackend::in_memory().unwrap();
    Migrator::new(&db, RunConfig::default())
        .run_dir(dir.path())
        .unwrap();

    let report = Migrator::new(
        &db,
        RunConfig::default()
            .with_mode(RunMode::DryRun)
            .with_init(true),
    )
    .run_dir(dir.path())
    .unwrap();

    assert_eq!(report.count(RunOutcome::WouldApply), 1);
    assert_eq!(entries(&db).len(), 1);
}

// ── Fill ───────────────────────────────────────────────────────────────

#[test]
fn test_fill_records_without_executing() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(
        dir.path(),
        &[
            ("001_a.sql", "CREATE TABLE a (id INT);\n"),
            ("002_b.sql", "SELEKT broken;\n"),
        ],
    );
    let db = DuckDbBackend::in_memory().unwrap();

    let report = Migrator::new(&db, RunConfig::default().with_mode(RunMode::Fill))
        .run_dir(dir.path())
        .unwrap();

    assert_eq!(report.count(RunOutcome::Filled), 2);
    assert!(!table_exists(&db, "a"));
    assert_eq!(
        entries(&db),
        vec![
            ("001_a.sql".to_string(), true),
            ("002_b.sql".to_string(), true),
        ]
    );
}

#[test]
fn test_fill_twice_keeps_one_success_per_script() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), &[("001_a.sql", "CREATE TABLE a (id INT);\n")]);
    let db = DuckDbBackend::in_memory().unwrap();
    let migrator = Migrator::new(&db, RunConfig::default().with_mode(RunMode::Fill));

    migrator.run_dir(dir.path()).unwrap();
    migrator.run_dir(dir.path()).unwrap();

    assert_eq!(entries(&db), vec![("001_a.sql".to_string(), true)]);
}

// ── Connection ─────────────────────────────────────────────────────────

#[test]
fn test_connect_failure_names_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("db.duckdb");
    let connector = tern_db::DuckDbConnector::new(path.display().to_string());

    let err = match connect(&connector) {
        Ok(_) => panic!("connecting into a missing directory should fail"),
        Err(e) => e,
    };

    assert!(matches!(err, MigrateError::Connection { .. }));
    assert!(err.to_string().contains("duckdb:"));
}
