//! Embedded PostgreSQL bootstrap for repository integration tests.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` by default. When
//! `PG_RUNTIME_DIR` or `PG_DATA_DIR` is missing, both are pointed at a unique
//! directory under the cargo target dir for the duration of the bootstrap.
//! Environment mutation is serialised through `env-lock`.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip suites on hosts that cannot start a
//! cluster.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

fn target_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn unique_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let base = target_dir().join(format!("bootstrap-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

/// Binary downloads fail intermittently when suites start clusters in parallel.
fn is_transient(message: &str) -> bool {
    let lower = message.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "timeout",
        "temporarily unavailable",
        "dns error",
    ]
    .iter()
    .any(|pattern| lower.contains(pattern))
}

/// Start a [`TestCluster`], retrying transient download failures.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = unique_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient(&last_error) {
                    break;
                }
                let delay = Duration::from_millis(RETRY_DELAY_MS * (1 << attempt));
                eprintln!("pg-embed: transient error, retrying in {delay:?}: {last_error}");
                std::thread::sleep(delay);
            }
        }
    }
    Err(last_error)
}

/// Render a `postgres` error with its SQLSTATE and message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db_error) => format!(
            "postgres error {:?}: {}",
            db_error.code(),
            db_error.message()
        ),
        None => error.to_string(),
    }
}

/// Drop and recreate `name` on the cluster's maintenance database.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    // Separate statements: CREATE DATABASE cannot run in a transaction block.
    for statement in [
        format!("DROP DATABASE IF EXISTS \"{name}\""),
        format!("CREATE DATABASE \"{name}\""),
    ] {
        client
            .batch_execute(&statement)
            .map_err(|err| format_postgres_error(&err))?;
    }
    Ok(())
}

fn skip_requested() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is truthy, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if skip_requested() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
