//! Fixtures shared by domain service tests.

use std::io;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use tracing::subscriber::DefaultGuard;

use crate::domain::{
    Coupon, CouponCode, Location, LocationDraft, LocationId, Store, StoreDraft, StoreId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 14, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) struct FixtureClock {
    pub(crate) utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn sample_location(slug: &str, name: &str) -> Location {
    Location::new(LocationDraft {
        id: LocationId::random(),
        slug: slug.to_owned(),
        name: name.to_owned(),
        description: None,
        is_active: true,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    })
    .expect("valid location")
}

pub(crate) fn sample_store(slug: &str, name: &str, location: &Location) -> Store {
    Store::new(StoreDraft {
        id: StoreId::random(),
        slug: slug.to_owned(),
        name: name.to_owned(),
        location_id: location.id,
        description: None,
        is_active: true,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    })
    .expect("valid store")
}

pub(crate) fn sample_coupon(code: &str, location: &Location) -> Coupon {
    Coupon::issue(
        CouponCode::parse(code).expect("valid code"),
        location.id,
        fixture_timestamp(),
    )
}

/// Formatted log lines captured on the current thread.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub(crate) fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock").clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route events on this thread into a buffer until the guard drops.
pub(crate) fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}
