use std::{
    fmt::{Debug, Write},
    path::PathBuf,
    sync::{Arc, Mutex, Once},
};

use serde::{Deserialize, Serialize};
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    subscriber::DefaultGuard,
};
use tracing_subscriber::{
    EnvFilter,
    layer::{Context, Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::client::{CrepoClient, CrepoClientBuilder, RepoConfig};

/// Live repository used by the `client-testing` feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfig {
    pub repo: RepoConfig,
}

pub fn init_test_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            // If no RUST_LOG is set a default for current instance
            unsafe {
                std::env::set_var("RUST_LOG", "info,crepo=trace");
            }
        }
        let writer = tracing_subscriber::fmt::layer()
            .without_time()
            .with_thread_ids(false)
            .with_thread_names(false)
            .pretty()
            .with_writer(std::io::stderr);
        let _ = tracing_subscriber::registry()
            .with(writer)
            .with(EnvFilter::from_default_env())
            .try_init();
    });
}
/// Records every event emitted on the current thread while its guard is alive.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}
impl CapturedLogs {
    /// Only covers the calling thread, so use it from current-thread tests.
    pub fn capture(&self) -> DefaultGuard {
        tracing_subscriber::registry()
            .with(self.clone())
            .set_default()
    }
    /// Any event at `level` whose message or fields contain `text`
    pub fn contains(&self, level: Level, text: &str) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|(event_level, line)| *event_level == level && line.contains(text))
    }
}
impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut line = EventLine::default();
        event.record(&mut line);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), line.0));
    }
}
#[derive(Default)]
struct EventLine(String);
impl Visit for EventLine {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}
/// `http://localhost:8080` with no path prefix. Mock clients never connect to it.
pub fn mock_config() -> RepoConfig {
    RepoConfig::default()
}
fn test_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("TEST_CONFIG_PATH") {
        PathBuf::from(path)
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test.toml")
    }
}
pub fn load_test_config() -> TestConfig {
    let config_path = test_config_path();
    if !config_path.exists() {
        panic!("Test configuration file not found at: {:?}", config_path);
    }
    match std::fs::read_to_string(&config_path) {
        Ok(content) => toml::from_str(&content).expect("Failed to parse test configuration"),
        Err(e) => panic!("Failed to read test configuration file: {}", e),
    }
}
pub fn create_test_client() -> CrepoClient {
    let TestConfig { repo } = load_test_config();
    CrepoClientBuilder::default()
        .with_config(repo)
        .build()
        .expect("Failed to create test client")
}

mod tests {
    use crate::test::init_test_logger;

    #[test]
    fn test_init_logger() {
        init_test_logger();
        tracing::info!("Logger initialized for tests");
    }
}
