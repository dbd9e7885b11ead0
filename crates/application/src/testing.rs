//! In-memory driver and environment fakes for unit tests.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use domain::ConnectionState;

use crate::ports::{
    ConnectionStringBuilder, DbConnection, DriverError, DriverFactory, EnvironmentPort,
};

/// Call counters shared by a fake factory and every connection it creates.
#[derive(Debug, Default)]
pub struct DriverCounters {
    pub created: AtomicUsize,
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub executed: AtomicUsize,
}

impl DriverCounters {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }
}

/// Failure injection for fake connections.
#[derive(Debug, Clone, Default)]
pub struct FakeBehavior {
    pub open_error: Option<DriverError>,
    pub close_error: Option<DriverError>,
    pub execute_error: Option<DriverError>,
    /// State reported after a successful open (defaults to `Open`)
    pub state_after_open: Option<ConnectionState>,
    /// State reported by a fresh handle (defaults to `Closed`)
    pub initial_state: Option<ConnectionState>,
    /// `open` never completes
    pub open_hangs: bool,
}

#[derive(Debug, Default)]
pub struct FakeDriverFactory {
    pub counters: Arc<DriverCounters>,
    pub behavior: FakeBehavior,
}

impl FakeDriverFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: FakeBehavior) -> Self {
        Self {
            counters: Arc::default(),
            behavior,
        }
    }
}

impl DriverFactory for FakeDriverFactory {
    fn name(&self) -> &str {
        "fake"
    }

    fn create_connection(&self) -> Box<dyn DbConnection> {
        let id = self.counters.created.fetch_add(1, Ordering::SeqCst);
        Box::new(FakeConnection {
            id,
            connection_string: String::new(),
            state: self.behavior.initial_state.unwrap_or_default(),
            behavior: self.behavior.clone(),
            counters: Arc::clone(&self.counters),
        })
    }

    fn create_connection_string_builder(&self) -> Box<dyn ConnectionStringBuilder> {
        Box::<FakeConnectionStringBuilder>::default()
    }
}

#[derive(Debug)]
pub struct FakeConnection {
    pub id: usize,
    connection_string: String,
    state: ConnectionState,
    behavior: FakeBehavior,
    counters: Arc<DriverCounters>,
}

#[async_trait]
impl DbConnection for FakeConnection {
    fn connection_string(&self) -> &str {
        &self.connection_string
    }

    fn set_connection_string(&mut self, connection_string: &str) {
        self.connection_string = connection_string.to_string();
    }

    fn state(&self) -> ConnectionState {
        self.state
    }

    async fn open(&mut self) -> Result<(), DriverError> {
        if self.behavior.open_hangs {
            std::future::pending::<()>().await;
        }
        if let Some(err) = self.behavior.open_error.clone() {
            return Err(err);
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        self.state = self.behavior.state_after_open.unwrap_or(ConnectionState::Open);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        if let Some(err) = self.behavior.close_error.clone() {
            return Err(err);
        }
        if self.state.is_open() {
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
        }
        self.state = ConnectionState::Closed;
        Ok(())
    }

    async fn ping(&mut self) -> Result<(), DriverError> {
        if self.state.is_open() {
            Ok(())
        } else {
            Err(DriverError::NotOpen)
        }
    }

    async fn execute(&mut self, _sql: &str) -> Result<u64, DriverError> {
        self.counters.executed.fetch_add(1, Ordering::SeqCst);
        match self.behavior.execute_error.clone() {
            Some(err) => Err(err),
            None => Ok(0),
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct FakeConnectionStringBuilder {
    options: Vec<(String, String)>,
}

impl ConnectionStringBuilder for FakeConnectionStringBuilder {
    fn set_connection_string(&mut self, connection_string: &str) -> Result<(), DriverError> {
        self.options = connection_string
            .split(';')
            .filter(|part| !part.trim().is_empty())
            .map(|part| {
                part.split_once('=')
                    .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                    .ok_or_else(|| DriverError::InvalidConnectionString(part.to_string()))
            })
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn connection_string(&self) -> String {
        self.options
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(";")
    }

    fn get(&self, key: &str) -> Option<String> {
        self.options
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DriverError> {
        self.remove(key);
        self.options.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> bool {
        let before = self.options.len();
        self.options.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        before != self.options.len()
    }
}

/// Environment backed by a fixed map.
#[derive(Debug, Default, Clone)]
pub struct MapEnvironment(HashMap<String, String>);

impl MapEnvironment {
    pub fn with(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut vars = HashMap::new();
        vars.insert(key.into(), value.into());
        Self(vars)
    }
}

impl EnvironmentPort for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}
