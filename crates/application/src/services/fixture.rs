//! Suite fixture lifecycle
//!
//! A [`ProviderFixture`] initializes a provider once before any test of a
//! suite runs and disposes it once after all of them, whatever their
//! outcome. [`ProviderFixture::run`] packages that contract: the body is
//! skipped when the provider is inconclusive, and disposal happens even if
//! the body panics.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use domain::InitOutcome;
use futures::FutureExt;
use tracing::{info, instrument, warn};

use super::provider::{AsyncLifetime, DatabaseProvider};
use super::test_base::TestBase;
use crate::error::FixtureError;

/// Result of running a suite body under a fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteOutcome<T> {
    /// The body ran to completion
    Completed(T),
    /// The provider was unavailable and the body did not run
    Skipped(String),
}

impl<T> SuiteOutcome<T> {
    /// Check if the body was skipped
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Report that a suite cannot be evaluated in this environment
///
/// This is not a failure; the reason is logged so the skip is visible in the
/// test output.
pub fn report_inconclusive(reason: &str) {
    warn!(reason, "Inconclusive: suite skipped");
}

/// Return early from a test when its fixture is inconclusive
///
/// ```ignore
/// let fixture = ProviderFixture::initialize(provider).await?;
/// skip_if_inconclusive!(fixture);
/// ```
#[macro_export]
macro_rules! skip_if_inconclusive {
    ($fixture:expr) => {
        if let Some(reason) = $fixture.skip_reason() {
            $crate::services::report_inconclusive(reason);
            return Default::default();
        }
    };
}

/// An initialized provider bound to one suite
pub struct ProviderFixture<P> {
    provider: Arc<P>,
    outcome: InitOutcome,
}

impl<P: std::fmt::Debug> std::fmt::Debug for ProviderFixture<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderFixture")
            .field("provider", &self.provider)
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl<P> ProviderFixture<P>
where
    P: DatabaseProvider + AsyncLifetime + 'static,
{
    /// Run the provider's setup hook
    ///
    /// An unavailable backend yields a fixture whose
    /// [`skip_reason`](Self::skip_reason) is set; only misuse of the
    /// lifecycle returns `Err`.
    #[instrument(name = "fixture", skip_all)]
    pub async fn initialize(provider: Arc<P>) -> Result<Self, FixtureError> {
        info!(factory = provider.factory().name(), "Initializing fixture");
        let outcome = provider.initialize().await?;
        match &outcome {
            InitOutcome::Ready { connection_string } => {
                info!(connection_string = %connection_string, "Fixture ready");
            },
            InitOutcome::Inconclusive { reason } => {
                warn!(reason = %reason, "Fixture inconclusive");
            },
        }
        Ok(Self { provider, outcome })
    }

    /// Initialization outcome
    pub const fn outcome(&self) -> &InitOutcome {
        &self.outcome
    }

    /// Check if the provider is usable
    pub const fn is_ready(&self) -> bool {
        self.outcome.is_ready()
    }

    /// Why dependent tests must be skipped, if they must
    pub fn skip_reason(&self) -> Option<&str> {
        self.outcome.reason()
    }

    /// The bound provider
    pub const fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Create a per-test connection cache over the bound provider
    pub fn test_base(&self) -> TestBase<P> {
        TestBase::new(Arc::clone(&self.provider))
    }

    /// Run the provider's teardown hook
    #[instrument(name = "fixture", skip_all)]
    pub async fn dispose(self) -> Result<(), FixtureError> {
        self.provider.dispose().await?;
        info!("Fixture disposed");
        Ok(())
    }

    /// Initialize, run `body` if the provider is ready, and always dispose
    ///
    /// A panic in `body` is re-raised after the provider has been disposed.
    pub async fn run<F, Fut, T>(provider: Arc<P>, body: F) -> Result<SuiteOutcome<T>, FixtureError>
    where
        F: FnOnce(Arc<P>) -> Fut,
        Fut: Future<Output = T>,
    {
        let fixture = Self::initialize(provider).await?;
        if let Some(reason) = fixture.skip_reason().map(str::to_string) {
            report_inconclusive(&reason);
            fixture.dispose().await?;
            return Ok(SuiteOutcome::Skipped(reason));
        }

        let result = AssertUnwindSafe(body(Arc::clone(&fixture.provider)))
            .catch_unwind()
            .await;
        let disposed = fixture.dispose().await;

        match result {
            Ok(value) => disposed.map(|()| SuiteOutcome::Completed(value)),
            Err(payload) => {
                if let Err(e) = disposed {
                    warn!(error = %e, "Dispose failed after suite panic");
                }
                panic::resume_unwind(payload)
            },
        }
    }
}
