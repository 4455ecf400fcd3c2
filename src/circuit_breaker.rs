use failsafe::backoff::{self, Exponential};
use failsafe::failure_policy::{self, ConsecutiveFailures};
use failsafe::{Config, StateMachine};
use std::time::Duration;

/// Concrete circuit-breaker type guarding calls to the insights service.
pub type InsightsCircuitBreaker = StateMachine<ConsecutiveFailures<Exponential>, ()>;

/// Creates a circuit breaker for the external insights service so a flaky
/// upstream fails fast instead of stalling every analyze request.
///
/// - **Failure threshold**: 5 consecutive failures triggers OPEN state.
/// - **Backoff**: exponential from 10s to 60s before attempting recovery.
pub fn create_insights_circuit_breaker() -> InsightsCircuitBreaker {
    let backoff_strategy = backoff::exponential(
        Duration::from_secs(10), // Initial delay
        Duration::from_secs(60), // Maximum delay
    );

    let failure_policy = failure_policy::consecutive_failures(5, backoff_strategy);

    Config::new().failure_policy(failure_policy).build()
}
