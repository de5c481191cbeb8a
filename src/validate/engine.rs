//! Verdict engine
//!
//! Drives one validation call through its lifecycle: settle, fetch, scan,
//! reset, verdict. Calls are strictly sequential; the log is a single shared
//! append-only buffer with no per-scenario isolation, so `validate` takes
//! `&mut self` and the engine never overlaps two calls.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::common::{Error, Result};
use crate::resource::LogResource;

use super::markers::{Marker, MarkerSet};
use super::scanner::{scan, ScanReport};

/// How many fetch+scan attempts one validation call makes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetryPolicy {
    /// Exactly one fetch after the settle interval
    SingleShot,
    /// Re-fetch and re-scan every `interval` until all markers are found or
    /// `max_wait` elapses. Expiry is a content failure with the last scan's
    /// missing list, never a silent pass.
    BoundedPoll {
        interval: Duration,
        max_wait: Duration,
    },
}

/// Timing options for one validation call
#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    /// Unconditional delay before the first fetch, covering the flush
    /// latency of out-of-process instrumentation
    pub settle: Duration,
    pub policy: RetryPolicy,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            settle: Duration::from_secs_f64(5.0),
            policy: RetryPolicy::SingleShot,
        }
    }
}

impl ValidateOptions {
    /// Single-shot validation after `settle_secs` seconds
    pub fn single_shot(settle_secs: f64) -> Self {
        Self {
            settle: Duration::from_secs_f64(settle_secs),
            policy: RetryPolicy::SingleShot,
        }
    }

    /// Bounded-poll validation after `settle_secs` seconds
    pub fn bounded_poll(settle_secs: f64, interval_secs: f64, max_wait_secs: f64) -> Self {
        Self {
            settle: Duration::from_secs_f64(settle_secs),
            policy: RetryPolicy::BoundedPoll {
                interval: Duration::from_secs_f64(interval_secs),
                max_wait: Duration::from_secs_f64(max_wait_secs),
            },
        }
    }
}

/// Outcome of one validation call
///
/// Missing markers are an expected, first-class test outcome; infrastructure
/// problems surface as `Error`, never as a failed verdict.
#[derive(Debug, Serialize)]
pub struct Verdict {
    /// True iff every required marker was found
    pub passed: bool,
    /// Per-marker presence for diagnostics
    pub report: ScanReport,
    /// False if the post-scan reset was not acknowledged; the log may still
    /// hold this scenario's content
    pub reset_confirmed: bool,
}

impl Verdict {
    /// Markers that were not found
    pub fn missing(&self) -> &[Marker] {
        &self.report.missing
    }
}

/// Validates marker sets against a log resource and resets it between calls
pub struct Validator<R: LogResource> {
    resource: R,
    confirmed_clean: bool,
}

impl<R: LogResource> Validator<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            confirmed_clean: true,
        }
    }

    /// Access the underlying resource
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Run one validation call: settle, fetch, scan, reset, verdict.
    ///
    /// Returns `Err` only for infrastructure problems (the log channel was
    /// unreachable, or a previously failed reset could not be recovered);
    /// missing markers produce `Ok` with a failed verdict. The reset runs
    /// unconditionally once scanning has completed, pass or fail, so a
    /// partially populated log never bleeds into the next scenario.
    pub fn validate(&mut self, markers: &MarkerSet, options: &ValidateOptions) -> Result<Verdict> {
        // A failed reset from the previous call taints the clean-log
        // assumption. Retry it up front; if the log still cannot be
        // truncated, fail loudly rather than risk a stale-content pass.
        if !self.confirmed_clean {
            warn!("previous log reset failed; retrying before validation");
            match self.resource.reset() {
                Ok(()) => self.confirmed_clean = true,
                Err(source) => return Err(Error::StaleLog { source }),
            }
        }

        if !options.settle.is_zero() {
            debug!(settle = ?options.settle, "waiting for instrumentation flush");
            std::thread::sleep(options.settle);
        }

        let report = match options.policy {
            RetryPolicy::SingleShot => {
                let content = self.resource.fetch()?;
                scan(&content, markers)
            }
            RetryPolicy::BoundedPoll { interval, max_wait } => {
                self.poll_scan(markers, interval, max_wait)?
            }
        };

        let reset_confirmed = match self.resource.reset() {
            Ok(()) => {
                self.confirmed_clean = true;
                true
            }
            Err(e) => {
                warn!(error = %e, "log reset failed; next validation will not assume a clean log");
                self.confirmed_clean = false;
                false
            }
        };

        let passed = report.all_found();
        if passed {
            info!(markers = markers.len(), "all markers found");
        } else {
            info!(
                missing = report.missing.len(),
                markers = markers.len(),
                "markers missing"
            );
        }

        Ok(Verdict {
            passed,
            report,
            reset_confirmed,
        })
    }

    /// Fetch and scan until all markers appear or the deadline expires.
    /// Expiry returns the last scan's report (fail-closed).
    fn poll_scan(
        &self,
        markers: &MarkerSet,
        interval: Duration,
        max_wait: Duration,
    ) -> Result<ScanReport> {
        let deadline = Instant::now() + max_wait;

        loop {
            let content = self.resource.fetch()?;
            let report = scan(&content, markers);

            if report.all_found() {
                return Ok(report);
            }

            let now = Instant::now();
            if now >= deadline {
                debug!(max_wait = ?max_wait, "poll window expired with markers still missing");
                return Ok(report);
            }

            std::thread::sleep(interval.min(deadline - now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::MemoryLog;
    use crate::validate::markers::{
        APP_START_SPAN, INITIALIZE_SPAN, NETWORK_CALL_POST_URL, PRESENTATION_SPAN,
    };

    fn no_wait() -> ValidateOptions {
        ValidateOptions::single_shot(0.0)
    }

    #[test]
    fn test_sdk_init_scenario_passes() {
        let log = MemoryLog::new();
        log.append(format!("12:00:01 {INITIALIZE_SPAN} ok"));
        log.append(format!("12:00:02 {APP_START_SPAN} cold"));
        log.append(format!("12:00:03 {PRESENTATION_SPAN}"));

        let mut validator = Validator::new(&log);
        let verdict = validator
            .validate(&MarkerSet::sdk_init(), &no_wait())
            .unwrap();

        assert!(verdict.passed);
        assert!(verdict.missing().is_empty());
        assert!(verdict.reset_confirmed);
        // Reset invoked exactly once, and the log is clean afterwards
        assert_eq!(log.reset_count(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn test_partial_network_span_fails_with_exact_missing_list() {
        let log = MemoryLog::new();
        log.append("Span HTTP POST status=200");

        let mut validator = Validator::new(&log);
        let verdict = validator
            .validate(&MarkerSet::network_post(), &no_wait())
            .unwrap();

        assert!(!verdict.passed);
        assert_eq!(verdict.missing().len(), 1);
        assert_eq!(verdict.missing()[0].as_str(), NETWORK_CALL_POST_URL);
        // Reset still runs on a failed verdict
        assert_eq!(log.reset_count(), 1);
    }

    #[test]
    fn test_empty_log_misses_all_markers() {
        let log = MemoryLog::new();

        let mut validator = Validator::new(&log);
        let markers = MarkerSet::sdk_init();
        let verdict = validator.validate(&markers, &no_wait()).unwrap();

        assert!(!verdict.passed);
        assert_eq!(verdict.missing().len(), markers.len());
    }

    #[test]
    fn test_fetch_failure_is_infrastructure_not_failed_verdict() {
        let log = MemoryLog::new();
        log.set_fail_fetch(true);

        let mut validator = Validator::new(&log);
        let result = validator.validate(&MarkerSet::sdk_init(), &no_wait());

        assert!(matches!(result, Err(Error::Fetch(_))));
        // The state machine never reached scanning, so no reset happened
        assert_eq!(log.reset_count(), 0);
    }

    #[test]
    fn test_reset_failure_keeps_verdict_but_taints_cleanness() {
        let log = MemoryLog::new();
        log.append(INITIALIZE_SPAN);
        log.append(APP_START_SPAN);
        log.append(PRESENTATION_SPAN);
        log.fail_next_resets(1);

        let mut validator = Validator::new(&log);
        let verdict = validator
            .validate(&MarkerSet::sdk_init(), &no_wait())
            .unwrap();

        // Verdict already computed is not overturned by the reset failure
        assert!(verdict.passed);
        assert!(!verdict.reset_confirmed);
        assert!(!log.is_empty());

        // The next call retries the reset up front, recovers, and proceeds
        let verdict = validator
            .validate(&MarkerSet::sdk_init(), &no_wait())
            .unwrap();
        assert!(!verdict.passed); // log was truncated before the fetch
        assert!(verdict.reset_confirmed);
    }

    #[test]
    fn test_unrecoverable_stale_log_fails_loudly() {
        let log = MemoryLog::new();
        log.append(APP_START_SPAN);
        log.fail_next_resets(2);

        let mut validator = Validator::new(&log);
        let first = validator
            .validate(&[APP_START_SPAN].into_iter().collect(), &no_wait())
            .unwrap();
        assert!(first.passed);
        assert!(!first.reset_confirmed);

        // Retry also fails: stale content must not produce a verdict
        let second = validator.validate(&MarkerSet::sdk_init(), &no_wait());
        assert!(matches!(second, Err(Error::StaleLog { .. })));
    }

    #[test]
    fn test_bounded_poll_picks_up_late_markers() {
        let log = MemoryLog::new();
        log.append(INITIALIZE_SPAN);

        let options = ValidateOptions::bounded_poll(0.0, 0.01, 5.0);
        let markers: MarkerSet = [INITIALIZE_SPAN, APP_START_SPAN].into_iter().collect();

        std::thread::scope(|s| {
            s.spawn(|| {
                std::thread::sleep(Duration::from_millis(50));
                log.append(APP_START_SPAN);
            });

            let mut validator = Validator::new(&log);
            let verdict = validator.validate(&markers, &options).unwrap();
            assert!(verdict.passed);
        });
    }

    #[test]
    fn test_bounded_poll_expiry_is_a_failed_verdict() {
        let log = MemoryLog::new();
        log.append(INITIALIZE_SPAN);

        let options = ValidateOptions::bounded_poll(0.0, 0.01, 0.05);
        let markers: MarkerSet = [INITIALIZE_SPAN, APP_START_SPAN].into_iter().collect();

        let mut validator = Validator::new(&log);
        let verdict = validator.validate(&markers, &options).unwrap();

        assert!(!verdict.passed);
        assert_eq!(verdict.missing().len(), 1);
        assert_eq!(verdict.missing()[0].as_str(), APP_START_SPAN);
        // Reset still runs after the poll window expires
        assert_eq!(log.reset_count(), 1);
    }

    #[test]
    fn test_sequential_scenarios_do_not_leak_markers() {
        let log = MemoryLog::new();
        log.append("Span HTTP POST");
        log.append(NETWORK_CALL_POST_URL);

        let mut validator = Validator::new(&log);
        let first = validator
            .validate(&MarkerSet::network_post(), &no_wait())
            .unwrap();
        assert!(first.passed);

        // Nothing new emitted: the same markers must not pass again
        let second = validator
            .validate(&MarkerSet::network_post(), &no_wait())
            .unwrap();
        assert!(!second.passed);
        assert_eq!(second.missing().len(), 2);
    }
}
