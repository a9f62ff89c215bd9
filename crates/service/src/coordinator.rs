//! Request coordinator: one submission in, one terminal outcome out.
//!
//! Pipeline order is fixed: validate, rate check, duplicate check, persist.
//! Nothing earlier in the pipeline sees a side effect from anything later:
//! validation failures touch no counters or storage, and a rate-limit
//! rejection charges nothing. A submission that passes the rate check is
//! charged immediately, so a later duplicate rejection still consumes quota.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use intake_core::limits::MAX_PAGE_SIZE;
use intake_core::{DemoRequest, Error, Result};
use intake_store::{RequestStore, WriteOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use telemetry::metrics;
use tracing::{debug, info, warn};

use crate::duplicate::find_duplicate;
use crate::rate_limit::{SharedRateLimiter, Verdict};

/// Pagination metadata for a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

/// One page of records, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestPage {
    pub requesters: Vec<DemoRequest>,
    pub pagination: Pagination,
}

/// Orchestrates the submission pipeline over the limiter and the store.
pub struct IntakeCoordinator {
    store: Arc<RequestStore>,
    limiter: SharedRateLimiter,
    /// Serializes rate check, duplicate check, and append. Two same-email
    /// submissions must not both pass the duplicate check before either
    /// record lands.
    submit_lock: tokio::sync::Mutex<()>,
}

impl IntakeCoordinator {
    pub fn new(store: Arc<RequestStore>, limiter: SharedRateLimiter) -> Self {
        Self {
            store,
            limiter,
            submit_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Run one submission through the pipeline.
    ///
    /// On success the created record is returned; every rejection comes back
    /// as the matching [`Error`] variant.
    pub async fn submit(&self, body: &Value, ip: &str, now: DateTime<Utc>) -> Result<DemoRequest> {
        let start = Instant::now();
        metrics().submissions_received.inc();

        let submission = intake_core::validate_submission(body).map_err(|errors| {
            metrics().rejected_validation.inc();
            debug!(ip = %ip, fields = errors.len(), "Submission failed validation");
            Error::Validation(errors)
        })?;

        let _guard = self.submit_lock.lock().await;

        if let Verdict::Limited {
            scope,
            window,
            retry_after_secs,
        } = self.limiter.check(ip, &submission.email, now)
        {
            metrics().rejected_rate_limit.inc();
            warn!(
                ip = %ip,
                scope = scope.as_str(),
                window = window.as_str(),
                "Submission rate limited"
            );
            return Err(Error::RateLimited {
                scope,
                window,
                retry_after_secs,
            });
        }

        let existing = self.store.list_all().await;
        if let Some(prior) = find_duplicate(&existing, &submission.email, now) {
            metrics().rejected_duplicate.inc();
            debug!(
                existing_request_id = %prior.request_id,
                "Duplicate submission suppressed"
            );
            return Err(Error::Duplicate {
                existing_request_id: prior.request_id.clone(),
                submitted_at: prior.created_at,
            });
        }

        let record = DemoRequest::from_submission(submission, ip, now);
        let outcome = self.store.append(record.clone()).await;
        metrics().submissions_accepted.inc();

        let latency_ms = start.elapsed().as_millis() as u64;
        metrics().submit_latency_ms.observe(latency_ms);
        info!(
            request_id = %record.request_id,
            user_type = record.user_type.as_str(),
            ip = %ip,
            durable = matches!(outcome, WriteOutcome::Durable),
            latency_ms,
            "Demo request accepted"
        );

        Ok(record)
    }

    /// Return one page of the merged store view, newest first.
    pub async fn list(&self, page: i64, size: i64) -> Result<RequestPage> {
        if page < 0 || size < 1 || size > MAX_PAGE_SIZE {
            return Err(Error::invalid_params("Invalid pagination parameters"));
        }

        let start = Instant::now();
        metrics().list_requests.inc();

        let mut records = self.store.list_all().await;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total_elements = records.len() as i64;
        let total_pages = (total_elements + size - 1) / size;
        let offset = page.saturating_mul(size);

        let requesters: Vec<DemoRequest> = records
            .into_iter()
            .skip(offset.min(total_elements) as usize)
            .take(size as usize)
            .collect();

        metrics()
            .list_latency_ms
            .observe(start.elapsed().as_millis() as u64);

        Ok(RequestPage {
            requesters,
            pagination: Pagination {
                current_page: page,
                page_size: size,
                total_elements,
                total_pages,
            },
        })
    }
}
