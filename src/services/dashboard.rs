use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::models::customer::{Customer, CustomerStatus};

/// Aggregate figures for the dashboard, computed from one fetched page of
/// the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_customers: u64,
    pub leads: u64,
    pub prospects: u64,
    pub active_customers: u64,
    pub inactive: u64,
    /// Mean rating across rated customers only; 0 when none are rated.
    pub average_rating: f64,
}

impl DashboardStats {
    /// Computes stats over a set of customer records.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let mut stats = DashboardStats {
            total_customers: customers.len() as u64,
            ..DashboardStats::default()
        };

        let mut rated = 0u64;
        let mut rating_sum = 0.0;

        for customer in customers {
            match customer.status {
                CustomerStatus::Lead => stats.leads += 1,
                CustomerStatus::Prospect => stats.prospects += 1,
                CustomerStatus::Customer => stats.active_customers += 1,
                CustomerStatus::Inactive => stats.inactive += 1,
            }
            if customer.rating > 0.0 {
                rated += 1;
                rating_sum += customer.rating;
            }
        }

        if rated > 0 {
            stats.average_rating = rating_sum / rated as f64;
        }

        stats
    }
}

/// A fixed-interval background refresh tied to the lifetime of the view
/// that started it.
///
/// The task fires immediately, then on every interval tick. It stops when
/// `stop()` is called or the poller is dropped; cancellation on view
/// teardown is mandatory, not optional.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Starts polling. `task` runs once per tick.
    pub fn start<F, Fut>(interval: Duration, mut task: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                task().await;
            }
        });

        tracing::debug!("⏱️ Poller started (every {:?})", interval);
        Self { handle }
    }

    /// Stops the poller. Idempotent.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("⏹️ Poller stopped");
    }
}
