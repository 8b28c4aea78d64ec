//! Application state module

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    domain::{auth::AuthPolicy, mail::dispatch::OutreachService},
    infrastructure::uploads::UploadStore,
};

/// Global application state
#[derive(Clone)]
pub struct AppState<O: OutreachService, A: AuthPolicy> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// Outreach dispatch service
    pub outreach: Arc<O>,

    /// Request authentication policy
    pub auth: Arc<A>,

    /// Storage for uploaded spreadsheets
    pub uploads: Arc<UploadStore>,
}

impl<O, A> AppState<O, A>
where
    O: OutreachService,
    A: AuthPolicy,
{
    /// Create a new application state
    pub fn new(outreach: O, auth: A, uploads: UploadStore) -> Self {
        Self {
            start_time: Utc::now(),
            outreach: Arc::new(outreach),
            auth: Arc::new(auth),
            uploads: Arc::new(uploads),
        }
    }
}

impl<O, A> fmt::Debug for AppState<O, A>
where
    O: OutreachService,
    A: AuthPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("outreach", &"OutreachService")
            .field("auth", &"AuthPolicy")
            .field("uploads", &self.uploads)
            .finish()
    }
}
