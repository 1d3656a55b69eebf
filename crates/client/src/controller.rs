//! Filter form state and submission.
//!
//! [`FilterFormController`] owns the [`FilterConfig`] a user edits, keeps the
//! gather/uniq invariant, and drives a submission through a
//! [`ParseRequestAdapter`] while exposing a busy flag.
//!
//! # Invariants
//! - The busy flag is set only while a submission is in flight and is cleared
//!   on every exit path, including when the submission future is dropped.
//! - At most one submission runs at a time; a second one is rejected with
//!   [`ClientError::SubmissionInProgress`] without touching the flag.
//! - Notifications are sent with `try_send` and never block submission.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tracing::debug;

use crate::adapter::ParseRequestAdapter;
use crate::error::{ClientError, Result};
use crate::models::{DownloadHandle, FilterConfig};

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A message for the user about a finished submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Shared, observable "request in progress" flag.
///
/// Clones observe the same state, so a view can hold one while the
/// controller submits.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    /// Whether a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(self))
    }
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a>(&'a BusyFlag);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.0.store(false, Ordering::Release);
    }
}

/// Controller behind the filter form.
pub struct FilterFormController<A> {
    adapter: A,
    filter: FilterConfig,
    busy: BusyFlag,
    notifier: Option<mpsc::Sender<Notification>>,
}

impl<A> FilterFormController<A> {
    /// Create a controller with default filter settings.
    pub fn new(adapter: A) -> Self {
        Self::with_filter(adapter, FilterConfig::default())
    }

    /// Create a controller starting from `filter`.
    pub fn with_filter(adapter: A, mut filter: FilterConfig) -> Self {
        filter.enforce_gather_invariant();
        Self {
            adapter,
            filter,
            busy: BusyFlag::default(),
            notifier: None,
        }
    }

    /// Publish submission outcomes on `sender`.
    pub fn with_notifier(mut self, sender: mpsc::Sender<Notification>) -> Self {
        self.notifier = Some(sender);
        self
    }

    /// Current filter.
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Mutable access for form bindings. Call
    /// [`Self::on_change_uniq_records`] after changing `is_uniq_records`.
    pub fn filter_mut(&mut self) -> &mut FilterConfig {
        &mut self.filter
    }

    /// The adapter submissions go through.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Handle to the busy flag.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Whether a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Take the file name from a chosen file.
    ///
    /// `None`, or a path with no final component, leaves the name unchanged.
    pub fn select_file(&mut self, file: Option<&Path>) {
        if let Some(name) = file.and_then(Path::file_name) {
            self.filter.file_name = Some(name.to_string_lossy().into_owned());
        }
    }

    /// Unique records toggled: gathering is only allowed with unique records.
    pub fn on_change_uniq_records(&mut self) {
        self.filter.enforce_gather_invariant();
    }

    /// Set `is_uniq_records` and apply its side effect.
    pub fn set_uniq_records(&mut self, value: bool) {
        self.filter.is_uniq_records = value;
        self.on_change_uniq_records();
    }

    /// Consume the controller, returning the edited filter.
    pub fn into_filter(self) -> FilterConfig {
        self.filter
    }
}

impl<A: ParseRequestAdapter> FilterFormController<A> {
    /// Submit the current filter.
    ///
    /// The filter is snapshotted, so the form stays editable while the
    /// request runs. The outcome is returned and also published as a
    /// [`Notification`].
    ///
    /// # Errors
    ///
    /// [`ClientError::SubmissionInProgress`] if another submission is running,
    /// otherwise whatever the adapter reports.
    pub async fn parse_log_file(&self) -> Result<DownloadHandle> {
        let Some(_guard) = self.busy.try_acquire() else {
            debug!("Parse request already in progress, ignoring submission");
            return Err(ClientError::SubmissionInProgress);
        };

        let snapshot = self.filter.clone();
        let result = self.adapter.parse_log_file(&snapshot).await;

        match &result {
            Ok(handle) => self.notify(Notification::info(format!(
                "Saved {}",
                handle.path.display()
            ))),
            Err(e) => self.notify(Notification::error(e.user_message())),
        }
        result
    }

    fn notify(&self, notification: Notification) {
        if let Some(sender) = &self.notifier
            && let Err(e) = sender.try_send(notification)
        {
            debug!(error = %e, "Notification dropped");
        }
    }
}
