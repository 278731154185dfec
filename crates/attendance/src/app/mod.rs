//! Application state and workflows.
//!
//! [`App`] holds all UI state explicitly: the current screen, the cached
//! record list, and the optional admin session. The workflows await their
//! remote calls sequentially; nothing here runs concurrently and an
//! in-flight call cannot be cancelled.

mod screen;

use std::time::Duration;

use tracing::{info, warn};

pub use screen::{transition, Event, Screen};

use crate::auth::{AuthError, AuthProvider, Session};
use crate::error::{Error, Result};
use crate::export;
use crate::filter::{summarize, RecordFilter, Summary};
use crate::location::{self, LocationProvider};
use crate::record::{today_stamp, AttendanceRecord, WorkOption};
use crate::store::RecordStore;

/// The attendance form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkInput {
    /// Entered display name (trimmed during validation).
    pub name: String,
    /// Selected attendance type; `None` while nothing is selected.
    pub work_option: Option<WorkOption>,
}

impl MarkInput {
    /// Build an input from a name and a selected option.
    #[must_use]
    pub fn new(name: impl Into<String>, work_option: Option<WorkOption>) -> Self {
        Self {
            name: name.into(),
            work_option,
        }
    }
}

/// Application state plus its three external collaborators.
#[derive(Debug)]
pub struct App<S, A, L> {
    store: S,
    auth: A,
    locator: L,
    location_wait: Duration,
    records: Vec<AttendanceRecord>,
    session: Option<Session>,
    screen: Screen,
}

impl<S, A, L> App<S, A, L>
where
    S: RecordStore,
    A: AuthProvider,
    L: LocationProvider,
{
    /// Create an app over the given collaborators.
    #[must_use]
    pub fn new(store: S, auth: A, locator: L, location_wait: Duration) -> Self {
        Self {
            store,
            auth,
            locator,
            location_wait,
            records: Vec::new(),
            session: None,
            screen: Screen::default(),
        }
    }

    /// The screen currently shown.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The most recently fetched record list (newest first).
    #[must_use]
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// The signed-in admin session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The location collaborator, for pre-submit permission notices.
    #[must_use]
    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Apply a screen event.
    pub fn apply(&mut self, event: Event) {
        self.screen = transition(self.screen, event);
    }

    /// Re-fetch the full record list from the store.
    ///
    /// # Errors
    ///
    /// Returns a store error; the previous cache is kept in that case.
    pub async fn refresh(&mut self) -> Result<()> {
        self.records = self.store.fetch_all().await?;
        Ok(())
    }

    /// Submit one attendance record.
    ///
    /// Validates the input, runs the advisory duplicate check against the
    /// cached snapshot, attaches a position stamp if one can be obtained in
    /// time, persists the record, and re-fetches the list. A location
    /// failure never blocks the write; a persistence failure is returned
    /// as-is and the user must resubmit.
    ///
    /// # Errors
    ///
    /// Returns a validation error ([`Error::NameRequired`],
    /// [`Error::WorkOptionRequired`], [`Error::AlreadyMarked`]) before any
    /// write is attempted, or [`Error::Store`] if the write itself fails.
    pub async fn mark(&mut self, input: &MarkInput) -> Result<AttendanceRecord> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(Error::NameRequired);
        }
        let Some(work_option) = input.work_option else {
            return Err(Error::WorkOptionRequired);
        };

        // Advisory only: reflects the snapshot fetched at last load, so two
        // clients can still race past it.
        let today = today_stamp();
        if self.records.iter().any(|r| r.is_marked_by(name, &today)) {
            self.apply(Event::Duplicate);
            return Err(Error::AlreadyMarked {
                name: name.to_string(),
                date: today,
            });
        }

        let stamp = location::acquire(&self.locator, self.location_wait).await;
        let record = AttendanceRecord::new(name, work_option, stamp);
        let stored = self.store.append(&record).await?;
        info!(username = %stored.username, option = %stored.work_option, "attendance recorded");

        // The write already succeeded; a stale cache is not worth failing
        // the submission over.
        if let Err(error) = self.refresh().await {
            warn!(%error, "could not refresh records after submit");
        }
        self.apply(Event::Submitted);
        Ok(stored)
    }

    /// Sign in as admin and enter the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CredentialsMissing`] when either field is
    /// empty, the provider's classified error on rejection, or a store
    /// error if the dashboard's initial fetch fails.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::CredentialsMissing.into());
        }

        let session = self.auth.sign_in(email.trim(), password).await?;
        info!(email = %session.email, "admin signed in");
        self.session = Some(session);
        self.refresh().await?;
        self.apply(Event::SignedIn);
        Ok(())
    }

    /// End the admin session and return to the role screen.
    ///
    /// The local session is always cleared; a provider failure is logged
    /// rather than keeping the user signed in.
    pub async fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(error) = self.auth.sign_out(session).await {
                warn!(%error, "sign-out failed");
            }
        }
        self.apply(Event::SignedOut);
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(Error::SignInRequired)
    }

    /// The cached records passing `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignInRequired`] without a session.
    pub fn filtered(&self, filter: &RecordFilter) -> Result<Vec<&AttendanceRecord>> {
        self.require_session()?;
        Ok(filter.apply(&self.records, &today_stamp()))
    }

    /// Dashboard summary statistics over the cached records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignInRequired`] without a session.
    pub fn summary(&self) -> Result<Summary> {
        self.require_session()?;
        Ok(summarize(&self.records, &today_stamp()))
    }

    /// CSV text for the records passing `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignInRequired`] without a session.
    pub fn export_csv(&self, filter: &RecordFilter) -> Result<String> {
        Ok(export::to_csv(&self.filtered(filter)?))
    }
}
