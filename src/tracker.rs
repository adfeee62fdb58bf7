use anyhow::Result;
use uuid::Uuid;

use crate::models::{ExtractionResult, JobApplication, Status, default_location};
use crate::store::{JobStore, Loaded};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// List displayed, no form open.
    Idle,
    /// Add form open, draft editable.
    Composing,
    /// Extraction request in flight. The draft stays editable, but a
    /// second extraction is refused until this one completes.
    Extracting,
}

/// Unsaved form fields for a new application.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub role: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub status: Status,
    /// Job description text to send for field extraction.
    pub free_text: String,
}

/// Owns the in-memory application list and the single storage slot.
/// All mutations go through here; every successful mutation mirrors
/// the whole list back to the store.
pub struct Tracker {
    store: JobStore,
    jobs: Vec<JobApplication>,
    mode: Mode,
    pub draft: Draft,
    notice: Option<String>,
}

impl Tracker {
    /// Starts Idle with the persisted list loaded. A corrupt store file
    /// is not fatal: the tracker starts empty and records a warning.
    pub fn new(store: JobStore) -> Self {
        let (jobs, notice) = match store.load() {
            Loaded::Empty => (Vec::new(), None),
            Loaded::List(list) => (list, None),
            Loaded::Corrupt { error } => (
                Vec::new(),
                Some(format!(
                    "Saved applications could not be read ({}); starting with an empty list",
                    error
                )),
            ),
        };
        Self {
            store,
            jobs,
            mode: Mode::Idle,
            draft: Draft::default(),
            notice,
        }
    }

    pub fn jobs(&self) -> &[JobApplication] {
        &self.jobs
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Idle -> Composing with a cleared draft.
    pub fn open_form(&mut self) {
        if self.mode == Mode::Idle {
            self.mode = Mode::Composing;
            self.draft = Draft::default();
        }
    }

    /// Composing -> Idle, discarding the draft. Not available while a
    /// request is in flight; an issued extraction always runs out.
    pub fn cancel(&mut self) {
        if self.mode == Mode::Composing {
            self.mode = Mode::Idle;
            self.draft = Draft::default();
        }
    }

    /// Composing -> Extracting. Returns the text to send, or None when
    /// the guard fails (empty text, or already extracting).
    pub fn begin_extraction(&mut self) -> Option<String> {
        if self.mode != Mode::Composing || self.draft.free_text.trim().is_empty() {
            return None;
        }
        self.mode = Mode::Extracting;
        Some(self.draft.free_text.clone())
    }

    /// Extracting -> Composing. Overwrites the draft fields from the
    /// result (missing location falls back to "Remote") and clears the
    /// free-text field.
    pub fn extraction_succeeded(&mut self, result: ExtractionResult) {
        if self.mode != Mode::Extracting {
            return;
        }
        if let Some(role) = result.role {
            self.draft.role = role;
        }
        if let Some(company) = result.company {
            self.draft.company = company;
        }
        self.draft.location = result.location.unwrap_or_else(default_location);
        self.draft.free_text.clear();
        self.mode = Mode::Composing;
        self.notice = Some("Draft filled from job description".to_string());
    }

    /// Extracting -> Composing with the draft untouched.
    pub fn extraction_failed(&mut self, error: &anyhow::Error) {
        if self.mode != Mode::Extracting {
            return;
        }
        self.mode = Mode::Composing;
        self.notice = Some(format!("Extraction failed: {:#}", error));
    }

    /// Composing -> Idle: creates a record from the draft, prepends it,
    /// persists, and clears the draft. Returns the new id, or None when
    /// the guard (non-empty role and company) fails and nothing changed.
    pub fn submit(&mut self) -> Result<Option<Uuid>> {
        if self.mode != Mode::Composing {
            return Ok(None);
        }
        if self.draft.role.trim().is_empty() || self.draft.company.trim().is_empty() {
            self.notice = Some("Role and company are required".to_string());
            return Ok(None);
        }

        let job = JobApplication::new(
            &self.draft.role,
            &self.draft.company,
            Some(&self.draft.location),
            Some(&self.draft.salary),
            self.draft.status,
        );
        let id = job.id;
        self.jobs.insert(0, job);
        if let Err(e) = self.store.save(&self.jobs) {
            // Keep memory and disk in step
            self.jobs.remove(0);
            return Err(e);
        }
        self.mode = Mode::Idle;
        self.draft = Draft::default();
        Ok(Some(id))
    }

    /// Removes a record by id and persists. Absent id is a no-op, not
    /// an error. Only valid from Idle.
    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        if self.mode != Mode::Idle {
            return Ok(false);
        }
        let kept: Vec<JobApplication> = self.jobs.iter().filter(|j| j.id != id).cloned().collect();
        if kept.len() == self.jobs.len() {
            return Ok(false);
        }
        self.store.save(&kept)?;
        self.jobs = kept;
        Ok(true)
    }

    /// Any status may be set at any time; there are no transition rules.
    pub fn set_status(&mut self, id: Uuid, status: Status) -> Result<bool> {
        if self.mode != Mode::Idle {
            return Ok(false);
        }
        let Some(job) = self.jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(false);
        };
        let previous = job.status;
        job.status = status;
        if let Err(e) = self.store.save(&self.jobs) {
            if let Some(job) = self.jobs.iter_mut().find(|j| j.id == id) {
                job.status = previous;
            }
            return Err(e);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::collections::HashSet;
    use std::fs;
    use std::path::PathBuf;

    struct TempStore {
        path: PathBuf,
    }

    impl TempStore {
        fn new() -> Self {
            Self {
                path: std::env::temp_dir()
                    .join(format!("careeros-tracker-{}.json", Uuid::new_v4())),
            }
        }

        fn store(&self) -> JobStore {
            JobStore::at(&self.path)
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            fs::remove_file(&self.path).ok();
        }
    }

    fn submit_one(tracker: &mut Tracker, role: &str, company: &str) -> Option<Uuid> {
        tracker.open_form();
        tracker.draft.role = role.to_string();
        tracker.draft.company = company.to_string();
        tracker.submit().unwrap()
    }

    #[test]
    fn test_submit_creates_record_with_defaults() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());

        submit_one(&mut tracker, "Engineer", "Acme").unwrap();

        assert_eq!(tracker.mode(), Mode::Idle);
        assert_eq!(tracker.jobs().len(), 1);
        let job = &tracker.jobs()[0];
        assert_eq!(job.role, "Engineer");
        assert_eq!(job.company, "Acme");
        assert_eq!(job.status, Status::Applied);
        assert_eq!(job.location, "Remote");
        assert_eq!(job.date_applied, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_each_submit_grows_list_with_unique_ids() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());

        for i in 0..5 {
            submit_one(&mut tracker, &format!("Role {}", i), "Acme").unwrap();
        }

        assert_eq!(tracker.jobs().len(), 5);
        let ids: HashSet<Uuid> = tracker.jobs().iter().map(|j| j.id).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_newest_submit_is_at_head() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());

        submit_one(&mut tracker, "First", "Acme").unwrap();
        submit_one(&mut tracker, "Second", "Globex").unwrap();

        assert_eq!(tracker.jobs()[0].role, "Second");
        assert_eq!(tracker.jobs()[1].role, "First");
    }

    #[test]
    fn test_submit_with_empty_required_field_is_noop() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());

        tracker.open_form();
        tracker.draft.role = "Engineer".to_string();
        tracker.draft.company = "   ".to_string();
        assert!(tracker.submit().unwrap().is_none());
        assert_eq!(tracker.mode(), Mode::Composing);
        assert!(tracker.jobs().is_empty());

        tracker.draft.role.clear();
        tracker.draft.company = "Acme".to_string();
        assert!(tracker.submit().unwrap().is_none());
        assert!(tracker.jobs().is_empty());
    }

    #[test]
    fn test_delete_persists_removal() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());

        let first = submit_one(&mut tracker, "First", "Acme").unwrap();
        submit_one(&mut tracker, "Second", "Globex").unwrap();

        assert!(tracker.delete(first).unwrap());
        assert_eq!(tracker.jobs().len(), 1);
        assert_eq!(tracker.jobs()[0].role, "Second");

        // Removal survives a reload from disk
        let reloaded = Tracker::new(tmp.store());
        assert_eq!(reloaded.jobs().len(), 1);
        assert!(reloaded.jobs().iter().all(|j| j.id != first));
        assert_eq!(reloaded.jobs()[0].role, "Second");
    }

    #[test]
    fn test_delete_absent_id_is_noop() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());
        submit_one(&mut tracker, "Engineer", "Acme").unwrap();

        assert!(!tracker.delete(Uuid::new_v4()).unwrap());
        assert_eq!(tracker.jobs().len(), 1);
    }

    #[test]
    fn test_cancel_discards_draft_without_persisting() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());

        tracker.open_form();
        tracker.draft.role = "Engineer".to_string();
        tracker.draft.company = "Acme".to_string();
        tracker.cancel();

        assert_eq!(tracker.mode(), Mode::Idle);
        assert!(tracker.jobs().is_empty());
        tracker.open_form();
        assert!(tracker.draft.role.is_empty());
    }

    #[test]
    fn test_extraction_guard_requires_free_text() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());
        tracker.open_form();

        assert!(tracker.begin_extraction().is_none());
        tracker.draft.free_text = "  ".to_string();
        assert!(tracker.begin_extraction().is_none());
        assert_eq!(tracker.mode(), Mode::Composing);
    }

    #[test]
    fn test_second_extraction_refused_while_in_flight() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());
        tracker.open_form();
        tracker.draft.free_text = "Hiring a PM at Globex".to_string();

        assert!(tracker.begin_extraction().is_some());
        assert_eq!(tracker.mode(), Mode::Extracting);
        assert!(tracker.begin_extraction().is_none());
    }

    #[test]
    fn test_extraction_success_fills_draft_and_clears_text() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());
        tracker.open_form();
        tracker.draft.free_text = "Hiring a PM at Globex in NYC".to_string();
        tracker.begin_extraction().unwrap();

        tracker.extraction_succeeded(ExtractionResult {
            role: Some("PM".to_string()),
            company: Some("Globex".to_string()),
            location: Some("NYC".to_string()),
        });

        assert_eq!(tracker.mode(), Mode::Composing);
        assert_eq!(tracker.draft.role, "PM");
        assert_eq!(tracker.draft.company, "Globex");
        assert_eq!(tracker.draft.location, "NYC");
        assert!(tracker.draft.free_text.is_empty());
    }

    #[test]
    fn test_extraction_missing_location_defaults_to_remote() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());
        tracker.open_form();
        tracker.draft.free_text = "Some posting".to_string();
        tracker.begin_extraction().unwrap();

        tracker.extraction_succeeded(ExtractionResult {
            role: Some("SRE".to_string()),
            company: Some("Initech".to_string()),
            location: None,
        });

        assert_eq!(tracker.draft.location, "Remote");
    }

    #[test]
    fn test_extraction_failure_leaves_draft_untouched() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());
        tracker.open_form();
        tracker.draft.role = "Engineer".to_string();
        tracker.draft.company = "Acme".to_string();
        tracker.draft.free_text = "Some posting".to_string();
        tracker.begin_extraction().unwrap();

        tracker.extraction_failed(&anyhow!("connection refused"));

        assert_eq!(tracker.mode(), Mode::Composing);
        assert_eq!(tracker.draft.role, "Engineer");
        assert_eq!(tracker.draft.company, "Acme");
        assert_eq!(tracker.draft.free_text, "Some posting");
        assert!(tracker.notice().unwrap().contains("Extraction failed"));
    }

    #[test]
    fn test_corrupt_store_starts_empty_with_warning() {
        let tmp = TempStore::new();
        fs::write(&tmp.path, "].oops").unwrap();

        let tracker = Tracker::new(tmp.store());
        assert!(tracker.jobs().is_empty());
        assert!(tracker.notice().unwrap().contains("could not be read"));
    }

    #[test]
    fn test_fresh_store_has_no_warning() {
        let tmp = TempStore::new();
        let tracker = Tracker::new(tmp.store());
        assert!(tracker.jobs().is_empty());
        assert!(tracker.notice().is_none());
    }

    #[test]
    fn test_set_status_persists() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());
        let id = submit_one(&mut tracker, "Engineer", "Acme").unwrap();

        assert!(tracker.set_status(id, Status::Offer).unwrap());
        assert_eq!(tracker.jobs()[0].status, Status::Offer);

        let reloaded = Tracker::new(tmp.store());
        assert_eq!(reloaded.jobs()[0].status, Status::Offer);
    }

    #[test]
    fn test_submits_round_trip_through_store() {
        let tmp = TempStore::new();
        let mut tracker = Tracker::new(tmp.store());
        submit_one(&mut tracker, "First", "Acme").unwrap();
        submit_one(&mut tracker, "Second", "Globex").unwrap();

        let reloaded = Tracker::new(tmp.store());
        assert_eq!(reloaded.jobs(), tracker.jobs());
    }
}
