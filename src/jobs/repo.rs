use crate::{
    store::{keys, Store},
    BoardError,
};

use super::{demo_jobs, import::parse_import, Job, JobFields};

/// The admin-managed job list. Every mutation writes the whole list back.
pub struct JobRepo {
    store: Store,
    jobs: Vec<Job>,
}

impl JobRepo {
    /// Loads the stored list, seeding the demo jobs when nothing is stored.
    pub async fn load(store: Store) -> JobRepo {
        let jobs = store
            .read_json::<Vec<Job>>(keys::JOBS)
            .await
            .unwrap_or_default();

        let mut repo = JobRepo { store, jobs };
        if repo.jobs.is_empty() {
            tracing::info!("no stored jobs, seeding demo listings");
            repo.jobs = demo_jobs();
            repo.persist().await;
        }
        repo
    }

    async fn persist(&self) {
        self.store.write_json(keys::JOBS, &self.jobs).await;
    }

    pub fn list(&self) -> &[Job] {
        &self.jobs
    }

    pub async fn create(&mut self, fields: JobFields) -> Job {
        let job = Job::new(fields);
        self.jobs.insert(0, job.clone());
        self.persist().await;

        tracing::info!(id = %job.id, title = %job.job_title, "job created");
        job
    }

    /// Unknown ids are a silent no-op.
    pub async fn update(&mut self, id: &str, fields: JobFields) -> Option<Job> {
        let job = self.jobs.iter_mut().find(|job| job.id == id)?;
        job.merge(fields);
        let job = job.clone();
        self.persist().await;

        tracing::info!(id, "job updated");
        Some(job)
    }

    /// Unknown ids are a silent no-op.
    pub async fn delete(&mut self, id: &str) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|job| job.id != id);
        if self.jobs.len() == before {
            tracing::debug!(id, "delete of unknown job ignored");
            return false;
        }

        self.persist().await;
        tracing::info!(id, "job deleted");
        true
    }

    pub async fn clear(&mut self) {
        self.jobs.clear();
        self.persist().await;
    }

    pub async fn replace_all(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.persist().await;
    }

    /// Replaces the list with an exported snapshot. On error nothing changes.
    pub async fn import(&mut self, text: &str) -> Result<usize, BoardError> {
        let jobs = parse_import(text)?;
        let count = jobs.len();
        self.replace_all(jobs).await;

        tracing::info!(count, "jobs imported");
        Ok(count)
    }

    pub fn export_snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.jobs)
    }
}
