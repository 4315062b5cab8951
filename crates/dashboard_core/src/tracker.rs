use std::collections::HashSet;

use crate::{JobId, JobResult};

/// Job ids still waiting for a result, in upload order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutstandingJobs {
    ids: Vec<JobId>,
}

impl OutstandingJobs {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = JobId>,
    {
        let mut jobs = Self::default();
        jobs.replace(ids);
        jobs
    }

    /// Replaces the whole set. Repeated ids collapse to their first position.
    pub fn replace<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = JobId>,
    {
        let mut seen = HashSet::new();
        self.ids = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
    }

    /// Removes every id that has at least one result in `batch`.
    ///
    /// Ids absent from the batch stay outstanding. Results for unknown ids
    /// are ignored here. Returns the number of ids removed.
    pub fn reconcile(&mut self, batch: &[JobResult]) -> usize {
        let fetched: HashSet<&str> = batch.iter().map(|result| result.job_id.as_str()).collect();
        let before = self.ids.len();
        self.ids.retain(|id| !fetched.contains(id.as_str()));
        before - self.ids.len()
    }

    pub fn ids(&self) -> &[JobId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.ids.iter().any(|id| id == job_id)
    }
}
