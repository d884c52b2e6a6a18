//! Background network thread for the TUI.
//!
//! The UI thread never blocks on HTTP: it queues [`Job`]s and polls for
//! [`JobResult`]s each tick. Jobs run one at a time in submission order.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::api::{ApiError, AuthAction, Credentials, MutationStatus, TaskApi};
use crate::client::{self, ClientError, LoadRequest, Snapshot};
use crate::model::{ImportedTask, NewTask, Session, TaskStatus};

/// Work queued by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Authenticate {
        action: AuthAction,
        credentials: Credentials,
    },
    Load(LoadRequest),
    Create(NewTask),
    UpdateStatus { task_id: i64, status: TaskStatus },
    Delete { task_id: i64 },
    Import(Vec<ImportedTask>),
}

/// Outcome delivered back to the UI
#[derive(Debug)]
pub enum JobResult {
    Authenticated(Result<Session, ApiError>),
    Loaded {
        generation: u64,
        result: Result<Snapshot, ApiError>,
    },
    Mutated {
        action: &'static str,
        result: Result<MutationStatus, ApiError>,
    },
    Imported(Result<usize, ClientError>),
}

/// Run a single job against the API
pub fn execute<A: TaskApi + ?Sized>(api: &A, job: Job) -> JobResult {
    match job {
        Job::Authenticate {
            action,
            credentials,
        } => JobResult::Authenticated(api.authenticate(action, &credentials)),
        Job::Load(request) => JobResult::Loaded {
            generation: request.generation,
            result: client::fetch_snapshot(api, &request),
        },
        Job::Create(task) => JobResult::Mutated {
            action: "create",
            result: api.create_task(&task),
        },
        Job::UpdateStatus { task_id, status } => JobResult::Mutated {
            action: "update status",
            result: api.update_status(task_id, &status),
        },
        Job::Delete { task_id } => JobResult::Mutated {
            action: "delete",
            result: api.delete_task(task_id),
        },
        Job::Import(payloads) => JobResult::Imported(client::send_imports(api, &payloads)),
    }
}

/// Drop queued loads that a later queued load supersedes. Other jobs keep
/// their order; only the last load in the queue survives.
pub fn drop_superseded_loads(queue: &mut VecDeque<Job>) {
    let Some(last_load) = queue.iter().rposition(|j| matches!(j, Job::Load(_))) else {
        return;
    };
    let mut index = 0;
    queue.retain(|job| {
        let keep = !matches!(job, Job::Load(_)) || index == last_load;
        index += 1;
        keep
    });
}

/// Handle to the worker thread. Dropping it closes the job channel, which
/// ends the thread once any in-flight request returns.
pub struct Worker {
    jobs: Sender<Job>,
    results: Receiver<JobResult>,
}

impl Worker {
    pub fn spawn<A: TaskApi + Send + 'static>(api: A) -> std::io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (result_tx, result_rx) = mpsc::channel::<JobResult>();
        thread::Builder::new()
            .name("taskdeck-net".into())
            .spawn(move || run_jobs(&api, &job_rx, &result_tx))?;
        Ok(Worker {
            jobs: job_tx,
            results: result_rx,
        })
    }

    pub fn submit(&self, job: Job) {
        if self.jobs.send(job).is_err() {
            tracing::error!("network worker has stopped; job dropped");
        }
    }

    /// Next finished result, if any
    pub fn try_recv(&self) -> Option<JobResult> {
        match self.results.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

fn run_jobs<A: TaskApi>(api: &A, jobs: &Receiver<Job>, results: &Sender<JobResult>) {
    let mut queue = VecDeque::new();
    while let Ok(job) = jobs.recv() {
        queue.push_back(job);
        queue.extend(jobs.try_iter());
        drop_superseded_loads(&mut queue);
        while let Some(job) = queue.pop_front() {
            if results.send(execute(api, job)).is_err() {
                return;
            }
            // Pick up anything queued meanwhile so stale loads can be skipped
            queue.extend(jobs.try_iter());
            drop_superseded_loads(&mut queue);
        }
    }
}
