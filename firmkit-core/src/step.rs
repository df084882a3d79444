//! Ordered, fail-fast step pipelines
//!
//! A pipeline is an explicit list of step descriptors executed in
//! total order. The driver stops at the first failure and surfaces the
//! failing step's diagnostic; no later step runs. There is no retry
//! and no rollback, so re-invocation after a failure is the operator's
//! call.

use tracing::{error, info};

/// The action a step performs, consumed exactly once when the step runs
pub type StepFn = Box<dyn FnOnce() -> anyhow::Result<()>>;

/// One externally-effectful operation in a pipeline
pub struct Step {
    /// Progress line shown when the step succeeds
    pub description: String,
    /// Operator-facing message attached to a failure of this step
    pub failure_hint: String,
    action: StepFn,
}

impl Step {
    pub fn new(
        description: impl Into<String>,
        failure_hint: impl Into<String>,
        action: impl FnOnce() -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            failure_hint: failure_hint.into(),
            action: Box::new(action),
        }
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Failure of one pipeline step, carrying the underlying diagnostic
#[derive(Debug, thiserror::Error)]
#[error("{failure_hint}: {cause:#}")]
pub struct PipelineError {
    /// Description of the step that failed
    pub step: String,
    /// Operator-facing failure message for that step
    pub failure_hint: String,
    /// The step's underlying error chain
    pub cause: anyhow::Error,
}

/// An ordered sequence of steps with fail-fast execution
pub struct Pipeline {
    name: String,
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Descriptions of every step, in execution order
    pub fn descriptions(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.description.as_str()).collect()
    }

    /// Run every step in order, stopping at the first failure
    ///
    /// Each success is logged; a failure is logged with its diagnostic
    /// and returned without executing any later step.
    pub fn run(self) -> Result<(), PipelineError> {
        let total = self.steps.len();
        info!("Running pipeline '{}' ({} steps)", self.name, total);

        for (index, step) in self.steps.into_iter().enumerate() {
            let Step {
                description,
                failure_hint,
                action,
            } = step;

            info!("[{}/{}] {}", index + 1, total, description);

            if let Err(cause) = action() {
                error!("{}: {:#}", failure_hint, cause);
                return Err(PipelineError {
                    step: description,
                    failure_hint,
                    cause,
                });
            }
        }

        info!("Pipeline '{}' completed", self.name);
        Ok(())
    }
}
