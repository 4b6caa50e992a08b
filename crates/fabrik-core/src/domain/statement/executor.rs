//! Statement execution collaborator and the paired write entry point

use tracing::debug;

use crate::error::Result;

use super::bindings::{Bindings, populate_bindings};
use super::plan::{WritePlan, build_template};
use super::template::WriteTemplate;

/// Collaborator executing one built statement as a single atomic unit
///
/// Template and bindings must come from the paired builder/populator for the
/// same entity snapshot. This layer performs no retries and assumes
/// all-or-nothing execution.
pub trait StatementExecutor {
    fn execute(&mut self, template: &WriteTemplate, bindings: &Bindings) -> Result<()>;
}

/// Entry point for writes
///
/// Builds template and bindings from one [`WritePlan`] walk and hands both
/// to the executor, so the two halves always describe the same snapshot.
pub struct GraphWriter<E: StatementExecutor> {
    executor: E,
}

impl<E: StatementExecutor> GraphWriter<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Execute the write statement for `plan`
    pub fn write(&mut self, plan: &WritePlan) -> Result<()> {
        let template = build_template(plan);
        let bindings = populate_bindings(plan);
        debug!(
            subject = %plan.subject(),
            triples = template.len(),
            bound = bindings.len(),
            "executing write statement"
        );
        self.executor.execute(&template, &bindings)
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_inner(self) -> E {
        self.executor
    }
}
