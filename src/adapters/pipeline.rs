//! Ordered, short-circuiting constraint pipelines.
//!
//! Each [`Step`] receives the working state for one schema node and returns
//! either [`Flow::Continue`] to hand it to the next step or [`Flow::Halt`] to
//! finish the run with it. Steps run strictly in the order they were added.

use crate::domain::{RandomSource, Schema};
use tracing::debug;

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow<S> {
    Continue(S),
    Halt(S),
}

impl<S> Flow<S> {
    pub fn into_inner(self) -> S {
        match self {
            Flow::Continue(state) | Flow::Halt(state) => state,
        }
    }

    pub fn is_halt(&self) -> bool {
        matches!(self, Flow::Halt(_))
    }
}

/// One constraint handler within a pipeline.
pub trait Step<S>: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, state: S, schema: &Schema, random: &mut dyn RandomSource) -> Flow<S>;
}

/// Plain functions are steps too.
pub struct FnStep<S> {
    name: &'static str,
    run: fn(S, &Schema, &mut dyn RandomSource) -> Flow<S>,
}

impl<S> Step<S> for FnStep<S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, state: S, schema: &Schema, random: &mut dyn RandomSource) -> Flow<S> {
        (self.run)(state, schema, random)
    }
}

pub struct Pipeline<S> {
    name: &'static str,
    steps: Vec<Box<dyn Step<S>>>,
}

impl<S: 'static> Pipeline<S> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    pub fn add(mut self, step: impl Step<S> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn add_fn(self, name: &'static str, run: fn(S, &Schema, &mut dyn RandomSource) -> Flow<S>) -> Self {
        self.add(FnStep { name, run })
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step in order until one halts.
    pub fn run(&self, initial: S, schema: &Schema, random: &mut dyn RandomSource) -> S {
        let mut state = initial;
        for step in &self.steps {
            let flow = step.apply(state, schema, random);
            if flow.is_halt() {
                debug!(pipeline = self.name, step = step.name(), "pipeline halted");
                return flow.into_inner();
            }
            state = flow.into_inner();
        }
        state
    }
}
