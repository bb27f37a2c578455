//! Agents and automatic delegation tracking.

use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Instant;

use crate::details::Details;
use crate::kind::StepKind;
use crate::shared::SharedTimeline;
use crate::step::Entry;
use crate::Result;

/// A unit of work a coordinator can delegate to.
///
/// # Example
///
/// ```rust
/// use workflow_trace::{Agent, FnAgent};
///
/// # tokio_test::block_on(async {
/// let echo = FnAgent::new("echo", |q: String| async move {
///     Ok::<String, workflow_trace::Error>(q)
/// });
/// assert_eq!(echo.run("hi".to_string()).await.unwrap(), "hi");
/// # });
/// ```
#[async_trait]
pub trait Agent: Send + Sync {
    /// The input type for this agent.
    type Input: Send;
    /// The output type produced by this agent.
    type Output: Send;

    /// Execute the agent on `input`.
    async fn run(&self, input: Self::Input) -> Result<Self::Output>;

    /// Name recorded as the emitting agent of its steps.
    fn name(&self) -> &str;

    /// Metadata recorded alongside a successful run. Empty by default.
    fn describe(&self, _output: &Self::Output) -> Details {
        Details::new()
    }
}

/// An agent constructed from a name and an async closure.
pub struct FnAgent<I, O, F> {
    name: String,
    f: F,
    _phantom: PhantomData<fn(I) -> O>,
}

impl<I, O, F, Fut> FnAgent<I, O, F>
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    I: Send + 'static,
    O: Send + 'static,
    Fut: Future<Output = Result<O>> + Send + 'static,
{
    /// Create a new `FnAgent` called `name`.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<I, O, F, Fut> Agent for FnAgent<I, O, F>
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    I: Send + 'static,
    O: Send + 'static,
    Fut: Future<Output = Result<O>> + Send + 'static,
{
    type Input = I;
    type Output = O;

    async fn run(&self, input: I) -> Result<O> {
        (self.f)(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wraps an agent so every run is recorded on a shared timeline.
///
/// For each run, `InstrumentedAgent` appends:
/// - an `agent_call` step by the delegating component before the inner agent runs
/// - a `result` step by the agent, with its [`describe`](Agent::describe)
///   details and elapsed seconds, on success
/// - an `error` step by the agent, with the failure message and elapsed
///   seconds, on failure
///
/// The inner result is returned unchanged.
///
/// # Example
///
/// ```rust
/// use workflow_trace::{Agent, FnAgent, InstrumentedAgent, SharedTimeline, StepKind};
///
/// # tokio_test::block_on(async {
/// let timeline = SharedTimeline::new("Research");
/// let research = FnAgent::new("research", |q: String| async move {
///     Ok::<String, workflow_trace::Error>(format!("findings for {q}"))
/// });
/// let tracked = InstrumentedAgent::new(research, timeline.clone(), "coordinator");
///
/// tracked.run("rust".to_string()).await.unwrap();
///
/// let snapshot = timeline.snapshot();
/// assert_eq!(snapshot.steps()[0].kind(), StepKind::AgentCall);
/// assert_eq!(snapshot.steps()[1].kind(), StepKind::Result);
/// # });
/// ```
pub struct InstrumentedAgent<A> {
    inner: A,
    timeline: SharedTimeline,
    caller: String,
}

impl<A: Agent> InstrumentedAgent<A> {
    /// Wrap `inner`, recording delegations from `caller` onto `timeline`.
    pub fn new(inner: A, timeline: SharedTimeline, caller: impl Into<String>) -> Self {
        Self {
            inner,
            timeline,
            caller: caller.into(),
        }
    }

    /// Access the inner agent.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

#[async_trait]
impl<A> Agent for InstrumentedAgent<A>
where
    A: Agent,
    A::Input: 'static,
    A::Output: 'static,
{
    type Input = A::Input;
    type Output = A::Output;

    async fn run(&self, input: A::Input) -> Result<A::Output> {
        let name = self.inner.name();
        self.timeline.log(
            StepKind::AgentCall,
            self.caller.as_str(),
            format!("Delegate to {name}"),
        );

        let start = Instant::now();
        let result = self.inner.run(input).await;
        let elapsed = start.elapsed().as_secs_f64();

        let entry = match &result {
            Ok(output) => Entry::new(StepKind::Result, name, format!("{name} completed"))
                .with_details(self.inner.describe(output)),
            Err(e) => Entry::new(StepKind::Error, name, format!("{name} failed: {e}")),
        };
        self.timeline.append(entry.with_duration(elapsed));

        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn describe(&self, output: &A::Output) -> Details {
        self.inner.describe(output)
    }
}
