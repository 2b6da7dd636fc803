//! The `SimulationSession` struct and its tick loop.

use log::{debug, info};

use hs_agent::{AgentStep, Manipulant, StepParams};
use hs_core::{AgentId, ObjectId, Point, RunConfig, SimClock, SpeedMultiplier};
use hs_orders::{DispatchPolicy, Order, OrderQueue};
use hs_spatial::RouteTable;

use crate::dispatch::dispatch;
use crate::results::{AgentSummary, Aggregate, SimResults, StopReason, TickSummary};
use crate::stats::Collector;
use crate::{SimError, SimObserver, SimResult};

/// Where the session stands between ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Paused,
    Finished(StopReason),
}

/// What one call to [`SimulationSession::tick`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// A tick was processed.
    Advanced(TickSummary),
    /// Paused; nothing happened.
    Paused,
    /// The session stopped on this call.  Results are produced exactly once.
    Finished(Box<SimResults>),
    /// Already finished earlier; nothing happened.
    Stopped,
}

/// One simulation run: inputs, agents, clock, and collector.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].  Owns everything it
/// touches; two sessions never share state.
pub struct SimulationSession {
    pub(crate) config:     RunConfig,
    pub(crate) multiplier: SpeedMultiplier,
    pub(crate) routes:     RouteTable,
    pub(crate) orders:     Vec<Order>,
    pub(crate) policy:     DispatchPolicy,
    /// Park object and handover point for each agent at spawn, by `AgentId`.
    pub(crate) spawns:     Vec<(ObjectId, Point)>,

    pub(crate) queue:      OrderQueue,
    pub(crate) agents:     Vec<Manipulant>,
    pub(crate) clock:      SimClock,
    pub(crate) collector:  Collector,
    pub(crate) status:     SessionStatus,
    pub(crate) halt:       bool,
}

impl SimulationSession {
    pub(crate) fn new(
        config: RunConfig,
        routes: RouteTable,
        orders: Vec<Order>,
        policy: DispatchPolicy,
        spawns: Vec<(ObjectId, Point)>,
    ) -> Self {
        let mut session = Self {
            multiplier: config.speed_multiplier,
            config,
            routes,
            orders,
            policy,
            spawns,
            queue:      OrderQueue::new(policy),
            agents:     Vec::new(),
            clock:      SimClock::new(),
            collector:  Collector::new(),
            status:     SessionStatus::Running,
            halt:       false,
        };
        session.reset();
        session
    }

    // ── Controls ──────────────────────────────────────────────────────────

    /// Stop issuing ticks without losing state.
    pub fn pause(&mut self) {
        if self.status == SessionStatus::Running {
            self.status = SessionStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == SessionStatus::Paused {
            self.status = SessionStatus::Running;
        }
    }

    /// Ask the session to stop.  The next [`tick`](Self::tick) finishes it,
    /// even while paused.
    pub fn halt(&mut self) {
        self.halt = true;
    }

    /// Change playback speed from the next tick on.
    pub fn set_speed_multiplier(&mut self, multiplier: SpeedMultiplier) {
        self.multiplier = multiplier;
    }

    /// Start over with the same inputs: fresh agents, full queue, zero clock.
    /// The route table is kept.
    pub fn reset(&mut self) {
        self.queue = OrderQueue::from_orders(self.orders.iter().cloned(), self.policy);
        self.agents = self
            .spawns
            .iter()
            .enumerate()
            .map(|(i, &(object, at))| Manipulant::new(AgentId(i as u32), object, at))
            .collect();
        self.clock = SimClock::new();
        self.collector = Collector::new();
        self.multiplier = self.config.speed_multiplier;
        self.status = SessionStatus::Running;
        self.halt = false;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn agents(&self) -> &[Manipulant] {
        &self.agents
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn speed_multiplier(&self) -> SpeedMultiplier {
        self.multiplier
    }

    /// Every order delivered or dropped and every agent idle.
    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
            && self.collector.settled() == self.orders.len()
            && self.agents.iter().all(Manipulant::is_idle)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Tick until the session finishes and return its results.
    ///
    /// Fails if the session is paused or already finished.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimResults> {
        match self.status {
            SessionStatus::Paused if !self.halt => return Err(SimError::Paused),
            SessionStatus::Finished(_) => return Err(SimError::Finished),
            _ => {}
        }
        info!(
            "session start: {} agents, {} orders, {}",
            self.agents.len(),
            self.orders.len(),
            self.multiplier
        );
        loop {
            match self.tick(observer) {
                TickOutcome::Advanced(_) => {}
                TickOutcome::Finished(results) => return Ok(*results),
                TickOutcome::Paused => return Err(SimError::Paused),
                TickOutcome::Stopped => return Err(SimError::Finished),
            }
        }
    }

    /// Process up to `n` ticks.  Returns the results if the session finished
    /// within them.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> Option<SimResults> {
        for _ in 0..n {
            match self.tick(observer) {
                TickOutcome::Advanced(_) => {}
                TickOutcome::Finished(results) => return Some(*results),
                TickOutcome::Paused | TickOutcome::Stopped => break,
            }
        }
        None
    }

    /// Process a single tick.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> TickOutcome {
        // ── Phase 0: control ──────────────────────────────────────────────
        if let SessionStatus::Finished(_) = self.status {
            return TickOutcome::Stopped;
        }
        if self.halt {
            return self.finish(StopReason::Halted, observer);
        }
        if self.status == SessionStatus::Paused {
            return TickOutcome::Paused;
        }
        if self.is_complete() {
            return self.finish(StopReason::Completed, observer);
        }

        // ── Phase 1: clock ────────────────────────────────────────────────
        self.clock.advance(f64::from(self.multiplier.factor()));
        if self.clock.elapsed_secs > self.config.max_sim_secs {
            return self.finish(StopReason::TimeLimit, observer);
        }
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 2: dispatch ─────────────────────────────────────────────
        let dispatched = dispatch(&mut self.queue, &mut self.agents, &self.routes);
        for dropped in dispatched.dropped {
            observer.on_order_dropped(&dropped);
            self.collector.record_dropped(dropped);
        }

        // ── Phase 3: step (read-only snapshot) ────────────────────────────
        let params = StepParams {
            speed:       self.config.base_speed() * self.multiplier.as_f32(),
            epsilon:     self.config.arrival_epsilon,
            dwell_ticks: self.config.dwell_ticks,
        };
        let steps = self.compute_steps(&params);

        // ── Phase 4: commit in ascending AgentId order ────────────────────
        for step in steps {
            self.collector.record_step(&step);
            let agent = &mut self.agents[step.agent.index()];
            if let Some(event) = &step.event {
                debug!("{now} {}: {event:?}", agent.id);
            }
            agent.apply(step);
        }

        let summary = TickSummary {
            tick:         now,
            elapsed_secs: self.clock.elapsed_secs,
            busy_agents:  self.agents.iter().filter(|a| !a.is_idle()).count(),
            queued:       self.queue.len(),
            completed:    self.collector.completed.len(),
            dropped:      self.collector.dropped.len(),
            distance:     self.collector.distance,
        };
        observer.on_tick_end(&summary);
        TickOutcome::Advanced(summary)
    }

    fn compute_steps(&self, params: &StepParams) -> Vec<AgentStep> {
        #[cfg(not(feature = "parallel"))]
        {
            self.agents.iter().map(|a| a.step(params)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            // `collect` on an indexed parallel iterator keeps agent order.
            self.agents.par_iter().map(|a| a.step(params)).collect()
        }
    }

    /// Package the results, mark the session finished, and notify once.
    fn finish<O: SimObserver>(&mut self, reason: StopReason, observer: &mut O) -> TickOutcome {
        let results = self.results(reason);
        self.status = SessionStatus::Finished(reason);
        self.halt = false;
        info!(
            "session finished ({reason:?}) at {}: {} trips, {} dropped",
            self.clock,
            results.aggregate.trips,
            results.dropped_orders.len()
        );
        observer.on_finish(&results);
        TickOutcome::Finished(Box::new(results))
    }

    /// Snapshot of the current totals.
    pub fn results(&self, reason: StopReason) -> SimResults {
        let agents: Vec<AgentSummary> = self.agents.iter().map(AgentSummary::of).collect();
        SimResults {
            stop_reason:      reason,
            aggregate:        Aggregate::sum(&agents),
            agents,
            heatmap:          self.collector.heatmap.to_sorted(),
            elapsed_secs:     self.clock.elapsed_secs,
            ticks:            self.clock.current_tick.0,
            submitted_orders: self.orders.len(),
            completed_orders: self.collector.completed.clone(),
            dropped_orders:   self.collector.dropped.clone(),
            units_per_metre:  self.config.units_per_metre,
        }
    }
}
