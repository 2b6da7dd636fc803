//! A single manipulant and its per-tick step.

use std::sync::Arc;

use hs_core::{AgentId, ObjectId, OrderId, Point};
use hs_spatial::Route;

use crate::motion::advance_along;
use crate::{AgentError, AgentResult, AgentState, Job, Leg};

// ── Parameters ────────────────────────────────────────────────────────────────

/// Per-tick constants shared by every agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepParams {
    /// Floor units an agent may walk this tick (base speed × multiplier).
    pub speed:       f32,
    /// Waypoint arrival radius.
    pub epsilon:     f32,
    /// Ticks spent loading, and again unloading.
    pub dwell_ticks: u32,
}

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Running totals for one agent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AgentStats {
    pub trips:     u32,
    /// Floor units walked.
    pub distance:  f32,
    pub weight_kg: f32,
    pub pallets:   u32,
}

// ── Step result ───────────────────────────────────────────────────────────────

/// Something noteworthy that happened during a step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepEvent {
    /// Loading finished; the agent now carries the goods.
    PickedUp { order: OrderId },
    /// Unloading finished; counts as one completed trip.
    Delivered { order: OrderId, load_kg: f32, pallets: u32 },
    /// Back at the pickup point; the job is over.
    Returned { order: OrderId, parked_at: ObjectId },
    /// The agent was in a moving or dwelling state with no job and has been
    /// put back to `Idle`.
    Recovered,
}

/// The next state of one agent, computed without mutating it.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentStep {
    pub agent:    AgentId,
    pub position: Point,
    pub state:    AgentState,
    /// Distance covered this tick.
    pub moved:    f32,
    pub event:    Option<StepEvent>,
}

// ── Manipulant ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Manipulant {
    pub id:        AgentId,
    pub position:  Point,
    pub state:     AgentState,
    pub job:       Option<Job>,
    /// Object whose handover point the agent stands at when idle.
    pub parked_at: ObjectId,
    pub stats:     AgentStats,
}

impl Manipulant {
    /// An idle agent standing at `position`, the handover point of `parked_at`.
    pub fn new(id: AgentId, parked_at: ObjectId, position: Point) -> Self {
        Self {
            id,
            position,
            state: AgentState::Idle,
            job: None,
            parked_at,
            stats: AgentStats::default(),
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    #[inline]
    pub fn carrying(&self) -> bool {
        self.state.carrying()
    }

    /// Route of the leg being walked, if moving.
    pub fn current_route(&self) -> Option<&Arc<Route>> {
        self.state.leg().map(|leg| &leg.route)
    }

    /// Cursor into [`current_route`](Self::current_route), if moving.
    pub fn waypoint_index(&self) -> Option<usize> {
        self.state.leg().map(|leg| leg.index)
    }

    /// Start `job`, walking `approach` (parked object → source) first.
    pub fn assign(&mut self, job: Job, approach: Arc<Route>) -> AgentResult<()> {
        if !self.is_idle() || self.job.is_some() {
            return Err(AgentError::Busy(self.id));
        }
        self.job = Some(job);
        self.state = AgentState::MovingToPickup { leg: Leg::forward(approach) };
        Ok(())
    }

    /// Compute this agent's next state.  Pure; see [`apply`](Self::apply).
    pub fn step(&self, params: &StepParams) -> AgentStep {
        let mut out = AgentStep {
            agent:    self.id,
            position: self.position,
            state:    self.state.clone(),
            moved:    0.0,
            event:    None,
        };

        if self.is_idle() {
            return out;
        }
        debug_assert!(self.job.is_some(), "agent {} is {} without a job", self.id, self.state);
        let Some(job) = &self.job else {
            out.state = AgentState::Idle;
            out.event = Some(StepEvent::Recovered);
            return out;
        };

        match &self.state {
            AgentState::Idle => {}

            AgentState::MovingToPickup { leg } => {
                let adv = advance_along(leg, self.position, params.speed, params.epsilon);
                out.position = adv.position;
                out.moved = adv.moved;
                out.state = if adv.arrived {
                    AgentState::Loading { elapsed: 0 }
                } else {
                    AgentState::MovingToPickup { leg: leg.with_index(adv.index) }
                };
            }

            AgentState::Loading { elapsed } => {
                let elapsed = elapsed + 1;
                out.state = if elapsed >= params.dwell_ticks {
                    out.event = Some(StepEvent::PickedUp { order: job.order });
                    AgentState::MovingToDropoff { leg: Leg::forward(Arc::clone(&job.delivery)) }
                } else {
                    AgentState::Loading { elapsed }
                };
            }

            AgentState::MovingToDropoff { leg } => {
                let adv = advance_along(leg, self.position, params.speed, params.epsilon);
                out.position = adv.position;
                out.moved = adv.moved;
                out.state = if adv.arrived {
                    AgentState::Unloading { elapsed: 0 }
                } else {
                    AgentState::MovingToDropoff { leg: leg.with_index(adv.index) }
                };
            }

            AgentState::Unloading { elapsed } => {
                let elapsed = elapsed + 1;
                out.state = if elapsed >= params.dwell_ticks {
                    out.event = Some(StepEvent::Delivered {
                        order:   job.order,
                        load_kg: job.load_kg,
                        pallets: job.pallets,
                    });
                    AgentState::Returning { leg: Leg::backward(Arc::clone(&job.delivery)) }
                } else {
                    AgentState::Unloading { elapsed }
                };
            }

            AgentState::Returning { leg } => {
                let adv = advance_along(leg, self.position, params.speed, params.epsilon);
                out.position = adv.position;
                out.moved = adv.moved;
                if adv.arrived {
                    out.state = AgentState::Idle;
                    out.event = Some(StepEvent::Returned { order: job.order, parked_at: job.source });
                } else {
                    out.state = AgentState::Returning { leg: leg.with_index(adv.index) };
                }
            }
        }

        out
    }

    /// Commit a step computed by [`step`](Self::step).
    pub fn apply(&mut self, step: AgentStep) {
        debug_assert_eq!(step.agent, self.id);
        self.position = step.position;
        self.state = step.state;
        self.stats.distance += step.moved;

        match step.event {
            Some(StepEvent::Delivered { load_kg, pallets, .. }) => {
                self.stats.trips += 1;
                self.stats.weight_kg += load_kg;
                self.stats.pallets += pallets;
            }
            Some(StepEvent::Returned { parked_at, .. }) => {
                self.job = None;
                self.parked_at = parked_at;
            }
            Some(StepEvent::Recovered) => self.job = None,
            Some(StepEvent::PickedUp { .. }) | None => {}
        }
    }
}
