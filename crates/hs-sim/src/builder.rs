//! Fluent builder for constructing a [`SimulationSession`].

use std::collections::HashSet;

use log::info;

use hs_core::{ObjectId, Point, RunConfig};
use hs_orders::{DispatchPolicy, Order, OrderError};
use hs_spatial::{Corridor, Layout, RouteTable};

use crate::{SimError, SimResult, SimulationSession};

/// Fluent builder for [`SimulationSession`].
///
/// # Required inputs
///
/// - [`Layout`] — hall bounds, machines, warehouses
/// - corridors — preferred lanes (may be empty)
/// - orders — in submission order
/// - [`RunConfig`] — agent count, walking speed, multiplier, limits
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                 |
/// |-------------------------|-------------------------|
/// | `.dispatch_policy(p)`   | `DispatchPolicy::Fifo`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut session = SessionBuilder::new(layout, corridors, orders, config)
///     .dispatch_policy(DispatchPolicy::Priority)
///     .build()?;
/// let results = session.run(&mut NoopObserver)?;
/// ```
pub struct SessionBuilder {
    layout:    Layout,
    corridors: Vec<Corridor>,
    orders:    Vec<Order>,
    config:    RunConfig,
    policy:    DispatchPolicy,
}

impl SessionBuilder {
    pub fn new(layout: Layout, corridors: Vec<Corridor>, orders: Vec<Order>, config: RunConfig) -> Self {
        Self { layout, corridors, orders, config, policy: DispatchPolicy::Fifo }
    }

    pub fn dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate every input, compute the route table, and spawn the agents.
    ///
    /// Agent `i` starts parked at machine `i mod machine_count` (warehouses
    /// are used if the hall has no machines).
    pub fn build(self) -> SimResult<SimulationSession> {
        // ── Validate inputs ───────────────────────────────────────────────
        self.config.validate()?;
        self.layout.validate()?;

        let mut seen = HashSet::with_capacity(self.orders.len());
        for order in &self.orders {
            order.validate()?;
            order.validate_objects(|id| self.layout.contains(id))?;
            if !seen.insert(order.id) {
                return Err(OrderError::DuplicateOrder(order.id).into());
            }
        }

        let parks = if self.layout.machines.is_empty() {
            &self.layout.warehouses
        } else {
            &self.layout.machines
        };
        if parks.is_empty() {
            return Err(SimError::EmptyLayout);
        }
        let spawns: Vec<(ObjectId, Point)> = (0..self.config.manipulant_count as usize)
            .map(|i| {
                let park = &parks[i % parks.len()];
                (park.id, park.handover_point())
            })
            .collect();

        // ── Routes (synchronous, before any agent moves) ──────────────────
        let routes = RouteTable::build(&self.layout, &self.corridors)?;

        info!(
            "session built: {} objects, {} corridors, {} orders, {} agents",
            self.layout.object_count(),
            self.corridors.len(),
            self.orders.len(),
            spawns.len()
        );

        Ok(SimulationSession::new(self.config, routes, self.orders, self.policy, spawns))
    }
}
