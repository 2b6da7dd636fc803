//! Order dispatch: hand queued orders to idle agents.

use log::{debug, warn};

use hs_agent::{Job, Manipulant};
use hs_core::{AgentId, ObjectId, OrderId};
use hs_orders::OrderQueue;
use hs_spatial::RouteTable;

/// Why an order was dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DropReason {
    /// No route from the order's source to its destination.
    NoDeliveryRoute,
    /// No route from where the agent is parked to the order's source.
    NoApproachRoute,
    /// The agent still held a job; only an inconsistent agent can hit this.
    AgentBusy,
}

/// An order that was popped but could not be carried out.  Never retried.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DroppedOrder {
    pub order:  OrderId,
    pub agent:  AgentId,
    pub source: ObjectId,
    pub dest:   ObjectId,
    pub reason: DropReason,
}

/// Result of one dispatch pass.
#[derive(Debug, Default)]
pub struct Dispatch {
    pub assigned: Vec<(AgentId, OrderId)>,
    pub dropped:  Vec<DroppedOrder>,
}

/// Give each idle agent, in ascending id order, the next order in `queue`.
///
/// An agent whose popped order has to be dropped stays idle until the next
/// tick.
pub fn dispatch(queue: &mut OrderQueue, agents: &mut [Manipulant], routes: &RouteTable) -> Dispatch {
    let mut out = Dispatch::default();

    for agent in agents.iter_mut().filter(|a| a.is_idle()) {
        let Some(order) = queue.pop() else { break };

        let delivery = routes.get(order.source, order.dest);
        let approach = routes.get(agent.parked_at, order.source);
        let reason = match (delivery, approach) {
            (Some(delivery), Some(approach)) => match agent.assign(Job::new(&order, delivery), approach) {
                Ok(()) => {
                    debug!("{} takes order {} ({} -> {})", agent.id, order.id, order.source, order.dest);
                    out.assigned.push((agent.id, order.id));
                    continue;
                }
                Err(_) => DropReason::AgentBusy,
            },
            (None, _) => DropReason::NoDeliveryRoute,
            (Some(_), None) => DropReason::NoApproachRoute,
        };

        warn!(
            "dropping order {} ({} -> {}) for {}: {:?}",
            order.id, order.source, order.dest, agent.id, reason
        );
        out.dropped.push(DroppedOrder {
            order:  order.id,
            agent:  agent.id,
            source: order.source,
            dest:   order.dest,
            reason,
        });
    }

    out
}
