//! `OrderQueue` — pending orders awaiting an idle manipulant.
//!
//! Popping is destructive: an order handed out is never returned to the
//! queue, whether it ends up delivered or dropped.

use std::collections::VecDeque;

use crate::Order;

/// Order in which pending orders are handed out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchPolicy {
    /// Submission order.
    #[default]
    Fifo,
    /// Higher `priority` first; submission order among equals.
    Priority,
}

#[derive(Clone, Debug, Default)]
pub struct OrderQueue {
    policy:  DispatchPolicy,
    pending: VecDeque<Order>,
}

impl OrderQueue {
    pub fn new(policy: DispatchPolicy) -> Self {
        Self { policy, pending: VecDeque::new() }
    }

    /// Queue `orders` in the given order, subject to `policy`.
    pub fn from_orders(orders: impl IntoIterator<Item = Order>, policy: DispatchPolicy) -> Self {
        let mut queue = Self::new(policy);
        for order in orders {
            queue.push(order);
        }
        queue
    }

    pub fn push(&mut self, order: Order) {
        match self.policy {
            DispatchPolicy::Fifo => self.pending.push_back(order),
            DispatchPolicy::Priority => {
                // Insert behind every order of equal or higher priority.
                let at = self
                    .pending
                    .iter()
                    .position(|o| o.priority < order.priority)
                    .unwrap_or(self.pending.len());
                self.pending.insert(at, order);
            }
        }
    }

    pub fn pop(&mut self) -> Option<Order> {
        self.pending.pop_front()
    }

    pub fn peek(&self) -> Option<&Order> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Pending orders in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.pending.iter()
    }
}
