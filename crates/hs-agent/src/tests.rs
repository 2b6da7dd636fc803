//! Unit tests for hs-agent.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use hs_core::{ObjectId, Point};
    use hs_spatial::Route;

    pub fn route(from: u32, to: u32, points: &[(f32, f32)]) -> Arc<Route> {
        let waypoints: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let length = waypoints.windows(2).map(|w| w[0].distance(w[1])).sum();
        Arc::new(Route { from: ObjectId(from), to: ObjectId(to), waypoints, cost: length, length })
    }
}

// ── Leg ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod leg {
    use hs_core::Point;
    use super::helpers::route;
    use crate::Leg;

    #[test]
    fn forward_and_backward_order() {
        let r = route(0, 1, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let fwd = Leg::forward(r.clone());
        let back = Leg::backward(r);
        assert_eq!(fwd.target(), Some(Point::new(0.0, 0.0)));
        assert_eq!(fwd.destination(), Some(Point::new(10.0, 10.0)));
        assert_eq!(back.target(), Some(Point::new(10.0, 10.0)));
        assert_eq!(back.destination(), Some(Point::new(0.0, 0.0)));
        assert_eq!(back.waypoint(1), Some(Point::new(10.0, 0.0)));
        assert_eq!(back.waypoint(3), None);
    }

    #[test]
    fn cursor() {
        let leg = Leg::forward(route(0, 1, &[(0.0, 0.0), (5.0, 0.0)]));
        assert!(!leg.at_final());
        let moved = leg.with_index(1);
        assert!(moved.at_final());
        assert_eq!(moved.target(), Some(Point::new(5.0, 0.0)));
        assert_eq!(leg.index, 0);
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod motion {
    use hs_core::Point;
    use super::helpers::route;
    use crate::{advance_along, Leg};

    #[test]
    fn partial_step() {
        let leg = Leg::forward(route(0, 1, &[(0.0, 0.0), (100.0, 0.0)]));
        let adv = advance_along(&leg, Point::new(0.0, 0.0), 8.0, 3.0);
        assert_eq!(adv.position, Point::new(8.0, 0.0));
        assert_eq!(adv.index, 1);
        assert_eq!(adv.moved, 8.0);
        assert!(!adv.arrived);
    }

    #[test]
    fn leftover_budget_carries_past_waypoint() {
        let leg = Leg::forward(route(0, 1, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
        let adv = advance_along(&leg, Point::new(0.0, 0.0), 15.0, 0.0);
        assert_eq!(adv.position, Point::new(10.0, 5.0));
        assert_eq!(adv.index, 2);
        assert_eq!(adv.moved, 15.0);
        assert!(!adv.arrived);
    }

    #[test]
    fn never_overshoots_final() {
        let leg = Leg::forward(route(0, 1, &[(0.0, 0.0), (20.0, 0.0)])).with_index(1);
        let adv = advance_along(&leg, Point::new(15.0, 0.0), 8.0, 0.0);
        assert_eq!(adv.position, Point::new(20.0, 0.0));
        assert_eq!(adv.moved, 5.0);
        assert!(adv.arrived);
    }

    #[test]
    fn within_epsilon_of_final_arrives_without_moving() {
        let leg = Leg::forward(route(0, 1, &[(0.0, 0.0), (20.0, 0.0)])).with_index(1);
        let adv = advance_along(&leg, Point::new(18.0, 0.0), 8.0, 3.0);
        assert!(adv.arrived);
        assert_eq!(adv.moved, 0.0);
        assert_eq!(adv.position, Point::new(18.0, 0.0));
    }

    #[test]
    fn single_waypoint_leg_is_immediate() {
        let leg = Leg::forward(route(0, 0, &[(50.0, 50.0)]));
        let adv = advance_along(&leg, Point::new(50.0, 50.0), 8.0, 3.0);
        assert!(adv.arrived);
        assert_eq!(adv.moved, 0.0);
    }

    #[test]
    fn zero_budget_stays_put() {
        let leg = Leg::forward(route(0, 1, &[(0.0, 0.0), (100.0, 0.0)]));
        let adv = advance_along(&leg, Point::new(0.0, 0.0), 0.0, 3.0);
        assert_eq!(adv.position, Point::new(0.0, 0.0));
        assert_eq!(adv.moved, 0.0);
        assert!(!adv.arrived);
    }
}

// ── Manipulant ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod manipulant {
    use hs_core::{AgentId, ObjectId, OrderId, Point};
    use hs_orders::Order;
    use hs_spatial::Route;
    use super::helpers::route;
    use crate::{AgentError, AgentState, Job, Manipulant, StepEvent, StepParams};

    const PARAMS: StepParams = StepParams { speed: 8.0, epsilon: 3.0, dwell_ticks: 3 };

    fn job() -> Job {
        let order = Order::new(OrderId(7), ObjectId(0), ObjectId(1), "p", 32);
        Job::new(&order, route(0, 1, &[(0.0, 0.0), (40.0, 0.0)]))
    }

    fn assigned() -> Manipulant {
        let mut m = Manipulant::new(AgentId(0), ObjectId(0), Point::new(0.0, 0.0));
        let approach = std::sync::Arc::new(Route::stationary(ObjectId(0), Point::new(0.0, 0.0)));
        m.assign(job(), approach).unwrap();
        m
    }

    #[test]
    fn job_derives_load() {
        let j = job();
        assert_eq!(j.pallets, 2);
        assert_eq!(j.load_kg, 20.0);
        assert_eq!((j.source, j.dest), (ObjectId(0), ObjectId(1)));
    }

    #[test]
    fn full_cycle() {
        let mut m = assigned();
        let mut events = Vec::new();
        let mut labels = Vec::new();
        let mut ticks = 0;
        while !m.is_idle() && ticks < 100 {
            let step = m.step(&PARAMS);
            if let Some(e) = &step.event {
                events.push(e.clone());
            }
            m.apply(step);
            labels.push(m.state.label());
            ticks += 1;
        }

        // 1 approach + 3 loading + 5 out + 3 unloading + 5 back.
        assert_eq!(ticks, 17);
        assert_eq!(labels[0], "loading");
        assert_eq!(labels[3], "moving_to_dropoff");
        assert_eq!(labels[8], "unloading");
        assert_eq!(labels[11], "returning");
        assert_eq!(
            events,
            vec![
                StepEvent::PickedUp { order: OrderId(7) },
                StepEvent::Delivered { order: OrderId(7), load_kg: 20.0, pallets: 2 },
                StepEvent::Returned { order: OrderId(7), parked_at: ObjectId(0) },
            ]
        );
        assert_eq!(m.stats.trips, 1);
        assert_eq!(m.stats.distance, 80.0);
        assert_eq!(m.stats.weight_kg, 20.0);
        assert_eq!(m.stats.pallets, 2);
        assert_eq!(m.position, Point::new(0.0, 0.0));
        assert!(m.job.is_none());
    }

    #[test]
    fn carrying_between_pickup_and_dropoff() {
        let mut m = assigned();
        let mut seen = Vec::new();
        while !m.is_idle() {
            let step = m.step(&PARAMS);
            m.apply(step);
            seen.push((m.state.label(), m.carrying()));
        }
        for (label, carrying) in seen {
            let expected = matches!(label, "moving_to_dropoff" | "unloading");
            assert_eq!(carrying, expected, "state {label}");
        }
    }

    #[test]
    fn route_accessors_only_while_moving() {
        let mut m = Manipulant::new(AgentId(0), ObjectId(0), Point::new(0.0, 0.0));
        assert!(m.current_route().is_none());
        assert!(m.waypoint_index().is_none());

        m.assign(job(), route(5, 0, &[(0.0, 30.0), (0.0, 0.0)])).unwrap();
        assert_eq!(m.waypoint_index(), Some(0));
        assert_eq!(m.current_route().map(|r| r.from), Some(ObjectId(5)));

        m.state = AgentState::Loading { elapsed: 0 };
        assert!(m.current_route().is_none());
    }

    #[test]
    fn busy_agent_rejects_job() {
        let mut m = assigned();
        let again = m.assign(job(), route(0, 0, &[(0.0, 0.0)]));
        assert!(matches!(again, Err(AgentError::Busy(AgentId(0)))));
    }

    #[test]
    fn idle_step_is_noop() {
        let m = Manipulant::new(AgentId(3), ObjectId(0), Point::new(1.0, 2.0));
        let step = m.step(&PARAMS);
        assert_eq!(step.state, AgentState::Idle);
        assert_eq!(step.moved, 0.0);
        assert!(step.event.is_none());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "without a job"))]
    fn jobless_agent_recovers_to_idle() {
        let mut m = Manipulant::new(AgentId(0), ObjectId(0), Point::new(0.0, 0.0));
        m.state = AgentState::Loading { elapsed: 1 };
        let step = m.step(&PARAMS);
        assert_eq!(step.event, Some(StepEvent::Recovered));
        m.apply(step);
        assert!(m.is_idle());
    }
}
