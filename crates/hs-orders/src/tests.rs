//! Unit tests for hs-orders.

#[cfg(test)]
mod order {
    use hs_core::{ObjectId, OrderId};
    use crate::{Order, OrderError};

    fn order(quantity: u32) -> Order {
        Order::new(OrderId(1), ObjectId(0), ObjectId(10), "F40 VODICI PROFIL", quantity)
    }

    #[test]
    fn defaults() {
        let o = order(480);
        assert_eq!(o.pieces_per_pallet, 16);
        assert_eq!(o.pallet_weight_kg, 10.0);
        assert_eq!(o.priority, 0);
    }

    #[test]
    fn pallet_count_rounds_up() {
        assert_eq!(order(480).pallet_count(), 30);
        assert_eq!(order(481).pallet_count(), 31);
        assert_eq!(order(1).pallet_count(), 1);
        assert_eq!(order(0).pallet_count(), 0);
    }

    #[test]
    fn load_is_pallets_times_weight() {
        assert_eq!(order(480).load_kg(), 300.0);
        assert_eq!(order(20).with_packing(8, 12.5).load_kg(), 37.5);
    }

    #[test]
    fn zero_pieces_rejected() {
        let o = order(10).with_packing(0, 10.0);
        assert_eq!(o.pallet_count(), 0);
        assert!(matches!(o.validate(), Err(OrderError::ZeroPiecesPerPallet(OrderId(1)))));
    }

    #[test]
    fn bad_weight_rejected() {
        assert!(matches!(
            order(10).with_packing(4, -1.0).validate(),
            Err(OrderError::InvalidWeight(_))
        ));
        assert!(order(10).with_packing(4, f32::NAN).validate().is_err());
        assert!(order(10).validate().is_ok());
    }

    #[test]
    fn unknown_objects_reported() {
        let o = order(10);
        assert!(o.validate_objects(|_| true).is_ok());
        let err = o.validate_objects(|id| id == ObjectId(0)).unwrap_err();
        assert!(matches!(
            err,
            OrderError::UnknownObject { order: OrderId(1), object: ObjectId(10) }
        ));
    }
}

#[cfg(test)]
mod queue {
    use hs_core::{ObjectId, OrderId};
    use crate::{DispatchPolicy, Order, OrderQueue};

    fn order(id: u32, priority: u8) -> Order {
        Order::new(OrderId(id), ObjectId(0), ObjectId(1), "p", 16).with_priority(priority)
    }

    fn ids(q: &OrderQueue) -> Vec<u32> {
        q.iter().map(|o| o.id.0).collect()
    }

    #[test]
    fn fifo_ignores_priority() {
        let q = OrderQueue::from_orders([order(1, 0), order(2, 9), order(3, 5)], DispatchPolicy::Fifo);
        assert_eq!(ids(&q), vec![1, 2, 3]);
    }

    #[test]
    fn priority_is_stable() {
        let q = OrderQueue::from_orders(
            [order(1, 0), order(2, 9), order(3, 5), order(4, 9), order(5, 0)],
            DispatchPolicy::Priority,
        );
        assert_eq!(ids(&q), vec![2, 4, 3, 1, 5]);
    }

    #[test]
    fn pop_is_destructive() {
        let mut q = OrderQueue::from_orders([order(1, 0), order(2, 0)], DispatchPolicy::default());
        assert_eq!(q.policy(), DispatchPolicy::Fifo);
        assert_eq!(q.peek().map(|o| o.id), Some(OrderId(1)));
        assert_eq!(q.pop().map(|o| o.id), Some(OrderId(1)));
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop().map(|o| o.id), Some(OrderId(2)));
        assert!(q.pop().is_none());
        assert!(q.is_empty());
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use hs_core::{ObjectId, OrderId};
    use crate::{load_orders_csv, load_orders_reader, OrderError};

    const CSV: &str = "\
id,source,dest,product,quantity,priority,pieces_per_pallet,pallet_weight_kg
1,0,10,136333150100 F40 VODICI PROFIL,480,0,16,10
2,1,10,F40 KRYT,96,5,,
";

    #[test]
    fn parses_rows_in_order() {
        let orders = load_orders_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, OrderId(1));
        assert_eq!(orders[0].product, "136333150100 F40 VODICI PROFIL");
        assert_eq!(orders[0].load_kg(), 300.0);
        assert_eq!(orders[1].source, ObjectId(1));
        assert_eq!(orders[1].priority, 5);
    }

    #[test]
    fn empty_packing_takes_defaults() {
        let orders = load_orders_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(orders[1].pieces_per_pallet, 16);
        assert_eq!(orders[1].pallet_weight_kg, 10.0);
        assert_eq!(orders[1].pallet_count(), 6);
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let csv = "id,source,dest,product,quantity,priority,pieces_per_pallet,pallet_weight_kg\n\
                   x,0,1,p,10,0,16,10\n";
        assert!(matches!(load_orders_reader(Cursor::new(csv)), Err(OrderError::Parse(_))));
    }

    #[test]
    fn zero_pieces_row_rejected() {
        let csv = "id,source,dest,product,quantity,priority,pieces_per_pallet,pallet_weight_kg\n\
                   1,0,1,p,10,0,0,10\n";
        assert!(matches!(
            load_orders_reader(Cursor::new(csv)),
            Err(OrderError::ZeroPiecesPerPallet(OrderId(1)))
        ));
    }

    #[test]
    fn duplicate_id_rejected() {
        let csv = "id,source,dest,product,quantity,priority,pieces_per_pallet,pallet_weight_kg\n\
                   1,0,1,p,10,0,16,10\n\
                   1,0,1,q,10,0,16,10\n";
        assert!(matches!(
            load_orders_reader(Cursor::new(csv)),
            Err(OrderError::DuplicateOrder(OrderId(1)))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_orders_csv(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, OrderError::Io(_)));
    }
}
