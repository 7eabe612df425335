use super::*;

// End-to-end flow: create → cook marks lines → ready → cashier settles
#[tokio::test]
async fn full_lifecycle_scenario() {
    let env = setup().await;

    let order = env
        .order_with(&waiter(), vec![line(&env.paella, 2), line(&env.gazpacho, 1)])
        .await;
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, dec("25.00"));
    assert_eq!(order.number, "ORD-20250807-001");
    assert!(order.ready_at.is_none());

    // First line done → kitchen is working on it
    let status = env
        .workflow
        .set_line_completion(&order.lines[0].id, true, at(13, 10))
        .await
        .unwrap();
    assert_eq!(status, OrderStatus::InPreparation);

    // Second line done → whole order ready
    let status = env
        .workflow
        .set_line_completion(&order.lines[1].id, true, at(13, 20))
        .await
        .unwrap();
    assert_eq!(status, OrderStatus::Ready);

    let ready = env.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(ready.status, OrderStatus::Ready);
    assert!(ready.ready_at.is_some());

    // Cashier settles
    let payment = env
        .workflow
        .process_payment(&cashier(), &order.id, &env.cash, None, at(14, 0))
        .await
        .unwrap();
    assert_eq!(payment.amount, dec("25.00"));
    assert_eq!(payment.method_name, "Efectivo");

    let settled = env.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(settled.status, OrderStatus::Settled);
    assert!(settled.settled_at.is_some());
}

#[tokio::test]
async fn total_always_equals_sum_of_subtotals() {
    let env = setup().await;

    let order = env
        .order_with(&waiter(), vec![line(&env.paella, 3), line(&env.gazpacho, 2)])
        .await;
    assert_eq!(order.total, dec("40.00"));
    assert_eq!(
        order.lines.iter().map(|l| l.subtotal).sum::<rust_decimal::Decimal>(),
        order.total
    );

    // Full replace recomputes everything from the catalog
    env.workflow
        .revise_order(&order.id, None, vec![line(&env.gazpacho, 1)])
        .await
        .unwrap();

    let revised = env.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(revised.total, dec("5.00"));
    assert_eq!(revised.lines.len(), 1);
    // Old line instances are gone, not patched
    assert!(revised.lines.iter().all(|l| order.lines.iter().all(|o| o.id != l.id)));
}

#[tokio::test]
async fn line_prices_are_snapshots() {
    let env = setup().await;

    let order = env.order_with(&waiter(), vec![line(&env.paella, 2)]).await;
    assert_eq!(order.lines[0].unit_price, dec("10.00"));

    // Catalog price changes after the fact
    env.products.set_price(&env.paella, dec("12.50")).await.unwrap();

    let reloaded = env.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(reloaded.lines[0].unit_price, dec("10.00"));
    assert_eq!(reloaded.lines[0].subtotal, dec("20.00"));
    assert_eq!(reloaded.total, dec("20.00"));

    // A revision prices the new lines from the current catalog
    env.workflow
        .revise_order(&order.id, None, vec![line(&env.paella, 2)])
        .await
        .unwrap();
    let revised = env.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(revised.lines[0].unit_price, dec("12.50"));
    assert_eq!(revised.total, dec("25.00"));
}

#[tokio::test]
async fn revision_is_pending_only() {
    let env = setup().await;

    let order = env.order_with(&waiter(), vec![line(&env.paella, 1)]).await;
    env.workflow
        .set_line_completion(&order.lines[0].id, true, at(13, 5))
        .await
        .unwrap();

    let err = env
        .workflow
        .revise_order(&order.id, None, vec![line(&env.gazpacho, 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidState(_)));

    // Nothing was applied
    let unchanged = env.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(unchanged.lines[0].product_name, "Paella");
    assert_eq!(unchanged.total, dec("10.00"));
}

// Unsetting a completed line never rolls the order backward: once the
// cashier can see it, a kitchen correction must not hide it again.
#[tokio::test]
async fn completion_rollback_is_asymmetric() {
    let env = setup().await;

    let order = env
        .order_with(
            &waiter(),
            vec![line(&env.paella, 1), line(&env.gazpacho, 1), line(&env.paella, 2)],
        )
        .await;

    let status = env
        .workflow
        .set_line_completion(&order.lines[0].id, true, at(13, 10))
        .await
        .unwrap();
    assert_eq!(status, OrderStatus::InPreparation);

    for l in &order.lines[1..] {
        env.workflow
            .set_line_completion(&l.id, true, at(13, 15))
            .await
            .unwrap();
    }
    let ready = env.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(ready.status, OrderStatus::Ready);
    let ready_at = ready.ready_at;
    assert!(ready_at.is_some());

    // Correcting one line afterwards leaves the order Ready
    let status = env
        .workflow
        .set_line_completion(&order.lines[1].id, false, at(13, 40))
        .await
        .unwrap();
    assert_eq!(status, OrderStatus::Ready);

    let still_ready = env.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(still_ready.status, OrderStatus::Ready);
    assert_eq!(still_ready.ready_at, ready_at);
    assert!(!still_ready.lines[1].completed);

    // And the same goes for InPreparation: unsetting the only completed
    // line does not return the order to Pending
    let second = env.order_with(&waiter(), vec![line(&env.paella, 1), line(&env.gazpacho, 1)]).await;
    env.workflow
        .set_line_completion(&second.lines[0].id, true, at(13, 50))
        .await
        .unwrap();
    let status = env
        .workflow
        .set_line_completion(&second.lines[0].id, false, at(13, 55))
        .await
        .unwrap();
    assert_eq!(status, OrderStatus::InPreparation);
}

#[tokio::test]
async fn creation_input_validation() {
    let env = setup().await;

    let err = create_err(&env, &env.table_id, vec![]).await;
    assert!(matches!(err, OrderError::Validation(_)));

    let err = create_err(&env, &env.table_id, vec![line(&env.paella, 0)]).await;
    assert!(matches!(err, OrderError::Validation(_)));

    let err = create_err(&env, &env.table_id, vec![line(&env.croquetas, 1)]).await;
    assert!(matches!(err, OrderError::ProductUnavailable(_)));

    // Unknown table rejects the whole order
    let err = create_err(&env, "dining_table:missing", vec![line(&env.paella, 1)]).await;
    assert!(matches!(err, OrderError::TableNotFound(_)));

    // And no half-created order leaked out of the failures
    assert!(env.workflow.list_open_orders().await.unwrap().is_empty());
}

async fn create_err(env: &TestEnv, table_id: &str, lines: Vec<LineInput>) -> OrderError {
    env.workflow
        .create_order(
            &waiter(),
            CreateOrderInput {
                table_id: table_id.to_string(),
                note: None,
                lines,
            },
            at(12, 0),
        )
        .await
        .unwrap_err()
}

#[tokio::test]
async fn unavailable_product_rejects_the_whole_order() {
    let env = setup().await;
    let err = env
        .workflow
        .create_order(
            &waiter(),
            CreateOrderInput {
                table_id: env.table_id.clone(),
                note: None,
                lines: vec![line(&env.paella, 1), line(&env.croquetas, 1)],
            },
            at(12, 0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::ProductUnavailable(_)));
    assert!(env.workflow.list_open_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn customer_orders_show_no_creator_reference() {
    let env = setup().await;

    let by_customer = env.order_with(&customer(), vec![line(&env.paella, 1)]).await;
    assert_eq!(by_customer.created_by, "Cliente");

    let by_waiter = env.order_with(&waiter(), vec![line(&env.paella, 1)]).await;
    assert_eq!(by_waiter.created_by, "María");
}

#[tokio::test]
async fn waiter_and_cook_queue_is_oldest_first() {
    let env = setup().await;

    let first = env.order_with(&waiter(), vec![line(&env.paella, 1)]).await;
    let second = env.order_with(&waiter(), vec![line(&env.gazpacho, 1)]).await;

    let queue = env.workflow.list_open_orders().await.unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].number, first.number);
    assert_eq!(queue[1].number, second.number);

    // Readying an order removes it from the open queue
    env.complete_all_lines(&first).await;
    let queue = env.workflow.list_open_orders().await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].number, second.number);
}
