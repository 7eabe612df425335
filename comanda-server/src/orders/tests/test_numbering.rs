use super::*;

#[tokio::test]
async fn first_order_of_the_day_is_001() {
    let env = setup().await;
    let order = env.order_with(&waiter(), vec![line(&env.paella, 1)]).await;
    assert_eq!(order.number, "ORD-20250807-001");
}

#[tokio::test]
async fn sequential_numbers_increase_without_gaps() {
    let env = setup().await;
    let mut numbers = Vec::new();
    for _ in 0..3 {
        let order = env.order_with(&waiter(), vec![line(&env.paella, 1)]).await;
        numbers.push(order.number);
    }
    assert_eq!(
        numbers,
        vec!["ORD-20250807-001", "ORD-20250807-002", "ORD-20250807-003"]
    );
}

#[tokio::test]
async fn counter_restarts_on_a_new_day() {
    let env = setup().await;
    env.order_with(&waiter(), vec![line(&env.paella, 1)]).await;
    env.order_with(&waiter(), vec![line(&env.paella, 1)]).await;

    let order = env
        .workflow
        .create_order(
            &waiter(),
            CreateOrderInput {
                table_id: env.table_id.clone(),
                note: None,
                lines: vec![line(&env.paella, 1)],
            },
            next_day(12),
        )
        .await
        .unwrap();
    assert_eq!(order.number, "ORD-20250808-001");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_yield_distinct_numbers() {
    let env = setup().await;
    let env = Arc::new(env);

    let mut handles = Vec::new();
    for _ in 0..12 {
        let env = env.clone();
        handles.push(tokio::spawn(async move {
            env.workflow
                .create_order(
                    &waiter(),
                    CreateOrderInput {
                        table_id: env.table_id.clone(),
                        note: None,
                        lines: vec![line(&env.paella, 1)],
                    },
                    at(14, 0),
                )
                .await
                .unwrap()
                .number
        }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap());
    }

    let unique: std::collections::HashSet<_> = numbers.iter().collect();
    assert_eq!(unique.len(), 12, "duplicate numbers under concurrency: {numbers:?}");
}
