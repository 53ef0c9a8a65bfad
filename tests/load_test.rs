//! Concurrent load against a single shared store.

use std::time::Instant;

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_concurrent_creates_are_all_listed() {
    let server = common::start_server().await;

    let concurrency = 20;
    let requests_per_task = 10;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let url = server.url("/books");
        tasks.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for n in 0..requests_per_task {
                let res = client
                    .post(&url)
                    .json(&json!({ "title": format!("t{task}-{n}"), "author": "load", "price": n }))
                    .send()
                    .await
                    .expect("service unreachable");
                assert!(res.status().is_success());
                let body: Value = res.json().await.unwrap();
                ids.push(body["id"].as_str().unwrap().to_string());
            }
            ids
        }));
    }

    let mut created = Vec::new();
    for task in tasks {
        created.extend(task.await.unwrap());
    }
    let duration = start.elapsed();

    let books: Vec<Value> = client
        .get(server.url("/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(books.len(), total_requests);

    let mut unique = created.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), total_requests, "ids must never repeat");

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!(
        "Requests/sec:   {:.2}",
        total_requests as f64 / duration.as_secs_f64()
    );
    println!("-------------------------\n");
}
