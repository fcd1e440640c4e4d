mod support;

use std::time::Duration;
use stressd::{Config, RunState, Task};
use support::{spawn_http_server, unused_addr};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn e2e_all_ok() {
    let (url, _server) = spawn_http_server(200).await;
    let config = Config::new(&url, 25, 4).unwrap();
    let mut task = Task::new(config).unwrap();

    let report = task.run().await.unwrap();
    assert_eq!(task.state(), RunState::Complete);
    assert_eq!(report.total_requests, 25);
    assert_eq!(report.success_requests, 25);
    assert_eq!(report.failed_requests, 0);
    assert_eq!(report.status_code_count.get(&200), Some(&25));
    assert!(report.min_duration <= report.average_duration);
    assert!(report.average_duration <= report.max_duration);
    assert!(report.requests_per_second() > 0.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn e2e_not_found_is_failure() {
    let (url, _server) = spawn_http_server(404).await;
    let config = Config::new(&url, 10, 2).unwrap();

    let report = Task::new(config).unwrap().run().await.unwrap();
    assert_eq!(report.success_requests, 0);
    assert_eq!(report.failed_requests, 10);
    assert_eq!(report.status_code_count.get(&404), Some(&10));
    assert!(report.to_string().contains("[4xx] 404: 10 requests"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn e2e_connection_refused() {
    let addr = unused_addr().await;
    let config = Config::new(&format!("http://{}/", addr), 6, 3)
        .unwrap()
        .with_timeout(Duration::from_secs(5))
        .unwrap();

    let report = Task::new(config).unwrap().run().await.unwrap();
    assert_eq!(report.total_requests, 6);
    assert_eq!(report.failed_requests, 6);
    assert_eq!(report.status_code_count.get(&0), Some(&6));
    assert_eq!(report.transport_failures(), 6);
}

#[tokio::test]
async fn e2e_zero_requests() {
    let (url, _server) = spawn_http_server(200).await;
    let config = Config::new(&url, 0, 8).unwrap();

    let report = Task::new(config).unwrap().run().await.unwrap();
    assert_eq!(report.total_requests, 0);
    assert_eq!(report.recorded(), 0);
    assert_eq!(report.average_duration, Duration::ZERO);
    assert!(report.status_code_count.is_empty());
}
