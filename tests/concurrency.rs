use async_trait::async_trait;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::{Request, Response};
use mac_auth::credentials::{Credential, MemoryCredentialProvider};
use mac_auth::hawk::{ExtProvider, HawkData, HawkVerifier};
use mac_auth::{HawkClient, HawkLayer, HawkSettings, RequestTarget, SettingsMonitor};
use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::{service_fn, Layer, ServiceExt};

const KEY: &str = "3@uo45er?";

fn get(path: &str) -> Request<Bytes> {
    Request::get(format!("https://localhost:5001{}", path))
        .body(Bytes::new())
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_signing() {
    let client = HawkClient::new(SettingsMonitor::new(HawkSettings::new("id123", KEY))).unwrap();
    // echo the Authorization header back in the response body
    let echo = service_fn(|request: Request<Bytes>| async move {
        let header = request.headers()[AUTHORIZATION].as_bytes().to_vec();
        Ok::<_, Infallible>(Response::new(Bytes::from(header)))
    });
    let service = HawkLayer::new(client).layer(echo);

    let mut handles = Vec::new();
    for i in 0..128 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let path = format!("/items/{}", i);
            let response = service.oneshot(get(&path)).await.unwrap();
            (path, String::from_utf8(response.body().to_vec()).unwrap())
        }));
    }

    let credentials: MemoryCredentialProvider = vec![Credential::new("id123", KEY)].into_iter().collect();
    let verifier = HawkVerifier::new(Arc::new(credentials));
    let mut nonces = HashSet::new();
    for handle in handles {
        let (path, header) = handle.await.unwrap();
        let target = RequestTarget::new("GET", path, "localhost", 5001);
        let verified = verifier
            .verify(Some(header.as_str()), &target, b"", None)
            .await
            .unwrap();
        assert!(nonces.insert(verified.parameters.nonce));
    }
    assert_eq!(nonces.len(), 128);
}

/// Updates the settings while a request is being signed.
struct Reloader {
    monitor: SettingsMonitor<HawkSettings>,
}

#[async_trait]
impl ExtProvider for Reloader {
    async fn ext(&self, _request: &Request<Bytes>, _settings: &HawkSettings) -> Option<String> {
        self.monitor.update(HawkSettings::new("id456", "other-key"));
        Some("reloaded".to_string())
    }
}

#[tokio::test]
async fn settings_snapshot_per_request() {
    let monitor = SettingsMonitor::new(HawkSettings::new("id123", KEY));
    let mut settings = HawkSettings::new("id123", KEY);
    settings.ext_provider = Some(Arc::new(Reloader {
        monitor: monitor.clone(),
    }));
    monitor.update(settings);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = {
        let seen = seen.clone();
        service_fn(move |request: Request<Bytes>| {
            let seen = seen.clone();
            async move {
                let ctx = request.extensions().get::<HawkData>().cloned().unwrap();
                let header = request.headers()[AUTHORIZATION].to_str().unwrap().to_string();
                seen.lock().unwrap().push((ctx, header));
                Ok::<_, Infallible>(Response::new(Bytes::new()))
            }
        })
    };

    let service = HawkLayer::new(HawkClient::new(monitor.clone()).unwrap()).layer(recorder);
    service.clone().oneshot(get("/first")).await.unwrap();
    service.oneshot(get("/second")).await.unwrap();

    let seen = seen.lock().unwrap();
    // the first request was signed entirely with the settings it started with
    assert!(seen[0].1.starts_with("Hawk id=\"id123\""));
    assert_eq!(seen[0].0.ext.as_deref(), Some("reloaded"));
    // the second picks up the update, and has no ext provider
    assert!(seen[1].1.starts_with("Hawk id=\"id456\""));
    assert_eq!(seen[1].0.ext, None);
}

/// An ext provider that never finishes in time.
struct Slow;

#[async_trait]
impl ExtProvider for Slow {
    async fn ext(&self, _request: &Request<Bytes>, _settings: &HawkSettings) -> Option<String> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        None
    }
}

#[tokio::test]
async fn cancellation_before_send() {
    let mut settings = HawkSettings::new("id123", KEY);
    settings.ext_provider = Some(Arc::new(Slow));
    let client = HawkClient::new(SettingsMonitor::new(settings)).unwrap();

    let called = Arc::new(AtomicBool::new(false));
    let transport = {
        let called = called.clone();
        service_fn(move |_: Request<Bytes>| {
            called.store(true, Ordering::SeqCst);
            async { Ok::<_, Infallible>(Response::new(Bytes::new())) }
        })
    };

    let result = tokio::time::timeout(
        Duration::from_millis(50),
        HawkLayer::new(client).layer(transport).oneshot(get("/")),
    )
    .await;
    assert!(result.is_err());
    assert!(!called.load(Ordering::SeqCst));
}
