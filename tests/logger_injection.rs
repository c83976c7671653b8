use std::sync::{Arc, Mutex};
use std::time::Duration;
use swarm_bridge::adapters::outbound::{init_buffered_logger, init_noop_logger, TeeLogger};
use swarm_bridge::domains::logger::DomainLogger;

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self { Self { messages: Arc::new(Mutex::new(Vec::new())) } }
}

impl DomainLogger for BridgeCapture {
    fn debug(&self, msg: &str) { self.messages.lock().unwrap().push(format!("DEBUG:{}", msg)); }
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

#[tokio::test]
async fn test_buffered_and_noop_logger() {
    let capture = Arc::new(BridgeCapture::new());
    let bridge = capture.clone() as Arc<dyn DomainLogger>;

    let buffered = init_buffered_logger(bridge, 8);

    buffered.debug("zero");
    buffered.info("one");
    buffered.warn("two");
    buffered.error("three");

    // Give the background task a moment
    tokio::time::sleep(Duration::from_millis(50)).await;

    let msgs = capture.messages.lock().unwrap();
    assert!(msgs.iter().any(|m| m.contains("DEBUG:zero")));
    assert!(msgs.iter().any(|m| m.contains("INFO:one")));
    assert!(msgs.iter().any(|m| m.contains("WARN:two")));
    assert!(msgs.iter().any(|m| m.contains("ERR:three")));

    let noop = init_noop_logger();
    noop.debug("ignored");
    noop.error("ignored-err");
}

#[test]
fn test_tee_logger_forwards_to_both() {
    let first = Arc::new(BridgeCapture::new());
    let second = Arc::new(BridgeCapture::new());
    let tee = TeeLogger::new(first.clone(), Some(second.clone() as Arc<dyn DomainLogger>));

    tee.info("hello");
    tee.debug("detail");

    for capture in [&first, &second] {
        let msgs = capture.messages.lock().unwrap();
        assert_eq!(*msgs, vec!["INFO:hello".to_string(), "DEBUG:detail".to_string()]);
    }

    let solo = TeeLogger::new(first.clone(), None);
    solo.warn("only-primary");
    assert!(first.messages.lock().unwrap().iter().any(|m| m == "WARN:only-primary"));
    assert!(!second.messages.lock().unwrap().iter().any(|m| m.contains("only-primary")));
}
