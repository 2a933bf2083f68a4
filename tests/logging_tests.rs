//! Log output routed through an installed writer.

use std::io::Write;
use std::sync::{Arc, Mutex};

use linkboard::model::ViewerContext;
use linkboard::screens::NetworkScreen;
use linkboard::storage::{keys, LocalStore};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn corrupt_store_values_are_logged_and_ignored() {
    let capture = Capture::default();
    linkboard::logging::set_writer(Box::new(capture.clone()));
    assert!(!linkboard::logging::colour_enabled());

    let store = LocalStore::open_in_memory().unwrap();
    store.set(keys::CONNECTIONS, "[{\"id\": oops").unwrap();
    let network = NetworkScreen::mount(&store, &ViewerContext::default()).unwrap();
    assert!(network.graph().connections().is_empty());
    assert_eq!(network.graph().suggestions().len(), 6);

    let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    let corrupt = output
        .lines()
        .find(|l| l.contains("ignoring corrupt value"))
        .expect("corruption logged");
    assert!(corrupt.contains("\"connections\""));
    assert!(corrupt.contains(" - src/storage.rs:"));
    assert!(output.contains("network: mounted 0 connection(s), 6 suggestion(s)"));
}
