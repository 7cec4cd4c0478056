//! A bounded per-session state store, the way a web host would hold form
//! progress between requests.

use lrukit::{LruCacheBuilder, PutOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone)]
struct SessionState {
    uploads: Vec<String>,
    fields: Vec<(String, String)>,
}

fn main() -> Result<(), lrukit::ConfigError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut sessions = LruCacheBuilder::new(3)
        .prealloc(true)
        .try_build::<String, SessionState>()?;

    for id in ["s-ada", "s-bob", "s-cyd"] {
        sessions.put(id.to_string(), SessionState::default());
    }

    // Ada keeps working; Ada's session becomes the most recently used.
    if let Some(state) = sessions.get_mut(&"s-ada".to_string()) {
        state.uploads.push("receipt-01.png".into());
        state.fields.push(("amount".into(), "12.50".into()));
    }

    // A fourth visitor pushes out whoever has been idle longest.
    match sessions.put_entry("s-dee".to_string(), SessionState::default()) {
        PutOutcome::Evicted(id, state) => {
            println!("expired {id} ({} uploads)", state.uploads.len())
        },
        other => println!("unexpected: {other:?}"),
    }

    // Logout.
    sessions.delete(&"s-cyd".to_string());

    for (id, state) in sessions.iter() {
        println!(
            "{id}: {} uploads, {} fields",
            state.uploads.len(),
            state.fields.len()
        );
    }
    Ok(())
}

// Expected output:
// expired s-bob (0 uploads)
// s-dee: 0 uploads, 0 fields
// s-ada: 1 uploads, 1 fields
