//! Minimal terminal chat against a canned places directory
//!
//! Run with: cargo run -p nearby-agent-agent --example terminal_chat

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::Receiver;

use nearby_agent_agent::{AgentConfig, DialogEvent, NearbyAgent};
use nearby_agent_core::{
    Category, Coordinates, LocationError, LocationProvider, LookupError, PlaceResult, PlacesLookup,
};

/// Canned in-memory directory standing in for the real provider
struct DemoDirectory;

#[async_trait]
impl PlacesLookup for DemoDirectory {
    async fn lookup_places(
        &self,
        _coords: Coordinates,
        category: Category,
        _radius_km: f64,
    ) -> Result<Vec<PlaceResult>, LookupError> {
        let names: &[&str] = match category {
            Category::Restaurant => &["Corner House", "Truffles", "Empire"],
            Category::Cafe => &["Third Wave", "Blue Tokai"],
            Category::Hospital => &["Manipal Hospital", "Apollo Clinic"],
            Category::Atm => &["HDFC ATM", "SBI ATM"],
            _ => &[],
        };
        Ok(names
            .iter()
            .enumerate()
            .map(|(index, name)| PlaceResult {
                name: name.to_string(),
                address: Some(format!("{} Demo Street", index + 1)),
                rating: None,
                map_url: "https://maps.example/dir".to_string(),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "demo-directory"
    }
}

struct DemoLocation;

#[async_trait]
impl LocationProvider for DemoLocation {
    async fn request_location(&self) -> Result<Coordinates, LocationError> {
        Ok(Coordinates::new(12.9716, 77.5946))
    }
}

fn drain(events: &mut Receiver<DialogEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            DialogEvent::Reply(text) => println!("\nassistant: {text}\n"),
            DialogEvent::Typing => println!("assistant is typing..."),
            DialogEvent::LocationPrompt => println!("[location permission needed]"),
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let agent = NearbyAgent::new(
        "terminal-demo",
        AgentConfig::default(),
        Arc::new(DemoDirectory),
        Arc::new(DemoLocation),
    );
    let mut events = agent.subscribe();

    agent.greet().await;
    drain(&mut events);

    let stdin = io::stdin();
    loop {
        print!("you: ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        if line.trim() == "/quit" {
            break;
        }
        agent.handle_text(&line).await;
        drain(&mut events);
    }
}
