//! Discover a Hue bridge, pair with it and switch every light on.
//!
//! Press the link button on the bridge shortly before running.
//! A username from an earlier run can be passed as the first argument to
//! skip pairing.
//!
//! Run with: cargo run --example discover_and_turn_on [username]

use hue_bridge_rs::{Bridge, User};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Discovering Hue bridges...");
    let bridges = Bridge::discover()?;

    let Some(bridge) = bridges.first() else {
        println!("No bridge found on the network.");
        return Ok(());
    };
    println!("Using bridge at {}", bridge);

    match std::env::args().nth(1) {
        Some(username) => bridge.set_user(User::new(&username)),
        None => {
            let user = bridge.pair()?;
            println!("Paired, username: {}", user);
        }
    }

    let lights = bridge.lights()?;
    println!("Found {} light(s)", lights.len());
    for light in lights {
        match light.turn_on() {
            Ok(()) => println!("  ✓ Turned on light {}", light),
            Err(e) => eprintln!("  ✗ Failed to turn on light {}: {}", light, e),
        }
    }

    Ok(())
}
