//! Traffic Light State Machine
//!
//! This example drives a traffic light through named events.
//!
//! Key concepts:
//! - One event leading from several source states
//! - Named and generic lifecycle callbacks
//! - Rejected events leave the state untouched
//!
//! Run with: RUST_LOG=hookfsm=debug cargo run --example traffic_light

use hookfsm::builder::MachineBuilder;
use hookfsm::transitions;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let mut machine = MachineBuilder::new()
        .initial("green")
        .transitions(transitions! {
            warn: [green] => yellow,
            panic: [yellow, green] => red,
            calm: [red] => yellow,
            clear: [yellow] => green,
        })
        .on("before_event", |ctx| {
            println!("  about to {} ({} -> {})", ctx.event(), ctx.from(), ctx.to());
        })
        .on("enter_red", |_| println!("  STOP"))
        .on("enter_state", |ctx| println!("  now {}", ctx.to()))
        .build()?;

    println!("Initial state: {}", machine.current());
    println!("Available: {:?}\n", machine.available_events());

    for event in ["warn", "panic", "calm", "clear"] {
        println!("fire {event}");
        machine.fire(event)?;
    }

    println!("\nfire calm from {}", machine.current());
    if let Err(err) = machine.fire("calm") {
        println!("  refused: {err}");
    }

    println!("\nPath: {}", machine.history().get_path().join(" -> "));
    println!("\n=== Example Complete ===");
    Ok(())
}
