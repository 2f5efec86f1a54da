//! Deferred Door
//!
//! This example suspends a transition in its leave phase and finishes it
//! later with `resume`.
//!
//! Key concepts:
//! - Deferring from a `leave_<STATE>` callback
//! - Events are refused while a transition is pending
//! - Errors set by callbacks travel with the transition report
//!
//! Run with: RUST_LOG=hookfsm=debug cargo run --example deferred_door

use hookfsm::builder::MachineBuilder;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Deferred Door ===\n");

    let mut machine = MachineBuilder::new()
        .initial("closed")
        .event("open", ["closed"], "opened")
        .event("close", ["opened"], "closed")
        .event("lock", ["closed"], "locked")
        .on("leave_closed", |ctx| {
            println!("  waiting for the motor before leaving {}", ctx.from());
            ctx.defer();
        })
        .on("enter_opened", |ctx| {
            ctx.set_error("sensor reported a slow swing");
        })
        .on("after_event", |ctx| println!("  finished {}", ctx.event()))
        .build()?;

    let fired = machine.fire("open")?;
    println!("fire open: deferred = {}", fired.is_deferred());
    println!("state while pending: {}", machine.current());

    if let Err(err) = machine.fire("lock") {
        println!("fire lock: {err}");
    }

    let report = machine.resume()?;
    println!("resumed: {} -> {}", report.from, report.to);
    if let Some(error) = report.error() {
        println!("  with warning: {error}");
    }

    if let Err(err) = machine.resume() {
        println!("resume again: {err}");
    }

    println!("\nFinal state: {}", machine.current());
    println!("\n=== Example Complete ===");
    Ok(())
}
