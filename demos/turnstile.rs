//! Coin-Operated Turnstile
//!
//! This example demonstrates one machine definition shared by several
//! turnstiles.
//!
//! Key concepts:
//! - Building a transition table with the fluent builder
//! - Identity-keyed owners, each with its own current state
//! - Using the update hook to feed the input stream
//! - Handling an input the current state does not accept
//!
//! Run with: cargo run --example turnstile

use statewise::builder::StateMachineBuilder;
use statewise::core::InputStream;
use statewise::registry::Owner;
use statewise::symbol_enum;

symbol_enum! {
    enum Gate {
        Locked,
        Unlocked,
    }
}

symbol_enum! {
    enum Event {
        Coin,
        Push,
    }
}

struct Turnstile {
    label: &'static str,
    queue: Vec<Event>,
}

impl Owner for Turnstile {}

fn main() {
    println!("=== Turnstile State Machine ===\n");

    let machine = StateMachineBuilder::<Gate, Event, Turnstile>::new()
        .goto(Gate::Locked, Event::Coin, Gate::Unlocked)
        .goto(Gate::Locked, Event::Push, Gate::Locked)
        .goto(Gate::Unlocked, Event::Push, Gate::Locked)
        .on_update(|turnstile: &Turnstile, inputs: &mut InputStream<Event>| {
            if inputs.is_empty() {
                inputs.extend(turnstile.queue.iter().copied());
            }
        })
        .build()
        .unwrap();

    match machine.table().snapshot().to_json() {
        Ok(json) => println!("Transition table:\n{json}\n"),
        Err(e) => println!("Could not render table: {e}\n"),
    }

    let turnstiles = [
        Turnstile {
            label: "north",
            queue: vec![Event::Coin, Event::Push, Event::Coin],
        },
        Turnstile {
            label: "south",
            queue: vec![Event::Push, Event::Push],
        },
        Turnstile {
            label: "east",
            queue: vec![Event::Coin, Event::Coin],
        },
    ];

    for turnstile in &turnstiles {
        let mut inputs = InputStream::new();
        match machine.run(turnstile, Gate::Locked, &mut inputs) {
            Ok(state) => println!("{:>5}: ended {state}", turnstile.label),
            Err(e) => println!("{:>5}: rejected ({e})", turnstile.label),
        }
    }

    println!("\nTracked turnstiles: {}", machine.tracked_owners());
    for turnstile in &turnstiles {
        machine.unregister_owner(turnstile);
    }
    println!("After cleanup: {}", machine.tracked_owners());

    println!("\n=== Example Complete ===");
}
