//! Counter Example
//!
//! Builds a namespaced tree of action creators and a reducer handling them,
//! then runs a short script of commands through the reducer, printing the
//! state after each step.
//!
//! ```text
//! counter ─┬─ increment   payload: amount
//!          ├─ decrement   payload: amount
//!          └─ reset
//! notify                  payload: message, meta: argument count
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --package counter -- increment:5 decrement:2 notify:hello fail:boom reset
//! cargo run --package counter -- --divider : --prefix demo increment:1
//! RELAY_LOGGING__LEVEL=trace cargo run --package counter
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use relay::prelude::*;
use relay::relay_runtime::{ConfigLoader, logging};
use relay::{ActionCreator, combine};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Run a script of counter actions through a Relay reducer")]
struct Args {
    /// Configuration file (defaults to relay.toml / config.toml lookup).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Namespace divider, overriding the configuration.
    #[arg(long)]
    divider: Option<String>,

    /// Type prefix, overriding the configuration.
    #[arg(long)]
    prefix: Option<String>,

    /// Commands: `increment:N`, `decrement:N`, `reset`, `notify:TEXT`,
    /// `fail:TEXT`.
    commands: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Counter {
    counter: i64,
    messages: Vec<String>,
    errors: u32,
}

// ============================================================================
// Creators and Reducer
// ============================================================================

struct Creators {
    increment: ActionCreator,
    decrement: ActionCreator,
    reset: ActionCreator,
    notify: ActionCreator,
}

fn build_creators(options: &NamespaceOptions) -> Result<Creators> {
    let spec = Namespace::new()
        .branch(
            "counter",
            Namespace::new()
                .leaf("increment", ActionSpec::payload(|a| json!({ "amount": a[0] })))
                .leaf(
                    "decrement",
                    ActionSpec::payload(|a| json!({ "amount": -a[0].as_i64().unwrap_or_default() })),
                )
                .leaf("reset", ActionSpec::Identity),
        )
        .leaf(
            "notify",
            ActionSpec::payload_meta(
                |a| json!({ "message": a[0] }),
                |a| json!({ "args": a.len() }),
            ),
        );
    let tree = create_actions(spec, Vec::<&str>::new(), options)?;

    let get = |path: &[&str]| {
        tree.get(path)
            .cloned()
            .with_context(|| format!("missing creator {}", path.join(".")))
    };
    Ok(Creators {
        increment: get(&["counter", "increment"])?,
        decrement: get(&["counter", "decrement"])?,
        reset: get(&["counter", "reset"])?,
        notify: get(&["notify"])?,
    })
}

fn amount(action: &Action) -> i64 {
    action
        .payload
        .as_ref()
        .and_then(|p| p["amount"].as_i64())
        .unwrap_or_default()
}

fn build_reducer(creators: &Creators, options: &NamespaceOptions) -> Result<Reducer<Counter>> {
    let tree = handlers! {
        combine!(creators.increment, creators.decrement)? => |s: Counter, a: &Action| Counter {
            counter: s.counter + amount(a),
            ..s
        },
        "counter" => handlers! {
            "reset" => |s: Counter, _: &Action| Counter { counter: 0, ..s },
        },
        creators.notify.clone() => NextThrow::new()
            .next(|mut s: Counter, a: &Action| {
                let message = a.payload.as_ref().and_then(|p| p["message"].as_str());
                s.messages.push(message.unwrap_or_default().to_string());
                s
            })
            .throw(|mut s: Counter, _: &Action| {
                s.errors += 1;
                s
            }),
    };
    Ok(handle_actions(tree, Some(Counter::default()), options)?)
}

fn parse_command(creators: &Creators, command: &str) -> Result<Action> {
    let (name, arg) = command.split_once(':').unwrap_or((command, ""));
    let number = || -> Result<Value> {
        Ok(json!(arg.parse::<i64>().with_context(|| format!("'{arg}' is not a number"))?))
    };
    Ok(match name {
        "increment" => creators.increment.call(number()?),
        "decrement" => creators.decrement.call(number()?),
        "reset" => creators.reset.create(&[]),
        "notify" => creators.notify.call(arg),
        "fail" => creators.notify.fail(arg),
        other => bail!("unknown command '{other}'"),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.file(path);
    }
    let mut config = loader.load()?;
    if let Some(divider) = args.divider {
        config.namespace.divider = divider;
    }
    if let Some(prefix) = args.prefix {
        config.namespace.prefix = Some(prefix);
    }
    logging::init_from_config(&config.logging);

    let options = config.namespace;
    let creators = build_creators(&options)?;
    let reducer = build_reducer(&creators, &options)?;
    info!(
        action_types = reducer.table().len(),
        increment = %creators.increment,
        "Counter ready"
    );

    let commands = if args.commands.is_empty() {
        ["increment:5", "decrement:2", "notify:hello", "fail:boom", "reset"]
            .map(String::from)
            .to_vec()
    } else {
        args.commands
    };

    let mut state = None;
    for command in &commands {
        let action = parse_command(&creators, command)?;
        let next = reducer.reduce(state.take(), &action);
        println!(
            "{:<14} {:<40} {}",
            command,
            serde_json::to_string(&action)?,
            serde_json::to_string(&next)?
        );
        state = Some(next);
    }
    Ok(())
}
