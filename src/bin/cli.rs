//! sc-cli: run the tracker once against an RDRAM dump and print what the
//! overlay would show.
//!
//! Usage:
//!   sc-cli path/to/rdram.bin [--paused] [--save-context 0x8011A5D0]
//!   sc-cli --demo

use std::path::PathBuf;
use std::{env, process};

use scarecrow_overlay::demo;
use sc_engine::addresses::DEFAULT_SAVE_CONTEXT;
use sc_engine::{SnapshotCore, StateTracker};
use sc_formats::read_records;
use tracing_subscriber::EnvFilter;

enum Source {
    Dump(PathBuf),
    Demo,
}

fn usage() -> ! {
    eprintln!("Usage: sc-cli <rdram.bin> [--paused] [--save-context 0x...] | sc-cli --demo");
    process::exit(2);
}

fn parse_address(text: &str) -> Option<u32> {
    let hex = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))?;
    u32::from_str_radix(hex, 16).ok()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut source = None;
    let mut paused = false;
    let mut save_context = DEFAULT_SAVE_CONTEXT;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => source = Some(Source::Demo),
            "--paused" => paused = true,
            "--save-context" => {
                save_context = args
                    .next()
                    .as_deref()
                    .and_then(parse_address)
                    .unwrap_or_else(|| usage());
            }
            _ if arg.starts_with('-') => usage(),
            _ => source = Some(Source::Dump(arg.into())),
        }
    }

    let core = match source {
        Some(Source::Dump(path)) => {
            let mut core = demo::load_dump(&path, save_context).unwrap_or_else(|e| {
                eprintln!("Failed to read {}: {}", path.display(), e);
                process::exit(1);
            });
            core.paused = paused;
            core
        }
        Some(Source::Demo) => demo::demo_core(save_context).unwrap_or_else(|e| {
            eprintln!("Failed to build demo scene: {}", e);
            process::exit(1);
        }),
        None => usage(),
    };

    report(&core);
}

fn report(core: &SnapshotCore) {
    let mut tracker = StateTracker::new();
    if let Err(e) = tracker.on_tick(core) {
        eprintln!("Tick failed: {}", e);
        process::exit(1);
    }

    println!("Save context:  {:#010X}", core.save_context);
    println!("Paused:        {}", core.paused);
    println!("Quest Status:  {}", if tracker.is_shown() { "shown" } else { "hidden" });
    println!("Child song:    {}", tracker.child_recorded());
    println!();

    match read_records(tracker.raw_song()) {
        Ok(records) => {
            for (i, record) in records.iter().enumerate() {
                if record.code().is_silence() {
                    println!("  {:02}: --", i);
                } else {
                    println!(
                        "  {:02}: note {:02X}  special {:02X}",
                        i,
                        record.code().0,
                        record.modifier().0
                    );
                }
            }
        }
        Err(e) => println!("  records unreadable: {}", e),
    }
    println!();

    match tracker.display() {
        Some(display) => println!(
            "{}{} ({} notes)",
            display.caption,
            display.notes,
            display.notes.len()
        ),
        None => println!("No song to display"),
    }
}
