//! Imprint keymap tool.
//!
//! Runs the keymap on the host, for trying out behaviors without a board:
//!
//! - simulate: run a script of key events and print what the keyboard does.
//! - layout: print the keymap table for a layer.
//! - settings: write a settings record.

use std::cell::Cell;
use std::fs;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use imprint_keyboard::keymap::layer_table;
use imprint_keyboard::keycode::Keycode;
use imprint_keyboard::keys::side_of;
use imprint_keyboard::{
    Indication, KeyAction, Layer, LayoutActions, LayoutManager, PointerAction, Settings,
};
use log::{debug, info};

use script::Step;

mod script;

#[derive(Parser)]
#[command(name = "imprint-tool")]
#[command(about = "Try out the Imprint keymap on the host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script of key events through the keymap
    Simulate {
        /// The script to run
        script: String,

        /// A settings record to use instead of the defaults
        #[arg(long, value_name = "FILE")]
        settings: Option<String>,
    },

    /// Show the keymap for a layer
    Layout {
        #[arg(long, value_enum)]
        layer: Layer,
    },

    /// Generate a settings record.
    Settings {
        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: String,

        #[arg(long)]
        tapping_term: Option<u32>,

        #[arg(long)]
        num_word_timeout: Option<u32>,

        #[arg(long)]
        leader_timeout: Option<u32>,

        /// Time the leader sequence from the leader key instead of each key.
        #[arg(long)]
        leader_from_start: bool,

        #[arg(long)]
        caps_word_timeout: Option<u32>,

        #[arg(long)]
        tapping_toggle: Option<u8>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Simulate { script, settings } => {
            let settings = match settings {
                Some(name) => {
                    let bytes = fs::read(name)?;
                    Settings::decode(&bytes).map_err(|e| anyhow!("{}: {}", name, e))?
                }
                None => Settings::default(),
            };
            let steps = script::parse(&fs::read_to_string(script)?)?;
            info!("Running {} steps from {}", steps.len(), script);
            simulate(&steps, settings);
        }
        Commands::Layout { layer } => show_layer(*layer),
        Commands::Settings {
            output,
            tapping_term,
            num_word_timeout,
            leader_timeout,
            leader_from_start,
            caps_word_timeout,
            tapping_toggle,
        } => {
            let defaults = Settings::default();
            let settings = Settings {
                tapping_term_ms: tapping_term.unwrap_or(defaults.tapping_term_ms),
                num_word_timeout_ms: num_word_timeout.unwrap_or(defaults.num_word_timeout_ms),
                leader_timeout_ms: leader_timeout.unwrap_or(defaults.leader_timeout_ms),
                leader_per_key_timing: !leader_from_start,
                caps_word_idle_timeout_ms: caps_word_timeout
                    .unwrap_or(defaults.caps_word_idle_timeout_ms),
                tapping_toggle: tapping_toggle.unwrap_or(defaults.tapping_toggle),
            };
            let bytes = settings.to_bytes()?;
            fs::write(output, bytes)?;
            println!("Wrote {:?} to {}", settings, output);
        }
    }

    Ok(())
}

/// Prints everything the layout does, stamped with the layout's clock.
struct Printer {
    now: Cell<u32>,
}

impl Printer {
    fn show(&self, what: &str) {
        println!("{:>8} ms  {}", self.now.get(), what);
    }
}

impl LayoutActions for Printer {
    async fn send_key(&self, key: KeyAction) {
        self.show(&format!("key {:?}", key));
    }

    async fn set_indicator(&self, indication: Indication) {
        let rgb = indication.color.rgb();
        self.show(&format!(
            "leds {:?} rgb({}, {}, {})",
            indication.effect, rgb.r, rgb.g, rgb.b
        ));
    }

    async fn send_pointer(&self, action: PointerAction) {
        self.show(&format!("pointer {:?}", action));
    }

    async fn enter_bootloader(&self) {
        self.show("bootloader");
    }
}

fn simulate(steps: &[Step], settings: Settings) {
    let mut layout = LayoutManager::new(settings);
    let printer = Printer { now: Cell::new(0) };

    block_on(async {
        for step in steps {
            match step {
                Step::Tick(ms) => {
                    // Tick one at a time so what happens is stamped when it happens.
                    for _ in 0..*ms {
                        layout.tick(&printer, 1).await;
                        printer.now.set(layout.now().ticks());
                    }
                }
                Step::Event(event) => {
                    debug!("{:?}, {:?} side", event, side_of(event.key() as usize));
                    layout.handle_event(*event, &printer).await;
                }
            }
        }
    });
}

fn show_layer(layer: Layer) {
    let table = layer_table(layer);
    let rows: [&[Keycode]; 5] = [
        &table[0..12],
        &table[12..24],
        &table[24..36],
        &table[36..46],
        &table[46..52],
    ];
    println!("{:?}", layer);
    for row in rows {
        let names: Vec<String> = row.iter().map(keycode_name).collect();
        println!("  {}", names.join(" "));
    }
}

fn keycode_name(keycode: &Keycode) -> String {
    match keycode {
        Keycode::Trans => "____".to_string(),
        Keycode::No => "XXXX".to_string(),
        Keycode::Key(key) => format!("{:?}", key),
        other => format!("{:?}", other),
    }
}
