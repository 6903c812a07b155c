use clap::Parser;
use minefield_core::Difficulty;
use wasm_bindgen::prelude::*;

mod game;

/// Options read from the page URL, e.g. `#--difficulty=hard&--seed=42&-vv`
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Preset name (easy, medium, hard, expert) or <size>_<mines>
    #[arg(short, long, default_value_t)]
    difficulty: Difficulty,
}

/// Largest integer an f64 holds exactly.
const SEED_SPAN: f64 = 9_007_199_254_740_992.0;

fn js_random_seed() -> u64 {
    (js_sys::Math::random() * SEED_SPAN) as u64
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, parse_error) = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::parse_from([""]), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = parse_error {
        log::warn!("Ignoring invalid options {:?}: {}", location_hash, err);
    }

    let props = game::GameProps {
        seed: args.seed.unwrap_or_else(js_random_seed),
        difficulty: args.difficulty,
    };
    log::debug!("seed: {}, difficulty: {}", props.seed, props.difficulty);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}
