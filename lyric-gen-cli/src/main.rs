use std::path::PathBuf;

use clap::Parser;
use log::info;

use lyric_gen_core::model::generator::Generator;
use lyric_gen_core::model::prediction_input::PredictionInput;
use lyric_gen_core::UNKNOWN_TOKEN;

/// Generates lyrics by extending a seed with a word n-gram model.
#[derive(Parser, Debug)]
#[command(name = "lyric-gen")]
#[command(version, about)]
struct Args {
    /// Lyrics JSON file (albums → Songs → Lyrics → Text)
    #[arg(short, long, env = "LYRIC_GEN_LYRICS", default_value = "album-song-lyrics.json")]
    lyrics: PathBuf,

    /// Seed text the generation continues
    #[arg(short, long, default_value = "And you come away with a")]
    seed: String,

    /// Number of words to generate
    #[arg(short, long, default_value_t = 15)]
    count: usize,

    /// Model order (defaults to the number of seed words + 1)
    #[arg(short = 'n', long, env = "LYRIC_GEN_ORDER")]
    order: Option<usize>,

    /// Word emitted when the current context has no known continuation
    #[arg(long, default_value = UNKNOWN_TOKEN)]
    default_token: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Same order as the seed + 1 so that the whole seed is the first context
    let n = args.order.unwrap_or_else(|| Generator::order_for_seed(&args.seed));
    let generator = Generator::from_lyrics_files(&[&args.lyrics], n)?;

    let mut input = PredictionInput::with_seed(&args.seed, args.count);
    input.set_default_token(&args.default_token)?;

    info!("generating {} words with a {n}-gram model", args.count);
    println!("{}", generator.generate_text(&input)?);

    Ok(())
}
