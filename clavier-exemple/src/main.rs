use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use clavier_core::corpus::{
    create_incomplete_sentences, find_complete_sentences, find_incomplete_sentences, SAMPLE_CORPUS,
};
use clavier_core::io::read_corpus;
use clavier_core::model::generator::SentenceGenerator;
use clavier_core::{PredictorConfig, Session, TextPredictor};

/// Walks through training, prediction and typing on a French corpus.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Training text file (defaults to the built-in sample)
    #[arg(long)]
    corpus: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// JSON predictor configuration
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let config = match &args.config {
        Some(path) => PredictorConfig::load(path)?,
        None => PredictorConfig::default(),
    };

    let text = match &args.corpus {
        Some(path) => read_corpus(path)?,
        None => SAMPLE_CORPUS.to_owned(),
    };
    info!("training on {} bytes", text.len());

    let mut predictor = TextPredictor::new(config)?;
    predictor.train(&text);
    let trained = predictor.predictor()?;

    // 1. Complete a few sentences left unfinished
    println!("=== Sentence completion ===");
    let mut sentences = find_incomplete_sentences(&text);
    if sentences.len() < 5 {
        let mut complete = find_complete_sentences(&text);
        complete.shuffle(&mut rng);
        sentences.extend(create_incomplete_sentences(&complete, 5 - sentences.len(), &mut rng));
    }

    for sentence in sentences.iter().take(5) {
        let outcome = predictor.predict_next(sentence)?;
        println!("\n\"{}\"", outcome.original_sentence);
        for (i, prediction) in outcome.predictions.iter().enumerate() {
            println!(
                "  {}. {} ({}, {})",
                i + 1,
                prediction.full_suggestion,
                prediction.probability,
                prediction.model.as_str()
            );
        }
    }

    // 2. Type a generated sentence key by key
    println!("\n=== Typing session ===");
    let generator = SentenceGenerator::new(trained.model().ngrams(), trained.dictionary());
    let generated = generator.generate_sentence(&mut rng, 5, 10).to_lowercase();
    let typed: String = generated.chars().filter(|c| c.is_alphabetic() || *c == ' ').collect();

    let mut session = Session::new(trained.clone());
    for c in typed.chars() {
        let snapshot = session.key_press(c.into());
        println!(
            "  {:<40} {}",
            format!("{}{}|", snapshot.committed, snapshot.current_word),
            snapshot.suggestions.join(", ")
        );
    }

    // 3. Same sentence typed in a hurry
    println!("\n=== Simulated typos ===");
    let base = "le français est une belle langue";
    println!("  original: {base}");
    for i in 0..5 {
        let noisy = trained.model().emission().simulate_typing(base, &mut rng);
        println!("  try {}:    {}", i + 1, noisy);
    }

    // 4. Free walk along the bigram chain
    println!("\n=== Bigram chain ===");
    println!("  {}", generator.generate_from(&mut rng, "la", 10));

    Ok(())
}
