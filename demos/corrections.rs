use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cspf_rs::apply::apply_correction;
use cspf_rs::automaton::{Alphabet, Automaton};
use cspf_rs::edits::EditCosts;
use cspf_rs::forest::Forest;
use cspf_rs::language;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of random corrections to draw.
    #[arg(value_name = "INT", default_value = "3")]
    samples: usize,

    /// Seed for the sampling RNG.
    #[clap(long, value_name = "INT", default_value = "42")]
    seed: u64,

    /// Print the forest in DOT format.
    #[clap(long)]
    dot: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    // A DFA meant to accept words with an odd number of 'a', except it
    // derails into a dead state on the second 'a'.
    let to_correct = Automaton::new([0], [(0, 'a', 1), (1, '0', 0), (1, 'a', 2)], [1]);
    let target = Automaton::new([0], [(0, 'a', 1), (1, 'a', 0), (0, '0', 0), (1, '0', 1)], [1]);
    let alphabet = Alphabet::new(['a', '0']);

    println!("to_correct = {}", to_correct);
    let minimal_dfa = language::minimize(&target, &alphabet);
    println!("target = {}", minimal_dfa);

    let mut forest = Forest::build(&to_correct, &minimal_dfa, &alphabet)?;
    println!("forest = {:?}", forest);
    println!("corrections in the forest: {}", forest.count_corrections());

    let costs = EditCosts::default();
    let (cost, corrections) = forest.compute_minimal_corrections(&costs)?;
    println!("minimal cost {} achieved by {} corrections", cost, corrections.len());
    for (i, correction) in corrections.iter().take(3).enumerate() {
        println!("minimal correction #{}:", i);
        for bundle in correction {
            let ops = bundle.iter().map(|op| op.to_string()).collect::<Vec<_>>().join(", ");
            println!("  [{}]", ops);
        }
    }

    println!("Sampling {} corrections...", args.samples);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    for i in 0..args.samples {
        let correction = forest.random_correction(&mut rng)?;
        let automata = apply_correction(&to_correct, &correction)?;
        for automaton in &automata {
            println!(
                "sample #{} of cost {}: {} (equivalent: {})",
                i,
                costs.correction_cost(&correction),
                automaton,
                language::equivalent(automaton, &minimal_dfa, &alphabet),
            );
        }
    }

    if args.dot {
        println!("{}", forest.to_dot()?);
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
