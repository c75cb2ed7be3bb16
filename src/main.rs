mod cli;

use std::process::ExitCode;

use clap::Parser;
use pushdown::error_handling::report;
use pushdown::generator;
use pushdown::grammar::{ContextFreeGrammar, GrammarErrors, GrammarRule, Options};
use pushdown::parser;

use cli::Cli;

fn example_grammar() -> Result<ContextFreeGrammar, GrammarErrors> {
    ContextFreeGrammar::new(
        ["x", "y", "z"],
        ["q", "A", "B", "C"],
        "q",
        vec![
            GrammarRule::new("q", ["x", "A"]),
            GrammarRule::new("A", ["x", "A", "B", "C"]),
            GrammarRule::new("A", ["y", "B"]),
            GrammarRule::new("A", ["x"]),
            GrammarRule::new("B", ["y"]),
            GrammarRule::new("C", ["z"])
        ]
    )
}

fn load_grammar(cli: &Cli) -> Option<ContextFreeGrammar> {
    match &cli.file {
        Some(path) => parser::parse_file(path).map_err(|errors| report(&errors)).ok(),
        None => example_grammar().map_err(|errors| report(&errors)).ok()
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let Some(grammar) = load_grammar(&cli) else {
        return ExitCode::FAILURE;
    };

    println!("========== C-F GRAMMAR ============");
    println!("{}", grammar);

    let automaton = grammar.build_pushdown_automaton_with(Options {
        start_at_initializer: cli.start_at_initializer
    });

    println!("========== PD AUTOMATON ============");
    println!("{}", automaton);

    let amount = cli.derivations.unwrap_or(0);
    if amount > 0 {
        println!("========== DERIVATIONS ============");
    }
    let mut rng = rand::thread_rng();
    for _ in 0..amount {
        match generator::derive(&grammar, &mut rng, cli.max_steps) {
            Ok(derivation) => println!("{}", derivation),
            Err(e) => eprintln!("{}", e)
        }
    }

    ExitCode::SUCCESS
}
