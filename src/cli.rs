use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar (default: the built-in example)
    pub file: Option<PathBuf>,

    /// Start the automaton in its initializer state instead of at the start symbol
    #[arg(long)]
    pub start_at_initializer: bool,

    /// Amount of random leftmost derivations to print (default: 0)
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub derivations: Option<u32>,

    /// Rewrites allowed per derivation
    #[arg(long, value_name = "STEPS", default_value_t = 64)]
    pub max_steps: usize
}
