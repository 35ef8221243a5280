use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the recipe corpus file (.csv or .json)
    #[arg(short, long, conflicts_with = "remote")]
    pub corpus_file: Option<String>,

    /// Fetch the recipe corpus from the endpoint in CATALOG_BASE_URL instead
    #[arg(long)]
    pub remote: bool,

    /// Path to the user profile JSON (daily budget + meal structure)
    #[arg(short, long)]
    pub profile_file: String,

    /// How many suggestions to print per meal slot
    #[arg(short, long, default_value_t = 5)]
    pub top: usize,

    /// Print scaled ingredient quantities for each slot's top suggestion
    #[arg(long)]
    pub ingredients: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
