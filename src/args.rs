use clap::Parser;

/// Counting program for ranked-ballot elections (Schulze method).
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON description of the election: candidates, seats, rules and
    /// where to find the ballots. See the `manual` module of the urnval crate for the format.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path) A reference file containing the outcome of the election in JSON format.
    /// If provided, urnval checks that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path or 'stdout', default stdout) Where to write the JSON summary of the count.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A file of ballots. Setting this option replaces the ballot sources of the
    /// configuration file.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (json or csv, default csv) The format of the file given with --input.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (schulze or irv) Overrides the counting method of the configuration file.
    #[clap(short, long, value_parser)]
    pub method: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
