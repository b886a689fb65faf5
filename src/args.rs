pub(crate) const DEFAULT_API_URL: &str = "https://www.toptal.com/developers/gitignore/api";

#[derive(Debug, clap::Parser)]
#[command(
    name = "gi",
    version,
    about = "Quickly generate .gitignore files with one command",
    long_about = "gi saves you time by generating .gitignore files for your projects from \
                  the gitignore.io (Toptal) templates. Run it without subjects to pick \
                  templates interactively."
)]
pub(crate) struct Args {
    /// Templates to fetch, e.g. Go Python macOS. Omit to choose interactively.
    #[arg(name = "subject")]
    pub(crate) subjects: Vec<String>,

    /// List available templates, optionally only those containing FILTER.
    #[arg(
        short,
        long,
        value_name = "FILTER",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with = "subject"
    )]
    pub(crate) list: Option<String>,

    /// Print the template to stdout instead of writing .gitignore.
    #[arg(short, long, conflicts_with = "list")]
    pub(crate) print: bool,

    /// Append to an existing .gitignore without asking.
    #[arg(short, long, conflicts_with_all = ["overwrite", "print", "list"])]
    pub(crate) append: bool,

    /// Replace an existing .gitignore without asking.
    #[arg(short, long, conflicts_with_all = ["print", "list"])]
    pub(crate) overwrite: bool,

    /// Base URL of the gitignore API.
    #[arg(long, value_name = "URL", env = "GI_API_URL", default_value = DEFAULT_API_URL)]
    pub(crate) api_url: String,

    /// Set the level of verbosity: -v or -vv.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
}
