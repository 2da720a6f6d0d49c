use clap::Parser;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Config file. Without it `CONTRACT_AUTOTEST__CONFIG` is used, then `config.toml` if present.
    #[clap(short, long)]
    pub config_path: Option<std::path::PathBuf>,
    /// Run only the case with this name.
    #[clap(long)]
    pub case: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self::parse()
    }
}
