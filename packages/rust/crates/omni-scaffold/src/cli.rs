use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "omni-scaffold")]
#[command(about = "Generate an app from a base template and optional modules.")]
pub(crate) struct Cli {
    /// Project directory to generate into.
    #[arg(long)]
    pub(crate) project_dir: PathBuf,

    /// Template root (holds base/, addons/, page-studs/ and scaffold.yaml).
    #[arg(long)]
    pub(crate) template_root: PathBuf,

    /// Modules to enable, comma separated (next-auth, trpc, tailwind, prisma).
    #[arg(long = "with", value_delimiter = ',')]
    pub(crate) modules: Vec<String>,

    /// Generate into a scratch directory and only report the result.
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Do not run the package manager.
    #[arg(long)]
    pub(crate) skip_install: bool,

    /// User settings file (overrides <template-root>/scaffold.yaml).
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence).
    #[arg(long, short)]
    pub(crate) verbose: bool,
}
