use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use kubeconf_config::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "kubeconf", version, about = "Inspect and switch contexts across merged kubeconfig files")]
pub struct Cli {
    /// Kubeconfig file to use; repeat to merge several, first one owns the current context
    #[arg(long, global = true)]
    pub kubeconfig: Vec<PathBuf>,

    /// Settings file (default: ~/.config/kubeconf/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Yaml,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Yaml => OutputFormat::Yaml,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the merged kubeconfig
    View,
    CurrentContext,
    CurrentNamespace,
    GetContexts,
    GetClusters,
    GetUsers,
    /// Print the file that defines a context (default: the current one)
    GetPath { context: Option<String> },
    UseContext { name: String },
    RenameContext { old: String, new: String },
    /// Set the namespace of the current context
    UseNamespace { namespace: String },
    /// Write the default settings file
    InitConfig,
}
