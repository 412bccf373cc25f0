use std::io::Write;

use kubeconf_config::OutputFormat;
use kubeconf_core::{KubeConfigSet, KubeconfigDocument};

use crate::cli::Command;

pub async fn run(
    command: &Command,
    set: &mut KubeConfigSet,
    output: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::View => write_document(&set.raw()?, output, out)?,
        Command::CurrentContext => writeln!(out, "{}", set.current_context()?)?,
        Command::CurrentNamespace => writeln!(out, "{}", set.current_namespace()?)?,
        Command::GetContexts => write_contexts(set, out)?,
        Command::GetClusters => {
            for cluster in set.clusters()? {
                writeln!(out, "{}", cluster.name)?;
            }
        }
        Command::GetUsers => {
            for user in set.users()? {
                writeln!(out, "{}", user.name)?;
            }
        }
        Command::GetPath { context } => writeln!(out, "{}", set.get_path(context.as_deref())?.display())?,
        Command::UseContext { name } => {
            set.use_context(name).await?;
            writeln!(out, "Switched to context \"{name}\".")?;
        }
        Command::RenameContext { old, new } => {
            set.rename_context(old, new).await?;
            writeln!(out, "Context \"{old}\" renamed to \"{new}\".")?;
        }
        Command::UseNamespace { namespace } => {
            set.use_namespace(namespace).await?;
            writeln!(out, "Namespace \"{namespace}\" set on context \"{}\".", set.current_context()?)?;
        }
        Command::InitConfig => anyhow::bail!("init-config does not operate on kubeconfig files"),
    }
    Ok(())
}

fn write_document(document: &KubeconfigDocument, output: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    match output {
        OutputFormat::Yaml => write!(out, "{}", document.to_yaml()?)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(document)?)?,
    }
    Ok(())
}

const CONTEXT_HEADERS: [&str; 5] = ["CURRENT", "NAME", "CLUSTER", "AUTHINFO", "NAMESPACE"];

fn write_contexts(set: &KubeConfigSet, out: &mut impl Write) -> anyhow::Result<()> {
    let current = set.current_context()?;
    let mut rows: Vec<[String; 5]> = vec![CONTEXT_HEADERS.map(String::from)];
    for ctx in set.contexts()? {
        let marker = if ctx.name == current { "*" } else { "" };
        rows.push([
            marker.to_string(),
            ctx.name,
            ctx.context.cluster.unwrap_or_default(),
            ctx.context.user.unwrap_or_default(),
            ctx.context.namespace.unwrap_or_default(),
        ]);
    }

    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    for row in &rows {
        let line: Vec<String> = row.iter().zip(widths).map(|(cell, width)| format!("{cell:<width$}")).collect();
        writeln!(out, "{}", line.join("   ").trim_end())?;
    }
    Ok(())
}
