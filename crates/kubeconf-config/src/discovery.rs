use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Kubeconfig files to merge, in order: `explicit` (command line), then
/// `configured` (settings file), then `KUBECONFIG`, then `~/.kube/config`.
pub fn discover_kubeconfig_paths(explicit: &[PathBuf], configured: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let env = std::env::var_os("KUBECONFIG");
    let home = dirs::home_dir();
    let paths = resolve_kubeconfig_paths(explicit, configured, env.as_deref(), home.as_deref());
    if paths.is_empty() {
        anyhow::bail!("No kubeconfig found");
    }
    Ok(paths)
}

pub fn resolve_kubeconfig_paths(
    explicit: &[PathBuf],
    configured: &[PathBuf],
    env: Option<&OsStr>,
    home: Option<&Path>,
) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return dedup(explicit.iter().cloned());
    }
    if !configured.is_empty() {
        return dedup(configured.iter().cloned());
    }

    if let Some(paths) = env {
        let found = dedup(std::env::split_paths(paths).filter(|p| !p.as_os_str().is_empty() && p.exists()));
        if !found.is_empty() {
            return found;
        }
    }

    home.map(|h| vec![h.join(".kube").join("config")]).unwrap_or_default()
}

fn dedup(paths: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen: Vec<PathBuf> = Vec::new();
    for path in paths {
        if !seen.contains(&path) {
            seen.push(path);
        }
    }
    seen
}
