//! Configuration discovery and effective settings resolution.
//!
//! Verdict reads `verdict.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `output`: `human`
//! - `report`: none (read from stdin)
//! - `render.tiers`: derived from the document
//! - `render.hide_ignored`: false
//! - `render.filter`: none
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Report-building configuration section under `[render]`.
pub struct RenderCfg {
    /// Minimum number of general tiers to show.
    pub tiers: Option<u32>,
    #[serde(rename = "hideIgnored")]
    pub hide_ignored: Option<bool>,
    /// Regex over the dotted rule id; non-matching messages are dropped.
    pub filter: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `verdict.toml|yaml`.
pub struct VerdictConfig {
    pub output: Option<String>,
    /// Default report path for `verdict render` when no flag is given.
    pub report: Option<String>,
    pub render: Option<RenderCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub output: String,
    pub report: Option<String>,
    pub tiers: Option<u32>,
    pub hide_ignored: bool,
    pub filter: Option<String>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `verdict.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("verdict.toml").exists()
            || cur.join("verdict.yaml").exists()
            || cur.join("verdict.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `VerdictConfig` from `verdict.toml` or `verdict.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<VerdictConfig> {
    let toml_path = root.join("verdict.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: VerdictConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["verdict.yaml", "verdict.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: VerdictConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_report: Option<&str>,
    cli_output: Option<&str>,
    cli_tiers: Option<u32>,
    cli_filter: Option<&str>,
    cli_hide_ignored: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let report = cli_report.map(|s| s.to_string()).or(cfg.report);

    let tiers = cli_tiers.or_else(|| cfg.render.as_ref().and_then(|r| r.tiers));
    let hide_ignored = cli_hide_ignored
        .or_else(|| cfg.render.as_ref().and_then(|r| r.hide_ignored))
        .unwrap_or(false);
    let filter = cli_filter
        .map(|s| s.to_string())
        .or_else(|| cfg.render.as_ref().and_then(|r| r.filter.clone()));

    Effective {
        repo_root,
        output,
        report,
        tiers,
        hide_ignored,
        filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("verdict.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
report = "upload/validation.json"
[render]
tiers = 5
hideIgnored = true
"#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None, None);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.report.as_deref(), Some("upload/validation.json"));
        assert_eq!(eff.tiers, Some(5));
        assert!(eff.hide_ignored);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("verdict.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: human
render:
  filter: "^testcases_scripting"
"#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None, None);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.filter.as_deref(), Some("^testcases_scripting"));
        assert!(eff.report.is_none());
        assert_eq!(eff.tiers, None);
        assert!(!eff.hide_ignored);
    }

    #[test]
    fn test_cli_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("verdict.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
[render]
tiers = 5
"#
        )
        .unwrap();

        let eff = resolve_effective(
            root.to_str(),
            Some("other.json"),
            Some("human"),
            Some(7),
            None,
            Some(true),
        );
        assert_eq!(eff.output, "human");
        assert_eq!(eff.report.as_deref(), Some("other.json"));
        assert_eq!(eff.tiers, Some(7));
        assert!(eff.hide_ignored);
    }

    #[test]
    fn test_no_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, None, None, None);
        assert_eq!(eff.output, "human");
        assert!(eff.report.is_none());
    }
}
