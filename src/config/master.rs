//! INI master config loading
//!
//! Section keys are matched case-insensitively, keys from `[DEFAULT]` fill in
//! any key a section leaves out, and `%(name)s` / `%%` references in values
//! are expanded against the section's own keys plus the defaults.

use crate::config::merge::{namespaced_key, EnvMap};
use crate::error::{ConfigError, InterpolationError};
use ini::{Ini, ParseOption, Properties};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

/// Sections copied into the environment, in merge order.
pub const SECTIONS_OF_INTEREST: [&str; 3] = ["MachineDetails", "RepoDetails", "TestshotDefaults"];

/// Section whose keys apply to every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Folds the master config's sections into an [`EnvMap`].
#[derive(Debug, Clone)]
pub struct ConfigMerger {
    path: PathBuf,
}

impl ConfigMerger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Merge every section of interest into `env`.
    ///
    /// A missing file is not an error: nothing is merged and `Ok(0)` is
    /// returned. Returns the number of variables added.
    pub fn merge_into(&self, env: &mut EnvMap) -> Result<usize, ConfigError> {
        if !self.path.is_file() {
            tracing::debug!("No master config at {}; skipping", self.path.display());
            return Ok(0);
        }

        tracing::debug!("Reading master config {}", self.path.display());
        let content = fs::read_to_string(&self.path)
            .map_err(|source| ConfigError::Read { path: self.path.clone(), source })?;

        // Values are taken verbatim: paths with backslashes or quotes must survive.
        // Indented lines continue the previous value.
        let opts = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(&content, opts)
            .map_err(|source| ConfigError::Parse { path: self.path.clone(), source })?;

        self.merge_sections(&ini, env)
    }

    fn merge_sections(&self, ini: &Ini, env: &mut EnvMap) -> Result<usize, ConfigError> {
        let defaults = match ini.section(Some(DEFAULT_SECTION)) {
            Some(section) => self.options(DEFAULT_SECTION, section)?,
            None => Vec::new(),
        };

        let mut added = 0;
        for name in SECTIONS_OF_INTEREST {
            let Some(section) = ini.section(Some(name)) else {
                tracing::warn!("Master config has no [{}] section; skipping", name);
                continue;
            };

            let mut options = self.options(name, section)?;
            for (key, value) in &defaults {
                if !options.iter().any(|(k, _)| k == key) {
                    options.push((key.clone(), value.clone()));
                }
            }

            let lookup: HashMap<&str, &str> =
                options.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            for (key, raw) in &options {
                let value = interpolate(raw, &lookup, 0).map_err(|source| {
                    ConfigError::Interpolation {
                        path: self.path.clone(),
                        section: name.to_string(),
                        key: key.clone(),
                        source,
                    }
                })?;
                if env.insert_if_absent(namespaced_key(key), value) {
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    /// Section entries with lower-cased keys, in file order. Repeated keys are rejected.
    fn options(
        &self,
        name: &str,
        section: &Properties,
    ) -> Result<Vec<(String, String)>, ConfigError> {
        let mut seen = HashSet::new();
        let mut options = Vec::new();
        for (key, value) in section.iter() {
            let key = key.trim().to_lowercase();
            if !seen.insert(key.clone()) {
                return Err(ConfigError::DuplicateKey {
                    path: self.path.clone(),
                    section: name.to_string(),
                    key,
                });
            }
            options.push((key, value.to_string()));
        }
        Ok(options)
    }
}

/// Expand `%%` to `%` and `%(name)s` to the (recursively expanded) value of `name`.
fn interpolate(
    raw: &str,
    options: &HashMap<&str, &str>,
    depth: usize,
) -> Result<String, InterpolationError> {
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(InterpolationError::TooDeep { max: MAX_INTERPOLATION_DEPTH });
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        if let Some(after) = tail.strip_prefix('%') {
            out.push('%');
            rest = after;
        } else if let Some(body) = tail.strip_prefix('(') {
            let Some(close) = body.find(")s") else {
                return Err(InterpolationError::Syntax { value: raw.to_string() });
            };
            let reference = body[..close].to_lowercase();
            let Some(referenced) = options.get(reference.as_str()) else {
                return Err(InterpolationError::Unresolved { reference });
            };
            out.push_str(&interpolate(referenced, options, depth + 1)?);
            rest = &body[close + 2..];
        } else {
            return Err(InterpolationError::Syntax { value: raw.to_string() });
        }
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use tempfile::TempDir;

    const MASTER: &str = "\
[MachineDetails]
machine_name = summit
acct_id = abc123

[RepoDetails]
git_repo = /ccs/proj/tests
machine_name = ignored

[TestshotDefaults]
scratch = C:\\scratch\\harness

[Unrelated]
other = nope
";

    fn write_master(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("master.ini");
        fs::write(&path, content).expect("write master");
        path
    }

    #[test]
    fn merges_sections_of_interest_only() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_master(&tmp, MASTER);
        let mut env = EnvMap::new();

        let added = ConfigMerger::new(&path).merge_into(&mut env).expect("merge");

        assert_eq!(added, 4);
        let vars: Vec<_> = env.added().collect();
        assert_eq!(
            vars,
            vec![
                ("RGT_MACHINE_NAME", "summit"),
                ("RGT_ACCT_ID", "abc123"),
                ("RGT_GIT_REPO", "/ccs/proj/tests"),
                ("RGT_SCRATCH", "C:\\scratch\\harness"),
            ]
        );
        assert!(!env.contains("RGT_OTHER"));
    }

    #[test]
    fn existing_value_is_not_overwritten() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_master(&tmp, MASTER);
        let mut env = EnvMap::seeded([("RGT_ACCT_ID", "from-caller")]);

        ConfigMerger::new(&path).merge_into(&mut env).expect("merge");

        assert_eq!(env.get("RGT_ACCT_ID"), Some("from-caller"));
        assert_eq!(env.get("RGT_MACHINE_NAME"), Some("summit"));
    }

    #[test]
    fn missing_file_is_skipped() {
        let tmp = TempDir::new().expect("tmp");
        let mut env = EnvMap::new();
        let added =
            ConfigMerger::new(tmp.path().join("master.ini")).merge_into(&mut env).expect("merge");
        assert_eq!(added, 0);
        assert!(env.is_empty());
    }

    #[test]
    fn missing_section_is_skipped() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_master(&tmp, "[RepoDetails]\ngit_repo = /tests\n");
        let mut env = EnvMap::new();

        let added = ConfigMerger::new(&path).merge_into(&mut env).expect("merge");

        assert_eq!(added, 1);
        assert_eq!(env.get("RGT_GIT_REPO"), Some("/tests"));
    }

    #[test]
    fn merging_twice_adds_nothing_new() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_master(&tmp, MASTER);
        let merger = ConfigMerger::new(&path);
        let mut env = EnvMap::new();

        merger.merge_into(&mut env).expect("first merge");
        let again = merger.merge_into(&mut env).expect("second merge");
        assert_eq!(again, 0);
    }

    #[test]
    fn default_keys_fill_in_missing_section_keys() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_master(
            &tmp,
            "[DEFAULT]\nscratch = /tmp/x\nmachine_name = fallback\n\n[MachineDetails]\nmachine_name = summit\n",
        );
        let mut env = EnvMap::new();

        ConfigMerger::new(&path).merge_into(&mut env).expect("merge");

        let vars: Vec<_> = env.added().collect();
        assert_eq!(vars, vec![("RGT_MACHINE_NAME", "summit"), ("RGT_SCRATCH", "/tmp/x")]);
    }

    #[test]
    fn references_and_escaped_percent_are_expanded() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_master(
            &tmp,
            "[DEFAULT]\nroot = /ccs\n\n[RepoDetails]\nbase = %(root)s/proj\npath = %(BASE)s/tests\npct = 50%%\n",
        );
        let mut env = EnvMap::new();

        ConfigMerger::new(&path).merge_into(&mut env).expect("merge");

        assert_eq!(env.get("RGT_BASE"), Some("/ccs/proj"));
        assert_eq!(env.get("RGT_PATH"), Some("/ccs/proj/tests"));
        assert_eq!(env.get("RGT_PCT"), Some("50%"));
        assert_eq!(env.get("RGT_ROOT"), Some("/ccs"));
    }

    #[test]
    fn unresolved_reference_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_master(&tmp, "[MachineDetails]\npath = %(missing)s/tests\n");
        let mut env = EnvMap::new();

        let err = ConfigMerger::new(&path).merge_into(&mut env).unwrap_err();

        match err {
            ConfigError::Interpolation { section, key, source, .. } => {
                assert_eq!(section, "MachineDetails");
                assert_eq!(key, "path");
                assert_eq!(
                    source,
                    InterpolationError::Unresolved { reference: "missing".to_string() }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stray_percent_and_cycles_are_errors() {
        let tmp = TempDir::new().expect("tmp");
        let stray = write_master(&tmp, "[MachineDetails]\nload = 50%\n");
        let err = ConfigMerger::new(&stray).merge_into(&mut EnvMap::new()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Interpolation { source: InterpolationError::Syntax { .. }, .. }
        ));

        let cycle = write_master(&tmp, "[MachineDetails]\na = %(b)s\nb = %(a)s\n");
        let err = ConfigMerger::new(&cycle).merge_into(&mut EnvMap::new()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Interpolation { source: InterpolationError::TooDeep { .. }, .. }
        ));
    }

    #[test]
    fn indented_lines_continue_the_value() {
        let tmp = TempDir::new().expect("tmp");
        let path =
            write_master(&tmp, "[MachineDetails]\nnotes = first\n  second\nqueue = batch\n");
        let mut env = EnvMap::new();

        ConfigMerger::new(&path).merge_into(&mut env).expect("merge");

        let notes: Vec<_> =
            env.get("RGT_NOTES").expect("notes").lines().map(str::trim).collect();
        assert_eq!(notes, vec!["first", "second"]);
        assert_eq!(env.get("RGT_QUEUE"), Some("batch"));
    }

    #[test]
    fn repeated_key_in_a_section_is_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_master(&tmp, "[MachineDetails]\nm = one\nM = two\n");
        let mut env = EnvMap::new();

        let err = ConfigMerger::new(&path).merge_into(&mut env).unwrap_err();

        assert!(matches!(
            &err,
            ConfigError::DuplicateKey { section, key, .. } if section == "MachineDetails" && key == "m"
        ));
        assert!(env.is_empty());
    }
}
