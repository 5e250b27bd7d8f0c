//! The variable environment: a flat string map with nested substitution.
//!
//! Templates reference variables as `{name}`. Substitution rescans the whole
//! string after each pass so a variable's value may itself contain further
//! references. Tokens naming no defined variable are left verbatim, which
//! keeps the build tool's own `$in`/`$out` placeholders and literal braces
//! intact in command templates.

use std::path::Path;

use indexmap::IndexMap;

use crate::config::VarValue;
use crate::error::{Error, Result};

/// The merged variable environment for one compilation run.
///
/// Built by layering defaults, the global `[variable]` table, and the active
/// profile's variables; later layers overwrite whole keys.
#[derive(Debug, Clone)]
pub struct VarEnv {
    vars: IndexMap<String, String>,
}

impl VarEnv {
    /// Create the environment with its built-in defaults.
    ///
    /// `in` and `out` resolve to the build tool's implicit `$in`/`$out`
    /// placeholders so command templates can be written entirely in
    /// `{name}` syntax.
    pub fn new(root: &Path, build_dir: &Path) -> Self {
        let mut vars = IndexMap::new();
        vars.insert("root".to_string(), root.display().to_string());
        vars.insert("build_dir".to_string(), build_dir.display().to_string());
        vars.insert("in".to_string(), "$in".to_string());
        vars.insert("out".to_string(), "$out".to_string());
        VarEnv { vars }
    }

    /// Layer a configuration variable table over the current environment.
    /// Same-named keys are fully overwritten; lists are joined on load.
    pub fn layer(&mut self, table: &IndexMap<String, VarValue>) {
        for (key, value) in table {
            self.vars.insert(key.clone(), value.join());
        }
    }

    /// Iterate over the merged environment in layering order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Substitute `{name}` references until a full pass makes no
    /// replacement.
    ///
    /// Acyclic references converge within one pass per defined variable, so
    /// the pass count is bounded by the variable count; exceeding the bound
    /// means two or more variables reference each other and the offending
    /// keys are reported instead of looping forever.
    pub fn expand(&self, template: &str) -> Result<String> {
        let mut current = template.to_string();

        for _ in 0..=self.vars.len() {
            let mut replaced = false;

            for (key, value) in &self.vars {
                let token = format!("{{{key}}}");
                if current.contains(&token) {
                    current = current.replace(&token, value);
                    replaced = true;
                }
            }

            if !replaced {
                return Ok(current);
            }
        }

        let keys = self
            .vars
            .keys()
            .filter(|key| current.contains(&format!("{{{key}}}")))
            .cloned()
            .collect();
        Err(Error::CyclicVariableReference { keys })
    }
}
