use std::{
   path::{Path, PathBuf},
   process::Command,
};

use crate::{
   config::GateConfig,
   error::{GateError, Result},
   redact::redact,
   style,
};

/// Read-only access to the staged state of a repository.
pub trait Vcs {
   /// Raw output of the "list staged file paths" command.
   fn staged_names(&self) -> Result<String>;

   /// Raw staged diff for a single path.
   fn staged_diff(&self, path: &str) -> Result<String>;
}

/// `git` subprocess bound to a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
   dir: PathBuf,
}

impl GitCli {
   pub fn new(dir: impl Into<PathBuf>) -> Self {
      Self { dir: dir.into() }
   }

   fn run(&self, args: &[&str]) -> Result<String> {
      let output = Command::new("git")
         .args(args)
         .current_dir(&self.dir)
         .output()
         .map_err(|e| GateError::GitError(format!("Failed to run git {}: {e}", args.join(" "))))?;

      if !output.status.success() {
         let stderr = String::from_utf8_lossy(&output.stderr);
         return Err(GateError::GitError(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
         )));
      }

      Ok(String::from_utf8_lossy(&output.stdout).to_string())
   }
}

impl Vcs for GitCli {
   fn staged_names(&self) -> Result<String> {
      self.run(&["diff", "--cached", "--name-only"])
   }

   fn staged_diff(&self, path: &str) -> Result<String> {
      self.run(&["diff", "--cached", "--", path])
   }
}

/// List staged paths worth describing. A failing git command is reported and
/// treated as "nothing staged".
pub fn list_staged_files(vcs: &impl Vcs, config: &GateConfig) -> Vec<String> {
   match vcs.staged_names() {
      Ok(output) => filter_changed_files(&output, config),
      Err(e) => {
         eprintln!("{} Error fetching changed files: {e}", style::error(style::icons::ERROR));
         Vec::new()
      },
   }
}

/// Drop blank lines, minified artifacts and config paths (plus, in strict
/// mode, anything outside the extension allow-list), keeping git's order.
pub fn filter_changed_files(output: &str, config: &GateConfig) -> Vec<String> {
   output
      .lines()
      .filter(|file| !file.trim().is_empty())
      .filter(|file| !config.excluded_markers.iter().any(|m| file.contains(m.as_str())))
      .filter(|file| !config.strict || has_allowed_extension(file, &config.allowed_extensions))
      .map(str::to_string)
      .collect()
}

fn has_allowed_extension(file: &str, allowed: &[String]) -> bool {
   Path::new(file)
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| allowed.iter().any(|a| a.trim_start_matches('.') == ext))
}

/// Strip everything outside `[A-Za-z0-9._-]`. Rejected characters are dropped,
/// not escaped, so `src/main.rs` becomes `srcmain.rs`.
pub fn sanitize_path(path: &str) -> String {
   path
      .chars()
      .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
      .collect()
}

/// Concatenate the staged diff of every file and redact the result once.
/// A file whose diff cannot be produced contributes an empty string.
pub fn collect_diff(vcs: &impl Vcs, files: &[String]) -> String {
   let raw = files
      .iter()
      .map(|file| {
         let sanitized = sanitize_path(file);
         if sanitized.is_empty() {
            return String::new();
         }
         vcs.staged_diff(&sanitized).unwrap_or_else(|e| {
            style::warn(&format!("Error getting diff for file {file}: {e}"));
            String::new()
         })
      })
      .collect::<Vec<_>>()
      .join("\n");

   redact(&raw)
}

#[cfg(test)]
pub(crate) mod fake {
   use std::{cell::RefCell, collections::HashMap};

   use super::*;

   /// In-memory `Vcs` that records every diff request.
   #[derive(Default)]
   pub struct FakeVcs {
      pub names:     Option<String>,
      pub diffs:     HashMap<String, String>,
      pub requested: RefCell<Vec<String>>,
   }

   impl FakeVcs {
      pub fn with_names(names: &str) -> Self {
         Self { names: Some(names.to_string()), ..Default::default() }
      }

      pub fn diff(mut self, path: &str, diff: &str) -> Self {
         self.diffs.insert(path.to_string(), diff.to_string());
         self
      }
   }

   impl Vcs for FakeVcs {
      fn staged_names(&self) -> Result<String> {
         self
            .names
            .clone()
            .ok_or_else(|| GateError::GitError("not a git repository".to_string()))
      }

      fn staged_diff(&self, path: &str) -> Result<String> {
         self.requested.borrow_mut().push(path.to_string());
         self
            .diffs
            .get(path)
            .cloned()
            .ok_or_else(|| GateError::GitError(format!("no diff for {path}")))
      }
   }
}
