//! Interpreter resolution for the capture routine
//!
//! Every request re-runs [`InterpreterResolver::resolve`]: a virtual
//! environment interpreter is preferred when one exists on disk, otherwise the
//! platform's default interpreter name is left for the OS to find on the
//! search path. Nothing is cached between calls.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::model::Platform;

/// Where a resolved interpreter came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterSource {
    /// Absolute path into the virtual environment directory
    VirtualEnv,
    /// Bare executable name looked up on the search path at spawn time
    SearchPath,
}

/// Result of one interpreter resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInterpreter {
    /// Program handed to the OS when spawning
    pub program: PathBuf,
    /// How the program was chosen
    pub source:  InterpreterSource,
}

/// Chooses which executable runs the capture routine
#[derive(Debug, Clone)]
pub struct InterpreterResolver {
    venv_dir: PathBuf,
    platform: Platform,
}

impl InterpreterResolver {
    /// Creates a resolver probing `venv_dir` with `platform` path conventions
    pub fn new(venv_dir: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            venv_dir: venv_dir.into(),
            platform,
        }
    }

    /// Candidate interpreter inside the virtual environment
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use fingerprint_capture_server::{
    ///     capture::interpreter::InterpreterResolver, model::Platform,
    /// };
    ///
    /// let resolver = InterpreterResolver::new("venv", Platform::Posix);
    /// assert_eq!(resolver.venv_candidate(), Path::new("venv").join("bin").join("python3"));
    /// ```
    pub fn venv_candidate(&self) -> PathBuf {
        self.venv_dir.join(self.platform.venv_interpreter_subpath())
    }

    /// Resolves the interpreter for a single capture
    ///
    /// Lookup or path errors are never surfaced; they fall back to the default
    /// interpreter name. A missing interpreter only shows up later as a spawn
    /// failure.
    pub fn resolve(&self) -> ResolvedInterpreter {
        let candidate = self.venv_candidate();

        match absolute_if_exists(&candidate) {
            Some(program) => {
                info!("Found virtual environment python executable at {}", program.display());
                ResolvedInterpreter {
                    program,
                    source: InterpreterSource::VirtualEnv,
                }
            }
            None => ResolvedInterpreter {
                program: PathBuf::from(self.platform.default_interpreter()),
                source:  InterpreterSource::SearchPath,
            },
        }
    }
}

/// Absolute form of `path` when it exists; symlinks are left unresolved
fn absolute_if_exists(path: &Path) -> Option<PathBuf> {
    match std::fs::metadata(path) {
        Ok(_) => std::path::absolute(path).ok(),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tracing_test::traced_test;

    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, b"").expect("write interpreter stub");
    }

    #[test]
    fn test_falls_back_to_default_when_venv_missing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let resolver = InterpreterResolver::new(tmp.path().join("venv"), Platform::Posix);

        let resolved = resolver.resolve();

        assert_eq!(resolved.program, PathBuf::from("python3"));
        assert_eq!(resolved.source, InterpreterSource::SearchPath);
    }

    #[test]
    fn test_windows_default_name() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let resolver = InterpreterResolver::new(tmp.path().join("venv"), Platform::Windows);

        assert_eq!(resolver.resolve().program, PathBuf::from("python"));
    }

    #[test]
    fn test_prefers_existing_posix_venv() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let venv = tmp.path().join("venv");
        touch(&venv.join("bin").join("python3"));

        let resolved = InterpreterResolver::new(&venv, Platform::Posix).resolve();

        assert_eq!(resolved.source, InterpreterSource::VirtualEnv);
        assert!(resolved.program.is_absolute());
        assert_eq!(resolved.program, venv.join("bin").join("python3"));
    }

    #[test]
    fn test_prefers_existing_windows_venv() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let venv = tmp.path().join("venv");
        touch(&venv.join("Scripts").join("python.exe"));

        let resolved = InterpreterResolver::new(&venv, Platform::Windows).resolve();

        assert_eq!(resolved.source, InterpreterSource::VirtualEnv);
        assert_eq!(resolved.program, venv.join("Scripts").join("python.exe"));
    }

    #[test]
    fn test_other_platform_layout_is_ignored() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let venv = tmp.path().join("venv");
        touch(&venv.join("Scripts").join("python.exe"));

        let resolved = InterpreterResolver::new(&venv, Platform::Posix).resolve();

        assert_eq!(resolved.source, InterpreterSource::SearchPath);
        assert_eq!(resolved.program, PathBuf::from("python3"));
    }

    #[test]
    fn test_resolution_is_not_cached() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let venv = tmp.path().join("venv");
        let interpreter = venv.join("bin").join("python3");
        let resolver = InterpreterResolver::new(&venv, Platform::Posix);

        assert_eq!(resolver.resolve().source, InterpreterSource::SearchPath);

        touch(&interpreter);
        assert_eq!(resolver.resolve().source, InterpreterSource::VirtualEnv);

        fs::remove_file(&interpreter).expect("remove interpreter");
        assert_eq!(resolver.resolve().source, InterpreterSource::SearchPath);
    }

    #[test]
    #[traced_test]
    fn test_venv_hit_is_logged_at_info() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let venv = tmp.path().join("venv");
        touch(&venv.join("bin").join("python3"));

        InterpreterResolver::new(&venv, Platform::Posix).resolve();

        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .find(|line| line.contains("Found virtual environment python executable at"))
            {
                Some(line) if line.contains("INFO") => Ok(()),
                Some(line) => Err(format!("venv hit not logged at info: {line}")),
                None => Err("venv hit not logged".to_string()),
            }
        });
    }
}
