use crate::config::{ConfigError, ConfigResolver, GAMEMODES_DIR};
use crate::models::{BuildResult, ProjectConfig, ServerConfig};
use crate::services::classifier::OutputClassifier;
use crate::services::platform::{COMPILER_STEM, Platform};
use crate::services::staging::{self, StageError};
use crate::services::tee::{TeeWriter, pump};
use camino::{Utf8Path, Utf8PathBuf};
use std::io;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Build output directory, relative to the project root
pub const BUILD_DIR: &str = "build";

/// Errors that can occur during a build
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("current directory is not an open.mp project")]
    NotAProject,

    #[error("failed to get configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    #[error("main file not found at {0}")]
    MainFileNotFound(Utf8PathBuf),

    #[error("failed to create directory: {0}")]
    Directory(#[source] StageError),

    #[error("pawncc not found at {0}")]
    CompilerNotFound(Utf8PathBuf),

    #[error("failed to launch pawncc at {path}: {source}")]
    CompilerLaunch {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read compiler output: {0}")]
    Output(#[source] io::Error),

    #[error("compilation failed with {} errors", .0.errors().len())]
    CompilationFailed(BuildResult),

    #[error("failed to copy required files: {0}")]
    Staging(#[source] StageError),
}

/// Everything resolved before the compiler runs.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub root: Utf8PathBuf,
    pub project: ProjectConfig,
    pub server: ServerConfig,

    /// Compiler executable: a full path, or a bare name looked up on PATH
    pub compiler: Utf8PathBuf,

    /// Configured compiler path that did not exist, when PATH is used instead
    pub compiler_fallback: Option<Utf8PathBuf>,

    /// `build/` under the project root
    pub build_dir: Utf8PathBuf,

    /// Artifact path passed to `-o`, relative to the project root
    pub output_path: Utf8PathBuf,
}

impl BuildPlan {
    /// Compiler arguments: `-o<output> <main file>`
    pub fn compiler_args(&self) -> Vec<String> {
        vec![
            format!("-o{}", self.output_path),
            self.project.main_file.clone(),
        ]
    }
}

/// Runs pawncc and classifies what it prints.
pub struct CompilerInvoker {
    platform: Platform,
    classifier: OutputClassifier,
}

impl CompilerInvoker {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            classifier: OutputClassifier::new(),
        }
    }

    /// Invoker for the host platform
    pub fn for_current_platform() -> Result<Self, BuildError> {
        Platform::current()
            .map(Self::new)
            .ok_or_else(|| BuildError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }

    /// Resolve the compiler executable.
    ///
    /// A configured directory is used only if the executable exists there;
    /// otherwise the bare file name is returned and PATH decides.
    pub fn resolve_executable(&self, root: &Utf8Path, project: &ProjectConfig) -> Utf8PathBuf {
        let bare = Utf8PathBuf::from(self.platform.executable_name(COMPILER_STEM));

        let Some(configured) = self.configured_executable(root, project) else {
            return bare;
        };

        if configured.exists() {
            configured
        } else {
            tracing::debug!("pawncc not found at {}, trying to find in PATH", configured);
            bare
        }
    }

    /// Compiler path inside the configured directory, whether or not it exists
    pub fn configured_executable(
        &self,
        root: &Utf8Path,
        project: &ProjectConfig,
    ) -> Option<Utf8PathBuf> {
        project
            .compiler_dir()
            .map(|dir| self.platform.executable_in(&root.join(dir), COMPILER_STEM))
    }

    /// Resolve configuration and prepare the build directories.
    ///
    /// Nothing is created on disk unless the main source file exists.
    ///
    /// # Errors
    /// `NotAProject`, configuration errors, a missing main file, or a
    /// directory that cannot be created.
    pub fn plan(&self, root: &Utf8Path) -> Result<BuildPlan, BuildError> {
        let resolver = ConfigResolver::new(root);
        if !resolver.is_project() {
            return Err(BuildError::NotAProject);
        }

        let project = resolver.resolve_project()?;
        let server = resolver.resolve_server()?;

        let main_file = root.join(&project.main_file);
        if !main_file.is_file() {
            return Err(BuildError::MainFileNotFound(main_file));
        }

        let build_dir = root.join(BUILD_DIR);
        staging::ensure_dir(&build_dir.join(GAMEMODES_DIR)).map_err(BuildError::Directory)?;

        let output_path = Utf8Path::new(BUILD_DIR).join(&project.output_file);
        if let Some(output_dir) = output_path.parent() {
            staging::ensure_dir(&root.join(output_dir)).map_err(BuildError::Directory)?;
        }

        let compiler = self.resolve_executable(root, &project);
        let compiler_fallback = self
            .configured_executable(root, &project)
            .filter(|configured| *configured != compiler);

        Ok(BuildPlan {
            root: root.to_path_buf(),
            project,
            server,
            compiler,
            compiler_fallback,
            build_dir,
            output_path,
        })
    }

    /// Run the compiler and classify its output.
    ///
    /// With `verbose`, child output is mirrored to the console as it arrives
    /// while still being captured. The child's exit status does not decide the
    /// result; only classified error lines do.
    pub async fn compile(&self, plan: &BuildPlan, verbose: bool) -> Result<BuildResult, BuildError> {
        let args = plan.compiler_args();
        tracing::info!("Executing: {} {}", plan.compiler, args.join(" "));

        let mut child = Command::new(&plan.compiler)
            .args(&args)
            .current_dir(&plan.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => BuildError::CompilerNotFound(plan.compiler.clone()),
                _ => BuildError::CompilerLaunch {
                    path: plan.compiler.clone(),
                    source,
                },
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BuildError::Output(io::Error::other("stdout was not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| BuildError::Output(io::Error::other("stderr was not captured")))?;

        let (out_sink, err_sink) = if verbose {
            (
                TeeWriter::with_mirror(io::stdout()),
                TeeWriter::with_mirror(io::stderr()),
            )
        } else {
            (TeeWriter::capture_only(), TeeWriter::capture_only())
        };

        let (out_sink, err_sink) = tokio::try_join!(pump(stdout, out_sink), pump(stderr, err_sink))
            .map_err(BuildError::Output)?;

        let status = child.wait().await.map_err(BuildError::Output)?;
        if !status.success() {
            tracing::info!("pawncc exited with {}", status);
        }

        Ok(self
            .classifier
            .classify_streams(&out_sink.captured_text(), &err_sink.captured_text()))
    }

    /// Compile and, if no errors were found, stage the build directory.
    ///
    /// # Errors
    /// `CompilationFailed` carries the classified result so the caller can
    /// report the error and warning lines.
    pub async fn compile_and_stage(
        &self,
        plan: &BuildPlan,
        verbose: bool,
    ) -> Result<BuildResult, BuildError> {
        let result = self.compile(plan, verbose).await?;
        if !result.success() {
            return Err(BuildError::CompilationFailed(result));
        }

        staging::stage(&plan.root, &plan.build_dir).map_err(BuildError::Staging)?;
        Ok(result)
    }
}

/// Build the project rooted at `root` on the host platform.
pub async fn build(root: &Utf8Path, verbose: bool) -> Result<BuildResult, BuildError> {
    let invoker = CompilerInvoker::for_current_platform()?;
    let plan = invoker.plan(root)?;
    invoker.compile_and_stage(&plan, verbose).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, root)
    }

    fn linux_invoker() -> CompilerInvoker {
        CompilerInvoker::new(Platform::for_os("linux").unwrap())
    }

    #[test]
    fn test_resolve_executable_configured_dir() {
        let (_temp_dir, root) = temp_root();
        fs::create_dir(root.join("qawno")).unwrap();
        fs::write(root.join("qawno/pawncc"), "").unwrap();

        let project = ProjectConfig {
            pawncc_path: "qawno".to_string(),
            ..Default::default()
        };

        let exe = linux_invoker().resolve_executable(&root, &project);
        assert_eq!(exe, root.join("qawno").join("pawncc"));
    }

    #[test]
    fn test_resolve_executable_falls_back_to_path() {
        let (_temp_dir, root) = temp_root();
        let project = ProjectConfig {
            pawncc_path: "qawno".to_string(),
            ..Default::default()
        };

        let exe = linux_invoker().resolve_executable(&root, &project);
        assert_eq!(exe, Utf8PathBuf::from("pawncc"));
    }

    #[test]
    fn test_resolve_executable_unconfigured() {
        let (_temp_dir, root) = temp_root();
        let windows = CompilerInvoker::new(Platform::for_os("windows").unwrap());

        let exe = windows.resolve_executable(&root, &ProjectConfig::default());
        assert_eq!(exe, Utf8PathBuf::from("pawncc.exe"));
    }

    #[test]
    fn test_plan_not_a_project() {
        let (_temp_dir, root) = temp_root();
        let err = linux_invoker().plan(&root).unwrap_err();
        assert!(matches!(err, BuildError::NotAProject));
        assert!(!root.join(BUILD_DIR).exists());
    }

    #[test]
    fn test_plan_creates_directories() {
        let (_temp_dir, root) = temp_root();
        fs::create_dir(root.join("gamemodes")).unwrap();
        fs::write(root.join("gamemodes/lvdm.pwn"), "main() {}").unwrap();

        let plan = linux_invoker().plan(&root).unwrap();

        assert!(root.join("build/gamemodes").is_dir());
        assert_eq!(plan.output_path, Utf8PathBuf::from("build/gamemodes/lvdm.amx"));
        assert_eq!(
            plan.compiler_args(),
            vec![
                "-obuild/gamemodes/lvdm.amx".to_string(),
                "gamemodes/lvdm.pwn".to_string()
            ]
        );
    }

    #[test]
    fn test_plan_missing_main_file() {
        let (_temp_dir, root) = temp_root();
        fs::write(
            root.join("project.json"),
            r#"{"name": "rp", "main_file": "gamemodes/rp.pwn", "output_file": "gamemodes/rp.amx"}"#,
        )
        .unwrap();

        let err = linux_invoker().plan(&root).unwrap_err();
        assert!(matches!(err, BuildError::MainFileNotFound(_)));
        assert!(!root.join(BUILD_DIR).exists());
    }

    #[test]
    fn test_plan_records_compiler_fallback() {
        let (_temp_dir, root) = temp_root();
        fs::write(
            root.join("project.json"),
            r#"{"main_file": "rp.pwn", "output_file": "gamemodes/rp.amx", "pawncc_path": "qawno"}"#,
        )
        .unwrap();
        fs::write(root.join("rp.pwn"), "main() {}").unwrap();

        let plan = linux_invoker().plan(&root).unwrap();
        assert_eq!(plan.compiler, Utf8PathBuf::from("pawncc"));
        assert_eq!(plan.compiler_fallback, Some(root.join("qawno").join("pawncc")));

        fs::create_dir(root.join("qawno")).unwrap();
        fs::write(root.join("qawno/pawncc"), "").unwrap();

        let plan = linux_invoker().plan(&root).unwrap();
        assert_eq!(plan.compiler, root.join("qawno").join("pawncc"));
        assert_eq!(plan.compiler_fallback, None);
    }

    #[test]
    fn test_compilation_failed_message() {
        let result = BuildResult::new(vec!["error 001".to_string(), "error 002".to_string()], vec![]);
        let err = BuildError::CompilationFailed(result);
        assert_eq!(err.to_string(), "compilation failed with 2 errors");
    }
}
