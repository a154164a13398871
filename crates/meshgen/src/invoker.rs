use {
    crate::{
        config::MeshGenConfig,
        error::{GenerateError, Result},
    },
    std::{
        ffi::OsString,
        path::{Path, PathBuf},
        process::Stdio,
        time::Duration,
    },
    tokio::process::Command,
};

/// Flags passed on every run, after the folder arguments.
const FIXED_FLAGS: [&str; 3] = ["--side_view", "--save_mesh", "--full_frame"];

/// Captured output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Validates requests and turns them into runnable jobs.
#[derive(Clone, Debug)]
pub struct MeshGenerator {
    config: MeshGenConfig,
}

impl MeshGenerator {
    pub fn new(config: MeshGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MeshGenConfig {
        &self.config
    }

    /// Resolve paths and check preconditions without starting anything.
    ///
    /// Fails with `ScriptNotFound` before checking the input folder.
    pub fn prepare(&self, img_folder: impl AsRef<Path>, out_folder: impl AsRef<Path>) -> Result<MeshGenJob> {
        let img_folder = std::path::absolute(img_folder)?;
        let out_folder = std::path::absolute(out_folder)?;
        let script = self.config.script_path()?;

        if !script.exists() {
            return Err(GenerateError::ScriptNotFound(script));
        }
        if !img_folder.exists() {
            return Err(GenerateError::InputNotFound(img_folder));
        }

        let mut args: Vec<OsString> = vec![
            script.into_os_string(),
            "--img_folder".into(),
            img_folder.clone().into_os_string(),
            "--out_folder".into(),
            out_folder.clone().into_os_string(),
            "--batch_size".into(),
            self.config.batch_size().to_string().into(),
        ];
        args.extend(FIXED_FLAGS.iter().map(OsString::from));

        Ok(MeshGenJob {
            program: self.config.python().to_string(),
            args,
            img_folder,
            out_folder,
            timeout: self.config.timeout(),
        })
    }

    /// Prepare and run a generation to completion.
    pub async fn generate(&self, img_folder: impl AsRef<Path>, out_folder: impl AsRef<Path>) -> Result<GenerateOutput> {
        let job = self.prepare(img_folder, out_folder)?;
        log::info!("Running command: {}", job.command_line());
        job.run().await
    }
}

/// A fully resolved invocation of the external program.
///
/// `run` holds the caller until the process exits. Without a timeout,
/// dropping the future leaves the process running.
#[derive(Debug, Clone)]
pub struct MeshGenJob {
    program: String,
    args: Vec<OsString>,
    img_folder: PathBuf,
    out_folder: PathBuf,
    timeout: Option<Duration>,
}

impl MeshGenJob {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn img_folder(&self) -> &Path {
        &self.img_folder
    }

    pub fn out_folder(&self) -> &Path {
        &self.out_folder
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Space-joined command line, for logs and error messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub async fn run(self) -> Result<GenerateOutput> {
        let command_line = self.command_line();
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(self.timeout.is_some())
            .spawn()
            .map_err(|source| GenerateError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| GenerateError::Timeout {
                    command: command_line.clone(),
                    limit,
                })??,
            None => child.wait_with_output().await?,
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            log::info!("Mesh generation succeeded");
            log::debug!("Output: {}", stdout);
            Ok(GenerateOutput { stdout, stderr })
        } else {
            log::error!("Mesh generation failed with {}", output.status);
            log::debug!("stdout: {}", stdout);
            log::debug!("stderr: {}", stderr);
            Err(GenerateError::Failed {
                command: command_line,
                status: output.status,
                stdout,
                stderr,
            })
        }
    }
}
