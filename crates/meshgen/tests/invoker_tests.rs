#![cfg(unix)]

use meshgen::{GenerateError, MeshGenConfig, MeshGenerator};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Engine directory holding a `demo.py` that is really a shell script, run
/// with `sh` standing in for the interpreter.
struct FakeEngine {
    root: PathBuf,
}

impl FakeEngine {
    fn new(name: &str, script: &str) -> Self {
        let root = std::env::temp_dir().join(format!("physique-meshgen-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("engine")).unwrap();
        fs::create_dir_all(root.join("images")).unwrap();
        fs::write(root.join("engine/demo.py"), script).unwrap();
        Self { root }
    }

    fn generator(&self) -> MeshGenerator {
        MeshGenerator::new(
            MeshGenConfig::default()
                .with_python("sh")
                .with_engine_dir(self.root.join("engine")),
        )
    }

    fn images(&self) -> PathBuf {
        self.root.join("images")
    }

    fn out(&self) -> PathBuf {
        self.root.join("out")
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.root).ok();
    }
}

#[test]
fn test_prepare_builds_command_line() {
    let engine = FakeEngine::new("cmdline", "exit 0\n");
    let job = engine.generator().prepare(engine.images(), engine.out()).unwrap();

    let args: Vec<String> = job
        .args()
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(job.program(), "sh");
    assert!(args[0].ends_with("engine/demo.py"));
    assert_eq!(
        &args[1..],
        &[
            "--img_folder".to_string(),
            engine.images().display().to_string(),
            "--out_folder".to_string(),
            engine.out().display().to_string(),
            "--batch_size".to_string(),
            "48".to_string(),
            "--side_view".to_string(),
            "--save_mesh".to_string(),
            "--full_frame".to_string(),
        ]
    );
    assert!(job.command_line().starts_with("sh /"));
}

#[test]
fn test_prepare_resolves_relative_paths() {
    let engine = FakeEngine::new("relative", "exit 0\n");
    let cwd = std::env::current_dir().unwrap();
    let generator = engine.generator();
    // Input must exist; the output folder need not.
    let job = generator.prepare(engine.images(), "relative/out").unwrap();
    assert_eq!(job.out_folder(), cwd.join("relative/out"));
    assert!(job.img_folder().is_absolute());
}

#[test]
fn test_relative_engine_dir_ignores_current_dir() {
    let engine = FakeEngine::new("anchored", "exit 0\n");
    let anchored = MeshGenerator::new(
        MeshGenConfig::default()
            .with_python("sh")
            .with_engine_dir("engine")
            .with_base_dir(Some(engine.root.clone())),
    );
    let job = anchored.prepare(engine.images(), engine.out()).unwrap();
    assert_eq!(job.args()[0], engine.root.join("engine/demo.py").into_os_string());

    // Same relative directory without an anchor: the current directory is
    // not consulted, so the script is looked up next to the test binary.
    let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
    let unanchored = MeshGenerator::new(MeshGenConfig::default().with_engine_dir("engine"));
    match unanchored.prepare(engine.images(), engine.out()) {
        Err(GenerateError::ScriptNotFound(path)) => {
            assert_eq!(path, exe_dir.join("engine/demo.py"))
        }
        other => panic!("expected ScriptNotFound, got {other:?}"),
    }
}

#[test]
fn test_missing_script_checked_first() {
    let generator = MeshGenerator::new(
        MeshGenConfig::default().with_engine_dir("/nonexistent/physique/engine"),
    );
    let err = generator
        .prepare("/nonexistent/images", "/tmp/out")
        .unwrap_err();
    assert!(matches!(err, GenerateError::ScriptNotFound(_)));
    assert!(err.to_string().starts_with("Script not found: /nonexistent/physique/engine/demo.py"));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_missing_input_fails_before_spawn() {
    let engine = FakeEngine::new("no-input", "exit 0\n");
    // An interpreter that cannot be started: reaching spawn would yield
    // a Spawn error instead.
    let generator = MeshGenerator::new(
        MeshGenConfig::default()
            .with_python("/nonexistent/bin/python")
            .with_engine_dir(engine.root.join("engine")),
    );
    let missing = engine.root.join("no-such-images");
    let err = generator.generate(&missing, engine.out()).await.unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(
        err.to_string(),
        format!("Input folder does not exist: {}", missing.display())
    );
}

#[tokio::test]
async fn test_generate_captures_stdout() {
    let engine = FakeEngine::new("ok", "echo \"meshes for $2\"\necho warming up >&2\n");
    let output = engine
        .generator()
        .generate(engine.images(), engine.out())
        .await
        .unwrap();
    assert_eq!(output.stdout, format!("meshes for {}\n", engine.images().display()));
    assert_eq!(output.stderr, "warming up\n");
}

#[tokio::test]
async fn test_failure_reports_stderr() {
    let engine = FakeEngine::new("fail", "echo 'CUDA out of memory' >&2\nexit 3\n");
    let err = engine
        .generator()
        .generate(engine.images(), engine.out())
        .await
        .unwrap_err();
    match &err {
        GenerateError::Failed { status, .. } => assert_eq!(status.code(), Some(3)),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(err.detail(), "CUDA out of memory\n");
}

#[tokio::test]
async fn test_failure_without_stderr_uses_description() {
    let engine = FakeEngine::new("silent-fail", "exit 2\n");
    let err = engine
        .generator()
        .generate(engine.images(), engine.out())
        .await
        .unwrap_err();
    let detail = err.detail();
    assert!(detail.starts_with("Command 'sh "), "{detail}");
    assert!(detail.ends_with("returned non-zero exit status 2."), "{detail}");
}

#[tokio::test]
async fn test_spawn_failure() {
    let engine = FakeEngine::new("spawn", "exit 0\n");
    let generator = MeshGenerator::new(
        engine
            .generator()
            .config()
            .clone()
            .with_python("/nonexistent/bin/python"),
    );
    let err = generator
        .generate(engine.images(), engine.out())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::Spawn { .. }));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_timeout_stops_waiting() {
    let engine = FakeEngine::new("timeout", "sleep 5\n");
    let job = engine
        .generator()
        .prepare(engine.images(), engine.out())
        .unwrap()
        .with_timeout(Some(Duration::from_millis(200)));

    let started = std::time::Instant::now();
    let err = job.run().await.unwrap_err();
    assert!(matches!(err, GenerateError::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(4));
}
