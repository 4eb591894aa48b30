//! Dispatcher tests for codews
//!
//! Exercises [ActionDispatcher] directly with pending actions: viewer selection, the
//! per-language pipelines and the failure paths that must not reach the runner.

mod common;

use codews::app::{ActionDispatcher, NavState, PendingAction};
use codews::config::{Config, Viewers};
use codews::core::{Language, RESERVED_NAME, resolve_language};
use codews::error::WorkspaceError;
use common::{RecordingRunner, ScriptedPrompter};

use std::error;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

fn workspace(dirs: &[&str]) -> Result<(TempDir, PathBuf), Box<dyn error::Error>> {
    let tmp = tempdir()?;
    let root = tmp.path().join(RESERVED_NAME);
    fs::create_dir_all(&root)?;
    for dir in dirs {
        fs::create_dir_all(root.join(dir))?;
    }
    Ok((tmp, root))
}

fn viewers() -> Result<Viewers, Box<dyn error::Error>> {
    let config = Config::from_toml(
        r#"
        [viewers]
        image = "sxiv"
        document = "mupdf"
        editor = "vim -p"
        "#,
    )?;
    Ok(config.viewers().clone())
}

#[test]
fn open_picks_viewer_by_extension() -> Result<(), Box<dyn error::Error>> {
    let (_tmp, root) = workspace(&["Docs"])?;
    let dispatcher = ActionDispatcher::new(viewers()?);
    let runner = RecordingRunner::default();

    let cases = [
        ("shot.PNG", "sxiv", false),
        ("photo.jpg", "sxiv", false),
        ("paper.pdf", "mupdf", false),
        ("main.c", "vim", true),
    ];
    for (name, _, _) in &cases {
        fs::write(root.join("Docs").join(name), "")?;
    }

    for (name, _, _) in &cases {
        dispatcher.open(&root.join("Docs").join(name), &runner)?;
    }

    let requests = runner.requests();
    assert_eq!(requests.len(), cases.len());
    for (request, (name, viewer, interactive)) in requests.iter().zip(cases) {
        assert_eq!(request.argv()[0], viewer);
        assert_eq!(
            request.argv().last(),
            Some(&root.join("Docs").join(name).display().to_string())
        );
        assert_eq!(request.is_interactive(), interactive);
        assert_eq!(request.working_dir(), None);
    }
    assert_eq!(requests[3].argv()[1], "-p");
    Ok(())
}

#[test]
fn open_rejects_directories_and_missing_files() -> Result<(), Box<dyn error::Error>> {
    let (_tmp, root) = workspace(&["C"])?;
    let dispatcher = ActionDispatcher::new(Viewers::default());
    let runner = RecordingRunner::default();

    assert!(matches!(
        dispatcher.open(&root.join("C"), &runner),
        Err(WorkspaceError::NotAFile(_))
    ));
    assert!(matches!(
        dispatcher.open(&root.join("C/none.c"), &runner),
        Err(WorkspaceError::Io { .. })
    ));
    assert_eq!(runner.count(), 0);
    Ok(())
}

#[test]
fn language_pipelines_run_through_bash() -> Result<(), Box<dyn error::Error>> {
    let (_tmp, root) = workspace(&["Asm", "Python3"])?;
    let asm = root.join("Asm/hello.asm");
    let py = root.join("Python3/main.py");
    fs::write(&asm, "")?;
    fs::write(&py, "")?;

    assert_eq!(resolve_language(&root, &asm), Language::Assembly);
    assert_eq!(resolve_language(&root, &py), Language::Python3);

    let dispatcher = ActionDispatcher::new(Viewers::default());
    let runner = RecordingRunner::default();
    let mut nav = NavState::new(root.clone());
    nav.load()?;

    let mut prompter = ScriptedPrompter::confirming(true);
    dispatcher.dispatch(
        &mut nav,
        PendingAction::CompileAndRun(asm.clone()),
        &runner,
        &mut prompter,
    )?;
    let mut prompter = ScriptedPrompter::confirming(true);
    dispatcher.dispatch(
        &mut nav,
        PendingAction::CompileAndRun(py.clone()),
        &runner,
        &mut prompter,
    )?;
    assert_eq!(
        prompter.asked,
        ["Are you sure you want to compile and run this Python3 program?"]
    );

    let requests = runner.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].argv()[2],
        format!(
            "cd '{}' && nasm -f elf64 'hello.asm' -o 'hello.o' && ld 'hello.o' -o 'hello' && './hello'",
            root.join("Asm").display()
        )
    );
    assert_eq!(requests[0].working_dir(), Some(root.join("Asm").as_path()));
    assert_eq!(
        requests[1].argv()[2],
        format!(
            "cd '{}' && python3 '{}'",
            root.join("Python3").display(),
            py.display()
        )
    );
    assert!(requests.iter().all(|r| r.argv()[..2] == ["bash", "-c"]));
    Ok(())
}

#[test]
fn unknown_language_is_an_error() -> Result<(), Box<dyn error::Error>> {
    let (_tmp, root) = workspace(&["Rust"])?;
    let file = root.join("Rust/main.rs");
    fs::write(&file, "")?;

    let dispatcher = ActionDispatcher::new(Viewers::default());
    let runner = RecordingRunner::default();
    let mut nav = NavState::new(root.clone());
    let mut prompter = ScriptedPrompter::confirming(true);

    let result = dispatcher.dispatch(
        &mut nav,
        PendingAction::CompileAndRun(file),
        &runner,
        &mut prompter,
    );
    assert!(matches!(result, Err(WorkspaceError::UnknownLanguage(_))));
    assert!(prompter.asked.is_empty());
    assert_eq!(runner.count(), 0);
    Ok(())
}

#[test]
fn create_refuses_empty_and_escaping_names() -> Result<(), Box<dyn error::Error>> {
    let (_tmp, root) = workspace(&[])?;
    let dispatcher = ActionDispatcher::new(Viewers::default());
    let runner = RecordingRunner::default();
    let mut nav = NavState::new(root.clone());
    nav.load()?;
    let mut prompter = ScriptedPrompter::default();

    let empty = dispatcher.dispatch(
        &mut nav,
        PendingAction::CreateFile(" \t".into()),
        &runner,
        &mut prompter,
    );
    assert!(matches!(empty, Err(WorkspaceError::EmptyName)));

    let escaping = dispatcher.dispatch(
        &mut nav,
        PendingAction::CreateDirectory("../outside".into()),
        &runner,
        &mut prompter,
    );
    assert!(matches!(escaping, Err(WorkspaceError::EscapesRoot(_))));
    assert!(!root.parent().ok_or("no parent")?.join("outside").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn execute_runs_through_bash_in_current_dir() -> Result<(), Box<dyn error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let (_tmp, root) = workspace(&["Scripts"])?;
    let script = root.join("Scripts/run.sh");
    fs::write(&script, "echo hello\n")?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;

    let runner = RecordingRunner::default();
    let cwd = root.join("Scripts");
    ActionDispatcher::new(Viewers::default()).execute(&cwd, &script, &runner)?;
    ActionDispatcher::new(Viewers::default())
        .with_foreground_runs(true)
        .execute(&cwd, &script, &runner)?;

    let expected = [
        "bash".to_string(),
        "-c".to_string(),
        format!("'{}'", script.display()),
    ];
    let requests = runner.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.argv(), expected);
        assert_eq!(request.working_dir(), Some(cwd.as_path()));
        assert!(request.clears_output());
    }
    assert!(!requests[0].is_interactive());
    assert!(requests[1].is_interactive() && requests[1].pauses_after());
    Ok(())
}
