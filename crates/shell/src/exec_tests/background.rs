// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use similar_asserts::assert_eq;
use std::time::Duration;

/// Shared buffer standing in for the terminal background jobs print to.
#[derive(Clone, Default)]
struct Sink(Arc<Mutex<Vec<u8>>>);

impl Sink {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Session on the current runtime, printing job output into a [`Sink`].
fn async_session() -> (TempDir, Session, Sink) {
    let dir = tempfile::tempdir().unwrap();
    let vfs = Vfs::open(dir.path().join("vfs.dat")).unwrap();
    let sink = Sink::default();
    let session = Session::new(vfs).job_output(SharedOutput::new(sink.clone()));
    (dir, session, sink)
}

async fn wait_for_jobs(sh: &mut Session) -> Vec<Job> {
    for _ in 0..500 {
        let finished = sh.cleanup_jobs();
        if !finished.is_empty() {
            return finished;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("background job did not finish");
}

#[tokio::test(flavor = "multi_thread")]
async fn script_runs_as_tracked_task() {
    let (_dir, mut sh, sink) = async_session();
    sh.vfs().write("job.vsh", b"print done\nexit 2\n").unwrap();

    assert_eq!(
        run(&mut sh, "job.vsh &"),
        (0, "[1] Started in background\n".to_string())
    );
    assert_eq!(sh.jobs().len(), 1);
    assert_eq!(sh.jobs().find(1).unwrap().command, "job.vsh");

    let finished = wait_for_jobs(&mut sh).await;
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].exit_code, Some(2));
    assert!(sh.jobs().is_empty());
    assert_eq!(sink.contents(), "done\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn task_redirects_through_vfs() {
    let (_dir, mut sh, sink) = async_session();
    sh.vfs().write("echo.vsh", b"read line\nprint line\n").unwrap();
    sh.vfs().write("in.txt", b"Zed\n").unwrap();

    run(&mut sh, "echo.vsh < in.txt > out.txt &");
    wait_for_jobs(&mut sh).await;

    assert_eq!(sh.vfs().read_all("out.txt").unwrap(), b"Zed\n");
    assert_eq!(sink.contents(), "");
}

#[tokio::test(flavor = "multi_thread")]
async fn job_ids_increase() {
    let (_dir, mut sh, _sink) = async_session();
    sh.vfs().write("a.vsh", b"print a\n").unwrap();

    assert_eq!(run(&mut sh, "a.vsh &").1, "[1] Started in background\n");
    assert_eq!(run(&mut sh, "a.vsh &").1, "[2] Started in background\n");
    let ids: Vec<_> = sh.jobs().iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test(flavor = "multi_thread")]
async fn builtins_and_pipelines_stay_in_foreground() {
    let (_dir, mut sh, _sink) = async_session();
    sh.vfs().write("a.vsh", b"print a\n").unwrap();

    assert_eq!(
        run(&mut sh, "echo hi &"),
        (0, "[1] Started in background\nhi\n".to_string())
    );
    assert_eq!(
        run(&mut sh, "echo x | a.vsh &").1,
        "[2] Started in background\na\n"
    );
    assert!(sh.jobs().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn full_table_runs_in_foreground() {
    let (_dir, sh, _sink) = async_session();
    let mut sh = sh.max_jobs(0);
    sh.vfs().write("a.vsh", b"print a\nexit 5\n").unwrap();

    assert_eq!(
        run(&mut sh, "a.vsh &"),
        (5, "[1] Started in background\na\n".to_string())
    );
    assert!(sh.jobs().is_empty());
}

#[test]
fn without_runtime_scripts_run_in_foreground() {
    let (_dir, mut sh) = session();
    sh.vfs().write("a.vsh", b"print a\n").unwrap();

    assert_eq!(
        run(&mut sh, "a.vsh &"),
        (0, "[1] Started in background\na\n".to_string())
    );
    assert!(sh.jobs().is_empty());
}

#[test]
fn missing_script_in_background_is_not_found() {
    let (_dir, mut sh) = session();
    assert_eq!(
        run(&mut sh, "ghost &"),
        (1, "[1] Started in background\nghost: command not found\n".to_string())
    );
}
