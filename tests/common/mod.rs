//! Shared test utilities for the HTTP integration tests

#![allow(dead_code)]

use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use fingerprint_capture_server::{
    capture::{CaptureFacade, InterpreterResolver, ProcessCapture},
    model::Platform,
    server::{self, AppState},
};
use tempfile::TempDir;

/// Serve `state` on an ephemeral localhost port and return the bound address
pub async fn start_test_server(state: AppState) -> SocketAddr {
    let listener = server::bind("127.0.0.1:0".parse().expect("addr"))
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    let app = server::router(Arc::new(state));
    tokio::spawn(async move {
        server::serve(listener, app, std::future::pending()).await.expect("serve");
    });

    addr
}

/// Serve a single capture backend with no gate
pub async fn start_with_capture(capture: Arc<dyn CaptureFacade>) -> SocketAddr {
    start_test_server(AppState::new(capture)).await
}

/// Working directory laid out like a deployment: `venv/` plus `capture.py`
pub struct CaptureFixture {
    pub dir: TempDir,
}

impl CaptureFixture {
    /// Creates an empty fixture with a capture script holding `body`
    pub fn with_script(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("capture.py"), body).expect("write capture script");
        Self { dir }
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.dir.path().join("venv")
    }

    pub fn script(&self) -> PathBuf {
        self.dir.path().join("capture.py")
    }

    /// Installs `/bin/sh` as the virtual environment interpreter
    #[cfg(unix)]
    pub fn install_sh_interpreter(&self) -> PathBuf {
        let bin = self.venv_dir().join("bin");
        fs::create_dir_all(&bin).expect("create venv/bin");
        let interpreter = bin.join("python3");
        std::os::unix::fs::symlink(Path::new("/bin/sh"), &interpreter)
            .expect("symlink interpreter");
        interpreter
    }

    /// Process-backed capture running this fixture's script
    pub fn process_capture(&self) -> ProcessCapture {
        ProcessCapture::new(InterpreterResolver::new(self.venv_dir(), Platform::Posix), self.script())
    }
}
