//! The spawned player process and its exit watcher.

use std::io;
use std::process::{Child, Command};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const WATCH_INTERVAL: Duration = Duration::from_millis(50);

/// A running player process.
///
/// Each process gets its own `running` flag, so a watcher left over from an
/// earlier session can never clear the flag of a newer one.
pub struct PlayerProcess {
    child: Arc<Mutex<Child>>,
    running: Arc<AtomicBool>,
    watcher: Option<JoinHandle<()>>,
}

impl PlayerProcess {
    pub fn spawn(mut command: Command) -> io::Result<Self> {
        let child = command.spawn()?;
        let pid = child.id();
        let child = Arc::new(Mutex::new(child));
        let running = Arc::new(AtomicBool::new(true));

        let watcher = {
            let child = child.clone();
            let running = running.clone();
            thread::spawn(move || watch_exit(pid, child, running))
        };

        Ok(Self {
            child,
            running,
            watcher: Some(watcher),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Kill and reap the process, then wait for the watcher to finish.
    pub fn terminate(mut self) {
        self.running.store(false, Ordering::Release);
        if let Ok(mut child) = self.child.lock() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
        if let Some(w) = self.watcher.take() {
            let _ = w.join();
        }
    }
}

fn watch_exit(pid: u32, child: Arc<Mutex<Child>>, running: Arc<AtomicBool>) {
    loop {
        if !running.load(Ordering::Acquire) {
            return;
        }
        // Only `try_wait` under the lock; the sleep happens outside it.
        let status = match child.lock() {
            Ok(mut c) => c.try_wait(),
            Err(_) => return,
        };
        match status {
            Ok(Some(status)) => {
                tracing::info!(pid, %status, "player exited");
                running.store(false, Ordering::Release);
                return;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(pid, error = %e, "lost track of player process");
                running.store(false, Ordering::Release);
                return;
            }
        }
        thread::sleep(WATCH_INTERVAL);
    }
}
