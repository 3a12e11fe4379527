use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

// Character I/O used by the keyboard registers and the trap routines.
pub trait Console: Send + Sync {
    // Wait up to timeout for a key, consuming it if there is one.
    fn poll_key(&self, timeout: Duration) -> io::Result<Option<u8>>;

    // Block until a key is available.
    fn read_char(&self) -> io::Result<u8>;

    fn write_char(&self, val: u8) -> io::Result<()>;

    fn flush(&self) -> io::Result<()>;

    fn write_all(&self, vals: &[u8]) -> io::Result<()> {
        for val in vals {
            self.write_char(*val)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////

// Scripted console for tests: input is queued up front and output is captured.
// Reading with nothing queued is an error rather than blocking forever.
#[derive(Default)]
pub struct PipeConsole {
    in_buf: Mutex<VecDeque<u8>>,
    out_buf: Mutex<Vec<u8>>,
    flushes: AtomicUsize,
    broken: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl PipeConsole {
    pub fn push_input(&self, val: u8) {
        lock(&self.in_buf).push_back(val);
    }

    pub fn write_input(&self, vals: &[u8]) {
        lock(&self.in_buf).extend(vals);
    }

    pub fn pending_input(&self) -> usize {
        lock(&self.in_buf).len()
    }

    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut lock(&self.out_buf))
    }

    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&lock(&self.out_buf)).into_owned()
    }

    pub fn num_flushes(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }

    // Every subsequent operation fails, like a closed terminal.
    pub fn break_pipe(&self) {
        self.broken.store(true, Ordering::Relaxed);
    }

    fn check(&self) -> io::Result<()> {
        if self.broken.load(Ordering::Relaxed) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"));
        }
        Ok(())
    }
}

impl Console for PipeConsole {
    fn poll_key(&self, _timeout: Duration) -> io::Result<Option<u8>> {
        self.check()?;
        Ok(lock(&self.in_buf).pop_front())
    }

    fn read_char(&self) -> io::Result<u8> {
        self.check()?;
        lock(&self.in_buf)
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no input queued"))
    }

    fn write_char(&self, val: u8) -> io::Result<()> {
        self.check()?;
        lock(&self.out_buf).push(val);
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        self.check()?;
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
