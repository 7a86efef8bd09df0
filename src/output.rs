//! Console reporting with severity levels.
//!
//! All user-facing output goes through a [`Reporter`]. Info and success lines
//! go to the "out" sink, warnings and errors to the "err" sink. Tests swap in
//! a [`MemorySink`] to inspect what was printed.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn marker(self) -> &'static str {
        match self {
            Level::Debug => "·",
            Level::Info => "→",
            Level::Success => "✓",
            Level::Warning => "⚠",
            Level::Error => "✗",
        }
    }

    fn colored_marker(self) -> String {
        let marker = self.marker();
        match self {
            Level::Debug => marker.dimmed().to_string(),
            Level::Info => marker.blue().to_string(),
            Level::Success => marker.green().bold().to_string(),
            Level::Warning => marker.yellow().bold().to_string(),
            Level::Error => marker.red().bold().to_string(),
        }
    }

    fn is_diagnostic(self) -> bool {
        matches!(self, Level::Warning | Level::Error)
    }
}

pub struct Reporter {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    color: bool,
    verbose: bool,
}

impl Reporter {
    pub fn new(out: Box<dyn Write>, err: Box<dyn Write>, color: bool, verbose: bool) -> Self {
        Self {
            out,
            err,
            color,
            verbose,
        }
    }

    /// Reporter bound to the process stdout/stderr.
    pub fn stdio(color: bool, verbose: bool) -> Self {
        Self::new(
            Box::new(io::stdout()),
            Box::new(io::stderr()),
            color,
            verbose,
        )
    }

    pub fn log(&mut self, level: Level, message: &str) {
        if level == Level::Debug && !self.verbose {
            return;
        }
        let marker = if self.color {
            level.colored_marker()
        } else {
            level.marker().to_string()
        };
        let sink = if level.is_diagnostic() {
            &mut self.err
        } else {
            &mut self.out
        };
        // Console write failures are not actionable.
        let _ = writeln!(sink, "{marker} {message}");
    }

    pub fn debug(&mut self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn info(&mut self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn success(&mut self, message: &str) {
        self.log(Level::Success, message);
    }

    pub fn warning(&mut self, message: &str) {
        self.log(Level::Warning, message);
    }

    pub fn error(&mut self, message: &str) {
        self.log(Level::Error, message);
    }

    /// Print a heading line (bold when colored).
    pub fn heading(&mut self, title: &str) {
        let line = if self.color {
            title.bold().to_string()
        } else {
            title.to_string()
        };
        let _ = writeln!(self.out, "{line}");
    }

    /// Print text verbatim to the out sink.
    pub fn raw(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

/// Shared in-memory writer. Clones write into the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl MemorySink {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reporter writing plain text into two memory sinks: (reporter, out, err).
pub fn capture(verbose: bool) -> (Reporter, MemorySink, MemorySink) {
    let out = MemorySink::default();
    let err = MemorySink::default();
    let reporter = Reporter::new(
        Box::new(out.clone()),
        Box::new(err.clone()),
        false,
        verbose,
    );
    (reporter, out, err)
}
