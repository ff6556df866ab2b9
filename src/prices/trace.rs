// src/prices/trace.rs
use std::{fs::File, io::{BufWriter, Write}, path::Path};

/// Receives the loader's decision trace, one line at a time.
/// Sinks must not fail loudly; a sink that cannot write just drops lines.
pub trait TraceSink {
    fn append(&mut self, line: &str);
}

/// A no-op sink.
pub struct NullTrace;
impl TraceSink for NullTrace {
    fn append(&mut self, _line: &str) {}
}

/// Collects lines in memory.
#[derive(Default, Debug)]
pub struct VecTrace {
    pub lines: Vec<String>,
}

impl TraceSink for VecTrace {
    fn append(&mut self, line: &str) {
        self.lines.push(s!(line));
    }
}

/// Truncates its target on creation: one trace file per load.
pub struct FileTrace {
    out: Option<BufWriter<File>>,
}

impl FileTrace {
    pub fn create(path: &Path) -> Self {
        let out = match File::create(path) {
            Ok(f) => Some(BufWriter::new(f)),
            Err(e) => {
                loge!("Trace: cannot create {}: {}", path.display(), e);
                None
            }
        };
        Self { out }
    }

}

impl TraceSink for FileTrace {
    fn append(&mut self, line: &str) {
        if let Some(out) = self.out.as_mut() {
            if writeln!(out, "{line}").is_err() {
                self.out = None;
            }
        }
    }
}

/// Sink for an optional trace path: a file when set, nothing otherwise.
pub fn open(path: Option<&Path>) -> Box<dyn TraceSink> {
    match path {
        Some(p) => Box::new(FileTrace::create(p)),
        None => Box::new(NullTrace),
    }
}
