//! Text Reports.
//!
//! Renders the end-of-run state dumps and the per-cycle pipeline trace:
//! 1. **Pipeline State:** One line per cycle with the IF address and the
//!    disassembly of every later stage.
//! 2. **Architectural State:** Register file and a memory range.
//! 3. **Caches and Statistics:** Cache geometry and the run counters.
//!
//! Rendering is separate from file output so the formats can be tested without
//! touching the filesystem. The pipeline trace grows by one line per cycle, so
//! `PipeLog` can stream it to its file as the run proceeds.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::core::pipeline::PipeSnapshot;
use crate::core::units::cache::CacheSim;
use crate::isa::abi::REG_NAMES;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::{Instruction, StageStatus};
use crate::soc::memory::MemoryStore;
use crate::stats::SimStats;

/// Width of one stage column in the pipeline-state report.
const COLUMN_WIDTH: usize = 25;
/// Separator line around each report section.
const RULE: &str = "---------------------";

/// Suffixes of the report files written next to the output base name.
pub const REPORT_SUFFIXES: [&str; 5] = [
    "_pipe_state.out",
    "_reg_state.out",
    "_mem_state.out",
    "_cache_state.out",
    "_sim_stats.out",
];

fn stage_text(inst: &Instruction) -> String {
    let body = match inst.status {
        StageStatus::Normal | StageStatus::Speculative => disassemble(inst.raw),
        StageStatus::Bubble | StageStatus::Idle | StageStatus::Squashed => "NOP".to_string(),
    };
    format!(" {body}{}", inst.status.label())
}

/// Formats one line of the pipeline-state report.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::PipeSnapshot;
/// use rvpipe_core::sim::report::pipe_state_line;
///
/// let line = pipe_state_line(&PipeSnapshot::default());
/// assert!(line.starts_with("Cycle:        0\t|| Inst at 0x0 (idle)"));
/// ```
pub fn pipe_state_line(snapshot: &PipeSnapshot) -> String {
    let state = &snapshot.state;
    let mut line = format!("Cycle: {:>8}\t|", snapshot.cycle);
    let fetch = format!(" Inst at {:#x}{}", state.if_.pc, state.if_.status.label());
    let _ = write!(line, "|{fetch:<COLUMN_WIDTH$}");
    for inst in [&state.id, &state.ex, &state.mem, &state.wb] {
        let _ = write!(line, "|{:<COLUMN_WIDTH$}", stage_text(inst));
    }
    line.push('|');
    line
}

/// Register file report: every register except `zero` as `$name = 0x…`.
pub fn register_report(regs: &RegisterFile) -> String {
    let mut out = format!("{RULE}\nBegin Register Values\n{RULE}\n");
    for (idx, name) in REG_NAMES.iter().enumerate().skip(1) {
        let _ = writeln!(out, "${name} = 0x{:016x}", regs.read(idx));
    }
    let _ = write!(out, "{RULE}\nEnd Register Values\n{RULE}\n");
    out
}

/// Memory report of `[start, end)`, five words per row.
pub fn memory_report(memory: &MemoryStore, start: u64, end: u64) -> String {
    format!(
        "{RULE}\nBegin Memory State\n{RULE}\n{}{RULE}\nEnd Memory State\n{RULE}\n",
        memory.dump(start, end)
    )
}

/// Cache configuration report for each cache, with its hit and miss counts.
pub fn cache_report(caches: &[&CacheSim]) -> String {
    let mut out = String::new();
    for cache in caches {
        let c = cache.config();
        let _ = writeln!(out, "{RULE}\nBegin {} State\n{RULE}", cache.name());
        let _ = writeln!(out, "Cache Configuration:");
        let _ = writeln!(out, "Size: {} bytes", c.size_bytes);
        let _ = writeln!(out, "Block Size: {} bytes", c.block_bytes);
        let _ = writeln!(out, "Ways: {}", c.ways);
        let _ = writeln!(out, "Sets: {}", cache.num_sets());
        let _ = writeln!(out, "Miss Latency: {} cycles", c.miss_latency);
        let _ = writeln!(out, "Hits: {}", cache.hits);
        let _ = writeln!(out, "Misses: {}", cache.misses);
        let _ = writeln!(out, "{RULE}\nEnd {} State\n{RULE}", cache.name());
    }
    out
}

/// Sink for the per-cycle pipeline-state lines.
#[derive(Debug)]
pub enum PipeLog {
    /// Lines kept in memory.
    Buffer(String),
    /// Lines written through to a file as they are produced.
    File {
        /// Buffered writer over the open file.
        out: BufWriter<File>,
        /// Path of the file, for error messages.
        path: PathBuf,
    },
}

impl PipeLog {
    /// Creates (or truncates) `path` and streams lines into it.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, SimError> {
        let file = File::create(path).map_err(|e| SimError::io(path.display().to_string(), e))?;
        Ok(Self::File {
            out: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Appends one line followed by a newline.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file write fails.
    pub fn push_line(&mut self, line: &str) -> Result<(), SimError> {
        match self {
            Self::Buffer(text) => {
                text.push_str(line);
                text.push('\n');
                Ok(())
            }
            Self::File { out, path } => out
                .write_all(line.as_bytes())
                .and_then(|()| out.write_all(b"\n"))
                .map_err(|e| SimError::io(path.display().to_string(), e)),
        }
    }

    /// The buffered text; `None` when the lines went to a file.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Buffer(text) => Some(text),
            Self::File { .. } => None,
        }
    }

    /// Flushes buffered file output. A no-op for an in-memory log.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the flush fails.
    pub fn flush(&mut self) -> Result<(), SimError> {
        match self {
            Self::Buffer(_) => Ok(()),
            Self::File { out, path } => {
                out.flush().map_err(|e| SimError::io(path.display().to_string(), e))
            }
        }
    }
}

/// Everything written at the end of a run.
#[derive(Clone, Copy, Debug)]
pub struct ReportSet<'a> {
    /// Accumulated pipeline-state lines; `None` in functional mode or when the
    /// lines were streamed to their file during the run.
    pub pipe_log: Option<&'a str>,
    /// Final register file.
    pub regs: &'a RegisterFile,
    /// Final memory.
    pub memory: &'a MemoryStore,
    /// Memory range to dump, `[start, end)`.
    pub dump_range: (u64, u64),
    /// Instruction and data caches.
    pub caches: [&'a CacheSim; 2],
    /// Final statistics.
    pub stats: &'a SimStats,
}

/// Path of one report file: `<base><suffix>`.
pub fn report_path(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

impl ReportSet<'_> {
    /// Writes every report file next to `base`.
    ///
    /// The pipeline-state file is skipped when there is no pipeline log.
    ///
    /// # Returns
    ///
    /// The paths written, in [`REPORT_SUFFIXES`] order.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] for the first file that cannot be written.
    pub fn write(&self, base: &Path) -> Result<Vec<PathBuf>, SimError> {
        let (start, end) = self.dump_range;
        let contents = [
            self.pipe_log.map(str::to_string),
            Some(register_report(self.regs)),
            Some(memory_report(self.memory, start, end)),
            Some(cache_report(&self.caches)),
            Some(self.stats.report()),
        ];
        let mut written = Vec::new();
        for (suffix, text) in REPORT_SUFFIXES.iter().zip(contents) {
            let Some(text) = text else { continue };
            let path = report_path(base, suffix);
            std::fs::write(&path, text)
                .map_err(|e| SimError::io(path.display().to_string(), e))?;
            tracing::debug!(path = %path.display(), "report written");
            written.push(path);
        }
        Ok(written)
    }
}
