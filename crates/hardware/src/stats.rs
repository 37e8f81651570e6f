//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for a run. It provides:
//! 1. **Cycle and CPI:** Total cycles and dynamic (retired) instructions.
//! 2. **Stalls:** Load-use, control, and cache-miss stall cycles.
//! 3. **Speculation:** Squashed wrong-path fetches and raised exceptions.
//! 4. **Caches:** Hit/miss counts for the instruction and data caches.
//!
//! Two renderings exist: the fixed-format statistics file and a sectioned
//! console summary.

use std::fmt::Write as _;

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Cycles simulated (0 in functional mode).
    pub cycles: u64,
    /// Instructions that completed: retired in WB, or executed in functional mode.
    pub dynamic_instructions: u64,

    /// Cycles in which EX received a bubble because of a load-use hazard.
    pub load_use_stalls: u64,
    /// Cycles in which EX received a bubble because a branch or JALR was waiting on operands.
    pub control_stalls: u64,
    /// Cycles the whole pipeline was frozen by a data-cache miss.
    pub dcache_stall_cycles: u64,
    /// Cycles ID received a bubble because an instruction fetch was outstanding.
    pub icache_stall_cycles: u64,
    /// Wrong-path records squashed after a redirect.
    pub squashed: u64,
    /// Illegal instructions and memory faults that raised the exception.
    pub exceptions: u64,

    /// Instruction cache hit count.
    pub icache_hits: u64,
    /// Instruction cache miss count.
    pub icache_misses: u64,
    /// Data cache hit count.
    pub dcache_hits: u64,
    /// Data cache miss count.
    pub dcache_misses: u64,
}

/// Section names accepted by [`SimStats::render_sections`].
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "memory"];

/// Width of the label column in the statistics file.
const LABEL_WIDTH: usize = 23;

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

impl SimStats {
    /// Cycles per instruction, or 0 when nothing retired.
    pub fn cpi(&self) -> f64 {
        if self.dynamic_instructions == 0 {
            0.0
        } else {
            self.cycles as f64 / self.dynamic_instructions as f64
        }
    }

    /// Renders the statistics file body.
    ///
    /// One `label value` line per counter, labels left-aligned in a fixed column.
    pub fn report(&self) -> String {
        let rows = [
            ("Dynamic instructions: ", self.dynamic_instructions),
            ("Total cycles: ", self.cycles),
            ("I-cache hits: ", self.icache_hits),
            ("I-cache misses: ", self.icache_misses),
            ("D-cache hits: ", self.dcache_hits),
            ("D-cache misses: ", self.dcache_misses),
            ("Load-use stalls: ", self.load_use_stalls),
        ];
        let mut out = String::new();
        for (label, value) in rows {
            let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value}");
        }
        out
    }

    /// Renders the requested console sections; an empty slice selects all of them.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles;
        let mut out = String::new();

        if want("summary") {
            let _ = writeln!(out, "\n==========================================================");
            let _ = writeln!(out, "PIPELINE SIMULATION STATISTICS");
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.dynamic_instructions);
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("pipeline") {
            let _ = writeln!(out, "PIPELINE");
            for (label, value) in [
                ("stalls.load_use", self.load_use_stalls),
                ("stalls.control", self.control_stalls),
                ("stalls.icache", self.icache_stall_cycles),
                ("stalls.dcache", self.dcache_stall_cycles),
            ] {
                let _ = writeln!(
                    out,
                    "  {label:<22} {value} ({:.2}%)",
                    percent(value, cyc)
                );
            }
            let _ = writeln!(out, "  {:<22} {}", "squashed", self.squashed);
            let _ = writeln!(out, "  {:<22} {}", "exceptions", self.exceptions);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("memory") {
            let _ = writeln!(out, "MEMORY HIERARCHY");
            for (name, hits, misses) in [
                ("L1-I", self.icache_hits, self.icache_misses),
                ("L1-D", self.dcache_hits, self.dcache_misses),
            ] {
                let total = hits + misses;
                let _ = writeln!(
                    out,
                    "  {name:<6} accesses: {total:<10} | hit: {hits:<10} miss: {misses:<10} | miss_rate: {:.2}%",
                    percent(misses, total)
                );
            }
            let _ = writeln!(out, "==========================================================");
        }
        out
    }

    /// Prints the requested sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints every section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
