//! Exception Tests.
//!
//! An illegal instruction or an out-of-range access raises the exception once:
//! fetch is redirected to the handler at 0x8000 and younger work is squashed.
//! The run then ends with `Exception` when the handler halts, or immediately
//! on a second exception.

use rvpipe_core::RunStatus;
use rvpipe_core::common::constants::EXCEPTION_HANDLER;
use rvpipe_core::isa::instruction::StageStatus;

use crate::common::builder::{HALT, InstructionBuilder as I};
use crate::common::harness::TestContext;

#[test]
fn illegal_instruction_redirects_to_handler() {
    let program = [0x0000_0000, I::new().addi(5, 0, 1).build()];
    let mut ctx = TestContext::new()
        .load_program(0, &program)
        .load_program(EXCEPTION_HANDLER, &[HALT]);
    ctx.sim.cpu.pc = 0;

    // Cycle 2 decodes the illegal word; cycle 3 fetches from the handler.
    let _ = ctx.run(2);
    assert!(ctx.sim.pipeline.control.exception_raised);
    assert_eq!(ctx.sim.pipeline.state.if_.status, StageStatus::Speculative);
    let _ = ctx.run(1);
    assert_eq!(ctx.sim.pipeline.state.if_.pc, EXCEPTION_HANDLER);
    assert_eq!(ctx.sim.pipeline.state.id.status, StageStatus::Squashed);

    assert_eq!(ctx.run_to_end(), RunStatus::Exception, "handler halt ends as exception");
    assert_eq!(ctx.get_reg(5), 0);
    let stats = ctx.stats();
    assert_eq!(stats.exceptions, 1);
    assert_eq!(stats.squashed, 1);
    assert_eq!(stats.cycles, 7);
}

#[test]
fn second_exception_ends_run() {
    // The handler area is zero-filled, so it holds another illegal word.
    let mut ctx = TestContext::new().load_program(0, &[0x0000_0000]);
    assert_eq!(ctx.run_to_end(), RunStatus::Exception);
    let stats = ctx.stats();
    assert_eq!(stats.exceptions, 2);
    assert_eq!(stats.cycles, 4);
}

#[test]
fn out_of_range_load_raises_exception() {
    let program = [
        I::new().lui(1, 0x10).build(), // x1 = 0x10000, one past the end of memory
        I::new().ld(2, 1, 0).build(),
        I::new().addi(5, 0, 1).build(),
        I::new().addi(6, 0, 1).build(),
    ];
    let mut ctx = TestContext::new()
        .load_program(EXCEPTION_HANDLER, &[HALT])
        .load_program(0, &program);
    assert_eq!(ctx.run_to_end(), RunStatus::Exception);
    assert_eq!(ctx.get_reg(2), 0, "faulted load writes nothing");
    assert_eq!((ctx.get_reg(5), ctx.get_reg(6)), (0, 0), "younger work squashed");
    let stats = ctx.stats();
    assert_eq!(stats.exceptions, 1);
    assert_eq!(stats.squashed, 2);
    assert_eq!(stats.dcache_hits + stats.dcache_misses, 0, "faults skip the cache");
    assert_eq!(stats.cycles, 9);
}

#[test]
fn out_of_range_store_leaves_memory_untouched() {
    let program = [
        I::new().addi(1, 0, -8).build(),
        I::new().addi(2, 0, 7).build(),
        I::new().sd(1, 2, 0).build(),
        HALT,
    ];
    let mut ctx = TestContext::new()
        .load_program(EXCEPTION_HANDLER, &[HALT])
        .load_program(0, &program);
    assert_eq!(ctx.run_to_end(), RunStatus::Exception, "squashed halt does not retire");
    assert_eq!(ctx.stats().exceptions, 1);
    assert_eq!(ctx.read_mem(0), u64::from(program[0]) | (u64::from(program[1]) << 32));
}

#[test]
fn older_work_still_commits() {
    let program = [I::new().addi(5, 0, 3).build(), 0x0000_0000];
    let mut ctx = TestContext::new()
        .load_program(EXCEPTION_HANDLER, &[HALT])
        .load_program(0, &program);
    assert_eq!(ctx.run_to_end(), RunStatus::Exception);
    assert_eq!(ctx.get_reg(5), 3);
}

#[test]
fn wrong_path_illegal_word_is_ignored() {
    // The word after the jump is illegal but never decoded.
    let program = [I::new().jal(0, 8).build(), 0x0000_0000, HALT];
    let mut ctx = TestContext::new().load_program(0, &program);
    assert_eq!(ctx.run_to_end(), RunStatus::Halt);
    assert_eq!(ctx.stats().exceptions, 0);
}

#[test]
fn functional_mode_stops_at_illegal_instruction() {
    let program = [I::new().addi(5, 0, 3).build(), 0x0000_0000, HALT];
    let mut ctx = TestContext::functional().load_program(0, &program);
    assert_eq!(ctx.run_to_end(), RunStatus::Exception);
    assert_eq!(ctx.get_reg(5), 3);
    assert_eq!(ctx.cpu().pc, 4, "pc stays on the offending instruction");
    assert_eq!(ctx.stats().exceptions, 1);
}

#[test]
fn functional_mode_stops_at_memory_fault() {
    let program = [I::new().lui(1, 0x10).build(), I::new().ld(2, 1, 0).build(), HALT];
    let mut ctx = TestContext::functional().load_program(0, &program);
    assert_eq!(ctx.run_to_end(), RunStatus::Exception);
    assert_eq!(ctx.cpu().pc, 4);
    assert_eq!(ctx.get_reg(2), 0);
}
