//! Instruction decode and early branch resolution.
//!
//! Decode does three jobs in one cycle:
//! 1. **Control generation:** classifies the instruction and produces the
//!    signal bundle carried down the pipeline.
//! 2. **Operand read:** reads `rs1`/`rs2` with MEM > WB > regfile
//!    forwarding, suppressing reads for encodings that reuse those bit
//!    positions for immediates (so no spurious hazard stalls arise).
//! 3. **Branch resolution:** conditional branches and both jumps resolve
//!    here rather than in execute, cutting the taken penalty to one
//!    cycle. The resolution is checked against fetch's prediction; a
//!    mismatch produces a redirect and predictor training requests.
//!
//! The caller suppresses this stage entirely (and retries next cycle)
//! when a comparison operand is still in flight in execute.

use crate::core::arch::Gpr;
use crate::core::pipeline::hazards::Forwards;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::{ControlSignals, CsrOp, MemWidth, OpASrc, OpBSrc, WbSrc};
use crate::core::units::bru::rs1_hash;
use crate::core::units::{AluOp, DivOp, MulOp};
use crate::isa::{abi, decode, opcodes::*};

/// Combinational outputs of the decode stage for one cycle.
#[derive(Debug, Default)]
pub struct DecodeOut {
    /// Value driven onto the ID/EX latch input.
    pub idex_input: IdExEntry,
    /// Corrected next fetch address; set when the prediction was wrong
    /// (or absent) and implies an IF flush.
    pub redirect: Option<u32>,
    /// A BTB training request: (pc, target, taken).
    pub train_btb: Option<(u32, u32, bool)>,
    /// An IBTB training request: (pc, rs1 hash, target).
    pub train_ibtb: Option<(u32, u8, u32)>,
    /// A return-address push request (link-register call).
    pub ras_push: Option<u32>,
    /// A conditional branch resolved this cycle.
    pub is_branch: bool,
    /// The resolution disagreed with fetch's prediction.
    pub mispredict: bool,
    /// A taken BTB-covered transfer the BTB failed to predict.
    pub btb_miss: bool,
    /// The instruction is `ECALL`.
    pub ecall: bool,
    /// The instruction is `EBREAK`.
    pub ebreak: bool,
    /// The instruction is `MRET`.
    pub mret: bool,
}

/// Returns the register indices this instruction actually reads.
///
/// Encodings that reuse the `rs1`/`rs2` bit positions for immediate bits
/// (`LUI`, `AUIPC`, `JAL`, CSR-immediate forms) report no use, so the
/// hazard unit never stalls on the garbage indices those bits would
/// decode to.
pub fn operand_uses(inst: u32) -> (Option<usize>, Option<usize>) {
    match decode::opcode(inst) {
        OP_REG | OP_CUSTOM0 | OP_BRANCH | OP_STORE => {
            (Some(decode::rs1(inst)), Some(decode::rs2(inst)))
        }
        OP_IMM | OP_LOAD | OP_JALR => (Some(decode::rs1(inst)), None),
        OP_SYSTEM => match decode::funct3(inst) {
            // Register CSR forms read rs1; immediate forms carry zimm there.
            1..=3 => (Some(decode::rs1(inst)), None),
            _ => (None, None),
        },
        _ => (None, None),
    }
}

/// Returns `true` for instructions that resolve a control transfer in
/// decode.
pub fn is_control(inst: u32) -> bool {
    matches!(decode::opcode(inst), OP_JAL | OP_JALR | OP_BRANCH)
}

/// Evaluates one cycle of decode for a valid IF/ID entry.
pub fn evaluate(entry: &IfIdEntry, gpr: &Gpr, fwd: &Forwards) -> DecodeOut {
    let mut out = DecodeOut::default();
    if !entry.valid {
        return out;
    }

    let inst = entry.inst;
    let op = decode::opcode(inst);
    let funct3 = decode::funct3(inst);
    let funct7 = decode::funct7(inst);
    let rd = decode::rd(inst);
    let (use1, use2) = operand_uses(inst);
    let rs1 = use1.unwrap_or(0);
    let rs2 = use2.unwrap_or(0);
    let rv1 = fwd.resolve(rs1, gpr.read(rs1));
    let rv2 = fwd.resolve(rs2, gpr.read(rs2));

    let mut ctrl = ControlSignals::default();
    let mut imm: i32 = 0;

    match op {
        OP_LUI => {
            ctrl.reg_write = true;
            ctrl.alu = AluOp::PassB;
            imm = decode::imm_u(inst);
        }
        OP_AUIPC => {
            ctrl.reg_write = true;
            ctrl.a_src = OpASrc::Pc;
            imm = decode::imm_u(inst);
        }
        OP_JAL => {
            ctrl.reg_write = true;
            ctrl.wb_src = WbSrc::Link;
            imm = decode::imm_j(inst);
        }
        OP_JALR => {
            ctrl.reg_write = true;
            ctrl.wb_src = WbSrc::Link;
            imm = decode::imm_i(inst);
        }
        OP_BRANCH => {
            imm = decode::imm_b(inst);
        }
        OP_LOAD => {
            ctrl.reg_write = true;
            ctrl.mem_read = true;
            ctrl.wb_src = WbSrc::Mem;
            ctrl.width = mem_width(funct3);
            ctrl.signed_load = funct3 & 0b100 == 0;
            imm = decode::imm_i(inst);
        }
        OP_STORE => {
            ctrl.mem_write = true;
            ctrl.width = mem_width(funct3);
            imm = decode::imm_s(inst);
        }
        OP_IMM => {
            ctrl.reg_write = true;
            ctrl.alu = alu_op(funct3, if funct3 == 0b101 { funct7 } else { 0 });
            imm = if matches!(funct3, 0b001 | 0b101) {
                decode::rs2(inst) as i32
            } else {
                decode::imm_i(inst)
            };
        }
        OP_REG => {
            ctrl.reg_write = true;
            ctrl.b_src = OpBSrc::Reg2;
            if funct7 == FUNCT7_MULDIV {
                if funct3 < 4 {
                    ctrl.mul = Some(mul_op(funct3));
                } else {
                    ctrl.div = Some(div_op(funct3));
                }
            } else {
                ctrl.alu = alu_op(funct3, funct7);
            }
        }
        OP_CUSTOM0 => {
            ctrl.reg_write = true;
            ctrl.b_src = OpBSrc::Reg2;
            ctrl.alu = if funct3 == F3_SSUB {
                AluOp::SSub
            } else {
                AluOp::SAdd
            };
        }
        OP_SYSTEM => decode_system(inst, funct3, &mut ctrl, &mut out),
        // FENCE and unrecognized encodings pass through as no-ops.
        _ => {}
    }

    let mut e = IdExEntry {
        pc: entry.pc,
        valid: true,
        rs1,
        rs2,
        rd,
        rv1,
        rv2,
        imm: imm as u32,
        ctrl,
    };
    if ctrl.csr_imm {
        e.rv1 = decode::zimm(inst);
    }

    match op {
        OP_JAL => {
            let target = entry.pc.wrapping_add(imm as u32);
            resolve_taken(&mut out, entry, target, true);
            out.train_btb = Some((entry.pc, target, true));
            if abi::is_link(rd) {
                out.ras_push = Some(entry.pc.wrapping_add(4));
            }
        }
        OP_JALR => {
            let target = rv1.wrapping_add(imm as u32) & !1;
            resolve_taken(&mut out, entry, target, false);
            if !(rd == 0 && abi::is_link(rs1)) {
                out.train_ibtb = Some((entry.pc, rs1_hash(rv1), target));
            }
            if abi::is_link(rd) {
                out.ras_push = Some(entry.pc.wrapping_add(4));
            }
        }
        OP_BRANCH => {
            let taken = branch_taken(funct3, rv1, rv2);
            let target = entry.pc.wrapping_add(imm as u32);
            out.is_branch = true;
            if taken {
                resolve_taken(&mut out, entry, target, true);
            } else if entry.pred_taken {
                out.redirect = Some(entry.pc.wrapping_add(4));
                out.mispredict = true;
            }
            out.train_btb = Some((entry.pc, target, taken));
        }
        _ => {
            // A stale BTB entry predicted taken for a non-control
            // instruction; correct to fall-through and train not-taken so
            // the entry decays and eventually self-invalidates.
            if entry.pred_taken {
                out.redirect = Some(entry.pc.wrapping_add(4));
                out.mispredict = true;
                out.train_btb = Some((entry.pc, entry.pred_target, false));
            }
        }
    }

    out.idex_input = e;
    out
}

fn resolve_taken(out: &mut DecodeOut, entry: &IfIdEntry, target: u32, btb_covered: bool) {
    if entry.pred_taken && entry.pred_target == target {
        return;
    }
    out.redirect = Some(target);
    out.mispredict = true;
    out.btb_miss = btb_covered && !entry.pred_taken;
}

fn decode_system(inst: u32, funct3: u32, ctrl: &mut ControlSignals, out: &mut DecodeOut) {
    if funct3 == 0 {
        match (inst >> 20) & 0xFFF {
            SYS_ECALL => out.ecall = true,
            SYS_EBREAK => out.ebreak = true,
            SYS_MRET => out.mret = true,
            // WFI and unknown function codes retire as no-ops.
            _ => {}
        }
        return;
    }
    ctrl.reg_write = true;
    ctrl.csr_addr = decode::csr_addr(inst);
    ctrl.csr_imm = funct3 & 0b100 != 0;
    ctrl.csr_op = match funct3 & 0b011 {
        0b01 => CsrOp::Rw,
        0b10 => CsrOp::Rs,
        0b11 => CsrOp::Rc,
        _ => CsrOp::None,
    };
}

fn branch_taken(funct3: u32, rv1: u32, rv2: u32) -> bool {
    match funct3 {
        F3_BEQ => rv1 == rv2,
        F3_BNE => rv1 != rv2,
        F3_BLT => (rv1 as i32) < (rv2 as i32),
        F3_BGE => (rv1 as i32) >= (rv2 as i32),
        F3_BLTU => rv1 < rv2,
        F3_BGEU => rv1 >= rv2,
        _ => false,
    }
}

fn mem_width(funct3: u32) -> MemWidth {
    match funct3 & 0b011 {
        0b00 => MemWidth::Byte,
        0b01 => MemWidth::Half,
        _ => MemWidth::Word,
    }
}

fn alu_op(funct3: u32, funct7: u32) -> AluOp {
    match funct3 {
        0b000 => {
            if funct7 == FUNCT7_ALT {
                AluOp::Sub
            } else {
                AluOp::Add
            }
        }
        0b001 => AluOp::Sll,
        0b010 => AluOp::Slt,
        0b011 => AluOp::Sltu,
        0b100 => AluOp::Xor,
        0b101 => {
            if funct7 == FUNCT7_ALT {
                AluOp::Sra
            } else {
                AluOp::Srl
            }
        }
        0b110 => AluOp::Or,
        _ => AluOp::And,
    }
}

fn mul_op(funct3: u32) -> MulOp {
    match funct3 {
        0b000 => MulOp::Mul,
        0b001 => MulOp::Mulh,
        0b010 => MulOp::Mulhsu,
        _ => MulOp::Mulhu,
    }
}

fn div_op(funct3: u32) -> DivOp {
    match funct3 {
        0b100 => DivOp::Div,
        0b101 => DivOp::Divu,
        0b110 => DivOp::Rem,
        _ => DivOp::Remu,
    }
}
