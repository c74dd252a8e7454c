use pipesim_core::isa::{Instruction, Opcode};

/// Fluent construction of in-flight instructions for stage-level tests.
pub struct InstructionBuilder {
    inst: Instruction,
}

impl InstructionBuilder {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            inst: Instruction::new(opcode, 0, 0, 0, 0),
        }
    }

    pub fn rd(mut self, rd: usize) -> Self {
        self.inst.rd = rd;
        self
    }

    pub fn rs1(mut self, rs1: usize) -> Self {
        self.inst.rs1 = rs1;
        self
    }

    pub fn rs2(mut self, rs2: usize) -> Self {
        self.inst.rs2 = rs2;
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.inst.imm = imm;
        self
    }

    /// Captured operand values, as Issue would have left them.
    pub fn values(mut self, rv1: i32, rv2: i32) -> Self {
        self.inst.rv1 = rv1;
        self.inst.rv2 = rv2;
        self
    }

    pub fn wb_value(mut self, value: i32) -> Self {
        self.inst.wb_value = value;
        self
    }

    pub fn at(mut self, location: i32) -> Self {
        self.inst.fetch_location = location;
        self
    }

    pub fn predicted(mut self, taken: bool) -> Self {
        self.inst.pred_taken = taken;
        self
    }

    pub fn build(self) -> Instruction {
        self.inst
    }
}
