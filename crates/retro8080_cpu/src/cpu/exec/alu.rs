use crate::cpu::Cpu;
use crate::error::Result;

impl Cpu {
    /// 80-BF: accumulator operation with a register or M operand.
    pub(super) fn exec_alu_reg(&mut self) -> Result<u32> {
        let value = self.read_operand(self.ir)?;
        self.alu_op(self.ir, value);
        Ok(0)
    }

    /// ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI with the immediate byte in Z.
    pub(super) fn exec_alu_imm(&mut self) -> Result<u32> {
        self.alu_op(self.ir, self.regs.z);
        Ok(0)
    }

    pub(super) fn exec_daa(&mut self) -> Result<u32> {
        self.alu_daa();
        Ok(0)
    }

    pub(super) fn exec_cma(&mut self) -> Result<u32> {
        self.regs.a = !self.regs.a;
        Ok(0)
    }

    pub(super) fn exec_stc(&mut self) -> Result<u32> {
        self.flags.cy = true;
        Ok(0)
    }

    pub(super) fn exec_cmc(&mut self) -> Result<u32> {
        self.flags.cy = !self.flags.cy;
        Ok(0)
    }

    pub(super) fn exec_rlc(&mut self) -> Result<u32> {
        self.alu_rlc();
        Ok(0)
    }

    pub(super) fn exec_rrc(&mut self) -> Result<u32> {
        self.alu_rrc();
        Ok(0)
    }

    pub(super) fn exec_ral(&mut self) -> Result<u32> {
        self.alu_ral();
        Ok(0)
    }

    pub(super) fn exec_rar(&mut self) -> Result<u32> {
        self.alu_rar();
        Ok(0)
    }
}
