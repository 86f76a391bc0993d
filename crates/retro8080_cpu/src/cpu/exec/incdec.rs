use crate::cpu::Cpu;
use crate::error::Result;

impl Cpu {
    pub(super) fn exec_inr(&mut self) -> Result<u32> {
        let index = self.ir >> 3;
        let value = self.read_operand(index)?;
        let result = self.alu_inr(value);
        self.write_operand(index, result)?;
        Ok(0)
    }

    pub(super) fn exec_dcr(&mut self) -> Result<u32> {
        let index = self.ir >> 3;
        let value = self.read_operand(index)?;
        let result = self.alu_dcr(value);
        self.write_operand(index, result)?;
        Ok(0)
    }

    pub(super) fn exec_inx(&mut self) -> Result<u32> {
        let value = self.read_pair(self.ir).wrapping_add(1);
        self.write_pair(self.ir, value);
        Ok(0)
    }

    pub(super) fn exec_dcx(&mut self) -> Result<u32> {
        let value = self.read_pair(self.ir).wrapping_sub(1);
        self.write_pair(self.ir, value);
        Ok(0)
    }

    pub(super) fn exec_dad(&mut self) -> Result<u32> {
        let value = self.read_pair(self.ir);
        self.alu_dad(value);
        Ok(0)
    }
}
