use crate::{
    vm::{BrainfuckVM, StepOutcome},
    vm_error::VMError,
};
use bfi_types::{VMState, VMStateFinal};

// Facilitates step-by-step execution of a program, yielding the state after each step.
// This is particularly useful for debugging.
pub struct VMIterator<'v, 'a> {
    vm: &'v mut BrainfuckVM<'a>,
    final_state: Option<VMStateFinal>,
    done: bool,
}

impl<'v, 'a> VMIterator<'v, 'a> {
    pub fn new(vm: &'v mut BrainfuckVM<'a>) -> Self {
        VMIterator {
            vm,
            final_state: None,
            done: false,
        }
    }

    /// The final state, once the iterator has run off the end of the program
    /// with state reporting enabled.
    pub fn final_state(&self) -> Option<&VMStateFinal> {
        self.final_state.as_ref()
    }
}

// Iterate one step at a time. Iteration ends at the end of the program or after the first error.
impl<'v, 'a> Iterator for VMIterator<'v, 'a> {
    type Item = Result<Option<VMState>, VMError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.vm.interpret_step() {
            Ok(StepOutcome::Running(state)) => Some(Ok(state)),
            Ok(StepOutcome::Finished(final_state)) => {
                self.final_state = final_state;
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{vm_builder::VMBuilder, EofPolicy, VMError};
    use bfi_types::RawInstruction;

    #[test]
    fn test_steps_until_end() -> Result<(), Box<dyn std::error::Error>> {
        let mut vm = VMBuilder::new()
            .set_program_reader("+>+".as_bytes())
            .set_input(&b""[..])
            .set_output(Vec::new())
            .set_report_state(true)
            .build()?;

        let mut steps = vm.steps();
        let states = steps.by_ref().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(states.len(), 3);
        assert_eq!(
            states[1].map(|state| state.last_instruction()),
            Some(Some(RawInstruction::IncrementPointer))
        );

        let final_state = steps.final_state().ok_or("missing final state")?;
        assert_eq!(final_state.tape(), &[1, 1]);
        assert!(steps.next().is_none());
        Ok(())
    }

    #[test]
    fn test_steps_stop_after_error() -> Result<(), Box<dyn std::error::Error>> {
        let mut vm = VMBuilder::new()
            .set_program_reader(",+".as_bytes())
            .set_input(&b""[..])
            .set_output(Vec::new())
            .set_eof_policy(EofPolicy::Abort)
            .build()?;

        let mut steps = vm.steps();
        assert!(matches!(steps.next(), Some(Err(VMError::EndOfInput { .. }))));
        assert!(steps.next().is_none());
        assert!(steps.final_state().is_none());
        Ok(())
    }
}
