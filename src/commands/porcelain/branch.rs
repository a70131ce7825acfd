use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepoError;
use std::io::Write;

impl Repository {
    pub fn create_branch(&mut self, branch_name: &str, force: bool) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        match self.branches().create_branch(&branch_name, force) {
            Ok(()) => {
                writeln!(self.writer(), "Created branch {branch_name}")?;
                Ok(())
            }
            Err(error) => match error.downcast_ref::<RepoError>() {
                Some(condition) if condition.is_recoverable() => {
                    writeln!(self.writer(), "{condition}")?;
                    Ok(())
                }
                _ => Err(error),
            },
        }
    }

    pub fn switch_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        match self.branches().switch_branch(&branch_name) {
            Ok(()) => {
                writeln!(self.writer(), "Switched to branch {branch_name}")?;
                Ok(())
            }
            Err(error) => match error.downcast_ref::<RepoError>() {
                // reported, HEAD left untouched
                Some(condition) if condition.is_recoverable() => {
                    writeln!(self.writer(), "{condition}")?;
                    Ok(())
                }
                _ => Err(error),
            },
        }
    }
}
