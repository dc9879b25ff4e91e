//! Transaction nesting.
//!
//! The builder never begins or ends transactions itself. It counts logical
//! begin/commit pairs so that several layers can each wrap their own unit of
//! work, and only the outermost pair reaches the [`TransactionController`].
//!
//! # Example
//!
//! ```ignore
//! sql.begin_transaction()?;      // depth 0 -> 1: controller.begin()
//! sql.begin_transaction()?;      // depth 1 -> 2: nothing
//! sql.commit_transaction()?;     // depth 2 -> 1: nothing
//! sql.commit_transaction()?;     // depth 1 -> 0: controller.commit()
//! ```

use crate::error::{BoxError, BuildError, BuildResult};

/// Real transaction control, owned by the database layer.
pub trait TransactionController {
    /// Whether a transaction is already open on the underlying connection.
    fn in_transaction(&self) -> bool;

    fn begin(&self) -> Result<(), BoxError>;

    fn commit(&self) -> Result<(), BoxError>;

    fn rollback(&self) -> Result<(), BoxError>;
}

/// Nesting counter; never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionDepth(u32);

impl TransactionDepth {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Enter one level. On the 0 -> 1 transition the controller is asked to
    /// begin unless it already reports an open transaction. The depth is left
    /// untouched when the controller fails.
    pub fn begin(&mut self, controller: Option<&dyn TransactionController>) -> BuildResult<()> {
        if self.0 == 0 {
            if let Some(ctl) = controller.filter(|c| !c.in_transaction()) {
                ctl.begin().map_err(BuildError::Transaction)?;
                tracing::trace!(target: "sqlbits.txn", "began transaction");
            }
        }
        self.0 += 1;
        tracing::trace!(target: "sqlbits.txn", depth = self.0, "transaction depth increased");
        Ok(())
    }

    /// Leave one level, committing on the 1 -> 0 transition.
    pub fn commit(&mut self, controller: Option<&dyn TransactionController>) -> BuildResult<()> {
        self.end(controller, "commit", |c| c.commit())
    }

    /// Leave one level, rolling back on the 1 -> 0 transition.
    pub fn rollback(&mut self, controller: Option<&dyn TransactionController>) -> BuildResult<()> {
        self.end(controller, "rollback", |c| c.rollback())
    }

    fn end(
        &mut self,
        controller: Option<&dyn TransactionController>,
        action: &'static str,
        finish: impl FnOnce(&dyn TransactionController) -> Result<(), BoxError>,
    ) -> BuildResult<()> {
        if self.0 == 0 {
            return Ok(());
        }
        self.0 -= 1;
        tracing::trace!(target: "sqlbits.txn", depth = self.0, action, "transaction depth decreased");
        if self.0 == 0 {
            if let Some(ctl) = controller {
                finish(ctl).map_err(BuildError::Transaction)?;
            }
        }
        Ok(())
    }
}
