pub mod connect;
pub mod install;
pub mod list;
pub mod tool;

use console::style;

use super::Action;
use crate::error::{AdbiError, Result};
use crate::session::Session;

/// Run one invocation: ensure adb is available, then the chosen branch.
///
/// A rejected request returns before adb is provisioned or invoked.
pub async fn run(session: &mut Session<'_>, action: Action, force: bool) -> Result<()> {
    if let Action::Rejected { targets } = action {
        let err = AdbiError::AmbiguousTarget(targets);
        tracing::debug!("{}", err);
        session
            .io
            .println(&format!("{} {}", style("!").yellow().bold(), err));
        return Ok(());
    }

    let adb_path = tool::ensure_tool(session, force).await?;

    match action {
        Action::List => list::execute(session, &adb_path).await,
        Action::Connect { device } => connect::execute(session, &adb_path, &device).await,
        Action::Install { target, device } => {
            install::execute(session, &adb_path, &target, device.as_deref()).await
        }
        Action::Nothing | Action::Rejected { .. } => Ok(()),
    }
}
