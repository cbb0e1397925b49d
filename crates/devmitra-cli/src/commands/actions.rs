//! Toggle, delete and mark-read commands driven through the shared action controller.

use anyhow::anyhow;
use devmitra_api_models::{EntityKind, mark_all_read_route};
use devmitra_ui::core::actions::{
    ActionController, ActionRejected, DeleteDialog, PendingAction, Settlement, dispatch,
};
use devmitra_ui::core::list::{CardId, CardRecord, ListController};

use crate::cli::{DeleteArgs, MarkReadArgs, ToggleArgs};
use crate::client::{AppContext, CliError, CliResult};

/// One-card list so the controller can track the targeted id.
fn single_card(id: &CardId) -> CliResult<ListController> {
    if id.as_str().is_empty() {
        return Err(CliError::validation("id must not be empty"));
    }
    ListController::new(
        vec![CardRecord::new(id.clone(), id.as_str(), "")],
        std::iter::empty::<&str>(),
    )
    .map_err(|err| CliError::validation(err.to_string()))
}

fn rejected(err: &ActionRejected) -> CliError {
    CliError::validation(err.to_string())
}

async fn execute(
    ctx: &AppContext,
    controller: &mut ActionController,
    list: &mut ListController,
    pending: PendingAction,
) -> CliResult<Settlement> {
    let result = dispatch(ctx, &pending).await;
    let settlement = controller.settle(list, &pending, &result);
    if settlement.outcome.succeeded() {
        println!("{}", settlement.notice.message);
        return Ok(settlement);
    }
    match result {
        Err(err) => Err(CliError::failure(
            anyhow!(err).context(settlement.notice.message),
        )),
        Ok(_) => Err(CliError::validation(settlement.notice.message)),
    }
}

pub(crate) async fn handle_toggle(ctx: &AppContext, args: ToggleArgs) -> CliResult<()> {
    let id = CardId::new(args.id.trim());
    let mut list = single_card(&id)?;
    let mut controller = ActionController::new(args.entity);
    let pending = controller
        .begin_toggle(&mut list, &id, args.state.is_active())
        .map_err(|err| rejected(&err))?;
    execute(ctx, &mut controller, &mut list, pending).await?;
    Ok(())
}

pub(crate) async fn handle_delete(ctx: &AppContext, args: DeleteArgs) -> CliResult<()> {
    let id = CardId::new(args.id.trim());
    let mut list = single_card(&id)?;
    let record = list
        .record(&id)
        .cloned()
        .ok_or_else(|| CliError::validation(format!("unknown id '{id}'")))?;
    let dialog = DeleteDialog::open(args.entity, &record);
    if !args.yes {
        let message = format!("{} Re-run with --yes to confirm.", dialog.prompt());
        dialog.cancel();
        return Err(CliError::validation(message));
    }
    let mut controller = ActionController::new(args.entity);
    let pending = controller
        .begin_delete(&list, dialog.confirm())
        .map_err(|err| rejected(&err))?;
    execute(ctx, &mut controller, &mut list, pending).await?;
    Ok(())
}

pub(crate) async fn handle_mark_read(ctx: &AppContext, args: MarkReadArgs) -> CliResult<()> {
    let id = CardId::new(args.id.trim());
    let mut list = single_card(&id)?;
    let mut controller = ActionController::new(EntityKind::Notification);
    let pending = controller
        .begin_mark_read(&list, &id)
        .map_err(|err| rejected(&err))?;
    execute(ctx, &mut controller, &mut list, pending).await?;
    Ok(())
}

pub(crate) async fn handle_mark_all_read(ctx: &AppContext) -> CliResult<()> {
    let ack = ctx
        .post_route(&mark_all_read_route())
        .await
        .map_err(|err| CliError::failure(anyhow!(err).context("mark all read failed")))?;
    if ack.success {
        println!("All notifications marked as read.");
        Ok(())
    } else {
        Err(CliError::validation(
            ack.reason()
                .unwrap_or("Failed to mark notifications as read."),
        ))
    }
}
